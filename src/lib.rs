//! WeatherFlow Library
//!
//! This module exposes the lookup pipeline, stores, and UI for use by the
//! binary and in integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod orchestrator;
pub mod ui;
