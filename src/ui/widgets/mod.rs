//! Custom ratatui widgets

pub mod meter;

pub use meter::Meter;
