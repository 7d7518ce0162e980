//! Playscan - direct play compatibility scanner for media libraries
//!
//! This library crate exposes the scanner, classifier and report rendering
//! for the `playscan` binary and for integration testing.

pub mod config;
pub mod report;
pub mod scanner;
