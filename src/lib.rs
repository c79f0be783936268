//! GitHub Dashboard - repository dataset analysis & interactive charts
//!
//! Loads a CSV of GitHub repository metadata, filters it by language and
//! renders rankings, distributions and correlations.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod headless;
pub mod stats;
pub mod telemetry;
