//! RasterPad Application
//!
//! Headless host for the drawing engine: replays recorded action scripts
//! and writes the exported canvas to disk.

mod app;

pub use app::{App, AppConfig, ReplayReport, Script, replay};
