//! Report window resolution and display-date bucketing.

pub mod window;

pub use window::{Periodo, ReportWindow, WindowSelection, display_date};
