//! Presentation layer: reads control values from `AppState`, calls the data
//! layer, and draws what comes back.

pub mod charts;
pub mod panels;
pub mod table;
