//! UI components.

pub mod network_chart;
