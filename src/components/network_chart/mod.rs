//! Network chart component.
//!
//! Turns a JSON graph dataset into a rendered chart on an HTML canvas:
//! - Dataset-supplied node positions (or circle fallback), with optional
//!   force-simulation refinement passes
//! - A single configuration record covering layout, labels, zoom, tooltip,
//!   and interactivity
//! - Pan, zoom, drag, and tooltip behavior, each individually switchable
//!
//! # Example
//!
//! ```ignore
//! use network_chart::{ChartOptions, GraphDataset, NetworkChartCanvas};
//!
//! let data: GraphDataset = serde_json::from_str(
//!     r#"{"nodes":[{"id":"a"},{"id":"b"}],"edges":[{"from":"a","to":"b"}]}"#,
//! )?;
//!
//! view! { <NetworkChartCanvas data=data.into() options=ChartOptions::default() /> }
//! ```

pub mod chart;
mod component;
pub mod options;
mod render;
pub mod scale;
pub mod theme;
mod types;

pub use chart::{Chart, PixelBounds};
pub use component::NetworkChartCanvas;
pub use options::{ChartOptions, LabelAnchor, LabelOptions, LayoutOptions, ZoomOptions};
pub use theme::Theme;
pub use types::{GraphDataset, GraphEdge, GraphNode};
