//! Chart configuration record.
//!
//! All presentation and interaction settings live in one plain record applied
//! via [`Chart::configure`](super::chart::Chart::configure). There is no
//! setter chain, so no hidden ordering between individual settings.

/// Layout refinement settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
	/// Number of force-simulation passes run at draw time. 0 keeps the
	/// dataset's supplied (or fallback) positions as-is.
	pub iteration_count: u32,
}

/// Where a node label sits relative to its node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAnchor {
	/// Pick the side facing away from the node's neighbors.
	Auto,
	/// Always left of the node, vertically centered.
	LeftCenter,
	/// Always right of the node, vertically centered.
	RightCenter,
}

/// Node label settings, applied uniformly to all labels.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelOptions {
	pub enabled: bool,
	/// Font size in screen pixels (constant under zoom).
	pub font_size: f64,
	pub anchor: LabelAnchor,
	/// Rotate labels to follow the mean direction of incident edges.
	pub auto_rotate: bool,
}

/// Initial zoom applied after the first draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomOptions {
	/// Absolute scale factor (1.0 = 100%).
	pub scale: f64,
	/// Focal point in pixel space. `None` resolves to the midpoint of the
	/// chart's pixel bounds at draw time.
	pub focus: Option<(f64, f64)>,
}

/// Complete chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
	/// Id of the pre-existing container element the chart renders into.
	pub container: String,
	pub layout: LayoutOptions,
	pub labels: LabelOptions,
	pub zoom: ZoomOptions,
	/// Show a tooltip with the node label on hover.
	pub tooltip: bool,
	/// Allow node dragging and canvas panning.
	pub interactive: bool,
	/// Allow zooming with the mouse wheel.
	pub wheel_zoom: bool,
}

impl Default for ChartOptions {
	/// The artist map reference configuration: static positions, 12px
	/// auto-rotated labels, slightly zoomed-out centered view, and all
	/// interaction switched off.
	fn default() -> Self {
		Self {
			container: "container".to_string(),
			layout: LayoutOptions { iteration_count: 0 },
			labels: LabelOptions {
				enabled: true,
				font_size: 12.0,
				anchor: LabelAnchor::Auto,
				auto_rotate: true,
			},
			zoom: ZoomOptions {
				scale: 0.95,
				focus: None,
			},
			tooltip: false,
			interactive: false,
			wheel_zoom: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_reference_configuration() {
		let options = ChartOptions::default();
		assert_eq!(options.container, "container");
		assert_eq!(options.layout.iteration_count, 0);
		assert!(options.labels.enabled);
		assert_eq!(options.labels.font_size, 12.0);
		assert_eq!(options.labels.anchor, LabelAnchor::Auto);
		assert!(options.labels.auto_rotate);
		assert_eq!(options.zoom.scale, 0.95);
		assert_eq!(options.zoom.focus, None);
		assert!(!options.tooltip);
		assert!(!options.interactive);
		assert!(!options.wheel_zoom);
	}
}
