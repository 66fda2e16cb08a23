//! Zoom-dependent sizing for chart visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system node positions live in. Values in
//!   world-space scale proportionally with zoom.
//! - **Screen-space**: pixel coordinates on the canvas. Values in
//!   screen-space stay constant regardless of zoom level.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::INFINITY` for an unbounded max.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	///
	/// The returned value is used directly in world-space drawing commands,
	/// after the canvas transform has been applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so the clamp bounds divide by k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Scale configuration for all chart elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Base node radius in world units.
	pub node_radius: f64,
	/// How the node radius scales with zoom.
	pub node_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Base edge line width in screen pixels.
	pub edge_line_width: f64,
	/// Base arrowhead size in world units.
	pub arrow_size: f64,
	/// How arrowhead size scales with zoom.
	pub arrow_behavior: ScaleBehavior,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 12.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			edge_line_width: 1.5,
			arrow_size: 5.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 0.0,
				max_screen: 18.0,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Created once per frame and passed to the rendering functions. All sizes
/// are world-space, ready to use after the canvas transform.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Label font string (e.g., "12px sans-serif"). Screen-space size.
	pub label_font: String,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Arrowhead size in world-space.
	pub arrow_size: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration, the configured label font
	/// size, and the current zoom level.
	pub fn new(config: &ScaleConfig, label_font_size: f64, k: f64) -> Self {
		Self {
			k,
			node_radius: config.node_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			label_font: format!("{}px sans-serif", label_font_size / k),
			edge_line_width: config.edge_line_width / k,
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn world_behavior_ignores_zoom() {
		assert_eq!(ScaleBehavior::World.apply(5.0, 0.5), 5.0);
		assert_eq!(ScaleBehavior::World.apply(5.0, 4.0), 5.0);
	}

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 0.5), 20.0);
	}

	#[test]
	fn clamped_behavior_bounds_screen_size() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 5.0,
			max_screen: 20.0,
		};
		// At k=0.25 the world size 5 would shrink to 1.25 screen px; the
		// clamp lifts it to 5 screen px = 20 world units.
		assert_eq!(behavior.apply(5.0, 0.25), 20.0);
		// At k=10 the world size 5 would blow up to 50 screen px; the clamp
		// caps it at 20 screen px = 2 world units.
		assert_eq!(behavior.apply(5.0, 10.0), 2.0);
		// In range, unchanged.
		assert_eq!(behavior.apply(5.0, 2.0), 5.0);
	}

	#[test]
	fn label_font_stays_constant_on_screen() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 12.0, 2.0);
		assert_eq!(scaled.label_font, "6px sans-serif");
	}
}
