//! The chart handle: dataset turned into a positioned node/edge graph with a
//! pan/zoom transform and the applied configuration.
//!
//! A [`Chart`] is constructed once from a successfully parsed dataset, then
//! configured with a single [`ChartOptions`] record and drawn. The handle is
//! owned by the mounting component; there is no global chart state.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::options::ChartOptions;
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::types::GraphDataset;

/// Margin kept between mapped dataset coordinates and the canvas border, in
/// screen pixels.
const FIT_MARGIN: f64 = 60.0;

/// Time step used for layout refinement passes, matching the render loop.
const LAYOUT_DT: f32 = 0.016;

/// The chart's on-screen size in pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelBounds {
	pub width: f64,
	pub height: f64,
}

impl PixelBounds {
	/// Midpoint of the bounds, the default zoom focal point.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// Per-node display metadata attached to each node in the graph.
#[derive(Clone, Debug, Default)]
pub struct NodeMeta {
	/// Display text: the dataset label, falling back to the node id.
	pub label: String,
	/// Resolved CSS fill color.
	pub color: String,
}

/// Pan and zoom transform applied to the entire chart view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0 by interaction).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Minimum time (seconds) the tooltip stays up after the cursor leaves a
/// node's hover zone. Prevents flashing when the mouse skirts the edge.
const MIN_HOLD_TIME: f64 = 0.12;

/// Hover tracking for the tooltip overlay, with exponentially smoothed
/// fade-in/out so the box does not pop.
#[derive(Clone, Debug, Default)]
pub struct TooltipState {
	/// Currently hovered node (if any).
	pub hovered: Option<DefaultNodeIdx>,
	/// Cursor position in screen space, where the tooltip box is anchored.
	pub screen: (f64, f64),
	intensity: f64,
	hold: f64,
	clear_requested: bool,
}

impl TooltipState {
	/// Update the hovered node and the cursor anchor position.
	///
	/// Clearing the hover is deferred until the hold time has expired, so a
	/// cursor that briefly skirts a node's hover zone does not flash the box.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, screen: (f64, f64)) {
		self.screen = screen;
		if node.is_some() {
			self.hovered = node;
			self.hold = MIN_HOLD_TIME;
			self.clear_requested = false;
		} else if self.hovered.is_some() {
			self.clear_requested = true;
			if self.hold <= 0.0 {
				self.hovered = None;
			}
		}
	}

	/// Animate the fade towards its target.
	///
	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt)),
	/// natural ease-out that slows as it approaches the target.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 8.0;
		const FADE_OUT_SPEED: f64 = 5.0;

		if self.hold > 0.0 {
			self.hold -= dt;
		}
		if self.clear_requested && self.hold <= 0.0 {
			self.hovered = None;
		}

		if self.hovered.is_some() {
			self.intensity += (1.0 - self.intensity) * (1.0 - (-FADE_IN_SPEED * dt).exp());
		} else if self.hold <= 0.0 {
			self.intensity *= (-FADE_OUT_SPEED * dt).exp();
			if self.intensity < 0.005 {
				self.intensity = 0.0;
			}
		}
	}

	/// Current fade intensity in [0, 1].
	pub fn intensity(&self) -> f64 {
		self.intensity
	}
}

/// The live chart: graph, view transform, and applied configuration.
pub struct Chart {
	pub graph: ForceGraph<NodeMeta, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub tooltip: TooltipState,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	bounds: PixelBounds,
	settings: ChartOptions,
	pending_iterations: u32,
	zoom_focus: Option<(f64, f64)>,
	node_count: usize,
	drawn: bool,
}

impl Chart {
	/// Build a chart from a parsed dataset, sized to the given pixel bounds.
	///
	/// Nodes with supplied coordinates are fitted into the bounds with a
	/// margin; nodes without coordinates are spaced evenly on a circle.
	/// Edges referencing unknown node ids are skipped with a warning.
	pub fn new(data: &GraphDataset, width: f64, height: f64) -> Self {
		Self::with_theme(data, width, height, &Theme::default())
	}

	/// Like [`Chart::new`] with an explicit theme for color resolution.
	pub fn with_theme(data: &GraphDataset, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let positions = place_nodes(data, width, height);
		let mut group_slots: HashMap<&str, usize> = HashMap::new();
		let mut id_to_idx = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			// Color resolution: explicit fill > group palette slot > index
			// palette slot.
			let color = node.fill.clone().unwrap_or_else(|| {
				let slot = match &node.group {
					Some(group) => {
						let next = group_slots.len();
						*group_slots.entry(group.as_str()).or_insert(next)
					}
					None => i,
				};
				theme.palette.get(slot).to_css_rgb()
			});

			let (x, y) = positions[i];
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeMeta {
					label: node.display_label().to_string(),
					color,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut edges = Vec::new();
		for edge in &data.edges {
			match (id_to_idx.get(edge.from.as_str()), id_to_idx.get(edge.to.as_str())) {
				(Some(&from), Some(&to)) => {
					graph.add_edge(from, to, EdgeData::default());
					edges.push((from, to));
				}
				_ => {
					log::warn!(
						"network-chart: skipping edge with unknown endpoint {} -> {}",
						edge.from,
						edge.to
					);
				}
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			tooltip: TooltipState::default(),
			bounds: PixelBounds { width, height },
			settings: ChartOptions::default(),
			pending_iterations: 0,
			zoom_focus: None,
			node_count: data.nodes.len(),
			drawn: false,
		}
	}

	/// Apply the whole configuration record in one call.
	///
	/// Layout refinement passes are scheduled here and run by [`Chart::draw`].
	pub fn configure(&mut self, options: &ChartOptions) {
		self.pending_iterations = options.layout.iteration_count;
		self.settings = options.clone();
	}

	/// Run the scheduled layout passes, then apply the configured zoom with
	/// its focus resolved against the current pixel bounds.
	pub fn draw(&mut self) {
		for _ in 0..self.pending_iterations {
			self.graph.update(LAYOUT_DT);
		}
		self.pending_iterations = 0;

		let (cx, cy) = self
			.settings
			.zoom
			.focus
			.unwrap_or_else(|| self.bounds.center());
		self.zoom(self.settings.zoom.scale, cx, cy);
		self.drawn = true;
	}

	/// Set the absolute zoom level about an anchor point, keeping the anchor
	/// fixed on screen.
	pub fn zoom(&mut self, scale: f64, cx: f64, cy: f64) {
		let ratio = scale / self.transform.k;
		self.transform.x = cx - (cx - self.transform.x) * ratio;
		self.transform.y = cy - (cy - self.transform.y) * ratio;
		self.transform.k = scale;
		self.zoom_focus = Some((cx, cy));
	}

	/// Convert screen coordinates into graph (world) coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Find the node under a screen position, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.settings.labels.font_size, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Advance tooltip fade (and nothing else; node positions are settled
	/// once [`Chart::draw`] has run).
	pub fn tick(&mut self, dt: f64) {
		self.tooltip.tick(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = PixelBounds { width, height };
	}

	/// The applied configuration.
	pub fn settings(&self) -> &ChartOptions {
		&self.settings
	}

	/// Rendered size in pixel units.
	pub fn pixel_bounds(&self) -> PixelBounds {
		self.bounds
	}

	/// Current zoom scale factor.
	pub fn zoom_level(&self) -> f64 {
		self.transform.k
	}

	/// Anchor point of the most recent zoom, if any zoom was applied.
	pub fn zoom_focus(&self) -> Option<(f64, f64)> {
		self.zoom_focus
	}

	pub fn node_count(&self) -> usize {
		self.node_count
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether [`Chart::draw`] has run.
	pub fn is_drawn(&self) -> bool {
		self.drawn
	}

	/// Edge list as node index pairs, in dataset order.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}
}

/// Compute a pixel-space position for every node.
///
/// Supplied dataset coordinates are fitted into the bounds with [`FIT_MARGIN`]
/// on each side, preserving aspect ratio. Nodes without coordinates fall back
/// to evenly spaced placement on a circle around the center.
fn place_nodes(data: &GraphDataset, width: f64, height: f64) -> Vec<(f64, f64)> {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let supplied: Vec<Option<(f64, f64)>> = data.nodes.iter().map(|n| n.position()).collect();

	// Extent of the supplied coordinates, if any.
	let mut extent: Option<(f64, f64, f64, f64)> = None;
	for &(x, y) in supplied.iter().flatten() {
		extent = Some(match extent {
			None => (x, y, x, y),
			Some((min_x, min_y, max_x, max_y)) => {
				(min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
			}
		});
	}

	let fit = extent.map(|(min_x, min_y, max_x, max_y)| {
		let (span_x, span_y) = (max_x - min_x, max_y - min_y);
		let scale_x = (width - 2.0 * FIT_MARGIN) / span_x;
		let scale_y = (height - 2.0 * FIT_MARGIN) / span_y;
		let scale = match (span_x > 0.0, span_y > 0.0) {
			(true, true) => scale_x.min(scale_y),
			(true, false) => scale_x,
			(false, true) => scale_y,
			(false, false) => 1.0,
		};
		let (data_cx, data_cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		(scale, data_cx, data_cy)
	});

	let radius = width.min(height) * 0.35;
	let n = data.nodes.len().max(1);

	supplied
		.iter()
		.enumerate()
		.map(|(i, pos)| match (pos, fit) {
			(Some((x, y)), Some((scale, data_cx, data_cy))) => {
				(cx + (x - data_cx) * scale, cy + (y - data_cy) * scale)
			}
			_ => {
				let angle = (i as f64) * 2.0 * PI / n as f64;
				(cx + radius * angle.cos(), cy + radius * angle.sin())
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn minimal_dataset() -> GraphDataset {
		serde_json::from_str(r#"{"nodes":[{"id":"a"},{"id":"b"}],"edges":[{"from":"a","to":"b"}]}"#)
			.unwrap()
	}

	fn node_positions(chart: &Chart) -> Vec<(f32, f32)> {
		let mut positions = Vec::new();
		chart.graph.visit_nodes(|node| positions.push((node.x(), node.y())));
		positions
	}

	#[test]
	fn builds_one_chart_from_minimal_dataset() {
		let mut chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		chart.configure(&ChartOptions::default());

		assert_eq!(chart.node_count(), 2);
		assert_eq!(chart.edge_count(), 1);
		assert_eq!(chart.settings().container, "container");
		assert!(!chart.is_drawn());
	}

	#[test]
	fn draw_applies_centered_default_zoom() {
		let mut chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		chart.configure(&ChartOptions::default());
		chart.draw();

		assert!(chart.is_drawn());
		assert_eq!(chart.zoom_level(), 0.95);
		assert_eq!(chart.zoom_focus(), Some((400.0, 300.0)));
	}

	#[test]
	fn draw_reports_configuration_state() {
		let mut chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		chart.configure(&ChartOptions::default());
		chart.draw();

		let settings = chart.settings();
		assert_eq!(settings.layout.iteration_count, 0);
		assert!(!settings.tooltip);
		assert!(!settings.interactive);
		assert!(!settings.wheel_zoom);
	}

	#[test]
	fn zero_iterations_keep_positions() {
		let mut chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		let before = node_positions(&chart);
		chart.configure(&ChartOptions::default());
		chart.draw();
		assert_eq!(node_positions(&chart), before);
	}

	#[test]
	fn layout_iterations_move_nodes() {
		let mut chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		let before = node_positions(&chart);

		let mut options = ChartOptions::default();
		options.layout.iteration_count = 50;
		chart.configure(&options);
		chart.draw();

		assert_ne!(node_positions(&chart), before);
	}

	#[test]
	fn zoom_keeps_anchor_point_fixed() {
		let mut chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		// The anchor maps to the same world point before and after zooming.
		let before = chart.screen_to_graph(400.0, 300.0);
		chart.zoom(0.95, 400.0, 300.0);
		let after = chart.screen_to_graph(400.0, 300.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn supplied_coordinates_are_fitted_into_bounds() {
		let data: GraphDataset = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "a", "x": -10.0, "y": 0.0},
					{"id": "b", "x": 10.0, "y": 0.0}
				],
				"edges": []
			}"#,
		)
		.unwrap();
		let chart = Chart::new(&data, 800.0, 600.0);
		let positions = node_positions(&chart);

		// Width 800 minus a 60px margin per side leaves 680 for a span of 20.
		assert!((positions[0].0 - 60.0).abs() < 0.5);
		assert!((positions[1].0 - 740.0).abs() < 0.5);
		assert!((positions[0].1 - 300.0).abs() < 0.5);
	}

	#[test]
	fn nodes_without_coordinates_fall_back_to_circle() {
		let chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		let positions = node_positions(&chart);
		let radius = 600.0_f32 * 0.35;

		assert!((positions[0].0 - (400.0 + radius)).abs() < 0.5);
		assert!((positions[1].0 - (400.0 - radius)).abs() < 0.5);
	}

	#[test]
	fn edges_with_unknown_endpoints_are_skipped() {
		let data: GraphDataset = serde_json::from_str(
			r#"{"nodes":[{"id":"a"}],"edges":[{"from":"a","to":"missing"}]}"#,
		)
		.unwrap();
		let chart = Chart::new(&data, 800.0, 600.0);
		assert_eq!(chart.node_count(), 1);
		assert_eq!(chart.edge_count(), 0);
	}

	#[test]
	fn hit_test_finds_node_under_cursor() {
		let chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		let config = ScaleConfig::default();
		let positions = node_positions(&chart);

		// Initial transform is identity, so screen == world.
		let hit = chart.node_at_position(positions[0].0 as f64, positions[0].1 as f64, &config);
		assert!(hit.is_some());
		assert!(chart.node_at_position(5.0, 5.0, &config).is_none());
	}

	#[test]
	fn explicit_fill_wins_over_palette() {
		let data: GraphDataset = serde_json::from_str(
			r##"{"nodes":[{"id":"a","fill":"#ff0000"},{"id":"b","group":"g"}],"edges":[]}"##,
		)
		.unwrap();
		let chart = Chart::new(&data, 800.0, 600.0);
		let mut colors = Vec::new();
		chart
			.graph
			.visit_nodes(|node| colors.push(node.data.user_data.color.clone()));
		assert_eq!(colors[0], "#ff0000");
		assert_ne!(colors[1], "#ff0000");
	}

	#[test]
	fn tooltip_fades_in_and_respects_hold_time() {
		let chart = Chart::new(&minimal_dataset(), 800.0, 600.0);
		let mut idx = None;
		chart.graph.visit_nodes(|node| idx = Some(node.index()));

		let mut tooltip = TooltipState::default();
		tooltip.set_hover(idx, (10.0, 10.0));
		tooltip.tick(0.1);
		assert!(tooltip.intensity() > 0.3);

		// Clearing the hover within the hold window keeps the node hovered.
		tooltip.set_hover(None, (12.0, 12.0));
		assert!(tooltip.hovered.is_some());

		// After the hold expires the hover clears and the fade-out begins.
		tooltip.tick(0.2);
		tooltip.set_hover(None, (12.0, 12.0));
		assert!(tooltip.hovered.is_none());
		let peak = tooltip.intensity();
		tooltip.tick(0.5);
		assert!(tooltip.intensity() < peak);
	}
}
