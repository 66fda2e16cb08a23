//! Canvas rendering for the network chart.
//!
//! Drawing happens in passes: background in screen space, then edges and
//! nodes under the pan/zoom transform, then the tooltip overlay back in
//! screen space.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::chart::{Chart, NodeMeta};
use super::options::LabelAnchor;
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Theme, parse_color};

/// Gap between a node's rim and its label, in world units.
const LABEL_GAP: f64 = 4.0;

/// Renders the complete chart to the canvas.
pub fn render(chart: &Chart, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, chart.settings().labels.font_size, chart.transform.k);

	draw_background(chart, ctx, theme);

	ctx.save();
	let _ = ctx.translate(chart.transform.x, chart.transform.y);
	let _ = ctx.scale(chart.transform.k, chart.transform.k);

	let neighbors = neighbor_centroids(chart);
	draw_edges(chart, ctx, &scale, theme);
	draw_nodes(chart, ctx, &scale, theme, &neighbors);

	ctx.restore();

	if chart.settings().tooltip {
		draw_tooltip(chart, ctx, theme);
	}
}

/// Mean position of each node's neighbors, used for label anchoring and
/// rotation.
fn neighbor_centroids(chart: &Chart) -> HashMap<DefaultNodeIdx, (f64, f64)> {
	let mut positions = HashMap::new();
	chart.graph.visit_nodes(|node| {
		positions.insert(node.index(), (node.x() as f64, node.y() as f64));
	});

	let mut sums: HashMap<DefaultNodeIdx, (f64, f64, usize)> = HashMap::new();
	for &(from, to) in chart.edges() {
		if let Some(&(x, y)) = positions.get(&to) {
			let entry = sums.entry(from).or_insert((0.0, 0.0, 0));
			entry.0 += x;
			entry.1 += y;
			entry.2 += 1;
		}
		if let Some(&(x, y)) = positions.get(&from) {
			let entry = sums.entry(to).or_insert((0.0, 0.0, 0));
			entry.0 += x;
			entry.1 += y;
			entry.2 += 1;
		}
	}

	sums.into_iter()
		.map(|(idx, (sx, sy, n))| (idx, (sx / n as f64, sy / n as f64)))
		.collect()
}

fn draw_background(chart: &Chart, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bounds = chart.pixel_bounds();

	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				bounds.width / 2.0,
				bounds.height / 2.0,
				0.0,
				bounds.width / 2.0,
				bounds.height / 2.0,
				bounds.width.max(bounds.height) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);
}

fn draw_edges(chart: &Chart, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let edge_color = &theme.edge.color;
	ctx.set_stroke_style_str(&edge_color.to_css());
	ctx.set_fill_style_str(&edge_color.to_css());
	ctx.set_line_width(scale.edge_line_width);

	chart.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		// Line stops short of the target node to leave room for the arrowhead.
		ctx.begin_path();
		ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
		ctx.line_to(
			x2 - ux * (scale.node_radius + scale.arrow_size),
			y2 - uy * (scale.node_radius + scale.arrow_size),
		);
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
}

fn draw_nodes(
	chart: &Chart,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	neighbors: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let labels = &chart.settings().labels;

	chart.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let color = &node.data.user_data.color;

		if theme.node.use_gradient {
			let gradient = ctx
				.create_radial_gradient(
					x - scale.node_radius * 0.3,
					y - scale.node_radius * 0.3,
					0.0,
					x,
					y,
					scale.node_radius,
				)
				.unwrap();

			let base_color = parse_color(color);
			let highlight = base_color.lighten(0.4);
			let shadow = base_color.darken(0.2);

			gradient.add_color_stop(0.0, &highlight.to_css()).unwrap();
			gradient.add_color_stop(0.7, &base_color.to_css()).unwrap();
			gradient.add_color_stop(1.0, &shadow.to_css()).unwrap();

			ctx.begin_path();
			let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		} else {
			ctx.begin_path();
			let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(color);
			ctx.fill();
		}

		if theme.node.border_width > 0.0 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.node.border_color.to_css());
			ctx.set_line_width(theme.node.border_width / scale.k);
			ctx.stroke();
		}

		if labels.enabled {
			draw_label(
				ctx,
				&node.data.user_data,
				x,
				y,
				scale,
				theme,
				labels.anchor,
				labels.auto_rotate,
				neighbors.get(&node.index()).copied(),
			);
		}
	});
}

/// Draw one node label with anchor-side selection and optional rotation along
/// the mean incident edge direction.
#[allow(clippy::too_many_arguments)]
fn draw_label(
	ctx: &CanvasRenderingContext2d,
	meta: &NodeMeta,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	theme: &Theme,
	anchor: LabelAnchor,
	auto_rotate: bool,
	neighbor_centroid: Option<(f64, f64)>,
) {
	// Auto anchoring places the label on the side facing away from the
	// node's neighbors so it does not sit on top of the edges.
	let left = match anchor {
		LabelAnchor::LeftCenter => true,
		LabelAnchor::RightCenter => false,
		LabelAnchor::Auto => neighbor_centroid.is_some_and(|(cx, _)| cx > x),
	};

	let angle = if auto_rotate {
		match neighbor_centroid {
			Some((cx, cy)) => {
				let mut a = (cy - y).atan2(cx - x);
				// Keep text upright.
				if a > PI / 2.0 {
					a -= PI;
				} else if a < -PI / 2.0 {
					a += PI;
				}
				a
			}
			None => 0.0,
		}
	} else {
		0.0
	};

	let offset = scale.node_radius + LABEL_GAP;

	ctx.save();
	let _ = ctx.translate(x, y);
	let _ = ctx.rotate(angle);
	ctx.set_fill_style_str(&theme.label.to_css());
	ctx.set_font(&scale.label_font);
	if left {
		ctx.set_text_align("right");
		let _ = ctx.fill_text(&meta.label, -offset, 3.0);
	} else {
		ctx.set_text_align("left");
		let _ = ctx.fill_text(&meta.label, offset, 3.0);
	}
	ctx.restore();
}

/// Tooltip overlay in screen space: a small box with the hovered node's label
/// next to the cursor, faded by the tooltip intensity.
fn draw_tooltip(chart: &Chart, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let intensity = chart.tooltip.intensity();
	let Some(hovered) = chart.tooltip.hovered else {
		return;
	};
	if intensity < 0.01 {
		return;
	}

	let mut label = None;
	chart.graph.visit_nodes(|node| {
		if node.index() == hovered {
			label = Some(node.data.user_data.label.clone());
		}
	});
	let Some(label) = label else {
		return;
	};

	let (sx, sy) = chart.tooltip.screen;
	let style = &theme.tooltip;
	let font_size = chart.settings().labels.font_size;

	ctx.set_font(&format!("{font_size}px sans-serif"));
	ctx.set_text_align("left");
	let text_width = ctx
		.measure_text(&label)
		.map(|m| m.width())
		.unwrap_or(label.len() as f64 * font_size * 0.6);

	let (box_w, box_h) = (
		text_width + 2.0 * style.padding,
		font_size + 2.0 * style.padding,
	);
	let (box_x, box_y) = (sx + 12.0, sy - box_h - 8.0);

	// Fade by scaling each fill's alpha; leaves the context's global alpha
	// untouched for the following frame.
	let background = style.background.with_alpha(style.background.a * intensity);
	let text_color = style.text.with_alpha(style.text.a * intensity);

	ctx.set_fill_style_str(&background.to_css());
	ctx.fill_rect(box_x, box_y, box_w, box_h);
	ctx.set_fill_style_str(&text_color.to_css());
	let _ = ctx.fill_text(&label, box_x + style.padding, box_y + style.padding + font_size * 0.8);
}
