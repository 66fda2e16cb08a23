//! Leptos component wrapping the network chart canvas.
//!
//! The component creates an HTML canvas sized to its parent container, builds
//! the [`Chart`] from the dataset, applies the configuration record, draws,
//! and runs a `requestAnimationFrame` render loop. Mouse and wheel handlers
//! are wired up but only act when the applied options enable them; with the
//! default options the chart is fully inert.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::chart::Chart;
use super::options::ChartOptions;
use super::render;
use super::scale::ScaleConfig;
use super::theme::Theme;
use super::types::GraphDataset;

/// Bundles the chart handle with visual configuration and frame timing.
struct ChartContext {
	chart: Chart,
	scale: ScaleConfig,
	theme: Theme,
	last_frame_ms: f64,
}

/// Renders a network chart on a canvas element.
///
/// The component sizes itself to its parent container by default; explicit
/// `width`/`height` override that. The chart handle lives inside the
/// component for as long as it stays mounted.
#[component]
pub fn NetworkChartCanvas(
	#[prop(into)] data: Signal<GraphDataset>,
	#[prop(default = ChartOptions::default())] options: ChartOptions,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<ChartContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let mut chart = Chart::new(&data.get(), w, h);
		chart.configure(&options);
		chart.draw();

		*context_init.borrow_mut() = Some(ChartContext {
			chart,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			last_frame_ms: js_sys::Date::now(),
		});

		// Track the parent container size across window resizes.
		if width.is_none() && height.is_none() {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(parent) = canvas_resize.parent_element() else {
					return;
				};
				let (nw, nh) = (parent.client_width() as f64, parent.client_height() as f64);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.chart.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let now = js_sys::Date::now();
				let dt = ((now - c.last_frame_ms) / 1000.0).clamp(0.0, 0.1);
				c.last_frame_ms = now;

				c.chart.tick(dt);
				render::render(&c.chart, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if !c.chart.settings().interactive {
				return;
			}
			if let Some(idx) = c.chart.node_at_position(x, y, &c.scale) {
				c.chart.drag.active = true;
				c.chart.drag.node_idx = Some(idx);
				c.chart.drag.start_x = x;
				c.chart.drag.start_y = y;
				c.chart.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.chart.drag.node_start_x = node.x();
						c.chart.drag.node_start_y = node.y();
					}
				});
			} else {
				c.chart.pan.active = true;
				c.chart.pan.start_x = x;
				c.chart.pan.start_y = y;
				c.chart.pan.transform_start_x = c.chart.transform.x;
				c.chart.pan.transform_start_y = c.chart.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.chart.settings().tooltip && !c.chart.drag.active {
				let hovered = c.chart.node_at_position(x, y, &c.scale);
				c.chart.tooltip.set_hover(hovered, (x, y));
			}

			if !c.chart.settings().interactive {
				return;
			}

			if c.chart.drag.active {
				if let Some(idx) = c.chart.drag.node_idx {
					let (dx, dy) = (
						(x - c.chart.drag.start_x) / c.chart.transform.k,
						(y - c.chart.drag.start_y) / c.chart.transform.k,
					);
					let (nx, ny) = (
						c.chart.drag.node_start_x + dx as f32,
						c.chart.drag.node_start_y + dy as f32,
					);
					c.chart.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if c.chart.pan.active {
				c.chart.transform.x = c.chart.pan.transform_start_x + (x - c.chart.pan.start_x);
				c.chart.transform.y = c.chart.pan.transform_start_y + (y - c.chart.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.chart.drag.active = false;
			c.chart.drag.node_idx = None;
			c.chart.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.chart.drag.active = false;
			c.chart.drag.node_idx = None;
			c.chart.pan.active = false;
			c.chart.tooltip.set_hover(None, c.chart.tooltip.screen);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			if !c.chart.settings().wheel_zoom {
				return;
			}
			ev.prevent_default();
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.chart.transform.k * factor).clamp(0.1, 10.0);
			c.chart.zoom(new_k, x, y);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-chart-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block;"
		/>
	}
}
