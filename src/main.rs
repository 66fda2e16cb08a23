//! Client entrypoint for the CSR build.
//!
//! Mounts the app into the pre-existing container element named by the
//! configuration; the chart lives there for the remainder of the process.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::mount::mount_to;
use leptos::prelude::*;
use network_chart::{App, ChartOptions, init_logging};
use wasm_bindgen::JsCast;

fn main() {
	init_logging();

	let container_id = ChartOptions::default().container;
	let Some(container) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(&container_id))
	else {
		log::error!("network-chart: no element with id {container_id:?} to render into");
		return;
	};

	mount_to(container.unchecked_into(), || {
		view! { <App /> }
	})
	.forget();
}
