//! network-chart: network chart visualization for the artist collaboration map.
//!
//! This crate is a WASM application that fetches a JSON graph dataset,
//! constructs a chart from it, applies one configuration record, and renders
//! the result into a pre-existing container element. Layout refinement is
//! switched off by default because the dataset ships with pre-computed node
//! positions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info};

pub mod bootstrap;
pub mod components;

pub use bootstrap::{DataLoadError, fetch_dataset, parse_dataset};
pub use components::network_chart::{
	Chart, ChartOptions, GraphDataset, GraphEdge, GraphNode, NetworkChartCanvas,
};

/// Default dataset location, relative to the page.
pub const DATASET_URL: &str = "artist_map.json";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("network-chart: logging initialized");
}

/// Application shell: the chart bootstrapper.
///
/// Fetches the dataset from `dataset_url`, then mounts the chart canvas with
/// the given options. On a load failure the error is logged and the
/// container stays empty; no chart is drawn.
#[component]
pub fn App(
	#[prop(default = DATASET_URL.to_string(), into)] dataset_url: String,
	#[prop(default = ChartOptions::default())] options: ChartOptions,
) -> impl IntoView {
	provide_meta_context();

	let (dataset, set_dataset) = signal(Option::<GraphDataset>::None);

	spawn_local(async move {
		match fetch_dataset(&dataset_url).await {
			Ok(data) => set_dataset.set(Some(data)),
			Err(e) => error!("network-chart: {e}"),
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Artist Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{move || {
			let options = options.clone();
			dataset.get().map(|data| {
				let data_signal = Signal::derive(move || data.clone());
				view! { <NetworkChartCanvas data=data_signal options=options /> }
			})
		}}
	}
}
