//! Dataset loading for the chart bootstrapper.
//!
//! One suspension point: the dataset fetch. Everything after it (chart
//! construction, configuration, draw) only runs once the data has arrived
//! and parsed. There is no retry, timeout, or cancellation; on failure the
//! error is surfaced to the caller and the container stays empty.

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::components::network_chart::GraphDataset;

/// The dataset could not be loaded: missing, unreachable, or malformed.
#[derive(Debug, Error)]
pub enum DataLoadError {
	/// The fetch itself failed (network error, no window, bad URL).
	#[error("dataset fetch failed: {0}")]
	Fetch(String),
	/// The server answered with a non-success status.
	#[error("dataset request returned HTTP {0}")]
	Status(u16),
	/// The response body could not be read as text.
	#[error("dataset body is not readable text")]
	Body,
	/// The body is not a valid graph dataset.
	#[error("dataset is malformed: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse a JSON document into a [`GraphDataset`].
pub fn parse_dataset(json: &str) -> Result<GraphDataset, DataLoadError> {
	Ok(serde_json::from_str(json)?)
}

/// Fetch and parse the graph dataset from a URL.
pub async fn fetch_dataset(url: &str) -> Result<GraphDataset, DataLoadError> {
	let window = web_sys::window().ok_or_else(|| DataLoadError::Fetch("no window".into()))?;

	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| DataLoadError::Fetch(format!("{e:?}")))?;
	let response: Response = response
		.dyn_into()
		.map_err(|e| DataLoadError::Fetch(format!("{e:?}")))?;

	if !response.ok() {
		return Err(DataLoadError::Status(response.status()));
	}

	let text = JsFuture::from(response.text().map_err(|_| DataLoadError::Body)?)
		.await
		.map_err(|_| DataLoadError::Body)?;
	let body = text.as_string().ok_or(DataLoadError::Body)?;

	let data = parse_dataset(&body)?;
	log::info!(
		"network-chart: loaded {} nodes, {} edges from {}",
		data.nodes.len(),
		data.edges.len(),
		url
	);
	Ok(data)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_valid_dataset() {
		let data =
			parse_dataset(r#"{"nodes":[{"id":"a"},{"id":"b"}],"edges":[{"from":"a","to":"b"}]}"#)
				.unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.edges.len(), 1);
	}

	#[test]
	fn malformed_json_is_a_load_error() {
		let err = parse_dataset("{not json").unwrap_err();
		assert!(matches!(err, DataLoadError::Parse(_)));
	}

	#[test]
	fn wrong_shape_is_a_load_error() {
		let err = parse_dataset(r#"{"nodes": "not-a-list"}"#).unwrap_err();
		assert!(matches!(err, DataLoadError::Parse(_)));
	}

	#[test]
	fn errors_carry_a_readable_message() {
		assert_eq!(
			DataLoadError::Status(404).to_string(),
			"dataset request returned HTTP 404"
		);
	}
}
