//! Graph dataset structures deserialized from the input JSON document.
//!
//! The schema follows the artist map export: nodes may carry pre-computed
//! coordinates (the exporter lays artists out on a circle), edges reference
//! node ids via `from`/`to`.

use serde::Deserialize;

/// A node in the dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier. Edges reference nodes by this id.
	pub id: String,
	/// Optional display label. Falls back to `id` where a label is needed.
	pub label: Option<String>,
	/// Optional pre-computed x coordinate in dataset units.
	pub x: Option<f64>,
	/// Optional pre-computed y coordinate in dataset units.
	pub y: Option<f64>,
	/// Optional CSS fill color override (e.g., "#ff0000").
	pub fill: Option<String>,
	/// Optional group name for palette-based coloring.
	pub group: Option<String>,
}

impl GraphNode {
	/// Display text for this node: the label if present, otherwise the id.
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}

	/// Supplied coordinates, if the dataset provides both.
	pub fn position(&self) -> Option<(f64, f64)> {
		match (self.x, self.y) {
			(Some(x), Some(y)) => Some((x, y)),
			_ => None,
		}
	}
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphEdge {
	/// Source node id.
	pub from: String,
	/// Target node id.
	pub to: String,
}

/// Complete graph dataset: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphDataset {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_minimal_dataset() {
		let json = r#"{"nodes":[{"id":"a"},{"id":"b"}],"edges":[{"from":"a","to":"b"}]}"#;
		let data: GraphDataset = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.edges.len(), 1);
		assert_eq!(data.edges[0].from, "a");
		assert_eq!(data.edges[0].to, "b");
		assert!(data.nodes[0].position().is_none());
	}

	#[test]
	fn parses_nodes_with_coordinates() {
		let json = r#"{
			"nodes": [
				{"id": "Miles Davis", "x": 10.0, "y": 0.0},
				{"id": "John Coltrane", "x": -10.0, "y": 0.0}
			],
			"edges": [{"from": "Miles Davis", "to": "John Coltrane"}]
		}"#;
		let data: GraphDataset = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes[0].position(), Some((10.0, 0.0)));
		assert_eq!(data.nodes[0].display_label(), "Miles Davis");
	}

	#[test]
	fn label_falls_back_to_id() {
		let json = r#"{"nodes":[{"id":"a","label":"Alpha"},{"id":"b"}],"edges":[]}"#;
		let data: GraphDataset = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes[0].display_label(), "Alpha");
		assert_eq!(data.nodes[1].display_label(), "b");
	}
}
