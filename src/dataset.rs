//! Dataset document and the ways the page obtains it.
//!
//! The document is produced offline and has the shape
//! `{ nodes: [{key, label, role, weight, x, y}], edges: [{source, target, weight, year, label}] }`.

use log::{debug, info};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Response, Window};

use crate::error::LoadError;
use crate::graph::{EdgeLabel, Role};

/// A researcher, as stored in the dataset file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeRecord {
	/// Unique identifier, referenced by edges.
	pub key: String,
	/// Display name.
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub role: Role,
	/// Centrality score the node size is derived from.
	#[serde(default)]
	pub weight: f64,
	#[serde(default)]
	pub x: f64,
	#[serde(default)]
	pub y: f64,
}

/// A relationship between two researchers for a given year.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EdgeRecord {
	pub source: String,
	pub target: String,
	/// Number of occurrences aggregated into this edge.
	#[serde(default)]
	pub weight: f64,
	pub year: i32,
	#[serde(default)]
	pub label: EdgeLabel,
}

/// Complete dataset: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Dataset {
	pub nodes: Vec<NodeRecord>,
	pub edges: Vec<EdgeRecord>,
}

impl Dataset {
	pub fn from_json(json: &str) -> Result<Self, LoadError> {
		let dataset: Dataset = serde_json::from_str(json)?;
		info!(
			"drm-graph: parsed {} nodes, {} edges",
			dataset.nodes.len(),
			dataset.edges.len()
		);
		Ok(dataset)
	}
}

/// Reads the dataset from a `<script id="graph-data">` element, if the page
/// inlines one.
pub fn load_inline() -> Option<Result<Dataset, LoadError>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	debug!("drm-graph: using inline dataset");
	Some(Dataset::from_json(&json_text))
}

/// Fetches and parses the dataset at `url`.
pub async fn fetch(url: &str) -> Result<Dataset, LoadError> {
	let fetch_error = |reason: String| LoadError::Fetch {
		url: url.to_string(),
		reason,
	};

	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| fetch_error(format!("{e:?}")))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| fetch_error("not a Response".to_string()))?;
	if !response.ok() {
		return Err(fetch_error(format!("HTTP {}", response.status())));
	}

	let text = response.text().map_err(|e| fetch_error(format!("{e:?}")))?;
	let text = JsFuture::from(text)
		.await
		.map_err(|e| fetch_error(format!("{e:?}")))?;
	let text = text
		.as_string()
		.ok_or_else(|| fetch_error("response body is not text".to_string()))?;

	Dataset::from_json(&text)
}

/// Loads the dataset: inline document first, network otherwise.
pub async fn load(url: &str) -> Result<Dataset, LoadError> {
	match load_inline() {
		Some(result) => result,
		None => fetch(url).await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_generator_output() {
		let dataset = Dataset::from_json(
			r#"{
				"nodes": [
					{ "key": "026", "label": "Marie Curie", "role": "advisor", "weight": 12.5, "x": 0.1, "y": -0.3 },
					{ "key": "027", "label": "Pierre Dupont", "role": "phd_student", "weight": 0, "x": 0.2, "y": 0.4 }
				],
				"edges": [
					{ "source": "026", "target": "027", "weight": 1, "year": 2004, "label": "supervizes" }
				]
			}"#,
		)
		.unwrap();

		assert_eq!(dataset.nodes.len(), 2);
		assert_eq!(dataset.nodes[0].role, Role::Advisor);
		assert_eq!(dataset.edges[0].label, EdgeLabel::Supervizes);
		assert_eq!(dataset.edges[0].year, 2004);
	}

	#[test]
	fn missing_and_unexpected_fields_use_defaults() {
		let dataset = Dataset::from_json(
			r#"{
				"nodes": [{ "key": "a", "gender": "F" }, { "key": "b", "role": "rapporteur" }],
				"edges": [{ "source": "a", "target": "b", "year": 1999 }]
			}"#,
		)
		.unwrap();

		assert_eq!(dataset.nodes[0].role, Role::Unknown);
		assert_eq!(dataset.nodes[1].role, Role::Unknown);
		assert_eq!(dataset.nodes[0].weight, 0.0);
		assert_eq!(dataset.edges[0].label, EdgeLabel::Unknown);
	}

	#[test]
	fn malformed_document_is_an_error() {
		assert!(matches!(
			Dataset::from_json(r#"{ "nodes": "nope" }"#),
			Err(LoadError::Json(_))
		));
		assert!(matches!(Dataset::from_json("<html>"), Err(LoadError::Json(_))));
	}
}
