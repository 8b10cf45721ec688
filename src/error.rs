//! Error types for dataset loading, graph attribute updates and camera moves.
//!
//! None of these reach the user: the view layer logs them and either renders
//! nothing (load failures) or skips the operation.

use thiserror::Error;

/// Failure to obtain or materialize the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
	/// No browser window/document is available.
	#[error("no browser window available")]
	NoWindow,
	/// The network request failed or returned a non-success status.
	#[error("failed to fetch {url}: {reason}")]
	Fetch { url: String, reason: String },
	/// The payload is not a valid dataset document.
	#[error("invalid dataset JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// Two nodes share the same key.
	#[error("duplicate node key {0:?}")]
	DuplicateNode(String),
	/// An edge references a node key absent from the node list.
	#[error("edge {from:?} -> {to:?} references unknown node {missing:?}")]
	UnknownEndpoint {
		from: String,
		to: String,
		missing: String,
	},
}

/// Failure to read or write a node/edge attribute.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// The node index does not exist in the graph.
	#[error("node #{0} not found")]
	NodeNotFound(usize),
}

/// Failure to move the camera.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraError {
	/// The canvas has no usable size yet.
	#[error("viewport has no area ({width}x{height})")]
	EmptyViewport { width: u32, height: u32 },
	/// The target position is not a finite coordinate.
	#[error("camera target is not finite")]
	NonFiniteTarget,
}
