//! Selection: at most one node carries `highlighted`, and the camera is
//! moved to it.

use std::time::Duration;

use log::{debug, warn};

use super::model::{NodeIdx, SocialGraph};
use crate::error::CameraError;

/// Where the camera should end up, in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
	pub x: f64,
	pub y: f64,
	/// Inverse zoom: 1.0 is the initial view, smaller values zoom in.
	pub ratio: f64,
}

/// Something that can locate rendered nodes and move a camera to them.
pub trait Camera {
	/// Current rendered position of `node`, if it is on the canvas.
	fn node_position(&self, node: NodeIdx) -> Option<(f64, f64)>;

	/// Starts an animated move. Does not wait for it to finish.
	fn animate_to(&mut self, target: CameraTarget, duration: Duration) -> Result<(), CameraError>;
}

/// Tracks the selected node and keeps the `highlighted` attribute in sync.
#[derive(Clone, Debug)]
pub struct SelectionController {
	current: Option<NodeIdx>,
	zoom_ratio: f64,
	duration: Duration,
}

impl SelectionController {
	pub fn new(zoom_ratio: f64, duration: Duration) -> Self {
		Self {
			current: None,
			zoom_ratio,
			duration,
		}
	}

	pub fn current(&self) -> Option<NodeIdx> {
		self.current
	}

	/// Applies a new selection by node key; `None` clears it.
	///
	/// The previous node is un-highlighted first. Unknown or hidden nodes
	/// leave nothing selected. Failures are logged, never returned.
	pub fn select(&mut self, graph: &mut SocialGraph, key: Option<&str>, camera: &mut impl Camera) -> Option<NodeIdx> {
		self.clear(graph);

		let key = key?;
		let Some(idx) = graph.node_index(key) else {
			debug!("drm-graph: selection of unknown node {:?} ignored", key);
			return None;
		};
		if graph.node(idx).is_none_or(|node| node.hidden) {
			debug!("drm-graph: selection of hidden node {:?} ignored", key);
			return None;
		}

		if let Err(e) = graph.set_highlighted(idx, true) {
			warn!("drm-graph: failed to highlight node {:?}: {}", key, e);
			return None;
		}
		self.current = Some(idx);

		if let Some((x, y)) = camera.node_position(idx) {
			let target = CameraTarget {
				x,
				y,
				ratio: self.zoom_ratio,
			};
			if let Err(e) = camera.animate_to(target, self.duration) {
				warn!("drm-graph: camera animation to {:?} failed: {}", key, e);
			}
		}
		self.current
	}

	/// Removes the highlight from the current selection, if any.
	pub fn clear(&mut self, graph: &mut SocialGraph) {
		if let Some(previous) = self.current.take() {
			if let Err(e) = graph.set_highlighted(previous, false) {
				warn!("drm-graph: failed to clear highlight: {}", e);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{SizeRange, YearBounds};
	use crate::dataset::{Dataset, EdgeRecord, NodeRecord};
	use crate::graph::{EdgeLabel, FilterState, Role, apply_filters};

	#[derive(Default)]
	struct RecordingCamera {
		moves: Vec<CameraTarget>,
		fail: bool,
	}

	impl Camera for RecordingCamera {
		fn node_position(&self, node: NodeIdx) -> Option<(f64, f64)> {
			Some((node as f64 * 10.0, -(node as f64)))
		}

		fn animate_to(&mut self, target: CameraTarget, _duration: Duration) -> Result<(), CameraError> {
			if self.fail {
				return Err(CameraError::EmptyViewport { width: 0, height: 0 });
			}
			self.moves.push(target);
			Ok(())
		}
	}

	fn graph() -> SocialGraph {
		let node = |key: &str, role| NodeRecord {
			key: key.to_string(),
			label: key.to_string(),
			role,
			weight: 1.0,
			x: 0.0,
			y: 0.0,
		};
		SocialGraph::from_dataset(
			&Dataset {
				nodes: vec![
					node("s", Role::PhdStudent),
					node("t", Role::Advisor),
					node("u", Role::JuryMember),
				],
				edges: vec![
					EdgeRecord {
						source: "t".into(),
						target: "s".into(),
						weight: 1.0,
						year: 2000,
						label: EdgeLabel::Supervizes,
					},
					EdgeRecord {
						source: "u".into(),
						target: "s".into(),
						weight: 1.0,
						year: 2015,
						label: EdgeLabel::Examines,
					},
				],
			},
			SizeRange::default(),
		)
		.unwrap()
	}

	fn highlighted(graph: &SocialGraph) -> Vec<&str> {
		graph
			.nodes()
			.iter()
			.filter(|n| n.highlighted)
			.map(|n| n.key.as_str())
			.collect()
	}

	fn controller() -> SelectionController {
		SelectionController::new(0.25, Duration::from_millis(600))
	}

	#[test]
	fn selecting_highlights_and_moves_the_camera() {
		let mut graph = graph();
		let mut camera = RecordingCamera::default();
		let mut selection = controller();

		assert_eq!(selection.select(&mut graph, Some("t"), &mut camera), Some(1));
		assert_eq!(highlighted(&graph), vec!["t"]);
		assert_eq!(
			camera.moves,
			vec![CameraTarget {
				x: 10.0,
				y: -1.0,
				ratio: 0.25
			}]
		);
	}

	#[test]
	fn switching_selection_keeps_a_single_highlight() {
		let mut graph = graph();
		let mut camera = RecordingCamera::default();
		let mut selection = controller();

		selection.select(&mut graph, Some("s"), &mut camera);
		selection.select(&mut graph, Some("t"), &mut camera);
		assert_eq!(highlighted(&graph), vec!["t"]);

		selection.select(&mut graph, Some("nobody"), &mut camera);
		assert!(highlighted(&graph).is_empty());
		assert_eq!(selection.current(), None);

		selection.select(&mut graph, Some("u"), &mut camera);
		selection.select(&mut graph, None, &mut camera);
		assert!(highlighted(&graph).is_empty());
	}

	#[test]
	fn hidden_nodes_cannot_be_selected() {
		let mut graph = graph();
		let mut filters = FilterState::new(YearBounds::default());
		filters.set_year_range(1985, 2010);
		apply_filters(&mut graph, &filters);

		let mut camera = RecordingCamera::default();
		let mut selection = controller();
		assert_eq!(selection.select(&mut graph, Some("u"), &mut camera), None);
		assert!(highlighted(&graph).is_empty());
		assert!(camera.moves.is_empty());
	}

	#[test]
	fn camera_failures_do_not_undo_the_selection() {
		let mut graph = graph();
		let mut camera = RecordingCamera {
			fail: true,
			..Default::default()
		};
		let mut selection = controller();
		assert_eq!(selection.select(&mut graph, Some("s"), &mut camera), Some(0));
		assert_eq!(highlighted(&graph), vec!["s"]);
	}

	#[test]
	fn stale_selection_after_reload_is_harmless() {
		let mut graph = graph();
		let mut camera = RecordingCamera::default();
		let mut selection = controller();
		selection.select(&mut graph, Some("u"), &mut camera);

		let mut reloaded = SocialGraph::default();
		selection.select(&mut reloaded, Some("s"), &mut camera);
		assert_eq!(selection.current(), None);
	}
}
