//! Hover reducers: per-frame display overrides for the hovered node's
//! neighborhood.
//!
//! These functions never mutate the graph. With nothing hovered they return
//! the stored attributes unchanged, so un-hovering restores the prior look.

use super::model::{EdgeIdx, NodeIdx, SocialGraph};
use crate::components::force_graph::theme::Color;
use crate::config::{edge_label_meta, role_meta};

/// Stroke size of an edge touching the hovered node.
pub const HOVERED_EDGE_SIZE: f64 = 4.0;
/// Stroke size edges are stored with.
pub const DEFAULT_EDGE_SIZE: f64 = 1.0;

/// How a node is drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplay<'a> {
	pub color: Color,
	/// `None` suppresses the label.
	pub label: Option<&'a str>,
	pub size: f64,
	/// Nodes with a higher z-index are drawn on top.
	pub z_index: u8,
	pub hidden: bool,
	pub highlighted: bool,
}

/// How an edge is drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDisplay {
	pub color: Color,
	pub size: f64,
	pub hidden: bool,
	pub directed: bool,
}

/// Display attributes for `idx` given the (debounced) hovered node.
///
/// Returns `None` for an unknown index.
pub fn node_display(graph: &SocialGraph, idx: NodeIdx, hovered: Option<NodeIdx>) -> Option<NodeDisplay<'_>> {
	let node = graph.node(idx)?;
	let stored = NodeDisplay {
		color: node.color,
		label: Some(node.label.as_str()).filter(|label| !label.is_empty()),
		size: node.size,
		z_index: 0,
		hidden: node.hidden,
		highlighted: node.highlighted,
	};

	let Some(hovered) = hovered else {
		return Some(stored);
	};

	let meta = role_meta(node.role);
	if idx == hovered || graph.are_adjacent(idx, hovered) {
		Some(NodeDisplay {
			color: meta.color_highlight,
			z_index: 1,
			..stored
		})
	} else {
		Some(NodeDisplay {
			color: meta.color_fade,
			label: None,
			z_index: 0,
			highlighted: false,
			..stored
		})
	}
}

/// Display attributes for edge `idx` given the (debounced) hovered node.
///
/// Returns `None` for an unknown index.
pub fn edge_display(graph: &SocialGraph, idx: EdgeIdx, hovered: Option<NodeIdx>) -> Option<EdgeDisplay> {
	let edge = graph.edge(idx)?;
	let stored = EdgeDisplay {
		color: edge.color,
		size: DEFAULT_EDGE_SIZE,
		hidden: edge.hidden,
		directed: edge.is_directed(),
	};

	let Some(hovered) = hovered else {
		return Some(stored);
	};

	let meta = edge_label_meta(edge.label);
	if edge.touches(hovered) {
		Some(EdgeDisplay {
			color: meta.color_highlight,
			size: HOVERED_EDGE_SIZE,
			..stored
		})
	} else {
		Some(EdgeDisplay {
			color: meta.color_fade,
			hidden: true,
			..stored
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::SizeRange;
	use crate::dataset::{Dataset, EdgeRecord, NodeRecord};
	use crate::graph::{EdgeLabel, Role};

	/// a -> b (supervizes), c -- b (same jury), d isolated.
	fn graph() -> SocialGraph {
		let node = |key: &str, role| NodeRecord {
			key: key.to_string(),
			label: format!("Dr {key}"),
			role,
			weight: 1.0,
			x: 0.0,
			y: 0.0,
		};
		let edge = |source: &str, target: &str, label| EdgeRecord {
			source: source.to_string(),
			target: target.to_string(),
			weight: 1.0,
			year: 2000,
			label,
		};
		SocialGraph::from_dataset(
			&Dataset {
				nodes: vec![
					node("a", Role::Advisor),
					node("b", Role::PhdStudent),
					node("c", Role::JuryMember),
					node("d", Role::JuryMember),
				],
				edges: vec![
					edge("a", "b", EdgeLabel::Supervizes),
					edge("c", "b", EdgeLabel::SameJury),
				],
			},
			SizeRange::default(),
		)
		.unwrap()
	}

	#[test]
	fn no_hover_returns_stored_attributes() {
		let mut graph = graph();
		graph.set_highlighted(3, true).unwrap();
		let display = node_display(&graph, 3, None).unwrap();
		let node = &graph.nodes()[3];
		assert_eq!(display.color, node.color);
		assert_eq!(display.label, Some("Dr d"));
		assert!(display.highlighted);

		let edge = edge_display(&graph, 0, None).unwrap();
		assert_eq!(edge.color, graph.edges()[0].color);
		assert_eq!(edge.size, DEFAULT_EDGE_SIZE);
		assert!(edge.directed);
	}

	#[test]
	fn hovering_highlights_the_neighborhood_in_both_directions() {
		let graph = graph();
		// b is the target of a and the undirected partner of c
		for idx in [0, 1, 2] {
			let display = node_display(&graph, idx, Some(1)).unwrap();
			assert_eq!(display.z_index, 1, "node {idx}");
			assert_eq!(display.color, role_meta(graph.nodes()[idx].role).color_highlight);
			assert!(display.label.is_some());
		}

		let faded = node_display(&graph, 3, Some(1)).unwrap();
		assert_eq!(faded.z_index, 0);
		assert_eq!(faded.label, None);
		assert_eq!(faded.color, role_meta(Role::JuryMember).color_fade);
	}

	#[test]
	fn hovering_a_source_reaches_its_target() {
		let graph = graph();
		assert_eq!(node_display(&graph, 1, Some(0)).unwrap().z_index, 1);
		assert_eq!(node_display(&graph, 2, Some(0)).unwrap().z_index, 0);
	}

	#[test]
	fn edges_away_from_the_hovered_node_are_hidden() {
		let graph = graph();
		let touching = edge_display(&graph, 0, Some(0)).unwrap();
		assert_eq!(touching.size, HOVERED_EDGE_SIZE);
		assert_eq!(touching.color, edge_label_meta(EdgeLabel::Supervizes).color_highlight);
		assert!(!touching.hidden);

		let away = edge_display(&graph, 1, Some(0)).unwrap();
		assert!(away.hidden);
		assert_eq!(away.color, edge_label_meta(EdgeLabel::SameJury).color_fade);
	}

	#[test]
	fn fading_clears_the_selection_ring_but_not_the_stored_flag() {
		let mut graph = graph();
		graph.set_highlighted(3, true).unwrap();
		let before = graph.nodes().to_vec();

		assert!(!node_display(&graph, 3, Some(0)).unwrap().highlighted);
		assert_eq!(graph.nodes(), before.as_slice());
		assert!(node_display(&graph, 3, None).unwrap().highlighted);
	}

	#[test]
	fn filtered_edges_stay_hidden_while_hovered() {
		let mut graph = graph();
		let mut filters = crate::graph::FilterState::new(Default::default());
		filters.set_all_labels(false);
		crate::graph::apply_filters(&mut graph, &filters);
		assert!(edge_display(&graph, 0, Some(0)).unwrap().hidden);
	}

	#[test]
	fn unknown_indices_yield_nothing() {
		let graph = graph();
		assert!(node_display(&graph, 42, None).is_none());
		assert!(edge_display(&graph, 42, Some(0)).is_none());
	}
}
