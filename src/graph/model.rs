//! The attributed network: researchers, their relationships, and the few
//! attributes the views mutate after load.
//!
//! Topology is fixed once [`SocialGraph::from_dataset`] returns. Only `hidden`,
//! `highlighted` and `color` change afterwards.

use std::collections::{HashMap, HashSet};

use log::info;
use serde::Deserialize;

use crate::components::force_graph::theme::Color;
use crate::config::{SizeRange, edge_label_meta, role_meta};
use crate::dataset::Dataset;
use crate::error::{GraphError, LoadError};

/// Position of a node in [`SocialGraph::nodes`].
pub type NodeIdx = usize;
/// Position of an edge in [`SocialGraph::edges`].
pub type EdgeIdx = usize;

/// Role a researcher plays in the network.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	PhdStudent,
	Advisor,
	JuryMember,
	#[default]
	#[serde(other)]
	Unknown,
}

impl Role {
	pub fn key(self) -> &'static str {
		match self {
			Role::PhdStudent => "phd_student",
			Role::Advisor => "advisor",
			Role::JuryMember => "jury_member",
			Role::Unknown => "unknown",
		}
	}
}

/// Kind of relationship an edge records.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EdgeLabel {
	/// Both researchers sat on the same jury. Undirected.
	SameJury,
	/// Jury member → Ph. D. student.
	Examines,
	/// Advisor → Ph. D. student.
	Supervizes,
	#[default]
	#[serde(other)]
	Unknown,
}

impl EdgeLabel {
	pub fn key(self) -> &'static str {
		match self {
			EdgeLabel::SameJury => "same_jury",
			EdgeLabel::Examines => "examines",
			EdgeLabel::Supervizes => "supervizes",
			EdgeLabel::Unknown => "unknown",
		}
	}

	pub fn is_directed(self) -> bool {
		self != EdgeLabel::SameJury
	}
}

/// A researcher with its derived display attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub key: String,
	pub label: String,
	pub role: Role,
	pub weight: f64,
	/// Layout position from the dataset.
	pub x: f64,
	pub y: f64,
	/// Display size derived from `weight`.
	pub size: f64,
	pub color: Color,
	pub hidden: bool,
	/// Set for the currently selected node.
	pub highlighted: bool,
}

/// A relationship between two researchers, dated to a year.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub label: EdgeLabel,
	pub year: i32,
	pub weight: f64,
	pub color: Color,
	pub hidden: bool,
}

impl Edge {
	pub fn is_directed(&self) -> bool {
		self.label.is_directed()
	}

	pub fn touches(&self, node: NodeIdx) -> bool {
		self.source == node || self.target == node
	}
}

/// Mixed multigraph of researchers.
#[derive(Clone, Debug, Default)]
pub struct SocialGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	by_key: HashMap<String, NodeIdx>,
	/// Incident edge indices per node (self-loops listed once).
	incident: Vec<Vec<EdgeIdx>>,
	/// Nodes joined to each node by at least one edge, in either direction.
	neighbors: Vec<HashSet<NodeIdx>>,
}

impl SocialGraph {
	/// Materializes the dataset and computes derived attributes.
	///
	/// Fails on duplicate node keys and on edges naming an unknown node.
	pub fn from_dataset(dataset: &Dataset, sizes: SizeRange) -> Result<Self, LoadError> {
		let mut graph = SocialGraph::default();

		for record in &dataset.nodes {
			if graph.by_key.contains_key(&record.key) {
				return Err(LoadError::DuplicateNode(record.key.clone()));
			}
			graph.by_key.insert(record.key.clone(), graph.nodes.len());
			graph.nodes.push(Node {
				key: record.key.clone(),
				label: record.label.clone(),
				role: record.role,
				weight: record.weight,
				x: record.x,
				y: record.y,
				size: sizes.min,
				color: role_meta(record.role).color_highlight,
				hidden: false,
				highlighted: false,
			});
		}
		graph.incident = vec![Vec::new(); graph.nodes.len()];
		graph.neighbors = vec![HashSet::new(); graph.nodes.len()];

		for record in &dataset.edges {
			let lookup = |key: &String| {
				graph
					.by_key
					.get(key)
					.copied()
					.ok_or_else(|| LoadError::UnknownEndpoint {
						from: record.source.clone(),
						to: record.target.clone(),
						missing: key.clone(),
					})
			};
			let (source, target) = (lookup(&record.source)?, lookup(&record.target)?);

			let idx = graph.edges.len();
			graph.edges.push(Edge {
				source,
				target,
				label: record.label,
				year: record.year,
				weight: record.weight,
				color: edge_label_meta(record.label).color_fade,
				hidden: false,
			});
			graph.incident[source].push(idx);
			if target != source {
				graph.incident[target].push(idx);
			}
			graph.neighbors[source].insert(target);
			graph.neighbors[target].insert(source);
		}

		graph.assign_sizes(sizes);
		info!(
			"drm-graph: built graph with {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		Ok(graph)
	}

	/// Linearly rescales node weights into `sizes`.
	///
	/// When every weight is equal the range collapses, so all nodes get the
	/// middle of the size range. Non-finite weights count as the minimum.
	fn assign_sizes(&mut self, sizes: SizeRange) {
		let finite = || self.nodes.iter().map(|n| n.weight).filter(|w| w.is_finite());
		let min = finite().fold(f64::INFINITY, f64::min);
		let max = finite().fold(f64::NEG_INFINITY, f64::max);
		let span = max - min;

		for node in &mut self.nodes {
			node.size = if span.is_nan() || span <= 0.0 {
				(sizes.min + sizes.max) / 2.0
			} else if node.weight.is_finite() {
				(node.weight - min) / span * (sizes.max - sizes.min) + sizes.min
			} else {
				sizes.min
			};
		}
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&Node> {
		self.nodes.get(idx)
	}

	pub fn edge(&self, idx: EdgeIdx) -> Option<&Edge> {
		self.edges.get(idx)
	}

	pub fn node_index(&self, key: &str) -> Option<NodeIdx> {
		self.by_key.get(key).copied()
	}

	/// Edges with `node` as source or target.
	pub fn incident_edges(&self, node: NodeIdx) -> impl Iterator<Item = &Edge> + '_ {
		self.incident
			.get(node)
			.into_iter()
			.flatten()
			.filter_map(|&e| self.edges.get(e))
	}

	/// Whether at least one edge joins `a` and `b`, in any direction.
	pub fn are_adjacent(&self, a: NodeIdx, b: NodeIdx) -> bool {
		self.neighbors.get(a).is_some_and(|set| set.contains(&b))
	}

	pub fn set_node_hidden(&mut self, idx: NodeIdx, hidden: bool) -> Result<(), GraphError> {
		let node = self.nodes.get_mut(idx).ok_or(GraphError::NodeNotFound(idx))?;
		node.hidden = hidden;
		Ok(())
	}

	pub fn set_highlighted(&mut self, idx: NodeIdx, highlighted: bool) -> Result<(), GraphError> {
		let node = self.nodes.get_mut(idx).ok_or(GraphError::NodeNotFound(idx))?;
		node.highlighted = highlighted;
		Ok(())
	}

	pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
		&mut self.edges
	}

	pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	/// Incident-edge lists, indexed like [`SocialGraph::nodes`].
	pub(crate) fn incidence(&self) -> &[Vec<EdgeIdx>] {
		&self.incident
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::{EdgeRecord, NodeRecord};

	fn node(key: &str, role: Role, weight: f64) -> NodeRecord {
		NodeRecord {
			key: key.to_string(),
			label: key.to_uppercase(),
			role,
			weight,
			x: 0.0,
			y: 0.0,
		}
	}

	fn edge(source: &str, target: &str, label: EdgeLabel, year: i32) -> EdgeRecord {
		EdgeRecord {
			source: source.to_string(),
			target: target.to_string(),
			weight: 1.0,
			year,
			label,
		}
	}

	#[test]
	fn sizes_are_rescaled_into_range() {
		let dataset = Dataset {
			nodes: vec![
				node("a", Role::Advisor, 0.0),
				node("b", Role::Advisor, 5.0),
				node("c", Role::Advisor, 10.0),
			],
			edges: vec![],
		};
		let graph = SocialGraph::from_dataset(&dataset, SizeRange::default()).unwrap();
		let sizes: Vec<f64> = graph.nodes().iter().map(|n| n.size).collect();
		assert_eq!(sizes, vec![3.0, 9.0, 15.0]);
	}

	#[test]
	fn uniform_weights_get_midpoint_size() {
		let dataset = Dataset {
			nodes: vec![node("a", Role::Advisor, 4.0), node("b", Role::JuryMember, 4.0)],
			edges: vec![],
		};
		let graph = SocialGraph::from_dataset(&dataset, SizeRange::default()).unwrap();
		assert!(graph.nodes().iter().all(|n| n.size == 9.0));

		let single = Dataset {
			nodes: vec![node("solo", Role::PhdStudent, 1.0)],
			edges: vec![],
		};
		let graph = SocialGraph::from_dataset(&single, SizeRange::default()).unwrap();
		assert_eq!(graph.nodes()[0].size, 9.0);
	}

	#[test]
	fn edges_get_fade_color_and_direction_from_label() {
		let dataset = Dataset {
			nodes: vec![node("a", Role::Advisor, 1.0), node("b", Role::PhdStudent, 2.0)],
			edges: vec![
				edge("a", "b", EdgeLabel::Supervizes, 2001),
				edge("a", "b", EdgeLabel::SameJury, 2001),
			],
		};
		let graph = SocialGraph::from_dataset(&dataset, SizeRange::default()).unwrap();

		assert_eq!(graph.edge_count(), 2, "parallel edges are kept");
		assert!(graph.edges()[0].is_directed());
		assert!(!graph.edges()[1].is_directed());
		assert_eq!(graph.edges()[0].color, edge_label_meta(EdgeLabel::Supervizes).color_fade);
		assert_eq!(graph.nodes()[0].color, role_meta(Role::Advisor).color_highlight);
		assert!(graph.are_adjacent(1, 0));
		assert_eq!(graph.incident_edges(0).count(), 2);
	}

	#[test]
	fn rejects_duplicate_keys_and_dangling_edges() {
		let duplicate = Dataset {
			nodes: vec![node("a", Role::Advisor, 1.0), node("a", Role::Advisor, 1.0)],
			edges: vec![],
		};
		assert!(matches!(
			SocialGraph::from_dataset(&duplicate, SizeRange::default()),
			Err(LoadError::DuplicateNode(key)) if key == "a"
		));

		let dangling = Dataset {
			nodes: vec![node("a", Role::Advisor, 1.0)],
			edges: vec![edge("a", "ghost", EdgeLabel::Examines, 2010)],
		};
		assert!(matches!(
			SocialGraph::from_dataset(&dangling, SizeRange::default()),
			Err(LoadError::UnknownEndpoint { missing, .. }) if missing == "ghost"
		));
	}

	#[test]
	fn self_loops_are_listed_once() {
		let dataset = Dataset {
			nodes: vec![node("a", Role::JuryMember, 1.0)],
			edges: vec![edge("a", "a", EdgeLabel::SameJury, 2000)],
		};
		let graph = SocialGraph::from_dataset(&dataset, SizeRange::default()).unwrap();
		assert_eq!(graph.incident_edges(0).count(), 1);
	}

	#[test]
	fn attribute_updates_on_missing_nodes_fail() {
		let mut graph = SocialGraph::default();
		assert_eq!(graph.set_highlighted(3, true), Err(GraphError::NodeNotFound(3)));
		assert_eq!(graph.set_node_hidden(0, true), Err(GraphError::NodeNotFound(0)));
	}
}
