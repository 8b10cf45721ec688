//! Filter state and the visibility reducer.
//!
//! An edge is visible when its year lies in the selected window, its label is
//! enabled and both endpoint roles are enabled. A node is visible when its role
//! is enabled and at least one incident edge is visible.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::model::{EdgeLabel, Role, SocialGraph};
use crate::config::{EDGE_LABELS, NODE_ROLES, YearBounds};

/// User-selected filters, owned by the top-level view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
	pub min_year: i32,
	pub max_year: i32,
	pub edge_labels: BTreeSet<EdgeLabel>,
	pub node_roles: BTreeSet<Role>,
	bounds: YearBounds,
}

impl FilterState {
	/// Full year window, every known label and role enabled.
	pub fn new(bounds: YearBounds) -> Self {
		Self {
			min_year: bounds.lower,
			max_year: bounds.upper,
			edge_labels: EDGE_LABELS.iter().map(|meta| meta.label).collect(),
			node_roles: NODE_ROLES.iter().map(|meta| meta.role).collect(),
			bounds,
		}
	}

	pub fn bounds(&self) -> YearBounds {
		self.bounds
	}

	/// Sets the year window, clamped to the bounds and ordered so that
	/// `min_year <= max_year`.
	pub fn set_year_range(&mut self, min_year: i32, max_year: i32) {
		let (lo, hi) = if min_year <= max_year {
			(min_year, max_year)
		} else {
			(max_year, min_year)
		};
		self.min_year = lo.clamp(self.bounds.lower, self.bounds.upper);
		self.max_year = hi.clamp(self.bounds.lower, self.bounds.upper);
	}

	pub fn reset_years(&mut self) {
		self.min_year = self.bounds.lower;
		self.max_year = self.bounds.upper;
	}

	pub fn toggle_label(&mut self, label: EdgeLabel) {
		if !self.edge_labels.remove(&label) {
			self.edge_labels.insert(label);
		}
	}

	/// Check-all (`true`) or uncheck-all (`false`) for link categories.
	pub fn set_all_labels(&mut self, enabled: bool) {
		self.edge_labels = if enabled {
			EDGE_LABELS.iter().map(|meta| meta.label).collect()
		} else {
			BTreeSet::new()
		};
	}

	pub fn toggle_role(&mut self, role: Role) {
		if !self.node_roles.remove(&role) {
			self.node_roles.insert(role);
		}
	}

	/// Check-all (`true`) or uncheck-all (`false`) for roles.
	pub fn set_all_roles(&mut self, enabled: bool) {
		self.node_roles = if enabled {
			NODE_ROLES.iter().map(|meta| meta.role).collect()
		} else {
			BTreeSet::new()
		};
	}

	pub fn label_enabled(&self, label: EdgeLabel) -> bool {
		self.edge_labels.contains(&label)
	}

	pub fn role_enabled(&self, role: Role) -> bool {
		self.node_roles.contains(&role)
	}

	pub fn year_in_range(&self, year: i32) -> bool {
		(self.min_year..=self.max_year).contains(&year)
	}
}

/// Total and visible counts for one role or label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
	pub total: usize,
	pub visible: usize,
}

/// Counts read by the filter panels and the title after a recompute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityStats {
	pub nodes: Tally,
	pub edges: Tally,
	pub by_role: BTreeMap<Role, Tally>,
	pub by_label: BTreeMap<EdgeLabel, Tally>,
}

impl VisibilityStats {
	/// Reads counts from the graph's current `hidden` flags.
	pub fn collect(graph: &SocialGraph) -> Self {
		let mut stats = VisibilityStats::default();
		for node in graph.nodes() {
			let tally = stats.by_role.entry(node.role).or_default();
			tally.total += 1;
			stats.nodes.total += 1;
			if !node.hidden {
				tally.visible += 1;
				stats.nodes.visible += 1;
			}
		}
		for edge in graph.edges() {
			let tally = stats.by_label.entry(edge.label).or_default();
			tally.total += 1;
			stats.edges.total += 1;
			if !edge.hidden {
				tally.visible += 1;
				stats.edges.visible += 1;
			}
		}
		stats
	}

	pub fn role(&self, role: Role) -> Tally {
		self.by_role.get(&role).copied().unwrap_or_default()
	}

	pub fn label(&self, label: EdgeLabel) -> Tally {
		self.by_label.get(&label).copied().unwrap_or_default()
	}
}

/// Recomputes every `hidden` flag from `filters`: edges first, then nodes,
/// since node visibility depends on edge visibility.
pub fn apply_filters(graph: &mut SocialGraph, filters: &FilterState) -> VisibilityStats {
	let roles: Vec<Role> = graph.nodes().iter().map(|n| n.role).collect();

	for edge in graph.edges_mut() {
		edge.hidden = !filters.year_in_range(edge.year)
			|| !filters.label_enabled(edge.label)
			|| !filters.role_enabled(roles[edge.source])
			|| !filters.role_enabled(roles[edge.target]);
	}

	let node_visible: Vec<bool> = graph
		.incidence()
		.iter()
		.zip(&roles)
		.map(|(incident, &role)| {
			filters.role_enabled(role)
				&& incident
					.iter()
					.any(|&e| graph.edge(e).is_some_and(|edge| !edge.hidden))
		})
		.collect();
	for (node, visible) in graph.nodes_mut().iter_mut().zip(node_visible) {
		node.hidden = !visible;
	}

	let stats = VisibilityStats::collect(graph);
	debug!(
		"drm-graph: filters {}-{} -> {}/{} nodes, {}/{} edges visible",
		filters.min_year,
		filters.max_year,
		stats.nodes.visible,
		stats.nodes.total,
		stats.edges.visible,
		stats.edges.total
	);
	stats
}
