//! Reactive handle to the graph owned by the top-level view.

use leptos::prelude::*;

use super::model::SocialGraph;

/// Copyable handle to the single in-memory graph.
///
/// Reads through [`GraphHandle::with`] subscribe the caller to changes;
/// every [`GraphHandle::update`] bumps a version so subscribers re-run.
#[derive(Clone, Copy)]
pub struct GraphHandle {
	graph: StoredValue<SocialGraph, LocalStorage>,
	version: RwSignal<u64>,
}

impl GraphHandle {
	pub fn new(graph: SocialGraph) -> Self {
		Self {
			graph: StoredValue::new_local(graph),
			version: RwSignal::new(0),
		}
	}

	/// Reads the graph and tracks it.
	pub fn with<R>(&self, f: impl FnOnce(&SocialGraph) -> R) -> R {
		self.version.track();
		self.graph.with_value(f)
	}

	/// Reads the graph without tracking.
	pub fn with_untracked<R>(&self, f: impl FnOnce(&SocialGraph) -> R) -> R {
		self.graph.with_value(f)
	}

	/// Mutates the graph and notifies readers.
	pub fn update(&self, f: impl FnOnce(&mut SocialGraph)) {
		self.graph.update_value(f);
		self.version.update(|v| *v = v.wrapping_add(1));
	}

	/// Replaces the whole graph, e.g. after loading the dataset.
	pub fn replace(&self, graph: SocialGraph) {
		self.update(move |current| *current = graph);
	}

	/// Subscribes the caller to graph changes without reading it.
	pub fn track(&self) {
		self.version.track();
	}
}
