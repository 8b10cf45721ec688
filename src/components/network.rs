//! The loaded view: canvas, camera controls and the contents sidebar.

use leptos::prelude::*;
use log::debug;

use super::force_graph::ForceGraphCanvas;
use super::panels::{
	DescriptionPanel, EdgeFilterPanel, GraphTitle, NodeFilterPanel, SearchField, YearRangePanel,
};
use crate::config::AppConfig;
use crate::graph::{FilterState, GraphHandle, VisibilityStats, apply_filters};

/// Owns the filter and selection state and wires them to the graph.
///
/// Filters are applied synchronously; panel counts are read one animation
/// frame later.
#[component]
pub fn Network(graph: GraphHandle, config: AppConfig) -> impl IntoView {
	let filters = RwSignal::new(FilterState::new(config.years));
	let selected = RwSignal::new(None::<String>);
	let totals = graph.with_untracked(VisibilityStats::collect);
	let stats = RwSignal::new(totals.clone());
	let data_ready = RwSignal::new(false);
	let show_contents = RwSignal::new(false);

	Effect::new(move |_| {
		let current = filters.get();
		graph.update(|g| {
			apply_filters(g, &current);
		});
		request_animation_frame(move || {
			stats.set(graph.with_untracked(VisibilityStats::collect));
		});
	});

	request_animation_frame(move || {
		debug!("drm-graph: data ready");
		data_ready.set(true);
	});

	let search_config = config.search.clone();
	let contents = move || {
		data_ready.get().then(|| {
			view! {
				<div class="contents">
					<div class="ico">
						<button
							type="button"
							class="ico hide-contents"
							title="Hide caption and description"
							on:click=move |_| show_contents.set(false)
						>
							"✕"
						</button>
					</div>
					<GraphTitle stats=stats />
					<div class="panels">
						<SearchField graph=graph selected=selected config=search_config.clone() />
						<DescriptionPanel />
						<YearRangePanel filters=filters />
						<EdgeFilterPanel filters=filters stats=stats totals=totals.clone() />
						<NodeFilterPanel filters=filters stats=stats totals=totals.clone() />
					</div>
				</div>
			}
		})
	};

	view! {
		<div id="app-root" class=("show-contents", move || show_contents.get())>
			<div class="network-canvas">
				<ForceGraphCanvas graph=graph selected=selected config=config fullscreen=true />
			</div>
			<div class="controls contents-toggle" style:display=move || if data_ready.get() { "flex" } else { "none" }>
				<button
					type="button"
					class="ico show-contents"
					title="Show caption and description"
					on:click=move |_| show_contents.set(true)
				>
					"☰"
				</button>
			</div>
			{contents}
		</div>
	}
}
