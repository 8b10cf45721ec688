use leptos::prelude::*;

use crate::graph::{Tally, VisibilityStats};

fn count(tally: Tally, noun: &str) -> String {
	let plural = if tally.total > 1 { "s" } else { "" };
	if tally.visible == tally.total {
		format!("{} {noun}{plural}", tally.total)
	} else {
		format!("{} / {} {noun}{plural}", tally.visible, tally.total)
	}
}

/// Subtitle such as `120 / 431 researchers, 98 / 1204 links`.
pub fn visible_caption(stats: &VisibilityStats) -> String {
	format!("{}, {}", count(stats.nodes, "researcher"), count(stats.edges, "link"))
}

/// Graph title with live visible counts.
#[component]
pub fn GraphTitle(stats: RwSignal<VisibilityStats>) -> impl IntoView {
	view! {
		<div class="graph-title">
			<h1>"DRM thesis network"</h1>
			<h2>
				<i>{move || stats.with(visible_caption)}</i>
			</h2>
		</div>
	}
}
