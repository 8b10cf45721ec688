use leptos::prelude::*;

use super::panel::Panel;

/// Static description of the network and its data sources.
#[component]
pub fn DescriptionPanel() -> impl IntoView {
	view! {
		<Panel title="Description" icon="ⓘ" initially_deployed=true>
			<p>
				"This map represents a " <i>"network"</i>
				" of Ph. D. students, Ph. D. advisors and jury members from the DRM research lab. Each "
				<i>"node"</i> " represents a researcher and each edge represents " <b>"a thesis supervision"</b>
				" (directed from the advisor to the student), " <b>"a thesis examination"</b>
				" (directed from the jury member to the student), or " <b>"a co-occurrence in a jury"</b>
				" (undirected). Jury members are included even if they have not done their Ph. D. with DRM "
				"or supervized a DRM thesis, but only if they took part in at least 2 DRM-related juries."
			</p>
			<p>
				"The data was enriched using open data from "
				<a target="_blank" rel="noreferrer" href="https://theses.fr/">
					"Theses.fr"
				</a> "."
			</p>
			<p>
				"Node sizes are related to their "
				<a target="_blank" rel="noreferrer" href="https://en.wikipedia.org/wiki/Betweenness_centrality">
					"betweenness centrality"
				</a>
				". More central nodes (ie. bigger nodes) are important crossing points in the network."
			</p>
			<p>
				<i class="text-muted">
					"Hover a node to see its neighborhood, click it to select it. "
					"Drag nodes to reposition them, drag the background to pan and scroll to zoom."
				</i>
			</p>
		</Panel>
	}
}
