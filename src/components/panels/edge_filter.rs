use leptos::prelude::*;

use super::categories::{CategoryList, CategoryRow, checked_note};
use super::panel::Panel;
use crate::config::{EDGE_LABELS, edge_label_meta};
use crate::graph::{EdgeLabel, FilterState, VisibilityStats};

/// Link category filter with per-category count bars.
///
/// `totals` is read once at mount; `stats` is refreshed after each filter
/// change.
#[component]
pub fn EdgeFilterPanel(
	filters: RwSignal<FilterState>,
	stats: RwSignal<VisibilityStats>,
	totals: VisibilityStats,
) -> impl IntoView {
	let mut shown: Vec<EdgeLabel> = EDGE_LABELS.iter().map(|meta| meta.label).collect();
	if totals.label(EdgeLabel::Unknown).total > 0 {
		shown.push(EdgeLabel::Unknown);
	}

	let rows = shown
		.iter()
		.map(|&label| {
			let meta = edge_label_meta(label);
			CategoryRow {
				key: label.key(),
				name: meta.name,
				color: meta.color_highlight,
				unknown: label == EdgeLabel::Unknown,
				total: totals.label(label).total,
				visible: Signal::derive(move || stats.with(|s| s.label(label).visible)),
				checked: Signal::derive(move || filters.with(|f| f.label_enabled(label))),
				toggle: Callback::new(move |()| filters.update(|f| f.toggle_label(label))),
			}
		})
		.collect::<Vec<_>>();

	let count = shown.len();
	let header_labels = shown.clone();
	let note = Signal::derive(move || {
		let checked = filters.with(|f| header_labels.iter().filter(|&&l| f.label_enabled(l)).count());
		checked_note(checked, count)
	});

	let check_all = move |_: leptos::ev::MouseEvent| {
		filters.update(|f| {
			f.set_all_labels(true);
			f.edge_labels.extend(shown.iter().copied());
		})
	};

	view! {
		<Panel title="Link categories" icon="⇄" note=note>
			<p>
				<i class="text-muted">
					"Click a category to show/hide related links from the network. "
					"Categories with an imperative name have links directed from the subject to the object."
				</i>
			</p>
			<p class="buttons">
				<button class="btn" on:click=check_all>
					"✓ Check all"
				</button>
				" "
				<button class="btn" on:click=move |_| filters.update(|f| f.set_all_labels(false))>
					"✗ Uncheck all"
				</button>
			</p>
			<CategoryList rows=rows id_prefix="edgeLabel" noun="link" />
		</Panel>
	}
}
