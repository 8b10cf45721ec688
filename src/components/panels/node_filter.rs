use leptos::prelude::*;

use super::categories::{CategoryList, CategoryRow, checked_note};
use super::panel::Panel;
use crate::config::{NODE_ROLES, role_meta};
use crate::graph::{FilterState, Role, VisibilityStats};

/// Role filter with per-role count bars.
#[component]
pub fn NodeFilterPanel(
	filters: RwSignal<FilterState>,
	stats: RwSignal<VisibilityStats>,
	totals: VisibilityStats,
) -> impl IntoView {
	let mut shown: Vec<Role> = NODE_ROLES.iter().map(|meta| meta.role).collect();
	if totals.role(Role::Unknown).total > 0 {
		shown.push(Role::Unknown);
	}

	let rows = shown
		.iter()
		.map(|&role| {
			let meta = role_meta(role);
			CategoryRow {
				key: role.key(),
				name: meta.name,
				color: meta.color_highlight,
				unknown: role == Role::Unknown,
				total: totals.role(role).total,
				visible: Signal::derive(move || stats.with(|s| s.role(role).visible)),
				checked: Signal::derive(move || filters.with(|f| f.role_enabled(role))),
				toggle: Callback::new(move |()| filters.update(|f| f.toggle_role(role))),
			}
		})
		.collect::<Vec<_>>();

	let count = shown.len();
	let header_roles = shown.clone();
	let note = Signal::derive(move || {
		let checked = filters.with(|f| header_roles.iter().filter(|&&r| f.role_enabled(r)).count());
		checked_note(checked, count)
	});

	let check_all = move |_: leptos::ev::MouseEvent| {
		filters.update(|f| {
			f.set_all_roles(true);
			f.node_roles.extend(shown.iter().copied());
		})
	};

	view! {
		<Panel title="Roles" icon="◉" note=note>
			<p>
				<i class="text-muted">"Click a role to show/hide the related researchers from the network."</i>
			</p>
			<p class="buttons">
				<button class="btn" on:click=check_all>
					"✓ Check all"
				</button>
				" "
				<button class="btn" on:click=move |_| filters.update(|f| f.set_all_roles(false))>
					"✗ Uncheck all"
				</button>
			</p>
			<CategoryList rows=rows id_prefix="nodeRole" noun="node" />
		</Panel>
	}
}
