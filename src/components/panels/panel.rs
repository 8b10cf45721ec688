use leptos::prelude::*;

/// Collapsible panel with a clickable title bar.
#[component]
pub fn Panel(
	#[prop(into)] title: String,
	/// Icon shown before the title.
	#[prop(into, default = String::new())]
	icon: String,
	/// Muted text after the title, e.g. a filter summary.
	#[prop(optional, into)]
	note: Option<Signal<String>>,
	#[prop(default = false)] initially_deployed: bool,
	children: Children,
) -> impl IntoView {
	let deployed = RwSignal::new(initially_deployed);

	view! {
		<div class="panel">
			<h2>
				<span class="text-muted">{icon}</span>
				" "
				{title}
				{note.map(|note| view! { <span class="text-muted text-small">{move || note.get()}</span> })}
				<button
					type="button"
					class="ico"
					title=move || if deployed.get() { "Hide" } else { "Show" }
					on:click=move |_| deployed.update(|d| *d = !*d)
				>
					{move || if deployed.get() { "▾" } else { "▸" }}
				</button>
			</h2>
			<div class="panel-content" style:display=move || if deployed.get() { "block" } else { "none" }>
				{children()}
			</div>
		</div>
	}
}
