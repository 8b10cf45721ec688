//! Search field with an autocomplete menu.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;

use crate::config::SearchConfig;
use crate::debounce::{Debouncer, debounce};
use crate::graph::{GraphHandle, SearchHit, SearchIndex};

/// Height of one suggestion: text, vertical padding and top margin.
const ITEM_HEIGHT: f64 = 17.0 + 16.0 + 2.736;
/// Space between the input and the menu.
const MENU_GAP: f64 = 6.0;

/// Which input edge the menu hangs from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuAnchor {
	/// Above the input; distance from the viewport bottom.
	Above { bottom: f64 },
	/// Below the input; distance from the viewport top.
	Below { top: f64 },
}

/// Fixed-position placement of the suggestion menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuPlacement {
	pub left: f64,
	pub width: f64,
	pub anchor: MenuAnchor,
	pub min_height: f64,
}

impl MenuPlacement {
	/// Opens upwards when a full menu fits above the input, downwards otherwise.
	pub fn compute(left: f64, top: f64, bottom: f64, width: f64, viewport_height: f64, items: usize, max_items: usize) -> Self {
		let borders = items.saturating_sub(1) as f64;
		let min_height = items as f64 * ITEM_HEIGHT + borders;
		let max_height = max_items as f64 * ITEM_HEIGHT + borders;

		let anchor = if top >= max_height + MENU_GAP {
			MenuAnchor::Above {
				bottom: viewport_height - top + MENU_GAP,
			}
		} else {
			MenuAnchor::Below {
				top: bottom + MENU_GAP,
			}
		};
		Self {
			left,
			width,
			anchor,
			min_height,
		}
	}

	pub fn to_style(&self) -> String {
		let vertical = match self.anchor {
			MenuAnchor::Above { bottom } => format!("bottom: {bottom}px; top: auto;"),
			MenuAnchor::Below { top } => format!("top: {top}px; bottom: auto;"),
		};
		format!(
			"position: fixed; left: {}px; width: {}px; right: auto; {} min-height: {}px; z-index: 9999;",
			self.left, self.width, vertical, self.min_height
		)
	}
}

/// Moves the keyboard highlight through `count` suggestions, wrapping around.
pub fn step_highlight(current: Option<usize>, count: usize, forward: bool) -> Option<usize> {
	if count == 0 {
		return None;
	}
	Some(match (current, forward) {
		(None, true) => 0,
		(None, false) => count - 1,
		(Some(i), true) => (i + 1) % count,
		(Some(i), false) => (i + count - 1) % count,
	})
}

/// An emptied search field drops the current selection.
pub fn clears_selection(text: &str) -> bool {
	text.trim().is_empty()
}

/// Fuzzy node search. Choosing a suggestion writes its key into `selected`;
/// a selection made elsewhere fills the field with the node's label.
#[component]
pub fn SearchField(graph: GraphHandle, selected: RwSignal<Option<String>>, config: SearchConfig) -> impl IntoView {
	let text = RwSignal::new(String::new());
	let results = RwSignal::new(Vec::<SearchHit>::new());
	let open = RwSignal::new(false);
	let active = RwSignal::new(None::<usize>);
	let menu_style = RwSignal::new(None::<String>);
	let input_ref = NodeRef::<leptos::html::Input>::new();

	let max_results = config.max_results;
	let delay = config.debounce();
	let index = Rc::new(RefCell::new(SearchIndex::new(config)));
	let debouncer: Rc<RefCell<Debouncer<String>>> = Rc::new(RefCell::new(Debouncer::new()));
	let pending = StoredValue::new_local(debouncer.clone());

	let run_query = {
		let index = index.clone();
		Rc::new(move |query: String| {
			let index = index.clone();
			debounce(&debouncer, query, delay, move |query| {
				let hits = graph.with_untracked(|g| index.borrow_mut().search(g, &query));
				debug!("drm-graph: {} suggestions for {:?}", hits.len(), query);
				results.set(hits);
				active.set(None);
			});
		})
	};

	// the index follows visibility one frame late, then the query is re-run
	let query_rebuild = run_query.clone();
	Effect::new(move |_| {
		graph.track();
		let (index, run_query) = (index.clone(), query_rebuild.clone());
		request_animation_frame(move || {
			graph.with_untracked(|g| index.borrow_mut().rebuild(g));
			let query = text.get_untracked();
			if !query.is_empty() {
				run_query(query);
			}
		});
	});

	Effect::new(move |_| {
		let Some(key) = selected.get() else {
			return;
		};
		let label = graph.with_untracked(|g| g.node_index(&key).and_then(|idx| g.node(idx)).map(|n| n.label.clone()));
		if let Some(label) = label {
			text.set(label);
		}
	});

	Effect::new(move |_| {
		let count = results.with(Vec::len);
		let style = if open.get() && count > 0 {
			input_ref.get().map(|input| {
				let rect = input.get_bounding_client_rect();
				let viewport_height = web_sys::window()
					.and_then(|w| w.inner_height().ok())
					.and_then(|h| h.as_f64())
					.unwrap_or(0.0);
				MenuPlacement::compute(
					rect.left(),
					rect.top(),
					rect.bottom(),
					rect.width(),
					viewport_height,
					count,
					max_results,
				)
				.to_style()
			})
		} else {
			None
		};
		menu_style.set(style);
	});

	let choose = Callback::new(move |hit: SearchHit| {
		pending.with_value(|debouncer| debouncer.borrow_mut().cancel());
		text.set(hit.label);
		results.set(Vec::new());
		open.set(false);
		active.set(None);
		selected.set(Some(hit.key));
	});

	let on_input = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		text.set(value.clone());
		open.set(true);
		if clears_selection(&value) && selected.with_untracked(Option::is_some) {
			selected.set(None);
		}
		run_query(value);
	};

	let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
		let count = results.with_untracked(Vec::len);
		match ev.key().as_str() {
			"ArrowDown" | "ArrowUp" if count > 0 => {
				ev.prevent_default();
				open.set(true);
				let forward = ev.key() == "ArrowDown";
				active.update(|current| *current = step_highlight(*current, count, forward));
			}
			"Enter" => {
				let hit = active
					.get_untracked()
					.and_then(|i| results.with_untracked(|hits| hits.get(i).cloned()));
				if let Some(hit) = hit {
					ev.prevent_default();
					choose.run(hit);
				}
			}
			"Escape" => open.set(false),
			_ => {}
		}
	};

	let suggestions = move || {
		results
			.get()
			.into_iter()
			.enumerate()
			.map(|(i, hit)| {
				let label = hit.label.clone();
				view! {
					<li
						class:highlighted=move || active.get() == Some(i)
						on:mouseenter=move |_| active.set(Some(i))
						on:mousedown=move |ev| {
							ev.prevent_default();
							choose.run(hit.clone());
						}
					>
						{label}
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<div class="search-wrapper">
			<input
				type="text"
				node_ref=input_ref
				aria-label="Search nodes"
				placeholder="Search in nodes..."
				prop:value=move || text.get()
				on:input=on_input
				on:keydown=on_keydown
				on:focus=move |_| open.set(true)
				on:blur=move |_| open.set(false)
			/>
			<span class="icon">"⌕"</span>
			<ul
				class="autocomplete-menu"
				aria-label="Search suggestions"
				style=move || menu_style.get().unwrap_or_else(|| "display: none".to_string())
			>
				{suggestions}
			</ul>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn menu_opens_upwards_when_there_is_room() {
		let placement = MenuPlacement::compute(10.0, 700.0, 730.0, 200.0, 800.0, 3, 8);
		assert_eq!(placement.anchor, MenuAnchor::Above { bottom: 106.0 });
		assert_eq!(placement.min_height, 3.0 * ITEM_HEIGHT + 2.0);
	}

	#[test]
	fn menu_opens_downwards_near_the_top() {
		let placement = MenuPlacement::compute(10.0, 40.0, 70.0, 200.0, 800.0, 1, 8);
		assert_eq!(placement.anchor, MenuAnchor::Below { top: 76.0 });
		assert_eq!(placement.min_height, ITEM_HEIGHT);
		assert!(placement.to_style().contains("top: 76px"));
	}

	#[test]
	fn emptying_the_field_clears_the_selection() {
		assert!(clears_selection(""));
		assert!(clears_selection("   "));
		assert!(!clears_selection("Du"));
	}

	#[test]
	fn keyboard_highlight_wraps() {
		assert_eq!(step_highlight(None, 3, true), Some(0));
		assert_eq!(step_highlight(None, 3, false), Some(2));
		assert_eq!(step_highlight(Some(2), 3, true), Some(0));
		assert_eq!(step_highlight(Some(0), 3, false), Some(2));
		assert_eq!(step_highlight(Some(1), 0, true), None);
	}
}
