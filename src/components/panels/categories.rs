//! Checkbox lists with count bars, shared by the link and role filters.

use std::cmp::Reverse;

use leptos::prelude::*;

use crate::components::force_graph::Color;

/// One toggleable category.
#[derive(Clone)]
pub struct CategoryRow {
	pub key: &'static str,
	pub name: &'static str,
	pub color: Color,
	/// Whether this is the catch-all for unrecognized values.
	pub unknown: bool,
	pub total: usize,
	pub visible: Signal<usize>,
	pub checked: Signal<bool>,
	pub toggle: Callback<()>,
}

/// Tooltip for a category row, e.g. `12 links (only 3 are visible)`.
pub fn count_caption(total: usize, visible: usize, noun: &str) -> String {
	let plural = if total > 1 { "s" } else { "" };
	let detail = if visible == total {
		String::new()
	} else if visible == 0 {
		" (all hidden)".to_string()
	} else if visible == 1 {
		" (only one is visible)".to_string()
	} else {
		format!(" (only {visible} are visible)")
	};
	format!("{total} {noun}{plural}{detail}")
}

/// CSS width of a bar showing `part` out of `whole`.
pub fn bar_width(part: usize, whole: usize) -> String {
	if whole == 0 {
		return "0%".to_string();
	}
	format!("{}%", 100.0 * part as f64 / whole as f64)
}

/// Panel header suffix shown while some categories are unchecked.
pub fn checked_note(checked: usize, total: usize) -> String {
	if checked < total {
		format!(" ({checked} / {total})")
	} else {
		String::new()
	}
}

/// Most frequent categories first, the catch-all last.
pub fn sort_rows(rows: &mut [CategoryRow]) {
	rows.sort_by_key(|row| (row.unknown, Reverse(row.total)));
}

/// Renders sorted category rows with checkboxes and count bars.
#[component]
pub fn CategoryList(
	rows: Vec<CategoryRow>,
	/// Prefix for checkbox ids.
	id_prefix: &'static str,
	/// Singular noun used in the count tooltip.
	noun: &'static str,
) -> impl IntoView {
	let mut rows = rows;
	sort_rows(&mut rows);
	let max_total = rows.iter().map(|row| row.total).max().unwrap_or(0);

	let items = rows
		.into_iter()
		.map(|row| {
			let id = format!("{id_prefix}-{}", row.key);
			let CategoryRow {
				name,
				color,
				total,
				visible,
				checked,
				toggle,
				..
			} = row;
			view! {
				<li class="caption-row" title=move || count_caption(total, visible.get(), noun)>
					<input
						type="checkbox"
						id=id.clone()
						prop:checked=move || checked.get()
						on:change=move |_| toggle.run(())
					/>
					<label for=id>
						<span class="circle" style:background-color=color.to_css()></span>
						" "
						<div class="node-label">
							<span>{name}</span>
							<div class="bar" style:width=bar_width(total, max_total)>
								<div class="inside-bar" style:width=move || bar_width(visible.get(), total)></div>
							</div>
						</div>
					</label>
				</li>
			}
		})
		.collect_view();

	view! { <ul>{items}</ul> }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn captions_describe_hidden_counts() {
		assert_eq!(count_caption(1, 1, "link"), "1 link");
		assert_eq!(count_caption(12, 12, "link"), "12 links");
		assert_eq!(count_caption(12, 3, "link"), "12 links (only 3 are visible)");
		assert_eq!(count_caption(12, 1, "node"), "12 nodes (only one is visible)");
		assert_eq!(count_caption(4, 0, "node"), "4 nodes (all hidden)");
	}

	#[test]
	fn bars_are_relative_to_the_whole() {
		assert_eq!(bar_width(5, 10), "50%");
		assert_eq!(bar_width(10, 10), "100%");
		assert_eq!(bar_width(0, 0), "0%");
	}

	#[test]
	fn header_note_only_when_something_is_unchecked() {
		assert_eq!(checked_note(3, 3), "");
		assert_eq!(checked_note(1, 3), " (1 / 3)");
	}
}
