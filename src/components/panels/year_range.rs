use leptos::prelude::*;

use super::panel::Panel;
use crate::graph::FilterState;

const TRACK_OFF: &str = "#ccc";
const TRACK_ON: &str = "#548BF4";

/// Slider track gradient highlighting the selected window.
pub fn track_background(min_year: i32, max_year: i32, lower: i32, upper: i32) -> String {
	let span = f64::from((upper - lower).max(1));
	let at = |year: i32| f64::from(year.clamp(lower, upper) - lower) / span * 100.0;
	let (from, to) = (at(min_year), at(max_year));
	format!(
		"linear-gradient(to right, {TRACK_OFF} 0%, {TRACK_OFF} {from}%, {TRACK_ON} {from}%, \
		 {TRACK_ON} {to}%, {TRACK_OFF} {to}%, {TRACK_OFF} 100%)"
	)
}

/// Dual slider selecting the year window.
#[component]
pub fn YearRangePanel(filters: RwSignal<FilterState>) -> impl IntoView {
	let bounds = filters.with_untracked(FilterState::bounds);

	let on_min = move |ev: leptos::ev::Event| {
		if let Ok(year) = event_target_value(&ev).parse::<i32>() {
			filters.update(|f| {
				let max = f.max_year;
				f.set_year_range(year.min(max), max);
			});
		}
	};
	let on_max = move |ev: leptos::ev::Event| {
		if let Ok(year) = event_target_value(&ev).parse::<i32>() {
			filters.update(|f| {
				let min = f.min_year;
				f.set_year_range(min, year.max(min));
			});
		}
	};

	let note = Signal::derive(move || {
		filters.with(|f| {
			if (f.min_year, f.max_year) == (bounds.lower, bounds.upper) {
				String::new()
			} else {
				format!(" ({} - {})", f.min_year, f.max_year)
			}
		})
	});

	view! {
		<Panel title="Year Range" icon="📅" note=note>
			<p>
				<i class="text-muted">
					"Drag and drop to select the time window for which you want to see the interactions."
				</i>
			</p>
			<p class="buttons">
				<button class="btn" on:click=move |_| filters.update(FilterState::reset_years)>
					"↺ Reset"
				</button>
			</p>
			<div class="year-range">
				<div
					class="year-track"
					style:background=move || {
						filters.with(|f| track_background(f.min_year, f.max_year, bounds.lower, bounds.upper))
					}
				></div>
				<input
					type="range"
					aria-label="First year"
					min=bounds.lower.to_string()
					max=bounds.upper.to_string()
					step=bounds.step.to_string()
					prop:value=move || filters.with(|f| f.min_year.to_string())
					on:input=on_min
				/>
				<input
					type="range"
					aria-label="Last year"
					min=bounds.lower.to_string()
					max=bounds.upper.to_string()
					step=bounds.step.to_string()
					prop:value=move || filters.with(|f| f.max_year.to_string())
					on:input=on_max
				/>
				<output>{move || filters.with(|f| format!("{} - {}", f.min_year, f.max_year))}</output>
			</div>
		</Panel>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn track_marks_the_selected_window() {
		let full = track_background(1985, 2023, 1985, 2023);
		assert!(full.contains(&format!("{TRACK_ON} 0%")));
		assert!(full.contains(&format!("{TRACK_ON} 100%")));

		let window = track_background(1990, 2000, 1980, 2020);
		assert!(window.contains(&format!("{TRACK_OFF} 25%, {TRACK_ON} 25%")));
		assert!(window.contains(&format!("{TRACK_ON} 50%, {TRACK_OFF} 50%")));
	}
}
