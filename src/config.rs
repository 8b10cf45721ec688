//! Application constants and the overridable [`AppConfig`].
//!
//! Defaults are compiled in. A page may ship a `<script id="graph-config"
//! type="application/json">` element to override any subset of fields.

use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::force_graph::theme::Color;
use crate::graph::{EdgeLabel, Role};

/// Display metadata for a node role.
#[derive(Clone, Copy, Debug)]
pub struct RoleMeta {
	pub role: Role,
	pub name: &'static str,
	pub color_highlight: Color,
	pub color_fade: Color,
}

/// Display metadata for an edge label.
#[derive(Clone, Copy, Debug)]
pub struct EdgeLabelMeta {
	pub label: EdgeLabel,
	pub name: &'static str,
	pub color_highlight: Color,
	pub color_fade: Color,
}

/// Roles shown in the role filter, in display order.
pub const NODE_ROLES: [RoleMeta; 3] = [
	RoleMeta {
		role: Role::PhdStudent,
		name: "Ph. D. students",
		color_highlight: Color::rgb(0x19, 0x76, 0xd2),
		color_fade: Color::rgb(0x90, 0xca, 0xf9),
	},
	RoleMeta {
		role: Role::Advisor,
		name: "Ph. D. advisors",
		color_highlight: Color::rgb(0xe5, 0x39, 0x35),
		color_fade: Color::rgb(0xef, 0x9a, 0x9a),
	},
	RoleMeta {
		role: Role::JuryMember,
		name: "Jury members",
		color_highlight: Color::rgb(0x43, 0xa0, 0x47),
		color_fade: Color::rgb(0xa5, 0xd6, 0xa7),
	},
];

/// Link categories shown in the link filter, in display order.
pub const EDGE_LABELS: [EdgeLabelMeta; 3] = [
	EdgeLabelMeta {
		label: EdgeLabel::SameJury,
		name: "Sat on the same jury",
		color_highlight: Color::rgb(0x7e, 0x3f, 0xf2),
		color_fade: Color::rgb(0xb7, 0x94, 0xf6),
	},
	EdgeLabelMeta {
		label: EdgeLabel::Examines,
		name: "Examines",
		color_highlight: Color::rgb(0x90, 0xee, 0x03),
		color_fade: Color::rgb(0xc6, 0xf6, 0x8d),
	},
	EdgeLabelMeta {
		label: EdgeLabel::Supervizes,
		name: "Supervizes",
		color_highlight: Color::rgb(0xff, 0x9e, 0x22),
		color_fade: Color::rgb(0xff, 0xc7, 0x7d),
	},
];

const UNKNOWN_ROLE: RoleMeta = RoleMeta {
	role: Role::Unknown,
	name: "Unknown",
	color_highlight: Color::rgb(0x75, 0x75, 0x75),
	color_fade: Color::rgb(0xbd, 0xbd, 0xbd),
};

const UNKNOWN_LABEL: EdgeLabelMeta = EdgeLabelMeta {
	label: EdgeLabel::Unknown,
	name: "Other",
	color_highlight: Color::rgb(0x44, 0x44, 0x44),
	color_fade: Color::rgb(0x99, 0x99, 0x99),
};

/// Metadata for `role`; unknown roles get neutral grays.
pub fn role_meta(role: Role) -> &'static RoleMeta {
	NODE_ROLES
		.iter()
		.find(|meta| meta.role == role)
		.unwrap_or(&UNKNOWN_ROLE)
}

/// Metadata for `label`; unknown labels get neutral grays.
pub fn edge_label_meta(label: EdgeLabel) -> &'static EdgeLabelMeta {
	EDGE_LABELS
		.iter()
		.find(|meta| meta.label == label)
		.unwrap_or(&UNKNOWN_LABEL)
}

/// Inclusive year window offered by the range slider.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct YearBounds {
	pub lower: i32,
	pub upper: i32,
	pub step: i32,
}

impl Default for YearBounds {
	fn default() -> Self {
		Self {
			lower: 1985,
			upper: 2023,
			step: 1,
		}
	}
}

/// Fuzzy search tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
	/// Maximum number of suggestions shown.
	pub max_results: usize,
	/// Looseness in `0.0..=1.0`: the share of a query that may be misspelled
	/// or scattered and still match. 0.0 only accepts exact matches.
	pub threshold: f64,
	/// Queries shorter than this (in characters) return nothing.
	pub min_query_len: usize,
	pub debounce_ms: u64,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			max_results: 8,
			threshold: 0.3,
			min_query_len: 2,
			debounce_ms: 200,
		}
	}
}

impl SearchConfig {
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}

/// Range that node weights are rescaled into.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SizeRange {
	pub min: f64,
	pub max: f64,
}

impl Default for SizeRange {
	fn default() -> Self {
		Self { min: 3.0, max: 15.0 }
	}
}

/// Camera move performed when a node is selected.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
	/// Camera ratio (inverse zoom) at the end of the move; 0.25 means 4x zoom.
	pub zoom_ratio: f64,
	pub duration_ms: u64,
}

impl Default for SelectionConfig {
	fn default() -> Self {
		Self {
			zoom_ratio: 0.25,
			duration_ms: 600,
		}
	}
}

impl SelectionConfig {
	pub fn duration(&self) -> Duration {
		Duration::from_millis(self.duration_ms)
	}
}

/// Top-level configuration shared by every view.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
	/// Where the dataset is fetched from when the page does not inline it.
	pub dataset_url: String,
	pub years: YearBounds,
	pub search: SearchConfig,
	pub hover_debounce_ms: u64,
	pub node_size: SizeRange,
	pub selection: SelectionConfig,
	/// Seconds the force simulation runs after load before it is frozen.
	pub settle_seconds: f64,
	/// Canvas theme name (`paper` or `night`).
	pub theme: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			dataset_url: "./data/dataset.json".to_string(),
			years: YearBounds::default(),
			search: SearchConfig::default(),
			hover_debounce_ms: 40,
			node_size: SizeRange::default(),
			selection: SelectionConfig::default(),
			settle_seconds: 4.0,
			theme: "paper".to_string(),
		}
	}
}

impl AppConfig {
	pub fn hover_debounce(&self) -> Duration {
		Duration::from_millis(self.hover_debounce_ms)
	}

	/// Parses a (possibly partial) JSON override on top of the defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut config: AppConfig = serde_json::from_str(json)?;
		config.normalize();
		Ok(config)
	}

	/// Reads overrides from `<script id="graph-config">`, if present.
	pub fn from_document() -> Self {
		let Some(text) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id("graph-config"))
			.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|script| script.text().ok())
		else {
			return Self::default();
		};

		match Self::from_json(&text) {
			Ok(config) => {
				info!("drm-graph: applied configuration overrides");
				config
			}
			Err(e) => {
				warn!("drm-graph: ignoring invalid configuration: {}", e);
				Self::default()
			}
		}
	}

	/// Repairs inverted or degenerate ranges coming from overrides.
	fn normalize(&mut self) {
		if self.years.lower > self.years.upper {
			std::mem::swap(&mut self.years.lower, &mut self.years.upper);
		}
		self.years.step = self.years.step.max(1);
		if self.node_size.min > self.node_size.max {
			std::mem::swap(&mut self.node_size.min, &mut self.node_size.max);
		}
		self.search.threshold = self.search.threshold.clamp(0.0, 1.0);
		if self.selection.zoom_ratio.is_nan() || self.selection.zoom_ratio <= 0.0 {
			self.selection.zoom_ratio = SelectionConfig::default().zoom_ratio;
		}
	}
}
