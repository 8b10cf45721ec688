//! Zoom-dependent scaling configuration for network visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: graph coordinates. Values scale with zoom.
//! - **Screen-space**: canvas pixels. Values stay constant regardless of zoom.
//!
//! Node sizes coming from the dataset are world-space radii; a size of 15 is
//! 15 pixels across at the initial zoom level.

/// Defines how a visual property scales with zoom level `k`.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value to draw with, after the canvas transform is applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how opacity follows zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	Constant,
	/// Fully visible at `full_alpha_k`, invisible at `zero_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// World units per unit of node size.
	pub size_factor: f64,
	pub radius_behavior: ScaleBehavior,
	/// Extra pick tolerance around each node, in screen pixels.
	pub hit_padding: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Labels are drawn for nodes at least this many pixels in radius.
	pub label_threshold: f64,
	pub label_alpha: AlphaBehavior,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels per unit of edge size.
	pub line_width: f64,
	/// Arrow head length in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	pub arrow_alpha: AlphaBehavior,
	/// Minimum arrow alpha worth drawing.
	pub cull_alpha: f64,
}

/// Hover and selection rings.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in screen pixels.
	pub width: f64,
	/// Gap from the node edge in screen pixels.
	pub offset: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				size_factor: 1.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 2.0,
					max_screen: f64::INFINITY,
				},
				hit_padding: 3.0,
				label_size: 12.0,
				label_threshold: 12.0,
				label_alpha: AlphaBehavior::Constant,
			},
			edge: EdgeScaleConfig {
				line_width: 1.0,
				arrow_size: 5.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: 14.0,
				},
				arrow_alpha: AlphaBehavior::Fade {
					zero_alpha_k: 0.3,
					full_alpha_k: 0.8,
				},
				cull_alpha: 0.05,
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 2.0,
			},
		}
	}
}

/// Scale values for one frame at zoom level `k`. All sizes are world-space.
#[derive(Clone, Debug)]
pub struct ScaledValues<'a> {
	config: &'a ScaleConfig,
	pub k: f64,
	pub label_font: String,
	pub label_alpha: f64,
	pub arrow_size: f64,
	pub arrow_alpha: f64,
	pub cull_arrows: bool,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl<'a> ScaledValues<'a> {
	pub fn new(config: &'a ScaleConfig, k: f64, font_family: &str) -> Self {
		let arrow_alpha = config.edge.arrow_alpha.apply(k);
		Self {
			config,
			k,
			label_font: format!("{}px {}", config.node.label_size / k, font_family),
			label_alpha: config.node.label_alpha.apply(k),
			arrow_size: config.edge.arrow_behavior.apply(config.edge.arrow_size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.edge.cull_alpha,
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
		}
	}

	/// Drawn radius of a node of the given size.
	pub fn node_radius(&self, size: f64) -> f64 {
		let node = &self.config.node;
		node.radius_behavior.apply(size * node.size_factor, self.k)
	}

	/// Pick radius of a node of the given size.
	pub fn hit_radius(&self, size: f64) -> f64 {
		self.node_radius(size) + self.config.node.hit_padding / self.k
	}

	/// Whether a node of this size is large enough on screen to be labelled.
	pub fn shows_label(&self, size: f64) -> bool {
		self.node_radius(size) * self.k >= self.config.node.label_threshold
	}

	/// Label font size in world units.
	pub fn label_font_px(&self) -> f64 {
		self.config.node.label_size / self.k
	}

	/// Stroke width of an edge of the given size.
	pub fn edge_width(&self, size: f64) -> f64 {
		self.config.edge.line_width * size / self.k
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_radius_never_shrinks_below_two_pixels() {
		let config = ScaleConfig::default();
		let zoomed_out = ScaledValues::new(&config, 0.1, "serif");
		assert_eq!(zoomed_out.node_radius(3.0) * 0.1, 2.0);
		let zoomed_in = ScaledValues::new(&config, 4.0, "serif");
		assert_eq!(zoomed_in.node_radius(3.0), 3.0);
	}

	#[test]
	fn labels_follow_rendered_size() {
		let config = ScaleConfig::default();
		let initial = ScaledValues::new(&config, 1.0, "serif");
		assert!(initial.shows_label(15.0));
		assert!(!initial.shows_label(3.0));
		assert!(ScaledValues::new(&config, 4.0, "serif").shows_label(3.0));
	}

	#[test]
	fn arrows_fade_out_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert!(ScaledValues::new(&config, 0.2, "serif").cull_arrows);
		assert_eq!(ScaledValues::new(&config, 1.0, "serif").arrow_alpha, 1.0);
	}

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		assert_eq!(ScaleBehavior::World.apply(10.0, 2.0), 10.0);
	}
}
