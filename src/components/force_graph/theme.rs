//! Visual theming for the network canvas.
//!
//! Role and link colors live in [`crate::config`]; this module only covers
//! what surrounds them: background, labels, hover and selection rings.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Color at the edges of the canvas
	pub color: Color,
	/// Color at the center when the gradient is enabled
	pub color_secondary: Color,
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	/// Backdrop drawn behind the selected node's label
	pub backdrop: Color,
	pub font_family: &'static str,
}

/// Rings drawn around hovered and selected nodes.
#[derive(Clone, Debug)]
pub struct RingStyle {
	pub hover: Color,
	pub selected: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub label: LabelStyle,
	pub ring: RingStyle,
	/// Whether nodes have a lit radial gradient instead of a flat fill
	pub node_gradient: bool,
}

impl Theme {
	/// Light paper-like theme matching the caption panels.
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(246, 246, 244),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: true,
				vignette: 0.04,
			},
			label: LabelStyle {
				color: Color::rgb(33, 33, 33),
				backdrop: Color::rgba(255, 255, 255, 0.9),
				font_family: "Lato, sans-serif",
			},
			ring: RingStyle {
				hover: Color::rgba(33, 33, 33, 0.8),
				selected: Color::rgb(84, 139, 244),
			},
			node_gradient: true,
		}
	}

	/// Dark variant for fullscreen presentation.
	pub fn night() -> Self {
		Self {
			name: "night",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			label: LabelStyle {
				color: Color::rgb(235, 235, 235),
				backdrop: Color::rgba(22, 27, 34, 0.85),
				font_family: "Lato, sans-serif",
			},
			ring: RingStyle {
				hover: Color::rgba(255, 255, 255, 0.8),
				selected: Color::rgb(144, 238, 3),
			},
			node_gradient: true,
		}
	}

	/// Looks up a theme by name, falling back to [`Theme::paper`].
	pub fn by_name(name: &str) -> Self {
		match name {
			"night" => Self::night(),
			_ => Self::paper(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::paper()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(1, 2, 3).to_css(), "#010203");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.25).to_css(), "rgba(1, 2, 3, 0.25)");
	}

	#[test]
	fn unknown_theme_falls_back_to_paper() {
		assert_eq!(Theme::by_name("night").name, "night");
		assert_eq!(Theme::by_name("neon").name, "paper");
	}
}
