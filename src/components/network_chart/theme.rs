//! Visual theming for the network chart.

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

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black).
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

	/// Hex form, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Parses a CSS color string into a [`Color`].
/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
/// Anything else, including non-ASCII input, falls back to gray.
pub fn parse_color(color_str: &str) -> Color {
	if color_str.starts_with('#') && color_str.len() == 7 && color_str.is_ascii() {
		let r = u8::from_str_radix(&color_str[1..3], 16).unwrap_or(128);
		let g = u8::from_str_radix(&color_str[3..5], 16).unwrap_or(128);
		let b = u8::from_str_radix(&color_str[5..7], 16).unwrap_or(128);
		Color::rgb(r, g, b)
	} else if color_str.starts_with("rgb") {
		let nums: Vec<&str> = color_str
			.trim_start_matches("rgba(")
			.trim_start_matches("rgb(")
			.trim_end_matches(')')
			.split(',')
			.collect();
		let r = nums
			.first()
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let g = nums
			.get(1)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let b = nums
			.get(2)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let a = nums
			.get(3)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(1.0);
		Color::rgba(r, g, b, a)
	} else {
		Color::rgb(128, 128, 128)
	}
}

/// A curated color palette for nodes.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted, harmonious palette - slate blues and teals (default).
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// Ocean depths palette - blues and teals.
	pub fn ocean() -> Self {
		Self {
			colors: vec![
				Color::rgb(70, 110, 140),  // Deep blue
				Color::rgb(80, 130, 150),  // Cerulean
				Color::rgb(100, 145, 160), // Steel teal
				Color::rgb(90, 125, 145),  // Slate blue
				Color::rgb(85, 135, 155),  // Ocean
				Color::rgb(95, 120, 140),  // Denim
				Color::rgb(75, 115, 135),  // Navy gray
				Color::rgb(88, 128, 148),  // Cadet
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
}

/// Tooltip overlay style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	pub background: Color,
	pub text: Color,
	/// Inner padding in screen pixels.
	pub padding: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label: Color,
	pub tooltip: TooltipStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Clean dark theme with subtle effects (default).
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
			},
			label: Color::rgba(255, 255, 255, 0.85),
			tooltip: TooltipStyle {
				background: Color::rgba(15, 18, 24, 0.92),
				text: Color::rgba(230, 235, 240, 1.0),
				padding: 6.0,
			},
			palette: NodePalette::slate(),
		}
	}

	/// Ocean/deep blue theme.
	pub fn deep_sea() -> Self {
		Self {
			name: "deep_sea",
			background: BackgroundStyle {
				color: Color::rgb(15, 25, 35),
				color_secondary: Color::rgb(20, 32, 45),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(90, 130, 160, 0.45),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
			},
			label: Color::rgba(230, 240, 250, 0.85),
			tooltip: TooltipStyle {
				background: Color::rgba(10, 18, 26, 0.92),
				text: Color::rgba(225, 235, 245, 1.0),
				padding: 6.0,
			},
			palette: NodePalette::ocean(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_serialization_round_trips_hex() {
		let color = Color::rgb(94, 129, 172);
		assert_eq!(color.to_css(), "#5e81ac");
		assert_eq!(parse_color("#5e81ac"), color);
	}

	#[test]
	fn parses_rgba_notation() {
		let color = parse_color("rgba(10, 20, 30, 0.5)");
		assert_eq!((color.r, color.g, color.b), (10, 20, 30));
		assert_eq!(color.a, 0.5);
	}

	#[test]
	fn unknown_color_falls_back_to_gray() {
		assert_eq!(parse_color("papayawhip"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn non_ascii_fill_falls_back_to_gray() {
		// 7 bytes but a multibyte char straddles the slice boundaries; must
		// not panic on dataset-supplied fill strings.
		assert_eq!(parse_color("#a\u{e9}11b"), Color::rgb(128, 128, 128));
		assert_eq!(parse_color("#ééé"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn with_alpha_replaces_only_the_alpha_channel() {
		let color = Color::rgba(10, 20, 30, 0.9).with_alpha(0.45);
		assert_eq!((color.r, color.g, color.b), (10, 20, 30));
		assert_eq!(color.a, 0.45);
		assert_eq!(color.to_css(), "rgba(10, 20, 30, 0.45)");
	}

	#[test]
	fn lighten_and_darken_stay_in_range() {
		let color = Color::rgb(100, 100, 100);
		assert_eq!(color.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(color.darken(1.0), Color::rgb(0, 0, 0));
	}

	#[test]
	fn palette_wraps_around() {
		let palette = NodePalette::slate();
		assert_eq!(palette.get(0), palette.get(palette.colors.len()));
	}
}
