//! Color schemes and star palettes.
//!
//! Stars are colored from a small palette picked by the active light/dark
//! scheme, so they stay visible against either page background.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Builds a color from channels and alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with its alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Same color, fully transparent. Used as the far stop of fading gradients.
	pub fn transparent(self) -> Self {
		self.with_alpha(0.0)
	}

	/// CSS `rgba(...)` notation.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// The two page color schemes the star field adapts to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
	/// Light page background.
	Light,
	/// Dark page background.
	#[default]
	Dark,
}

impl ColorScheme {
	/// Lowercase name, as used for the `data-theme` attribute.
	pub fn as_str(self) -> &'static str {
		match self {
			ColorScheme::Light => "light",
			ColorScheme::Dark => "dark",
		}
	}

	/// The other scheme.
	pub fn toggled(self) -> Self {
		match self {
			ColorScheme::Light => ColorScheme::Dark,
			ColorScheme::Dark => ColorScheme::Light,
		}
	}
}

/// Colors used for one scheme: five twinkling-star colors plus the single
/// shooting-star color.
#[derive(Clone, Debug, PartialEq)]
pub struct StarPalette {
	/// Colors for ambient and bright stars.
	pub stars: [Color; 5],
	/// Color for every shooting star.
	pub shooting: Color,
}

impl StarPalette {
	/// Light, cool-toned stars for a dark background.
	pub fn night() -> Self {
		Self {
			stars: [
				Color::rgba(255, 255, 255, 0.8), // White
				Color::rgba(220, 230, 255, 0.9), // Ice
				Color::rgba(200, 220, 255, 0.8), // Pale blue
				Color::rgba(180, 200, 255, 0.7), // Periwinkle
				Color::rgba(190, 210, 240, 0.75), // Frost
			],
			shooting: Color::rgba(255, 255, 255, 0.9),
		}
	}

	/// Dark, cool-toned stars for a light background.
	pub fn day() -> Self {
		Self {
			stars: [
				Color::rgba(0, 0, 30, 0.6),    // Ink
				Color::rgba(10, 20, 60, 0.7),  // Midnight
				Color::rgba(20, 40, 80, 0.6),  // Navy
				Color::rgba(30, 50, 100, 0.5), // Slate navy
				Color::rgba(40, 60, 120, 0.55), // Denim
			],
			shooting: Color::rgba(0, 0, 50, 0.8),
		}
	}

	/// Palette matching `scheme`.
	pub fn for_scheme(scheme: ColorScheme) -> Self {
		match scheme {
			ColorScheme::Dark => Self::night(),
			ColorScheme::Light => Self::day(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palettes_differ_per_scheme() {
		let dark = StarPalette::for_scheme(ColorScheme::Dark);
		let light = StarPalette::for_scheme(ColorScheme::Light);
		assert_eq!(dark, StarPalette::night());
		assert_eq!(light, StarPalette::day());
		assert!(dark.stars.iter().all(|c| !light.stars.contains(c)));
	}

	#[test]
	fn css_keeps_alpha() {
		let c = Color::rgba(10, 20, 30, 0.5);
		assert_eq!(c.to_css(), "rgba(10, 20, 30, 0.5)");
		assert_eq!(c.transparent().to_css(), "rgba(10, 20, 30, 0)");
	}

	#[test]
	fn toggling_flips_scheme() {
		assert_eq!(ColorScheme::Light.toggled(), ColorScheme::Dark);
		assert_eq!(ColorScheme::Dark.toggled().as_str(), "light");
	}
}
