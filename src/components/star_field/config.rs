//! Tunables for seeding and animating the star field.
//!
//! All sampled quantities are `(min, max)` ranges drawn uniformly. The
//! defaults describe the full effect (ambient, bright and shooting stars);
//! [`StarFieldConfig::simple`] is the calmer variant without shooting stars.

use log::warn;
use serde::{Deserialize, Deserializer};

/// Most stars seeded for any single layer.
pub const MAX_LAYER_STARS: usize = 20_000;

/// Smallest surface area (in square pixels) accepted per ambient star.
pub const MIN_AREA_PER_STAR: f64 = 100.0;

/// Sampling ranges for one layer of twinkling stars.
#[derive(Clone, Debug, PartialEq)]
pub struct StarLayerConfig {
	/// Radius in pixels.
	pub size: (f64, f64),
	/// Downward speed in pixels per frame.
	pub speed: (f64, f64),
	/// Starting opacity.
	pub opacity: (f64, f64),
	/// Opacity change per frame.
	pub twinkle_speed: (f64, f64),
}

impl StarLayerConfig {
	/// Small, slow background stars.
	pub fn ambient() -> Self {
		Self {
			size: (0.5, 2.5),
			speed: (0.05, 0.20),
			opacity: (0.5, 1.0),
			twinkle_speed: (0.01, 0.04),
		}
	}

	/// Oversized, brighter stars.
	pub fn bright() -> Self {
		Self {
			size: (2.5, 4.5),
			speed: (0.02, 0.10),
			opacity: (0.7, 1.0),
			twinkle_speed: (0.02, 0.07),
		}
	}
}

/// A layer as written in JSON. Omitted keys keep the layer's own preset.
#[derive(Default, Deserialize)]
#[serde(default)]
struct LayerOverrides {
	size: Option<(f64, f64)>,
	speed: Option<(f64, f64)>,
	opacity: Option<(f64, f64)>,
	twinkle_speed: Option<(f64, f64)>,
}

impl LayerOverrides {
	fn apply(self, base: StarLayerConfig) -> StarLayerConfig {
		StarLayerConfig {
			size: self.size.unwrap_or(base.size),
			speed: self.speed.unwrap_or(base.speed),
			opacity: self.opacity.unwrap_or(base.opacity),
			twinkle_speed: self.twinkle_speed.unwrap_or(base.twinkle_speed),
		}
	}
}

fn ambient_layer<'de, D: Deserializer<'de>>(d: D) -> Result<StarLayerConfig, D::Error> {
	Ok(LayerOverrides::deserialize(d)?.apply(StarLayerConfig::ambient()))
}

fn bright_layer<'de, D: Deserializer<'de>>(d: D) -> Result<StarLayerConfig, D::Error> {
	Ok(LayerOverrides::deserialize(d)?.apply(StarLayerConfig::bright()))
}

/// Sampling ranges for shooting stars.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShootingStarConfig {
	/// Number of shooting stars; 0 disables them.
	pub count: usize,
	/// Radius in pixels.
	pub size: (f64, f64),
	/// Travel speed in pixels per frame.
	pub speed: (f64, f64),
	/// Constant opacity, drawn again on every respawn.
	pub opacity: (f64, f64),
	/// Tail length in pixels.
	pub tail_length: (f64, f64),
	/// Maximum deviation from straight down, in degrees.
	pub spread_degrees: f64,
	/// Distance past the side and top edges allowed before respawning.
	pub edge_margin: f64,
	/// Vertical position new shooting stars respawn at.
	pub respawn_y: f64,
}

impl Default for ShootingStarConfig {
	fn default() -> Self {
		Self {
			count: 15,
			size: (1.5, 3.5),
			speed: (2.0, 5.0),
			opacity: (0.7, 1.0),
			tail_length: (50.0, 150.0),
			spread_degrees: 30.0,
			edge_margin: 100.0,
			respawn_y: -50.0,
		}
	}
}

/// Complete star-field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
	/// Surface area (in square pixels) per ambient star.
	pub area_per_star: f64,
	/// Ambient layer ranges.
	#[serde(deserialize_with = "ambient_layer")]
	pub ambient: StarLayerConfig,
	/// Number of bright stars.
	pub bright_count: usize,
	/// Bright layer ranges.
	#[serde(deserialize_with = "bright_layer")]
	pub bright: StarLayerConfig,
	/// Shooting-star settings.
	pub shooting: ShootingStarConfig,
	/// Twinkle clamp bounds `(min, max)` for ambient and bright stars.
	pub twinkle_bounds: (f64, f64),
	/// Clock increment per frame driving the horizontal sway.
	pub sway_step: f64,
	/// Horizontal sway amplitude in pixels per frame.
	pub sway_amplitude: f64,
	/// How strongly the sway phase depends on vertical position.
	pub sway_frequency: f64,
	/// Fixed RNG seed. When unset, the component seeds from browser entropy.
	pub seed: Option<u64>,
}

impl Default for StarFieldConfig {
	fn default() -> Self {
		Self {
			area_per_star: 1500.0,
			ambient: StarLayerConfig::ambient(),
			bright_count: 5,
			bright: StarLayerConfig::bright(),
			shooting: ShootingStarConfig::default(),
			twinkle_bounds: (0.2, 1.0),
			sway_step: 0.01,
			sway_amplitude: 0.2,
			sway_frequency: 0.05,
			seed: None,
		}
	}
}

impl StarFieldConfig {
	/// Ambient and bright stars only, with slightly smaller ambient stars.
	pub fn simple() -> Self {
		Self {
			ambient: StarLayerConfig {
				size: (0.5, 2.0),
				..StarLayerConfig::ambient()
			},
			shooting: ShootingStarConfig {
				count: 0,
				..ShootingStarConfig::default()
			},
			..Self::default()
		}
	}

	/// Pulls star counts and density back into supported bounds, warning about
	/// each value it changes.
	pub fn clamped(mut self) -> Self {
		if self.area_per_star > 0.0 && self.area_per_star < MIN_AREA_PER_STAR {
			warn!(
				"star-field: area_per_star {} below {}, raising it",
				self.area_per_star, MIN_AREA_PER_STAR
			);
			self.area_per_star = MIN_AREA_PER_STAR;
		}
		if self.bright_count > MAX_LAYER_STARS {
			warn!("star-field: bright_count {} capped at {}", self.bright_count, MAX_LAYER_STARS);
			self.bright_count = MAX_LAYER_STARS;
		}
		if self.shooting.count > MAX_LAYER_STARS {
			warn!(
				"star-field: shooting.count {} capped at {}",
				self.shooting.count, MAX_LAYER_STARS
			);
			self.shooting.count = MAX_LAYER_STARS;
		}
		self
	}

	/// Number of ambient stars for a surface of the given size.
	pub fn ambient_count(&self, width: f64, height: f64) -> usize {
		if self.area_per_star.is_nan() || self.area_per_star <= 0.0 || width <= 0.0 || height <= 0.0
		{
			return 0;
		}
		let area = self.area_per_star.max(MIN_AREA_PER_STAR);
		((width * height / area).floor() as usize).min(MAX_LAYER_STARS)
	}

	/// Number of bright stars to seed.
	pub fn bright_count(&self) -> usize {
		self.bright_count.min(MAX_LAYER_STARS)
	}

	/// Number of shooting stars to seed.
	pub fn shooting_count(&self) -> usize {
		self.shooting.count.min(MAX_LAYER_STARS)
	}
}
