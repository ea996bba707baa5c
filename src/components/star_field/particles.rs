//! Star particles and their per-frame behavior.

use super::theme::Color;

/// Which way a twinkling star's opacity is currently moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwinkleDirection {
	/// Brightening toward the upper bound.
	Rising,
	/// Dimming toward the lower bound.
	Falling,
}

/// Opacity oscillation between the twinkle bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Twinkle {
	/// Opacity change per frame.
	pub speed: f64,
	/// Current direction of change.
	pub direction: TwinkleDirection,
}

impl Twinkle {
	/// Moves `opacity` one step and flips direction when a bound is reached.
	pub fn step(&mut self, opacity: &mut f64, (min, max): (f64, f64)) {
		match self.direction {
			TwinkleDirection::Rising => {
				*opacity += self.speed;
				if *opacity >= max {
					*opacity = max;
					self.direction = TwinkleDirection::Falling;
				}
			}
			TwinkleDirection::Falling => {
				*opacity -= self.speed;
				if *opacity <= min {
					*opacity = min;
					self.direction = TwinkleDirection::Rising;
				}
			}
		}
	}
}

/// Kind-specific state of a particle.
#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
	/// Small, slow background star.
	Ambient {
		/// Downward speed in pixels per frame.
		speed: f64,
		/// Opacity oscillation.
		twinkle: Twinkle,
	},
	/// Oversized ambient star.
	Bright {
		/// Downward speed in pixels per frame.
		speed: f64,
		/// Opacity oscillation.
		twinkle: Twinkle,
	},
	/// Fast star travelling near-vertically with an optional fading tail.
	Shooting {
		/// Travel speed in pixels per frame.
		speed: f64,
		/// Direction of travel in radians; `PI / 2` is straight down.
		angle: f64,
		/// Tail length in pixels, if the star has a tail.
		tail_length: Option<f64>,
	},
}

/// A single star.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Radius in pixels.
	pub size: f64,
	/// Current opacity.
	pub opacity: f64,
	/// Palette color; its alpha is replaced by `opacity` when drawn.
	pub color: Color,
	/// Kind and kind-specific motion.
	pub kind: ParticleKind,
}

impl Particle {
	/// Color to draw with this frame.
	pub fn current_color(&self) -> Color {
		self.color.with_alpha(self.opacity)
	}

	/// Tail length of a tailed shooting star.
	pub fn tail_length(&self) -> Option<f64> {
		match self.kind {
			ParticleKind::Shooting { tail_length, .. } => tail_length,
			_ => None,
		}
	}

	/// Far end of the tail, trailing behind the direction of travel.
	pub fn tail_end(&self) -> Option<(f64, f64)> {
		match self.kind {
			ParticleKind::Shooting {
				angle,
				tail_length: Some(len),
				..
			} => Some((self.x - angle.cos() * len, self.y - angle.sin() * len)),
			_ => None,
		}
	}

	/// Glow radius, or `None` for stars too small to glow.
	pub fn glow_radius(&self) -> Option<f64> {
		if self.tail_length().is_some() {
			Some(self.size * 3.0)
		} else if self.size > 1.5 {
			Some(self.size * 4.0)
		} else {
			None
		}
	}

	/// Advances the twinkle of ambient and bright stars. Shooting stars keep
	/// a constant opacity.
	pub fn twinkle(&mut self, bounds: (f64, f64)) {
		match &mut self.kind {
			ParticleKind::Ambient { twinkle, .. } | ParticleKind::Bright { twinkle, .. } => {
				twinkle.step(&mut self.opacity, bounds)
			}
			ParticleKind::Shooting { .. } => {}
		}
	}
}
