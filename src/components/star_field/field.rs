//! Star-field simulation: seeding and the per-frame stepper.
//!
//! The field owns its particles, its random source and a frame clock. Motion is
//! expressed per frame rather than per second, so the animation speed follows
//! the display refresh rate.

use std::f64::consts::FRAC_PI_2;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::config::{ShootingStarConfig, StarFieldConfig, StarLayerConfig};
use super::particles::{Particle, ParticleKind, Twinkle, TwinkleDirection};
use super::render::Surface;
use super::theme::{Color, ColorScheme, StarPalette};

/// Draws uniformly from `[min, max)`. Degenerate ranges yield `min`.
fn sample<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
	min + rng.r#gen::<f64>() * (max - min)
}

/// Draws a travel angle within the configured spread around straight down.
fn sample_angle<R: Rng>(rng: &mut R, spread_degrees: f64) -> f64 {
	let spread = spread_degrees.to_radians();
	FRAC_PI_2 + sample(rng, (-spread, spread))
}

/// An animated star field for a surface of a given size.
pub struct StarField<R: Rng> {
	/// Stars in draw order: ambient, then bright, then shooting.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	scheme: ColorScheme,
	palette: StarPalette,
	config: StarFieldConfig,
	/// Frame clock driving the horizontal sway.
	time: f64,
	rng: R,
}

impl<R: Rng> StarField<R> {
	/// Creates and seeds a field for the given surface size and scheme.
	pub fn new(
		config: StarFieldConfig,
		width: f64,
		height: f64,
		scheme: ColorScheme,
		rng: R,
	) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			width,
			height,
			scheme,
			palette: StarPalette::for_scheme(scheme),
			config,
			time: 0.0,
			rng,
		};
		field.reseed(scheme);
		field
	}

	/// Surface width in pixels.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height in pixels.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Scheme the current particles were colored for.
	pub fn scheme(&self) -> ColorScheme {
		self.scheme
	}

	/// Palette the current particles were colored from.
	pub fn palette(&self) -> &StarPalette {
		&self.palette
	}

	/// Frame clock, reset on every reseed.
	pub fn time(&self) -> f64 {
		self.time
	}

	/// Discards every particle and seeds a fresh set for the current surface
	/// size, colored for `scheme`. Resets the frame clock.
	pub fn reseed(&mut self, scheme: ColorScheme) {
		self.scheme = scheme;
		self.palette = StarPalette::for_scheme(scheme);
		self.time = 0.0;

		let ambient_count = self.config.ambient_count(self.width, self.height);
		let bright_count = self.config.bright_count();
		let shooting_count = self.config.shooting_count();
		let mut particles = Vec::with_capacity(ambient_count + bright_count + shooting_count);

		let layer = self.config.ambient.clone();
		for _ in 0..ambient_count {
			// Bias toward the top so the first frames are not bottom-heavy.
			let y = self.height * self.rng.r#gen::<f64>().powf(1.5);
			let (size, speed, opacity, twinkle, color) = self.sample_layer(&layer);
			particles.push(Particle {
				x: sample(&mut self.rng, (0.0, self.width)),
				y,
				size,
				opacity,
				color,
				kind: ParticleKind::Ambient { speed, twinkle },
			});
		}

		let layer = self.config.bright.clone();
		for _ in 0..bright_count {
			let x = sample(&mut self.rng, (0.0, self.width));
			let y = sample(&mut self.rng, (0.0, self.height));
			let (size, speed, opacity, twinkle, color) = self.sample_layer(&layer);
			particles.push(Particle {
				x,
				y,
				size,
				opacity,
				color,
				kind: ParticleKind::Bright { speed, twinkle },
			});
		}

		for _ in 0..shooting_count {
			particles.push(self.spawn_shooting_star());
		}

		debug!(
			"star-field: seeded {} ambient, {} bright, {} shooting stars ({}x{}, {})",
			ambient_count,
			bright_count,
			shooting_count,
			self.width,
			self.height,
			scheme.as_str()
		);
		self.particles = particles;
	}

	/// Updates the surface size read by the stepper. Existing particles are
	/// kept; they drift back into range through the normal reset rules.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Runs one animation frame: clears the surface, then twinkles, draws and
	/// moves every particle in order.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		surface.clear(self.width, self.height);

		let mut particles = std::mem::take(&mut self.particles);
		for p in &mut particles {
			p.twinkle(self.config.twinkle_bounds);
			Self::draw(p, surface);
			self.advance(p);
		}
		self.particles = particles;

		self.time += self.config.sway_step;
	}

	fn draw<S: Surface + ?Sized>(p: &Particle, surface: &mut S) {
		let color = p.current_color();
		if let Some(end) = p.tail_end() {
			surface.stroke_fading_line((p.x, p.y), end, p.size, color);
		}
		surface.fill_circle(p.x, p.y, p.size, color);
		if let Some(radius) = p.glow_radius() {
			surface.fill_glow(p.x, p.y, radius, color);
		}
	}

	fn advance(&mut self, p: &mut Particle) {
		match p.kind {
			ParticleKind::Ambient { speed, .. } | ParticleKind::Bright { speed, .. } => {
				p.y += speed;
				let phase = self.time + p.y * self.config.sway_frequency;
				p.x += phase.sin() * self.config.sway_amplitude;
				if p.y > self.height {
					p.y = 0.0;
					p.x = sample(&mut self.rng, (0.0, self.width));
				}
			}
			ParticleKind::Shooting { speed, angle, .. } => {
				p.x += angle.cos() * speed;
				p.y += angle.sin() * speed;
				let margin = self.config.shooting.edge_margin;
				let outside_x = p.x < -margin || p.x > self.width + margin;
				if outside_x || p.y > self.height || p.y < -margin {
					self.respawn_shooting_star(p);
				}
			}
		}
	}

	fn sample_layer(&mut self, layer: &StarLayerConfig) -> (f64, f64, f64, Twinkle, Color) {
		let size = sample(&mut self.rng, layer.size);
		let speed = sample(&mut self.rng, layer.speed);
		let opacity = sample(&mut self.rng, layer.opacity);
		let twinkle = Twinkle {
			speed: sample(&mut self.rng, layer.twinkle_speed),
			direction: if self.rng.gen_bool(0.5) {
				TwinkleDirection::Rising
			} else {
				TwinkleDirection::Falling
			},
		};
		let color = *self
			.palette
			.stars
			.choose(&mut self.rng)
			.unwrap_or(&self.palette.shooting);
		(size, speed, opacity, twinkle, color)
	}

	fn spawn_shooting_star(&mut self) -> Particle {
		let ShootingStarConfig {
			size,
			speed,
			opacity,
			tail_length,
			spread_degrees,
			respawn_y,
			..
		} = self.config.shooting;
		Particle {
			x: sample(&mut self.rng, (0.0, self.width)),
			y: sample(&mut self.rng, (respawn_y, self.height * 0.5 + respawn_y)),
			size: sample(&mut self.rng, size),
			opacity: sample(&mut self.rng, opacity),
			color: self.palette.shooting,
			kind: ParticleKind::Shooting {
				speed: sample(&mut self.rng, speed),
				angle: sample_angle(&mut self.rng, spread_degrees),
				tail_length: Some(sample(&mut self.rng, tail_length)),
			},
		}
	}

	fn respawn_shooting_star(&mut self, p: &mut Particle) {
		let shooting = &self.config.shooting;
		let (spread, tail_range, opacity_range) =
			(shooting.spread_degrees, shooting.tail_length, shooting.opacity);
		p.x = sample(&mut self.rng, (0.0, self.width));
		p.y = shooting.respawn_y;
		p.opacity = sample(&mut self.rng, opacity_range);
		if let ParticleKind::Shooting {
			angle, tail_length, ..
		} = &mut p.kind
		{
			*angle = sample_angle(&mut self.rng, spread);
			*tail_length = Some(sample(&mut self.rng, tail_range));
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use super::super::config::MAX_LAYER_STARS;
	use super::super::render::recording::{DrawCall, RecordingSurface};
	use super::*;

	fn field(config: StarFieldConfig, scheme: ColorScheme, seed: u64) -> StarField<ChaCha8Rng> {
		StarField::new(config, 800.0, 600.0, scheme, ChaCha8Rng::seed_from_u64(seed))
	}

	fn count(field: &StarField<ChaCha8Rng>, pred: fn(&ParticleKind) -> bool) -> usize {
		field.particles.iter().filter(|p| pred(&p.kind)).count()
	}

	fn shooting_angle_degrees(p: &Particle) -> Option<f64> {
		match p.kind {
			ParticleKind::Shooting { angle, .. } => Some(angle.to_degrees()),
			_ => None,
		}
	}

	#[test]
	fn seeds_expected_counts_for_800x600() {
		let f = field(StarFieldConfig::default(), ColorScheme::Dark, 1);
		assert_eq!(count(&f, |k| matches!(k, ParticleKind::Ambient { .. })), 320);
		assert_eq!(count(&f, |k| matches!(k, ParticleKind::Bright { .. })), 5);
		assert_eq!(count(&f, |k| matches!(k, ParticleKind::Shooting { .. })), 15);
		assert_eq!(f.particles.len(), 340);

		let simple = field(StarFieldConfig::simple(), ColorScheme::Dark, 1);
		assert_eq!(simple.particles.len(), 325);
	}

	#[test]
	fn particles_are_ordered_by_layer() {
		let f = field(StarFieldConfig::default(), ColorScheme::Dark, 2);
		assert!(f.particles[..320].iter().all(|p| matches!(p.kind, ParticleKind::Ambient { .. })));
		let bright = &f.particles[320..325];
		assert!(bright.iter().all(|p| matches!(p.kind, ParticleKind::Bright { .. })));
		assert!(f.particles[325..].iter().all(|p| matches!(p.kind, ParticleKind::Shooting { .. })));
	}

	#[test]
	fn seeded_values_fall_in_their_ranges() {
		let config = StarFieldConfig::default();
		let f = field(config.clone(), ColorScheme::Dark, 3);
		let palette = StarPalette::night();
		for p in &f.particles {
			match p.kind {
				ParticleKind::Ambient { speed, twinkle } => {
					assert!((0.0..=800.0).contains(&p.x));
					assert!((0.0..=600.0).contains(&p.y));
					assert!((0.5..=2.5).contains(&p.size));
					assert!((0.05..=0.20).contains(&speed));
					assert!((0.5..=1.0).contains(&p.opacity));
					assert!((0.01..=0.04).contains(&twinkle.speed));
					assert!(palette.stars.contains(&p.color));
				}
				ParticleKind::Bright { speed, twinkle } => {
					assert!((2.5..=4.5).contains(&p.size));
					assert!((0.02..=0.10).contains(&speed));
					assert!((0.7..=1.0).contains(&p.opacity));
					assert!((0.02..=0.07).contains(&twinkle.speed));
					assert!(palette.stars.contains(&p.color));
				}
				ParticleKind::Shooting {
					speed, tail_length, ..
				} => {
					assert!((-50.0..=250.0).contains(&p.y));
					assert!((1.5..=3.5).contains(&p.size));
					assert!((2.0..=5.0).contains(&speed));
					assert!((0.7..=1.0).contains(&p.opacity));
					assert!((50.0..=150.0).contains(&tail_length.unwrap()));
					assert_eq!(p.color, palette.shooting);
				}
			}
		}
	}

	#[test]
	fn ambient_seed_is_biased_toward_top() {
		let f = field(StarFieldConfig::default(), ColorScheme::Dark, 4);
		let ambient: Vec<_> = f.particles[..320].iter().map(|p| p.y).collect();
		let top_half = ambient.iter().filter(|&&y| y < 300.0).count();
		// P(U^1.5 < 0.5) = 0.5^(2/3) ~ 0.63
		assert!(top_half > 170, "only {top_half} of 320 in the top half");
	}

	#[test]
	fn opacity_stays_within_twinkle_bounds() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 5);
		let mut surface = RecordingSurface::default();
		for _ in 0..500 {
			f.frame(&mut surface);
			surface.calls.clear();
			for p in &f.particles {
				match p.kind {
					ParticleKind::Shooting { .. } => assert!((0.7..=1.0).contains(&p.opacity)),
					_ => assert!((0.2..=1.0).contains(&p.opacity)),
				}
			}
		}
	}

	#[test]
	fn shooting_angles_stay_near_vertical_across_respawns() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 6);
		let mut surface = RecordingSurface::default();
		let mut respawns = 0;
		for _ in 0..600 {
			let before: Vec<_> = f.particles.iter().filter_map(shooting_angle_degrees).collect();
			f.frame(&mut surface);
			surface.calls.clear();
			let after: Vec<_> = f.particles.iter().filter_map(shooting_angle_degrees).collect();
			respawns += before.iter().zip(&after).filter(|(a, b)| a != b).count();
			for angle in after {
				assert!((60.0 - 1e-9..=120.0 + 1e-9).contains(&angle), "angle {angle}");
			}
		}
		assert!(respawns > 0);
	}

	#[test]
	fn shooting_star_respawns_at_top_after_leaving() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 7);
		let idx = f.particles.len() - 1;
		f.particles[idx].y = 599.0;
		f.particles[idx].x = 400.0;
		f.frame(&mut RecordingSurface::default());
		let p = &f.particles[idx];
		assert_eq!(p.y, -50.0);
		assert!((0.0..=800.0).contains(&p.x));
		assert!((0.7..=1.0).contains(&p.opacity));
	}

	#[test]
	fn falling_stars_reset_to_top_within_the_frame() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 8);
		f.particles[0].y = 599.99;
		f.particles[321].y = 599.99;
		let mut surface = RecordingSurface::default();
		for _ in 0..2000 {
			f.frame(&mut surface);
			surface.calls.clear();
			for p in &f.particles {
				if !matches!(p.kind, ParticleKind::Shooting { .. }) {
					assert!(p.y <= 600.0);
				}
			}
		}
		assert!(f.particles[0].y < 599.99);
	}

	#[test]
	fn exiting_star_is_reset_to_zero() {
		let mut f = field(StarFieldConfig::simple(), ColorScheme::Dark, 9);
		f.particles[0].y = 600.0;
		f.frame(&mut RecordingSurface::default());
		assert_eq!(f.particles[0].y, 0.0);
		assert!((0.0..=800.0).contains(&f.particles[0].x));
	}

	#[test]
	fn same_seed_gives_same_trajectories() {
		let mut a = field(StarFieldConfig::default(), ColorScheme::Dark, 42);
		let mut b = field(StarFieldConfig::default(), ColorScheme::Dark, 42);
		let (mut sa, mut sb) = (RecordingSurface::default(), RecordingSurface::default());
		for _ in 0..200 {
			a.frame(&mut sa);
			b.frame(&mut sb);
			assert_eq!(a.particles, b.particles);
		}
		assert_eq!(sa.calls, sb.calls);

		let c = field(StarFieldConfig::default(), ColorScheme::Dark, 43);
		assert_ne!(field(StarFieldConfig::default(), ColorScheme::Dark, 42).particles, c.particles);
	}

	#[test]
	fn frame_clears_then_draws_in_order() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 10);
		let mut surface = RecordingSurface::default();
		f.frame(&mut surface);

		assert_eq!(
			surface.calls[0],
			DrawCall::Clear {
				width: 800.0,
				height: 600.0
			}
		);
		let circles = surface
			.calls
			.iter()
			.filter(|c| matches!(c, DrawCall::Circle { .. }))
			.count();
		let tails = surface
			.calls
			.iter()
			.filter(|c| matches!(c, DrawCall::Tail { .. }))
			.count();
		assert_eq!(circles, 340);
		assert_eq!(tails, 15);

		// Every tail is immediately followed by its body and glow.
		for (i, call) in surface.calls.iter().enumerate() {
			if let DrawCall::Tail { from, width, .. } = call {
				let DrawCall::Circle { x, y, radius, .. } = &surface.calls[i + 1] else {
					panic!("tail not followed by body");
				};
				assert_eq!((*x, *y), *from);
				assert_eq!(radius, width);
				let DrawCall::Glow { radius: glow, .. } = &surface.calls[i + 2] else {
					panic!("tailed star without glow");
				};
				assert!((glow - radius * 3.0).abs() < 1e-12);
			}
		}
	}

	#[test]
	fn draw_colors_use_current_opacity() {
		let mut f = field(StarFieldConfig::simple(), ColorScheme::Dark, 11);
		let mut surface = RecordingSurface::default();
		f.frame(&mut surface);
		let DrawCall::Circle { color, .. } = &surface.calls[1] else {
			panic!("expected body");
		};
		assert_eq!(color.a, f.particles[0].opacity);
	}

	#[test]
	fn clock_advances_once_per_frame() {
		let mut f = field(StarFieldConfig::simple(), ColorScheme::Dark, 12);
		let mut surface = RecordingSurface::default();
		for _ in 0..10 {
			f.frame(&mut surface);
		}
		assert!((f.time() - 0.1).abs() < 1e-9);
	}

	#[test]
	fn resize_keeps_particles() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 13);
		let before = f.particles.clone();
		f.resize(1024.0, 768.0);
		assert_eq!(f.particles, before);
		assert_eq!((f.width(), f.height()), (1024.0, 768.0));

		let mut surface = RecordingSurface::default();
		f.frame(&mut surface);
		assert_eq!(
			surface.calls[0],
			DrawCall::Clear {
				width: 1024.0,
				height: 768.0
			}
		);
	}

	#[test]
	fn theme_switch_reseeds_with_new_palette() {
		let mut f = field(StarFieldConfig::default(), ColorScheme::Dark, 14);
		f.frame(&mut RecordingSurface::default());
		let count = f.particles.len();

		f.reseed(ColorScheme::Light);
		let day = StarPalette::day();
		assert_eq!(f.scheme(), ColorScheme::Light);
		assert_eq!(f.palette(), &day);
		assert_eq!(f.particles.len(), count);
		assert_eq!(f.time(), 0.0);
		for p in &f.particles {
			match p.kind {
				ParticleKind::Shooting { .. } => assert_eq!(p.color, day.shooting),
				_ => assert!(day.stars.contains(&p.color)),
			}
		}
	}

	#[test]
	fn absurd_counts_seed_a_bounded_field() {
		let mut config = StarFieldConfig::default();
		config.area_per_star = 1e-9;
		config.bright_count = usize::MAX;
		config.shooting.count = usize::MAX;
		let rng = ChaCha8Rng::seed_from_u64(16);
		let f = StarField::new(config, 100.0, 100.0, ColorScheme::Dark, rng);
		assert_eq!(f.particles.len(), 100 + 2 * MAX_LAYER_STARS);
	}

	#[test]
	fn empty_surface_has_only_fixed_layers() {
		let f = StarField::new(
			StarFieldConfig::default(),
			0.0,
			0.0,
			ColorScheme::Light,
			ChaCha8Rng::seed_from_u64(15),
		);
		assert_eq!(f.particles.len(), 20);
	}
}
