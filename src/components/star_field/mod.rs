//! Animated star-field background.
//!
//! Renders a layered field of stars on a full-viewport HTML canvas:
//! - Ambient stars sized to the viewport area, twinkling and drifting down
//! - A handful of oversized bright stars
//! - Shooting stars with fading tails that respawn after leaving the screen
//!
//! Colors follow the page's light/dark scheme; changing the scheme reseeds
//! the whole field.
//!
//! # Example
//!
//! ```ignore
//! use star_field::{StarFieldCanvas, StarFieldConfig};
//!
//! provide_context(StarFieldConfig::simple());
//! view! { <StarFieldCanvas /> }
//! ```

mod component;
mod config;
mod field;
mod particles;
mod render;
mod theme;

pub use component::StarFieldCanvas;
pub use config::{
	MAX_LAYER_STARS, MIN_AREA_PER_STAR, ShootingStarConfig, StarFieldConfig, StarLayerConfig,
};
pub use field::StarField;
pub use particles::{Particle, ParticleKind, Twinkle, TwinkleDirection};
pub use render::Surface;
pub use theme::{Color, ColorScheme, StarPalette};
