//! star-field: animated star-field background for a themed landing page.
//!
//! This crate provides a WASM canvas component that renders a twinkling,
//! drifting star field with shooting stars, recolored for the page's light or
//! dark theme, plus the small app shell that hosts it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::star_field::{ColorScheme, StarField, StarFieldCanvas, StarFieldConfig};
pub use components::theme::{ThemePreference, ThemeToggle, provide_theme, use_color_scheme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("star-field: logging initialized");
}

/// Load star-field settings from a script element with id="star-field-config".
/// Expected format: JSON matching [`StarFieldConfig`]; omitted fields keep
/// their defaults and out-of-range counts are clamped.
fn load_config() -> Option<StarFieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("star-field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<StarFieldConfig>(&json_text) {
		Ok(config) => {
			let config = config.clamped();
			info!(
				"star-field: loaded config ({} bright, {} shooting stars)",
				config.bright_count, config.shooting.count
			);
			Some(config)
		}
		Err(e) => {
			warn!("star-field: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Provides the theme and star-field config, then renders the star field
/// behind a landing card.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let theme = provide_theme();
	provide_context(load_config().unwrap_or_default());
	let scheme_name = move || theme.scheme.get().as_str();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=scheme_name attr:class=scheme_name />
		<Title text="Star Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarFieldCanvas />
		<main class="landing">
			<div class="landing-toolbar">
				<ThemeToggle />
			</div>
			<section class="landing-card">
				<h1>"Welcome"</h1>
				<p class="subtitle">"The sky follows your theme. Toggle it to reseed the stars."</p>
			</section>
		</main>
	}
}
