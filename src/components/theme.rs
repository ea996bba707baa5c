//! Page theme: the user's light/dark preference and the scheme it resolves to.
//!
//! The preference is remembered in `localStorage`. `System` follows the
//! browser's `prefers-color-scheme` as read at startup.

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{Storage, Window};

use super::star_field::ColorScheme;

/// `localStorage` key holding the saved preference.
pub const STORAGE_KEY: &str = "star-field-theme";

/// What the user asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
	/// Always light.
	Light,
	/// Always dark.
	Dark,
	/// Follow the browser's `prefers-color-scheme`.
	#[default]
	System,
}

impl ThemePreference {
	/// Parses a saved preference name.
	pub fn from_name(name: &str) -> Option<Self> {
		match name.trim() {
			"light" => Some(ThemePreference::Light),
			"dark" => Some(ThemePreference::Dark),
			"system" => Some(ThemePreference::System),
			_ => None,
		}
	}

	/// Name stored in `localStorage`.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemePreference::Light => "light",
			ThemePreference::Dark => "dark",
			ThemePreference::System => "system",
		}
	}

	/// Scheme to render, given whether the browser prefers dark.
	pub fn resolve(self, system_dark: bool) -> ColorScheme {
		match self {
			ThemePreference::Light => ColorScheme::Light,
			ThemePreference::Dark => ColorScheme::Dark,
			ThemePreference::System if system_dark => ColorScheme::Dark,
			ThemePreference::System => ColorScheme::Light,
		}
	}
}

impl From<ColorScheme> for ThemePreference {
	fn from(scheme: ColorScheme) -> Self {
		match scheme {
			ColorScheme::Light => ThemePreference::Light,
			ColorScheme::Dark => ThemePreference::Dark,
		}
	}
}

/// Theme state shared through Leptos context.
#[derive(Clone, Copy, Debug)]
pub struct ThemeContext {
	/// The user's saved preference.
	pub preference: RwSignal<ThemePreference>,
	/// The scheme the preference resolves to.
	pub scheme: Signal<ColorScheme>,
}

fn local_storage(window: &Window) -> Option<Storage> {
	window.local_storage().ok()?
}

fn load_preference() -> Option<ThemePreference> {
	let window = web_sys::window()?;
	let saved = local_storage(&window)?.get_item(STORAGE_KEY).ok()??;
	let preference = ThemePreference::from_name(&saved);
	if preference.is_none() {
		warn!("star-field: ignoring unknown saved theme {:?}", saved);
	}
	preference
}

fn store_preference(preference: ThemePreference) {
	let Some(storage) = web_sys::window().and_then(|w| local_storage(&w)) else {
		return;
	};
	let _ = storage.set_item(STORAGE_KEY, preference.as_str());
}

fn prefers_dark() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok()?)
		.map(|mq| mq.matches())
		.unwrap_or(true)
}

/// Creates the theme state from the saved preference and provides it as context.
pub fn provide_theme() -> ThemeContext {
	let preference = RwSignal::new(load_preference().unwrap_or_default());
	let system_dark = prefers_dark();
	let scheme = Signal::derive(move || preference.get().resolve(system_dark));

	Effect::new(move |_| {
		let preference = preference.get();
		debug!("star-field: theme preference {}", preference.as_str());
		store_preference(preference);
	});

	let theme = ThemeContext { preference, scheme };
	provide_context(theme);
	theme
}

/// The active color scheme, or the dark default outside a theme provider.
pub fn use_color_scheme() -> Signal<ColorScheme> {
	use_context::<ThemeContext>()
		.map(|theme| theme.scheme)
		.unwrap_or_else(|| Signal::stored(ColorScheme::default()))
}

/// Button switching between the light and dark schemes.
#[component]
pub fn ThemeToggle() -> impl IntoView {
	let theme = use_context::<ThemeContext>();
	let scheme = use_color_scheme();

	let on_click = move |_| {
		if let Some(theme) = theme {
			theme.preference.set(scheme.get_untracked().toggled().into());
		}
	};
	let label = move || match scheme.get() {
		ColorScheme::Dark => "Light mode",
		ColorScheme::Light => "Dark mode",
	};

	view! {
		<button class="theme-toggle" aria-label="Toggle theme" on:click=on_click>
			{label}
		</button>
	}
}
