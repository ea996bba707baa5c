//! Leptos component mounting the star field on a full-viewport canvas.
//!
//! The canvas tracks the viewport size. An animation loop runs via
//! `requestAnimationFrame`, stepping and drawing the field each frame. The loop
//! and the window resize listener are owned together by a [`FrameLoop`], so
//! both are released whenever the color scheme changes or the component
//! unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::StarFieldConfig;
use super::field::StarField;
use crate::components::theme::use_color_scheme;

type SharedField = Rc<RefCell<StarField<ChaCha8Rng>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Sizes the canvas to the viewport and returns the new size.
fn resize_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
	let (w, h) = viewport_size(window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	Some((w, h))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn entropy_seed() -> u64 {
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	((js_sys::Date::now() as u64) << 20) ^ noise
}

/// Requests the next animation frame and remembers its handle for cancellation.
fn schedule(animate: &FrameCallback, frame_id: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *animate.borrow() {
		frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
	}
}

/// A running animation loop plus its resize listener. Dropping it cancels the
/// pending frame, removes the listener and frees the frame callback.
struct FrameLoop {
	window: Window,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	on_resize: Closure<dyn FnMut()>,
}

impl FrameLoop {
	fn start(
		window: Window,
		canvas: HtmlCanvasElement,
		mut ctx: CanvasRenderingContext2d,
		field: SharedField,
	) -> Self {
		let field_resize = field.clone();
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some((w, h)) = resize_canvas(&win, &canvas) {
				debug!("star-field: resized to {}x{}", w, h);
				field_resize.borrow_mut().resize(w, h);
			}
		});
		let _ =
			window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let frame_id = Rc::new(Cell::new(None));
		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let (animate_inner, frame_id_inner) = (animate.clone(), frame_id.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			field.borrow_mut().frame(&mut ctx);
			schedule(&animate_inner, &frame_id_inner);
		}));
		schedule(&animate, &frame_id);

		Self {
			window,
			frame_id,
			animate,
			on_resize,
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		// The frame callback holds a handle to itself; release it.
		self.animate.borrow_mut().take();
		debug!("star-field: animation stopped");
	}
}

/// Renders the animated star field behind the page.
///
/// Takes no props: the color scheme comes from the theme context and the
/// tunables from a [`StarFieldConfig`] in context (defaults otherwise). A
/// scheme change tears the animation down and reseeds it with the new palette.
/// Without a 2D context the canvas stays blank.
#[component]
pub fn StarFieldCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scheme = use_color_scheme();
	let config = use_context::<StarFieldConfig>().unwrap_or_default();
	let running = StoredValue::new_local(None::<FrameLoop>);

	Effect::new(move |_| {
		let scheme = scheme.get();
		running.set_value(None);

		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some((w, h)) = resize_canvas(&window, &canvas) else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("star-field: no 2d context, rendering disabled");
			return;
		};

		let seed = config.seed.unwrap_or_else(entropy_seed);
		let field = StarField::new(config.clone(), w, h, scheme, ChaCha8Rng::seed_from_u64(seed));
		info!(
			"star-field: {} stars on {}x{} ({}, seed {})",
			field.particles.len(),
			w,
			h,
			scheme.as_str(),
			seed
		);
		running.set_value(Some(FrameLoop::start(
			window,
			canvas,
			ctx,
			Rc::new(RefCell::new(field)),
		)));
	});

	on_cleanup(move || {
		let _ = running.try_set_value(None);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="star-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -10; pointer-events: none; display: block;"
		/>
	}
}
