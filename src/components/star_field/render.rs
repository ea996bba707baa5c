//! Drawing primitives for the star field.
//!
//! The simulator only needs four operations from its drawing surface, captured
//! by [`Surface`]. The browser canvas implements it directly; tests substitute
//! a recorder.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A 2D surface the star field can draw onto.
pub trait Surface {
	/// Clears the whole `width` x `height` area.
	fn clear(&mut self, width: f64, height: f64);

	/// Fills a circle with a solid color.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Strokes a round-capped line that fades from `color` at `from` to
	/// transparent at `to`.
	fn stroke_fading_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);

	/// Fills a circle with a radial gradient from `color` at the center to
	/// transparent at `radius`.
	fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_fading_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		let gradient = self.create_linear_gradient(from.0, from.1, to.0, to.1);
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &color.transparent().to_css());

		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		#[allow(deprecated)]
		self.set_stroke_style(&gradient);
		self.set_line_width(width);
		self.set_line_cap("round");
		self.stroke();
	}

	fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &color.transparent().to_css());

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}
