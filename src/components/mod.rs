//! UI components.

pub mod star_field;
pub mod theme;
