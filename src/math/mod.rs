pub mod color;
pub mod color_parse;
pub mod hex;
pub mod wcag;

pub use color::Color;
