//! Page components.

pub mod ambient;
pub mod dust_text;
