//! Detects and fixes text typed with the wrong keyboard layout (Arabic/English)
//! inside host text surfaces, with bounded undo.

pub mod clock;
pub mod config;
pub mod control;
pub mod correction;
pub mod domain;
pub mod surface;
pub mod util;

pub use layout_fixer_core::text::mapping::{ConversionDirection, Script};

#[cfg(test)]
mod tests;
