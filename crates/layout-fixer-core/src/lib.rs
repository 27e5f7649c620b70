//! Same-key character mapping between the Arabic and English QWERTY layouts.

pub mod text;

pub use text::mapping::{
    ConversionDirection, Script, convert, convert_with_direction, direction_for_text,
};
