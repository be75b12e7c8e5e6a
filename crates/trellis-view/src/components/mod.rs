//! Widget property, style, and change-set types, one module per widget.

pub mod button;
pub mod carousel;
pub mod collection;
pub mod image;
pub mod label;
pub mod map_view;
pub mod progress;
pub mod segmented;
pub mod spinner;
pub mod table;
pub mod text_field;
pub mod text_view;
