#![forbid(unsafe_code)]

//! Appearance values for Weft.
//!
//! This crate provides:
//! - [`Color`], [`Insets`], [`Font`] building blocks
//! - per-component appearance structs ([`TextAppearance`], [`ButtonAppearance`], ...)
//! - [`LayoutIntent`], the layout request a view hands to its parent
//!
//! All values are plain data with `PartialEq`, so a live view can compare the
//! incoming appearance against the one it applied last and skip the write.

pub mod appearance;
pub mod color;
pub mod layout;

pub use appearance::{
    Axis, ButtonAppearance, ContainerAppearance, ContentMode, Font, FontWeight, ImageAppearance,
    StackAlignment, StackAppearance, TextAlignment, TextAppearance, TextFieldAppearance,
};
pub use color::{Color, ParseColorError};
pub use layout::{Insets, LayoutIntent, Size};
