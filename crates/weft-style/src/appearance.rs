#![forbid(unsafe_code)]

//! Per-component appearance values.
//!
//! Each appearance exposes [`layout`](TextAppearance::layout) so a view can
//! tell a purely visual change (color, font) from one that needs the layout
//! intent re-applied.

use crate::color::Color;
use crate::layout::{Insets, LayoutIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    #[must_use]
    pub const fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }

    #[must_use]
    pub const fn body() -> Self {
        Self::new(17.0, FontWeight::Regular)
    }

    #[must_use]
    pub const fn headline() -> Self {
        Self::new(17.0, FontWeight::Bold)
    }

    #[must_use]
    pub const fn caption() -> Self {
        Self::new(12.0, FontWeight::Regular)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::body()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentMode {
    #[default]
    Fit,
    Fill,
    Stretch,
}

/// Main axis of an ordered stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Cross-axis alignment of stack children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackAlignment {
    Leading,
    #[default]
    Center,
    Trailing,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextAppearance {
    pub color: Color,
    pub font: Font,
    pub alignment: TextAlignment,
    /// Maximum number of lines; `None` means unlimited.
    pub line_limit: Option<u16>,
    pub layout: LayoutIntent,
}

impl Default for TextAppearance {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font: Font::body(),
            alignment: TextAlignment::Leading,
            line_limit: None,
            layout: LayoutIntent::Automatic,
        }
    }
}

impl TextAppearance {
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn line_limit(mut self, lines: u16) -> Self {
        self.line_limit = Some(lines);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutIntent) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutIntent {
        self.layout
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonAppearance {
    pub title: TextAppearance,
    pub background: Color,
    pub corner_radius: f32,
    /// Opacity applied while the button is disabled, in `[0.0, 1.0]`.
    pub disabled_opacity: f32,
    pub content_insets: Insets,
    pub layout: LayoutIntent,
}

impl Default for ButtonAppearance {
    fn default() -> Self {
        Self {
            title: TextAppearance::default().color(Color::BLUE),
            background: Color::CLEAR,
            corner_radius: 0.0,
            disabled_opacity: 0.4,
            content_insets: Insets::symmetric(6.0, 12.0),
            layout: LayoutIntent::Automatic,
        }
    }
}

impl ButtonAppearance {
    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutIntent {
        self.layout
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageAppearance {
    pub content_mode: ContentMode,
    pub tint: Option<Color>,
    pub layout: LayoutIntent,
}

impl ImageAppearance {
    #[must_use]
    pub fn tint(mut self, color: Color) -> Self {
        self.tint = Some(color);
        self
    }

    #[must_use]
    pub fn content_mode(mut self, mode: ContentMode) -> Self {
        self.content_mode = mode;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutIntent {
        self.layout
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFieldAppearance {
    pub text: TextAppearance,
    pub placeholder_color: Color,
    pub border: Color,
    pub layout: LayoutIntent,
}

impl Default for TextFieldAppearance {
    fn default() -> Self {
        Self {
            text: TextAppearance::default(),
            placeholder_color: Color::GRAY,
            border: Color::LIGHT_GRAY,
            layout: LayoutIntent::Automatic,
        }
    }
}

impl TextFieldAppearance {
    #[must_use]
    pub const fn layout(&self) -> LayoutIntent {
        self.layout
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackAppearance {
    pub spacing: f32,
    pub alignment: StackAlignment,
    pub background: Color,
    pub layout: LayoutIntent,
}

impl Default for StackAppearance {
    fn default() -> Self {
        Self {
            spacing: 8.0,
            alignment: StackAlignment::Center,
            background: Color::CLEAR,
            layout: LayoutIntent::Automatic,
        }
    }
}

impl StackAppearance {
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: StackAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutIntent {
        self.layout
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerAppearance {
    pub background: Color,
    pub corner_radius: f32,
    pub layout: LayoutIntent,
}

impl Default for ContainerAppearance {
    fn default() -> Self {
        Self {
            background: Color::CLEAR,
            corner_radius: 0.0,
            layout: LayoutIntent::fill(),
        }
    }
}

impl ContainerAppearance {
    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn padding(mut self, insets: Insets) -> Self {
        self.layout = LayoutIntent::Fill { insets };
        self
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutIntent {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_change_keeps_layout() {
        let a = TextAppearance::default();
        let b = a.color(Color::RED);
        assert_ne!(a, b);
        assert_eq!(a.layout(), b.layout());
    }

    #[test]
    fn container_padding_changes_layout() {
        let a = ContainerAppearance::default();
        let b = a.padding(Insets::all(4.0));
        assert_ne!(a.layout(), b.layout());
        assert_eq!(
            b.layout(),
            LayoutIntent::Fill {
                insets: Insets::all(4.0)
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn appearance_serializes() {
        let a = StackAppearance::default().spacing(2.0);
        let json = serde_json::to_string(&a).unwrap();
        let back: StackAppearance = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
