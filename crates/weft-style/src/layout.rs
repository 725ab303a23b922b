#![forbid(unsafe_code)]

//! Layout intent: what a view asks of its parent, not how it is solved.

/// Edge insets in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    pub const ZERO: Self = Self::all(0.0);

    #[must_use]
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            left: v,
            bottom: v,
            right: v,
        }
    }

    #[must_use]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A fixed size in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// How a view wants to be placed inside its parent.
///
/// The layout engine that turns this into constraints lives outside Weft;
/// views only hand the intent over on materialize and when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutIntent {
    /// Let the parent container decide (stack arrangement, cell content).
    #[default]
    Automatic,
    /// Stretch to the parent's edges, inset by `insets`.
    Fill { insets: Insets },
    /// Center in the parent, optionally with a fixed size.
    Center { size: Option<Size> },
    /// Pin to the parent's edges with insets and an optional fixed size.
    Pinned { insets: Insets, size: Option<Size> },
}

impl LayoutIntent {
    /// `Fill` with no insets.
    #[must_use]
    pub const fn fill() -> Self {
        Self::Fill {
            insets: Insets::ZERO,
        }
    }

    /// Fixed size, if the intent carries one.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<Size> {
        match self {
            Self::Center { size } | Self::Pinned { size, .. } => *size,
            Self::Automatic | Self::Fill { .. } => None,
        }
    }
}
