#![forbid(unsafe_code)]

//! Weft public facade.
//!
//! # Example
//!
//! ```
//! use weft::prelude::*;
//!
//! let name = Binding::new(Some("Ada".to_string()));
//! let screen = Stack::vertical(elements![
//!     Text::bound(&name),
//!     Button::new("Rename"),
//! ])
//! .materialize();
//!
//! name.set(Some("Grace".to_string()));
//! let shown = screen.children()[0]
//!     .downcast_ref::<TextView>()
//!     .and_then(TextView::text);
//! assert_eq!(shown.as_deref(), Some("Grace"));
//! ```

pub use weft_runtime as runtime;
pub use weft_style as style;
pub use weft_widgets as widgets;

pub use weft_runtime::{Binding, BindingError, Subscription, SubscriptionGroup, combine, project};
pub use weft_style::{Axis, Color, Insets, LayoutIntent};
pub use weft_widgets::{
    AnyView, Button, Collection, Component, Container, Element, Image, IndexPath, Node,
    ReusableView, Section, Spacer, Stack, Table, Text, TextField, WidgetsConfig, ZStack, elements,
};

/// Everything needed to describe and mount a view tree.
pub mod prelude {
    pub use weft_runtime::{Binding, Subscription, SubscriptionGroup, combine, project};
    pub use weft_style::{
        Axis, ButtonAppearance, Color, ContainerAppearance, Font, ImageAppearance, Insets,
        LayoutIntent, StackAppearance, TextAppearance, TextFieldAppearance,
    };
    pub use weft_widgets::{
        AnyView, Button, ButtonView, Collection, CollectionView, Component, Container,
        ContainerView, Element, Image, ImageView, IndexPath, Node, ReusableView, Section, Spacer,
        Stack, StackView, Table, TableView, Text, TextField, TextFieldView, TextView,
        WidgetsConfig, ZStack, ZStackView, elements,
    };
}
