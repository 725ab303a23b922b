#![forbid(unsafe_code)]

//! Reusable views and containers for Weft.
//!
//! Descriptors ([`Component`]s such as [`Text`] or [`Stack`]) materialize
//! into live views that drive a [`Node`]. Containers keep their child views
//! in line with a changing descriptor list through the [`reconcile`]
//! module; virtualized containers recycle row views through a
//! [`ReusePool`].

pub mod button;
pub mod config;
pub mod container;
pub mod image;
pub mod node;
pub mod reconcile;
pub mod spacer;
pub mod stack;
pub mod text;
pub mod text_field;
pub mod view;
pub mod virtualized;

pub use button::{Action, Button, ButtonView};
pub use config::WidgetsConfig;
pub use container::{Container, ContainerView};
pub use image::{Image, ImageView};
pub use node::{Node, Property};
pub use reconcile::{Reconciliation, Slot, SlotState};
pub use spacer::{Spacer, SpacerView};
pub use stack::{Stack, StackView, ZStack, ZStackView};
pub use text::{Text, TextView};
pub use text_field::{TextField, TextFieldView};
pub use view::{AnyComponent, AnyView, AppliedAppearance, Component, Element, ReusableView, erase};
pub use virtualized::{
    Collection, CollectionView, IndexPath, ReusePool, RowChanges, Section, Table, TableView,
    VirtualList,
};
