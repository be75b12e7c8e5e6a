//! Declarative component trees, styling, layout, and reconciliation.
//!
//! An application's `view` produces a [`Component`] tree describing the
//! screen as a value. Two successive trees diff into a
//! [`ComponentChangeSet`] so a renderer applies only what actually changed.
//! Interaction events travel back up through [`Mailbox`] handles that
//! container renderers chain from leaf to root.
//!
//! This crate knows nothing about state, dispatch, or navigation; those live
//! in `trellis-runtime`.

#![forbid(unsafe_code)]

pub mod changeset;
pub mod component;
pub mod components;
pub mod layout;
pub mod mailbox;
pub mod root;
pub mod style;
pub mod ziplist;

pub use changeset::{ComponentChangeSet, PropertyChange};
pub use component::{
    Component, CustomComponent, Gesture, container, custom, styled_container, touchable,
};
pub use components::button::{button, styled_button};
pub use components::image::{Image, image_view};
pub use components::label::{label, styled_label};
pub use layout::{Layout, layout};
pub use mailbox::Mailbox;
pub use root::{NavigationBar, RootComponent, TabBar, navigation_bar};
pub use style::{BaseStyleSheet, Color, Font, StyleSheet, style_sheet};
pub use ziplist::ZipList;
