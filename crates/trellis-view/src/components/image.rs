//! Image values and the image view widget.

use crate::changeset::PropertyChange;
use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, EmptyStyleSheet, StyleSheet};

/// An image reference: a named asset or raw encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Named(String),
    Blob(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageViewChangeSet {
    pub image: PropertyChange<Option<Image>>,
    pub base_style: Vec<BaseStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl ImageViewChangeSet {
    pub(crate) fn full(
        image: &Image,
        style: &StyleSheet<EmptyStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            image: PropertyChange::Changed(Some(image.clone())),
            base_style: style.base.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&Image, &StyleSheet<EmptyStyleSheet>, &Layout),
        new: (&Image, &StyleSheet<EmptyStyleSheet>, &Layout),
    ) -> Self {
        let image = if old.0 == new.0 {
            PropertyChange::NoChange
        } else {
            PropertyChange::Changed(Some(new.0.clone()))
        };
        Self {
            image,
            base_style: old.1.base.change_set(&new.1.base),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_no_change() && self.base_style.is_empty() && self.layout.is_empty()
    }
}

/// Build an image view component.
pub fn image_view<MsgT>(
    image: Image,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::ImageView(image, style, layout)
}
