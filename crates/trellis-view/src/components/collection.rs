//! Collection widget: a grid or line of uniformly sized cells.

use std::sync::Arc;

use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, EmptyStyleSheet, StyleSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionScrollDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Insets applied around a collection section, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionInset {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

/// The materialized content of a cell.
pub struct CollectionItemRender<MsgT> {
    pub component: Component<MsgT>,
    /// Reuse-pool key: cells with the same identifier may recycle each
    /// other's native views.
    pub type_identifier: String,
}

pub type CollectionItemRenderer<MsgT> = Arc<dyn Fn() -> CollectionItemRender<MsgT> + Send + Sync>;

#[derive(Clone)]
pub struct CollectionItemProperties<MsgT> {
    pub on_tap: Option<MsgT>,
    pub renderer: CollectionItemRenderer<MsgT>,
    pub identifier: String,
}

impl<MsgT> std::fmt::Debug for CollectionItemProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionItemProperties")
            .field("identifier", &self.identifier)
            .field("renderer", &"<renderer>")
            .finish()
    }
}

#[derive(Clone)]
pub struct CollectionProperties<MsgT> {
    pub items: Vec<CollectionItemProperties<MsgT>>,
    pub shows_vertical_scroll_indicator: bool,
    pub shows_horizontal_scroll_indicator: bool,
    pub items_width: u32,
    pub items_height: u32,
    pub minimum_interitem_spacing: u32,
    pub minimum_line_spacing: u32,
    pub scroll_direction: CollectionScrollDirection,
    pub section_inset: SectionInset,
}

impl<MsgT> Default for CollectionProperties<MsgT> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            shows_vertical_scroll_indicator: true,
            shows_horizontal_scroll_indicator: true,
            items_width: 0,
            items_height: 0,
            minimum_interitem_spacing: 0,
            minimum_line_spacing: 0,
            scroll_direction: CollectionScrollDirection::default(),
            section_inset: SectionInset::default(),
        }
    }
}

impl<MsgT> std::fmt::Debug for CollectionProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionProperties")
            .field("items", &format_args!("<{} items>", self.items.len()))
            .field("items_width", &self.items_width)
            .field("items_height", &self.items_height)
            .field("scroll_direction", &self.scroll_direction)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionPropertyChange {
    ShowsVerticalScrollIndicator(bool),
    ShowsHorizontalScrollIndicator(bool),
    ItemsSize { width: u32, height: u32 },
    MinimumInteritemSpacing(u32),
    MinimumLineSpacing(u32),
    ScrollDirection(CollectionScrollDirection),
    SectionInset(SectionInset),
}

pub struct CollectionChangeSet<MsgT> {
    pub items: Vec<CollectionItemProperties<MsgT>>,
    pub properties: Vec<CollectionPropertyChange>,
    pub base_style: Vec<BaseStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT: Clone> CollectionChangeSet<MsgT> {
    pub(crate) fn full(
        properties: &CollectionProperties<MsgT>,
        style: &StyleSheet<EmptyStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            items: properties.items.clone(),
            properties: vec![
                CollectionPropertyChange::ShowsVerticalScrollIndicator(
                    properties.shows_vertical_scroll_indicator,
                ),
                CollectionPropertyChange::ShowsHorizontalScrollIndicator(
                    properties.shows_horizontal_scroll_indicator,
                ),
                CollectionPropertyChange::ItemsSize {
                    width: properties.items_width,
                    height: properties.items_height,
                },
                CollectionPropertyChange::MinimumInteritemSpacing(
                    properties.minimum_interitem_spacing,
                ),
                CollectionPropertyChange::MinimumLineSpacing(properties.minimum_line_spacing),
                CollectionPropertyChange::ScrollDirection(properties.scroll_direction),
                CollectionPropertyChange::SectionInset(properties.section_inset),
            ],
            base_style: style.base.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (
            &CollectionProperties<MsgT>,
            &StyleSheet<EmptyStyleSheet>,
            &Layout,
        ),
        new: (
            &CollectionProperties<MsgT>,
            &StyleSheet<EmptyStyleSheet>,
            &Layout,
        ),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.shows_vertical_scroll_indicator != new.0.shows_vertical_scroll_indicator {
            properties.push(CollectionPropertyChange::ShowsVerticalScrollIndicator(
                new.0.shows_vertical_scroll_indicator,
            ));
        }
        if old.0.shows_horizontal_scroll_indicator != new.0.shows_horizontal_scroll_indicator {
            properties.push(CollectionPropertyChange::ShowsHorizontalScrollIndicator(
                new.0.shows_horizontal_scroll_indicator,
            ));
        }
        if old.0.items_width != new.0.items_width || old.0.items_height != new.0.items_height {
            properties.push(CollectionPropertyChange::ItemsSize {
                width: new.0.items_width,
                height: new.0.items_height,
            });
        }
        if old.0.minimum_interitem_spacing != new.0.minimum_interitem_spacing {
            properties.push(CollectionPropertyChange::MinimumInteritemSpacing(
                new.0.minimum_interitem_spacing,
            ));
        }
        if old.0.minimum_line_spacing != new.0.minimum_line_spacing {
            properties.push(CollectionPropertyChange::MinimumLineSpacing(
                new.0.minimum_line_spacing,
            ));
        }
        if old.0.scroll_direction != new.0.scroll_direction {
            properties.push(CollectionPropertyChange::ScrollDirection(
                new.0.scroll_direction,
            ));
        }
        if old.0.section_inset != new.0.section_inset {
            properties.push(CollectionPropertyChange::SectionInset(new.0.section_inset));
        }
        Self {
            items: new.0.items.clone(),
            properties,
            base_style: old.1.base.change_set(&new.1.base),
            layout: old.2.change_set(new.2),
        }
    }

    /// True when no visible attribute changed. Items are always re-supplied
    /// and do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.base_style.is_empty() && self.layout.is_empty()
    }
}

impl<MsgT> std::fmt::Debug for CollectionChangeSet<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionChangeSet")
            .field("items", &format_args!("<{} items>", self.items.len()))
            .field("properties", &self.properties)
            .field("base_style", &self.base_style)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Build a collection from explicit properties, style, and layout.
pub fn collection<MsgT>(
    properties: CollectionProperties<MsgT>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Collection(properties, style, layout)
}
