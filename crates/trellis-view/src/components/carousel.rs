//! Carousel widget: a horizontally paged line of cells with one centered.
//!
//! The centered item is modeled with a [`ZipList`], so selection changes are
//! shift operations rather than indices that could go out of bounds.

use std::sync::Arc;

use crate::component::Component;
use crate::components::collection::SectionInset;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, EmptyStyleSheet, StyleSheet};
use crate::ziplist::ZipList;

/// A change of the centered item, as reported by the renderer after the
/// user swipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOperation {
    Left(usize),
    Right(usize),
}

impl ShiftOperation {
    /// The item list after this shift, or `None` when the list is too short
    /// in that direction.
    #[must_use]
    pub fn apply<T: Clone>(self, items: &ZipList<T>) -> Option<ZipList<T>> {
        match self {
            ShiftOperation::Left(count) => items.shift_left(count),
            ShiftOperation::Right(count) => items.shift_right(count),
        }
    }
}

pub type CarouselItemRenderer<MsgT> = Arc<dyn Fn() -> Component<MsgT> + Send + Sync>;

/// Maps a selection shift to a message, or `None` to ignore it.
pub type CarouselSelectionHandler<MsgT> =
    Arc<dyn Fn(ShiftOperation) -> Option<MsgT> + Send + Sync>;

#[derive(Clone)]
pub struct CarouselItemProperties<MsgT> {
    pub on_tap: Option<MsgT>,
    pub renderer: CarouselItemRenderer<MsgT>,
    pub identifier: String,
}

impl<MsgT> std::fmt::Debug for CarouselItemProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselItemProperties")
            .field("identifier", &self.identifier)
            .field("renderer", &"<renderer>")
            .finish()
    }
}

#[derive(Clone)]
pub struct CarouselProperties<MsgT> {
    pub items: Option<ZipList<CarouselItemProperties<MsgT>>>,
    pub shows_scroll_indicator: bool,
    pub is_snap_to_cell_enabled: bool,
    pub on_selection_change: CarouselSelectionHandler<MsgT>,
    pub items_width: u32,
    pub items_height: u32,
    pub minimum_interitem_spacing: u32,
    pub minimum_line_spacing: u32,
    pub section_inset: SectionInset,
}

impl<MsgT> Default for CarouselProperties<MsgT> {
    fn default() -> Self {
        Self {
            items: None,
            shows_scroll_indicator: false,
            is_snap_to_cell_enabled: false,
            on_selection_change: Arc::new(|_| None),
            items_width: 0,
            items_height: 0,
            minimum_interitem_spacing: 0,
            minimum_line_spacing: 0,
            section_inset: SectionInset::default(),
        }
    }
}

impl<MsgT> std::fmt::Debug for CarouselProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselProperties")
            .field(
                "items",
                &format_args!(
                    "<{} items>",
                    self.items.as_ref().map_or(0, ZipList::len)
                ),
            )
            .field("items_width", &self.items_width)
            .field("items_height", &self.items_height)
            .field("is_snap_to_cell_enabled", &self.is_snap_to_cell_enabled)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarouselPropertyChange {
    ShowsScrollIndicator(bool),
    IsSnapToCellEnabled(bool),
    ItemsSize { width: u32, height: u32 },
    MinimumInteritemSpacing(u32),
    MinimumLineSpacing(u32),
    SectionInset(SectionInset),
}

pub struct CarouselChangeSet<MsgT> {
    /// Always re-supplied so cell renderers and tap handlers stay fresh; not
    /// counted by [`is_empty`](Self::is_empty).
    pub items: Option<ZipList<CarouselItemProperties<MsgT>>>,
    pub on_selection_change: CarouselSelectionHandler<MsgT>,
    pub properties: Vec<CarouselPropertyChange>,
    pub base_style: Vec<BaseStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT: Clone> CarouselChangeSet<MsgT> {
    pub(crate) fn full(
        properties: &CarouselProperties<MsgT>,
        style: &StyleSheet<EmptyStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            items: properties.items.clone(),
            on_selection_change: Arc::clone(&properties.on_selection_change),
            properties: vec![
                CarouselPropertyChange::ShowsScrollIndicator(properties.shows_scroll_indicator),
                CarouselPropertyChange::IsSnapToCellEnabled(properties.is_snap_to_cell_enabled),
                CarouselPropertyChange::ItemsSize {
                    width: properties.items_width,
                    height: properties.items_height,
                },
                CarouselPropertyChange::MinimumInteritemSpacing(
                    properties.minimum_interitem_spacing,
                ),
                CarouselPropertyChange::MinimumLineSpacing(properties.minimum_line_spacing),
                CarouselPropertyChange::SectionInset(properties.section_inset),
            ],
            base_style: style.base.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (
            &CarouselProperties<MsgT>,
            &StyleSheet<EmptyStyleSheet>,
            &Layout,
        ),
        new: (
            &CarouselProperties<MsgT>,
            &StyleSheet<EmptyStyleSheet>,
            &Layout,
        ),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.shows_scroll_indicator != new.0.shows_scroll_indicator {
            properties.push(CarouselPropertyChange::ShowsScrollIndicator(
                new.0.shows_scroll_indicator,
            ));
        }
        if old.0.is_snap_to_cell_enabled != new.0.is_snap_to_cell_enabled {
            properties.push(CarouselPropertyChange::IsSnapToCellEnabled(
                new.0.is_snap_to_cell_enabled,
            ));
        }
        if old.0.items_width != new.0.items_width || old.0.items_height != new.0.items_height {
            properties.push(CarouselPropertyChange::ItemsSize {
                width: new.0.items_width,
                height: new.0.items_height,
            });
        }
        if old.0.minimum_interitem_spacing != new.0.minimum_interitem_spacing {
            properties.push(CarouselPropertyChange::MinimumInteritemSpacing(
                new.0.minimum_interitem_spacing,
            ));
        }
        if old.0.minimum_line_spacing != new.0.minimum_line_spacing {
            properties.push(CarouselPropertyChange::MinimumLineSpacing(
                new.0.minimum_line_spacing,
            ));
        }
        if old.0.section_inset != new.0.section_inset {
            properties.push(CarouselPropertyChange::SectionInset(new.0.section_inset));
        }
        Self {
            items: new.0.items.clone(),
            on_selection_change: Arc::clone(&new.0.on_selection_change),
            properties,
            base_style: old.1.base.change_set(&new.1.base),
            layout: old.2.change_set(new.2),
        }
    }

    /// True when no visible attribute changed. Items and the selection
    /// handler are always re-supplied and do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.base_style.is_empty() && self.layout.is_empty()
    }
}

impl<MsgT> std::fmt::Debug for CarouselChangeSet<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselChangeSet")
            .field(
                "items",
                &format_args!(
                    "<{} items>",
                    self.items.as_ref().map_or(0, ZipList::len)
                ),
            )
            .field("properties", &self.properties)
            .field("base_style", &self.base_style)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Build a carousel from explicit properties, style, and layout.
pub fn carousel<MsgT>(
    properties: CarouselProperties<MsgT>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Carousel(properties, style, layout)
}

/// Build a carousel item with an identifier and a cell renderer.
pub fn carousel_item<MsgT>(
    identifier: impl Into<String>,
    renderer: impl Fn() -> Component<MsgT> + Send + Sync + 'static,
) -> CarouselItemProperties<MsgT> {
    CarouselItemProperties {
        on_tap: None,
        renderer: Arc::new(renderer),
        identifier: identifier.into(),
    }
}
