//! Component-tree reconciliation.
//!
//! [`Component::change_set`] compares two trees positionally and produces a
//! [`ComponentChangeSet`] mirroring the tree's shape. Renderers walk the
//! change set and apply only the listed changes; an empty change set means
//! the native view needs no work at all.
//!
//! Two trees only diff where their shapes agree: when a node's variant
//! differs between the old and new tree, the new node's full change set is
//! emitted and the renderer rebuilds that subtree.

use crate::component::{Component, CustomComponent, Gesture};
use crate::components::button::ButtonChangeSet;
use crate::components::carousel::CarouselChangeSet;
use crate::components::collection::CollectionChangeSet;
use crate::components::image::ImageViewChangeSet;
use crate::components::label::LabelChangeSet;
use crate::components::map_view::MapViewChangeSet;
use crate::components::progress::ProgressChangeSet;
use crate::components::segmented::SegmentedChangeSet;
use crate::components::spinner::SpinnerChangeSet;
use crate::components::table::TableChangeSet;
use crate::components::text_field::TextFieldChangeSet;
use crate::components::text_view::TextViewChangeSet;
use crate::layout::LayoutChange;
use crate::style::BaseStyleChange;

/// Either a new value for a property or the absence of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyChange<T> {
    NoChange,
    Changed(T),
}

impl<T> PropertyChange<T> {
    #[must_use]
    pub fn is_no_change(&self) -> bool {
        matches!(self, PropertyChange::NoChange)
    }

    /// The new value, if one was emitted.
    pub fn value(&self) -> Option<&T> {
        match self {
            PropertyChange::NoChange => None,
            PropertyChange::Changed(value) => Some(value),
        }
    }
}

/// Changes to a container node and, recursively, to its children.
#[derive(Debug)]
pub struct ContainerChangeSet<MsgT> {
    pub children: Vec<ComponentChangeSet<MsgT>>,
    /// True when the child count differed and the renderer must rebuild the
    /// child list instead of patching it in place.
    pub children_replaced: bool,
    pub base_style: Vec<BaseStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT: Clone> ContainerChangeSet<MsgT> {
    fn full(
        children: &[Component<MsgT>],
        style: &crate::style::StyleSheet<crate::style::EmptyStyleSheet>,
        layout: &crate::layout::Layout,
    ) -> Self {
        Self {
            children: children.iter().map(Component::full_change_set).collect(),
            children_replaced: true,
            base_style: style.base.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.children_replaced
            && self.children.iter().all(ComponentChangeSet::is_empty)
            && self.base_style.is_empty()
            && self.layout.is_empty()
    }
}

/// Changes to a touchable wrapper. The gesture carries a message and is
/// re-supplied on every render; emptiness is the child's emptiness.
#[derive(Debug)]
pub struct TouchableChangeSet<MsgT> {
    pub gesture: PropertyChange<Gesture<MsgT>>,
    pub child: Box<ComponentChangeSet<MsgT>>,
}

impl<MsgT: Clone> TouchableChangeSet<MsgT> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.child.is_empty()
    }
}

/// Changes to a custom node. The renderer owns the node's meaning, so the
/// whole component is handed over and the change set is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomComponentChangeSet {
    pub component: CustomComponent,
}

impl CustomComponentChangeSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// The difference between two component trees, shaped like the new tree.
#[derive(Debug)]
pub enum ComponentChangeSet<MsgT> {
    Button(ButtonChangeSet<MsgT>),
    Label(LabelChangeSet),
    TextField(TextFieldChangeSet<MsgT>),
    TextView(TextViewChangeSet),
    ImageView(ImageViewChangeSet),
    MapView(MapViewChangeSet),
    Container(ContainerChangeSet<MsgT>),
    Table(TableChangeSet<MsgT>),
    Collection(CollectionChangeSet<MsgT>),
    Carousel(CarouselChangeSet<MsgT>),
    Segmented(SegmentedChangeSet<MsgT>),
    Progress(ProgressChangeSet),
    Spinner(SpinnerChangeSet),
    Touchable(TouchableChangeSet<MsgT>),
    Custom(CustomComponentChangeSet),
}

impl<MsgT: Clone> ComponentChangeSet<MsgT> {
    /// True when applying this change set would not touch the screen.
    ///
    /// Message-valued fields (tap handlers, gestures, row and segment lists)
    /// are re-supplied on every render and deliberately do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ComponentChangeSet::Button(changes) => changes.is_empty(),
            ComponentChangeSet::Label(changes) => changes.is_empty(),
            ComponentChangeSet::TextField(changes) => changes.is_empty(),
            ComponentChangeSet::TextView(changes) => changes.is_empty(),
            ComponentChangeSet::ImageView(changes) => changes.is_empty(),
            ComponentChangeSet::MapView(changes) => changes.is_empty(),
            ComponentChangeSet::Container(changes) => changes.is_empty(),
            ComponentChangeSet::Table(changes) => changes.is_empty(),
            ComponentChangeSet::Collection(changes) => changes.is_empty(),
            ComponentChangeSet::Carousel(changes) => changes.is_empty(),
            ComponentChangeSet::Segmented(changes) => changes.is_empty(),
            ComponentChangeSet::Progress(changes) => changes.is_empty(),
            ComponentChangeSet::Spinner(changes) => changes.is_empty(),
            ComponentChangeSet::Touchable(changes) => changes.is_empty(),
            ComponentChangeSet::Custom(changes) => changes.is_empty(),
        }
    }
}

impl<MsgT: Clone> Component<MsgT> {
    /// Emit every property of every node as changed, for first renders and
    /// variant swaps.
    #[must_use]
    pub fn full_change_set(&self) -> ComponentChangeSet<MsgT> {
        match self {
            Component::Button(properties, style, layout) => {
                ComponentChangeSet::Button(ButtonChangeSet::full(properties, style, layout))
            }
            Component::Label(properties, style, layout) => {
                ComponentChangeSet::Label(LabelChangeSet::full(properties, style, layout))
            }
            Component::TextField(properties, style, layout) => {
                ComponentChangeSet::TextField(TextFieldChangeSet::full(properties, style, layout))
            }
            Component::TextView(properties, style, layout) => {
                ComponentChangeSet::TextView(TextViewChangeSet::full(properties, style, layout))
            }
            Component::ImageView(image, style, layout) => {
                ComponentChangeSet::ImageView(ImageViewChangeSet::full(image, style, layout))
            }
            Component::MapView(properties, style, layout) => {
                ComponentChangeSet::MapView(MapViewChangeSet::full(properties, style, layout))
            }
            Component::Container(children, style, layout) => {
                ComponentChangeSet::Container(ContainerChangeSet::full(children, style, layout))
            }
            Component::Table(properties, style, layout) => {
                ComponentChangeSet::Table(TableChangeSet::full(properties, style, layout))
            }
            Component::Collection(properties, style, layout) => {
                ComponentChangeSet::Collection(CollectionChangeSet::full(properties, style, layout))
            }
            Component::Carousel(properties, style, layout) => {
                ComponentChangeSet::Carousel(CarouselChangeSet::full(properties, style, layout))
            }
            Component::Segmented(segments, style, layout) => {
                ComponentChangeSet::Segmented(SegmentedChangeSet::full(segments, style, layout))
            }
            Component::Progress(counter, style, layout) => {
                ComponentChangeSet::Progress(ProgressChangeSet::full(counter, style, layout))
            }
            Component::Spinner(is_active, style, layout) => {
                ComponentChangeSet::Spinner(SpinnerChangeSet::full(*is_active, style, layout))
            }
            Component::Touchable { gesture, child } => {
                ComponentChangeSet::Touchable(TouchableChangeSet {
                    gesture: PropertyChange::Changed(gesture.clone()),
                    child: Box::new(child.full_change_set()),
                })
            }
            Component::Custom(custom) => ComponentChangeSet::Custom(CustomComponentChangeSet {
                component: custom.clone(),
            }),
        }
    }

    /// Diff this tree against a newer one.
    ///
    /// Matching variants diff property by property; a variant mismatch falls
    /// back to the new node's full change set.
    #[must_use]
    pub fn change_set(&self, new: &Component<MsgT>) -> ComponentChangeSet<MsgT> {
        match (self, new) {
            (
                Component::Button(old_props, old_style, old_layout),
                Component::Button(new_props, new_style, new_layout),
            ) => ComponentChangeSet::Button(ButtonChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::Label(old_props, old_style, old_layout),
                Component::Label(new_props, new_style, new_layout),
            ) => ComponentChangeSet::Label(LabelChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::TextField(old_props, old_style, old_layout),
                Component::TextField(new_props, new_style, new_layout),
            ) => ComponentChangeSet::TextField(TextFieldChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::TextView(old_props, old_style, old_layout),
                Component::TextView(new_props, new_style, new_layout),
            ) => ComponentChangeSet::TextView(TextViewChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::ImageView(old_image, old_style, old_layout),
                Component::ImageView(new_image, new_style, new_layout),
            ) => ComponentChangeSet::ImageView(ImageViewChangeSet::diff(
                (old_image, old_style, old_layout),
                (new_image, new_style, new_layout),
            )),
            (
                Component::MapView(old_props, old_style, old_layout),
                Component::MapView(new_props, new_style, new_layout),
            ) => ComponentChangeSet::MapView(MapViewChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::Container(old_children, old_style, old_layout),
                Component::Container(new_children, new_style, new_layout),
            ) => {
                let children_replaced = old_children.len() != new_children.len();
                let children = if children_replaced {
                    new_children.iter().map(Component::full_change_set).collect()
                } else {
                    old_children
                        .iter()
                        .zip(new_children)
                        .map(|(old_child, new_child)| old_child.change_set(new_child))
                        .collect()
                };
                ComponentChangeSet::Container(ContainerChangeSet {
                    children,
                    children_replaced,
                    base_style: old_style.base.change_set(&new_style.base),
                    layout: old_layout.change_set(new_layout),
                })
            }
            (
                Component::Table(old_props, old_style, old_layout),
                Component::Table(new_props, new_style, new_layout),
            ) => ComponentChangeSet::Table(TableChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::Collection(old_props, old_style, old_layout),
                Component::Collection(new_props, new_style, new_layout),
            ) => ComponentChangeSet::Collection(CollectionChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::Carousel(old_props, old_style, old_layout),
                Component::Carousel(new_props, new_style, new_layout),
            ) => ComponentChangeSet::Carousel(CarouselChangeSet::diff(
                (old_props, old_style, old_layout),
                (new_props, new_style, new_layout),
            )),
            (
                Component::Segmented(old_segments, old_style, old_layout),
                Component::Segmented(new_segments, new_style, new_layout),
            ) => ComponentChangeSet::Segmented(SegmentedChangeSet::diff(
                (old_segments, old_style, old_layout),
                (new_segments, new_style, new_layout),
            )),
            (
                Component::Progress(old_counter, old_style, old_layout),
                Component::Progress(new_counter, new_style, new_layout),
            ) => ComponentChangeSet::Progress(ProgressChangeSet::diff(
                (old_counter, old_style, old_layout),
                (new_counter, new_style, new_layout),
            )),
            (
                Component::Spinner(old_active, old_style, old_layout),
                Component::Spinner(new_active, new_style, new_layout),
            ) => ComponentChangeSet::Spinner(SpinnerChangeSet::diff(
                (*old_active, old_style, old_layout),
                (*new_active, new_style, new_layout),
            )),
            (
                Component::Touchable {
                    child: old_child, ..
                },
                Component::Touchable {
                    gesture: new_gesture,
                    child: new_child,
                },
            ) => ComponentChangeSet::Touchable(TouchableChangeSet {
                gesture: PropertyChange::Changed(new_gesture.clone()),
                child: Box::new(old_child.change_set(new_child)),
            }),
            (Component::Custom(_), Component::Custom(new_custom)) => {
                ComponentChangeSet::Custom(CustomComponentChangeSet {
                    component: new_custom.clone(),
                })
            }
            (_, new) => new.full_change_set(),
        }
    }
}
