//! The component tree: a pure description of what the screen should show.
//!
//! Every node bundles widget properties, a two-layer style sheet, and a
//! layout. Trees are values; rendering consumes two successive trees and a
//! change set describing the difference, so renderers only touch what moved.

use crate::components::button::{ButtonProperties, ButtonStyleSheet};
use crate::components::carousel::CarouselProperties;
use crate::components::collection::CollectionProperties;
use crate::components::image::Image;
use crate::components::label::{LabelProperties, LabelStyleSheet};
use crate::components::map_view::MapProperties;
use crate::components::progress::{ProgressCounter, ProgressStyleSheet};
use crate::components::segmented::{SegmentProperties, SegmentedStyleSheet};
use crate::components::spinner::SpinnerStyleSheet;
use crate::components::table::{TableProperties, TableStyleSheet};
use crate::components::text_field::{TextFieldProperties, TextFieldStyleSheet};
use crate::components::text_view::{TextViewProperties, TextViewStyleSheet};
use crate::layout::Layout;
use crate::style::{EmptyStyleSheet, StyleSheet};
use crate::ziplist::ZipList;

/// A gesture recognizer attached to a [`Component::Touchable`] wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture<MsgT> {
    Tap(MsgT),
}

impl<MsgT> Gesture<MsgT> {
    /// The message dispatched when the gesture fires.
    pub fn message(&self) -> &MsgT {
        match self {
            Gesture::Tap(message) => message,
        }
    }
}

/// An escape hatch for widgets the built-in set does not cover. The renderer
/// resolves `identifier` to a native view it knows how to build.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomComponent {
    pub identifier: String,
    pub information: Option<String>,
    pub layout: Layout,
}

/// A node in the component tree, parameterized by the application's message
/// type.
#[derive(Debug, Clone)]
pub enum Component<MsgT> {
    Button(ButtonProperties<MsgT>, StyleSheet<ButtonStyleSheet>, Layout),
    Label(LabelProperties, StyleSheet<LabelStyleSheet>, Layout),
    TextField(
        TextFieldProperties<MsgT>,
        StyleSheet<TextFieldStyleSheet>,
        Layout,
    ),
    TextView(TextViewProperties, StyleSheet<TextViewStyleSheet>, Layout),
    ImageView(Image, StyleSheet<EmptyStyleSheet>, Layout),
    MapView(MapProperties, StyleSheet<EmptyStyleSheet>, Layout),
    Container(Vec<Component<MsgT>>, StyleSheet<EmptyStyleSheet>, Layout),
    Table(TableProperties<MsgT>, StyleSheet<TableStyleSheet>, Layout),
    Collection(
        CollectionProperties<MsgT>,
        StyleSheet<EmptyStyleSheet>,
        Layout,
    ),
    Carousel(CarouselProperties<MsgT>, StyleSheet<EmptyStyleSheet>, Layout),
    Segmented(
        ZipList<SegmentProperties<MsgT>>,
        StyleSheet<SegmentedStyleSheet>,
        Layout,
    ),
    Progress(ProgressCounter, StyleSheet<ProgressStyleSheet>, Layout),
    Spinner(bool, StyleSheet<SpinnerStyleSheet>, Layout),
    Touchable {
        gesture: Gesture<MsgT>,
        child: Box<Component<MsgT>>,
    },
    Custom(CustomComponent),
}

impl<MsgT> Component<MsgT> {
    /// The node's layout. A touchable wrapper reports its child's layout.
    pub fn layout(&self) -> &Layout {
        match self {
            Component::Button(_, _, layout)
            | Component::Label(_, _, layout)
            | Component::TextField(_, _, layout)
            | Component::TextView(_, _, layout)
            | Component::ImageView(_, _, layout)
            | Component::MapView(_, _, layout)
            | Component::Container(_, _, layout)
            | Component::Table(_, _, layout)
            | Component::Collection(_, _, layout)
            | Component::Carousel(_, _, layout)
            | Component::Segmented(_, _, layout)
            | Component::Progress(_, _, layout)
            | Component::Spinner(_, _, layout) => layout,
            Component::Touchable { child, .. } => child.layout(),
            Component::Custom(custom) => &custom.layout,
        }
    }
}

/// Build a container with default styling.
pub fn container<MsgT>(children: Vec<Component<MsgT>>) -> Component<MsgT> {
    Component::Container(children, StyleSheet::new(EmptyStyleSheet), Layout::default())
}

/// Build a container from explicit children, style, and layout.
pub fn styled_container<MsgT>(
    children: Vec<Component<MsgT>>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Container(children, style, layout)
}

/// Wrap a child so a tap anywhere on it dispatches `message`.
pub fn touchable<MsgT>(message: MsgT, child: Component<MsgT>) -> Component<MsgT> {
    Component::Touchable {
        gesture: Gesture::Tap(message),
        child: Box::new(child),
    }
}

/// Build a custom component node.
pub fn custom<MsgT>(identifier: impl Into<String>, layout: Layout) -> Component<MsgT> {
    Component::Custom(CustomComponent {
        identifier: identifier.into(),
        information: None,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::label::label;
    use crate::layout::layout;

    #[test]
    fn touchable_reports_child_layout() {
        let inner = layout(|l| {
            l.flex.grow = crate::layout::FlexValue::ONE;
        });
        let wrapped = touchable(7u32, label::<u32>("tap me"));
        assert_eq!(*wrapped.layout(), Layout::default());

        let custom_node = custom::<u32>("chart", inner.clone());
        assert_eq!(*custom_node.layout(), inner);
    }

    #[test]
    fn gesture_exposes_its_message() {
        let gesture = Gesture::Tap(42u32);
        assert_eq!(*gesture.message(), 42);
    }
}
