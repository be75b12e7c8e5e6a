//! Property tests for component-tree reconciliation.

use proptest::prelude::*;
use trellis_view::component::{container, touchable};
use trellis_view::components::button::button;
use trellis_view::components::label::label;
use trellis_view::components::spinner::{SpinnerStyleSheet, spinner};
use trellis_view::layout::{Dimension, Layout, layout};
use trellis_view::style::StyleSheet;
use trellis_view::Component;

fn arb_layout() -> impl Strategy<Value = Layout> {
    (any::<Option<u32>>(), any::<Option<u32>>()).prop_map(|(width, height)| {
        layout(|l| {
            l.width = width.map(|w| Dimension::exactly(w % 1000));
            l.height = height.map(|h| Dimension::exactly(h % 1000));
        })
    })
}

fn arb_leaf() -> impl Strategy<Value = Component<u32>> {
    prop_oneof![
        "[a-z]{0,12}".prop_map(|text| label::<u32>(text)),
        ("[a-z]{1,8}", any::<u32>()).prop_map(|(text, msg)| button(text, msg)),
        any::<bool>().prop_map(|active| spinner::<u32>(
            active,
            StyleSheet::new(SpinnerStyleSheet::default()),
            Layout::default(),
        )),
    ]
}

fn arb_tree() -> impl Strategy<Value = Component<u32>> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(container),
            (any::<u32>(), inner).prop_map(|(msg, child)| touchable(msg, child)),
        ]
    })
}

proptest! {
    #[test]
    fn diffing_a_tree_against_itself_is_empty(tree in arb_tree()) {
        prop_assert!(tree.change_set(&tree.clone()).is_empty());
    }

    #[test]
    fn full_change_set_is_never_empty_for_leaves(leaf in arb_leaf()) {
        prop_assert!(!leaf.full_change_set().is_empty());
    }

    #[test]
    fn adding_a_child_is_visible(tree in arb_tree(), extra in arb_leaf(), lay in arb_layout()) {
        let old = container(vec![tree.clone()]);
        let mut grown = vec![tree];
        grown.push(extra);
        let new = trellis_view::component::styled_container(
            grown,
            StyleSheet::default(),
            lay,
        );
        prop_assert!(!old.change_set(&new).is_empty());
    }
}
