//! Unidirectional-data-flow application framework.
//!
//! An application is four pure functions over one state type: `update`
//! folds messages into new states, `view` resolves a state to a declarative
//! component tree, `subscriptions` declares the event sources that should
//! currently run, and `translate_route_change` maps navigation onto
//! messages. The runtime serializes every dispatched action, diffs
//! successive views into changesets, and drives a platform renderer through
//! completion-based transitions.
//!
//! `trellis-view` holds the declarative side (components, styling, layout,
//! diffing); `trellis-runtime` holds the dispatch loop, navigation state,
//! middleware chain, and subscriptions. This crate re-exports both.

#![forbid(unsafe_code)]

pub use trellis_runtime as runtime;
pub use trellis_view as view;

pub mod prelude {
    pub use trellis_runtime::{
        Action, Application, ApplicationRenderer, ApplicationRunner, CommandExecutor, Completion,
        Content, Dispatcher, Middleware, NavigationState, Route, Subscription,
        SubscriptionManager, TimeLogger, Timer, TimerRepeat, TimerUnit, Transition, View,
    };
    pub use trellis_view::{
        Color, Component, ComponentChangeSet, Font, Gesture, Image, Layout, Mailbox,
        NavigationBar, PropertyChange, RootComponent, StyleSheet, TabBar, ZipList, button,
        container, label, layout, navigation_bar, style_sheet, touchable,
    };
}
