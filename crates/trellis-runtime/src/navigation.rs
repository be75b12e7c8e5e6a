//! Navigation state: one root presentation layer plus at most one modal.
//!
//! Pure value logic. The single `navigate` rule derives push-vs-present for
//! the whole runtime: a route change resolving to the currently active
//! navigator updates that layer in place (a push within its stack); a route
//! change resolving to a different navigator gains or keeps a modal layer
//! (a presentation).

use crate::application::Route;

#[derive(Debug, Clone, PartialEq)]
struct Layer<R, N> {
    navigator: N,
    route: R,
}

/// Where the application currently is: a root `(navigator, route)` pair and
/// at most one modal pair layered on top.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState<R, N> {
    root: Layer<R, N>,
    modal: Option<Layer<R, N>>,
}

impl<R: Route, N: Clone + PartialEq> NavigationState<R, N> {
    pub fn new(route: R, navigator: N) -> Self {
        Self {
            root: Layer { navigator, route },
            modal: None,
        }
    }

    /// The modal pair's navigator if present, else the root's.
    pub fn current_navigator(&self) -> &N {
        self.modal
            .as_ref()
            .map_or(&self.root.navigator, |modal| &modal.navigator)
    }

    /// The modal pair's route if present, else the root's.
    pub fn current_route(&self) -> &R {
        self.modal
            .as_ref()
            .map_or(&self.root.route, |modal| &modal.route)
    }

    /// The state after clearing the modal layer, or `None` when there is no
    /// modal to dismiss (the root cannot be dismissed).
    #[must_use]
    pub fn dismiss_current_navigator(&self) -> Option<Self> {
        self.modal.as_ref()?;
        Some(Self {
            root: self.root.clone(),
            modal: None,
        })
    }

    /// The state after a route change presented through `navigator`.
    #[must_use]
    pub fn navigate(&self, to: R, using: N) -> Self {
        let mut next = self.clone();
        if *self.current_navigator() != using {
            next.modal = Some(Layer {
                navigator: using,
                route: to,
            });
        } else if let Some(modal) = &mut next.modal {
            modal.route = to;
        } else {
            next.root = Layer {
                navigator: using,
                route: to,
            };
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum TestRoute {
        A,
        B,
        C,
    }

    impl Route for TestRoute {
        fn previous(&self) -> Option<Self> {
            match self {
                TestRoute::A => None,
                TestRoute::B => Some(TestRoute::A),
                TestRoute::C => Some(TestRoute::B),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Nav {
        Main,
        Modal,
    }

    #[test]
    fn same_navigator_updates_the_active_layer() {
        let state = NavigationState::new(TestRoute::A, Nav::Main);
        let next = state.navigate(TestRoute::B, Nav::Main);

        assert_eq!(*next.current_route(), TestRoute::B);
        assert_eq!(*next.current_navigator(), Nav::Main);
        assert!(next.dismiss_current_navigator().is_none());
    }

    #[test]
    fn different_navigator_gains_a_modal_layer() {
        let state = NavigationState::new(TestRoute::A, Nav::Main);
        let modal = state.navigate(TestRoute::C, Nav::Modal);

        assert_eq!(*modal.current_route(), TestRoute::C);
        assert_eq!(*modal.current_navigator(), Nav::Modal);
    }

    #[test]
    fn dismissing_the_modal_restores_the_pre_modal_state() {
        let state = NavigationState::new(TestRoute::A, Nav::Main);
        let modal = state.navigate(TestRoute::C, Nav::Modal);
        let dismissed = modal.dismiss_current_navigator().unwrap();

        assert_eq!(dismissed, state);
    }

    #[test]
    fn dismissing_the_root_is_rejected() {
        let state = NavigationState::new(TestRoute::A, Nav::Main);
        assert!(state.dismiss_current_navigator().is_none());
    }

    #[test]
    fn navigating_within_a_modal_keeps_the_layer() {
        let state = NavigationState::new(TestRoute::A, Nav::Main);
        let modal = state.navigate(TestRoute::B, Nav::Modal);
        let deeper = modal.navigate(TestRoute::C, Nav::Modal);

        assert_eq!(*deeper.current_route(), TestRoute::C);
        assert_eq!(*deeper.current_navigator(), Nav::Modal);
        assert_eq!(
            deeper.dismiss_current_navigator().unwrap(),
            state,
            "root layer must be untouched by modal navigation"
        );
    }
}
