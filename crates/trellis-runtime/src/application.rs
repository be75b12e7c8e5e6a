//! The application contract and its collaborator interfaces.
//!
//! A Trellis application is a pure description: initial state, an update
//! function, a view function, and declared subscriptions. Everything
//! effectful (rendering, command execution, custom event sources) is an
//! external collaborator consumed through the traits in this module.

use std::fmt;
use std::sync::Arc;

use trellis_view::component::Component;
use trellis_view::root::RootComponent;

use crate::subscription::Subscription;

/// A location in the application. Routes form chains through `previous`;
/// equality (not the chain) detects no-op navigation.
pub trait Route: Clone + PartialEq + fmt::Debug + Send + 'static {
    fn previous(&self) -> Option<Self>;
}

/// An externally dispatchable instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<R, M> {
    /// Dismiss the modal layer, optionally dispatching a follow-up action
    /// once the dismissal transition completes.
    DismissNavigator { then_send: Option<Box<Action<R, M>>> },
    /// Return to the current route's predecessor. When `perform_transition`
    /// is false the route change is applied without a rewind animation.
    NavigateToPrevious { perform_transition: bool },
    Navigate { to: R },
    SendMessage(M),
}

/// Actions plus runtime-internal variants that external callers must not be
/// able to construct. Renderers reach the internal variant through
/// [`Dispatcher::notify_back_navigation`].
#[derive(Debug, Clone)]
pub(crate) enum InternalAction<R, M> {
    /// The renderer already popped its navigation stack (back gesture); the
    /// runtime must catch its navigation state up without a transition.
    NavigateToPreviousRouteAfterPop,
    Action(Action<R, M>),
}

/// A cloneable, thread-safe handle for enqueuing actions onto a running
/// application's dispatch queue. Dispatching is fire-and-forget.
pub struct Dispatcher<R, M> {
    sink: Arc<dyn Fn(InternalAction<R, M>) + Send + Sync>,
}

impl<R, M> Clone for Dispatcher<R, M> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<R, M> Dispatcher<R, M> {
    pub(crate) fn new(sink: impl Fn(InternalAction<R, M>) + Send + Sync + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn dispatch(&self, action: Action<R, M>) {
        (self.sink)(InternalAction::Action(action));
    }

    /// Tell the runtime a back navigation already happened in the renderer
    /// (the user popped a navigation stack directly) so it can catch up.
    pub fn notify_back_navigation(&self) {
        (self.sink)(InternalAction::NavigateToPreviousRouteAfterPop);
    }
}

impl<R, M> fmt::Debug for Dispatcher<R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish()
    }
}

/// A button in an alert.
#[derive(Debug, Clone)]
pub struct AlertButton<MsgT> {
    pub title: String,
    pub on_tap: Option<MsgT>,
}

#[derive(Debug, Clone)]
pub struct AlertProperties<MsgT> {
    pub title: String,
    pub text: String,
    pub buttons: Vec<AlertButton<MsgT>>,
}

/// What a view shows: either an alert over the current screen or a
/// component tree.
#[derive(Debug, Clone)]
pub enum Content<MsgT> {
    Alert(AlertProperties<MsgT>),
    Component(Component<MsgT>),
}

/// The resolved screen for a state: a presentation context, root chrome,
/// and content. The content's message type is [`Action`] so interaction
/// handlers can navigate as well as send messages.
#[derive(Debug, Clone)]
pub struct View<R, M, N> {
    pub navigator: N,
    pub root: RootComponent<Action<R, M>>,
    pub content: Content<Action<R, M>>,
}

impl<R, M, N> View<R, M, N> {
    pub fn component(
        navigator: N,
        root: RootComponent<Action<R, M>>,
        component: Component<Action<R, M>>,
    ) -> Self {
        Self {
            navigator,
            root,
            content: Content::Component(component),
        }
    }

    pub fn alert(
        navigator: N,
        root: RootComponent<Action<R, M>>,
        properties: AlertProperties<Action<R, M>>,
    ) -> Self {
        Self {
            navigator,
            root,
            content: Content::Alert(properties),
        }
    }
}

/// The application contract: pure functions over an opaque state.
pub trait Application: Send + Sync + 'static {
    type State: Clone + Send + 'static;
    type Message: fmt::Debug + Clone + Send + 'static;
    type Command: Send + 'static;
    type Route: Route;
    type Navigator: Clone + PartialEq + fmt::Debug + Send + 'static;
    /// Application-defined subscription kind beyond the built-in timer.
    type Subscription: Clone + PartialEq + Send + 'static;

    fn initial_state(&self) -> Self::State;

    fn initial_route(&self) -> Self::Route;

    /// Translate a route change into a message, or `None` when the change
    /// is unsupported (the navigation request is then dropped).
    fn translate_route_change(
        &self,
        from: &Self::Route,
        to: &Self::Route,
    ) -> Option<Self::Message>;

    /// The pure transition function. `None` rejects the message: state
    /// stays unchanged and no command runs.
    fn update(
        &self,
        state: &Self::State,
        message: Self::Message,
    ) -> Option<(Self::State, Option<Self::Command>)>;

    fn view(&self, state: &Self::State) -> View<Self::Route, Self::Message, Self::Navigator>;

    fn subscriptions(
        &self,
        _state: &Self::State,
    ) -> Vec<Subscription<Self::Message, Self::Route, Self::Subscription>> {
        Vec::new()
    }
}

/// Invoked once after a renderer transition's visual effect is durably
/// complete. Every renderer method must call it exactly once.
pub type Completion = Box<dyn FnOnce() + Send>;

/// The platform-specific rendering backend, driven by the runtime.
///
/// The runtime suspends its dispatch queue around every call and resumes it
/// from the completion, so a completion that never fires stalls dispatch.
pub trait ApplicationRenderer<R: Route, M, N>: Send + Sync + 'static {
    /// The channel through which rendered widgets send interaction events
    /// back to the runtime.
    fn mailbox(&self) -> trellis_view::Mailbox<Action<R, M>>;

    fn render(&self, view: View<R, M, N>, completion: Completion);

    fn present(&self, view: View<R, M, N>, completion: Completion);

    fn present_modal(&self, view: View<R, M, N>, completion: Completion);

    fn dismiss_current_navigator(&self, completion: Completion);

    fn rewind_current_navigator(&self, completion: Completion);
}

/// Performs declared side effects. May dispatch follow-up actions, from any
/// thread, zero or more times.
pub trait CommandExecutor<R: Route, M, C>: Send + Sync + 'static {
    fn execute(&self, command: C, dispatcher: Dispatcher<R, M>);
}

/// Lifecycle hooks for application-defined subscription kinds.
pub trait SubscriptionManager<R: Route, M, S>: Send + 'static {
    fn add(&mut self, subscription: S, dispatcher: Dispatcher<R, M>);

    fn remove(&mut self, subscription: S);
}
