//! The application runner: the single authority over state and navigation.
//!
//! All dispatched actions funnel through one serialized queue; at most one
//! transition is in flight at a time. Renderer transitions suspend the queue
//! until their completion fires, and continuations tied to a transition (the
//! `then_send` of a dismiss, the route bookkeeping after a rewind) run
//! out-of-band, ahead of anything that arrived during the suspension.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, debug_span, warn};

use crate::application::{
    Action, Application, ApplicationRenderer, CommandExecutor, Completion, Dispatcher,
    InternalAction, Route, SubscriptionManager, View,
};
use crate::middleware::{Middleware, apply_chain};
use crate::navigation::NavigationState;
use crate::queue::ExecutionQueue;
use crate::subscription::SubscriptionsReconciler;

const LOCK: &str = "runner lock poisoned";

/// Why a dispatched action produced no transition.
///
/// Dispatch is fire-and-forget: every failure is logged and locally
/// absorbed, never surfaced to the dispatching caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// Middleware or `update` rejected the message; state unchanged.
    UnsupportedMessage,
    /// `translate_route_change` returned `None`; navigation dropped.
    UnsupportedRoute,
    CannotDismissRootNavigator,
    NoPreviousRoute,
    /// A navigation action arrived before any `SendMessage` created the
    /// navigation state.
    NavigationStateNotInitialized,
    /// A message-driven view resolved to a different navigator; state was
    /// updated but the render was suppressed.
    NavigatorMismatch,
    UnsupportedAction,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DispatchFailure::UnsupportedMessage => "unsupported message for state",
            DispatchFailure::UnsupportedRoute => "unsupported route",
            DispatchFailure::CannotDismissRootNavigator => "cannot dismiss the root navigator",
            DispatchFailure::NoPreviousRoute => "current route has no previous route",
            DispatchFailure::NavigationStateNotInitialized => {
                "navigation state is not initialized"
            }
            DispatchFailure::NavigatorMismatch => "view resolves to a different navigator",
            DispatchFailure::UnsupportedAction => "unsupported action",
        };
        f.write_str(text)
    }
}

type ViewFor<A> = View<
    <A as Application>::Route,
    <A as Application>::Message,
    <A as Application>::Navigator,
>;
type NavigationFor<A> = NavigationState<<A as Application>::Route, <A as Application>::Navigator>;

struct RunnerShared<A, SM>
where
    A: Application,
    SM: SubscriptionManager<A::Route, A::Message, A::Subscription>,
{
    state: A::State,
    navigation: Option<NavigationFor<A>>,
    middlewares: Vec<Box<dyn Middleware<A::State, A::Message, A::Command>>>,
    subscriptions: SubscriptionsReconciler<A::Route, A::Message, A::Subscription, SM>,
}

struct RunnerCore<A, RD, CE, SM>
where
    A: Application,
    RD: ApplicationRenderer<A::Route, A::Message, A::Navigator>,
    CE: CommandExecutor<A::Route, A::Message, A::Command>,
    SM: SubscriptionManager<A::Route, A::Message, A::Subscription>,
{
    application: A,
    renderer: RD,
    command_executor: CE,
    queue: ExecutionQueue,
    shared: Mutex<RunnerShared<A, SM>>,
}

/// Owns a running application: its state, navigation state, middleware
/// chain, subscriptions, and the serialized dispatch queue.
pub struct ApplicationRunner<A, RD, CE, SM>
where
    A: Application,
    RD: ApplicationRenderer<A::Route, A::Message, A::Navigator>,
    CE: CommandExecutor<A::Route, A::Message, A::Command>,
    SM: SubscriptionManager<A::Route, A::Message, A::Subscription>,
{
    core: Arc<RunnerCore<A, RD, CE, SM>>,
}

impl<A, RD, CE, SM> ApplicationRunner<A, RD, CE, SM>
where
    A: Application,
    RD: ApplicationRenderer<A::Route, A::Message, A::Navigator>,
    CE: CommandExecutor<A::Route, A::Message, A::Command>,
    SM: SubscriptionManager<A::Route, A::Message, A::Subscription>,
{
    /// Create a runner. The renderer factory receives the dispatcher the
    /// renderer should hand interaction events to; the renderer's mailbox is
    /// additionally wired into the dispatch queue so widget events flow in
    /// without further plumbing.
    pub fn new(
        application: A,
        command_executor: CE,
        subscription_manager: SM,
        renderer_factory: impl FnOnce(Dispatcher<A::Route, A::Message>) -> RD,
    ) -> Self {
        let core = Arc::new_cyclic(|weak: &Weak<RunnerCore<A, RD, CE, SM>>| {
            let sink = weak.clone();
            let dispatcher = Dispatcher::new(move |action| {
                if let Some(core) = sink.upgrade() {
                    core.internal_dispatch(action);
                }
            });
            let renderer = renderer_factory(dispatcher.clone());
            let state = application.initial_state();
            RunnerCore {
                queue: ExecutionQueue::new(),
                shared: Mutex::new(RunnerShared {
                    state,
                    navigation: None,
                    middlewares: Vec::new(),
                    subscriptions: SubscriptionsReconciler::new(subscription_manager, dispatcher),
                }),
                application,
                renderer,
                command_executor,
            }
        });

        let runner = Self { core };
        let mailbox_dispatcher = runner.dispatcher();
        runner
            .core
            .renderer
            .mailbox()
            .subscribe(move |action| mailbox_dispatcher.dispatch(action.clone()));
        runner
    }

    /// Enqueue an action for serialized processing. Never blocks.
    pub fn dispatch(&self, action: Action<A::Route, A::Message>) {
        self.core.internal_dispatch(InternalAction::Action(action));
    }

    /// A cloneable handle for dispatching from other threads.
    pub fn dispatcher(&self) -> Dispatcher<A::Route, A::Message> {
        self.core.dispatcher()
    }

    /// Hand a command to the executor outside of any transition.
    pub fn execute(&self, command: A::Command) {
        self.core.execute(command);
    }

    /// Append to the middleware chain. The most recently registered
    /// middleware wraps all previously registered ones.
    pub fn register_middleware(
        &self,
        middleware: impl Middleware<A::State, A::Message, A::Command> + 'static,
    ) {
        self.core
            .shared
            .lock()
            .expect(LOCK)
            .middlewares
            .push(Box::new(middleware));
    }

    /// Block until every dispatched action has been fully processed and the
    /// queue is not suspended.
    pub fn wait_idle(&self) {
        self.core.queue.wait_idle();
    }

    /// A snapshot of the current state.
    pub fn current_state(&self) -> A::State {
        self.core.shared.lock().expect(LOCK).state.clone()
    }

    /// The current route, once navigation state exists.
    pub fn current_route(&self) -> Option<A::Route> {
        self.core
            .shared
            .lock()
            .expect(LOCK)
            .navigation
            .as_ref()
            .map(|navigation| navigation.current_route().clone())
    }
}

impl<A, RD, CE, SM> RunnerCore<A, RD, CE, SM>
where
    A: Application,
    RD: ApplicationRenderer<A::Route, A::Message, A::Navigator>,
    CE: CommandExecutor<A::Route, A::Message, A::Command>,
    SM: SubscriptionManager<A::Route, A::Message, A::Subscription>,
{
    fn internal_dispatch(self: &Arc<Self>, action: InternalAction<A::Route, A::Message>) {
        let core = Arc::clone(self);
        self.queue.enqueue(move || core.serial_dispatch(action));
    }

    fn dispatcher(self: &Arc<Self>) -> Dispatcher<A::Route, A::Message> {
        let weak = Arc::downgrade(self);
        Dispatcher::new(move |action| {
            if let Some(core) = weak.upgrade() {
                core.internal_dispatch(action);
            }
        })
    }

    fn execute(self: &Arc<Self>, command: A::Command) {
        self.command_executor.execute(command, self.dispatcher());
    }

    /// The per-action state machine. Runs exclusively on the queue worker.
    fn serial_dispatch(self: &Arc<Self>, action: InternalAction<A::Route, A::Message>) {
        let navigation = self.shared.lock().expect(LOCK).navigation.clone();

        match (action, navigation) {
            (InternalAction::Action(Action::DismissNavigator { then_send }), Some(navigation)) => {
                match navigation.dismiss_current_navigator() {
                    Some(intermediate) => {
                        let core = Arc::clone(self);
                        self.suspend_for_transition(
                            |renderer, completion| renderer.dismiss_current_navigator(completion),
                            move || {
                                core.handle_navigator_dismissal(
                                    &navigation,
                                    intermediate,
                                    then_send.map(|action| *action),
                                );
                            },
                        );
                    }
                    None => {
                        warn!(
                            target: "trellis.runner",
                            failure = %DispatchFailure::CannotDismissRootNavigator,
                            "dismiss dropped"
                        );
                    }
                }
            }

            (
                InternalAction::Action(Action::NavigateToPrevious { perform_transition }),
                Some(navigation),
            ) => match navigation.current_route().previous() {
                Some(previous) => {
                    if perform_transition {
                        let core = Arc::clone(self);
                        self.suspend_for_transition(
                            |renderer, completion| renderer.rewind_current_navigator(completion),
                            move || core.change_to_previous_route(navigation, previous),
                        );
                    } else {
                        self.change_to_previous_route(navigation, previous);
                    }
                }
                None => {
                    warn!(
                        target: "trellis.runner",
                        failure = %DispatchFailure::NoPreviousRoute,
                        route = ?navigation.current_route(),
                        "navigate-to-previous dropped"
                    );
                }
            },

            (InternalAction::Action(Action::Navigate { to }), Some(navigation))
                if *navigation.current_route() != to =>
            {
                let from = navigation.current_route().clone();
                let destination = to.clone();
                self.handle_route_change(&from, &to, move |core, view, next_state| {
                    let previous_navigator = navigation.current_navigator().clone();
                    let next_navigation = navigation.navigate(destination, view.navigator.clone());
                    let modally = *next_navigation.current_navigator() != previous_navigator;
                    {
                        let mut shared = core.shared.lock().expect(LOCK);
                        shared.state = next_state;
                        shared.navigation = Some(next_navigation);
                    }
                    core.present_view(view, modally);
                });
            }

            (InternalAction::Action(Action::SendMessage(message)), Some(navigation)) => {
                self.handle_message(message, move |core, view, next_state| {
                    let matches = view.navigator == *navigation.current_navigator();
                    core.shared.lock().expect(LOCK).state = next_state;
                    if matches {
                        core.render_view(view);
                    } else {
                        warn!(
                            target: "trellis.runner",
                            failure = %DispatchFailure::NavigatorMismatch,
                            navigator = ?view.navigator,
                            "state updated, render suppressed"
                        );
                    }
                });
            }

            (InternalAction::Action(Action::SendMessage(message)), None) => {
                self.handle_message(message, move |core, view, next_state| {
                    let initial_route = core.application.initial_route();
                    {
                        let mut shared = core.shared.lock().expect(LOCK);
                        shared.state = next_state;
                        shared.navigation =
                            Some(NavigationState::new(initial_route, view.navigator.clone()));
                    }
                    core.render_view(view);
                });
            }

            (InternalAction::NavigateToPreviousRouteAfterPop, Some(navigation)) => {
                // The renderer already popped its stack; catch the navigation
                // state up without another transition.
                match navigation.current_route().previous() {
                    Some(previous) => self.change_to_previous_route(navigation, previous),
                    None => {
                        warn!(
                            target: "trellis.runner",
                            failure = %DispatchFailure::NoPreviousRoute,
                            route = ?navigation.current_route(),
                            "back navigation dropped"
                        );
                    }
                }
            }

            (action, None) => {
                warn!(
                    target: "trellis.runner",
                    failure = %DispatchFailure::NavigationStateNotInitialized,
                    action = ?action,
                    "action dropped"
                );
            }

            (action, Some(_)) => {
                warn!(
                    target: "trellis.runner",
                    failure = %DispatchFailure::UnsupportedAction,
                    action = ?action,
                    "action dropped"
                );
            }
        }
    }

    /// Run a message through the middleware chain and, on an accepted
    /// transition, let `updater` commit state/navigation and drive the
    /// renderer, then reconcile subscriptions and execute the command.
    fn handle_message(
        self: &Arc<Self>,
        message: A::Message,
        updater: impl FnOnce(&Arc<Self>, ViewFor<A>, A::State),
    ) {
        let span = debug_span!("trellis.runner.update");
        let _entered = span.enter();

        let rejected_message = message.clone();
        let transition = {
            let shared = self.shared.lock().expect(LOCK);
            let state = shared.state.clone();
            apply_chain(
                &shared.middlewares,
                state,
                message,
                None,
                &|state, message, _command| self.application.update(&state, message),
            )
        };

        match transition {
            Some((next_state, maybe_command)) => {
                let view = self.application.view(&next_state);
                updater(self, view, next_state.clone());

                let next_subscriptions = self.application.subscriptions(&next_state);
                self.shared
                    .lock()
                    .expect(LOCK)
                    .subscriptions
                    .manage(next_subscriptions);

                if let Some(command) = maybe_command {
                    debug!(target: "trellis.runner", "executing command");
                    self.execute(command);
                }
            }
            None => {
                warn!(
                    target: "trellis.runner",
                    failure = %DispatchFailure::UnsupportedMessage,
                    message = ?rejected_message,
                    "state unchanged"
                );
            }
        }
    }

    fn handle_route_change(
        self: &Arc<Self>,
        from: &A::Route,
        to: &A::Route,
        updater: impl FnOnce(&Arc<Self>, ViewFor<A>, A::State),
    ) {
        match self.application.translate_route_change(from, to) {
            Some(message) => self.handle_message(message, updater),
            None => {
                warn!(
                    target: "trellis.runner",
                    failure = %DispatchFailure::UnsupportedRoute,
                    route = ?to,
                    "route change dropped"
                );
            }
        }
    }

    fn change_to_previous_route(
        self: &Arc<Self>,
        navigation: NavigationFor<A>,
        previous: A::Route,
    ) {
        let from = navigation.current_route().clone();
        let destination = previous.clone();
        self.handle_route_change(&from, &previous, move |core, view, next_state| {
            let next_navigation = navigation.navigate(destination, view.navigator.clone());
            {
                let mut shared = core.shared.lock().expect(LOCK);
                shared.state = next_state;
                shared.navigation = Some(next_navigation);
            }
            core.render_view(view);
        });
    }

    /// Apply the post-dismiss bookkeeping once the dismissal transition has
    /// completed. Runs out-of-band, ahead of actions buffered during the
    /// transition.
    ///
    /// When the follow-up is a `Navigate`, the application's route
    /// translation is asked only for the final route; the skipped
    /// intermediate route is never surfaced. The intermediate navigation
    /// state still decides whether the final view is presented modally or
    /// pushed.
    fn handle_navigator_dismissal(
        self: &Arc<Self>,
        from: &NavigationFor<A>,
        intermediate: NavigationFor<A>,
        then_send: Option<Action<A::Route, A::Message>>,
    ) {
        match then_send {
            Some(Action::Navigate { to }) => {
                let destination = to.clone();
                self.handle_route_change(
                    from.current_route(),
                    &to,
                    move |core, view, next_state| {
                        let next_navigation =
                            intermediate.navigate(destination, view.navigator.clone());
                        let modally = *intermediate.current_navigator()
                            != *next_navigation.current_navigator();
                        {
                            let mut shared = core.shared.lock().expect(LOCK);
                            shared.state = next_state;
                            shared.navigation = Some(next_navigation);
                        }
                        core.present_view(view, modally);
                    },
                );
            }
            other => {
                let intermediate_route = intermediate.current_route().clone();
                self.handle_route_change(
                    from.current_route(),
                    &intermediate_route,
                    move |core, view, next_state| {
                        {
                            let mut shared = core.shared.lock().expect(LOCK);
                            shared.state = next_state;
                            shared.navigation = Some(intermediate);
                        }
                        core.render_view(view);

                        // Handled in this same cycle so it runs before any
                        // action that arrived during the transition.
                        if let Some(action) = other {
                            core.serial_dispatch(InternalAction::Action(action));
                        }
                    },
                );
            }
        }
    }

    fn render_view(self: &Arc<Self>, view: ViewFor<A>) {
        self.run_renderer(move |renderer, completion| renderer.render(view, completion));
    }

    fn present_view(self: &Arc<Self>, view: ViewFor<A>, modally: bool) {
        if modally {
            self.run_renderer(move |renderer, completion| renderer.present_modal(view, completion));
        } else {
            self.run_renderer(move |renderer, completion| renderer.present(view, completion));
        }
    }

    /// Suspend the queue around a renderer call; the renderer's completion
    /// resumes it.
    fn run_renderer(self: &Arc<Self>, transition: impl FnOnce(&RD, Completion)) {
        self.queue.suspend();
        let core = Arc::clone(self);
        transition(&self.renderer, Box::new(move || core.queue.resume(None)));
    }

    /// Suspend the queue around a renderer transition; the completion
    /// resumes it with `continuation` running out-of-band.
    fn suspend_for_transition(
        self: &Arc<Self>,
        transition: impl FnOnce(&RD, Completion),
        continuation: impl FnOnce() + Send + 'static,
    ) {
        self.queue.suspend();
        let core = Arc::clone(self);
        transition(
            &self.renderer,
            Box::new(move || core.queue.resume_with(continuation)),
        );
    }
}
