//! End-to-end dispatch tests: a small counter application driven through a
//! recording renderer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use trellis_runtime::{
    Action, Application, ApplicationRenderer, ApplicationRunner, CommandExecutor, Completion,
    Content, Dispatcher, Route, SubscriptionManager, View,
};
use trellis_view::Mailbox;
use trellis_view::component::Component;
use trellis_view::root::RootComponent;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TestRoute {
    Root,
    Detail,
    Settings,
}

impl Route for TestRoute {
    fn previous(&self) -> Option<Self> {
        match self {
            TestRoute::Root => None,
            TestRoute::Detail => Some(TestRoute::Root),
            TestRoute::Settings => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Nav {
    Main,
    Sheet,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TestState {
    counter: u32,
    route: TestRoute,
    notes: Vec<String>,
}

impl Default for TestRoute {
    fn default() -> Self {
        TestRoute::Root
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TestMessage {
    Increment,
    Note(String),
    Show(TestRoute),
    /// Moves the state to a route without any navigation action, so the
    /// resulting view resolves to a navigator the runtime is not showing.
    ForceRoute(TestRoute),
    Ping,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TestCommand {
    Pong,
}

struct TestApp;

impl Application for TestApp {
    type State = TestState;
    type Message = TestMessage;
    type Command = TestCommand;
    type Route = TestRoute;
    type Navigator = Nav;
    type Subscription = ();

    fn initial_state(&self) -> TestState {
        TestState::default()
    }

    fn initial_route(&self) -> TestRoute {
        TestRoute::Root
    }

    fn translate_route_change(
        &self,
        _from: &TestRoute,
        to: &TestRoute,
    ) -> Option<TestMessage> {
        Some(TestMessage::Show(*to))
    }

    fn update(
        &self,
        state: &TestState,
        message: TestMessage,
    ) -> Option<(TestState, Option<TestCommand>)> {
        let mut next = state.clone();
        match message {
            TestMessage::Increment => next.counter += 1,
            TestMessage::Note(text) => next.notes.push(text),
            TestMessage::Show(route) | TestMessage::ForceRoute(route) => next.route = route,
            TestMessage::Ping => return Some((next, Some(TestCommand::Pong))),
        }
        Some((next, None))
    }

    fn view(&self, state: &TestState) -> View<TestRoute, TestMessage, Nav> {
        let navigator = match state.route {
            TestRoute::Settings => Nav::Sheet,
            _ => Nav::Main,
        };
        View::component(
            navigator,
            RootComponent::Simple,
            trellis_view::label(state.counter.to_string()),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Render(String),
    Present(String),
    PresentModal(String),
    Dismiss,
    Rewind,
}

fn label_text(view: &View<TestRoute, TestMessage, Nav>) -> String {
    match &view.content {
        Content::Component(Component::Label(properties, _, _)) => properties.text.clone(),
        _ => String::new(),
    }
}

/// Records every call; completions fire inline unless `hold` is set, in
/// which case they pile up for manual release.
struct TestRenderer {
    mailbox: Mailbox<Action<TestRoute, TestMessage>>,
    events: Arc<Mutex<Vec<Event>>>,
    hold: Arc<AtomicBool>,
    held: Arc<Mutex<Vec<Completion>>>,
}

impl TestRenderer {
    fn record(&self, event: Event, completion: Completion) {
        self.events.lock().unwrap().push(event);
        if self.hold.load(Ordering::SeqCst) {
            self.held.lock().unwrap().push(completion);
        } else {
            completion();
        }
    }
}

impl ApplicationRenderer<TestRoute, TestMessage, Nav> for TestRenderer {
    fn mailbox(&self) -> Mailbox<Action<TestRoute, TestMessage>> {
        self.mailbox.clone()
    }

    fn render(&self, view: View<TestRoute, TestMessage, Nav>, completion: Completion) {
        self.record(Event::Render(label_text(&view)), completion);
    }

    fn present(&self, view: View<TestRoute, TestMessage, Nav>, completion: Completion) {
        self.record(Event::Present(label_text(&view)), completion);
    }

    fn present_modal(&self, view: View<TestRoute, TestMessage, Nav>, completion: Completion) {
        self.record(Event::PresentModal(label_text(&view)), completion);
    }

    fn dismiss_current_navigator(&self, completion: Completion) {
        self.record(Event::Dismiss, completion);
    }

    fn rewind_current_navigator(&self, completion: Completion) {
        self.record(Event::Rewind, completion);
    }
}

struct TestExecutor;

impl CommandExecutor<TestRoute, TestMessage, TestCommand> for TestExecutor {
    fn execute(&self, command: TestCommand, dispatcher: Dispatcher<TestRoute, TestMessage>) {
        match command {
            TestCommand::Pong => {
                dispatcher.dispatch(Action::SendMessage(TestMessage::Note("pong".into())));
            }
        }
    }
}

struct NoopSubscriptions;

impl SubscriptionManager<TestRoute, TestMessage, ()> for NoopSubscriptions {
    fn add(&mut self, _subscription: (), _dispatcher: Dispatcher<TestRoute, TestMessage>) {}

    fn remove(&mut self, _subscription: ()) {}
}

struct Harness {
    runner: ApplicationRunner<TestApp, TestRenderer, TestExecutor, NoopSubscriptions>,
    mailbox: Mailbox<Action<TestRoute, TestMessage>>,
    events: Arc<Mutex<Vec<Event>>>,
    hold: Arc<AtomicBool>,
    held: Arc<Mutex<Vec<Completion>>>,
}

impl Harness {
    fn new() -> Self {
        let mailbox = Mailbox::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let hold = Arc::new(AtomicBool::new(false));
        let held = Arc::new(Mutex::new(Vec::new()));

        let renderer_mailbox = mailbox.clone();
        let renderer_events = Arc::clone(&events);
        let renderer_hold = Arc::clone(&hold);
        let renderer_held = Arc::clone(&held);
        let runner = ApplicationRunner::new(TestApp, TestExecutor, NoopSubscriptions, move |_| {
            TestRenderer {
                mailbox: renderer_mailbox,
                events: renderer_events,
                hold: renderer_hold,
                held: renderer_held,
            }
        });

        Self {
            runner,
            mailbox,
            events,
            hold,
            held,
        }
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn wait_for_held(&self, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while self.held.lock().unwrap().len() < count {
            assert!(Instant::now() < deadline, "renderer never reached {count} held completions");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn release_one(&self) {
        let completion = self.held.lock().unwrap().remove(0);
        completion();
    }
}

#[test]
fn each_accepted_message_renders_exactly_once() {
    let harness = Harness::new();
    for _ in 0..3 {
        harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    }
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_state().counter, 3);
    assert_eq!(
        harness.events(),
        vec![
            Event::Render("1".into()),
            Event::Render("2".into()),
            Event::Render("3".into()),
        ]
    );
}

#[test]
fn first_message_initializes_navigation_at_the_initial_route() {
    let harness = Harness::new();
    assert_eq!(harness.runner.current_route(), None);

    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), Some(TestRoute::Root));
}

#[test]
fn navigation_actions_before_the_first_message_are_dropped() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Detail,
    });
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), None);
    assert!(harness.events().is_empty());
}

#[test]
fn push_and_rewind_within_one_navigator() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Detail,
    });
    harness.runner.dispatch(Action::NavigateToPrevious {
        perform_transition: true,
    });
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), Some(TestRoute::Root));
    assert_eq!(
        harness.events(),
        vec![
            Event::Render("1".into()),
            Event::Present("1".into()),
            Event::Rewind,
            Event::Render("1".into()),
        ]
    );
}

#[test]
fn navigate_to_previous_without_transition_skips_the_rewind() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Detail,
    });
    harness.runner.dispatch(Action::NavigateToPrevious {
        perform_transition: false,
    });
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), Some(TestRoute::Root));
    assert!(!harness.events().contains(&Event::Rewind));
}

#[test]
fn navigate_to_previous_at_the_root_is_dropped() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::NavigateToPrevious {
        perform_transition: true,
    });
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), Some(TestRoute::Root));
    assert_eq!(harness.events(), vec![Event::Render("1".into())]);
}

#[test]
fn navigating_to_a_different_navigator_presents_modally() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Settings,
    });
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), Some(TestRoute::Settings));
    assert_eq!(
        harness.events(),
        vec![
            Event::Render("1".into()),
            Event::PresentModal("1".into()),
        ]
    );
}

#[test]
fn dismissing_the_modal_returns_to_the_root_layer() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Settings,
    });
    harness.runner.dispatch(Action::DismissNavigator { then_send: None });
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_route(), Some(TestRoute::Root));
    assert_eq!(
        harness.events(),
        vec![
            Event::Render("1".into()),
            Event::PresentModal("1".into()),
            Event::Dismiss,
            Event::Render("1".into()),
        ]
    );
}

#[test]
fn dismissing_without_a_modal_is_dropped() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::DismissNavigator { then_send: None });
    harness.runner.wait_idle();

    assert_eq!(harness.events(), vec![Event::Render("1".into())]);
}

#[test]
fn dismiss_follow_up_runs_before_actions_buffered_during_the_transition() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Settings,
    });
    harness.runner.wait_idle();

    harness.hold.store(true, Ordering::SeqCst);
    harness.runner.dispatch(Action::DismissNavigator {
        then_send: Some(Box::new(Action::SendMessage(TestMessage::Note(
            "follow-up".into(),
        )))),
    });
    harness.wait_for_held(1);

    // Arrives while the dismissal transition is still in flight.
    harness
        .runner
        .dispatch(Action::SendMessage(TestMessage::Note("buffered".into())));

    harness.hold.store(false, Ordering::SeqCst);
    harness.release_one();
    harness.runner.wait_idle();

    assert_eq!(
        harness.runner.current_state().notes,
        vec!["follow-up".to_string(), "buffered".to_string()]
    );
}

#[test]
fn dismiss_then_navigate_translates_only_the_final_route() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Settings,
    });
    harness.runner.dispatch(Action::DismissNavigator {
        then_send: Some(Box::new(Action::Navigate {
            to: TestRoute::Detail,
        })),
    });
    harness.runner.wait_idle();

    // The intermediate root route is never rendered: the dismissal leads
    // straight into the push of the final route.
    assert_eq!(harness.runner.current_route(), Some(TestRoute::Detail));
    assert_eq!(
        harness.events(),
        vec![
            Event::Render("1".into()),
            Event::PresentModal("1".into()),
            Event::Dismiss,
            Event::Present("1".into()),
        ]
    );
}

#[test]
fn navigator_mismatch_updates_state_but_suppresses_the_render() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::SendMessage(TestMessage::ForceRoute(
        TestRoute::Settings,
    )));
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_state().route, TestRoute::Settings);
    assert_eq!(harness.events(), vec![Event::Render("1".into())]);
}

#[test]
fn navigating_to_the_current_route_is_dropped() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::Navigate {
        to: TestRoute::Root,
    });
    harness.runner.wait_idle();

    assert_eq!(harness.events(), vec![Event::Render("1".into())]);
}

#[test]
fn commands_dispatch_follow_up_messages() {
    let harness = Harness::new();
    harness.runner.dispatch(Action::SendMessage(TestMessage::Ping));
    harness.runner.wait_idle();

    // The executor's follow-up goes through the queue like any action; give
    // it one more drain in case it was dispatched from another thread.
    harness.runner.wait_idle();
    assert_eq!(harness.runner.current_state().notes, vec!["pong".to_string()]);
}

#[test]
fn rejected_messages_leave_state_and_renderer_untouched() {
    struct RejectingApp;

    impl Application for RejectingApp {
        type State = u32;
        type Message = &'static str;
        type Command = ();
        type Route = TestRoute;
        type Navigator = Nav;
        type Subscription = ();

        fn initial_state(&self) -> u32 {
            0
        }

        fn initial_route(&self) -> TestRoute {
            TestRoute::Root
        }

        fn translate_route_change(
            &self,
            _from: &TestRoute,
            _to: &TestRoute,
        ) -> Option<&'static str> {
            None
        }

        fn update(&self, state: &u32, message: &'static str) -> Option<(u32, Option<()>)> {
            (message == "inc").then(|| (state + 1, None))
        }

        fn view(&self, state: &u32) -> View<TestRoute, &'static str, Nav> {
            View::component(
                Nav::Main,
                RootComponent::Simple,
                trellis_view::label(state.to_string()),
            )
        }
    }

    struct SilentRenderer {
        mailbox: Mailbox<Action<TestRoute, &'static str>>,
        renders: Arc<Mutex<u32>>,
    }

    impl ApplicationRenderer<TestRoute, &'static str, Nav> for SilentRenderer {
        fn mailbox(&self) -> Mailbox<Action<TestRoute, &'static str>> {
            self.mailbox.clone()
        }

        fn render(&self, _view: View<TestRoute, &'static str, Nav>, completion: Completion) {
            *self.renders.lock().unwrap() += 1;
            completion();
        }

        fn present(&self, _view: View<TestRoute, &'static str, Nav>, completion: Completion) {
            completion();
        }

        fn present_modal(
            &self,
            _view: View<TestRoute, &'static str, Nav>,
            completion: Completion,
        ) {
            completion();
        }

        fn dismiss_current_navigator(&self, completion: Completion) {
            completion();
        }

        fn rewind_current_navigator(&self, completion: Completion) {
            completion();
        }
    }

    struct NoopExecutor;

    impl CommandExecutor<TestRoute, &'static str, ()> for NoopExecutor {
        fn execute(&self, _command: (), _dispatcher: Dispatcher<TestRoute, &'static str>) {}
    }

    struct Subs;

    impl SubscriptionManager<TestRoute, &'static str, ()> for Subs {
        fn add(&mut self, _s: (), _d: Dispatcher<TestRoute, &'static str>) {}

        fn remove(&mut self, _s: ()) {}
    }

    let renders = Arc::new(Mutex::new(0u32));
    let renderer_renders = Arc::clone(&renders);
    let runner = ApplicationRunner::new(RejectingApp, NoopExecutor, Subs, move |_| {
        SilentRenderer {
            mailbox: Mailbox::new(),
            renders: renderer_renders,
        }
    });

    runner.dispatch(Action::SendMessage("inc"));
    runner.dispatch(Action::SendMessage("bogus"));
    runner.dispatch(Action::SendMessage("inc"));
    runner.wait_idle();

    assert_eq!(runner.current_state(), 2);
    assert_eq!(*renders.lock().unwrap(), 2);
}

#[test]
fn renderer_mailbox_feeds_the_dispatch_queue() {
    let harness = Harness::new();
    harness
        .mailbox
        .dispatch(&Action::SendMessage(TestMessage::Increment));
    harness.runner.wait_idle();

    assert_eq!(harness.runner.current_state().counter, 1);
}

#[test]
fn middleware_observes_every_dispatched_message() {
    let harness = Harness::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    harness.runner.register_middleware(
        move |state: TestState,
              message: TestMessage,
              command: Option<TestCommand>,
              next: trellis_runtime::Next<'_, TestState, TestMessage, TestCommand>| {
            recorder.lock().unwrap().push(message.clone());
            next(state, message, command)
        },
    );

    harness.runner.dispatch(Action::SendMessage(TestMessage::Increment));
    harness.runner.dispatch(Action::SendMessage(TestMessage::Note("x".into())));
    harness.runner.wait_idle();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![TestMessage::Increment, TestMessage::Note("x".into())]
    );
}
