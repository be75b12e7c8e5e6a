//! Declared long-lived event sources and their reconciler.
//!
//! Applications declare subscriptions per state; after every accepted
//! transition the runtime hands the declared list to
//! [`SubscriptionsReconciler::manage`], which diffs it against the previous
//! list by equality. Removed entries are torn down, added entries are
//! started, unchanged entries are left running. Re-declaring an identical
//! list every render causes zero churn.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::application::{Action, Dispatcher, Route, SubscriptionManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRepeat {
    Forever,
    Times(u32),
}

/// A built-in timer subscription.
///
/// Two timers are equal only if value, unit, repeat policy, and tag all
/// match; the transform closure is excluded from equality since closures
/// cannot be compared. The tag exists to distinguish otherwise identical
/// timers that should run independently.
pub struct Timer<R, M> {
    pub value: u64,
    pub unit: TimerUnit,
    pub repeats: TimerRepeat,
    pub tag: Option<String>,
    transform: Arc<dyn Fn() -> Action<R, M> + Send + Sync>,
}

impl<R, M> Timer<R, M> {
    pub fn new(
        value: u64,
        unit: TimerUnit,
        repeats: TimerRepeat,
        transform: impl Fn() -> Action<R, M> + Send + Sync + 'static,
    ) -> Self {
        Self {
            value,
            unit,
            repeats,
            tag: None,
            transform: Arc::new(transform),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub(crate) fn interval(&self) -> Duration {
        match self.unit {
            TimerUnit::Milliseconds => Duration::from_millis(self.value),
            TimerUnit::Seconds => Duration::from_secs(self.value),
            TimerUnit::Minutes => Duration::from_secs(self.value * 60),
            TimerUnit::Hours => Duration::from_secs(self.value * 3600),
        }
    }

    pub(crate) fn fire(&self) -> Action<R, M> {
        (self.transform)()
    }
}

impl<R, M> Clone for Timer<R, M> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            unit: self.unit,
            repeats: self.repeats,
            tag: self.tag.clone(),
            transform: Arc::clone(&self.transform),
        }
    }
}

impl<R, M> PartialEq for Timer<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.unit == other.unit
            && self.repeats == other.repeats
            && self.tag == other.tag
    }
}

impl<R, M> fmt::Debug for Timer<R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("value", &self.value)
            .field("unit", &self.unit)
            .field("repeats", &self.repeats)
            .field("tag", &self.tag)
            .finish()
    }
}

/// A declared subscription: the built-in timer or an application-defined
/// kind handled by the custom [`SubscriptionManager`].
pub enum Subscription<M, R, S> {
    Timer(Timer<R, M>),
    Custom(S),
}

impl<M, R, S: Clone> Clone for Subscription<M, R, S> {
    fn clone(&self) -> Self {
        match self {
            Subscription::Timer(timer) => Subscription::Timer(timer.clone()),
            Subscription::Custom(custom) => Subscription::Custom(custom.clone()),
        }
    }
}

impl<M, R, S: PartialEq> PartialEq for Subscription<M, R, S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Subscription::Timer(a), Subscription::Timer(b)) => a == b,
            (Subscription::Custom(a), Subscription::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl<M, R, S> fmt::Debug for Subscription<M, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscription::Timer(timer) => f.debug_tuple("Timer").field(timer).finish(),
            Subscription::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Signal checked by a timer thread to know when to stop.
#[derive(Clone)]
struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if the interval elapsed. Loops to
    /// absorb spurious wakeups.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().expect("timer stop lock poisoned");
        if *stopped {
            return true;
        }

        let start = std::time::Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .expect("timer stop lock poisoned");
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().expect("timer stop lock poisoned") = true;
        cvar.notify_all();
    }
}

/// A running timer thread and the trigger that stops it.
struct RunningTimer {
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningTimer {
    fn spawn<R: Route, M: Send + 'static>(
        timer: Timer<R, M>,
        dispatcher: Dispatcher<R, M>,
    ) -> Self {
        let (signal, trigger) = StopSignal::new();
        let interval = timer.interval();
        let thread = thread::Builder::new()
            .name("trellis-timer".into())
            .spawn(move || {
                let mut remaining = match timer.repeats {
                    TimerRepeat::Forever => None,
                    TimerRepeat::Times(times) => Some(times),
                };
                loop {
                    if remaining == Some(0) {
                        break;
                    }
                    if signal.wait_timeout(interval) {
                        break;
                    }
                    dispatcher.dispatch(timer.fire());
                    if let Some(times) = &mut remaining {
                        *times -= 1;
                    }
                }
            })
            .expect("failed to spawn timer thread");
        Self {
            trigger,
            thread: Some(thread),
        }
    }

    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningTimer {
    fn drop(&mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

struct ActiveSubscription<M, R, S> {
    subscription: Subscription<M, R, S>,
    timer: Option<RunningTimer>,
}

/// Diffs declared subscription lists between renders and starts/stops event
/// sources accordingly.
pub(crate) struct SubscriptionsReconciler<R: Route, M, S, SM> {
    manager: SM,
    dispatcher: Dispatcher<R, M>,
    active: Vec<ActiveSubscription<M, R, S>>,
}

impl<R, M, S, SM> SubscriptionsReconciler<R, M, S, SM>
where
    R: Route,
    M: fmt::Debug + Clone + Send + 'static,
    S: Clone + PartialEq + Send + 'static,
    SM: SubscriptionManager<R, M, S>,
{
    pub(crate) fn new(manager: SM, dispatcher: Dispatcher<R, M>) -> Self {
        Self {
            manager,
            dispatcher,
            active: Vec::new(),
        }
    }

    /// Reconcile the currently running subscriptions against `next`.
    pub(crate) fn manage(&mut self, next: Vec<Subscription<M, R, S>>) {
        let previous = std::mem::take(&mut self.active);
        let mut kept: Vec<Option<ActiveSubscription<M, R, S>>> = Vec::new();

        for entry in previous {
            if next.contains(&entry.subscription) {
                kept.push(Some(entry));
            } else {
                self.stop(entry);
            }
        }

        for subscription in next {
            let already_running = kept.iter_mut().find(|slot| {
                slot.as_ref()
                    .is_some_and(|entry| entry.subscription == subscription)
            });
            match already_running {
                Some(slot) => {
                    // Equal declaration: keep the running source untouched.
                    self.active.push(slot.take().expect("slot checked above"));
                }
                None => self.start(subscription),
            }
        }
    }

    fn start(&mut self, subscription: Subscription<M, R, S>) {
        debug!(target: "trellis.subscriptions", "starting subscription");
        let timer = match &subscription {
            Subscription::Timer(timer) => Some(RunningTimer::spawn(
                timer.clone(),
                self.dispatcher.clone(),
            )),
            Subscription::Custom(custom) => {
                self.manager.add(custom.clone(), self.dispatcher.clone());
                None
            }
        };
        self.active.push(ActiveSubscription {
            subscription,
            timer,
        });
    }

    fn stop(&mut self, entry: ActiveSubscription<M, R, S>) {
        debug!(target: "trellis.subscriptions", "stopping subscription");
        match entry.subscription {
            Subscription::Timer(_) => {
                if let Some(timer) = entry.timer {
                    timer.stop();
                }
            }
            Subscription::Custom(custom) => self.manager.remove(custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Debug, Clone, PartialEq)]
    enum TestRoute {
        Only,
    }

    impl Route for TestRoute {
        fn previous(&self) -> Option<Self> {
            None
        }
    }

    type TestSubscription = Subscription<&'static str, TestRoute, &'static str>;

    struct RecordingManager {
        events: mpsc::Sender<(&'static str, &'static str)>,
    }

    impl SubscriptionManager<TestRoute, &'static str, &'static str> for RecordingManager {
        fn add(&mut self, subscription: &'static str, _: Dispatcher<TestRoute, &'static str>) {
            self.events.send(("add", subscription)).unwrap();
        }

        fn remove(&mut self, subscription: &'static str) {
            self.events.send(("remove", subscription)).unwrap();
        }
    }

    fn reconciler() -> (
        SubscriptionsReconciler<TestRoute, &'static str, &'static str, RecordingManager>,
        mpsc::Receiver<(&'static str, &'static str)>,
    ) {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Dispatcher::new(|_| {});
        (
            SubscriptionsReconciler::new(RecordingManager { events: tx }, dispatcher),
            rx,
        )
    }

    #[test]
    fn reconciling_an_identical_list_causes_no_churn() {
        let (mut reconciler, events) = reconciler();
        let declared: Vec<TestSubscription> =
            vec![Subscription::Custom("a"), Subscription::Custom("b")];

        reconciler.manage(declared.clone());
        assert_eq!(events.try_iter().count(), 2);

        reconciler.manage(declared);
        assert_eq!(events.try_iter().count(), 0, "no add/remove on re-declare");
    }

    #[test]
    fn removed_entries_are_torn_down_and_added_ones_started() {
        let (mut reconciler, events) = reconciler();
        reconciler.manage(vec![Subscription::Custom("a"), Subscription::Custom("b")]);
        events.try_iter().count();

        reconciler.manage(vec![Subscription::Custom("b"), Subscription::Custom("c")]);
        let recorded: Vec<_> = events.try_iter().collect();
        assert!(recorded.contains(&("remove", "a")));
        assert!(recorded.contains(&("add", "c")));
        assert_eq!(recorded.len(), 2);
    }

    #[test]
    fn timer_equality_includes_the_tag() {
        let base = || {
            Timer::<TestRoute, &'static str>::new(5, TimerUnit::Seconds, TimerRepeat::Forever, || {
                Action::SendMessage("tick")
            })
        };
        assert_eq!(base(), base());
        assert_ne!(base(), base().with_tag("poll"));
        assert_eq!(base().with_tag("poll"), base().with_tag("poll"));

        let mut faster = base();
        faster.value = 1;
        assert_ne!(base(), faster);
    }

    #[test]
    fn repeating_timer_fires_and_stops_with_its_count() {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let dispatcher = Dispatcher::new(move |action| {
            tx.lock().unwrap().send(action).unwrap();
        });
        let timer = Timer::<TestRoute, &'static str>::new(
            5,
            TimerUnit::Milliseconds,
            TimerRepeat::Times(3),
            || Action::SendMessage("tick"),
        );

        let mut running = RunningTimer::spawn(timer, dispatcher);
        // Joining waits for the three firings to complete.
        running.thread.take().unwrap().join().unwrap();

        assert_eq!(rx.try_iter().count(), 3);
    }

    #[test]
    fn stopped_timer_fires_no_more() {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let dispatcher = Dispatcher::new(move |action| {
            let _ = tx.lock().unwrap().send(action);
        });
        let timer = Timer::<TestRoute, &'static str>::new(
            60,
            TimerUnit::Seconds,
            TimerRepeat::Forever,
            || Action::SendMessage("tick"),
        );

        let running = RunningTimer::spawn(timer, dispatcher);
        running.stop();

        assert_eq!(rx.try_iter().count(), 0);
    }
}
