//! In-process pub/sub channel for bubbling interaction events upward.
//!
//! A [`Mailbox`] has reference semantics: cloning produces another handle to
//! the same subscriber list. Container renderers forward every child's
//! mailbox into their own, so a single handle at the root observes the whole
//! subtree no matter when subscribers were registered.

use std::sync::{Arc, Mutex};

type Subscriber<M> = Box<dyn Fn(&M) + Send>;

/// A many-producer event channel with late-binding subscribers.
pub struct Mailbox<M> {
    subscribers: Arc<Mutex<Vec<Subscriber<M>>>>,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<M> Default for Mailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Mailbox<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a subscriber invoked for every future message.
    pub fn subscribe(&self, subscriber: impl Fn(&M) + Send + 'static) {
        self.subscribers
            .lock()
            .expect("mailbox lock poisoned")
            .push(Box::new(subscriber));
    }

    /// Deliver a message to every current subscriber.
    pub fn dispatch(&self, message: &M) {
        let subscribers = self.subscribers.lock().expect("mailbox lock poisoned");
        for subscriber in subscribers.iter() {
            subscriber(message);
        }
    }

    /// The number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("mailbox lock poisoned")
            .len()
    }
}

impl<M: Clone + Send + 'static> Mailbox<M> {
    /// Forward every message to a parent mailbox.
    pub fn forward(&self, parent: &Mailbox<M>) {
        let parent = parent.clone();
        self.subscribe(move |message| parent.dispatch(message));
    }

    /// Forward every message to a parent mailbox after transforming it.
    pub fn forward_map<N: Send + 'static>(
        &self,
        parent: &Mailbox<N>,
        transform: impl Fn(&M) -> N + Send + 'static,
    ) {
        let parent = parent.clone();
        self.subscribe(move |message| parent.dispatch(&transform(message)));
    }

    /// Create a derived mailbox receiving only the messages the transform
    /// maps to `Some`.
    #[must_use]
    pub fn filter_map<N: Send + 'static>(
        &self,
        transform: impl Fn(&M) -> Option<N> + Send + 'static,
    ) -> Mailbox<N> {
        let derived = Mailbox::new();
        let handle = derived.clone();
        self.subscribe(move |message| {
            if let Some(transformed) = transform(message) {
                handle.dispatch(&transformed);
            }
        });
        derived
    }
}

impl<M> std::fmt::Debug for Mailbox<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn dispatch_reaches_all_subscribers() {
        let mailbox = Mailbox::<u32>::new();
        let (tx, rx) = mpsc::channel();
        let tx2 = tx.clone();
        mailbox.subscribe(move |m| tx.send(*m).unwrap());
        mailbox.subscribe(move |m| tx2.send(*m * 10).unwrap());

        mailbox.dispatch(&7);

        let received: Vec<u32> = rx.try_iter().collect();
        assert_eq!(received, vec![7, 70]);
    }

    #[test]
    fn clones_share_the_subscriber_list() {
        let mailbox = Mailbox::<u32>::new();
        let clone = mailbox.clone();
        let (tx, rx) = mpsc::channel();
        clone.subscribe(move |m| tx.send(*m).unwrap());

        mailbox.dispatch(&1);
        assert_eq!(rx.try_recv(), Ok(1));
    }

    #[test]
    fn forward_bubbles_to_parent() {
        let child = Mailbox::<u32>::new();
        let parent = Mailbox::<u32>::new();
        let (tx, rx) = mpsc::channel();
        parent.subscribe(move |m| tx.send(*m).unwrap());

        child.forward(&parent);
        child.dispatch(&42);

        assert_eq!(rx.try_recv(), Ok(42));
    }

    #[test]
    fn forward_map_transforms_on_the_way_up() {
        let child = Mailbox::<u32>::new();
        let parent = Mailbox::<String>::new();
        let (tx, rx) = mpsc::channel();
        parent.subscribe(move |m| tx.send(m.clone()).unwrap());

        child.forward_map(&parent, |m| format!("got {m}"));
        child.dispatch(&3);

        assert_eq!(rx.try_recv().unwrap(), "got 3");
    }

    #[test]
    fn filter_map_drops_unmapped_messages() {
        let source = Mailbox::<u32>::new();
        let derived = source.filter_map(|m| if *m % 2 == 0 { Some(*m) } else { None });
        let (tx, rx) = mpsc::channel();
        derived.subscribe(move |m| tx.send(*m).unwrap());

        source.dispatch(&1);
        source.dispatch(&2);
        source.dispatch(&3);
        source.dispatch(&4);

        let received: Vec<u32> = rx.try_iter().collect();
        assert_eq!(received, vec![2, 4]);
    }
}
