//! The serialized dispatch queue: one worker, many producers.
//!
//! Operations run in arrival order, one at a time. The runner suspends the
//! queue around renderer transitions and resumes it from the renderer's
//! completion, optionally handing a continuation that must run before any
//! operation buffered during the suspension. Multiple pending out-of-band
//! continuations run newest-first, mirroring how nested resumptions unwind.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

type Operation = Box<dyn FnOnce() + Send>;

struct QueueState {
    operations: VecDeque<Operation>,
    /// Continuations that pre-empt buffered operations; front is newest.
    out_of_band: VecDeque<Operation>,
    suspended: u32,
    running: bool,
    shutdown: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    work: Condvar,
    idle: Condvar,
}

pub(crate) struct ExecutionQueue {
    shared: Arc<Shared>,
    worker: Option<thread::JoinHandle<()>>,
}

impl ExecutionQueue {
    pub(crate) fn new() -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                operations: VecDeque::new(),
                out_of_band: VecDeque::new(),
                suspended: 0,
                running: false,
                shutdown: false,
            }),
            work: Condvar::new(),
            idle: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("trellis-dispatch".into())
            .spawn(move || Self::run_worker(&worker_shared))
            .expect("failed to spawn dispatch queue worker");

        Self {
            shared,
            worker: Some(worker),
        }
    }

    fn run_worker(shared: &Shared) {
        loop {
            let operation = {
                let mut state = shared.state.lock().expect("queue lock poisoned");
                loop {
                    if state.shutdown {
                        return;
                    }
                    if state.suspended == 0 {
                        // `running` flips under the same lock as the pop so
                        // `wait_idle` never observes an in-between state.
                        if let Some(operation) = state.out_of_band.pop_front() {
                            state.running = true;
                            break operation;
                        }
                        if let Some(operation) = state.operations.pop_front() {
                            state.running = true;
                            break operation;
                        }
                    }
                    state = shared.work.wait(state).expect("queue lock poisoned");
                }
            };

            operation();
            {
                let mut state = shared.state.lock().expect("queue lock poisoned");
                state.running = false;
            }
            shared.idle.notify_all();
        }
    }

    /// Enqueue an operation for serialized execution. Never blocks.
    pub(crate) fn enqueue(&self, operation: impl FnOnce() + Send + 'static) {
        let mut state = self.shared.state.lock().expect("queue lock poisoned");
        state.operations.push_back(Box::new(operation));
        drop(state);
        self.shared.work.notify_one();
    }

    /// Halt intake after the currently running operation completes.
    /// Suspensions nest; each must be matched by a [`resume`](Self::resume).
    pub(crate) fn suspend(&self) {
        let mut state = self.shared.state.lock().expect("queue lock poisoned");
        state.suspended += 1;
    }

    /// Re-enable intake. An out-of-band operation, if supplied, runs before
    /// any operation buffered while suspended.
    pub(crate) fn resume(&self, out_of_band: Option<Operation>) {
        let mut state = self.shared.state.lock().expect("queue lock poisoned");
        if let Some(operation) = out_of_band {
            state.out_of_band.push_front(operation);
        }
        state.suspended = state.suspended.saturating_sub(1);
        drop(state);
        self.shared.work.notify_one();
        self.shared.idle.notify_all();
    }

    pub(crate) fn resume_with(&self, continuation: impl FnOnce() + Send + 'static) {
        self.resume(Some(Box::new(continuation)));
    }

    /// Block until the queue is drained, not suspended, and no operation is
    /// running.
    pub(crate) fn wait_idle(&self) {
        let mut state = self.shared.state.lock().expect("queue lock poisoned");
        while state.running
            || state.suspended > 0
            || !state.operations.is_empty()
            || !state.out_of_band.is_empty()
        {
            state = self.shared.idle.wait(state).expect("queue lock poisoned");
        }
    }
}

impl Drop for ExecutionQueue {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().expect("queue lock poisoned");
            state.shutdown = true;
        }
        self.shared.work.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
