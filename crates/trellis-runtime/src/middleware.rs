//! The middleware chain wrapping the application's update function.
//!
//! Registration appends, execution nests: the chain `[A, B, C]` runs as
//! `C(B(A(update)))`, so the most recently registered middleware is the
//! outermost interceptor and the application's pure update is always the
//! innermost link.

use std::fmt;
use std::time::Instant;

use tracing::debug;

/// The outcome of running a message through the chain: a replacement state
/// plus at most one command, or `None` to reject the message outright.
pub type Transition<S, C> = Option<(S, Option<C>)>;

/// Continuation to the remaining (inner) chain.
pub type Next<'a, S, M, C> = &'a mut dyn FnMut(S, M, Option<C>) -> Transition<S, C>;

/// An interceptor around state transitions.
///
/// A middleware may call `next` and pass its result through, call `next`
/// and rewrite the result, skip `next` entirely and produce its own
/// transition, or return `None` to reject the message.
pub trait Middleware<S, M, C>: Send {
    fn apply(
        &self,
        state: S,
        message: M,
        command: Option<C>,
        next: Next<'_, S, M, C>,
    ) -> Transition<S, C>;
}

impl<S, M, C, F> Middleware<S, M, C> for F
where
    F: Fn(S, M, Option<C>, Next<'_, S, M, C>) -> Transition<S, C> + Send,
{
    fn apply(
        &self,
        state: S,
        message: M,
        command: Option<C>,
        next: Next<'_, S, M, C>,
    ) -> Transition<S, C> {
        self(state, message, command, next)
    }
}

/// Run `message` through the chain, outermost (last registered) first, with
/// `update` as the innermost link.
pub(crate) fn apply_chain<S, M, C>(
    chain: &[Box<dyn Middleware<S, M, C>>],
    state: S,
    message: M,
    command: Option<C>,
    update: &dyn Fn(S, M, Option<C>) -> Transition<S, C>,
) -> Transition<S, C> {
    match chain.split_last() {
        None => update(state, message, command),
        Some((outermost, inner)) => outermost.apply(
            state,
            message,
            command,
            &mut |next_state, next_message, next_command| {
                apply_chain(inner, next_state, next_message, next_command, update)
            },
        ),
    }
}

/// Middleware that logs how long each transition took.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeLogger;

impl<S, M: fmt::Debug, C> Middleware<S, M, C> for TimeLogger {
    fn apply(
        &self,
        state: S,
        message: M,
        command: Option<C>,
        next: Next<'_, S, M, C>,
    ) -> Transition<S, C> {
        let label = format!("{message:?}");
        let started = Instant::now();
        let transition = next(state, message, command);
        debug!(
            target: "trellis.runner.update",
            message = %label,
            elapsed_us = started.elapsed().as_micros() as u64,
            rejected = transition.is_none(),
            "transition timed"
        );
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Chain = Vec<Box<dyn Middleware<u32, &'static str, ()>>>;

    fn update(state: u32, message: &'static str, _: Option<()>) -> Transition<u32, ()> {
        match message {
            "inc" => Some((state + 1, None)),
            _ => None,
        }
    }

    #[test]
    fn empty_chain_is_just_update() {
        let chain: Chain = Vec::new();
        assert_eq!(apply_chain(&chain, 0, "inc", None, &update), Some((1, None)));
        assert_eq!(apply_chain(&chain, 0, "nope", None, &update), None);
    }

    #[test]
    fn last_registered_runs_outermost() {
        // Each middleware multiplies the resulting state; the outer one must
        // observe the inner one's result.
        let mut chain: Chain = Vec::new();
        chain.push(Box::new(
            |state, message, command, next: Next<'_, u32, &'static str, ()>| {
                next(state, message, command).map(|(s, c)| (s + 10, c))
            },
        ));
        chain.push(Box::new(
            |state, message, command, next: Next<'_, u32, &'static str, ()>| {
                next(state, message, command).map(|(s, c)| (s * 2, c))
            },
        ));

        // update: 0 -> 1; first registered: +10 -> 11; last registered,
        // outermost: *2 -> 22.
        assert_eq!(apply_chain(&chain, 0, "inc", None, &update), Some((22, None)));
    }

    #[test]
    fn middleware_can_short_circuit_without_calling_next() {
        let mut chain: Chain = Vec::new();
        chain.push(Box::new(
            |_, _, _, _: Next<'_, u32, &'static str, ()>| Some((99, None)),
        ));
        assert_eq!(apply_chain(&chain, 0, "inc", None, &update), Some((99, None)));
    }

    #[test]
    fn middleware_can_reject() {
        let mut chain: Chain = Vec::new();
        chain.push(Box::new(|_, _, _, _: Next<'_, u32, &'static str, ()>| None));
        assert_eq!(apply_chain(&chain, 0, "inc", None, &update), None);
    }

    #[test]
    fn rewriting_the_message_reaches_update() {
        let mut chain: Chain = Vec::new();
        chain.push(Box::new(
            |state, _, command, next: Next<'_, u32, &'static str, ()>| {
                next(state, "inc", command)
            },
        ));
        assert_eq!(
            apply_chain(&chain, 5, "anything", None, &update),
            Some((6, None))
        );
    }

    #[test]
    fn time_logger_passes_transitions_through() {
        let mut chain: Chain = Vec::new();
        chain.push(Box::new(TimeLogger));
        assert_eq!(apply_chain(&chain, 0, "inc", None, &update), Some((1, None)));
        assert_eq!(apply_chain(&chain, 0, "nope", None, &update), None);
    }
}
