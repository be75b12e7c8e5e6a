//! The Trellis runtime: serialized dispatch over a pure application.
//!
//! An [`Application`](application::Application) describes state, updates,
//! views, and subscriptions as pure functions. The
//! [`ApplicationRunner`](runner::ApplicationRunner) owns one running
//! instance: it funnels every action through a single serialized queue,
//! drives the renderer, tracks the navigation state, runs the middleware
//! chain, and reconciles declared subscriptions against running ones.

#![forbid(unsafe_code)]

pub mod application;
pub mod middleware;
pub mod navigation;
#[cfg(feature = "state-persistence")]
pub mod persistor;
pub mod runner;
pub mod subscription;

pub(crate) mod queue;

pub use application::{
    Action, AlertButton, AlertProperties, Application, ApplicationRenderer, CommandExecutor,
    Completion, Content, Dispatcher, Route, SubscriptionManager, View,
};
pub use middleware::{Middleware, Next, TimeLogger, Transition};
pub use navigation::NavigationState;
#[cfg(feature = "state-persistence")]
pub use persistor::{JsonSerializer, PersistError, StatePersistor, StateSerializer};
pub use runner::{ApplicationRunner, DispatchFailure};
pub use subscription::{Subscription, Timer, TimerRepeat, TimerUnit};
