//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when a reducer hands work to the runtime:
//! calls to the persistence backend and timers.

/// Wrap an async block into an [`Effect::Future`](crate::effect::Effect::Future)
///
/// The block must evaluate to `Option<Action>`; `Some` is fed back into the
/// reducer by the runtime.
///
/// # Example
///
/// ```
/// use quickcourt_core::{async_effect, effect::Effect};
///
/// #[derive(Debug)]
/// enum Action {
///     Saved { id: u32 },
/// }
///
/// let effect: Effect<Action> = async_effect! {
///     Some(Action::Saved { id: 7 })
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Build an [`Effect::Delay`](crate::effect::Effect::Delay)
///
/// # Example
///
/// ```
/// use quickcourt_core::{delay, effect::Effect};
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// enum Action {
///     TypingFinished,
/// }
///
/// let effect: Effect<Action> = delay! {
///     duration: Duration::from_millis(1000),
///     action: Action::TypingFinished
/// };
/// assert!(matches!(effect, Effect::Delay { .. }));
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
