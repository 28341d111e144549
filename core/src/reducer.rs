//! The Reducer trait - core abstraction for business logic.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! They contain all business logic and are deterministic and testable. Anything
//! asynchronous (store calls, dialogs, navigation) is described as an [`Effect`]
//! and executed by the store runtime, which feeds resulting actions back in.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The Reducer trait - core abstraction for business logic.
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for EventsReducer {
///     type State = EventsState;
///     type Action = EventsAction;
///     type Environment = EventsEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut EventsState,
///         action: EventsAction,
///         env: &EventsEnvironment,
///     ) -> SmallVec<[Effect<EventsAction>; 4]> {
///         match action {
///             EventsAction::FilterChanged { text } => {
///                 state.filter = text;
///                 smallvec![Effect::None]
///             }
///             _ => smallvec![Effect::None],
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects.
    ///
    /// This is a pure function that:
    /// 1. Validates the action
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed
    ///
    /// # Arguments
    ///
    /// - `state`: Mutable reference to current state
    /// - `action`: The action to process
    /// - `env`: Reference to injected dependencies
    ///
    /// # Returns
    ///
    /// Effects to be executed by the runtime. Most reductions produce zero or
    /// one effect, so the list is inlined up to four entries.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
