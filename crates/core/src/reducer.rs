//! Reducer trait for view-state containers.

/// Pure, synchronous state transition.
///
/// - **Decision + evolution in one step**: `reduce(&self, action)` returns the next state.
/// - Transitions are total: an action that does not apply returns an unchanged copy.
///
/// Reducers must not perform IO or side effects; the owner of the state decides
/// when to publish the result.
pub trait Reducer: Clone + core::fmt::Debug {
    type Action: Clone + core::fmt::Debug;

    /// Compute the state that follows `action`.
    fn reduce(&self, action: &Self::Action) -> Self;
}

/// Fold a sequence of actions over an initial state.
pub fn reduce_all<'a, R, I>(initial: R, actions: I) -> R
where
    R: Reducer,
    R::Action: 'a,
    I: IntoIterator<Item = &'a R::Action>,
{
    actions
        .into_iter()
        .fold(initial, |state, action| state.reduce(action))
}
