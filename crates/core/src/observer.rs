/// Watches a solver run and can steer it.
///
/// The BFGS and conjugate gradient minimizers call `observe` after every
/// iteration and whenever a line-search trial fails or stalls. Returning
/// `Some(action)` asks the solver to act on it, usually to stop with its
/// current best point. Returning `None` lets it carry on.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is one that
/// never acts.
pub trait Observer<E, A> {
    /// Handles one event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
