/// Actions an observer can take during minimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the current point.
    StopEarly,
}
