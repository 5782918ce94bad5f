/// Errors that can occur during minimization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The objective or its gradient failed at an accepted point.
    #[error("objective error: {0}")]
    Objective(Box<dyn std::error::Error + Send + Sync>),

    #[error("hessian approximation is singular at iteration {iter}")]
    SingularHessian { iter: usize },
}

impl Error {
    pub(crate) fn objective(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Objective(Box::new(error))
    }
}
