pub mod ode;
pub mod optimization;

pub use ode::{Parameterized, VectorField};
pub use optimization::Objective;
