//! Core traits and types for the epifit workspace.
//!
//! This crate defines the shared abstractions that integration schemes,
//! optimizers, and models build on:
//!
//! - [`VectorField`]: the right-hand side and Jacobian of a fixed-dimension ODE
//! - [`Parameterized`]: a model whose rate constants can be replaced in place
//! - [`Objective`]: a scalar function with a gradient, minimized by optimizers
//! - [`Observer`]: receives solver events and optionally returns control actions
//!
//! States and parameters are `nalgebra` static vectors, so every dimension is a
//! compile-time constant and no solver step allocates.

mod linalg;
mod observer;
mod problems;

pub use linalg::{Matrix, Vector, lu_solve_in_place};
pub use nalgebra::{Const, DimMin};
pub use observer::Observer;
pub use problems::{Objective, Parameterized, VectorField};
