#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Concrete piecewise function types.
///
/// This module contains the validated breakpoint partition, the two function
/// families built on top of it, and the errors raised while constructing or
/// evaluating them. Every type here is immutable once constructed: validation
/// happens exactly once, in the constructor or the `TryFrom` conversion from
/// the corresponding DTO.
pub mod models;

/// Interface traits for piecewise functions.
///
/// The [`PiecewiseFunction`](ports::PiecewiseFunction) trait is the contract
/// that every function family implements. Consumers that only need to query a
/// function (such as the sampling utility) should depend on this trait rather
/// than on a concrete type.
pub mod ports;

/// Evenly spaced sampling of a piecewise function over a finite range.
pub mod sample;
