mod breakpoints;
mod constant;
mod function;
mod linear;

#[cfg(feature = "serde")]
pub(crate) mod real;

pub use breakpoints::{Breakpoints, DomainError, InvalidArgument};
pub use constant::{PiecewiseConstantFunction, PiecewiseConstantFunctionDto};
pub use function::{Function, FunctionDto};
pub use linear::{PiecewiseLinearFunction, PiecewiseLinearFunctionDto, Segment};

#[cfg(feature = "serde")]
pub use real::Real;
