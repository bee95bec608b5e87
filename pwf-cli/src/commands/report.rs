use pwf_core::{
    models::{DomainError, Real},
    ports::PiecewiseFunction,
    sample::Sample,
};
use serde::Serialize;

// Reports use `Real` so that infinite values survive the trip through JSON.

/// An evaluated argument
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl From<Sample> for Point {
    fn from(value: Sample) -> Self {
        Self {
            x: value.x.into(),
            y: value.y.into(),
        }
    }
}

impl Point {
    /// Evaluate `function` at every argument, stopping at the first failure
    pub fn evaluate_all<F: PiecewiseFunction + ?Sized>(
        function: &F,
        at: &[f64],
    ) -> Result<Vec<Self>, DomainError> {
        at.iter()
            .map(|&x| {
                function.evaluate(x).map(|y| Self {
                    x: x.into(),
                    y: y.into(),
                })
            })
            .collect()
    }
}

/// An extreme value and the argument it is reported at
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extremum {
    pub value: Real,
    pub argument: Real,
}

impl From<(f64, f64)> for Extremum {
    fn from((value, argument): (f64, f64)) -> Self {
        Self {
            value: value.into(),
            argument: argument.into(),
        }
    }
}

/// Both extrema of a function
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extrema {
    pub minimum: Extremum,
    pub maximum: Extremum,
}

impl Extrema {
    pub fn of<F: PiecewiseFunction + ?Sized>(function: &F) -> Self {
        Self {
            minimum: function.minimum().into(),
            maximum: function.maximum().into(),
        }
    }
}

/// The domain `[lower, upper)` of a function
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DomainReport {
    pub lower: Real,
    pub upper: Real,
}

impl DomainReport {
    pub fn of<F: PiecewiseFunction + ?Sized>(function: &F) -> Self {
        let (lower, upper) = function.domain();
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}
