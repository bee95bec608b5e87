use crate::{
    models::{Breakpoints, DomainError, InvalidArgument},
    ports::PiecewiseFunction,
};
use tracing::{Level, event};

/// A representation of a piecewise-constant function
///
/// The function takes the value `values[i]` on the half-open interval
/// `[breakpoints[i], breakpoints[i+1])`. For example, breakpoints `[0, 1, 2, 3]`
/// with values `[1, 2, 1]` describe a function equal to 1 on `[0, 1)`, 2 on `[1, 2)`
/// and 1 again on `[2, 3)`. The outermost breakpoints may be infinite, which makes
/// the domain unbounded on that side.
///
/// Values may be infinite, but never NaN.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "PiecewiseConstantFunctionDto",
        into = "PiecewiseConstantFunctionDto"
    )
)]
pub struct PiecewiseConstantFunction {
    breakpoints: Breakpoints,
    values: Vec<f64>,
}

impl PiecewiseConstantFunction {
    /// Creates a new piecewise-constant function, validating all constraints
    pub fn new(breakpoints: Vec<f64>, values: Vec<f64>) -> Result<Self, InvalidArgument> {
        Self::try_from(PiecewiseConstantFunctionDto {
            breakpoints,
            values,
        })
    }

    /// Creates a new piecewise-constant function without validation
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the inputs satisfy every rule checked by
    /// [`Breakpoints::validate`]. Evaluating an invalid function may panic or return
    /// values from the wrong interval.
    pub unsafe fn new_unchecked(breakpoints: Vec<f64>, values: Vec<f64>) -> Self {
        Self {
            breakpoints: unsafe { Breakpoints::new_unchecked(breakpoints) },
            values,
        }
    }

    /// The breakpoints partitioning the domain
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// The value on each interval
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of intervals
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, since a valid function has at least one interval
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(left, right, value)` for every interval in index order
    pub fn intervals(&self) -> impl ExactSizeIterator<Item = (f64, f64, f64)> + '_ {
        self.breakpoints
            .intervals()
            .zip(self.values.iter())
            .map(|((left, right), &value)| (left, right, value))
    }

    /// Finds the first interval whose value beats every earlier one under `better`
    fn extremum(&self, better: impl Fn(f64, f64) -> bool) -> (f64, f64) {
        let mut best = 0;
        for (i, &value) in self.values.iter().enumerate().skip(1) {
            if better(value, self.values[best]) {
                best = i;
            }
        }
        (self.values[best], self.breakpoints[best])
    }
}

impl PiecewiseFunction for PiecewiseConstantFunction {
    fn evaluate(&self, x: f64) -> Result<f64, DomainError> {
        // NaN is neither inside nor outside, so it falls through to the lookup
        if !x.is_nan() && !self.breakpoints.contains(x) {
            let (lower, upper) = self.breakpoints.domain();
            return Err(DomainError::OutOfBounds { x, lower, upper });
        }

        self.breakpoints
            .locate(x)
            .map(|i| self.values[i])
            .ok_or(DomainError::NoInterval { x })
    }

    /// The smallest value, reported at the left breakpoint of its first occurrence
    fn minimum(&self) -> (f64, f64) {
        self.extremum(|candidate, best| candidate < best)
    }

    /// The largest value, reported at the left breakpoint of its first occurrence
    fn maximum(&self) -> (f64, f64) {
        self.extremum(|candidate, best| candidate > best)
    }

    fn domain(&self) -> (f64, f64) {
        self.breakpoints.domain()
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseConstantFunctionDto {
    /// The `n + 1` breakpoints, in increasing order
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::seq"))]
    pub breakpoints: Vec<f64>,
    /// The `n` interval values
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::seq"))]
    pub values: Vec<f64>,
}

impl From<PiecewiseConstantFunction> for PiecewiseConstantFunctionDto {
    fn from(value: PiecewiseConstantFunction) -> Self {
        Self {
            breakpoints: value.breakpoints.into_inner(),
            values: value.values,
        }
    }
}

impl TryFrom<PiecewiseConstantFunctionDto> for PiecewiseConstantFunction {
    type Error = InvalidArgument;

    /// Attempts to create a function from a DTO, validating all constraints
    ///
    /// # Errors
    ///
    /// Returns the first rule of [`Breakpoints::validate`] that the input violates.
    fn try_from(value: PiecewiseConstantFunctionDto) -> Result<Self, Self::Error> {
        let PiecewiseConstantFunctionDto {
            breakpoints,
            values,
        } = value;

        if let Err(error) = Breakpoints::validate(&breakpoints, &[("values", values.as_slice())]) {
            event!(Level::DEBUG, %error, "rejected piecewise-constant function");
            return Err(error);
        }

        event!(
            Level::DEBUG,
            intervals = values.len(),
            "constructed piecewise-constant function"
        );
        Ok(unsafe { Self::new_unchecked(breakpoints, values) })
    }
}
