use crate::{
    models::{Breakpoints, DomainError, InvalidArgument},
    ports::PiecewiseFunction,
};
use tracing::{Level, event};

/// A representation of a piecewise-linear function
///
/// On each half-open interval `[breakpoints[i], breakpoints[i+1])` the function is
/// the affine map `slopes[i] * x + intercepts[i]`. For example, breakpoints
/// `[-10, 0, 10]` with slopes `[5, 4]` and intercepts `[9, -12]` describe
/// `y = 5x + 9` on `[-10, 0)` and `y = 4x - 12` on `[0, 10)`.
///
/// Neighbouring pieces need not agree at their shared breakpoint: the left
/// endpoint always belongs to its own interval, so the function may jump there.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "PiecewiseLinearFunctionDto",
        into = "PiecewiseLinearFunctionDto"
    )
)]
pub struct PiecewiseLinearFunction {
    breakpoints: Breakpoints,
    slopes: Vec<f64>,
    intercepts: Vec<f64>,
}

/// One affine piece of a [`PiecewiseLinearFunction`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// The left breakpoint (included)
    pub left: f64,
    /// The right breakpoint (excluded)
    pub right: f64,
    /// The coefficient of `x`
    pub slope: f64,
    /// The constant term
    pub intercept: f64,
}

impl Segment {
    /// Evaluate the affine map at `x`, ignoring the segment's bounds
    ///
    /// A flat segment is its intercept everywhere, including at an infinite
    /// breakpoint where `0 * inf` would be NaN.
    pub fn at(&self, x: f64) -> f64 {
        if self.slope == 0.0 {
            self.intercept
        } else {
            self.slope * x + self.intercept
        }
    }

    /// The smallest value on the segment
    ///
    /// A flat segment is its intercept; a decreasing one bottoms out at the right
    /// breakpoint; otherwise the left breakpoint is lowest.
    pub fn lowest(&self) -> f64 {
        if self.slope < 0.0 {
            self.at(self.right)
        } else {
            self.at(self.left)
        }
    }

    /// The largest value on the segment, mirroring [`Segment::lowest`]
    pub fn highest(&self) -> f64 {
        if self.slope > 0.0 {
            self.at(self.right)
        } else {
            self.at(self.left)
        }
    }
}

impl PiecewiseLinearFunction {
    /// Creates a new piecewise-linear function, validating all constraints
    pub fn new(
        breakpoints: Vec<f64>,
        slopes: Vec<f64>,
        intercepts: Vec<f64>,
    ) -> Result<Self, InvalidArgument> {
        Self::try_from(PiecewiseLinearFunctionDto {
            breakpoints,
            slopes,
            intercepts,
        })
    }

    /// Creates a new piecewise-linear function without validation
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the inputs satisfy every rule checked by
    /// [`Breakpoints::validate`]. Evaluating an invalid function may panic or return
    /// values from the wrong interval.
    pub unsafe fn new_unchecked(
        breakpoints: Vec<f64>,
        slopes: Vec<f64>,
        intercepts: Vec<f64>,
    ) -> Self {
        Self {
            breakpoints: unsafe { Breakpoints::new_unchecked(breakpoints) },
            slopes,
            intercepts,
        }
    }

    /// The breakpoints partitioning the domain
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// The slope on each interval
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// The intercept on each interval
    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts
    }

    /// The number of intervals
    pub fn len(&self) -> usize {
        self.slopes.len()
    }

    /// Always false, since a valid function has at least one interval
    pub fn is_empty(&self) -> bool {
        self.slopes.is_empty()
    }

    /// Returns the affine piece on interval `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn segment(&self, i: usize) -> Segment {
        let (left, right) = self.breakpoints.interval(i);
        Segment {
            left,
            right,
            slope: self.slopes[i],
            intercept: self.intercepts[i],
        }
    }

    /// Iterates over every affine piece in index order
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        (0..self.len()).map(|i| self.segment(i))
    }
}

impl PiecewiseFunction for PiecewiseLinearFunction {
    fn evaluate(&self, x: f64) -> Result<f64, DomainError> {
        self.breakpoints
            .locate(x)
            .map(|i| self.segment(i).at(x))
            .ok_or(DomainError::NoInterval { x })
    }

    /// The smallest per-segment value, reported at that segment's left breakpoint
    ///
    /// Note that the reported argument is always a left breakpoint, even when the
    /// segment attains its minimum at the right one (a decreasing segment).
    fn minimum(&self) -> (f64, f64) {
        let mut best = (f64::INFINITY, self.breakpoints[0]);
        for segment in self.segments() {
            let value = segment.lowest();
            if value < best.0 {
                best = (value, segment.left);
            }
        }
        best
    }

    /// The largest per-segment value, reported at that segment's left breakpoint
    ///
    /// As with [`minimum`](PiecewiseFunction::minimum), an increasing segment
    /// attains its maximum at the right breakpoint but reports the left one.
    fn maximum(&self) -> (f64, f64) {
        let mut best = (f64::NEG_INFINITY, self.breakpoints[0]);
        for segment in self.segments() {
            let value = segment.highest();
            if value > best.0 {
                best = (value, segment.left);
            }
        }
        best
    }

    fn domain(&self) -> (f64, f64) {
        self.breakpoints.domain()
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinearFunctionDto {
    /// The `n + 1` breakpoints, in increasing order
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::seq"))]
    pub breakpoints: Vec<f64>,
    /// The `n` interval slopes
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::seq"))]
    pub slopes: Vec<f64>,
    /// The `n` interval intercepts
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::seq"))]
    pub intercepts: Vec<f64>,
}

impl From<PiecewiseLinearFunction> for PiecewiseLinearFunctionDto {
    fn from(value: PiecewiseLinearFunction) -> Self {
        Self {
            breakpoints: value.breakpoints.into_inner(),
            slopes: value.slopes,
            intercepts: value.intercepts,
        }
    }
}

impl TryFrom<PiecewiseLinearFunctionDto> for PiecewiseLinearFunction {
    type Error = InvalidArgument;

    /// Attempts to create a function from a DTO, validating all constraints
    ///
    /// # Errors
    ///
    /// Returns the first rule of [`Breakpoints::validate`] that the input violates.
    /// Slopes are checked before intercepts.
    fn try_from(value: PiecewiseLinearFunctionDto) -> Result<Self, Self::Error> {
        let PiecewiseLinearFunctionDto {
            breakpoints,
            slopes,
            intercepts,
        } = value;

        let parameters = [
            ("slopes", slopes.as_slice()),
            ("intercepts", intercepts.as_slice()),
        ];
        if let Err(error) = Breakpoints::validate(&breakpoints, &parameters) {
            event!(Level::DEBUG, %error, "rejected piecewise-linear function");
            return Err(error);
        }

        event!(
            Level::DEBUG,
            intervals = slopes.len(),
            "constructed piecewise-linear function"
        );
        Ok(unsafe { Self::new_unchecked(breakpoints, slopes, intercepts) })
    }
}
