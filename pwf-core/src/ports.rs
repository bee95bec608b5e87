use crate::models::DomainError;

/// The capability set shared by every piecewise function family.
///
/// A function is defined over the half-open domain `[lower, upper)` returned by
/// [`domain`](PiecewiseFunction::domain). Implementations are immutable, so every
/// method takes `&self` and the same instance may be queried from many threads.
pub trait PiecewiseFunction {
    /// Evaluate the function at `x`
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `x` lies outside `[lower, upper)` or no interval
    /// contains it (which is only possible for NaN).
    fn evaluate(&self, x: f64) -> Result<f64, DomainError>;

    /// Returns `(value, argument)` for the smallest value the function takes
    ///
    /// The argument is the left breakpoint of the first interval, in index order,
    /// whose extreme value equals the minimum.
    fn minimum(&self) -> (f64, f64);

    /// Returns `(value, argument)` for the largest value the function takes
    ///
    /// The argument follows the same convention as [`minimum`](PiecewiseFunction::minimum).
    fn maximum(&self) -> (f64, f64);

    /// Returns the domain `(lower, upper)`, where `lower` is included and `upper` is not
    fn domain(&self) -> (f64, f64);
}

impl<T: PiecewiseFunction + ?Sized> PiecewiseFunction for &T {
    fn evaluate(&self, x: f64) -> Result<f64, DomainError> {
        (**self).evaluate(x)
    }

    fn minimum(&self) -> (f64, f64) {
        (**self).minimum()
    }

    fn maximum(&self) -> (f64, f64) {
        (**self).maximum()
    }

    fn domain(&self) -> (f64, f64) {
        (**self).domain()
    }
}
