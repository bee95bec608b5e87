//! Sampling utilities for plotting and tabulating piecewise functions.
//!
//! Rendering is left to the caller: [`sample`] only produces the evenly spaced
//! `(x, f(x))` pairs a renderer would draw. Choosing a range inside the function's
//! domain is the caller's responsibility, and a single point outside of it fails
//! the whole request.

use crate::{models::DomainError, ports::PiecewiseFunction};
use tracing::{Level, event};

/// A single evaluated point
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// The argument
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::scalar"))]
    pub x: f64,
    /// The function value at `x`, which may be infinite
    #[cfg_attr(feature = "serde", serde(with = "crate::models::real::scalar"))]
    pub y: f64,
}

/// Returns `num_points` evenly spaced values from `start` to `stop`, both included
///
/// Zero points yields an empty vector and a single point yields `[start]`. The last
/// value is exactly `stop`, regardless of rounding in the step.
pub fn linspace(start: f64, stop: f64, num_points: usize) -> Vec<f64> {
    match num_points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Evaluates `function` at `num_points` evenly spaced arguments in `[x_min, x_max]`
///
/// # Errors
///
/// Returns [`SampleError::InvalidRange`] if either bound is not finite or
/// `x_min > x_max`, and [`SampleError::Domain`] for the first argument outside the
/// function's domain. Note that the domain excludes its upper breakpoint, so
/// `x_max` must lie strictly below it.
pub fn sample<F: PiecewiseFunction + ?Sized>(
    function: &F,
    x_min: f64,
    x_max: f64,
    num_points: usize,
) -> Result<Vec<Sample>, SampleError> {
    if !x_min.is_finite() || !x_max.is_finite() || x_min > x_max {
        return Err(SampleError::InvalidRange { x_min, x_max });
    }

    event!(Level::TRACE, x_min, x_max, num_points, "sampling function");

    linspace(x_min, x_max, num_points)
        .into_iter()
        .map(|x| -> Result<Sample, SampleError> {
            let y = function.evaluate(x)?;
            Ok(Sample { x, y })
        })
        .collect()
}

/// Errors that can occur while sampling a function
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// Error when the requested range is reversed or unbounded
    #[error("invalid sampling range [{x_min}, {x_max}]")]
    InvalidRange {
        /// The requested lower bound
        x_min: f64,
        /// The requested upper bound
        x_max: f64,
    },
    /// Error when a sampled argument lies outside the function's domain
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PiecewiseConstantFunction, PiecewiseLinearFunction};
    use approx::assert_relative_eq;

    fn staircase() -> PiecewiseConstantFunction {
        PiecewiseConstantFunction::new(
            vec![-100.0, -50.0, 10.0, 20.0, 31.0],
            vec![30.0, 20.0, 10.0, -10.0],
        )
        .unwrap()
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let points = linspace(-100.0, 30.0, 1000);
        assert_eq!(points.len(), 1000);
        assert_eq!(points[0], -100.0);
        assert_eq!(points[999], 30.0);
        assert_relative_eq!(points[1] - points[0], 130.0 / 999.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_staircase() {
        let samples = sample(&staircase(), -100.0, 30.0, 1000).unwrap();
        assert_eq!(samples.len(), 1000);
        assert_eq!(samples[0], Sample { x: -100.0, y: 30.0 });
        assert_eq!(samples[999], Sample { x: 30.0, y: -10.0 });
        assert!(samples.iter().all(|s| [30.0, 20.0, 10.0, -10.0].contains(&s.y)));
    }

    #[test]
    fn test_sample_linear() {
        let f = PiecewiseLinearFunction::new(vec![0.0, 1.0, 2.0], vec![1.0, -1.0], vec![0.0, 2.0])
            .unwrap();
        let samples = sample(&f, 0.0, 1.5, 4).unwrap();
        let ys = samples.iter().map(|s| s.y).collect::<Vec<_>>();
        assert_eq!(ys, vec![0.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_sample_outside_domain() {
        // The upper breakpoint itself is not part of the domain
        assert!(matches!(
            sample(&staircase(), -100.0, 31.0, 10),
            Err(SampleError::Domain(DomainError::OutOfBounds { x, .. })) if x == 31.0
        ));
    }

    #[test]
    fn test_sample_invalid_range() {
        let f = staircase();
        assert_eq!(
            sample(&f, 10.0, -10.0, 5).unwrap_err(),
            SampleError::InvalidRange {
                x_min: 10.0,
                x_max: -10.0
            }
        );
        assert!(sample(&f, f64::NEG_INFINITY, 0.0, 5).is_err());
        assert!(sample(&f, 0.0, f64::NAN, 5).is_err());
    }

    #[test]
    fn test_sample_through_trait_object() {
        let f: Box<dyn PiecewiseFunction> = Box::new(staircase());
        assert_eq!(sample(f.as_ref(), 0.0, 0.0, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_serde_infinite_values() {
        let f = PiecewiseConstantFunction::new(vec![0.0, 1.0], vec![f64::NEG_INFINITY]).unwrap();
        let samples = sample(&f, 0.0, 0.5, 2).unwrap();

        let raw = serde_json::to_string(&samples).unwrap();
        assert_eq!(raw, r#"[{"x":0.0,"y":"-inf"},{"x":0.5,"y":"-inf"}]"#);
        assert_eq!(serde_json::from_str::<Vec<Sample>>(&raw).unwrap(), samples);

        let point = Sample {
            x: 0.0,
            y: f64::INFINITY,
        };
        let raw = serde_json::to_string(&point).unwrap();
        assert_eq!(raw, r#"{"x":0.0,"y":"inf"}"#);
        assert_eq!(serde_json::from_str::<Sample>(&raw).unwrap(), point);
    }
}
