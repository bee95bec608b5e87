/// A validated, strictly increasing sequence of breakpoints
///
/// `n + 1` breakpoints partition the domain `[b[0], b[n])` into `n` half-open
/// intervals `[b[i], b[i+1])`. The first breakpoint may be negative infinity
/// and the last may be positive infinity. The final breakpoint never belongs
/// to the domain, even when it is infinite.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints(Vec<f64>);

impl Breakpoints {
    /// Creates a new partition, validating the breakpoints on their own
    pub fn new(breakpoints: Vec<f64>) -> Result<Self, InvalidArgument> {
        Self::validate(&breakpoints, &[])?;
        Ok(Self(breakpoints))
    }

    /// Creates a new partition without validation
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the breakpoints satisfy every rule checked by
    /// [`Breakpoints::validate`]. Lookups on an invalid partition return meaningless intervals.
    pub unsafe fn new_unchecked(breakpoints: Vec<f64>) -> Self {
        Self(breakpoints)
    }

    /// Validates breakpoints together with any number of named per-interval sequences
    ///
    /// This is the single validation routine shared by every function family. A
    /// piecewise-constant function passes `[("values", values)]`, a piecewise-linear
    /// function passes `[("slopes", slopes), ("intercepts", intercepts)]`.
    ///
    /// # Validation
    ///
    /// The rules are checked in this order, and the first failure is reported:
    /// 1. No per-interval parameter is NaN
    /// 2. No breakpoint is NaN
    /// 3. No breakpoint value appears twice (compared with `==`)
    /// 4. Breakpoints are ordered, `b[i] <= b[i+1]`
    /// 5. There are at least two breakpoints
    /// 6. No per-interval sequence is empty
    /// 7. Every per-interval sequence has exactly one entry fewer than the breakpoints
    ///
    /// Input is never sorted or deduplicated on the caller's behalf.
    pub fn validate(
        breakpoints: &[f64],
        parameters: &[(&'static str, &[f64])],
    ) -> Result<(), InvalidArgument> {
        for &(sequence, values) in parameters {
            if let Some(index) = values.iter().position(|v| v.is_nan()) {
                return Err(InvalidArgument::NotANumber { sequence, index });
            }
        }

        if let Some(index) = breakpoints.iter().position(|b| b.is_nan()) {
            return Err(InvalidArgument::NotANumber {
                sequence: "breakpoints",
                index,
            });
        }

        // Duplicates are searched for across the whole sequence, so that an unsorted
        // input such as [1, 5, 1] is reported as a duplicate rather than an inversion.
        let mut sorted = breakpoints.to_vec();
        sorted.sort_by(f64::total_cmp);
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(InvalidArgument::DuplicateBreakpoint { value: pair[0] });
        }

        if let Some(index) = breakpoints
            .windows(2)
            .position(|pair| pair[0] > pair[1])
        {
            return Err(InvalidArgument::Unsorted { index });
        }

        if breakpoints.len() < 2 {
            return Err(InvalidArgument::TooFewBreakpoints {
                count: breakpoints.len(),
            });
        }

        for &(sequence, values) in parameters {
            if values.is_empty() {
                return Err(InvalidArgument::EmptyParameters { sequence });
            }
        }

        for &(sequence, values) in parameters {
            if values.len() + 1 != breakpoints.len() {
                return Err(InvalidArgument::DimensionMismatch {
                    sequence,
                    breakpoints: breakpoints.len(),
                    actual: values.len(),
                });
            }
        }

        Ok(())
    }

    /// Returns the domain `(b[0], b[n])`, closed on the left and open on the right
    pub fn domain(&self) -> (f64, f64) {
        // A valid partition has at least two breakpoints
        (self.0[0], self.0[self.0.len() - 1])
    }

    /// Returns true if `x` lies in `[b[0], b[n])`
    pub fn contains(&self, x: f64) -> bool {
        let (lower, upper) = self.domain();
        lower <= x && x < upper
    }

    /// Returns the number of intervals, i.e. one fewer than the number of breakpoints
    pub fn num_intervals(&self) -> usize {
        self.0.len() - 1
    }

    /// Returns the left and right breakpoints of interval `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.num_intervals()`.
    pub fn interval(&self, i: usize) -> (f64, f64) {
        (self.0[i], self.0[i + 1])
    }

    /// Iterates over the `(left, right)` breakpoints of every interval in index order
    pub fn intervals(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Finds the unique interval `i` with `b[i] <= x < b[i+1]`
    ///
    /// Since the breakpoints are strictly increasing, a binary search returns the same
    /// interval as scanning the intervals in index order and taking the first match.
    /// Returns `None` when `x` lies outside the domain or is NaN.
    pub fn locate(&self, x: f64) -> Option<usize> {
        // Count of breakpoints at or left of x; NaN compares false everywhere, yielding 0
        let count = self.0.partition_point(|&b| b <= x);
        if count == 0 || count == self.0.len() {
            None
        } else {
            Some(count - 1)
        }
    }

    /// Borrows the underlying breakpoints
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Converts the partition into its breakpoints
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl std::ops::Deref for Breakpoints {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Errors that can occur when constructing a piecewise function
///
/// Each variant corresponds to one validation rule, so that the caller can tell
/// exactly which constraint the input violated.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    /// Error when a breakpoint or per-interval parameter is NaN
    #[error("{sequence}[{index}] is not a number")]
    NotANumber {
        /// The name of the offending sequence
        sequence: &'static str,
        /// The position of the NaN within that sequence
        index: usize,
    },
    /// Error when the same breakpoint value appears more than once
    #[error("breakpoint {value} appears more than once")]
    DuplicateBreakpoint {
        /// The repeated breakpoint value
        value: f64,
    },
    /// Error when the breakpoints are not in increasing order
    #[error("breakpoints are not in increasing order (at index {index})")]
    Unsorted {
        /// The first index `i` for which `b[i] <= b[i+1]` does not hold
        index: usize,
    },
    /// Error when fewer than two breakpoints are provided
    #[error("at least 2 breakpoints are required, got {count}")]
    TooFewBreakpoints {
        /// The number of breakpoints provided
        count: usize,
    },
    /// Error when a per-interval sequence is empty
    #[error("at least 1 entry is required in {sequence}")]
    EmptyParameters {
        /// The name of the empty sequence
        sequence: &'static str,
    },
    /// Error when a per-interval sequence does not have one entry per interval
    #[error("{breakpoints} breakpoints require {} {sequence}, got {actual}", .breakpoints - 1)]
    DimensionMismatch {
        /// The name of the mismatched sequence
        sequence: &'static str,
        /// The number of breakpoints provided
        breakpoints: usize,
        /// The number of entries in the mismatched sequence
        actual: usize,
    },
}

/// Errors that can occur when evaluating a piecewise function
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Error when the argument lies outside `[lower, upper)`
    #[error("input value {x} is out of bounds [{lower}, {upper})")]
    OutOfBounds {
        /// The requested argument
        x: f64,
        /// The first breakpoint
        lower: f64,
        /// The last breakpoint (excluded from the domain)
        upper: f64,
    },
    /// Error when no interval contains the argument
    #[error("no interval found for input value {x}")]
    NoInterval {
        /// The requested argument
        x: f64,
    },
}
