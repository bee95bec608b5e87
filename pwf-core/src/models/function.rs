#[cfg(feature = "serde")]
use crate::models::Real;
use crate::{
    models::{
        DomainError, InvalidArgument, PiecewiseConstantFunction, PiecewiseConstantFunctionDto,
        PiecewiseLinearFunction, PiecewiseLinearFunctionDto,
    },
    ports::PiecewiseFunction,
};

// `serde(try_from)` routes every deserialization through validation, same as the
// individual function types.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FunctionDto", into = "FunctionDto")
)]
#[derive(Clone, Debug, PartialEq)]
/// Either kind of piecewise function.
///
/// This lets callers hold, load and query a function without knowing in advance
/// which family it belongs to. All queries delegate to the wrapped function.
pub enum Function {
    /// A function that is constant on each interval
    Constant(PiecewiseConstantFunction),
    /// A function that is affine on each interval
    Linear(PiecewiseLinearFunction),
}

/// DTO for functions to enable validation during deserialization
///
/// In serialized form the variant is inferred from the fields present: a document
/// with `values` is constant, and one with `slopes` and `intercepts` is linear.
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum FunctionDto {
    /// Piecewise-constant function DTO
    Constant(PiecewiseConstantFunctionDto),
    /// Piecewise-linear function DTO
    Linear(PiecewiseLinearFunctionDto),
}

// Reading every field up front, rather than trying each variant in turn, keeps
// the error for a malformed field (e.g. the breakpoint "40") instead of a generic
// "did not match any variant".
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FunctionDocument {
    breakpoints: Vec<Real>,
    values: Option<Vec<Real>>,
    slopes: Option<Vec<Real>>,
    intercepts: Option<Vec<Real>>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FunctionDto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        fn reals(values: Vec<Real>) -> Vec<f64> {
            values.into_iter().map(f64::from).collect()
        }

        let FunctionDocument {
            breakpoints,
            values,
            slopes,
            intercepts,
        } = FunctionDocument::deserialize(deserializer)?;
        let breakpoints = reals(breakpoints);

        match (values, slopes, intercepts) {
            (Some(values), None, None) => Ok(Self::Constant(PiecewiseConstantFunctionDto {
                breakpoints,
                values: reals(values),
            })),
            (None, Some(slopes), Some(intercepts)) => {
                Ok(Self::Linear(PiecewiseLinearFunctionDto {
                    breakpoints,
                    slopes: reals(slopes),
                    intercepts: reals(intercepts),
                }))
            }
            (Some(_), _, _) => Err(D::Error::custom(
                "a function with `values` cannot also have `slopes` or `intercepts`",
            )),
            (None, None, None) => Err(D::Error::custom(
                "expected either `values`, or `slopes` and `intercepts`",
            )),
            (None, _, _) => Err(D::Error::custom(
                "a piecewise-linear function needs both `slopes` and `intercepts`",
            )),
        }
    }
}

impl TryFrom<FunctionDto> for Function {
    type Error = InvalidArgument;

    /// Creates a function from a DTO, validating all constraints
    fn try_from(value: FunctionDto) -> Result<Self, Self::Error> {
        match value {
            FunctionDto::Constant(dto) => Ok(Self::Constant(dto.try_into()?)),
            FunctionDto::Linear(dto) => Ok(Self::Linear(dto.try_into()?)),
        }
    }
}

impl From<Function> for FunctionDto {
    fn from(value: Function) -> Self {
        match value {
            Function::Constant(function) => Self::Constant(function.into()),
            Function::Linear(function) => Self::Linear(function.into()),
        }
    }
}

impl From<PiecewiseConstantFunction> for Function {
    fn from(value: PiecewiseConstantFunction) -> Self {
        Self::Constant(value)
    }
}

impl From<PiecewiseLinearFunction> for Function {
    fn from(value: PiecewiseLinearFunction) -> Self {
        Self::Linear(value)
    }
}

impl Function {
    /// A short, human-readable name for the function family
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Linear(_) => "linear",
        }
    }

    /// The breakpoints partitioning the domain
    pub fn breakpoints(&self) -> &[f64] {
        match self {
            Self::Constant(function) => function.breakpoints().as_slice(),
            Self::Linear(function) => function.breakpoints().as_slice(),
        }
    }
}

impl PiecewiseFunction for Function {
    fn evaluate(&self, x: f64) -> Result<f64, DomainError> {
        match self {
            Self::Constant(function) => function.evaluate(x),
            Self::Linear(function) => function.evaluate(x),
        }
    }

    fn minimum(&self) -> (f64, f64) {
        match self {
            Self::Constant(function) => function.minimum(),
            Self::Linear(function) => function.minimum(),
        }
    }

    fn maximum(&self) -> (f64, f64) {
        match self {
            Self::Constant(function) => function.maximum(),
            Self::Linear(function) => function.maximum(),
        }
    }

    fn domain(&self) -> (f64, f64) {
        match self {
            Self::Constant(function) => function.domain(),
            Self::Linear(function) => function.domain(),
        }
    }
}
