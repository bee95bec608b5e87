use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

/// An extended real number, as it appears in serialized functions
///
/// JSON has no representation for infinity, so unbounded breakpoints are written
/// as the strings `"inf"` and `"-inf"`. Deserialization accepts integers, floats,
/// and the (case-insensitive) spellings `inf`, `+inf`, `infinity`, `+infinity`,
/// `-inf` and `-infinity`. Every other string, as well as booleans, nulls,
/// sequences and maps, is rejected, so `"40"` is not a valid breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Real(pub f64);

impl Real {
    fn parse_infinity(value: &str) -> Option<f64> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inf" | "+inf" | "infinity" | "+infinity" => Some(f64::INFINITY),
            "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        }
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Real> for f64 {
    fn from(value: Real) -> Self {
        value.0
    }
}

impl Serialize for Real {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0 == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if self.0 == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Real {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_untagged::UntaggedEnumVisitor::new()
            .expecting("a number, \"inf\" or \"-inf\"")
            .i64(|value| Ok(Real(value as f64)))
            .u64(|value| Ok(Real(value as f64)))
            .f64(|value| Ok(Real(value)))
            .string(|value| {
                Self::parse_infinity(value).map(Real).ok_or_else(|| {
                    serde_untagged::de::Error::custom(format!(
                        "expected a number or an infinity, found the string {value:?}"
                    ))
                })
            })
            .deserialize(deserializer)
    }
}

/// `serde(with = "...")` support for a single extended real stored as `f64`
pub(crate) mod scalar {
    use super::Real;
    use serde::{Deserialize as _, Deserializer, Serialize as _, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Real(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Real::deserialize(deserializer).map(f64::from)
    }
}

/// `serde(with = "...")` support for sequences of extended reals stored as `Vec<f64>`
pub(crate) mod seq {
    use super::Real;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().copied().map(Real))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Real>::deserialize(deserializer)?;
        Ok(values.into_iter().map(f64::from).collect())
    }
}
