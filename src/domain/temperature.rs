// Temperature reading domain models
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Value substituted for any reading that could not be interpreted.
pub const FALLBACK_TEMPERATURE: f64 = 0.0;

/// A raw reading as supplied by the caller, discriminated once at the boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawTemperature {
    Missing,
    Text(String),
    Numeric(f64),
    Unsupported { type_name: String },
}

impl From<Value> for RawTemperature {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawTemperature::Missing,
            Value::String(s) => RawTemperature::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(v) => RawTemperature::Numeric(v),
                None => RawTemperature::Unsupported {
                    type_name: "number".to_string(),
                },
            },
            Value::Bool(_) => RawTemperature::Unsupported {
                type_name: "boolean".to_string(),
            },
            Value::Array(_) => RawTemperature::Unsupported {
                type_name: "array".to_string(),
            },
            Value::Object(_) => RawTemperature::Unsupported {
                type_name: "object".to_string(),
            },
        }
    }
}

impl From<f64> for RawTemperature {
    fn from(value: f64) -> Self {
        RawTemperature::Numeric(value)
    }
}

impl From<&str> for RawTemperature {
    fn from(value: &str) -> Self {
        RawTemperature::Text(value.to_string())
    }
}

impl<T: Into<RawTemperature>> From<Option<T>> for RawTemperature {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawTemperature::Missing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityTemperatureSample {
    pub city: String,
    pub raw: RawTemperature,
}

impl CityTemperatureSample {
    pub fn new(city: impl Into<String>, raw: impl Into<RawTemperature>) -> Self {
        Self {
            city: city.into(),
            raw: raw.into(),
        }
    }
}

/// A finite temperature in degrees Celsius. `valid` is false when the value
/// is the fallback standing in for an anomalous reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedTemperature {
    pub value: f64,
    pub valid: bool,
}

impl NormalizedTemperature {
    pub fn reading(value: f64) -> Self {
        Self { value, valid: true }
    }

    pub fn fallback() -> Self {
        Self {
            value: FALLBACK_TEMPERATURE,
            valid: false,
        }
    }
}

/// Why a reading was replaced by the fallback value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnomalyReason {
    Missing,
    MalformedString { raw: String },
    NotANumber,
    NonFinite { value: f64 },
    UnsupportedType { type_name: String },
}

impl AnomalyReason {
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyReason::Missing => "missing",
            AnomalyReason::MalformedString { .. } => "malformed string",
            AnomalyReason::NotANumber => "NaN value",
            AnomalyReason::NonFinite { .. } => "non-finite value",
            AnomalyReason::UnsupportedType { .. } => "unsupported type",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureAnomaly {
    pub city: String,
    pub reason: AnomalyReason,
}

impl fmt::Display for TemperatureAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city {}: temperature {}", self.city, self.reason.label())?;
        match &self.reason {
            AnomalyReason::MalformedString { raw } => write!(f, " ({:?})", raw),
            AnomalyReason::NonFinite { value } => write!(f, " ({})", value),
            AnomalyReason::UnsupportedType { type_name } => write!(f, " ({})", type_name),
            AnomalyReason::Missing | AnomalyReason::NotANumber => Ok(()),
        }
    }
}
