use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// One typed property value.
///
/// Scalar kinds convert leniently between each other, the way a string-backed store would:
/// `"12"` reads back as the integer `12`, `1.5` reads back as the string `"1.5"`.
#[derive(Clone)]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Opaque shared data; never serialized.
    Data(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Integer view of a scalar value.
    ///
    /// Doubles truncate toward zero; strings parse as an integer first, then as a float.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Double(v) => v.is_finite().then_some(*v as i64),
            Self::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
            }
            Self::Data(_) => None,
        }
    }

    /// Floating-point view of a scalar value.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            Self::String(s) => s.trim().parse::<f64>().ok(),
            Self::Data(_) => None,
        }
    }

    /// String view of a scalar value.
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Int(v) => Some(v.to_string()),
            Self::Double(v) => Some(v.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Data(_) => None,
        }
    }

    /// Return `true` for [`Value::Data`].
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Self::String(v) => f.debug_tuple("String").field(v).finish(),
            Self::Data(_) => f.write_str("Data(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Data(a), Self::Data(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Data(_) => serializer.serialize_unit(),
        }
    }
}
