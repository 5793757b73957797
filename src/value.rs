use std::cmp::Ordering;
use std::fmt;

/// The conversion target for a raw command line token.
///
/// Every option, positional slot, and vararg collection declares the type its
/// values convert to; the [`crate::convert::TypeConverter`] in play performs
/// the conversion during binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Short,
    Int,
    Long,
    Float,
    String,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "Bool",
            ValueType::Short => "Short",
            ValueType::Int => "Int",
            ValueType::Long => "Long",
            ValueType::Float => "Float",
            ValueType::String => "String",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A typed value produced by converting a raw token.
///
/// # Examples
///
/// ```rust
/// use halyard::value::Value;
/// let v = Value::Int(8080);
/// assert_eq!(v.type_name(), "Int");
/// assert_eq!(v.as_i64(), Some(8080));
/// assert_eq!(Value::Bool(true).as_i64(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Short(_) => "Short",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
        }
    }

    /// Returns the value widened to `i64` if it is one of the integral
    /// variants (16/32/64-bit).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Short(n) => Some(i64::from(*n)),
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is numeric at all.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            other => other.as_i64().map(|n| n as f64),
        }
    }

    /// Returns the contained bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Short(n) => write!(f, "{}", n),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Total-order comparator over [`Value`]s, injected into restrictions that
/// need ordering (see [`crate::restrictions::range::RangeRestriction`]).
///
/// Returns `None` when the two values are not comparable, which the
/// restriction reports as a misconfiguration.
pub type ValueComparator = fn(&Value, &Value) -> Option<Ordering>;

/// Compares two numeric values, widening integrals and falling back to
/// floating point comparison when either side is a float.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use halyard::value::{compare_numeric, Value};
/// assert_eq!(compare_numeric(&Value::Int(1), &Value::Long(2)), Some(Ordering::Less));
/// assert_eq!(compare_numeric(&Value::Int(1), &Value::String("x".into())), None);
/// ```
pub fn compare_numeric(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => None,
    }
}

/// Compares two string values lexicographically.
pub fn compare_lexical(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
