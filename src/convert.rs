use crate::errors::ParseError;
use crate::value::{Value, ValueType};

/// Converts a raw token into a typed [`Value`] for a named target.
///
/// Conversion failures are recoverable parse errors; the binding operation
/// that invoked the converter routes them to the error handler.
pub trait TypeConverter {
    fn convert(&self, target: &str, ty: ValueType, raw: &str) -> Result<Value, ParseError>;
}

/// Stock converter backed by the standard `FromStr` implementations.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeConverter;

impl TypeConverter for DefaultTypeConverter {
    fn convert(&self, target: &str, ty: ValueType, raw: &str) -> Result<Value, ParseError> {
        let failed = || ParseError::ConversionFailed {
            target: target.to_string(),
            raw: raw.to_string(),
            expected: ty,
        };
        match ty {
            ValueType::Bool => raw.parse().map(Value::Bool).map_err(|_| failed()),
            ValueType::Short => raw.parse().map(Value::Short).map_err(|_| failed()),
            ValueType::Int => raw.parse().map(Value::Int).map_err(|_| failed()),
            ValueType::Long => raw.parse().map(Value::Long).map_err(|_| failed()),
            ValueType::Float => raw.parse().map(Value::Float).map_err(|_| failed()),
            ValueType::String => Ok(Value::String(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_declared_type() {
        let c = DefaultTypeConverter;
        assert_eq!(c.convert("n", ValueType::Int, "42").unwrap(), Value::Int(42));
        assert_eq!(
            c.convert("n", ValueType::Short, "-3").unwrap(),
            Value::Short(-3)
        );
        assert_eq!(
            c.convert("n", ValueType::Long, "70000").unwrap(),
            Value::Long(70000)
        );
        assert_eq!(
            c.convert("f", ValueType::Bool, "true").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            c.convert("s", ValueType::String, "-x-").unwrap(),
            Value::String("-x-".to_string())
        );
    }

    #[test]
    fn reports_the_target_and_raw_token_on_failure() {
        let c = DefaultTypeConverter;
        let err = c.convert("count", ValueType::Int, "abc").unwrap_err();
        match err {
            ParseError::ConversionFailed { target, raw, expected } => {
                assert_eq!(target, "count");
                assert_eq!(raw, "abc");
                assert_eq!(expected, ValueType::Int);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
