use std::cmp::Ordering;
use std::fmt;

use crate::errors::ParseError;
use crate::restrictions::{Restriction, Target};
use crate::state::ParseState;
use crate::value::{Value, ValueComparator};

/// The bound configuration of a [`RangeRestriction`], carried inside
/// [`ParseError::OutOfRange`] so diagnostics can show the full rule.
#[derive(Debug, Clone)]
pub struct RangeBounds {
    pub min: Option<Value>,
    pub min_inclusive: bool,
    pub max: Option<Value>,
    pub max_inclusive: bool,
}

impl RangeBounds {
    fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return write!(f, "unbounded");
        }
        if let Some(min) = &self.min {
            let op = if self.min_inclusive { "<=" } else { "<" };
            write!(f, "{} {} ", min, op)?;
        }
        write!(f, "value")?;
        if let Some(max) = &self.max {
            let op = if self.max_inclusive { "<=" } else { "<" };
            write!(f, " {} {}", op, max)?;
        }
        Ok(())
    }
}

/// Requires the typed value to fall within a configured range.
///
/// Bounds are optional and independently inclusive; with both bounds absent
/// the restriction is a no-op. Ordering comes from the injected comparator,
/// so the rule works for any value type the comparator covers. Construction
/// rejects inverted ranges and ranges that exclude their only member.
///
/// Post-conversion only: ordering needs a typed value, so there is no raw
/// token hook.
#[derive(Debug, Clone)]
pub struct RangeRestriction {
    bounds: RangeBounds,
    comparator: ValueComparator,
}

impl RangeRestriction {
    pub fn new(
        min: Option<Value>,
        min_inclusive: bool,
        max: Option<Value>,
        max_inclusive: bool,
        comparator: ValueComparator,
    ) -> Result<Self, ParseError> {
        if let (Some(min), Some(max)) = (&min, &max) {
            match comparator(min, max) {
                None => {
                    return Err(ParseError::InvalidRestriction {
                        message: format!("min ({}) and max ({}) are not comparable", min, max),
                    });
                }
                Some(Ordering::Greater) => {
                    return Err(ParseError::InvalidRestriction {
                        message: format!("min ({}) is greater than max ({})", min, max),
                    });
                }
                Some(Ordering::Equal) if !(min_inclusive && max_inclusive) => {
                    return Err(ParseError::InvalidRestriction {
                        message: format!(
                            "min ({}) and max ({}) are equal but one bound is exclusive, defining an empty range",
                            min, max
                        ),
                    });
                }
                _ => {}
            }
        }
        Ok(RangeRestriction {
            bounds: RangeBounds {
                min,
                min_inclusive,
                max,
                max_inclusive,
            },
            comparator,
        })
    }

    /// Inclusive range over both bounds, the common case.
    pub fn inclusive(
        min: Value,
        max: Value,
        comparator: ValueComparator,
    ) -> Result<Self, ParseError> {
        Self::new(Some(min), true, Some(max), true, comparator)
    }

    pub fn bounds(&self) -> &RangeBounds {
        &self.bounds
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ParseError> {
        (self.comparator)(a, b).ok_or_else(|| ParseError::InvalidRestriction {
            message: format!(
                "range restriction cannot compare a value of type {}",
                b.type_name()
            ),
        })
    }

    fn in_range(&self, value: &Value) -> Result<bool, ParseError> {
        if let Some(min) = &self.bounds.min {
            match self.compare(min, value)? {
                Ordering::Equal if !self.bounds.min_inclusive => return Ok(false),
                Ordering::Greater => return Ok(false),
                _ => {}
            }
        }
        if let Some(max) = &self.bounds.max {
            match self.compare(value, max)? {
                Ordering::Equal if !self.bounds.max_inclusive => return Ok(false),
                Ordering::Greater => return Ok(false),
                _ => {}
            }
        }
        Ok(true)
    }
}

impl Restriction for RangeRestriction {
    fn post_validate(
        &self,
        _state: &ParseState,
        target: Target<'_>,
        value: &Value,
    ) -> Result<(), ParseError> {
        // Not enforced if no range provided
        if self.bounds.is_unbounded() {
            return Ok(());
        }
        if self.in_range(value)? {
            Ok(())
        } else {
            Err(ParseError::OutOfRange {
                target: target.describe(),
                value: value.clone(),
                bounds: self.bounds.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::compare_numeric;

    #[test]
    fn bounds_render_inclusivity() {
        let r = RangeRestriction::new(
            Some(Value::Int(1)),
            true,
            Some(Value::Int(10)),
            false,
            compare_numeric,
        )
        .unwrap();
        assert_eq!(r.bounds().to_string(), "1 <= value < 10");
    }

    #[test]
    fn unbounded_renders_as_such() {
        let r = RangeRestriction::new(None, true, None, true, compare_numeric).unwrap();
        assert_eq!(r.bounds().to_string(), "unbounded");
    }
}
