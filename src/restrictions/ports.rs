use std::fmt;

use crate::errors::ParseError;
use crate::restrictions::{Restriction, Target};
use crate::state::ParseState;
use crate::value::Value;

const MIN_PORT: i64 = 0;
const MAX_PORT: i64 = 65535;

/// One acceptable port range, or the sentinel admitting every valid port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRange {
    Any,
    Closed { min: u16, max: u16 },
}

impl PortRange {
    fn contains(&self, port: i64) -> bool {
        match self {
            PortRange::Any => true,
            PortRange::Closed { min, max } => {
                (i64::from(*min)..=i64::from(*max)).contains(&port)
            }
        }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRange::Any => write!(f, "{}-{}", MIN_PORT, MAX_PORT),
            PortRange::Closed { min, max } if min == max => write!(f, "{}", min),
            PortRange::Closed { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

/// Requires the typed value to be a port number inside the configured ranges.
///
/// A value is acceptable when it lies in [0, 65535] and, unless the
/// [`PortRange::Any`] sentinel is configured, inside at least one configured
/// sub-range. An empty configuration is a no-op. Applies only to integral
/// value types; any other type is a misconfiguration.
#[derive(Debug, Clone, Default)]
pub struct PortRestriction {
    acceptable: Vec<PortRange>,
}

impl PortRestriction {
    pub fn new(ranges: impl IntoIterator<Item = PortRange>) -> Self {
        PortRestriction {
            acceptable: ranges.into_iter().collect(),
        }
    }

    /// Accepts any valid port.
    pub fn any() -> Self {
        Self::new([PortRange::Any])
    }

    fn is_valid(&self, port: i64) -> bool {
        if !(MIN_PORT..=MAX_PORT).contains(&port) {
            return false;
        }
        self.acceptable.iter().any(|range| range.contains(port))
    }

    fn ranges_string(&self) -> String {
        let parts: Vec<String> = self.acceptable.iter().map(PortRange::to_string).collect();
        parts.join(", ")
    }
}

impl Restriction for PortRestriction {
    fn post_validate(
        &self,
        _state: &ParseState,
        target: Target<'_>,
        value: &Value,
    ) -> Result<(), ParseError> {
        if self.acceptable.is_empty() {
            return Ok(());
        }
        let port = value.as_i64().ok_or_else(|| ParseError::InvalidRestriction {
            message: format!(
                "cannot apply a port restriction to a value of type {}",
                value.type_name()
            ),
        })?;
        if self.is_valid(port) {
            Ok(())
        } else {
            Err(ParseError::RestrictionViolated {
                message: format!(
                    "{} takes a port number but was given value '{}' which is not in the acceptable ranges: {}",
                    target.describe(),
                    value,
                    self.ranges_string()
                ),
            })
        }
    }
}
