//! Range and port restriction behaviour: violation routing, bound
//! configuration payloads, and construction-time misconfiguration.

mod common;

use std::sync::Arc;

use halyard::errors::ParseError;
use halyard::metadata::OptionMeta;
use halyard::restrictions::ports::{PortRange, PortRestriction};
use halyard::restrictions::range::RangeRestriction;
use halyard::restrictions::{Restriction, Target};
use halyard::state::ParseState;
use halyard::value::{compare_numeric, Value, ValueType};

fn check(restriction: &dyn Restriction, value: Value) -> Result<(), ParseError> {
    let option = OptionMeta::new("port", ["-p"], 1, ValueType::Int);
    restriction.post_validate(&ParseState::new(), Target::Option(&option), &value)
}

mod range_tests {
    use super::*;

    #[test]
    fn inclusive_bounds_accept_their_endpoints() {
        let range =
            RangeRestriction::inclusive(Value::Int(1), Value::Int(10), compare_numeric).unwrap();
        assert!(check(&range, Value::Int(1)).is_ok());
        assert!(check(&range, Value::Int(10)).is_ok());
        assert!(check(&range, Value::Int(0)).is_err());
        assert!(check(&range, Value::Int(11)).is_err());
    }

    #[test]
    fn single_value_inclusive_range_accepts_only_that_value() {
        let range =
            RangeRestriction::inclusive(Value::Int(5), Value::Int(5), compare_numeric).unwrap();
        assert!(check(&range, Value::Int(5)).is_ok());
        assert!(check(&range, Value::Int(4)).is_err());
        assert!(check(&range, Value::Int(6)).is_err());
    }

    #[test]
    fn exclusive_bounds_reject_their_endpoints() {
        let range = RangeRestriction::new(
            Some(Value::Int(1)),
            false,
            Some(Value::Int(10)),
            false,
            compare_numeric,
        )
        .unwrap();
        assert!(check(&range, Value::Int(1)).is_err());
        assert!(check(&range, Value::Int(2)).is_ok());
        assert!(check(&range, Value::Int(9)).is_ok());
        assert!(check(&range, Value::Int(10)).is_err());
    }

    #[test]
    fn empty_range_is_a_construction_time_misconfiguration() {
        let err = RangeRestriction::new(
            Some(Value::Int(5)),
            false,
            Some(Value::Int(5)),
            false,
            compare_numeric,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidRestriction { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn inverted_bounds_are_a_construction_time_misconfiguration() {
        let err = RangeRestriction::new(
            Some(Value::Int(10)),
            true,
            Some(Value::Int(1)),
            true,
            compare_numeric,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidRestriction { .. }));
    }

    #[test]
    fn no_bounds_means_never_violated() {
        let range = RangeRestriction::new(None, true, None, true, compare_numeric).unwrap();
        assert!(check(&range, Value::Int(i32::MAX)).is_ok());
        assert!(check(&range, Value::String("anything".into())).is_ok());
    }

    #[test]
    fn violations_carry_the_value_and_bound_configuration() {
        let range =
            RangeRestriction::inclusive(Value::Int(1), Value::Int(10), compare_numeric).unwrap();
        let err = check(&range, Value::Int(42)).unwrap_err();
        match err {
            ParseError::OutOfRange { value, bounds, .. } => {
                assert_eq!(value, Value::Int(42));
                assert_eq!(bounds.min, Some(Value::Int(1)));
                assert!(bounds.min_inclusive);
                assert_eq!(bounds.max, Some(Value::Int(10)));
                assert!(bounds.max_inclusive);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn incomparable_value_type_is_a_misconfiguration_not_a_violation() {
        let range =
            RangeRestriction::inclusive(Value::Int(1), Value::Int(10), compare_numeric).unwrap();
        let err = check(&range, Value::String("oops".into())).unwrap_err();
        assert!(matches!(err, ParseError::InvalidRestriction { .. }));
        assert!(err.is_fatal());
    }
}

mod port_tests {
    use super::*;

    #[test]
    fn any_accepts_the_whole_valid_port_space_and_nothing_outside() {
        let ports = PortRestriction::any();
        assert!(check(&ports, Value::Int(0)).is_ok());
        assert!(check(&ports, Value::Int(65535)).is_ok());
        assert!(check(&ports, Value::Int(-1)).is_err());
        assert!(check(&ports, Value::Int(65536)).is_err());
    }

    #[test]
    fn sub_range_bounds_are_inclusive() {
        let ports = PortRestriction::new([PortRange::Closed { min: 8000, max: 9000 }]);
        assert!(check(&ports, Value::Int(8000)).is_ok());
        assert!(check(&ports, Value::Int(9000)).is_ok());
        assert!(check(&ports, Value::Int(7999)).is_err());
        assert!(check(&ports, Value::Int(9001)).is_err());
    }

    #[test]
    fn a_value_inside_any_configured_sub_range_is_acceptable() {
        let ports = PortRestriction::new([
            PortRange::Closed { min: 80, max: 80 },
            PortRange::Closed { min: 8000, max: 9000 },
        ]);
        assert!(check(&ports, Value::Int(80)).is_ok());
        assert!(check(&ports, Value::Int(8443)).is_ok());
        assert!(check(&ports, Value::Int(443)).is_err());
    }

    #[test]
    fn empty_configuration_is_a_no_op() {
        let ports = PortRestriction::new([]);
        assert!(check(&ports, Value::Int(-1)).is_ok());
        assert!(check(&ports, Value::String("anything".into())).is_ok());
    }

    #[test]
    fn all_integral_widths_are_accepted() {
        let ports = PortRestriction::any();
        assert!(check(&ports, Value::Short(80)).is_ok());
        assert!(check(&ports, Value::Int(8080)).is_ok());
        assert!(check(&ports, Value::Long(65535)).is_ok());
    }

    #[test]
    fn non_integral_value_type_is_a_misconfiguration() {
        let ports = PortRestriction::any();
        let err = check(&ports, Value::String("8080".into())).unwrap_err();
        assert!(matches!(err, ParseError::InvalidRestriction { .. }));
        assert!(err.is_fatal());

        let err = check(&ports, Value::Float(8080.0)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidRestriction { .. }));
    }
}

mod routing_tests {
    use super::*;
    use halyard::convert::DefaultTypeConverter;
    use halyard::handler::CollectAll;
    use halyard::state::ParseSession;

    #[test]
    fn a_misconfiguration_bypasses_even_a_collecting_handler() {
        // Port restriction on a string-typed option: the defect is in the
        // command definition, so the parse aborts regardless of policy.
        let option = Arc::new(
            OptionMeta::new("label", ["-l"], 1, ValueType::String)
                .restrict(Arc::new(PortRestriction::any())),
        );
        let converter = DefaultTypeConverter;
        let mut handler = CollectAll::new();
        let mut session = ParseSession::new(&converter, &mut handler);

        let err = ParseState::new()
            .with_option_value(&option, "web", &mut session)
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidRestriction { .. }));
        assert!(handler.errors().is_empty());
    }

    #[test]
    fn a_violation_goes_through_the_handler() {
        let option = Arc::new(
            OptionMeta::new("port", ["-p"], 1, ValueType::Int)
                .restrict(Arc::new(PortRestriction::any())),
        );
        let converter = DefaultTypeConverter;
        let mut handler = CollectAll::new();
        let mut session = ParseSession::new(&converter, &mut handler);

        let state = ParseState::new()
            .with_option_value(&option, "70000", &mut session)
            .unwrap();
        assert!(state.parsed_options().is_empty());
        assert_eq!(common::unparsed(&state), ["70000"]);
        assert_eq!(handler.errors().len(), 1);
        assert!(matches!(
            handler.errors()[0],
            ParseError::RestrictionViolated { .. }
        ));
    }
}
