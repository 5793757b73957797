//! Shared metadata fixtures and helpers for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use halyard::metadata::{
    CommandMeta, GlobalMeta, GroupMeta, OptionMeta, PositionalMeta, VarargMeta,
};
use halyard::restrictions::ports::PortRestriction;
use halyard::state::ParseState;
use halyard::value::{Value, ValueType};

/// A small multi-level CLI: global options, one command group, and one
/// top-level command with positionals and a vararg collection.
pub fn sample_cli() -> Arc<GlobalMeta> {
    Arc::new(
        GlobalMeta::new("hoist")
            .option(OptionMeta::new(
                "verbose",
                ["-v", "--verbose"],
                0,
                ValueType::Bool,
            ))
            .option(OptionMeta::new(
                "config",
                ["-c", "--config"],
                1,
                ValueType::String,
            ))
            .group(
                GroupMeta::new("remote")
                    .option(OptionMeta::new(
                        "quiet",
                        ["-q", "--quiet"],
                        0,
                        ValueType::Bool,
                    ))
                    .command(
                        CommandMeta::new("add")
                            .option(OptionMeta::new(
                                "tags",
                                ["-t", "--tags"],
                                1,
                                ValueType::String,
                            ))
                            .positional(
                                PositionalMeta::new("name", 0, ValueType::String).required(),
                            )
                            .positional(PositionalMeta::new("url", 1, ValueType::String))
                            .varargs(VarargMeta::new("branches", ValueType::String)),
                    ),
            )
            .command(
                CommandMeta::new("serve")
                    .option(
                        OptionMeta::new("port", ["-p", "--port"], 1, ValueType::Int)
                            .restrict(Arc::new(PortRestriction::any())),
                    )
                    .option(OptionMeta::new(
                        "workers",
                        ["-w", "--workers"],
                        1,
                        ValueType::Int,
                    ))
                    .varargs(VarargMeta::new("roots", ValueType::String)),
            ),
    )
}

pub fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Titles of the parsed options in binding order.
pub fn option_titles(state: &ParseState) -> Vec<String> {
    state
        .parsed_options()
        .iter()
        .map(|(option, _)| option.title.clone())
        .collect()
}

/// Values of the parsed options in binding order.
pub fn option_values(state: &ParseState) -> Vec<Value> {
    state
        .parsed_options()
        .iter()
        .map(|(_, value)| value.clone())
        .collect()
}

pub fn unparsed(state: &ParseState) -> Vec<String> {
    state.unparsed_input().iter().cloned().collect()
}
