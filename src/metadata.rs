//! The read-only metadata model the engine consumes.
//!
//! How these descriptors are declared (attribute macros, config files, hand
//! written builders) is the host program's business; the engine only reads
//! them. Everything here is immutable for the duration of a parse, so the
//! driver and recognizers share the model freely by `Arc`.

use std::sync::Arc;

use crate::restrictions::Restriction;
use crate::value::ValueType;

/// A named option with an arity and a restriction list.
///
/// Names carry their leading dashes (`"-v"`, `"--verbose"`); an option may
/// answer to any number of aliases. Arity is the number of value tokens the
/// option consumes: 0 marks a flag bound to `true`, 1 a single value.
#[derive(Debug, Clone)]
pub struct OptionMeta {
    pub title: String,
    pub names: Vec<String>,
    pub arity: usize,
    pub required: bool,
    pub value_type: ValueType,
    pub restrictions: Vec<Arc<dyn Restriction>>,
}

impl OptionMeta {
    pub fn new<S: Into<String>>(
        title: impl Into<String>,
        names: impl IntoIterator<Item = S>,
        arity: usize,
        value_type: ValueType,
    ) -> Self {
        OptionMeta {
            title: title.into(),
            names: names.into_iter().map(Into::into).collect(),
            arity,
            required: false,
            value_type,
            restrictions: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn restrict(mut self, restriction: Arc<dyn Restriction>) -> Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn answers_to(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// An argument bound by declared position rather than by name.
#[derive(Debug, Clone)]
pub struct PositionalMeta {
    pub title: String,
    pub position: usize,
    pub required: bool,
    pub value_type: ValueType,
    pub restrictions: Vec<Arc<dyn Restriction>>,
}

impl PositionalMeta {
    pub fn new(title: impl Into<String>, position: usize, value_type: ValueType) -> Self {
        PositionalMeta {
            title: title.into(),
            position,
            required: false,
            value_type,
            restrictions: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn restrict(mut self, restriction: Arc<dyn Restriction>) -> Self {
        self.restrictions.push(restriction);
        self
    }
}

/// The catch-all collection filled once every declared positional slot is
/// bound. Restrictions apply per appended value.
#[derive(Debug, Clone)]
pub struct VarargMeta {
    pub title: String,
    pub value_type: ValueType,
    pub restrictions: Vec<Arc<dyn Restriction>>,
}

impl VarargMeta {
    pub fn new(title: impl Into<String>, value_type: ValueType) -> Self {
        VarargMeta {
            title: title.into(),
            value_type,
            restrictions: Vec::new(),
        }
    }

    pub fn restrict(mut self, restriction: Arc<dyn Restriction>) -> Self {
        self.restrictions.push(restriction);
        self
    }
}

/// A command: its own options plus declared positional slots and an optional
/// vararg collection.
#[derive(Debug, Clone)]
pub struct CommandMeta {
    pub name: String,
    pub options: Vec<Arc<OptionMeta>>,
    pub positionals: Vec<Arc<PositionalMeta>>,
    pub varargs: Option<Arc<VarargMeta>>,
}

impl CommandMeta {
    pub fn new(name: impl Into<String>) -> Self {
        CommandMeta {
            name: name.into(),
            options: Vec::new(),
            positionals: Vec::new(),
            varargs: None,
        }
    }

    pub fn option(mut self, option: OptionMeta) -> Self {
        self.options.push(Arc::new(option));
        self
    }

    pub fn positional(mut self, slot: PositionalMeta) -> Self {
        self.positionals.push(Arc::new(slot));
        self
    }

    pub fn varargs(mut self, varargs: VarargMeta) -> Self {
        self.varargs = Some(Arc::new(varargs));
        self
    }
}

/// An optional grouping level between the global scope and commands.
#[derive(Debug, Clone)]
pub struct GroupMeta {
    pub name: String,
    pub options: Vec<Arc<OptionMeta>>,
    pub commands: Vec<Arc<CommandMeta>>,
}

impl GroupMeta {
    pub fn new(name: impl Into<String>) -> Self {
        GroupMeta {
            name: name.into(),
            options: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionMeta) -> Self {
        self.options.push(Arc::new(option));
        self
    }

    pub fn command(mut self, command: CommandMeta) -> Self {
        self.commands.push(Arc::new(command));
        self
    }

    pub fn find_command(&self, name: &str) -> Option<&Arc<CommandMeta>> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// The root of the metadata model: global options, optional command groups,
/// and top-level commands.
#[derive(Debug, Clone)]
pub struct GlobalMeta {
    pub name: String,
    pub options: Vec<Arc<OptionMeta>>,
    pub groups: Vec<Arc<GroupMeta>>,
    pub commands: Vec<Arc<CommandMeta>>,
}

impl GlobalMeta {
    pub fn new(name: impl Into<String>) -> Self {
        GlobalMeta {
            name: name.into(),
            options: Vec::new(),
            groups: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionMeta) -> Self {
        self.options.push(Arc::new(option));
        self
    }

    pub fn group(mut self, group: GroupMeta) -> Self {
        self.groups.push(Arc::new(group));
        self
    }

    pub fn command(mut self, command: CommandMeta) -> Self {
        self.commands.push(Arc::new(command));
        self
    }

    pub fn find_group(&self, name: &str) -> Option<&Arc<GroupMeta>> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn find_command(&self, name: &str) -> Option<&Arc<CommandMeta>> {
        self.commands.iter().find(|c| c.name == name)
    }
}
