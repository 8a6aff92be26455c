//! Chat command grammar
//!
//! Addressed messages of the form `madlib <subcommand> <args...>` parse into a
//! [`Command`]. Parsing has no side effects; the plugin executes the result.

/// Usage text sent for unknown or malformed subcommands
pub const HELP: &str = "Address me and use the command madlib with the following:\n\
\t`create <madlib name> <format>` - make a new madlib\n\
\t`delete <madlib name>` - remove a madlib\n\
\t`add <field> <value>` - add a format field value\n\
\t`remove <field> <value>` - remove a format field value\n\
\t`list` - list all current madlibs\n\
Format is a string with a field represented as `{field}`";

/// Leading word that marks a madlib command
pub const PREFIX: &str = "madlib";

/// A parsed madlib subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create <name> <format...>`
    Create { name: String, format: String },
    /// `delete <name>`
    Delete { name: String },
    /// `add <field> <value...>`
    Add { field: String, value: String },
    /// `remove <field> <value>` (single-word value only)
    Remove { field: String, value: String },
    /// `list`
    List,
    /// Anything else after the prefix
    Help,
}

impl Command {
    /// Parse message text
    ///
    /// Returns `None` when the text does not start with the `madlib` word or
    /// has nothing after it; such messages are left for other handlers.
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let prefix = words.next()?;
        if !prefix.eq_ignore_ascii_case(PREFIX) {
            return None;
        }

        let args: Vec<&str> = words.collect();
        let (sub, rest) = args.split_first()?;

        let command = match (sub.to_lowercase().as_str(), rest) {
            ("create", [name, format @ ..]) if !format.is_empty() => Self::Create {
                name: name.to_string(),
                format: format.join(" "),
            },
            ("delete", [name]) => Self::Delete { name: name.to_string() },
            ("add", [field, value @ ..]) if !value.is_empty() => Self::Add {
                field: field.to_string(),
                value: value.join(" "),
            },
            ("remove", [field, value]) => Self::Remove {
                field: field.to_string(),
                value: value.to_string(),
            },
            ("list", []) => Self::List,
            _ => Self::Help,
        };
        Some(command)
    }
}
