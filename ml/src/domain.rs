//! Madlib record types

/// A named format string with `{field}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Row id in the `madlib` table
    pub id: i64,

    /// Lowercase name, unique across templates
    pub name: String,

    /// Format string, rendered by substituting each placeholder
    pub format: String,
}

impl Template {
    /// Normalize a user-supplied name into its stored form
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

/// One candidate value in a field's pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Placeholder name, without braces
    pub field: String,

    /// Substitution text
    pub value: String,
}
