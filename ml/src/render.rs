//! Template rendering
//!
//! A format string carries `{field}` placeholders. Rendering collects the
//! distinct placeholder names, draws one value per name from the field pools
//! in a single read, and substitutes every occurrence of each drawn name.
//! Placeholders whose pool is empty stay in the output verbatim.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use tracing::{debug, error};

use crate::store::{StoreError, StoreManager};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Source of one random value per field
#[async_trait]
pub trait FieldSampler: Send + Sync {
    /// Draw one value for each field with a non-empty pool
    async fn sample_one(&self, fields: BTreeSet<String>) -> Result<HashMap<String, String>, StoreError>;
}

#[async_trait]
impl FieldSampler for StoreManager {
    async fn sample_one(&self, fields: BTreeSet<String>) -> Result<HashMap<String, String>, StoreError> {
        StoreManager::sample_one(self, fields).await
    }
}

/// Distinct placeholder names in a format string
pub fn placeholders(format: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(format)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace every literal `{field}` for each field that has a value
///
/// All fields are matched by one alternation in a single pass, so values
/// containing braces are never expanded again. Placeholders without a value
/// are left untouched.
pub fn substitute(format: &str, values: &HashMap<String, String>) -> Result<String, regex::Error> {
    if values.is_empty() {
        return Ok(format.to_string());
    }

    // Longest first, then lexical, so the pattern is the same for the same keys
    let mut fields: Vec<&str> = values.keys().map(String::as_str).collect();
    fields.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = fields.iter().map(|f| regex::escape(f)).collect::<Vec<_>>().join("|");
    let pattern = Regex::new(&format!(r"\{{({})\}}", alternation))?;

    Ok(pattern
        .replace_all(format, |caps: &Captures| values[&caps[1]].clone())
        .into_owned())
}

/// Render a format string against the field pools
///
/// Never fails: a sampling error is logged and rendered as `error: <message>`.
pub async fn render<S>(format: &str, sampler: &S) -> String
where
    S: FieldSampler + ?Sized,
{
    let fields = placeholders(format);
    debug!(?fields, "render: called");
    if fields.is_empty() {
        return format.to_string();
    }

    match sampler.sample_one(fields).await {
        Ok(values) => match substitute(format, &values) {
            Ok(out) => out,
            Err(e) => {
                error!(error = %e, "render: failed to build substitution pattern");
                format!("error: {}", e)
            }
        },
        Err(e) => {
            error!(error = %e, "render: failed to sample fields");
            format!("error: {}", e)
        }
    }
}
