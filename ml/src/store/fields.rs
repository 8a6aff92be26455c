//! Field pools: candidate values keyed by placeholder name

use std::collections::{BTreeSet, HashMap};

use rand::seq::IndexedRandom;
use rusqlite::{params, params_from_iter};
use tracing::debug;

use super::db::Db;
use super::messages::StoreError;
use crate::domain::FieldEntry;

impl Db {
    /// Append a candidate value to a field's pool (no dedup)
    pub fn add_field(&self, field: &str, value: &str) -> Result<(), StoreError> {
        debug!(%field, %value, "Db::add_field: called");
        self.conn.execute(
            "INSERT INTO madlib_fields (field, value) VALUES (?1, ?2)",
            params![field, value],
        )?;
        Ok(())
    }

    /// Delete every entry matching field and value exactly, returning the row count
    pub fn remove_field(&self, field: &str, value: &str) -> Result<usize, StoreError> {
        debug!(%field, %value, "Db::remove_field: called");
        let removed = self.conn.execute(
            "DELETE FROM madlib_fields WHERE field = ?1 AND value = ?2",
            params![field, value],
        )?;
        Ok(removed)
    }

    /// Pick one value uniformly at random for each requested field
    ///
    /// All candidate rows are read with a single statement, grouped by field,
    /// and one is drawn per group. Fields with an empty pool are absent from
    /// the result.
    pub fn sample_one(&self, fields: &BTreeSet<String>) -> Result<HashMap<String, String>, StoreError> {
        debug!(?fields, "Db::sample_one: called");
        if fields.is_empty() {
            return Ok(HashMap::new());
        }

        let pools = self.pools(fields)?;

        let mut rng = rand::rng();
        let sampled = pools
            .into_iter()
            .filter_map(|(field, values)| values.choose(&mut rng).cloned().map(|value| (field, value)))
            .collect();
        Ok(sampled)
    }

    fn pools(&self, fields: &BTreeSet<String>) -> Result<HashMap<String, Vec<String>>, StoreError> {
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!("SELECT field, value FROM madlib_fields WHERE field IN ({placeholders})");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(fields.iter()), |row| {
            Ok(FieldEntry {
                field: row.get(0)?,
                value: row.get(1)?,
            })
        })?;

        let mut pools: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let entry = row?;
            pools.entry(entry.field).or_default().push(entry.value);
        }
        Ok(pools)
    }
}
