//! Named templates

use rusqlite::{OptionalExtension, params};
use tracing::{debug, info};

use super::db::Db;
use super::messages::StoreError;
use crate::domain::Template;

impl Db {
    /// Store a new template under its lowercased name
    pub fn create_template(&self, name: &str, format: &str) -> Result<Template, StoreError> {
        let name = Template::normalize_name(name);
        debug!(%name, %format, "Db::create_template: called");

        if self.get_template(&name)?.is_some() {
            return Err(StoreError::DuplicateName(name));
        }

        self.conn.execute(
            "INSERT INTO madlib (name, format) VALUES (?1, ?2)",
            params![name, format],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, %name, "Created madlib");

        Ok(Template {
            id,
            name,
            format: format.to_string(),
        })
    }

    /// Delete a template by name, returning the row count (0 for unknown names)
    pub fn delete_template(&self, name: &str) -> Result<usize, StoreError> {
        let name = Template::normalize_name(name);
        debug!(%name, "Db::delete_template: called");
        let removed = self.conn.execute("DELETE FROM madlib WHERE name = ?1", params![name])?;
        if removed > 0 {
            info!(%name, removed, "Deleted madlib");
        }
        Ok(removed)
    }

    /// All template names in storage order
    pub fn list_templates(&self) -> Result<Vec<String>, StoreError> {
        debug!("Db::list_templates: called");
        let mut stmt = self.conn.prepare("SELECT name FROM madlib ORDER BY id")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Exact lookup on the lowercased name
    pub fn get_template(&self, name: &str) -> Result<Option<Template>, StoreError> {
        let name = Template::normalize_name(name);
        debug!(%name, "Db::get_template: called");
        let template = self
            .conn
            .query_row(
                "SELECT id, name, format FROM madlib WHERE name = ?1 ORDER BY id LIMIT 1",
                params![name],
                |row| {
                    Ok(Template {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        format: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lowercases_name() {
        let db = Db::open_in_memory().unwrap();
        let template = db.create_template("Greeting", "Hello {Name}!").unwrap();
        assert_eq!(template.name, "greeting");
        assert_eq!(template.format, "Hello {Name}!");

        let found = db.get_template("GREETING").unwrap().unwrap();
        assert_eq!(found, template);
    }

    #[test]
    fn test_create_duplicate_name() {
        let db = Db::open_in_memory().unwrap();
        db.create_template("foo", "one").unwrap();

        let err = db.create_template("FOO", "two").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref name) if name == "foo"));
        assert_eq!(db.get_template("foo").unwrap().unwrap().format, "one");
    }

    #[test]
    fn test_create_then_list_once() {
        let db = Db::open_in_memory().unwrap();
        db.create_template("b", "x").unwrap();
        db.create_template("a", "y").unwrap();

        let names = db.list_templates().unwrap();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_list_empty() {
        let db = Db::open_in_memory().unwrap();
        assert!(db.list_templates().unwrap().is_empty());
    }

    #[test]
    fn test_delete_twice() {
        let db = Db::open_in_memory().unwrap();
        db.create_template("foo", "x").unwrap();

        assert_eq!(db.delete_template("foo").unwrap(), 1);
        assert_eq!(db.delete_template("foo").unwrap(), 0);
        assert!(db.get_template("foo").unwrap().is_none());
    }

    #[test]
    fn test_lookup_is_not_fuzzy() {
        let db = Db::open_in_memory().unwrap();
        db.create_template("foobar", "x").unwrap();
        assert!(db.get_template("foo").unwrap().is_none());
        assert!(db.get_template("foobar!").unwrap().is_none());
    }
}
