//! Persistent madlib state
//!
//! Two SQLite tables back the plugin: `madlib` holds named templates and
//! `madlib_fields` holds the candidate value pools. [`Db`] runs the
//! statements; [`StoreManager`] owns a `Db` inside an actor task and is the
//! only handle the rest of the crate uses.

mod db;
mod fields;
mod manager;
mod messages;
mod templates;

pub use db::Db;
pub use manager::StoreManager;
pub use messages::{StoreCommand, StoreError, StoreResponse};
