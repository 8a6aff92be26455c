//! Madlib - random fill-in-the-blank templates for chat bots
//!
//! Users store named templates such as `Hello {name}!` and grow pools of
//! candidate values per field. Saying a template's name renders it with one
//! randomly drawn value per placeholder.
//!
//! # Modules
//!
//! - [`store`] - SQLite-backed template and field stores behind an actor
//! - [`render`] - placeholder extraction and substitution
//! - [`command`] - `madlib <subcommand>` grammar
//! - [`plugin`] - message dispatch and replies
//! - [`console`] - terminal host used by the `ml` binary
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use madlib::{Madlib, Message, StoreManager, console::ConsoleReplier};
//!
//! let store = StoreManager::spawn("madlib.db")?;
//! let plugin = Madlib::new(store, Arc::new(ConsoleReplier));
//! plugin.message(&Message::new("madlib create hi Hello {name}!", "#chan", true)).await;
//! plugin.message(&Message::new("madlib add name World", "#chan", true)).await;
//! plugin.message(&Message::new("hi", "#chan", false)).await; // Hello World!
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod console;
pub mod domain;
pub mod message;
pub mod plugin;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use command::Command;
pub use config::Config;
pub use domain::{FieldEntry, Template};
pub use message::{Message, Replier};
pub use plugin::Madlib;
pub use render::{FieldSampler, render};
pub use store::{StoreError, StoreManager};
