//! Store manager messages
//!
//! Commands and responses for the actor pattern.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::Template;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A madlib named {0} already exists")]
    DuplicateName(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Channel error")]
    ChannelError,
}

/// Response from store operations
pub type StoreResponse<T> = Result<T, StoreError>;

/// Commands sent to the StoreManager actor
#[derive(Debug)]
pub enum StoreCommand {
    // Field operations
    AddField {
        field: String,
        value: String,
        reply: oneshot::Sender<StoreResponse<()>>,
    },
    RemoveField {
        field: String,
        value: String,
        reply: oneshot::Sender<StoreResponse<usize>>,
    },
    SampleOne {
        fields: BTreeSet<String>,
        reply: oneshot::Sender<StoreResponse<HashMap<String, String>>>,
    },

    // Template operations
    CreateTemplate {
        name: String,
        format: String,
        reply: oneshot::Sender<StoreResponse<Template>>,
    },
    DeleteTemplate {
        name: String,
        reply: oneshot::Sender<StoreResponse<usize>>,
    },
    ListTemplates {
        reply: oneshot::Sender<StoreResponse<Vec<String>>>,
    },
    GetTemplate {
        name: String,
        reply: oneshot::Sender<StoreResponse<Option<Template>>>,
    },

    // Lifecycle
    Shutdown,
}
