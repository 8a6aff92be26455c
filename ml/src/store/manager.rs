//! StoreManager - actor that owns the SQLite connection
//!
//! Processes commands via channels so every statement against the madlib
//! tables runs one at a time on a single connection.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tokio::sync::{mpsc, oneshot};
use tracing::{Instrument, Span, debug, info};

use super::db::Db;
use super::messages::{StoreCommand, StoreError, StoreResponse};
use crate::domain::Template;

/// Handle to send commands to the StoreManager
#[derive(Clone)]
pub struct StoreManager {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreManager {
    /// Open the database at `path` and spawn the actor
    ///
    /// Fails if the schema cannot be created; nothing is spawned in that case.
    pub fn spawn(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        debug!(path = %path.as_ref().display(), "spawn: called");
        let db = Db::open(path)?;
        Ok(Self::spawn_with(db))
    }

    /// Spawn the actor over a private in-memory database
    pub fn spawn_in_memory() -> Result<Self, StoreError> {
        debug!("spawn_in_memory: called");
        let db = Db::open_in_memory()?;
        Ok(Self::spawn_with(db))
    }

    /// The actor runs under the span current at spawn time
    fn spawn_with(db: Db) -> Self {
        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(actor_loop(db, rx).instrument(Span::current()));
        info!("StoreManager spawned");
        Self { tx }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<StoreResponse<T>>) -> StoreCommand) -> StoreResponse<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    // === Field operations ===

    /// Append a candidate value to a field's pool
    pub async fn add_field(&self, field: &str, value: &str) -> StoreResponse<()> {
        debug!(%field, %value, "add_field: called");
        self.request(|reply| StoreCommand::AddField {
            field: field.to_string(),
            value: value.to_string(),
            reply,
        })
        .await
    }

    /// Delete every entry matching field and value
    pub async fn remove_field(&self, field: &str, value: &str) -> StoreResponse<usize> {
        debug!(%field, %value, "remove_field: called");
        self.request(|reply| StoreCommand::RemoveField {
            field: field.to_string(),
            value: value.to_string(),
            reply,
        })
        .await
    }

    /// One random value per requested field; empty pools are absent
    pub async fn sample_one(&self, fields: BTreeSet<String>) -> StoreResponse<HashMap<String, String>> {
        debug!(?fields, "sample_one: called");
        self.request(|reply| StoreCommand::SampleOne { fields, reply }).await
    }

    // === Template operations ===

    /// Create a template; fails with `DuplicateName` if the name is taken
    pub async fn create_template(&self, name: &str, format: &str) -> StoreResponse<Template> {
        debug!(%name, %format, "create_template: called");
        self.request(|reply| StoreCommand::CreateTemplate {
            name: name.to_string(),
            format: format.to_string(),
            reply,
        })
        .await
    }

    /// Delete a template by name; unknown names are a no-op
    pub async fn delete_template(&self, name: &str) -> StoreResponse<usize> {
        debug!(%name, "delete_template: called");
        self.request(|reply| StoreCommand::DeleteTemplate {
            name: name.to_string(),
            reply,
        })
        .await
    }

    /// Template names in storage order
    pub async fn list_templates(&self) -> StoreResponse<Vec<String>> {
        debug!("list_templates: called");
        self.request(|reply| StoreCommand::ListTemplates { reply }).await
    }

    /// Look up a template by exact (lowercased) name
    pub async fn get_template(&self, name: &str) -> StoreResponse<Option<Template>> {
        debug!(%name, "get_template: called");
        self.request(|reply| StoreCommand::GetTemplate {
            name: name.to_string(),
            reply,
        })
        .await
    }

    /// Shutdown the StoreManager
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("shutdown: called");
        self.tx
            .send(StoreCommand::Shutdown)
            .await
            .map_err(|_| StoreError::ChannelError)
    }
}

async fn actor_loop(db: Db, mut rx: mpsc::Receiver<StoreCommand>) {
    debug!("StoreManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::AddField { field, value, reply } => {
                debug!(%field, "actor_loop: AddField command");
                let _ = reply.send(db.add_field(&field, &value));
            }

            StoreCommand::RemoveField { field, value, reply } => {
                debug!(%field, "actor_loop: RemoveField command");
                let _ = reply.send(db.remove_field(&field, &value));
            }

            StoreCommand::SampleOne { fields, reply } => {
                debug!(count = fields.len(), "actor_loop: SampleOne command");
                let _ = reply.send(db.sample_one(&fields));
            }

            StoreCommand::CreateTemplate { name, format, reply } => {
                debug!(%name, "actor_loop: CreateTemplate command");
                let _ = reply.send(db.create_template(&name, &format));
            }

            StoreCommand::DeleteTemplate { name, reply } => {
                debug!(%name, "actor_loop: DeleteTemplate command");
                let _ = reply.send(db.delete_template(&name));
            }

            StoreCommand::ListTemplates { reply } => {
                debug!("actor_loop: ListTemplates command");
                let _ = reply.send(db.list_templates());
            }

            StoreCommand::GetTemplate { name, reply } => {
                debug!(%name, "actor_loop: GetTemplate command");
                let _ = reply.send(db.get_template(&name));
            }

            StoreCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("StoreManager shutting down");
                break;
            }
        }
    }

    debug!("StoreManager actor stopped");
}
