//! The madlib chat plugin
//!
//! Every inbound message is first checked against the template names: a
//! message whose whole text is a template name renders that template, whether
//! or not the bot was addressed. Otherwise addressed `madlib ...` commands are
//! parsed and executed. Storage failures become generic replies; the detail
//! only goes to the log.

use std::sync::Arc;

use tracing::{Instrument, Span, debug, error, info_span, warn};

use crate::command::{Command, HELP};
use crate::domain::Template;
use crate::message::{Message, Replier};
use crate::render::render;
use crate::store::{StoreError, StoreManager};

/// Reply when a passive template lookup fails
pub const LOOKUP_FAILED: &str = "There was a problem.";

/// Reply when a subcommand hits a storage error
pub const COMMAND_FAILED: &str = "Something went horribly wrong.";

/// Madlib plugin instance
///
/// Cheap to clone; clones share the same store actor and reply capability.
#[derive(Clone)]
pub struct Madlib {
    store: StoreManager,
    replier: Arc<dyn Replier>,
    span: Span,
}

impl Madlib {
    /// Create a plugin over an already-spawned store
    pub fn new(store: StoreManager, replier: Arc<dyn Replier>) -> Self {
        Self {
            store,
            replier,
            span: info_span!("madlib"),
        }
    }

    /// Log under the given span instead of the default `madlib` span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Handle an inbound message, returning whether it was consumed
    pub async fn message(&self, message: &Message) -> bool {
        self.handle(message).instrument(self.span.clone()).await
    }

    /// Send the usage text to a channel
    pub async fn help(&self, channel: &str) {
        self.reply(channel, HELP).instrument(self.span.clone()).await;
    }

    async fn handle(&self, message: &Message) -> bool {
        debug!(channel = %message.channel, addressed = message.addressed, "handle: called");

        let key = Template::normalize_name(&message.text);
        if !key.is_empty() {
            match self.store.get_template(&key).await {
                Ok(Some(template)) => {
                    debug!(name = %template.name, "handle: passive trigger");
                    let out = render(&template.format, &self.store).await;
                    self.reply(&message.channel, &out).await;
                    return true;
                }
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, name = %key, "handle: template lookup failed");
                    self.reply(&message.channel, LOOKUP_FAILED).await;
                    return true;
                }
            }
        }

        if !message.addressed {
            return false;
        }

        let Some(command) = Command::parse(&message.text) else {
            return false;
        };
        debug!(?command, "handle: parsed command");

        let out = self.execute(command).await;
        self.reply(&message.channel, &out).await;
        true
    }

    /// Run a parsed command and produce the reply text
    pub async fn execute(&self, command: Command) -> String {
        match command {
            Command::Create { name, format } => match self.store.create_template(&name, &format).await {
                Ok(template) => render(&template.format, &self.store).await,
                Err(StoreError::DuplicateName(name)) => {
                    warn!(%name, "execute: duplicate madlib name");
                    format!("A madlib named {} already exists.", name)
                }
                Err(e) => failed(e),
            },
            Command::Delete { name } => match self.store.delete_template(&name).await {
                Ok(_) => "Deleted.".to_string(),
                Err(e) => failed(e),
            },
            Command::Add { field, value } => match self.store.add_field(&field, &value).await {
                Ok(()) => "Added.".to_string(),
                Err(e) => failed(e),
            },
            Command::Remove { field, value } => match self.store.remove_field(&field, &value).await {
                Ok(_) => "Removed.".to_string(),
                Err(e) => failed(e),
            },
            Command::List => match self.store.list_templates().await {
                Ok(names) => names.join(", "),
                Err(e) => failed(e),
            },
            Command::Help => HELP.to_string(),
        }
    }

    async fn reply(&self, channel: &str, text: &str) {
        if let Err(e) = self.replier.send_reply(channel, text).await {
            warn!(error = %e, %channel, "reply: failed to send");
        }
    }
}

fn failed(e: StoreError) -> String {
    error!(error = %e, "execute: storage error");
    COMMAND_FAILED.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every reply
    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<(String, String)> {
            std::mem::take(&mut *self.sent.lock().unwrap())
        }

        fn last_text(&self) -> String {
            self.sent.lock().unwrap().last().map(|(_, t)| t.clone()).unwrap()
        }
    }

    #[async_trait]
    impl Replier for Recorder {
        async fn send_reply(&self, channel: &str, text: &str) -> eyre::Result<()> {
            self.sent.lock().unwrap().push((channel.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn setup() -> (Madlib, Arc<Recorder>) {
        let store = StoreManager::spawn_in_memory().unwrap();
        let recorder = Arc::new(Recorder::default());
        (Madlib::new(store, recorder.clone()), recorder)
    }

    fn addressed(text: &str) -> Message {
        Message::new(text, "#test", true)
    }

    fn unaddressed(text: &str) -> Message {
        Message::new(text, "#test", false)
    }

    #[tokio::test]
    async fn test_hello_world_scenario() {
        let (plugin, recorder) = setup();

        assert!(plugin.message(&addressed("madlib create foo Hello {name}!")).await);
        assert_eq!(recorder.last_text(), "Hello {name}!");

        assert!(plugin.message(&addressed("madlib add name World")).await);
        assert_eq!(recorder.last_text(), "Added.");

        assert!(plugin.message(&addressed("foo")).await);
        assert_eq!(recorder.last_text(), "Hello World!");
    }

    #[tokio::test]
    async fn test_unresolved_placeholder_scenario() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create foo Hi {name}!")).await;
        plugin.message(&addressed("foo")).await;
        assert_eq!(recorder.last_text(), "Hi {name}!");
    }

    #[tokio::test]
    async fn test_passive_trigger() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create foo plain")).await;
        recorder.take();

        assert!(plugin.message(&unaddressed("  FOO ")).await);
        assert_eq!(recorder.take(), vec![("#test".to_string(), "plain".to_string())]);
    }

    #[tokio::test]
    async fn test_unaddressed_commands_ignored() {
        let (plugin, recorder) = setup();
        assert!(!plugin.message(&unaddressed("madlib list")).await);
        assert!(!plugin.message(&unaddressed("hello")).await);
        assert!(recorder.take().is_empty());
    }

    #[tokio::test]
    async fn test_addressed_non_commands_not_consumed() {
        let (plugin, recorder) = setup();
        assert!(!plugin.message(&addressed("what time is it")).await);
        assert!(!plugin.message(&addressed("madlib")).await);
        assert!(!plugin.message(&addressed("")).await);
        assert!(recorder.take().is_empty());
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (plugin, recorder) = setup();
        assert!(plugin.message(&addressed("madlib list")).await);
        assert_eq!(recorder.take(), vec![("#test".to_string(), String::new())]);
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create Foo x")).await;
        plugin.message(&addressed("madlib create bar y")).await;
        plugin.message(&addressed("madlib list")).await;
        assert_eq!(recorder.last_text(), "foo, bar");
    }

    #[tokio::test]
    async fn test_duplicate_create() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create foo x")).await;
        plugin.message(&addressed("madlib create FOO y")).await;
        assert_eq!(recorder.last_text(), "A madlib named foo already exists.");

        plugin.message(&addressed("madlib list")).await;
        assert_eq!(recorder.last_text(), "foo");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create foo x")).await;

        plugin.message(&addressed("madlib delete foo")).await;
        assert_eq!(recorder.last_text(), "Deleted.");
        plugin.message(&addressed("madlib delete foo")).await;
        assert_eq!(recorder.last_text(), "Deleted.");

        assert!(!plugin.message(&unaddressed("foo")).await);
    }

    #[tokio::test]
    async fn test_remove_value() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create pet {animal}")).await;
        plugin.message(&addressed("madlib add animal cat")).await;
        plugin.message(&addressed("madlib add animal dog")).await;

        plugin.message(&addressed("madlib remove animal cat")).await;
        assert_eq!(recorder.last_text(), "Removed.");

        for _ in 0..20 {
            plugin.message(&unaddressed("pet")).await;
            assert_eq!(recorder.last_text(), "dog");
        }
    }

    #[tokio::test]
    async fn test_malformed_commands_reply_help() {
        let (plugin, recorder) = setup();
        for text in ["madlib delete", "madlib remove a b c", "madlib frobnicate", "madlib list now"] {
            assert!(plugin.message(&addressed(text)).await);
            assert_eq!(recorder.last_text(), HELP);
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let (plugin, recorder) = setup();
        plugin.store.shutdown().await.unwrap();
        tokio::task::yield_now().await;

        assert!(plugin.message(&addressed("madlib list")).await);
        assert_eq!(recorder.last_text(), LOOKUP_FAILED);

        assert_eq!(plugin.execute(Command::List).await, COMMAND_FAILED);
    }

    #[tokio::test]
    async fn test_help() {
        let (plugin, recorder) = setup();
        plugin.help("#other").await;
        assert_eq!(recorder.take(), vec![("#other".to_string(), HELP.to_string())]);
    }

    #[tokio::test]
    async fn test_concurrent_adds() {
        let (plugin, recorder) = setup();
        plugin.message(&addressed("madlib create n {n}")).await;

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let plugin = plugin.clone();
                tokio::spawn(async move { plugin.message(&addressed(&format!("madlib add n v{i}"))).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        recorder.take();

        plugin.message(&unaddressed("n")).await;
        let out = recorder.last_text();
        assert!(out.starts_with('v') && out[1..].parse::<u32>().unwrap() < 10);
    }
}
