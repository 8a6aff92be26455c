//! Terminal host for the plugin
//!
//! Stands in for a chat network: every line typed is one message on a single
//! channel, and replies are printed back. A line is addressed to the bot when
//! it starts with `!` or with the bot's nick followed by `:` or `,`.

use async_trait::async_trait;
use colored::*;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::message::{Message, Replier};
use crate::plugin::Madlib;

/// Build a message from a console line, stripping any addressing prefix
pub fn parse_line(line: &str, nick: &str, channel: &str) -> Message {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix('!') {
        return Message::new(rest.trim(), channel, true);
    }

    if let Some(head) = line.get(..nick.len())
        && head.eq_ignore_ascii_case(nick)
    {
        let rest = &line[nick.len()..];
        if let Some(body) = rest.strip_prefix(':').or_else(|| rest.strip_prefix(',')) {
            return Message::new(body.trim(), channel, true);
        }
    }

    Message::new(line, channel, false)
}

/// Prints replies to stdout
pub struct ConsoleReplier;

#[async_trait]
impl Replier for ConsoleReplier {
    async fn send_reply(&self, channel: &str, text: &str) -> Result<()> {
        println!("{} {}", format!("[{}]", channel).cyan(), text);
        Ok(())
    }
}

/// Interactive console session
pub struct Console {
    plugin: Madlib,
    nick: String,
    channel: String,
}

impl Console {
    pub fn new(plugin: Madlib, nick: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            plugin,
            nick: nick.into(),
            channel: channel.into(),
        }
    }

    /// Deliver one message; prints a marker when no handler consumed it
    pub async fn say(&self, text: &str, addressed: bool) -> bool {
        let message = Message::new(text, self.channel.as_str(), addressed);
        let consumed = self.plugin.message(&message).await;
        if !consumed {
            println!("{}", "(not handled)".dimmed());
        }
        consumed
    }

    /// Run the console main loop until `/quit` or EOF
    pub async fn run(&self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    match input {
                        "/quit" | "/exit" => break,
                        "/help" => {
                            self.print_usage();
                            self.plugin.help(&self.channel).await;
                        }
                        _ => {
                            let message = parse_line(input, &self.nick, &self.channel);
                            debug!(?message, "Console::run: delivering message");
                            if !self.plugin.message(&message).await {
                                println!("{}", "(not handled)".dimmed());
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Madlib console".bright_cyan().bold());
        println!("Channel: {}  Nick: {}", self.channel, self.nick);
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn print_usage(&self) {
        println!("Lines starting with {} or {} are addressed to the bot.", "!".yellow(), format!("{}:", self.nick).yellow());
        println!("Any line equal to a madlib name renders it, addressed or not.");
        println!("Try {}", format!("{}: madlib help", self.nick).yellow());
    }
}
