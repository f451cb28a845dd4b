//! Line-oriented console front-end.
//!
//! [`Console`] reads commands from any async reader, drives a
//! [`SessionService`], and writes rendered results to any async writer.
//! `main.rs` wires it to stdin/stdout; tests wire it to in-memory buffers.

pub mod command;
pub mod render;

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::ValidatorConfig;
use crate::error::{DrawError, GameError, RemovalError};
use crate::service::SessionService;

pub use command::{Command, ParseError, RemoveTarget};

/// Interactive console bound to one session.
#[derive(Debug)]
pub struct Console<R, W> {
    service: Arc<SessionService>,
    rules: ValidatorConfig,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a console. `rules` is used to phrase validation messages.
    #[must_use]
    pub const fn new(
        service: Arc<SessionService>,
        rules: ValidatorConfig,
        input: R,
        output: W,
    ) -> Self {
        Self {
            service,
            rules,
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input or writing output fails.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.say("Secret friend - type names with `add`, then `draw`. `help` lists commands.")
            .await?;
        loop {
            self.prompt("> ").await?;
            let Some(line) = self.read_line().await? else {
                break;
            };
            match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(err) => self.say(&err.to_string()).await?,
            }
        }
        self.say("Bye!").await
    }

    /// Executes one command and writes its outcome.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing output (or reading a confirmation)
    /// fails.
    pub async fn execute(&mut self, command: Command) -> std::io::Result<()> {
        match command {
            Command::Add(raw) => match self.service.add_name(&raw).await {
                Ok(participant) => {
                    self.say(&format!("{participant} added")).await?;
                    self.show_status().await?;
                }
                Err(err) => self.report(err).await?,
            },
            Command::Remove(target) => self.remove(target).await?,
            Command::Draw => match self.service.draw().await {
                Ok(participant) => {
                    let status = self.service.status().await;
                    self.say(&render::draw_result(&participant, &status)).await?;
                }
                Err(err) => self.report(err).await?,
            },
            Command::Again => match self.service.start_new_cycle().await {
                Ok(_) => {
                    self.say("New round! Everyone can be drawn again.").await?;
                    self.show_status().await?;
                }
                Err(err) => self.report(err).await?,
            },
            Command::Reset => {
                self.service.reset().await;
                self.say("Game reset! Add new names to play.").await?;
            }
            Command::Status => self.show_status().await?,
            Command::List => {
                let roster = self.service.roster().await;
                self.say(&render::roster_lines(&roster)).await?;
            }
            Command::Help => self.say(render::HELP).await?,
            Command::Quit => {}
        }
        Ok(())
    }

    async fn remove(&mut self, target: RemoveTarget) -> std::io::Result<()> {
        let roster = self.service.roster().await;
        let entry = match &target {
            RemoveTarget::Name(name) => roster.iter().find(|e| e.participant.matches(name)),
            RemoveTarget::Position(n) => roster.iter().find(|e| e.position == *n),
        };
        let Some(entry) = entry else {
            let label = match target {
                RemoveTarget::Name(name) => format!("{name:?}"),
                RemoveTarget::Position(n) => format!("#{n}"),
            };
            return self.report(RemovalError::NotFound(label)).await;
        };
        if entry.drawn {
            let participant = entry.participant.clone();
            return self.report(RemovalError::AlreadyDrawn(participant)).await;
        }

        let name = entry.participant.clone();
        self.prompt(&format!("Remove {name}? [y/N] ")).await?;
        let confirmed = self
            .read_line()
            .await?
            .is_some_and(|answer| command::is_affirmative(&answer));
        if !confirmed {
            return self.say("Kept.").await;
        }

        match self.service.remove_name(name.as_str()).await {
            Ok(removed) => {
                self.say(&format!("{removed} removed")).await?;
                self.show_status().await
            }
            Err(err) => self.report(err).await,
        }
    }

    async fn report(&mut self, err: impl Into<GameError>) -> std::io::Result<()> {
        let err = err.into();
        let drawn = match &err {
            GameError::Draw(DrawError::PoolExhausted) => self.service.drawn().await,
            _ => Vec::new(),
        };
        let msg = render::error_message(&err, &self.rules, &drawn);
        self.say(&msg).await
    }

    async fn show_status(&mut self) -> std::io::Result<()> {
        let status = self.service.status().await;
        let min = self.service.min_participants().await;
        let mut lines = Vec::new();
        if let Some(line) = render::phase_line(&status) {
            lines.push(line);
        }
        match render::draw_label(&status, min) {
            Some(label) => lines.push(format!("next: {label}")),
            None if status.total < min => {
                lines.push(format!("add at least {min} names to draw"));
            }
            None => {}
        }
        if lines.is_empty() {
            return Ok(());
        }
        self.say(&lines.join("\n")).await
    }

    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        // Bytes, not `read_line`: invalid UTF-8 must reach the validator
        // as replacement characters instead of ending the session.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    async fn prompt(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{DrawPool, EventBus};

    async fn run_script(script: &str) -> (String, Arc<SessionService>) {
        run_bytes(script.as_bytes()).await
    }

    async fn run_bytes(script: &[u8]) -> (String, Arc<SessionService>) {
        let service = Arc::new(SessionService::from_pool(
            DrawPool::seeded(5),
            EventBus::new(64),
        ));
        let mut output = Vec::new();
        let mut console = Console::new(
            Arc::clone(&service),
            ValidatorConfig::default(),
            script,
            &mut output,
        );
        let Ok(()) = console.run().await else {
            panic!("console failed");
        };
        drop(console);
        (String::from_utf8_lossy(&output).into_owned(), service)
    }

    #[tokio::test]
    async fn full_round() {
        let (out, service) =
            run_script("add  ana\nadd BETO\nadd ana\ndraw\ndraw\ndraw\nquit\n").await;
        assert!(out.contains("Ana added"));
        assert!(out.contains("Beto added"));
        assert!(out.contains("That name has already been added"));
        assert!(out.contains("is your secret friend"));
        assert!(out.contains("[3002] No one is left to draw"));
        assert!(out.ends_with("Bye!\n"));
        assert!(service.status().await.is_complete);
    }

    #[tokio::test]
    async fn remove_asks_for_confirmation() {
        let (out, service) = run_script("add Ana\nadd Beto\nremove ana\nn\nrm #2\ny\n").await;
        assert!(out.contains("Remove Ana? [y/N] "));
        assert!(out.contains("Kept."));
        assert!(out.contains("Beto removed"));
        let roster = service.roster().await;
        assert_eq!(roster.len(), 1);
    }

    #[tokio::test]
    async fn drawn_names_cannot_be_removed() {
        let (out, service) = run_script("add Ana\nadd Beto\ndraw\ndraw\nremove #1\n").await;
        assert!(out.contains("[2001] You cannot remove someone who was already drawn"));
        assert_eq!(service.status().await.total, 2);
    }

    #[tokio::test]
    async fn too_few_names_to_draw() {
        let (out, _) = run_script("add Ana\ndraw\n").await;
        assert!(out.contains("add at least 2 names to draw"));
        assert!(out.contains("Add at least 2 names for a draw"));
    }

    #[tokio::test]
    async fn again_and_reset() {
        let (out, service) = run_script("add Ana\nadd Beto\ndraw\ndraw\nagain\n").await;
        assert!(out.contains("New round!"));
        assert_eq!(service.status().await.available_count, 2);

        let (out, service) = run_script("add Ana\nreset\nlist\n").await;
        assert!(out.contains("Game reset!"));
        assert!(out.contains("No names yet"));
        assert_eq!(service.status().await.total, 0);
    }

    #[tokio::test]
    async fn unknown_removal_target_carries_code() {
        let (out, service) = run_script("add Ana\nremove #7\nremove zoe\n").await;
        assert!(out.contains("[2002] No participant matches #7"));
        assert!(out.contains("[2002] No participant matches \"zoe\""));
        assert_eq!(service.status().await.total, 1);
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_rejected_not_fatal() {
        let (out, service) = run_bytes(b"add Ana\nadd \xff\xfe\nadd Beto\nadd Carla\n").await;
        assert!(out.contains("[1001] "));
        assert!(out.contains("Carla added"));
        assert!(out.ends_with("Bye!\n"));
        assert_eq!(service.status().await.total, 3);
    }

    #[tokio::test]
    async fn replacement_characters_fail_the_charset_rule() {
        let (out, service) = run_bytes(b"add \xff\xfe\xfd\xfc\n").await;
        assert!(out.contains("[1001] Only letters and spaces are allowed"));
        assert_eq!(service.status().await.total, 0);
    }

    #[tokio::test]
    async fn unknown_command_is_reported() {
        let (out, _) = run_script("dance\n").await;
        assert!(out.contains("unknown command `dance`"));
    }
}
