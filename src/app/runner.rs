//! Runs one subcommand against a backend.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::access::{AccessState, FilePage, SshModal, SshTab};
use crate::api::{FileApi, SelectedFile};
use crate::clipboard::Osc52Clipboard;
use crate::config::Config;
use crate::screen::{
    create_palette, render_docs, render_file_info, render_file_page, render_ssh_modal,
    render_upload, DocsTopic, Palette,
};
use crate::ssh::CommandSet;
use crate::upload::UploadMachine;
use crate::Result;

use super::Command;

/// How a subcommand ended.
///
/// Flow failures (wrong password, missing file, failed upload) are shown
/// to the user and reported here; `Err` is kept for failures outside the
/// flow, such as unreadable files or a broken terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Completed,
    /// The command stopped early; its view explains why.
    Failed,
}

/// The command-line application.
pub struct App<A, R, W> {
    config: Config,
    api: A,
    commands: CommandSet,
    palette: Box<dyn Palette>,
    input: R,
    output: W,
}

impl<A: FileApi, R: BufRead, W: Write> App<A, R, W> {
    /// Create an application reading prompts from `input` and writing views
    /// to `output`.
    pub fn new(config: Config, api: A, ansi: bool, input: R, output: W) -> Self {
        let commands = CommandSet::new(config.api.base_url.clone());
        Self {
            config,
            api,
            commands,
            palette: create_palette(ansi),
            input,
            output,
        }
    }

    /// The backend in use.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Give back the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run one subcommand.
    pub async fn run(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Upload {
                path,
                password,
                generate_password,
                expiry,
                copy,
            } => {
                self.upload(&path, password, generate_password, expiry, copy)
                    .await
            }
            Command::Download {
                id,
                password,
                output,
            } => self.download(&id, password, &output).await,
            Command::Info { id } => self.info(&id).await,
            Command::Ssh { id, tab, copy } => self.ssh(&id, tab.into(), copy),
            Command::Docs { topic } => self.docs(topic.map(Into::into)),
        }
    }

    async fn upload(
        &mut self,
        path: &Path,
        password: Option<String>,
        generate_password: bool,
        expiry: Option<u32>,
        copy: bool,
    ) -> Result<Outcome> {
        let file = SelectedFile::from_path(path).await?;
        let mut machine = UploadMachine::new(
            self.config.upload.default_expiry_days,
            self.config.password.length,
        );
        machine.set_file(Some(file));
        if let Some(days) = expiry {
            machine.set_expiry_days(days);
        }

        if generate_password {
            let generated = machine.generate_password()?.to_string();
            writeln!(
                self.output,
                "Generated password: {}",
                self.palette.accent(&generated)
            )?;
        } else {
            let password = match password {
                Some(password) => password,
                None => self.prompt("Password: ")?,
            };
            machine.set_password(password);
        }

        let outcome = match machine.upload(&self.api).await {
            Ok(_) => Outcome::Completed,
            Err(e) => {
                tracing::warn!("Upload did not complete: {}", e);
                Outcome::Failed
            }
        };

        if copy && outcome == Outcome::Completed {
            let mut clipboard = Osc52Clipboard::new(&mut self.output);
            machine.copy_url(&mut clipboard)?;
        }

        let view = render_upload(&machine, self.palette.as_ref(), &self.config.display.timezone);
        write!(self.output, "{view}")?;
        Ok(outcome)
    }

    async fn download(
        &mut self,
        file_id: &str,
        password: Option<String>,
        dir: &Path,
    ) -> Result<Outcome> {
        let mut page = FilePage::load(&self.api, file_id).await?;
        let Some(machine) = page.access_mut() else {
            self.write_page(&page)?;
            return Ok(Outcome::Failed);
        };

        let password = match password {
            Some(password) => password,
            None => self.prompt("Password: ")?,
        };
        if password.trim().is_empty() {
            writeln!(
                self.output,
                "{}",
                self.palette.error("Please provide a password")
            )?;
            return Ok(Outcome::Failed);
        }
        machine.set_password(password);

        if machine.unlock(&self.api).await != AccessState::Unlocked {
            self.write_page(&page)?;
            return Ok(Outcome::Failed);
        }

        let fallback = machine.metadata().name.clone();
        match machine.download(&self.api).await {
            Ok(file) => {
                let saved = file.save_to(dir, &fallback).await?;
                self.write_page(&page)?;
                writeln!(
                    self.output,
                    "{}",
                    self.palette
                        .success(&format!("Saved to {}", saved.display()))
                )?;
                Ok(Outcome::Completed)
            }
            Err(e) => {
                tracing::warn!("Download did not complete: {}", e);
                self.write_page(&page)?;
                Ok(Outcome::Failed)
            }
        }
    }

    async fn info(&mut self, file_id: &str) -> Result<Outcome> {
        let page = FilePage::load(&self.api, file_id).await?;
        match page.access() {
            Some(machine) => {
                let view = render_file_info(
                    machine.metadata(),
                    self.palette.as_ref(),
                    &self.config.display.timezone,
                );
                write!(self.output, "{view}")?;
                Ok(Outcome::Completed)
            }
            None => {
                self.write_page(&page)?;
                Ok(Outcome::Failed)
            }
        }
    }

    fn ssh(&mut self, file_id: &str, tab: SshTab, copy: bool) -> Result<Outcome> {
        let mut modal = SshModal::opened();
        modal.select_tab(tab);
        if copy {
            let mut clipboard = Osc52Clipboard::new(&mut self.output);
            modal.copy_active(&self.commands, file_id, &mut clipboard)?;
        }
        let view = render_ssh_modal(&modal, &self.commands, file_id, self.palette.as_ref());
        write!(self.output, "{view}")?;
        Ok(Outcome::Completed)
    }

    fn docs(&mut self, topic: Option<DocsTopic>) -> Result<Outcome> {
        let topics = match topic {
            Some(topic) => vec![topic],
            None => DocsTopic::ALL.to_vec(),
        };
        let sections: Vec<String> = topics
            .into_iter()
            .map(|topic| render_docs(&self.commands, topic, self.palette.as_ref()))
            .collect();
        write!(self.output, "{}", sections.join("\n"))?;
        Ok(Outcome::Completed)
    }

    fn write_page(&mut self, page: &FilePage) -> Result<()> {
        let view = render_file_page(page, self.palette.as_ref(), &self.config.display.timezone);
        write!(self.output, "{view}")?;
        Ok(())
    }

    /// Ask for a line of input. The trailing newline is stripped.
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
