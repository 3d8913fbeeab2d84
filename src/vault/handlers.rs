use crate::config::Config;
use crate::filesystem::store::FileKeyValueStore;
use crate::vault::command::{Change, Command, Outcome};
use crate::vault::generator::{generate, GenOptions, SystemRng};
use crate::vault::models::RecordInput;
use crate::vault::persistence::Persistence;
use crate::vault::ports::Renderer;
use crate::vault::service::VaultService;
use crate::view::snapshot::{SnapshotRenderer, StderrNotifier};
use crate::view::text::TextRenderer;
use anyhow::{anyhow, bail, Result};
use inquire::Password;
use std::sync::Arc;

/// Where the password for `add` comes from.
#[derive(Debug, Clone)]
pub enum SecretSource {
    Given(String),
    Prompt,
    Generate(GenOptions),
    Missing,
}

pub struct AddOptions {
    pub title: String,
    pub user: String,
    pub url: String,
    pub secret: SecretSource,
}

pub struct Vault<'a> {
    config: &'a Config,
}

impl<'a> Vault<'a> {
    pub fn create(config: &'a Config) -> Self {
        Vault { config }
    }

    fn open(&self, renderer: Box<dyn Renderer>) -> Result<VaultService> {
        let store = Arc::new(FileKeyValueStore::new_with_backups(
            self.config.data_dir.clone(),
            self.config.backups,
        ));
        let persistence = Persistence::new(store, self.config.codec.codec());
        let service = VaultService::open(
            persistence,
            Arc::new(SystemRng),
            renderer,
            Box::new(StderrNotifier),
        )?;
        Ok(service)
    }

    /// Open with a renderer whose output nobody reads; mutating commands
    /// report a status line instead of the table.
    fn open_quiet(&self) -> Result<VaultService> {
        self.open(Box::new(SnapshotRenderer::new()))
    }

    pub fn handle_add(&self, opts: AddOptions) -> Result<()> {
        let mut service = self.open_quiet()?;
        let secret = match opts.secret {
            SecretSource::Given(s) => s,
            SecretSource::Prompt => Password::new("Password").without_confirmation().prompt()?,
            SecretSource::Generate(options) => {
                match service.dispatch(Command::Generate(options))? {
                    Outcome::Generated(pw) => pw,
                    other => return Err(anyhow!("unexpected generator outcome: {other:?}")),
                }
            }
            SecretSource::Missing => String::new(),
        };

        let input = RecordInput::new(opts.title, opts.user, opts.url, secret);
        match service.dispatch(Command::Add(input))? {
            Outcome::Committed(Change::Added { id }) => {
                println!("✅ Entry saved ({id}).");
                Ok(())
            }
            // The notifier already printed the reason.
            Outcome::Rejected(_) => bail!("entry not saved"),
            other => Err(anyhow!("unexpected add outcome: {other:?}")),
        }
    }

    pub fn handle_list(&self, json_mode: bool) -> Result<()> {
        if json_mode {
            let service = self.open_quiet()?;
            println!("{}", serde_json::to_string_pretty(service.records())?);
            return Ok(());
        }
        // Opening draws the table once.
        self.open(Box::new(TextRenderer::stdout()))?;
        Ok(())
    }

    pub fn handle_rm(&self, id: &str) -> Result<()> {
        let mut service = self.open_quiet()?;
        match service.dispatch(Command::Remove(id.to_string()))? {
            Outcome::Committed(Change::Removed { found: true, .. }) => {
                println!("🗑️ Entry '{id}' removed.");
            }
            _ => println!("❌ No entry found with id '{id}'"),
        }
        Ok(())
    }

    pub fn handle_toggle(&self, id: &str) -> Result<()> {
        let mut service = self.open_quiet()?;
        match service.dispatch(Command::ToggleMask(id.to_string()))? {
            Outcome::Committed(Change::MaskToggled { masked: true, .. }) => {
                println!("🙈 Entry '{id}' masked.");
            }
            Outcome::Committed(Change::MaskToggled { masked: false, .. }) => {
                println!("👁 Entry '{id}' revealed.");
            }
            _ => println!("❌ No entry found with id '{id}'"),
        }
        Ok(())
    }

    pub fn handle_generate(&self, options: GenOptions) -> Result<()> {
        println!("{}", generate(&SystemRng, &options)?);
        Ok(())
    }
}
