#![allow(clippy::module_inception)]
use crate::cli::cli::{CacheCommand, Cli, Commands, GenArgs};
use crate::config::Config;
use crate::logging;
use crate::offline::fetch::DirFetcher;
use crate::offline::ports::CacheStorage;
use crate::offline::request::AssetRequest;
use crate::offline::storage::DirCacheStorage;
use crate::offline::{CacheManager, Served, DEFAULT_MANIFEST};
use crate::tui;
use crate::vault::handlers::{AddOptions, SecretSource, Vault};
use anyhow::Context;
use clap::Parser;
use std::io::Write;

pub mod cli;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::create(cli.data_dir.clone())?;

    // Dropping the guard flushes the file writer.
    let _log_guard = match cli.command {
        Commands::Tui => logging::init_file(&config.log_path()),
        _ => {
            logging::init_stderr();
            None
        }
    };

    let vault = Vault::create(&config);
    match cli.command {
        Commands::Tui => tui::launch(&config).await?,
        Commands::Add {
            title,
            user,
            url,
            secret,
            prompt_secret,
            generate,
            generator,
        } => {
            let secret = if let Some(s) = secret {
                SecretSource::Given(s)
            } else if prompt_secret {
                SecretSource::Prompt
            } else if generate {
                SecretSource::Generate(GenArgs::from(generator).options(config.generator))
            } else {
                SecretSource::Missing
            };
            vault.handle_add(AddOptions { title, user, url, secret })?;
        }
        Commands::List { json } => vault.handle_list(json)?,
        Commands::Rm { id } => vault.handle_rm(&id)?,
        Commands::Toggle { id } => vault.handle_toggle(&id)?,
        Commands::Generate { generator } => {
            vault.handle_generate(generator.options(config.generator))?
        }
        Commands::Cache(cmd) => handle_cache_commands(&config, cmd).await?,
    }

    Ok(())
}

async fn handle_cache_commands(config: &Config, cmd: CacheCommand) -> anyhow::Result<()> {
    let manager = CacheManager::new(
        config.cache_version.clone(),
        DirCacheStorage::new(config.cache_dir.clone()),
        DirFetcher::new(config.assets_dir.clone()),
    );

    match cmd {
        CacheCommand::Install => {
            let count = manager.install(DEFAULT_MANIFEST).await?;
            println!("✅ Cached {count} assets in \"{}\".", manager.version());
        }
        CacheCommand::Activate => {
            let deleted = manager.activate().await?;
            if deleted.is_empty() {
                println!("No stale caches.");
            } else {
                for name in deleted {
                    println!("🗑️ Deleted cache \"{name}\".");
                }
            }
        }
        CacheCommand::List => {
            let storage = manager.storage();
            let names = storage.keys().await?;
            if names.is_empty() {
                println!("No caches.");
            }
            for name in names {
                if name == manager.version() {
                    println!("{name} (current)");
                } else {
                    println!("{name}");
                }
                for request in storage.requests(&name).await? {
                    println!("  {request}");
                }
            }
        }
        CacheCommand::Fetch { path, out } => {
            let request = AssetRequest::new(&path);
            let served = manager.serve(&request).await;
            let response = match &served {
                Served::Cached(r) => {
                    eprintln!("served {request} from cache");
                    r
                }
                Served::Network(r) => {
                    eprintln!("served {request} from origin");
                    r
                }
                Served::NotFound => anyhow::bail!("{request} is neither cached nor available from the origin"),
            };
            match out {
                Some(file) => std::fs::write(&file, &response.body)
                    .with_context(|| format!("Failed to write {}", file.display()))?,
                None => std::io::stdout().write_all(&response.body)?,
            }
        }
    }
    Ok(())
}
