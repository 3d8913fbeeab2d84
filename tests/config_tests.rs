use pwa_vault::config::Config;
use pwa_vault::vault::codec::CodecKind;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const VARS: [&str; 8] = [
    "PWA_VAULT_DATA_DIR",
    "PWA_VAULT_CODEC",
    "PWA_VAULT_BACKUPS",
    "PWA_VAULT_ASSETS_DIR",
    "PWA_VAULT_CACHE_DIR",
    "PWA_VAULT_CACHE_VERSION",
    "PWA_VAULT_GEN_LENGTH",
    "PWA_VAULT_CONFIG_DIR",
];

/// Clear every variable and point the config directory at `dir`.
fn isolate(dir: &Path) {
    for var in VARS {
        env::remove_var(var);
    }
    env::set_var("PWA_VAULT_CONFIG_DIR", dir.join("cfg"));
}

fn write_config_file(dir: &Path, content: &str) {
    let cfg_dir = dir.join("cfg").join("pwa-vault");
    fs::create_dir_all(&cfg_dir).expect("create config dir");
    fs::write(cfg_dir.join("config.toml"), content).expect("write config file");
}

#[test]
#[serial]
fn data_dir_precedence_cli_over_env_and_file() {
    let td = tempdir().unwrap();
    isolate(td.path());
    write_config_file(td.path(), "data_dir = \"/tmp/cfg_data\"\n");
    env::set_var("PWA_VAULT_DATA_DIR", "/tmp/env_data");

    let cli = PathBuf::from("/tmp/cli_data");
    assert_eq!(Config::create(Some(cli.clone())).unwrap().data_dir, cli);
    assert_eq!(Config::create(None).unwrap().data_dir, PathBuf::from("/tmp/env_data"));

    env::remove_var("PWA_VAULT_DATA_DIR");
    assert_eq!(Config::create(None).unwrap().data_dir, PathBuf::from("/tmp/cfg_data"));
}

#[test]
#[serial]
fn defaults_derive_from_data_dir() {
    let td = tempdir().unwrap();
    isolate(td.path());
    let data = td.path().join("data");
    let cfg = Config::create(Some(data.clone())).unwrap();
    assert_eq!(cfg.codec, CodecKind::Json);
    assert_eq!(cfg.backups, 2);
    assert_eq!(cfg.assets_dir, data.join("web"));
    assert_eq!(cfg.cache_dir, data.join("offline-cache"));
    assert_eq!(cfg.cache_version, "pwa-vault-v1");
    assert_eq!(cfg.generator.length, 12);
    assert!(!cfg.generator.include_symbols);
    assert_eq!(cfg.log_path(), data.join("pwa-vault.log"));
}

#[test]
#[serial]
fn file_settings_apply_and_env_overrides_them() {
    let td = tempdir().unwrap();
    isolate(td.path());
    write_config_file(
        td.path(),
        "codec = \"ron\"\nbackups = 5\ncache_version = \"pwa-vault-v2\"\n\
         generator_length = 20\ngenerator_symbols = true\n",
    );
    let cfg = Config::create(Some(td.path().to_path_buf())).unwrap();
    assert_eq!(cfg.codec, CodecKind::Ron);
    assert_eq!(cfg.backups, 5);
    assert_eq!(cfg.cache_version, "pwa-vault-v2");
    assert_eq!(cfg.generator.length, 20);
    assert!(cfg.generator.include_symbols);

    env::set_var("PWA_VAULT_CODEC", "json");
    env::set_var("PWA_VAULT_GEN_LENGTH", "8");
    let cfg = Config::create(Some(td.path().to_path_buf())).unwrap();
    assert_eq!(cfg.codec, CodecKind::Json);
    assert_eq!(cfg.generator.length, 8);
    env::remove_var("PWA_VAULT_CODEC");
    env::remove_var("PWA_VAULT_GEN_LENGTH");
}

#[test]
#[serial]
fn unreadable_file_falls_back_to_defaults() {
    let td = tempdir().unwrap();
    isolate(td.path());
    write_config_file(td.path(), "this is = = not toml");
    let cfg = Config::create(Some(td.path().to_path_buf())).unwrap();
    assert_eq!(cfg.backups, 2);
}

#[test]
#[serial]
fn invalid_values_are_reported() {
    let td = tempdir().unwrap();
    isolate(td.path());
    env::set_var("PWA_VAULT_CODEC", "yaml");
    assert!(Config::create(Some(td.path().to_path_buf())).is_err());
    env::remove_var("PWA_VAULT_CODEC");

    env::set_var("PWA_VAULT_CACHE_VERSION", "../escape");
    assert!(Config::create(Some(td.path().to_path_buf())).is_err());
    env::remove_var("PWA_VAULT_CACHE_VERSION");
}
