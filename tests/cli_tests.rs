use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Binary isolated from the user's config and environment.
fn pwa_vault(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pwa-vault").unwrap();
    cmd.env("PWA_VAULT_CONFIG_DIR", dir.join("cfg"))
        .env_remove("PWA_VAULT_DATA_DIR")
        .env_remove("PWA_VAULT_CODEC")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn stored_ids(dir: &Path) -> Vec<String> {
    let out = pwa_vault(dir).args(["list", "--json"]).output().unwrap();
    assert!(out.status.success());
    let records: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    records
        .iter()
        .map(|r| r["_id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn version_reports_build_metadata() {
    let td = tempdir().unwrap();
    pwa_vault(td.path()).arg("--version").assert().success().stdout(
        predicate::str::contains("version:")
            .and(predicate::str::contains("git sha:"))
            .and(predicate::str::contains("build time (UTC):"))
            .and(predicate::str::contains("target:")),
    );
}

#[test]
fn add_list_toggle_rm_round_trip() {
    let td = tempdir().unwrap();

    pwa_vault(td.path())
        .args(["add", "--title", "Mail", "--user", "a@b.com", "--secret", "hunter-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry saved"));

    pwa_vault(td.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mail").and(predicate::str::contains("a@b.com")))
        .stdout(predicate::str::contains("hunter-2").not());

    let ids = stored_ids(td.path());
    assert_eq!(ids.len(), 1);
    let id = &ids[0];

    pwa_vault(td.path()).args(["toggle", id]).assert().success();
    pwa_vault(td.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter-2"));

    pwa_vault(td.path())
        .args(["rm", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));
    pwa_vault(td.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("List is empty"));
}

#[test]
fn stored_json_uses_browser_field_names() {
    let td = tempdir().unwrap();
    pwa_vault(td.path())
        .args(["add", "--user", "u", "--secret", "p", "--url", "https://x"])
        .assert()
        .success();
    let blob = std::fs::read_to_string(td.path().join("data").join("my_secure_pwa_db")).unwrap();
    assert!(blob.contains("\"_id\""));
    assert!(blob.contains("\"isMasked\":true"));
    assert!(blob.contains("\"title\":\"Untitled\""));
}

#[test]
fn missing_login_fails_with_alert() {
    let td = tempdir().unwrap();
    pwa_vault(td.path())
        .args(["add", "--title", "T", "--secret", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fill in the required fields"));
    assert!(stored_ids(td.path()).is_empty());
}

#[test]
fn missing_password_fails() {
    let td = tempdir().unwrap();
    pwa_vault(td.path())
        .args(["add", "--user", "u"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password is empty"));
}

#[test]
fn add_with_generated_password() {
    let td = tempdir().unwrap();
    pwa_vault(td.path())
        .args(["add", "--user", "u", "--generate", "--length", "30", "--symbols"])
        .assert()
        .success();
    let out = pwa_vault(td.path()).args(["list", "--json"]).output().unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(records[0]["secret"].as_str().unwrap().chars().count(), 30);
}

#[test]
fn generator_flags_on_add_need_generate() {
    let td = tempdir().unwrap();
    pwa_vault(td.path())
        .args(["add", "--user", "u", "--secret", "hunter-2", "--length", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--generate"));
    assert!(stored_ids(td.path()).is_empty());
}

#[test]
fn generate_prints_clamped_password() {
    let td = tempdir().unwrap();
    let out = pwa_vault(td.path())
        .args(["generate", "--length", "200"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let pw = String::from_utf8(out.stdout).unwrap();
    assert_eq!(pw.trim_end().len(), 64);
}

#[test]
fn unknown_ids_are_reported_not_fatal() {
    let td = tempdir().unwrap();
    pwa_vault(td.path())
        .args(["toggle", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry found"));
    pwa_vault(td.path())
        .args(["rm", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry found"));
}

#[test]
fn corrupt_store_aborts() {
    let td = tempdir().unwrap();
    let data = td.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("my_secure_pwa_db"), "{oops").unwrap();
    pwa_vault(td.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("❌ Error"));
}

#[test]
fn cache_install_and_fetch_from_cache() {
    let td = tempdir().unwrap();
    let web = td.path().join("data").join("web");
    std::fs::create_dir_all(web.join("icons")).unwrap();
    for file in ["index.html", "style.css", "app.js", "manifest.json", "icons/icon-192.png", "icons/icon-512.png"] {
        std::fs::write(web.join(file), file).unwrap();
    }

    pwa_vault(td.path())
        .args(["cache", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached 7 assets"));

    std::fs::remove_dir_all(&web).unwrap();
    pwa_vault(td.path())
        .args(["cache", "fetch", "./style.css"])
        .assert()
        .success()
        .stdout("style.css")
        .stderr(predicate::str::contains("from cache"));

    pwa_vault(td.path())
        .args(["cache", "fetch", "./missing.js"])
        .assert()
        .failure();
}
