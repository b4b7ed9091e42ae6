#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mtgproxies_cmd(cache: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mtgproxies").unwrap();
    cmd.env_remove("MTGPROXIES_CONFIG")
        .env("MTGPROXIES_CACHE_DIR", cache.path());
    cmd
}

#[test]
fn help_lists_options() {
    let cache = TempDir::new().unwrap();
    mtgproxies_cmd(&cache)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--border_crop"))
        .stdout(predicate::str::contains("--no-cropmarks"))
        .stdout(predicate::str::contains("--separate"));
}

#[test]
fn bad_paper_size_fails_before_any_work() {
    let cache = TempDir::new().unwrap();
    let out = cache.path().join("deck.pdf");
    mtgproxies_cmd(&cache)
        .args(["deck.txt", out.to_str().unwrap(), "--paper", "letter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("letter"));
    assert!(!out.exists());
}

#[test]
fn unsupported_source_writes_nothing() {
    let cache = TempDir::new().unwrap();
    let out = cache.path().join("deck.pdf");
    mtgproxies_cmd(&cache)
        .args(["manastack:42", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manastack:42"));
    assert!(!out.exists());
}

#[test]
fn malformed_decklist_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let deck = dir.path().join("deck.txt");
    std::fs::write(&deck, "0 Lightning Bolt\n").unwrap();
    let out = dir.path().join("deck.pdf");

    mtgproxies_cmd(&dir)
        .args([deck.to_str().unwrap(), out.to_str().unwrap()])
        .assert()
        .failure();
    assert!(!out.exists());
}
