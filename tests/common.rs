#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use hourledger::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn hl() -> Command {
    cargo_bin_cmd!("hourledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{db_path}{suffix}")).ok();
    }
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourledger_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB through the binary (creates the schema)
pub fn init_db(db_path: &str) {
    hl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run a command as admin against `db_path`
pub fn admin(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = hl();
    cmd.args(["--db", db_path, "--role", "admin"]).args(args);
    cmd
}

/// Fresh file-backed pool for library-level tests
pub fn open_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    DbPool::new(&db_path).expect("open db")
}
