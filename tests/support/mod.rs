use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway scenario directory: the temp root doubles as the working
/// directory, and the store's JSON documents live under `store/`.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    pub fn doc_path(&self, key: &str) -> PathBuf {
        self.store_dir().join(format!("{key}.json"))
    }

    pub fn has_doc(&self, key: &str) -> bool {
        self.doc_path(key).exists()
    }

    pub fn read_doc(&self, key: &str) -> Value {
        let raw = fs::read_to_string(self.doc_path(key)).expect("document should exist");
        serde_json::from_str(&raw).expect("document should be valid JSON")
    }

    pub fn write_doc(&self, key: &str, contents: &str) {
        fs::create_dir_all(self.store_dir()).expect("failed to create store dir");
        fs::write(self.doc_path(key), contents).expect("failed to write document");
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.dir.path().join("kb.toml"), contents).expect("failed to write kb.toml");
    }
}

/// Base kb invocation with a clean environment; callers point it at a
/// store and working directory.
pub fn kb_cmd() -> Command {
    let mut cmd = Command::cargo_bin("kb").expect("kb binary");
    cmd.env_remove("KB_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}
