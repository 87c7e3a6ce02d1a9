//! Shared helpers for the integration tests.
//!
//! [`TestStore`] owns a temporary directory with a `data/` and an `uploads/`
//! root and a [`DumpStore`] opened over them. Files are written directly to
//! disk so tests can stage layouts produced by other components or older
//! versions.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;

pub use dumpstore::prelude::*;

static TRACING: Once = Once::new();

/// Route tracing output through the test harness.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// A store over a throwaway directory tree
pub struct TestStore {
    pub store: DumpStore,
    pub dir: TempDir,
}

impl TestStore {
    /// Defaults: retention off, primary dumps not downloadable
    pub fn new() -> Self {
        Self::with(|b| b)
    }

    /// Store with retention enabled
    pub fn with_retention(days: u32) -> Self {
        Self::with(|b| b.retention_days(days))
    }

    /// Store with primary dump downloads allowed or forbidden
    pub fn downloadable(allowed: bool) -> Self {
        Self::with(|b| b.dump_downloadable(allowed))
    }

    fn with(configure: impl FnOnce(DumpStoreBuilder) -> DumpStoreBuilder) -> Self {
        init_tracing();
        let dir = TempDir::new().expect("Failed to create temp dir");
        let builder = DumpStore::builder()
            .data_dir(dir.path().join("data"))
            .uploads_dir(dir.path().join("uploads"));
        let store = configure(builder).open().expect("Failed to open store");
        Self { store, dir }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn dump_dir(&self, id: &DumpIdentifier) -> PathBuf {
        self.data_dir()
            .join(id.bundle_id.as_str())
            .join(id.dump_id.as_str())
    }

    /// Create an empty dump directory without a metadata record
    pub fn bare_dump(&self, bundle: &str, dump: &str) -> DumpIdentifier {
        let id = DumpIdentifier::new(bundle, dump);
        fs::create_dir_all(self.dump_dir(&id)).unwrap();
        id
    }

    /// Create a dump directory with a fresh metadata record
    pub fn dump(&self, bundle: &str, dump: &str) -> DumpIdentifier {
        let id = self.bare_dump(bundle, dump);
        self.store.store_metainfo(&DumpMetainfo::new(&id)).unwrap();
        id
    }

    /// Write a file into a dump directory
    pub fn put_file(&self, id: &DumpIdentifier, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dump_dir(id).join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write a raw analysis result as the analyzer would
    pub fn put_result(&self, id: &DumpIdentifier, file_name: &str, path: &str, stamp: &str) {
        let json = serde_json::json!({
            "AnalysisInfo": { "Path": path, "ServerTimeStamp": stamp },
            "Threads": [],
        });
        self.put_file(id, file_name, json.to_string().as_bytes());
    }

    /// Raw metadata record on disk, if any
    pub fn raw_metainfo(&self, id: &DumpIdentifier) -> Option<serde_json::Value> {
        let text = fs::read_to_string(self.dump_dir(id).join("dumpinfo.json")).ok()?;
        Some(serde_json::from_str(&text).unwrap())
    }
}
