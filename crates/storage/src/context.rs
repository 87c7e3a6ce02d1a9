//! Shared, read-only state of the storage components

use crate::layout::PathLayout;
use dumpstore_core::StorageSettings;
use dumpstore_security::DownloadPolicy;

/// Layout, settings and download policy shared by all storage components
///
/// Components hold an `Arc<StorageContext<L>>` and nothing else; the
/// filesystem is the only mutable state.
#[derive(Debug)]
pub struct StorageContext<L> {
    layout: L,
    settings: StorageSettings,
    policy: DownloadPolicy,
}

impl<L: PathLayout> StorageContext<L> {
    /// Build a context; the download policy follows `settings.dump_downloadable`
    pub fn new(layout: L, settings: StorageSettings) -> Self {
        let policy = DownloadPolicy::from_flag(settings.dump_downloadable);
        Self {
            layout,
            settings,
            policy,
        }
    }

    /// Path layout
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Storage settings
    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    /// Download policy
    pub fn policy(&self) -> DownloadPolicy {
        self.policy
    }
}
