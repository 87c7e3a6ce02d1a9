//! Metadata repository
//!
//! Reads and writes the per-dump [`DumpMetainfo`] record and keeps it in
//! step with what is on disk.
//!
//! ## Compat migration
//!
//! Dumps created before the record format existed have a result document
//! but no record. [`MetadataRepository::list_for_bundle`] synthesizes a
//! record for them the first time it sees them and persists it, so later
//! listings read the file instead. Two listings racing on the same dump may
//! both synthesize and write; both derive the same record from the same
//! result, so no lock is taken.
//!
//! Records written before retention existed get their planned deletion date
//! backfilled once, on first read with retention enabled.

use crate::context::StorageContext;
use crate::layout::PathLayout;
use crate::materialize::DirectoryMaterializer;
use crate::persist::{self, WriteOutcome};
use crate::results::ResultRepository;
use dumpstore_core::retention::planned_deletion;
use dumpstore_core::{
    BundleId, DumpIdentifier, DumpMetainfo, DumpStatus, StorageError, StorageResult,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reads, writes and migrates [`DumpMetainfo`] records
pub struct MetadataRepository<L> {
    ctx: Arc<StorageContext<L>>,
    results: ResultRepository<L>,
    materializer: DirectoryMaterializer<L>,
}

impl<L: PathLayout> MetadataRepository<L> {
    /// Create a repository over a shared context
    pub fn new(ctx: Arc<StorageContext<L>>) -> Self {
        Self {
            results: ResultRepository::new(Arc::clone(&ctx)),
            materializer: DirectoryMaterializer::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    /// Records for every dump directory in a bundle, sorted by dump id
    ///
    /// Missing records are synthesized, missing deletion dates backfilled
    /// (when retention is enabled), and `is_primary_dump_available` is
    /// computed from disk. Directories whose names are not UTF-8 cannot be
    /// dump ids and are skipped. Fails with `NotFound` only if the bundle
    /// directory does not exist.
    pub fn list_for_bundle(&self, bundle_id: &BundleId) -> StorageResult<Vec<DumpMetainfo>> {
        let dir = self.ctx.layout().bundle_directory(bundle_id);
        let mut dump_ids = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| StorageError::io(&dir, e))? {
            let entry = entry.map_err(|e| StorageError::io(&dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(dump_id) => dump_ids.push(dump_id),
                Err(name) => warn!(
                    bundle = %bundle_id,
                    ?name,
                    "Skipping dump directory with non UTF-8 name"
                ),
            }
        }
        dump_ids.sort();

        dump_ids
            .into_iter()
            .map(|dump_id| self.load(&DumpIdentifier::in_bundle(bundle_id, dump_id)))
            .collect()
    }

    fn load(&self, id: &DumpIdentifier) -> StorageResult<DumpMetainfo> {
        let mut info = if self.ctx.layout().metadata_path(id).is_file() {
            self.read(id)?
        } else {
            let (info, _) = self.synthesize(id);
            info
        };

        if self.ctx.settings().is_retention_enabled() {
            let _ = self.backfill_retention(&mut info);
        }

        info.is_primary_dump_available = self.is_primary_dump_available(&info)?;
        Ok(info)
    }

    /// Build and persist a record for a dump that has none
    ///
    /// With a readable result the dump is `Finished`, its file name is the
    /// result's recorded path relative to the uploads root, and its creation
    /// time is the result's server timestamp. Without one it is `Failed`.
    /// The record is returned even if persisting it failed.
    pub fn synthesize(&self, id: &DumpIdentifier) -> (DumpMetainfo, WriteOutcome) {
        let mut metainfo = DumpMetainfo::new(id);
        match self.results.read(id) {
            Some(result) => {
                metainfo.status = DumpStatus::Finished;
                metainfo.dump_file_name = result
                    .analysis_info
                    .path
                    .as_deref()
                    .map(|p| relative_to_uploads(p, self.ctx.layout().uploads_dir()));
                metainfo.created = result.analysis_info.server_time_stamp;
            }
            None => metainfo.status = DumpStatus::Failed,
        }

        info!(dump = %id, status = %metainfo.status, "Synthesizing missing metadata record");
        let outcome = self.persist_best_effort(&metainfo);
        (metainfo, outcome)
    }

    /// Set the planned deletion date if it is unset, and persist
    ///
    /// A record that already has a date is left alone.
    pub fn backfill_retention(&self, info: &mut DumpMetainfo) -> WriteOutcome {
        if info.planned_deletion_date.is_some() {
            return WriteOutcome::Skipped;
        }
        let days = self.ctx.settings().retention.days;
        let planned = planned_deletion(info.created, days);
        debug!(dump = %info.id(), %planned, "Backfilling planned deletion date");
        info.planned_deletion_date = Some(planned);
        self.persist_best_effort(info)
    }

    /// Whether the dump's primary artifact is on disk right now
    pub fn is_primary_dump_available(&self, info: &DumpMetainfo) -> StorageResult<bool> {
        Ok(self.materializer.primary_dump_path(info)?.is_some())
    }

    /// Read a dump's record
    ///
    /// No compat handling: a missing file is `NotFound`, an undecodable one
    /// `Malformed`.
    pub fn read(&self, id: &DumpIdentifier) -> StorageResult<DumpMetainfo> {
        persist::read_document(&self.ctx.layout().metadata_path(id))
    }

    /// Overwrite a dump's record
    ///
    /// Last writer wins; callers updating the same dump concurrently must
    /// serialize themselves.
    pub fn write(&self, info: &DumpMetainfo) -> StorageResult<()> {
        persist::write_pretty(&self.ctx.layout().metadata_path(&info.id()), info)
    }

    fn persist_best_effort(&self, info: &DumpMetainfo) -> WriteOutcome {
        let outcome = WriteOutcome::from_result(self.write(info));
        if let WriteOutcome::Failed(ref e) = outcome {
            warn!(dump = %info.id(), error = %e, "Could not persist metadata record");
        }
        outcome
    }
}

/// Strip the uploads root from an absolute upload path
///
/// Older results stored full paths such as `/srv/uploads/bundle/sub/crash.dmp`;
/// only `bundle/sub/crash.dmp` is kept. Paths outside the root are returned
/// unchanged.
pub fn relative_to_uploads(path: &str, uploads_dir: &Path) -> String {
    if let Ok(rel) = Path::new(path).strip_prefix(uploads_dir) {
        return rel.to_string_lossy().into_owned();
    }
    // roots recorded with the other platform's separator
    let root = uploads_dir.to_string_lossy();
    let separators = ['/', '\\'];
    match path.strip_prefix(root.as_ref()) {
        Some(rest)
            if !root.is_empty() && (rest.starts_with(separators) || root.ends_with(separators)) =>
        {
            rest.trim_start_matches(separators).to_string()
        }
        _ => path.to_string(),
    }
}
