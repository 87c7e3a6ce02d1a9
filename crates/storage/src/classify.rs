//! File classification
//!
//! Maps a file found in a dump directory onto an [`ArtifactKind`]. Rules
//! are evaluated top to bottom and the first match wins:
//!
//! | # | Rule | Kind |
//! |---|------|------|
//! | 1 | registered in the metadata record (first entry) | registered kind |
//! | 2 | name of the result, metadata, mini-info or relationships file | SuperDumpMetaData |
//! | 3 | name is `windbg.log` | WinDbgLog |
//! | 4 | extension `.log` | SuperDumpLogfile |
//! | 5 | extension `.json` | SuperDumpData |
//! | 6 | extension `.dmp` | PrimaryDump |
//! | 7 | name ends with `.core.gz` (any case) | PrimaryDump |
//! | 8 | name ends with `.core` (any case) | PrimaryDump |
//! | 9 | name ends with `.libs.tar.gz` (any case) | LinuxLibraries |
//! | 10 | anything else | Other |
//!
//! The order is a contract. Later rules are shadowed by earlier ones on
//! purpose: `dumpinfo.json` is metadata, not generic JSON data.

use crate::layout::PathLayout;
use dumpstore_core::{ArtifactEntry, ArtifactKind, DumpIdentifier, DumpMetainfo};
use std::path::Path;

/// A name-based heuristic
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Exact file name
    Name(&'static str),
    /// Extension including the dot, case-sensitive
    Extension(&'static str),
    /// Name suffix, ASCII case-insensitive
    SuffixIgnoreCase(&'static str),
}

impl Rule {
    fn matches(&self, name: &str, extension: Option<&str>) -> bool {
        match *self {
            Rule::Name(n) => name == n,
            Rule::Extension(e) => extension == Some(e),
            Rule::SuffixIgnoreCase(suffix) => ends_with_ignore_ascii_case(name, suffix),
        }
    }
}

/// Heuristics applied after registration and generated-file checks (rules 3-9)
const HEURISTICS: &[(Rule, ArtifactKind)] = &[
    (Rule::Name("windbg.log"), ArtifactKind::WinDbgLog),
    (Rule::Extension(".log"), ArtifactKind::SuperDumpLogfile),
    (Rule::Extension(".json"), ArtifactKind::SuperDumpData),
    (Rule::Extension(".dmp"), ArtifactKind::PrimaryDump),
    (Rule::SuffixIgnoreCase(".core.gz"), ArtifactKind::PrimaryDump),
    (Rule::SuffixIgnoreCase(".core"), ArtifactKind::PrimaryDump),
    (Rule::SuffixIgnoreCase(".libs.tar.gz"), ArtifactKind::LinuxLibraries),
];

fn ends_with_ignore_ascii_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.as_bytes()[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

/// Extension of a file name including the leading dot, e.g. `".dmp"`
pub fn extension_of(name: &str) -> Option<&str> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| &name[name.len() - e.len() - 1..])
}

/// Classify a file name
///
/// `known` is the registered file list, `generated` the names of the files
/// the store itself writes for this dump.
pub fn classify(
    known: &[ArtifactEntry],
    generated: &[String],
    name: &str,
    extension: Option<&str>,
) -> ArtifactEntry {
    if let Some(entry) = known.iter().find(|e| e.file_name == name) {
        return entry.clone();
    }

    if generated.iter().any(|g| g == name) {
        return ArtifactEntry::new(name, ArtifactKind::SuperDumpMetaData);
    }

    let kind = HEURISTICS
        .iter()
        .find(|(rule, _)| rule.matches(name, extension))
        .map(|(_, kind)| *kind)
        .unwrap_or(ArtifactKind::Other);
    ArtifactEntry::new(name, kind)
}

/// Classifier bound to one dump
///
/// Owns its inputs so it can outlive the metadata record it was built from.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    known: Vec<ArtifactEntry>,
    generated: Vec<String>,
}

impl FileClassifier {
    /// Classifier for a dump, using its registrations and the layout's generated names
    pub fn for_dump<L: PathLayout + ?Sized>(layout: &L, info: &DumpMetainfo) -> Self {
        let id = info.id();
        Self {
            known: info.files.clone(),
            generated: generated_names(layout, &id),
        }
    }

    /// Classify a file name
    pub fn classify(&self, name: &str) -> ArtifactEntry {
        classify(&self.known, &self.generated, name, extension_of(name))
    }
}

fn generated_names<L: PathLayout + ?Sized>(layout: &L, id: &DumpIdentifier) -> Vec<String> {
    [
        layout.result_path(id),
        layout.metadata_path(id),
        layout.mini_info_path(id),
        layout.relationships_path(id),
    ]
    .iter()
    .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
    .collect()
}
