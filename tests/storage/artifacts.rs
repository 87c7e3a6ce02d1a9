//! Classified view of dump directories

use crate::common::*;
use std::collections::HashMap;

fn kinds(t: &TestStore, id: &DumpIdentifier) -> HashMap<String, ArtifactKind> {
    t.store
        .artifacts(id)
        .unwrap()
        .map(|a| {
            let a = a.unwrap();
            (a.entry.file_name, a.entry.kind)
        })
        .collect()
}

#[test]
fn heuristics_classify_unregistered_files() {
    let t = TestStore::new();
    let id = t.dump("bundle1", "dump1");
    for name in [
        "windbg.log",
        "analysis.log",
        "extra.json",
        "crash.dmp",
        "core.1234.CORE.GZ",
        "app.core",
        "app.libs.tar.gz",
        "readme.txt",
        "superdump-result.json",
        "miniinfo.json",
    ] {
        t.put_file(&id, name, b"x");
    }

    let kinds = kinds(&t, &id);
    assert_eq!(kinds["windbg.log"], ArtifactKind::WinDbgLog);
    assert_eq!(kinds["analysis.log"], ArtifactKind::SuperDumpLogfile);
    assert_eq!(kinds["extra.json"], ArtifactKind::SuperDumpData);
    assert_eq!(kinds["crash.dmp"], ArtifactKind::PrimaryDump);
    assert_eq!(kinds["core.1234.CORE.GZ"], ArtifactKind::PrimaryDump);
    assert_eq!(kinds["app.core"], ArtifactKind::PrimaryDump);
    assert_eq!(kinds["app.libs.tar.gz"], ArtifactKind::LinuxLibraries);
    assert_eq!(kinds["readme.txt"], ArtifactKind::Other);
    assert_eq!(kinds["superdump-result.json"], ArtifactKind::SuperDumpMetaData);
    assert_eq!(kinds["miniinfo.json"], ArtifactKind::SuperDumpMetaData);
    assert_eq!(kinds["dumpinfo.json"], ArtifactKind::SuperDumpMetaData);
}

#[test]
fn registration_wins_over_heuristics() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    let mut info = DumpMetainfo::new(&id);
    info.add_file(ArtifactEntry::new("trace.log", ArtifactKind::PrimaryDump));
    t.store.store_metainfo(&info).unwrap();
    t.put_file(&id, "trace.log", b"x");

    assert_eq!(kinds(&t, &id)["trace.log"], ArtifactKind::PrimaryDump);
}

#[test]
fn downloadable_follows_policy() {
    let t = TestStore::downloadable(false);
    let id = t.dump("bundle1", "dump1");
    t.put_file(&id, "crash.dmp", b"x");
    t.put_file(&id, "windbg.log", b"x");

    for artifact in t.store.artifacts(&id).unwrap() {
        let artifact = artifact.unwrap();
        let expected = artifact.entry.kind != ArtifactKind::PrimaryDump;
        assert_eq!(artifact.downloadable, expected, "{}", artifact.entry.file_name);
    }
}

#[test]
fn sizes_are_reported() {
    let t = TestStore::new();
    let id = t.dump("bundle1", "dump1");
    t.put_file(&id, "crash.dmp", &[0u8; 42]);

    let view = t
        .store
        .artifacts(&id)
        .unwrap()
        .map(|a| a.unwrap())
        .find(|a| a.entry.file_name == "crash.dmp")
        .unwrap();
    assert_eq!(view.size_in_bytes, 42);
    assert_eq!(view.path, t.dump_dir(&id).join("crash.dmp"));
}

#[test]
fn dump_without_record_is_not_found() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    assert!(t.store.artifacts(&id).unwrap_err().is_not_found());
}
