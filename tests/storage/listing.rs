//! Bundle listing

use crate::common::*;
use chrono::{TimeZone, Utc};
use std::fs;

#[test]
fn stored_record_is_listed_verbatim() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");

    let mut info = DumpMetainfo::new(&id);
    info.status = DumpStatus::Analyzing;
    info.dump_file_name = Some("bundle1/crash.dmp".into());
    info.created = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    info.add_file(ArtifactEntry::new("crash.dmp", ArtifactKind::PrimaryDump));
    t.store.store_metainfo(&info).unwrap();
    let before = fs::read(t.dump_dir(&id).join("dumpinfo.json")).unwrap();

    let listed = t.store.list_for_bundle(&BundleId::new("bundle1")).unwrap();
    assert_eq!(listed, vec![info]);

    // No synthesis and no rewrite
    let after = fs::read(t.dump_dir(&id).join("dumpinfo.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn unknown_status_survives() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    let json = serde_json::json!({
        "BundleId": "bundle1",
        "DumpId": "dump1",
        "Status": "Rescheduled",
        "Created": "2021-06-01T00:00:00Z",
        "Files": [],
    });
    t.put_file(&id, "dumpinfo.json", json.to_string().as_bytes());

    let listed = t.store.list_for_bundle(&BundleId::new("bundle1")).unwrap();
    assert_eq!(listed[0].status, DumpStatus::Other("Rescheduled".into()));
}

#[test]
fn empty_bundle_lists_nothing() {
    let t = TestStore::new();
    fs::create_dir_all(t.data_dir().join("empty")).unwrap();

    let listed = t.store.list_for_bundle(&BundleId::new("empty")).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn missing_bundle_is_not_found() {
    let t = TestStore::new();
    let err = t.store.list_for_bundle(&BundleId::new("nope")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn listing_is_sorted_and_skips_files() {
    let t = TestStore::new();
    t.dump("bundle1", "zeta");
    t.dump("bundle1", "alpha");
    fs::write(t.data_dir().join("bundle1").join("stray.txt"), b"x").unwrap();

    let ids: Vec<_> = t
        .store
        .list_for_bundle(&BundleId::new("bundle1"))
        .unwrap()
        .into_iter()
        .map(|i| i.dump_id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["alpha", "zeta"]);
}

#[test]
fn primary_dump_availability_tracks_disk() {
    let t = TestStore::new();
    let id = t.dump("bundle1", "dump1");
    t.put_file(&id, "crash.dmp", b"dump");

    let listed = t.store.list_for_bundle(&id.bundle_id).unwrap();
    assert!(listed[0].is_primary_dump_available);

    fs::remove_file(t.dump_dir(&id).join("crash.dmp")).unwrap();
    let listed = t.store.list_for_bundle(&id.bundle_id).unwrap();
    assert!(!listed[0].is_primary_dump_available);
}

#[test]
fn availability_is_not_persisted() {
    let t = TestStore::new();
    let id = t.dump("bundle1", "dump1");
    t.put_file(&id, "crash.dmp", b"dump");
    t.store.list_for_bundle(&id.bundle_id).unwrap();

    let raw = t.raw_metainfo(&id).unwrap();
    assert!(raw.get("IsPrimaryDumpAvailable").is_none());
}

#[test]
fn malformed_record_fails_listing() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    t.put_file(&id, "dumpinfo.json", b"{ not json");

    let err = t.store.list_for_bundle(&id.bundle_id).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}
