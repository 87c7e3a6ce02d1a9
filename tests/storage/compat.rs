//! Synthesis of records for dumps that predate the metadata file

use crate::common::*;
use chrono::{TimeZone, Utc};

#[test]
fn result_without_record_is_synthesized_as_finished() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    let upload = t.uploads_dir().join("bundle1").join("sub").join("crash.dmp");
    t.put_result(
        &id,
        "superdump-result.json",
        &upload.to_string_lossy(),
        "2019-08-07T06:05:04Z",
    );

    let listed = t.store.list_for_bundle(&id.bundle_id).unwrap();
    assert_eq!(listed.len(), 1);
    let info = &listed[0];
    assert_eq!(info.status, DumpStatus::Finished);
    assert_eq!(info.dump_file_name.as_deref(), Some("bundle1/sub/crash.dmp"));
    assert_eq!(info.created, Utc.with_ymd_and_hms(2019, 8, 7, 6, 5, 4).unwrap());
    assert!(t.raw_metainfo(&id).is_some());
}

#[test]
fn synthesis_is_idempotent() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    t.put_result(&id, "superdump-result.json", "/elsewhere/crash.dmp", "2019-08-07T06:05:04Z");

    let first = t.store.list_for_bundle(&id.bundle_id).unwrap();
    let raw = t.raw_metainfo(&id).unwrap();
    let second = t.store.list_for_bundle(&id.bundle_id).unwrap();

    assert_eq!(first, second);
    assert_eq!(t.raw_metainfo(&id).unwrap(), raw);
    // Outside the uploads root the path is kept as is
    assert_eq!(first[0].dump_file_name.as_deref(), Some("/elsewhere/crash.dmp"));
}

#[test]
fn legacy_result_location_is_used() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    t.put_result(&id, "dump1.json", "/x/crash.dmp", "2018-01-01T00:00:00Z");

    let info = &t.store.list_for_bundle(&id.bundle_id).unwrap()[0];
    assert_eq!(info.status, DumpStatus::Finished);
    assert!(t.store.read_result(&id).is_some());
}

#[test]
fn no_result_gives_failed() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");

    let info = &t.store.list_for_bundle(&id.bundle_id).unwrap()[0];
    assert_eq!(info.status, DumpStatus::Failed);
    assert_eq!(info.dump_file_name, None);
    assert_eq!(t.raw_metainfo(&id).unwrap()["Status"], "Failed");
}

#[test]
fn unreadable_result_gives_failed() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    t.put_file(&id, "superdump-result.json", b"garbage");

    assert!(t.store.read_result(&id).is_none());
    assert!(t.store.read_result_strict(&id).is_err());
    let info = &t.store.list_for_bundle(&id.bundle_id).unwrap()[0];
    assert_eq!(info.status, DumpStatus::Failed);
}

#[test]
fn synthesized_record_is_returned_even_if_unwritable() {
    let t = TestStore::new();
    let id = t.bare_dump("bundle1", "dump1");
    // A directory squatting on the record's name makes the write fail
    std::fs::create_dir(t.dump_dir(&id).join("dumpinfo.json")).unwrap();

    let info = &t.store.list_for_bundle(&id.bundle_id).unwrap()[0];
    assert_eq!(info.status, DumpStatus::Failed);
}
