//! Planned deletion date backfill

use crate::common::*;
use chrono::{Duration, TimeZone, Utc};

#[test]
fn missing_date_is_backfilled_from_created() {
    let t = TestStore::with_retention(30);
    let id = t.bare_dump("bundle1", "dump1");
    let mut info = DumpMetainfo::new(&id);
    info.created = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
    t.store.store_metainfo(&info).unwrap();

    let listed = t.store.list_for_bundle(&id.bundle_id).unwrap();
    let expected = info.created + Duration::days(30);
    assert_eq!(listed[0].planned_deletion_date, Some(expected));
    assert_eq!(
        t.store.read_metainfo(&id).unwrap().planned_deletion_date,
        Some(expected)
    );
}

#[test]
fn backfill_twice_yields_same_date() {
    let t = TestStore::with_retention(7);
    let id = t.dump("bundle1", "dump1");

    let first = t.store.list_for_bundle(&id.bundle_id).unwrap();
    let second = t.store.list_for_bundle(&id.bundle_id).unwrap();
    assert!(first[0].planned_deletion_date.is_some());
    assert_eq!(first[0].planned_deletion_date, second[0].planned_deletion_date);
}

#[test]
fn existing_date_is_kept() {
    let t = TestStore::with_retention(30);
    let id = t.bare_dump("bundle1", "dump1");
    let planned = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let mut info = DumpMetainfo::new(&id);
    info.planned_deletion_date = Some(planned);
    t.store.store_metainfo(&info).unwrap();

    let listed = t.store.list_for_bundle(&id.bundle_id).unwrap();
    assert_eq!(listed[0].planned_deletion_date, Some(planned));
}

#[test]
fn disabled_retention_leaves_date_unset() {
    let t = TestStore::new();
    let id = t.dump("bundle1", "dump1");

    let listed = t.store.list_for_bundle(&id.bundle_id).unwrap();
    assert_eq!(listed[0].planned_deletion_date, None);
    assert!(t.raw_metainfo(&id).unwrap()["PlannedDeletionDate"].is_null());
}

#[test]
fn synthesized_record_gets_a_date() {
    let t = TestStore::with_retention(10);
    let id = t.bare_dump("bundle1", "dump1");
    t.put_result(&id, "superdump-result.json", "/x/crash.dmp", "2021-02-03T00:00:00Z");

    let info = &t.store.list_for_bundle(&id.bundle_id).unwrap()[0];
    let created = Utc.with_ymd_and_hms(2021, 2, 3, 0, 0, 0).unwrap();
    assert_eq!(info.planned_deletion_date, Some(created + Duration::days(10)));
}
