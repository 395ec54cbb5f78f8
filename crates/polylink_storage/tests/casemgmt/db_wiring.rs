#![forbid(unsafe_code)]

use polylink_contracts::casemgmt::{CaseId, CaseRecord};
use polylink_contracts::link::{PolymorphicLink, TargetIdentifier, TargetRef, TypeTag};
use polylink_contracts::MonotonicTimeNs;
use polylink_storage::repo::CaseContentRepo;
use polylink_storage::{PolyStore, StorageError};

fn seed_case(store: &mut PolyStore, id: &str, name: &str) -> CaseId {
    let case_id = CaseId::new(id).unwrap();
    store
        .insert_case_row(CaseRecord::v1(case_id.clone(), name, MonotonicTimeNs(1)).unwrap())
        .unwrap();
    case_id
}

fn content(object_type: &str, identifier: &str) -> TargetRef {
    TargetRef::new(
        TypeTag::new(object_type).unwrap(),
        TargetIdentifier::new(identifier).unwrap(),
    )
}

fn content_link(case_id: &CaseId, target: &TargetRef, at: u64) -> PolymorphicLink<CaseId> {
    PolymorphicLink::v1(case_id.clone(), target.clone(), MonotonicTimeNs(at))
}

#[test]
fn at_casemgmt_db_01_second_identical_link_fails_exactly_one_row_remains() {
    let mut s = PolyStore::new_in_memory();
    let case_x = seed_case(&mut s, "case-x", "Onboarding Review");
    let p42 = content("PARTY", "p-42");

    s.insert_content_link_row(content_link(&case_x, &p42, 2)).unwrap();
    let err = s
        .insert_content_link_row(content_link(&case_x, &p42, 3))
        .unwrap_err();

    assert!(matches!(err, StorageError::DuplicateAssociation { .. }));
    assert_eq!(s.content_links_by_content(&p42).len(), 1);
}

#[test]
fn at_casemgmt_db_02_links_by_case_then_empty_after_removals() {
    let mut s = PolyStore::new_in_memory();
    let case_x = seed_case(&mut s, "case-x", "Onboarding Review");
    let t1 = content("PARTY", "p-1");
    let t2 = content("DOCUMENT", "d-7");

    s.insert_content_link_row(content_link(&case_x, &t1, 2)).unwrap();
    s.insert_content_link_row(content_link(&case_x, &t2, 3)).unwrap();

    let rows = s.content_links_by_case(&case_x);
    assert_eq!(rows.len(), 2);

    assert!(s.remove_content_link_row(&case_x, &t1));
    assert!(s.remove_content_link_row(&case_x, &t2));
    assert!(s.content_links_by_case(&case_x).is_empty());
}

#[test]
fn at_casemgmt_db_03_same_content_linked_from_several_cases() {
    let mut s = PolyStore::new_in_memory();
    let case_x = seed_case(&mut s, "case-x", "Onboarding Review");
    let case_y = seed_case(&mut s, "case-y", "Contract Renewal");
    let shared = content("PARTY", "p-1");

    s.insert_content_link_row(content_link(&case_x, &shared, 2)).unwrap();
    s.insert_content_link_row(content_link(&case_y, &shared, 3)).unwrap();

    let holders = s.content_links_by_content(&shared);
    assert_eq!(holders.len(), 2);

    // Removing one case's link leaves the other's in place.
    assert!(s.remove_content_link_row(&case_x, &shared));
    let holders = s.content_links_by_content(&shared);
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].subject, case_y);
}

#[test]
fn at_casemgmt_db_04_content_link_requires_existing_case() {
    let mut s = PolyStore::new_in_memory();
    let ghost = CaseId::new("case-ghost").unwrap();

    let err = s
        .insert_content_link_row(content_link(&ghost, &content("PARTY", "p-1"), 2))
        .unwrap_err();
    assert_eq!(
        err,
        StorageError::ForeignKeyViolation {
            table: "case_content_links.case",
            key: "case-ghost".to_string(),
        }
    );
}

#[test]
fn at_casemgmt_db_05_case_name_unique() {
    let mut s = PolyStore::new_in_memory();
    seed_case(&mut s, "case-x", "Onboarding Review");

    let dup = CaseRecord::v1(
        CaseId::new("case-y").unwrap(),
        "Onboarding Review",
        MonotonicTimeNs(2),
    )
    .unwrap();
    let err = s.insert_case_row(dup).unwrap_err();
    assert_eq!(
        err,
        StorageError::DuplicateKey {
            table: "cases.name",
            key: "Onboarding Review".to_string(),
        }
    );
}

#[test]
fn at_casemgmt_db_06_lookup_by_name_round_trips() {
    let mut s = PolyStore::new_in_memory();
    let case_x = seed_case(&mut s, "case-x", "Onboarding Review");

    let found = s.case_row_by_name("Onboarding Review").unwrap();
    assert_eq!(found.case_id, case_x);
    assert!(s.case_row_by_name("No Such Case").is_none());
}
