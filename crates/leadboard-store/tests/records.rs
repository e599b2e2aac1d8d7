use chrono::{TimeZone, Utc};
use leadboard_core::{
    ContactInfo, InteractionDraft, InteractionId, LeadDraft, LeadId, LeadPatch, LeadStatus,
};
use leadboard_store::error::StoreError;
use leadboard_store::RecordStore;
use std::collections::BTreeSet;

fn draft(name: &str) -> LeadDraft {
    LeadDraft {
        name: name.to_string(),
        company: format!("{name} Co"),
        contact_info: ContactInfo {
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        },
        lead_score: 50,
        status: LeadStatus::Warm,
        ..Default::default()
    }
}

fn store_with(names: &[&str]) -> RecordStore {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut store = RecordStore::new();
    for name in names {
        store.create(now, draft(name));
    }
    store
}

fn order(store: &RecordStore) -> Vec<i64> {
    store.iter().map(|lead| lead.id.get()).collect()
}

fn ids(values: &[i64]) -> BTreeSet<LeadId> {
    values.iter().copied().map(LeadId).collect()
}

#[test]
fn create_assigns_max_plus_one_and_timestamps() {
    let mut store = store_with(&["Ada", "Grace"]);
    assert_eq!(order(&store), vec![1, 2]);

    store.delete(&ids(&[1]));
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
    let lead = store.create(now, draft("Linus"));
    assert_eq!(lead.id, LeadId(3));
    assert_eq!(lead.created_at, "2024-02-01T12:00:00.000Z");
    assert_eq!(lead.created_at, lead.updated_at);
    assert_eq!(order(&store), vec![2, 3]);
}

#[test]
fn from_leads_rejects_duplicate_ids() {
    let store = store_with(&["Ada"]);
    let mut leads = store.snapshot().to_vec();
    leads.push(leads[0].clone());
    let err = RecordStore::from_leads(leads).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(LeadId(1))));
}

#[test]
fn update_merges_patch_and_refreshes_updated_at() {
    let mut store = store_with(&["Ada"]);
    let later = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let updated = store
        .update(
            later,
            LeadId(1),
            LeadPatch {
                company: Some("Engines Ltd".to_string()),
                ..Default::default()
            },
        )
        .expect("lead exists");
    assert_eq!(updated.company, "Engines Ltd");
    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.created_at, "2024-01-01T00:00:00.000Z");
    assert_eq!(updated.updated_at, "2024-03-01T00:00:00.000Z");

    assert!(store
        .update(later, LeadId(99), LeadPatch::default())
        .is_none());
}

#[test]
fn delete_removes_exactly_matching_records() {
    let mut store = store_with(&["A", "B", "C", "D"]);
    assert_eq!(store.delete(&ids(&[2, 4, 42])), 2);
    assert_eq!(order(&store), vec![1, 3]);
    assert_eq!(store.delete(&BTreeSet::new()), 0);
}

#[test]
fn reorder_moves_into_target_slot() {
    let mut store = store_with(&["A", "B", "C", "D", "E"]);
    assert!(store.reorder(LeadId(1), LeadId(3)));
    assert_eq!(order(&store), vec![2, 3, 1, 4, 5]);

    assert!(store.reorder(LeadId(5), LeadId(2)));
    assert_eq!(order(&store), vec![5, 2, 3, 1, 4]);
}

#[test]
fn reorder_adjacent_round_trip_restores_order() {
    let mut store = store_with(&["A", "B", "C"]);
    let original = order(&store);
    assert!(store.reorder(LeadId(2), LeadId(3)));
    assert_eq!(order(&store), vec![1, 3, 2]);
    assert!(store.reorder(LeadId(3), LeadId(2)));
    assert_eq!(order(&store), original);
}

#[test]
fn reorder_round_trip_across_a_gap_does_not_restore() {
    let mut store = store_with(&["A", "B", "C", "D"]);
    assert!(store.reorder(LeadId(1), LeadId(3)));
    assert_eq!(order(&store), vec![2, 3, 1, 4]);
    assert!(store.reorder(LeadId(3), LeadId(1)));
    assert_eq!(order(&store), vec![2, 1, 3, 4]);
}

#[test]
fn reorder_ignores_unknown_or_equal_ids() {
    let mut store = store_with(&["A", "B"]);
    assert!(!store.reorder(LeadId(1), LeadId(1)));
    assert!(!store.reorder(LeadId(1), LeadId(9)));
    assert!(!store.reorder(LeadId(9), LeadId(1)));
    assert_eq!(order(&store), vec![1, 2]);
}

#[test]
fn reset_scores_only_touches_given_ids() {
    let mut store = store_with(&["A", "B", "C"]);
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    assert_eq!(store.reset_scores(now, &ids(&[1, 3])), 2);
    let scores: Vec<i64> = store.iter().map(|lead| lead.lead_score).collect();
    assert_eq!(scores, vec![0, 50, 0]);
    assert_eq!(
        store.get(LeadId(2)).unwrap().updated_at,
        "2024-01-01T00:00:00.000Z"
    );
}

#[test]
fn add_interaction_uses_unique_timestamp_ids() {
    let mut store = store_with(&["A"]);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let note = |text: &str| InteractionDraft {
        kind: "Call".to_string(),
        notes: text.to_string(),
        ..Default::default()
    };

    let first = store.add_interaction(now, LeadId(1), note("one")).unwrap();
    let second = store.add_interaction(now, LeadId(1), note("two")).unwrap();
    assert_eq!(first.interaction_id, InteractionId(now.timestamp_millis()));
    assert_eq!(second.interaction_id, first.interaction_id.next());
    assert_eq!(store.get(LeadId(1)).unwrap().interactions.len(), 2);

    assert!(store.add_interaction(now, LeadId(7), note("x")).is_none());
}

#[test]
fn resolve_and_status_counts() {
    let mut store = store_with(&["A", "B", "C"]);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    store.update(
        now,
        LeadId(2),
        LeadPatch {
            status: Some(LeadStatus::Hot),
            ..Default::default()
        },
    );

    let resolved: Vec<i64> = store
        .resolve(&ids(&[3, 1]))
        .into_iter()
        .map(|lead| lead.id.get())
        .collect();
    assert_eq!(resolved, vec![1, 3]);

    let counts = store.status_counts();
    assert_eq!(counts[0], (LeadStatus::Hot, 1));
    assert_eq!(counts[1], (LeadStatus::Warm, 2));
    assert_eq!(counts[3], (LeadStatus::New, 0));
}
