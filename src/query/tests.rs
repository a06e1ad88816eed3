use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::query::builder::{owner_clause, EventQuery, Shape};
use crate::query::clause::{Comparator, FieldRef};
use crate::query::filter::EventFilter;
use crate::query::ordering::SortDirection;
use crate::query::pagination::Page;

// ========================================
// Predicate composition
// ========================================

#[test]
fn test_empty_filter_composes_empty_conjunction() {
    let predicate = EventFilter::new().compose().unwrap();

    assert!(predicate.clauses.is_empty());
    assert!(predicate.binds.is_empty());
    assert!(!predicate.requires_join);
}

#[test]
fn test_full_filter_composes_all_clauses() {
    let after = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let before = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let filter = EventFilter::new()
        .after(after)
        .before(before)
        .event_type("login")
        .study_key("s1")
        .task_id(3)
        .user_email("ada@");

    let predicate = filter.compose().unwrap();

    assert_eq!(predicate.clauses.len(), 6);
    assert!(predicate.requires_join);
    assert_eq!(predicate.binds.len(), 6);
    assert_eq!(predicate.binds.get("eventType"), Some(&json!("login")));
    assert_eq!(predicate.binds.get("studyKey"), Some(&json!("s1")));
    assert_eq!(predicate.binds.get("taskId"), Some(&json!(3)));
    assert_eq!(predicate.binds.get("userEmail"), Some(&json!("ada@")));

    // the time bounds are a pair of one-sided inclusive comparisons
    assert_eq!(predicate.clauses[0].comparator, Comparator::Gte);
    assert_eq!(predicate.clauses[1].comparator, Comparator::Lte);
}

#[test]
fn test_setter_order_does_not_change_composition() {
    let a = EventFilter::new()
        .event_type("login")
        .study_key("s1")
        .compose()
        .unwrap();
    let b = EventFilter::new()
        .study_key("s1")
        .event_type("login")
        .compose()
        .unwrap();

    assert_eq!(a.clauses, b.clauses);
    assert_eq!(a.binds, b.binds);
}

#[test]
fn test_empty_strings_count_as_absent() {
    let filter = EventFilter::new()
        .event_type("")
        .study_key("")
        .user_email("");

    let predicate = filter.compose().unwrap();

    assert!(predicate.clauses.is_empty());
    assert!(!predicate.requires_join);
}

#[test]
fn test_one_sided_time_bounds() {
    let after = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let predicate = EventFilter::new().after(after).compose().unwrap();
    assert_eq!(predicate.clauses.len(), 1);
    assert_eq!(predicate.clauses[0].comparator, Comparator::Gte);
    assert_eq!(predicate.clauses[0].bind, "after");
    assert!(predicate.binds.get("before").is_none());

    let predicate = EventFilter::new().before(after).compose().unwrap();
    assert_eq!(predicate.clauses.len(), 1);
    assert_eq!(predicate.clauses[0].comparator, Comparator::Lte);
    assert_eq!(predicate.clauses[0].bind, "before");
}

#[test]
fn test_bind_names_unique_across_full_filter_set() {
    // the fixed bind names can never collide, even with every filter active
    let filter = EventFilter::new()
        .after(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .before(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        .event_type("login")
        .study_key("s1")
        .task_id(1)
        .user_email("a@b");

    assert!(filter.compose().is_ok());
}

// ========================================
// Join resolution
// ========================================

#[test]
fn test_count_joins_only_for_email_filter() {
    let plain = EventQuery::count("auditlogs", "users", &EventFilter::new()).unwrap();
    assert!(plain.join.is_none());

    let filtered = EventFilter::new().event_type("login").study_key("s1");
    let filtered = EventQuery::count("auditlogs", "users", &filtered).unwrap();
    assert!(filtered.join.is_none());

    let by_email = EventFilter::new().user_email("ada");
    let by_email = EventQuery::count("auditlogs", "users", &by_email).unwrap();
    assert!(by_email.join.is_some());
}

#[test]
fn test_list_always_joins() {
    let query = EventQuery::list(
        "auditlogs",
        "users",
        &EventFilter::new(),
        SortDirection::default(),
        None,
    )
    .unwrap();

    assert!(query.join.is_some());
}

// ========================================
// Query text generation
// ========================================

#[test]
fn test_render_unfiltered_count() {
    let query = EventQuery::count("auditlogs", "users", &EventFilter::new()).unwrap();

    assert_eq!(
        query.to_aql(),
        "RETURN COUNT ( FOR log IN auditlogs RETURN 1 )"
    );
}

#[test]
fn test_render_count_with_email_filter_joins_users() {
    let filter = EventFilter::new().user_email("ada");
    let query = EventQuery::count("auditlogs", "users", &filter).unwrap();

    assert_eq!(
        query.to_aql(),
        "RETURN COUNT ( FOR log IN auditlogs \
         FOR user IN users FILTER user._key == log.userKey \
         FILTER LIKE(user.email, CONCAT('%', @userEmail, '%'), true) \
         RETURN 1 )"
    );
}

#[test]
fn test_render_list_default_sort() {
    let filter = EventFilter::new().event_type("login");
    let query = EventQuery::list(
        "auditlogs",
        "users",
        &filter,
        SortDirection::default(),
        None,
    )
    .unwrap();
    let text = query.to_aql();

    assert!(text.starts_with(
        "FOR log IN auditlogs FOR user IN users FILTER user._key == log.userKey \
         FILTER log.event == @eventType SORT log.timestamp DESC RETURN {"
    ));
    assert!(text.contains("userEmail: user.email"));
    assert!(!text.contains("LIMIT"));
}

#[test]
fn test_render_list_with_pagination() {
    let query = EventQuery::list(
        "auditlogs",
        "users",
        &EventFilter::new(),
        SortDirection::Asc,
        Some(Page::new(20, 10)),
    )
    .unwrap();
    let text = query.to_aql();

    assert!(text.contains("SORT log.timestamp ASC LIMIT @offset, @rowsPerPage RETURN {"));
    assert_eq!(query.binds.get("offset"), Some(&json!(20)));
    assert_eq!(query.binds.get("rowsPerPage"), Some(&json!(10)));
}

#[test]
fn test_render_list_without_pagination_binds_no_window() {
    let query = EventQuery::list(
        "auditlogs",
        "users",
        &EventFilter::new(),
        SortDirection::Desc,
        None,
    )
    .unwrap();

    assert!(query.binds.get("offset").is_none());
    assert!(query.binds.get("rowsPerPage").is_none());
}

#[test]
fn test_render_time_range_clauses() {
    let after = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let before = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let filter = EventFilter::new().after(after).before(before);
    let query = EventQuery::count("auditlogs", "users", &filter).unwrap();
    let text = query.to_aql();

    assert!(text.contains("FILTER log.timestamp >= @after"));
    assert!(text.contains("FILTER log.timestamp <= @before"));
}

#[test]
fn test_render_owner_removal() {
    let (clauses, binds) = owner_clause("u1").unwrap();
    let query = EventQuery::remove("auditlogs", clauses, binds);

    assert_eq!(
        query.to_aql(),
        "FOR log IN auditlogs FILTER log.userKey == @userKey REMOVE log IN auditlogs"
    );
    assert_eq!(query.binds.get("userKey"), Some(&json!("u1")));
}

#[test]
fn test_render_owner_documents() {
    let (clauses, binds) = owner_clause("u1").unwrap();
    let query = EventQuery::documents("auditlogs", clauses, binds);

    assert_eq!(
        query.to_aql(),
        "FOR log IN auditlogs FILTER log.userKey == @userKey RETURN log"
    );
}

#[test]
fn test_render_distinct_event_types() {
    let query = EventQuery::distinct("auditlogs", FieldRef::event("event"));

    assert_eq!(
        query.to_aql(),
        "FOR log IN auditlogs RETURN DISTINCT log.event"
    );
    assert!(query.binds.is_empty());
}

#[test]
fn test_count_shape_carries_no_sort_or_page() {
    let filter = EventFilter::new().event_type("login");
    let query = EventQuery::count("auditlogs", "users", &filter).unwrap();

    assert_eq!(query.shape, Shape::Count);
    let text = query.to_aql();
    assert!(!text.contains("SORT"));
    assert!(!text.contains("LIMIT"));
}
