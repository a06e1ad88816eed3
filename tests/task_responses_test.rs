//! Integration tests for the task response service
//!
//! Mirrors the retrieval/removal matrix of the original data layer:
//! fetch by key, by user, by study, by both, plus replace and the
//! owner/study bulk deletes.

use serde_json::json;
use studylog::prelude::*;

async fn seed(studylog: &Studylog) -> Vec<String> {
    let responses = studylog.task_responses();
    let mut keys = Vec::new();
    for (user, study, data) in [
        ("1234", "abc", json!([1, 2, 3])),
        ("5679", "abc", json!([1, 2, 3])),
        ("1234", "abc", json!([2, 3, 4])),
        ("1234", "xyz", json!([3, 4, 5])),
    ] {
        let stored = responses
            .create(TaskResponse::new(user, study, data))
            .await
            .unwrap();
        keys.push(stored.key.unwrap());
    }
    keys
}

#[tokio::test]
async fn created_responses_can_be_retrieved_by_key() {
    let studylog = Studylog::in_memory();
    let keys = seed(&studylog).await;
    let responses = studylog.task_responses();

    let fetched = responses.get_one(&keys[0]).await.unwrap();
    assert_eq!(fetched.user_key, "1234");
    assert_eq!(fetched.study_key, "abc");
    assert_eq!(fetched.data, json!([1, 2, 3]));
}

#[tokio::test]
async fn responses_can_be_retrieved_by_user_study_and_both() {
    let studylog = Studylog::in_memory();
    seed(&studylog).await;
    let responses = studylog.task_responses();

    assert_eq!(responses.by_user("1234").await.unwrap().len(), 3);
    assert_eq!(responses.by_study("abc").await.unwrap().len(), 3);
    assert_eq!(
        responses.by_user_and_study("1234", "abc").await.unwrap().len(),
        2
    );
    assert_eq!(responses.all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn replace_swaps_the_document_but_keeps_the_key() {
    let studylog = Studylog::in_memory();
    let keys = seed(&studylog).await;
    let responses = studylog.task_responses();

    let replacement = TaskResponse::new("1234", "abc", json!([9, 9, 9])).task_id(7);
    responses.replace(&keys[0], &replacement).await.unwrap();

    let fetched = responses.get_one(&keys[0]).await.unwrap();
    assert_eq!(fetched.key.as_deref(), Some(keys[0].as_str()));
    assert_eq!(fetched.data, json!([9, 9, 9]));
    assert_eq!(fetched.task_id, Some(7));
}

#[tokio::test]
async fn replacing_a_missing_document_fails_with_not_found() {
    let studylog = Studylog::in_memory();
    let responses = studylog.task_responses();

    let replacement = TaskResponse::new("1234", "abc", json!([]));
    let err = responses.replace("no-such-key", &replacement).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn responses_can_be_removed_by_key() {
    let studylog = Studylog::in_memory();
    let keys = seed(&studylog).await;
    let responses = studylog.task_responses();

    responses.delete(&keys[0]).await.unwrap();
    assert!(responses.get_one(&keys[0]).await.unwrap_err().is_not_found());

    // removing it again changes nothing
    responses.delete(&keys[0]).await.unwrap();
    assert_eq!(responses.all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn responses_can_be_removed_by_user() {
    let studylog = Studylog::in_memory();
    seed(&studylog).await;
    let responses = studylog.task_responses();

    responses.delete_by_user("1234").await.unwrap();
    assert!(responses.by_user("1234").await.unwrap().is_empty());
    assert_eq!(responses.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn responses_can_be_removed_by_study() {
    let studylog = Studylog::in_memory();
    seed(&studylog).await;
    let responses = studylog.task_responses();

    responses.delete_by_study("abc").await.unwrap();
    assert!(responses.by_study("abc").await.unwrap().is_empty());
    assert_eq!(responses.all().await.unwrap().len(), 1);
}
