//! Integration tests for the session catalog and message logs
//!
//! Exercises the complete workflow over the durable sled backend:
//! creating and listing sessions, appending messages, feedback edits, and
//! cascade deletion.

mod common;

use common::create_temp_storage;
use policyrag::chat::{
    ChatMessage, ConfidenceLevel, Feedback, MessageStore, PolicyCitation, Role, SessionStore,
};
use policyrag::storage::SledStorage;
use std::sync::Arc;

fn pto_citation() -> PolicyCitation {
    PolicyCitation {
        id: "cit-1".to_string(),
        policy_name: "Employee Time Off Policy".to_string(),
        section: "Section 3.2".to_string(),
        version: "2.1".to_string(),
        page_number: Some(4),
        excerpt: "PTO accrues monthly.".to_string(),
        document_url: "#".to_string(),
    }
}

#[test]
fn test_conversation_scenario_preserves_messages_and_citations() {
    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage.clone());
    let messages = MessageStore::new(storage);

    let session = sessions.create_session().expect("create failed");

    let question = ChatMessage::user("What is the PTO policy?");
    messages
        .append_message(&session.id, question)
        .expect("append failed");
    sessions
        .increment_message_count(&session.id)
        .expect("increment failed");

    let mut answer = ChatMessage::assistant("20 days per year.");
    answer.confidence = Some(ConfidenceLevel::High);
    answer.citations = vec![pto_citation()];
    messages
        .append_message(&session.id, answer)
        .expect("append failed");
    sessions
        .increment_message_count(&session.id)
        .expect("increment failed");

    let log = messages.messages(&session.id);
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].role, Role::User);
    assert_eq!(log[0].content, "What is the PTO policy?");
    assert_eq!(log[1].role, Role::Assistant);
    assert_eq!(log[1].citations.len(), 1);
    assert_eq!(log[1].citations[0].policy_name, "Employee Time Off Policy");

    let session = sessions.find_session(&session.id).expect("missing");
    assert_eq!(session.message_count, 2);
}

#[test]
fn test_deleting_active_session_promotes_previous_one() {
    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage);

    let s1 = sessions.create_session().expect("create failed");
    let s2 = sessions.create_session().expect("create failed");
    assert_eq!(sessions.active_session().as_deref(), Some(s2.id.as_str()));

    sessions.delete_session(&s2.id).expect("delete failed");
    assert_eq!(sessions.active_session().as_deref(), Some(s1.id.as_str()));
}

#[test]
fn test_delete_cascades_into_message_log() {
    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage.clone());
    let messages = MessageStore::new(storage);

    let session = sessions.create_session().expect("create failed");
    messages
        .append_message(&session.id, ChatMessage::user("hello"))
        .expect("append failed");

    sessions.delete_session(&session.id).expect("delete failed");
    assert!(messages.messages(&session.id).is_empty());
}

#[test]
fn test_feedback_edit_roundtrip_via_replace() {
    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage.clone());
    let messages = MessageStore::new(storage);

    let session = sessions.create_session().expect("create failed");
    messages
        .append_message(&session.id, ChatMessage::user("q"))
        .expect("append failed");
    messages
        .append_message(&session.id, ChatMessage::assistant("a"))
        .expect("append failed");

    let mut log = messages.messages(&session.id);
    log[1].feedback = Some(Feedback::NeedsClarification);
    messages
        .replace_messages(&session.id, log)
        .expect("replace failed");

    let log = messages.messages(&session.id);
    assert_eq!(log[1].feedback, Some(Feedback::NeedsClarification));
    assert_eq!(log[0].feedback, None);
}

#[test]
fn test_pinned_ordering_survives_reopen() {
    let tmp = tempfile::TempDir::new().expect("tempdir failed");
    let db_path = tmp.path().join("chat.db");

    let (old_id, pinned_id);
    {
        let storage = Arc::new(SledStorage::new_with_path(&db_path).expect("open failed"));
        let sessions = SessionStore::new(storage);
        let a = sessions.create_session().expect("create failed");
        let b = sessions.create_session().expect("create failed");
        sessions.toggle_pin(&a.id).expect("pin failed");
        old_id = b.id;
        pinned_id = a.id;
    }

    // A fresh process sees the same catalog in the same order.
    let storage = Arc::new(SledStorage::new_with_path(&db_path).expect("reopen failed"));
    let sessions = SessionStore::new(storage);

    let listed = sessions.list_sessions();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, pinned_id);
    assert!(listed[0].is_pinned);
    assert_eq!(listed[1].id, old_id);
}

#[test]
fn test_rename_pin_and_preview_all_bump_last_updated() {
    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage);

    let session = sessions.create_session().expect("create failed");
    let created = session.created_at;

    sessions
        .rename_session(&session.id, "Security questions")
        .expect("rename failed");
    sessions.toggle_pin(&session.id).expect("pin failed");
    sessions
        .update_preview(&session.id, "Is   MFA\nrequired?")
        .expect("preview failed");

    let updated = sessions.find_session(&session.id).expect("missing");
    assert_eq!(updated.title, "Security questions");
    assert!(updated.is_pinned);
    assert_eq!(updated.last_message_preview.as_deref(), Some("Is MFA required?"));
    assert!(updated.sort_key() >= created);
}

#[test]
fn test_clear_messages_keeps_session_and_count() {
    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage.clone());
    let messages = MessageStore::new(storage);

    let session = sessions.create_session().expect("create failed");
    messages
        .append_message(&session.id, ChatMessage::user("q"))
        .expect("append failed");
    sessions
        .increment_message_count(&session.id)
        .expect("increment failed");

    messages.clear_messages(&session.id).expect("clear failed");

    assert!(messages.messages(&session.id).is_empty());
    // The counter tracks messages ever appended, not the current log.
    let session = sessions.find_session(&session.id).expect("missing");
    assert_eq!(session.message_count, 1);
}

#[test]
fn test_catalog_survives_corrupt_message_log() {
    use policyrag::storage::{Storage, MESSAGES_KEY};

    let (storage, _tmp) = create_temp_storage();
    let sessions = SessionStore::new(storage.clone());
    let messages = MessageStore::new(storage.clone());

    let session = sessions.create_session().expect("create failed");
    storage.set(MESSAGES_KEY, "!!not json!!").expect("set failed");

    // Message reads degrade to empty; the catalog is untouched.
    assert!(messages.messages(&session.id).is_empty());
    assert_eq!(sessions.list_sessions().len(), 1);
}
