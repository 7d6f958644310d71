/*!
 * Tests for the credential store and history ledger on disk
 */

use translog::database::{CredentialStore, HistoryLedger, NewTranslation};
use translog::errors::StoreError;

use crate::common;

#[test]
fn test_register_shouldStoreSha512HexNotPlaintext() {
    let dir = common::create_temp_dir().unwrap();
    let mut store = CredentialStore::open(dir.path().join("users.db")).unwrap();

    store.register("alice", "s3cret").unwrap();
    let user = store.get_user("alice").unwrap().unwrap();

    assert_ne!(user.password_hash, "s3cret");
    assert_eq!(user.password_hash.len(), 128);
    assert!(user.password_hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(user.password_hash, CredentialStore::hash_password("s3cret"));
}

#[test]
fn test_register_duplicate_shouldKeepOriginalPassword() {
    let dir = common::create_temp_dir().unwrap();
    let mut store = CredentialStore::open(dir.path().join("users.db")).unwrap();
    store.register("bob", "first").unwrap();

    let result = store.register("bob", "second");

    assert!(matches!(result, Err(StoreError::DuplicateUser(ref name)) if name == "bob"));
    assert!(store.authenticate("bob", "first").unwrap());
    assert!(!store.authenticate("bob", "second").unwrap());
    assert_eq!(store.user_count(), 1);
}

#[test]
fn test_authenticate_withUnknownUser_shouldBeFalse() {
    let store = CredentialStore::new_in_memory().unwrap();
    assert!(!store.authenticate("nobody", "pw").unwrap());
}

#[test]
fn test_register_emptyCredentials_shouldBeAccepted() {
    let mut store = CredentialStore::new_in_memory().unwrap();

    store.register("", "").unwrap();

    assert!(store.authenticate("", "").unwrap());
}

#[test]
fn test_usernames_shouldBeCaseSensitive() {
    let mut store = CredentialStore::new_in_memory().unwrap();
    store.register("Alice", "pw").unwrap();

    store.register("alice", "pw").unwrap();

    assert_eq!(store.user_count(), 2);
}

#[test]
fn test_ledger_listForUser_shouldIsolateUsersAndKeepOrder() {
    let dir = common::create_temp_dir().unwrap();
    let mut ledger = HistoryLedger::open(dir.path().join("translations.db")).unwrap();

    let first = ledger.append(&NewTranslation::new("alice", "hello", "bonjour", "en", "fr")).unwrap();
    ledger.append(&NewTranslation::new("bob", "hi", "hola", "en", "es")).unwrap();
    let second = ledger.append(&NewTranslation::new("alice", "cat", "chat", "en", "fr")).unwrap();

    let alice = ledger.list_for_user("alice").unwrap();
    let ids: Vec<i64> = alice.iter().map(|r| r.translation_id).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(first < second);
    assert_eq!(alice[1].translated_text, "chat");

    assert_eq!(ledger.count_for_user("bob").unwrap(), 1);
    assert!(ledger.list_for_user("carol").unwrap().is_empty());
    assert_eq!(ledger.total_count(), 3);
}

#[test]
fn test_ledger_shouldStoreTextVerbatim() {
    let mut ledger = HistoryLedger::new_in_memory().unwrap();
    let text = "  it's \"quoted\"; DROP TABLE translations; -- ünïcödé  ";

    ledger.append(&NewTranslation::new("alice", text, text, "en", "en")).unwrap();

    let records = ledger.list_for_user("alice").unwrap();
    assert_eq!(records[0].input_text, text);
    assert_eq!(records[0].translated_text, text);
}
