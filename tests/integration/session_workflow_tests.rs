/*!
 * End-to-end tests driving the menu loop with scripted input
 */

use translog::app_controller::Controller;
use translog::database::schema::SchemaKind;
use translog::database::{CredentialStore, DatabaseConnection, HistoryLedger};
use translog::providers::mock::MockProvider;
use translog::translation_service::TranslationService;

use crate::common;

fn bonjour_provider() -> MockProvider {
    MockProvider::working().with_custom_response(|_| "bonjour".to_string())
}

#[tokio::test]
async fn test_session_registerLoginTranslateHistory_shouldRecordExchange() {
    common::init_logging();
    let controller = common::in_memory_controller(bonjour_provider()).unwrap();

    let output = common::run_session(
        controller,
        &[
            "1", "alice", "s3cret",
            "2", "alice", "s3cret",
            "3", "en", "fr", "hello", "no", "exit",
            "4",
            "5",
        ],
    )
    .await
    .unwrap();

    assert!(output.contains("Supported languages:"));
    assert!(output.contains("Registration successful!"));
    assert!(output.contains("Login successful!"));
    assert!(output.contains("Translation: bonjour"));
    assert!(output.contains("Translation history:"));
    assert!(output.contains("ID: 1, Input: hello, Translated: bonjour, From: en, To: fr"));
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn test_session_duplicateRegistration_shouldReportAndStayLoggedOut() {
    common::init_logging();
    let controller = common::in_memory_controller(MockProvider::working()).unwrap();

    let output = common::run_session(
        controller,
        &["1", "bob", "pw", "1", "bob", "other", "4", "5"],
    )
    .await
    .unwrap();

    assert_eq!(output.matches("Registration successful!").count(), 1);
    assert!(output.contains("User 'bob' already exists"));
    // Registering never logs anyone in
    assert!(output.contains("You must be logged in to do that"));
}

#[tokio::test]
async fn test_session_translateBeforeLogin_shouldNotTouchProviderOrLedger() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let provider = MockProvider::working();
    let controller = common::file_controller(dir.path(), provider.clone()).unwrap();

    let output = common::run_session(controller, &["3", "4", "5"]).await.unwrap();

    assert_eq!(output.matches("You must be logged in to do that").count(), 2);
    assert_eq!(provider.request_count(), 0);

    let ledger = HistoryLedger::open(dir.path().join("translations.db")).unwrap();
    assert_eq!(ledger.total_count(), 0);
}

#[tokio::test]
async fn test_session_wrongPassword_shouldStayLoggedOut() {
    common::init_logging();
    let controller = common::in_memory_controller(MockProvider::working()).unwrap();

    let output = common::run_session(
        controller,
        &["1", "alice", "s3cret", "2", "alice", "wrong", "2", "mallory", "s3cret", "4", "5"],
    )
    .await
    .unwrap();

    assert_eq!(output.matches("Invalid username or password").count(), 2);
    assert!(!output.contains("Login successful!"));
    assert!(output.contains("You must be logged in to do that"));
}

#[tokio::test]
async fn test_session_providerFailure_shouldStayInTranslationLoop() {
    common::init_logging();
    let provider = MockProvider::failing();
    let controller = common::in_memory_controller(provider.clone()).unwrap();

    let output = common::run_session(
        controller,
        &[
            "1", "alice", "pw",
            "2", "alice", "pw",
            "3", "en", "fr", "hello", "again", "exit",
            "4",
            "5",
        ],
    )
    .await
    .unwrap();

    assert_eq!(
        output
            .matches("Translation failed: API responded with error: 500 - Simulated provider failure")
            .count(),
        2
    );
    // One retry per text
    assert_eq!(provider.request_count(), 4);
    assert!(!output.contains("Change languages?"));
    assert!(output.contains("Translation history is empty."));
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn test_session_languageSwitching_shouldFollowOperatorChoice() {
    common::init_logging();
    let provider = MockProvider::working()
        .with_custom_response(|r| format!("{}->{}", r.source_language, r.target_language));
    let controller = common::in_memory_controller(provider).unwrap();

    let output = common::run_session(
        controller,
        &[
            "1", "alice", "pw",
            "2", "alice", "pw",
            "3", "en", "ru",
            "one", "swap",
            "two", "new", "de", "ja",
            "three", "keep",
            "four", "maybe",
            "EXIT",
            "4",
            "5",
        ],
    )
    .await
    .unwrap();

    assert!(output.contains("Translation: en->ru"));
    assert!(output.contains("Translation: ru->en"));
    assert_eq!(output.matches("Translation: de->ja").count(), 2);
    assert!(output.contains("ID: 2, Input: two, Translated: ru->en, From: ru, To: en"));
    assert!(output.contains("ID: 4, Input: four, Translated: de->ja, From: de, To: ja"));
}

#[tokio::test]
async fn test_session_unknownChoice_shouldReprompt() {
    common::init_logging();
    let controller = common::in_memory_controller(MockProvider::working()).unwrap();

    let output = common::run_session(controller, &["9", "register", "5"]).await.unwrap();

    assert_eq!(output.matches("Unrecognized choice, please try again.").count(), 2);
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn test_session_endOfInput_shouldExitCleanly() {
    common::init_logging();
    let controller = common::in_memory_controller(MockProvider::working()).unwrap();

    // Input ends in the middle of the translation sub-loop
    let output = common::run_session(
        controller,
        &["1", "alice", "pw", "2", "alice", "pw", "3", "en"],
    )
    .await
    .unwrap();

    assert!(output.contains("Login successful!"));
    assert!(!output.contains("Translation:"));
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn test_session_emptyInput_shouldPrintMenuAndExit() {
    let controller = common::in_memory_controller(MockProvider::working()).unwrap();

    let output = common::run_session(controller, &[]).await.unwrap();

    assert!(output.contains("1. Register"));
    assert!(output.contains("5. Exit"));
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn test_session_storageFailure_shouldAbortCommandButKeepMenuRunning() {
    common::init_logging();
    // A ledger over a users-only database has no translations table
    let broken_history = HistoryLedger::new(DatabaseConnection::new_in_memory(SchemaKind::Users).unwrap());
    let controller = Controller::new(
        CredentialStore::new_in_memory().unwrap(),
        broken_history,
        TranslationService::new(Box::new(bonjour_provider()), common::fast_policy()),
    );

    let output = common::run_session(
        controller,
        &[
            "1", "alice", "pw",
            "2", "alice", "pw",
            "3", "en", "fr", "hello", "no", "exit",
            "4",
            "5",
        ],
    )
    .await
    .unwrap();

    assert!(output.contains("Translation: bonjour"));
    assert!(output.contains("Could not save this translation to history."));
    assert!(output.contains("Storage error"));
    assert!(output.trim_end().ends_with("Goodbye!"));
}
