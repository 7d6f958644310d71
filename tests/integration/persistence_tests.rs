/*!
 * Tests for state that must survive a restart
 */

use translog::app_controller::Controller;
use translog::providers::mock::MockProvider;

use crate::common;

#[tokio::test]
async fn test_restart_shouldKeepUsersAndHistory() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();

    let first = common::file_controller(dir.path(), MockProvider::working()).unwrap();
    common::run_session(
        first,
        &["1", "alice", "s3cret", "2", "alice", "s3cret", "3", "en", "fr", "hello", "no", "exit", "5"],
    )
    .await
    .unwrap();

    let second = common::file_controller(dir.path(), MockProvider::working()).unwrap();
    let output = common::run_session(
        second,
        &["1", "alice", "again", "2", "alice", "s3cret", "4", "5"],
    )
    .await
    .unwrap();

    assert!(output.contains("User 'alice' already exists"));
    assert!(output.contains("Login successful!"));
    assert!(output.contains("ID: 1, Input: hello, Translated: [TRANSLATED to fr] hello, From: en, To: fr"));
}

#[tokio::test]
async fn test_withConfig_shouldOpenBothDatabaseFiles() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    let config = common::temp_config(dir.path());

    let mut controller = Controller::with_config(&config).unwrap();
    controller.register("carol", "pw").unwrap();
    controller.login("carol", "pw").unwrap();
    let pair = translog::session::LanguagePair::new("en", "de");
    let record = controller.translate_once("good morning", &pair).await.unwrap();
    let stats = controller.stats();
    controller.shutdown().unwrap();

    assert_eq!(record.translated_text, "[TRANSLATED to de] good morning");
    assert_eq!(stats.user_count, 1);
    assert_eq!(stats.translation_count, 1);
    assert!(config.storage.users_db_path.exists());
    assert!(config.storage.translations_db_path.exists());

    let reopened = Controller::with_config(&config).unwrap();
    assert_eq!(reopened.stats().translation_count, 1);
}

#[tokio::test]
async fn test_histories_shouldBeScopedPerUser() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();

    let mut controller = common::file_controller(dir.path(), MockProvider::working()).unwrap();
    let pair = translog::session::LanguagePair::new("en", "es");
    for (user, text) in [("alice", "cat"), ("bob", "dog"), ("alice", "bird")] {
        controller.register(user, "pw").ok();
        controller.login(user, "pw").unwrap();
        controller.translate_once(text, &pair).await.unwrap();
    }

    controller.login("alice", "pw").unwrap();
    let inputs: Vec<String> = controller.history().unwrap().into_iter().map(|r| r.input_text).collect();
    assert_eq!(inputs, vec!["cat".to_string(), "bird".to_string()]);

    controller.login("bob", "pw").unwrap();
    assert_eq!(controller.history().unwrap().len(), 1);
}

#[test]
fn test_restart_afterFailedTranslation_shouldHaveEmptyHistory() {
    let dir = common::create_temp_dir().unwrap();

    let result = tokio_test::block_on(async {
        let first = common::file_controller(dir.path(), MockProvider::rejecting())?;
        common::run_session(
            first,
            &["1", "dave", "pw", "2", "dave", "pw", "3", "en", "zz", "hello", "exit", "5"],
        )
        .await?;

        let second = common::file_controller(dir.path(), MockProvider::working())?;
        common::run_session(second, &["2", "dave", "pw", "4", "5"]).await
    });

    let output = result.unwrap();
    assert!(output.contains("Login successful!"));
    assert!(output.contains("Translation history is empty."));
}
