use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::io::{BufRead, Write};

use crate::app_config::Config;
use crate::database::{CredentialStore, DatabaseStats, HistoryLedger, NewTranslation, TranslationRecord};
use crate::errors::AppError;
use crate::session::state::{EXIT_WORD, is_exit_word};
use crate::session::{Console, LanguagePair, LanguageSwitch, MenuChoice, SessionState};
use crate::translation_service::TranslationService;

// @module: Interactive session controller

/// Outcome of a single menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Main application controller: owns both stores and the translator and
/// dispatches menu choices to them
pub struct Controller {
    // @field: Registered users
    credentials: CredentialStore,
    // @field: Translation history
    history: HistoryLedger,
    // @field: Provider wrapper with timeout and retries
    translator: TranslationService,
    // @field: Who is logged in
    state: SessionState,
}

impl Controller {
    /// Create a controller from already-open stores
    pub fn new(credentials: CredentialStore, history: HistoryLedger, translator: TranslationService) -> Self {
        Self {
            credentials,
            history,
            translator,
            state: SessionState::default(),
        }
    }

    // @method: Open the configured stores and provider
    pub fn with_config(config: &Config) -> Result<Self> {
        let credentials = CredentialStore::open(&config.storage.users_db_path)
            .context("Failed to open users database")?;
        let history = HistoryLedger::open(&config.storage.translations_db_path)
            .context("Failed to open translations database")?;
        let translator = TranslationService::from_config(&config.provider)?;

        Ok(Self::new(credentials, history, translator))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Statistics over both stores
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            user_count: self.credentials.user_count(),
            translation_count: self.history.total_count(),
            file_size_bytes: self.credentials.file_size_bytes() + self.history.file_size_bytes(),
        }
    }

    /// Register a new user; the session state is not changed
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), AppError> {
        self.credentials.register(username, password)?;
        Ok(())
    }

    /// Log in; a failed attempt leaves the current state as it was
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AppError> {
        if self.credentials.authenticate(username, password)? {
            info!("User '{}' logged in", username);
            self.state = SessionState::Authenticated {
                username: username.to_string(),
            };
            Ok(())
        } else {
            debug!("Failed login attempt");
            Err(AppError::AuthFailure)
        }
    }

    fn current_user(&self) -> Result<String, AppError> {
        self.state
            .username()
            .map(str::to_string)
            .ok_or(AppError::Unauthorized)
    }

    /// Ask the provider for a translation without recording it
    pub async fn translate_text(&self, text: &str, pair: &LanguagePair) -> Result<String, AppError> {
        self.current_user()?;
        let translated = self.translator.translate(text, &pair.source, &pair.target).await?;
        Ok(translated)
    }

    /// Record a finished exchange in the logged-in user's history
    pub fn record_translation(
        &mut self,
        text: &str,
        translated: &str,
        pair: &LanguagePair,
    ) -> Result<TranslationRecord, AppError> {
        let username = self.current_user()?;
        let entry = NewTranslation::new(username, text, translated, pair.source.as_str(), pair.target.as_str());
        let translation_id = self.history.append(&entry)?;
        Ok(entry.into_record(translation_id))
    }

    /// Translate and record in one step
    pub async fn translate_once(&mut self, text: &str, pair: &LanguagePair) -> Result<TranslationRecord, AppError> {
        let translated = self.translate_text(text, pair).await?;
        self.record_translation(text, &translated, pair)
    }

    /// History of the logged-in user in insertion order
    pub fn history(&self) -> Result<Vec<TranslationRecord>, AppError> {
        let username = self.current_user()?;
        Ok(self.history.list_for_user(&username)?)
    }

    /// Print the provider's language catalog
    pub async fn print_supported_languages<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<(), AppError> {
        match self.translator.supported_languages().await {
            Ok(languages) => {
                console.say("Supported languages:")?;
                for (code, name) in &languages {
                    console.say(format!("{}: {}", code, name))?;
                }
            }
            Err(e) => warn!("Could not load the language catalog: {}", e),
        }
        Ok(())
    }

    /// Run the interactive menu loop until Exit or end of input
    ///
    /// Both stores are closed before this returns, whichever way the loop ends.
    pub async fn run<R: BufRead, W: Write>(mut self, console: &mut Console<R, W>) -> Result<()> {
        debug!("Storage: {}", self.stats());

        let outcome = self.menu_loop(console).await;
        let closed = self.shutdown();

        outcome?;
        closed
    }

    async fn menu_loop<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<(), AppError> {
        self.print_supported_languages(console).await?;

        loop {
            console.say("")?;
            for choice in MenuChoice::ALL {
                console.say(choice)?;
            }

            let Some(input) = console.prompt("Choose an option")? else {
                debug!("End of input, leaving the menu");
                console.say("Goodbye!")?;
                return Ok(());
            };

            let choice = match input.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    console.say("Unrecognized choice, please try again.")?;
                    continue;
                }
            };

            match self.dispatch(choice, console).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    console.say("Goodbye!")?;
                    return Ok(());
                }
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => {
                    if let AppError::Storage(cause) = &e {
                        error!("Storage failure: {:#}", cause);
                    }
                    console.say(&e)?;
                }
            }
        }
    }

    async fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        console: &mut Console<R, W>,
    ) -> Result<Flow, AppError> {
        if choice.requires_login() && !self.state.is_authenticated() {
            return Err(AppError::Unauthorized);
        }

        match choice {
            MenuChoice::Register => {
                let Some((username, password)) = Self::prompt_credentials(console)? else {
                    return Ok(Flow::Exit);
                };
                self.register(&username, &password)?;
                console.say("Registration successful!")?;
            }
            MenuChoice::Login => {
                let Some((username, password)) = Self::prompt_credentials(console)? else {
                    return Ok(Flow::Exit);
                };
                self.login(&username, &password)?;
                console.say("Login successful!")?;
            }
            MenuChoice::Translate => {
                if !self.translation_loop(console).await? {
                    return Ok(Flow::Exit);
                }
            }
            MenuChoice::ViewHistory => {
                let records = self.history()?;
                if records.is_empty() {
                    console.say("Translation history is empty.")?;
                } else {
                    console.say("Translation history:")?;
                    for record in &records {
                        console.say(record)?;
                    }
                }
            }
            MenuChoice::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn prompt_credentials<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<(String, String)>, AppError> {
        let Some(username) = console.prompt("Username")? else {
            return Ok(None);
        };
        let Some(password) = console.prompt("Password")? else {
            return Ok(None);
        };
        Ok(Some((username, password)))
    }

    fn prompt_pair<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<LanguagePair>, AppError> {
        let Some(source) = console.prompt("Source language")? else {
            return Ok(None);
        };
        let Some(target) = console.prompt("Target language")? else {
            return Ok(None);
        };
        Ok(Some(LanguagePair::new(source, target)))
    }

    /// Translation sub-loop. Returns `false` when input ran out.
    async fn translation_loop<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<bool, AppError> {
        let Some(mut pair) = Self::prompt_pair(console)? else {
            return Ok(false);
        };

        loop {
            let Some(text) = console.prompt(&format!("Text ('{}' to return to the menu)", EXIT_WORD))? else {
                return Ok(false);
            };
            if is_exit_word(&text) {
                return Ok(true);
            }

            let translated = match self.translate_text(&text, &pair).await {
                Ok(translated) => translated,
                Err(AppError::Provider(e)) => {
                    warn!("Translation {} -> {} failed: {}", pair.source, pair.target, e);
                    console.say(format!("Translation failed: {}", e))?;
                    continue;
                }
                Err(e) => return Err(e),
            };
            console.say(format!("Translation: {}", translated))?;

            match self.record_translation(&text, &translated, &pair) {
                Ok(record) => debug!("Saved translation #{}", record.translation_id),
                Err(AppError::Storage(cause)) => {
                    error!("Failed to save translation: {:#}", cause);
                    console.say("Could not save this translation to history.")?;
                }
                Err(e) => return Err(e),
            }

            let Some(answer) = console.prompt("Change languages? (swap/new/keep)")? else {
                return Ok(false);
            };
            match LanguageSwitch::parse(&answer) {
                LanguageSwitch::Swap => pair.swap(),
                LanguageSwitch::SetNew => match Self::prompt_pair(console)? {
                    Some(new_pair) => pair = new_pair,
                    None => return Ok(false),
                },
                LanguageSwitch::Keep => {}
            }
        }
    }

    /// Close both stores, reporting the first failure
    pub fn shutdown(self) -> Result<()> {
        let users = self.credentials.close();
        let translations = self.history.close();
        info!("Stores closed");
        users.and(translations)
    }
}
