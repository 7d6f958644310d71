/*!
 * Session state and the textual commands that drive it.
 */

use std::fmt;
use std::str::FromStr;

/// Word that ends the translation sub-loop, matched case-insensitively
pub const EXIT_WORD: &str = "exit";

/// Authentication state of the interactive session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nobody is logged in
    #[default]
    Unauthenticated,
    /// A user logged in successfully
    Authenticated { username: String },
}

impl SessionState {
    /// Name of the logged-in user, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Unauthenticated => None,
            SessionState::Authenticated { username } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Login,
    Translate,
    ViewHistory,
    Exit,
}

impl MenuChoice {
    /// All entries in menu order
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Register,
        MenuChoice::Login,
        MenuChoice::Translate,
        MenuChoice::ViewHistory,
        MenuChoice::Exit,
    ];

    /// Number the operator types to pick this entry
    pub fn number(self) -> u8 {
        match self {
            MenuChoice::Register => 1,
            MenuChoice::Login => 2,
            MenuChoice::Translate => 3,
            MenuChoice::ViewHistory => 4,
            MenuChoice::Exit => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Register => "Register",
            MenuChoice::Login => "Login",
            MenuChoice::Translate => "Translate text",
            MenuChoice::ViewHistory => "View translation history",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Whether the entry needs a logged-in user
    pub fn requires_login(self) -> bool {
        matches!(self, MenuChoice::Translate | MenuChoice::ViewHistory)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Error for input that names no menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice(pub String);

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized choice: {}", self.0)
    }
}

impl std::error::Error for UnknownChoice {}

impl FromStr for MenuChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Register),
            "2" => Ok(MenuChoice::Login),
            "3" => Ok(MenuChoice::Translate),
            "4" => Ok(MenuChoice::ViewHistory),
            "5" => Ok(MenuChoice::Exit),
            other => Err(UnknownChoice(other.to_string())),
        }
    }
}

/// What to do with the language pair after a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSwitch {
    /// Exchange source and destination
    Swap,
    /// Ask for two new codes
    SetNew,
    /// Keep the current pair
    Keep,
}

impl LanguageSwitch {
    /// Parse the operator's answer; anything unrecognized keeps the pair
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "swap" | "yes" => LanguageSwitch::Swap,
            "set new" | "new" => LanguageSwitch::SetNew,
            _ => LanguageSwitch::Keep,
        }
    }
}

/// Source and destination language codes of the translation sub-loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }
}

/// Whether the text is the sub-loop exit command
pub fn is_exit_word(text: &str) -> bool {
    text.eq_ignore_ascii_case(EXIT_WORD)
}
