/*!
 * Interactive session support.
 *
 * This module provides:
 * - The authentication state machine and menu commands
 * - Console I/O used by the session loop
 */

pub mod console;
pub mod state;

pub use console::Console;
pub use state::{LanguagePair, LanguageSwitch, MenuChoice, SessionState};
