/*!
 * Line-oriented terminal I/O for the interactive session.
 *
 * Generic over the reader and writer so scripted input can drive the
 * session in tests.
 */

use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Prompting console over a buffered reader and a writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a prompt and read one line
    ///
    /// Returns `None` at end of input. The trailing newline is stripped;
    /// other whitespace is kept as typed.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print one line
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Give back the writer (used by tests to inspect the transcript)
    pub fn into_output(self) -> W {
        self.output
    }
}
