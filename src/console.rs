use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// The streams a run talks to: stdio in production, buffers in tests.
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    debug: bool,
}

impl<'a> Console<'a> {
    pub fn new(
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
        debug: bool,
    ) -> Self {
        Self {
            input,
            out,
            err,
            debug,
        }
    }

    /// Prints `question` without a newline and reads one trimmed line.
    /// Returns None when the input stream is closed.
    pub fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            // Keep the next output off the prompt line.
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Writes one line to the output stream.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Writes text to the output stream exactly as given.
    pub fn echo(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{}", text)?;
        Ok(())
    }

    /// Writes text to the error stream exactly as given, after anything
    /// already written to the output stream.
    pub fn echo_err(&mut self, text: &str) -> Result<()> {
        self.out.flush()?;
        write!(self.err, "{}", text)?;
        Ok(())
    }

    /// Writes one line to the error stream.
    pub fn warn(&mut self, line: &str) -> Result<()> {
        self.out.flush()?;
        writeln!(self.err, "{}", line)?;
        Ok(())
    }

    pub fn debug(&mut self, msg: &str) -> Result<()> {
        if self.debug {
            writeln!(self.err, "[debug] {}", msg)?;
        }
        Ok(())
    }
}
