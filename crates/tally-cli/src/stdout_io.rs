//! Stdout plumbing shared by every command.
//!
//! A consumer such as `tally entries list ... | head` may close the pipe
//! before we finish writing; that is normal, so a broken pipe is swallowed
//! rather than surfaced as a command failure.

use std::io::{self, Write};

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    emit(&mut stdout, text.as_bytes())?;
    emit(&mut stdout, b"\n")
}

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    emit(&mut stdout, text.as_bytes())
}

/// Writes and flushes, treating a broken pipe as success.
fn emit<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    let outcome = writer.write_all(bytes).and_then(|()| writer.flush());
    match outcome {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
