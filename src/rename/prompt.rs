//! Asking the user what to do after a failed edit.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// The three ways out of a failed edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Reopen the editor with the same listing.
    Retry,
    /// Leave this directory unchanged and carry on.
    Continue,
    /// Stop the whole run.
    Exit,
}

impl Choice {
    /// Parse a user answer (case-insensitive, surrounding whitespace ignored).
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "r" | "retry" | "y" | "yes" => Some(Choice::Retry),
            "c" | "continue" | "s" | "skip" => Some(Choice::Continue),
            "e" | "exit" | "q" | "quit" | "abort" => Some(Choice::Exit),
            _ => None,
        }
    }
}

pub trait Prompter {
    fn choose(&mut self, question: &str) -> Result<Choice>;
}

/// Line-based prompt over any reader/writer pair.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    /// Asks until a recognised answer arrives; end of input means exit.
    fn choose(&mut self, question: &str) -> Result<Choice> {
        loop {
            write!(self.output, "{question} [r]etry / [c]ontinue / [e]xit: ")
                .and_then(|()| self.output.flush())
                .context("write prompt")?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).context("read answer")?;
            if read == 0 {
                return Ok(Choice::Exit);
            }
            match Choice::parse(&line) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "Please answer retry, continue or exit.").context("write prompt")?,
            }
        }
    }
}
