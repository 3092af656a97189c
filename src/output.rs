//! User-facing status lines.
//!
//! Rename reports and `info:`/`ok:` lines go to stdout; warnings, errors and
//! the retry prompt go to stderr so a redirected stdout stays a clean report.
//! Labels are colored only when their own stream is a terminal.

use owo_colors::{OwoColorize, Style};

#[derive(Clone, Copy)]
enum Sink {
    Stdout,
    Stderr,
}

impl Sink {
    fn is_terminal(self) -> bool {
        match self {
            Sink::Stdout => atty::is(atty::Stream::Stdout),
            Sink::Stderr => atty::is(atty::Stream::Stderr),
        }
    }
}

fn emit(sink: Sink, label: &str, style: Style, msg: &str) {
    let line = if sink.is_terminal() {
        format!("{} {}", label.style(style), msg)
    } else {
        format!("{label} {msg}")
    };
    match sink {
        Sink::Stdout => println!("{line}"),
        Sink::Stderr => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Sink::Stdout, "info:", Style::new().cyan().bold(), msg);
}

pub fn print_success(msg: &str) {
    emit(Sink::Stdout, "ok:", Style::new().green().bold(), msg);
}

pub fn print_warn(msg: &str) {
    emit(Sink::Stderr, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    emit(Sink::Stderr, "error:", Style::new().red().bold(), msg);
}
