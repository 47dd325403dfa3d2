use std::ffi::OsString;
use std::fmt;

use cosmic_toast_util::NotificationText;

use crate::config::PROGRAM;
use crate::fl;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Show(NotificationText),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingText,
    UnknownOption(String),
    NotUnicode(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingText => write!(f, "{}", fl!("missing-text")),
            UsageError::UnknownOption(option) => {
                write!(f, "{}", fl!("unknown-option", option = option.as_str()))
            }
            UsageError::NotUnicode(argument) => {
                write!(f, "{}", fl!("not-unicode", argument = argument.as_str()))
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// Parse the arguments following the program name.
///
/// Everything after `--` is text, even when it starts with `-`.
pub fn parse<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut options: Vec<OsString> = args.into_iter().collect();
    let literal = match options.iter().position(|arg| arg == "--") {
        Some(pos) => {
            let mut tail = options.split_off(pos);
            tail.remove(0);
            tail
        }
        None => Vec::new(),
    };

    let mut parser = pico_args::Arguments::from_vec(options);
    if parser.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }
    if parser.contains(["-V", "--version"]) {
        return Ok(Command::Version);
    }

    let mut words = Vec::new();
    for arg in parser.finish() {
        let arg = into_string(arg)?;
        if arg.len() > 1 && arg.starts_with('-') {
            return Err(UsageError::UnknownOption(arg));
        }
        words.push(arg);
    }
    for arg in literal {
        words.push(into_string(arg)?);
    }

    match NotificationText::from_args(&words) {
        Some(text) if !text.is_empty() => Ok(Command::Show(text)),
        _ => Err(UsageError::MissingText),
    }
}

fn into_string(arg: OsString) -> Result<String, UsageError> {
    arg.into_string()
        .map_err(|arg| UsageError::NotUnicode(arg.to_string_lossy().into_owned()))
}

pub fn usage() -> String {
    fl!("usage", program = PROGRAM)
}

pub fn help() -> String {
    fl!("help", program = PROGRAM)
}
