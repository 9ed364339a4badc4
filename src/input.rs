use std::io::{self, BufRead, IsTerminal};

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use crate::error::{Error, Result};

/// A value the pipelines may need to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
	Address,
	PrivateKey,
}

impl Field {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Address => "address",
			Self::PrivateKey => "private key",
		}
	}

	fn prompt(&self) -> &'static str {
		match self {
			Self::Address => "Enter address",
			Self::PrivateKey => "Enter sender private key",
		}
	}

	fn is_secret(&self) -> bool {
		matches!(self, Self::PrivateKey)
	}
}

/// Where missing inputs come from when they were not passed as arguments.
pub trait InputSource {
	fn read(&self, field: Field) -> Result<String>;
}

/// Use `supplied` when present and non-blank, otherwise ask `input`.
pub fn resolve(supplied: Option<&str>, field: Field, input: &dyn InputSource) -> Result<String> {
	match supplied.map(str::trim).filter(|s| !s.is_empty()) {
		Some(value) => Ok(value.to_owned()),
		None => input.read(field),
	}
}

/// Pick the prompt for a terminal, or line-by-line reads for piped stdin.
pub fn detect() -> Box<dyn InputSource> {
	if io::stdin().is_terminal() {
		Box::new(TerminalPrompt)
	} else {
		Box::new(PipedStdin)
	}
}

/// Interactive prompt. Private keys are read without echo.
pub struct TerminalPrompt;

impl InputSource for TerminalPrompt {
	fn read(&self, field: Field) -> Result<String> {
		let theme = ColorfulTheme::default();
		let value = if field.is_secret() {
			Password::with_theme(&theme)
				.with_prompt(field.prompt())
				.interact()
		} else {
			Input::<String>::with_theme(&theme)
				.with_prompt(field.prompt())
				.interact_text()
		};

		value.map(|v| v.trim().to_owned()).map_err(|e| Error::Input {
			what: field.label(),
			reason: e.to_string(),
		})
	}
}

/// Reads one line of stdin per requested value.
pub struct PipedStdin;

impl InputSource for PipedStdin {
	fn read(&self, field: Field) -> Result<String> {
		read_line(&mut io::stdin().lock(), field)
	}
}

/// Fails for every field; for runs that must not block on input.
pub struct Unavailable;

impl InputSource for Unavailable {
	fn read(&self, field: Field) -> Result<String> {
		Err(Error::MissingInput(field.label()))
	}
}

fn read_line(reader: &mut impl BufRead, field: Field) -> Result<String> {
	let mut line = String::new();
	reader.read_line(&mut line).map_err(|e| Error::Input {
		what: field.label(),
		reason: e.to_string(),
	})?;

	let value = line.trim();
	if value.is_empty() {
		return Err(Error::MissingInput(field.label()));
	}
	Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn supplied_value_skips_input() {
		let v = resolve(Some(" 0xabc "), Field::Address, &Unavailable).unwrap();
		assert_eq!(v, "0xabc");
	}

	#[test]
	fn blank_value_falls_back_to_input() {
		let err = resolve(Some("  "), Field::PrivateKey, &Unavailable).unwrap_err();
		assert!(matches!(err, Error::MissingInput("private key")));
	}

	#[test]
	fn reads_successive_lines() {
		let mut stdin = Cursor::new("0xabc\ndeadbeef\n");
		assert_eq!(read_line(&mut stdin, Field::Address).unwrap(), "0xabc");
		assert_eq!(read_line(&mut stdin, Field::PrivateKey).unwrap(), "deadbeef");
	}

	#[test]
	fn eof_is_missing_input() {
		let mut stdin = Cursor::new("");
		let err = read_line(&mut stdin, Field::Address).unwrap_err();
		assert!(matches!(err, Error::MissingInput("address")));
	}
}
