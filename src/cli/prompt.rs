//! Line-oriented prompting over any reader/writer pair
//!
//! All reads return `Ok(None)` once input is exhausted so callers can wind
//! down instead of reprompting forever.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{HotelError, HotelResult};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of output
    pub fn say(&mut self, text: impl AsRef<str>) -> HotelResult<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Write text without a trailing newline
    pub fn print(&mut self, text: impl AsRef<str>) -> HotelResult<()> {
        write!(self.output, "{}", text.as_ref())?;
        self.output.flush()?;
        Ok(())
    }

    /// Show a prompt and read one line, without the line ending
    ///
    /// A line that is not valid UTF-8 is rejected and the prompt repeated.
    pub fn line(&mut self, prompt: &str) -> HotelResult<Option<String>> {
        loop {
            self.print(prompt)?;

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                self.say("")?;
                return Ok(None);
            }

            match String::from_utf8(buf) {
                Ok(text) => return Ok(Some(text.trim_end_matches(['\n', '\r']).to_string())),
                Err(_) => {
                    let err = HotelError::InvalidInput("line is not valid UTF-8".into());
                    self.say(format!("Error: {}", err))?;
                    self.say("Please try again")?;
                }
            }
        }
    }

    /// Read a value, reprompting with `hint` until it parses
    pub fn parsed<T>(&mut self, prompt: &str, hint: &str) -> HotelResult<Option<T>>
    where
        T: FromStr<Err = HotelError>,
    {
        loop {
            let Some(raw) = self.line(prompt)? else {
                return Ok(None);
            };

            match raw.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    self.say(format!("Error: {}", e))?;
                    self.say(hint)?;
                }
            }
        }
    }

    /// Read a non-negative count, reprompting until it parses
    pub fn count(&mut self, prompt: &str) -> HotelResult<Option<usize>> {
        loop {
            let Some(raw) = self.line(prompt)? else {
                return Ok(None);
            };

            match parse_count(&raw) {
                Ok(n) => return Ok(Some(n)),
                Err(e) => {
                    self.say(format!("Error: {}", e))?;
                    self.say("Please try again")?;
                }
            }
        }
    }
}

/// Parse a request count
pub fn parse_count(raw: &str) -> HotelResult<usize> {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| HotelError::InvalidInput(format!("'{}' is not a valid count", trimmed)))
}
