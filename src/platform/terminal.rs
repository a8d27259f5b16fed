//! Line-oriented terminal I/O.

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::thread;

use crate::session::ChoiceProvider;
use crate::settings::TextSpeed;

/// Prompt shown when the story offers a choice
pub const CHOICE_PROMPT: &str = "What do you want to do next?: ";

/// Terminal front end, generic over its streams so it can be scripted
pub struct Terminal<R, W> {
    input: R,
    output: W,
    speed: TextSpeed,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// Terminal on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            speed: TextSpeed::Instant,
        }
    }

    pub fn set_text_speed(&mut self, speed: TextSpeed) {
        self.speed = speed;
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line without its terminator. End of input is an error.
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print text one character at a time at the current text speed
    pub fn reveal(&mut self, text: &str) -> io::Result<()> {
        let delay = self.speed.char_delay();
        if delay.is_zero() {
            return self.say(text);
        }
        for ch in text.chars() {
            write!(self.output, "{ch}")?;
            self.output.flush()?;
            thread::sleep(delay);
        }
        writeln!(self.output)
    }

    /// Numbered menu; returns the zero-based index of a valid selection
    pub fn menu(&mut self, prompt: &str, options: &[&str]) -> io::Result<usize> {
        if options.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "menu has no options",
            ));
        }
        loop {
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, option)?;
            }
            let answer = self.ask(prompt)?;
            let answer = answer.trim();
            // Digits only: no sign, no whitespace inside
            let parsed = if answer.bytes().all(|b| b.is_ascii_digit()) {
                answer.parse::<usize>().ok()
            } else {
                None
            };
            let Some(choice) = parsed else {
                self.say("Invalid input. Please enter a number.")?;
                continue;
            };
            if choice < 1 || choice > options.len() {
                self.say("Invalid input. Please choose a number from the range.")?;
                continue;
            }
            return Ok(choice - 1);
        }
    }

    /// Ask until a non-empty answer is given
    pub fn text(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.trim().is_empty() {
                self.say("Invalid input. Please enter a valid value.")?;
                continue;
            }
            return Ok(answer);
        }
    }

    /// Yes/no question
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let answer = self.ask(&format!("{prompt} (yes/no) "))?.trim().to_lowercase();
            match answer.as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => self.say("Invalid input. Please enter \"yes\" or \"no\".")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> ChoiceProvider for Terminal<R, W> {
    fn choose(&mut self, labels: &[&str]) -> io::Result<usize> {
        self.menu(CHOICE_PROMPT, labels)
    }
}
