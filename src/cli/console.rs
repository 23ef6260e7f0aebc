//! Interactive console frontend.

use std::io::{self, BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use paddy::game::{GameState, Target};
use paddy::render::render_state;
use paddy::session::{Frontend, InputError, Notice, PlayerChoice};

/// How the player wants to begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetupChoice {
    /// Start a fresh game.
    New,
    /// Resume the saved game.
    Load,
}

/// Line-oriented frontend over any reader and writer.
///
/// A failed write is held back and returned by the next prompt.
#[derive(Debug)]
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
    write_error: Option<io::Error>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console.
    pub(crate) fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
            write_error: None,
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.output.write_all(text.as_bytes()) {
            if self.write_error.is_none() {
                self.write_error = Some(e);
            }
        }
    }

    fn say(&mut self, text: &str) {
        self.emit(&format!("{text}\n"));
    }

    /// Read one line. Bytes that are not UTF-8 are replaced rather than
    /// rejected, so they fail parsing and get re-prompted.
    fn read_line(&mut self) -> Result<String, InputError> {
        if let Some(e) = self.write_error.take() {
            return Err(e.into());
        }
        self.output.flush()?;
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }

    /// Prompt until the player enters an integer that fits in `T`.
    fn ask_number<T>(&mut self, prompt: &str) -> Result<T, InputError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        loop {
            self.emit(prompt);
            let line = self.read_line()?;
            match line.parse() {
                Ok(n) => return Ok(n),
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        self.say("Invalid input: the number is too large.");
                    }
                    _ => self.say("Invalid input: a number is expected."),
                },
            }
        }
    }

    /// Ask whether to start a new game or load the saved one.
    pub(crate) fn ask_setup(&mut self) -> Result<SetupChoice, InputError> {
        loop {
            self.say("1. New game\n2. Load game");
            match self.ask_number::<u32>("> ")? {
                1 => return Ok(SetupChoice::New),
                2 => return Ok(SetupChoice::Load),
                _ => self.say("Unknown choice, try again."),
            }
        }
    }

    /// Ask for the board size. Validation is left to the caller.
    pub(crate) fn ask_board_size(&mut self) -> Result<usize, InputError> {
        self.ask_number("Board size (e.g. 5 for 5x5): ")
    }

    /// Show an error and carry on.
    pub(crate) fn report(&mut self, error: &dyn std::error::Error) {
        self.say(&format!("Error: {error}"));
    }
}

impl<R: BufRead, W: Write> Frontend for Console<R, W> {
    fn show_state(&mut self, state: &GameState) {
        let text = render_state(state, self.color);
        self.say("Current board:");
        self.say(&text);
    }

    fn choose_command(&mut self) -> Result<PlayerChoice, InputError> {
        loop {
            self.say("Choose an action:");
            for (idx, choice) in PlayerChoice::ALL.iter().enumerate() {
                self.say(&format!("{}. {}", idx + 1, choice.label()));
            }
            let number = self.ask_number("> ")?;
            match PlayerChoice::from_menu(number) {
                Some(choice) => return Ok(choice),
                None => self.say("Unknown choice, try again."),
            }
        }
    }

    fn capture_target(&mut self, size: usize) -> Result<Target, InputError> {
        let last = size.saturating_sub(1);
        let x = self.ask_number(&format!("Row (0-{last}): "))?;
        let y = self.ask_number(&format!("Column (0-{last}): "))?;
        Ok(Target::new(x, y))
    }

    fn notify(&mut self, notice: &Notice) {
        self.say(&notice.to_string());
    }
}
