use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

/// Line editor for typing a page number. Only digits are accepted.
#[derive(Default)]
pub struct PageInput {
    current_input: String,
    finished: bool,
    canceled: bool,
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub canceled: bool,
}

impl InputResult {
    /// The typed page, once input was confirmed.
    pub fn page(&self) -> Option<usize> {
        if self.finished && !self.canceled {
            self.input.parse().ok()
        } else {
            None
        }
    }
}

impl PageInput {
    pub fn read(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.enter(),
            (KeyCode::Esc, _) => self.escape(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.key(c),
            _ => self.get(),
        }
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            canceled: self.canceled,
            finished: self.finished,
            input: self.current_input.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.canceled = false;
        self.finished = false;
        self.current_input.clear();
    }

    fn enter(&mut self) -> InputResult {
        self.finished = true;
        self.get()
    }

    fn escape(&mut self) -> InputResult {
        self.clear();
        self.canceled = true;
        self.finished = true;
        self.get()
    }

    fn backspace(&mut self) -> InputResult {
        self.current_input.pop();
        self.get()
    }

    fn key(&mut self, chr: char) -> InputResult {
        if chr.is_ascii_digit() {
            self.current_input.push(chr);
        } else {
            trace!("Ignoring non digit page input {chr:?}");
        }
        self.get()
    }
}
