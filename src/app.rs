use std::time::{Duration, Instant};

use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::domain::{HELP_TEXT, Message, TableError};
use crate::inputter::{InputResult, PageInput};
use crate::model::TableController;

pub const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, PartialEq)]
pub enum Status {
    Ready,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modus {
    Table,
    Help,
    PageInput,
}

/// State of the table viewer: the attached tables, which one is shown and the column
/// cursor used to pick a sort column.
pub struct App {
    tables: Vec<TableController>,
    current_table: usize,
    selected_column: usize,
    pub status: Status,
    modus: Modus,
    input: PageInput,
    last_input: InputResult,
    status_message: String,
    last_status_message_update: Instant,
}

impl App {
    pub fn new(tables: Vec<TableController>) -> Self {
        let status_message = match tables.len() {
            0 => "No tables loaded".to_string(),
            1 => format!("Loaded {}", tables[0].name()),
            n => format!("Loaded {n} tables, <Tab> to switch"),
        };
        Self {
            tables,
            current_table: 0,
            selected_column: 0,
            status: Status::Ready,
            modus: Modus::Table,
            input: PageInput::default(),
            last_input: InputResult::default(),
            status_message,
            last_status_message_update: Instant::now(),
        }
    }

    pub fn current_table(&self) -> Option<&TableController> {
        self.tables.get(self.current_table)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn current_table_index(&self) -> usize {
        self.current_table
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn modus(&self) -> Modus {
        self.modus
    }

    pub fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    pub fn page_input(&self) -> &InputResult {
        &self.last_input
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The status message, empty once it is older than `STATUS_MESSAGE_TIMEOUT`.
    pub fn visible_status_message(&self, now: Instant) -> &str {
        if now.saturating_duration_since(self.last_status_message_update) < STATUS_MESSAGE_TIMEOUT {
            &self.status_message
        } else {
            ""
        }
    }

    /// Keys go unmapped to the page input while it is open.
    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::PageInput
    }

    pub fn quit(&mut self) {
        self.status = Status::Quitting;
    }

    /// Applies one message. Infallible today; returns `Result` to match the event loop,
    /// which propagates every step with `?`.
    pub fn update(&mut self, message: Option<Message>) -> Result<(), TableError> {
        let Some(msg) = message else {
            return Ok(());
        };
        trace!("Update: Modus {:?}, Message {:?}", self.modus, msg);
        match self.modus {
            Modus::Table => match msg {
                Message::Quit => self.quit(),
                Message::MoveLeft => self.move_column(-1),
                Message::MoveRight => self.move_column(1),
                Message::SortSelected => self.forward(Message::SortColumn(self.selected_column)),
                Message::NextTable => self.next_table(),
                Message::EnterPageInput => self.enter_page_input(),
                Message::Help => self.modus = Modus::Help,
                Message::Exit | Message::RawKey(_) => {}
                table_message => self.forward(table_message),
            },
            Modus::Help => match msg {
                Message::Quit => self.quit(),
                Message::Exit | Message::Help | Message::SortSelected => self.modus = Modus::Table,
                _ => {}
            },
            Modus::PageInput => {
                if let Message::RawKey(key) = msg {
                    self.raw_input(key);
                }
            }
        }
        Ok(())
    }

    fn forward(&mut self, message: Message) {
        let Some(table) = self.tables.get_mut(self.current_table) else {
            return;
        };
        if let Message::SortColumn(column) = message
            && !table.headers().get(column).is_some_and(|h| h.sortable)
        {
            self.set_status_message(format!("Column {} is not sortable", column + 1));
            return;
        }
        if !table.update(message) {
            return;
        }
        let status = match message {
            Message::SortColumn(column) => format!(
                "Sorted by {} {}",
                table.headers()[column].label,
                if table.sort_state().ascending { "ascending" } else { "descending" }
            ),
            Message::TogglePagination => {
                if table.pagination().enabled {
                    "Pagination on".to_string()
                } else {
                    "Pagination off".to_string()
                }
            }
            Message::ClearSort => "Original order restored".to_string(),
            _ => return,
        };
        self.set_status_message(status);
    }

    fn move_column(&mut self, step: isize) {
        let Some(table) = self.current_table() else {
            return;
        };
        let ncolumns = table.headers().len();
        if ncolumns == 0 {
            return;
        }
        self.selected_column = self
            .selected_column
            .saturating_add_signed(step)
            .min(ncolumns - 1);
    }

    fn next_table(&mut self) {
        if self.tables.is_empty() {
            return;
        }
        self.current_table = (self.current_table + 1) % self.tables.len();
        self.selected_column = 0;
        let name = self.tables[self.current_table].name().to_string();
        debug!("Switched to table {} ({})", self.current_table, name);
        self.set_status_message(format!("Showing {name}"));
    }

    fn enter_page_input(&mut self) {
        self.input.clear();
        self.last_input = self.input.get();
        self.modus = Modus::PageInput;
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        if !self.last_input.finished {
            return;
        }
        if let Some(page) = self.last_input.page() {
            self.forward(Message::SetPage(page));
        }
        self.input.clear();
        self.modus = Modus::Table;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }
}
