use std::io::Error;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

pub const HELP_TEXT: &str = "\
Navigation
  ←/→ h/l      select column
  s / Enter    sort selected column (again to reverse)
  c            clear sort, restore original order
  n / PgDn     next page
  p / PgUp     previous page
  g / G        first / last page
  1-9          jump to page
  :            enter page number
  t            toggle pagination
  Tab          next table
  ?            this help
  Esc          close
  q            quit";

/// Raised when a table is attached with an unusable page size.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no page size configured")]
    Missing,
    #[error("page size {0:?} is not a number")]
    NonNumeric(String),
    #[error("page size must be positive, got {0}")]
    NonPositive(i64),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] Error),
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
    #[error("loading failed: {0}")]
    LoadingFailed(String),
    #[error("file not found")]
    FileNotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("unknown file type")]
    UnknownFileType,
}

/// Per table configuration, `TableConfig::default().page_size(25)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Setters)]
pub struct TableConfig {
    /// Rows shown per page. Checked at attach time.
    pub page_size: i64,
    pub pagination_enabled: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            pagination_enabled: true,
        }
    }
}

impl TableConfig {
    /// Builds a config from the page size attribute of a table wrapper.
    ///
    /// The attribute is read like an integer prefix: leading whitespace and a sign are
    /// accepted and parsing stops at the first non digit, so `"10 rows"` yields 10.
    pub fn from_attribute(raw: Option<&str>, pagination_enabled: bool) -> Result<Self, ConfigError> {
        let raw = raw.ok_or(ConfigError::Missing)?;
        let page_size = parse_int_prefix(raw).ok_or_else(|| ConfigError::NonNumeric(raw.to_string()))?;
        let config = Self {
            page_size,
            pagination_enabled,
        };
        config.validated_page_size()?;
        Ok(config)
    }

    pub fn validated_page_size(&self) -> Result<usize, ConfigError> {
        if self.page_size <= 0 {
            return Err(ConfigError::NonPositive(self.page_size));
        }
        usize::try_from(self.page_size).map_err(|_| ConfigError::NonNumeric(self.page_size.to_string()))
    }
}

fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Table level
    SortColumn(usize),
    SetPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    TogglePagination,
    ClearSort,
    // Viewer level
    SortSelected,
    MoveLeft,
    MoveRight,
    NextTable,
    EnterPageInput,
    RawKey(KeyEvent),
    Help,
    Exit,
    Quit,
}
