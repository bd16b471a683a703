use tracing::{debug, info, trace};

use crate::compare::{restore_original_order, sort_rows};
use crate::domain::{Message, TableConfig, TableError};
use crate::pagination::{PageLink, PaginationState};
use crate::table::{Header, Row, TableSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// `None` until the first sort and again after `clear_sort`.
    pub column: Option<usize>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortClass {
    Asc,
    Desc,
}

impl SortClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortClass::Asc => "asc",
            SortClass::Desc => "desc",
        }
    }
}

/// Indicator state of one column header.
///
/// Only the active sort column carries a class, and then exactly one of the two
/// markers is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub label: String,
    pub sortable: bool,
    pub class: Option<SortClass>,
    pub ascending_marker: bool,
    pub descending_marker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationStrip {
    pub visible: bool,
    pub links: Vec<PageLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleView {
    pub disabled: bool,
}

/// What a table looks like for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub name: &'a str,
    pub headers: Vec<HeaderView>,
    pub rows: &'a [Row],
    /// Position of `rows[0]` within all sorted rows.
    pub first_row: usize,
    pub total_rows: usize,
    pub current_page: usize,
    pub total_pages: usize,
    /// `None` when the table has no strip to render links into.
    pub pagination: Option<PaginationStrip>,
    /// `None` when the table has no toggle control.
    pub toggle: Option<ToggleView>,
}

/// Sorting and pagination state of one attached table.
#[derive(Debug)]
pub struct TableController {
    name: String,
    headers: Vec<Header>,
    sorted_rows: Vec<Row>,
    sort: SortState,
    pagination: PaginationState,
    has_toggle: bool,
    has_strip: bool,
}

impl TableController {
    /// Attaches a controller to a table.
    ///
    /// Fails on an unusable page size. A table without a body yields `Ok(None)` and
    /// stays untouched.
    pub fn attach(source: TableSource, config: &TableConfig) -> Result<Option<Self>, TableError> {
        let page_size = config.validated_page_size()?;
        let Some(body) = source.body else {
            debug!("Table {:?} has no body, leaving it inert", source.name);
            return Ok(None);
        };

        let sorted_rows: Vec<Row> = body
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| Row::new(idx, cells))
            .collect();
        info!(
            "Attached table {:?}: {} rows, {} columns, page size {}, pagination {}",
            source.name,
            sorted_rows.len(),
            source.headers.len(),
            page_size,
            if config.pagination_enabled { "on" } else { "off" }
        );

        Ok(Some(Self {
            name: source.name,
            headers: source.headers,
            sorted_rows,
            sort: SortState::default(),
            pagination: PaginationState::new(page_size, config.pagination_enabled),
            has_toggle: source.has_toggle,
            has_strip: source.has_strip,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn sorted_rows(&self) -> &[Row] {
        &self.sorted_rows
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.sorted_rows.len())
    }

    /// Applies a table level message. Returns `false` for messages that are not about
    /// this table.
    pub fn update(&mut self, message: Message) -> bool {
        match message {
            Message::SortColumn(column) => self.sort_by_column(column),
            Message::SetPage(page) => self.set_page(page),
            Message::NextPage => self.next_page(),
            Message::PreviousPage => self.previous_page(),
            Message::FirstPage => self.first_page(),
            Message::LastPage => self.last_page(),
            Message::TogglePagination => self.toggle_pagination(),
            Message::ClearSort => self.clear_sort(),
            _ => return false,
        }
        true
    }

    // -------------------- State transitions ---------------------- //

    /// Sorts by `column`. Sorting the active column again reverses the direction, any
    /// other column starts ascending. Non sortable or unknown columns are ignored.
    pub fn sort_by_column(&mut self, column: usize) {
        if !self.headers.get(column).is_some_and(|h| h.sortable) {
            trace!("Ignoring sort request for non sortable column {}", column);
            return;
        }
        let ascending = !(self.sort.column == Some(column) && self.sort.ascending);
        self.sort = SortState {
            column: Some(column),
            ascending,
        };
        sort_rows(&mut self.sorted_rows, column, ascending);
        self.pagination.reset();
        debug!(
            "Sorted {:?} by column {} ({})",
            self.name,
            column,
            if ascending { "asc" } else { "desc" }
        );
    }

    /// Drops the sort column and returns rows to the order they were attached in.
    pub fn clear_sort(&mut self) {
        if self.sort.column.is_none() {
            return;
        }
        restore_original_order(&mut self.sorted_rows);
        self.sort = SortState::default();
        self.pagination.reset();
        debug!("Cleared sort of {:?}", self.name);
    }

    pub fn set_page(&mut self, page: usize) {
        let page = self.pagination.set_page(page, self.sorted_rows.len());
        trace!("{:?} now on page {}", self.name, page);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.pagination.current_page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.pagination.current_page().saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Flips pagination. The current page is kept, so turning it back on resumes there.
    pub fn toggle_pagination(&mut self) {
        self.pagination.enabled = !self.pagination.enabled;
        debug!(
            "Pagination of {:?} {}",
            self.name,
            if self.pagination.enabled { "enabled" } else { "disabled" }
        );
    }

    // -------------------- Projection ---------------------- //

    /// Projects the current state. Does not change anything.
    pub fn render(&self) -> TableView<'_> {
        let total_rows = self.sorted_rows.len();
        let window = self.pagination.window(total_rows);

        let headers = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| self.header_view(idx, header))
            .collect();

        let pagination = self.has_strip.then(|| PaginationStrip {
            visible: self.pagination.enabled,
            links: self.pagination.links(total_rows),
        });

        TableView {
            name: &self.name,
            headers,
            first_row: window.start,
            rows: &self.sorted_rows[window],
            total_rows,
            current_page: self.pagination.current_page(),
            total_pages: self.total_pages(),
            pagination,
            toggle: self.has_toggle.then_some(ToggleView {
                disabled: !self.pagination.enabled,
            }),
        }
    }

    fn header_view(&self, idx: usize, header: &Header) -> HeaderView {
        let class = match self.sort.column {
            Some(column) if column == idx && header.sortable => Some(if self.sort.ascending {
                SortClass::Asc
            } else {
                SortClass::Desc
            }),
            _ => None,
        };
        HeaderView {
            label: header.label.clone(),
            sortable: header.sortable,
            class,
            ascending_marker: class == Some(SortClass::Asc),
            descending_marker: class == Some(SortClass::Desc),
        }
    }
}
