/// One record of a table. `index` is its position at attach time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    index: usize,
    cells: Vec<String>,
}

impl Row {
    pub fn new(index: usize, cells: Vec<String>) -> Self {
        Self { index, cells }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Visible text of a cell. Rows shorter than the header read as empty.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub label: String,
    pub sortable: bool,
}

impl Header {
    pub fn sortable(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sortable: true,
        }
    }

    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sortable: false,
        }
    }
}

/// Everything a controller needs to attach to a table.
///
/// `body` is `None` for a table without a body; such a table stays inert. The optional
/// controls mirror the elements surrounding a table: without a strip no page links are
/// produced, without a toggle no toggle state is reported.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    pub name: String,
    pub headers: Vec<Header>,
    pub body: Option<Vec<Vec<String>>>,
    pub has_toggle: bool,
    pub has_strip: bool,
}

impl TableSource {
    pub fn new(name: impl Into<String>, headers: Vec<Header>, body: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            body: Some(body),
            has_toggle: true,
            has_strip: true,
        }
    }

    pub fn without_body(name: impl Into<String>, headers: Vec<Header>) -> Self {
        Self {
            name: name.into(),
            headers,
            body: None,
            has_toggle: true,
            has_strip: true,
        }
    }

    pub fn with_toggle(mut self, has_toggle: bool) -> Self {
        self.has_toggle = has_toggle;
        self
    }

    pub fn with_strip(mut self, has_strip: bool) -> Self {
        self.has_strip = has_strip;
        self
    }
}
