//! Sortable, paginated tables.
//!
//! A [`TableController`] attaches to one table and owns its row order, sort column and
//! page. Every state change is followed by [`TableController::render`], a pure
//! projection to the visible rows, header indicators and page links.

pub mod app;
pub mod compare;
pub mod controller;
pub mod domain;
pub mod inputter;
pub mod loader;
pub mod model;
pub mod pagination;
pub mod table;
pub mod ui;

pub use domain::{ConfigError, Message, TableConfig, TableError};
pub use model::{HeaderView, PaginationStrip, SortClass, SortState, TableController, TableView, ToggleView};
pub use pagination::{PageLink, PaginationState};
pub use table::{Header, Row, TableSource};
