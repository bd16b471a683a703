use polars::prelude::*;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::domain::TableError;
use crate::table::{Header, TableSource};

#[derive(Debug)]
enum FileType {
    Csv,
    Parquet,
    Arrow,
}

/// Which columns of a loaded file get sortable headers.
#[derive(Debug, Clone, Default)]
pub enum SortableColumns {
    #[default]
    All,
    /// Column names or 1-based column numbers.
    Only(Vec<String>),
}

impl SortableColumns {
    fn is_sortable(&self, idx: usize, name: &str) -> bool {
        match self {
            SortableColumns::All => true,
            SortableColumns::Only(columns) => columns
                .iter()
                .any(|c| c == name || c.parse::<usize>().is_ok_and(|n| n == idx + 1)),
        }
    }
}

/// Loads a CSV, Parquet or Arrow file as a table source. Cells hold the values as text.
pub fn load_table(path: PathBuf, sortable: &SortableColumns) -> Result<TableSource, TableError> {
    let file_type = check_file(&path)?;
    let frame = match file_type {
        FileType::Csv => load_csv(&path)?,
        FileType::Parquet => load_parquet(&path)?,
        FileType::Arrow => load_arrow(&path)?,
    };

    // Each column is stringified on its own thread.
    let start_time = Instant::now();
    let df = frame.collect()?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let columns = names
        .par_iter()
        .map(|name| load_column(&df, name))
        .collect::<Result<Vec<Vec<String>>, PolarsError>>()?;
    info!(
        "Loading {} took {}ms ...",
        path.display(),
        start_time.elapsed().as_millis()
    );

    let headers = names
        .iter()
        .enumerate()
        .map(|(idx, name)| Header {
            label: name.clone(),
            sortable: sortable.is_sortable(idx, name),
        })
        .collect::<Vec<_>>();
    debug!("Headers: {:?}", headers);

    let nrows = df.height();
    let body = (0..nrows)
        .map(|row| columns.iter().map(|c| c[row].clone()).collect())
        .collect();

    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("???")
        .to_string();
    Ok(TableSource::new(name, headers, body))
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<Vec<String>, PolarsError> {
    let col = df.column(col_name)?.cast(&DataType::String)?;
    let series = col.str()?;
    Ok(series
        .into_iter()
        .map(|value| match value {
            Some(s) => s.replace("\r\n", " ↵ ").replace('\n', " ↵ "),
            None => String::from("∅"),
        })
        .collect())
}

fn check_file(path: &Path) -> Result<FileType, TableError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TableError::FileNotFound,
        ErrorKind::PermissionDenied => TableError::PermissionDenied,
        _ => TableError::Io(e),
    })?;
    if !metadata.is_file() {
        return Err(TableError::LoadingFailed(format!(
            "{} is not a file",
            path.display()
        )));
    }
    detect_file_type(path)
}

fn detect_file_type(path: &Path) -> Result<FileType, TableError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("CSV") => Ok(FileType::Csv),
        Some("PARQUET") | Some("PQ") => Ok(FileType::Parquet),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::Arrow),
        _ => Err(TableError::UnknownFileType),
    }
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(PlPath::Local(path.into()), ScanArgsParquet::default())
}

fn load_arrow(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}
