use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sortable_table::app::{App, Status};
use sortable_table::controller::Controller;
use sortable_table::domain::DEFAULT_PAGE_SIZE;
use sortable_table::loader::{SortableColumns, load_table};
use sortable_table::ui::TableUI;
use sortable_table::{TableConfig, TableController, TableError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files to show, one table each (csv, parquet, arrow)
    #[arg(required = true)]
    paths: Vec<String>,

    /// Rows per page
    #[arg(short = 's', long, default_value_t = DEFAULT_PAGE_SIZE, allow_negative_numbers = true)]
    page_size: i64,

    /// Start with pagination turned off
    #[arg(long)]
    no_pagination: bool,

    /// Sortable columns by name or 1-based number, comma separated. Default: all
    #[arg(long, value_delimiter = ',')]
    sortable: Option<Vec<String>>,

    /// Where to write the log
    #[arg(long, default_value = "sortable-table.log")]
    log_file: String,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    event_poll_time: u64,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(path: &str) -> Result<(), TableError> {
    let file = File::create(shellexpand::tilde(path).into_owned())?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

fn load_tables(args: &Args) -> Result<Vec<TableController>, TableError> {
    let config = TableConfig::default()
        .page_size(args.page_size)
        .pagination_enabled(!args.no_pagination);
    // Fail before touching any file.
    config.validated_page_size()?;

    let sortable = match &args.sortable {
        Some(columns) => SortableColumns::Only(columns.clone()),
        None => SortableColumns::All,
    };

    let mut tables = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let expanded =
            shellexpand::full(path).map_err(|e| TableError::LoadingFailed(e.to_string()))?;
        let path = PathBuf::from(expanded.into_owned());
        let source = load_table(path, &sortable)?;
        if let Some(table) = TableController::attach(source, &config)? {
            tables.push(table);
        }
    }
    Ok(tables)
}

fn run(args: Args) -> Result<(), TableError> {
    init_logging(&args.log_file)?;
    info!("Starting sortable-table with {:?}", args);

    let tables = load_tables(&args)?;
    let mut app = App::new(tables);
    let controller = Controller::new(args.event_poll_time);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &controller);
    ratatui::restore();

    info!("Bye");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    controller: &Controller,
) -> Result<(), TableError> {
    while app.status != Status::Quitting {
        terminal.draw(|f| TableUI::draw(app, f))?;

        let message = controller.handle_event(app.raw_keyevents())?;
        app.update(message)?;
    }
    Ok(())
}
