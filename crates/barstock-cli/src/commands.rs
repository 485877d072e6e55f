use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use barstock_cli::logging::redact_value;
use barstock_cli::render::{columns_table, inventory_table};
use barstock_client::{ClientConfig, HttpTransport};
use barstock_core::{EditOutcome, SortDirection, TableSession, write_csv};
use barstock_model::ColumnModel;
use tracing::{debug, info, info_span};

use crate::cli::{DeleteArgs, EditArgs, ExportArgs, ListArgs};

/// Where to find the server, from the global flags.
pub struct ServerArgs<'a> {
    pub config: Option<&'a Path>,
    pub url: Option<&'a str>,
}

pub fn run_columns() -> Result<()> {
    println!("{}", columns_table(&ColumnModel::inventory()));
    Ok(())
}

pub fn run_list(server: &ServerArgs<'_>, args: &ListArgs) -> Result<()> {
    let session = open_session(server)?;
    let model = session.model();
    let store = session.store();
    let column = model
        .column(&args.sort)
        .with_context(|| format!("sort by {}", args.sort))?;
    let direction = if args.descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let rows = store
        .sorted_indices(column, direction)
        .into_iter()
        .filter_map(|index| store.rows().get(index).map(|row| (index, row)));
    println!("{}", inventory_table(model, rows));
    println!("{} ingredients", store.len());
    Ok(())
}

pub fn run_edit(server: &ServerArgs<'_>, args: &EditArgs) -> Result<()> {
    let mut session = open_session(server)?;
    let span = info_span!("edit_command", row = args.row, column = %args.column);
    let _guard = span.enter();
    info!(value = redact_value(&args.value), "submitting edit");

    let outcome = session
        .edit(args.row, &args.column, &args.value)
        .with_context(|| format!("edit row {} column {}", args.row, args.column))?;
    match outcome {
        EditOutcome::Unchanged => println!("No change."),
        EditOutcome::Applied { row_index } => {
            let row = session.store().get_row(row_index)?;
            println!("{}", inventory_table(session.model(), [(row_index, row)]));
            println!("Updated row {row_index}.");
        }
    }
    Ok(())
}

pub fn run_delete(server: &ServerArgs<'_>, args: &DeleteArgs) -> Result<()> {
    let mut session = open_session(server)?;
    let mut flow = session.delete_flow();
    let pending = session
        .request_delete(&mut flow, args.row)
        .with_context(|| format!("delete row {}", args.row))?;

    if !args.yes && !confirm(&pending.prompt())? {
        flow.cancel()?;
        println!("Cancelled.");
        return Ok(());
    }
    flow.confirm()?;
    let message = session
        .run_delete(&mut flow)
        .with_context(|| format!("delete {}", pending.key))?;
    println!("{message}");
    Ok(())
}

pub fn run_export(server: &ServerArgs<'_>, args: &ExportArgs) -> Result<()> {
    let session = open_session(server)?;
    let rows = session.store().rows();
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_csv(session.model(), rows, BufWriter::new(file))
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = rows.len(), "inventory exported");
        }
        None => write_csv(session.model(), rows, io::stdout().lock()).context("write csv")?,
    }
    Ok(())
}

fn open_session(server: &ServerArgs<'_>) -> Result<TableSession<HttpTransport>> {
    let mut config = ClientConfig::load(server.config).context("load client config")?;
    if let Some(url) = server.url {
        config = config.with_base_url(url).context("apply --url")?;
    }
    debug!(
        url = %config.collection_url(),
        encoding = %config.body_encoding,
        "client configured"
    );
    let policy = config.reconcile;
    let url = config.collection_url();
    let transport = HttpTransport::new(config).context("create http client")?;
    TableSession::open(ColumnModel::inventory(), transport, policy)
        .with_context(|| format!("load inventory from {url}"))
}

/// Asks a yes/no question on stdout; anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
