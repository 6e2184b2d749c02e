//! Subcommand implementations, one module per record domain.

pub mod attendance;
pub mod blog;
pub mod contacts;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use slate_core::{DEFAULT_PAGE_SIZE, Fields, Query, Record, RecordId, RecordStore, paginate};
use slate_file::FileBlobStore;

use crate::output;

/// Paging and format options shared by every `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to show (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

/// Open the store for `F` in `data_dir`.
fn open<F: Fields>(data_dir: &Path) -> RecordStore<F> {
    RecordStore::open(FileBlobStore::new(data_dir))
}

/// Print one page of query results.
fn list<F: Fields>(query: Query<'_, F>, args: &ListArgs, render: impl Fn(&Record<F>)) -> Result<()> {
    let matches = query.to_vec();
    if matches.is_empty() {
        output::note("No records found.");
        return Ok(());
    }

    let page = paginate(&matches, args.page_size, args.page);
    for record in page.items {
        if args.json {
            output::json(record)?;
        } else {
            render(*record);
        }
    }
    output::page_footer(&page);

    Ok(())
}

/// Delete a record and report the outcome.
fn remove<F: Fields>(store: &mut RecordStore<F>, id: RecordId) -> Result<()> {
    if store.remove(id).context("Failed to delete record")? {
        output::success(&format!("Deleted record {}", id));
    } else {
        output::note(&format!("No record with id {}.", id));
    }
    Ok(())
}

/// Print the whole collection, in stored order, as a JSON array.
fn export<F: Fields>(store: &RecordStore<F>) -> Result<()> {
    if store.is_empty() {
        output::note("No records to export.");
    }
    output::json_pretty(&store.records())
}
