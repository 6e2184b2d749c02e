//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::attendance::AttendanceCommand;
use crate::commands::blog::BlogCommand;
use crate::commands::contacts::ContactsCommand;

/// Local attendance, blog and contact records.
#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(author, version = env!("SLATE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding the record files (defaults to $SLATE_DATA_DIR,
    /// then the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Student attendance records
    Attendance(AttendanceCommand),

    /// Blog posts
    Blog(BlogCommand),

    /// Address book
    Contacts(ContactsCommand),
}
