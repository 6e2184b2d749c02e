//! Attendance subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use colored::Colorize;

use slate_core::{Record, RecordId, RecordStore, Sort};
use slate_domains::{
    AttendanceEntry, AttendanceFilter, AttendancePatch, AttendanceStats, AttendanceStatus,
};

use super::ListArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct AttendanceCommand {
    #[command(subcommand)]
    pub command: AttendanceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AttendanceSubcommand {
    /// Record attendance for a student
    Add(AddArgs),

    /// List attendance records, newest first
    List(ListAttendanceArgs),

    /// Change an existing record
    Edit(EditArgs),

    /// Delete a record
    Remove(RemoveArgs),

    /// Show totals and the status breakdown for one day
    Stats(StatsArgs),

    /// Print every record as JSON
    Export,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Student name
    #[arg(long)]
    pub name: String,

    /// Student ID (stored uppercased)
    #[arg(long = "id")]
    pub student_id: String,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Present, Absent or Late
    #[arg(long)]
    pub status: AttendanceStatus,

    /// Free-form remarks
    #[arg(long, default_value = "")]
    pub remarks: String,
}

#[derive(Args, Debug)]
pub struct ListAttendanceArgs {
    /// Match student name or ID
    #[arg(long)]
    pub search: Option<String>,

    /// Only records with this status
    #[arg(long)]
    pub status: Option<AttendanceStatus>,

    /// Only records on this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Order by date instead of insertion
    #[arg(long)]
    pub by_date: bool,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Record id
    pub record: RecordId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "id")]
    pub student_id: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub status: Option<AttendanceStatus>,

    #[arg(long)]
    pub remarks: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Record id
    pub record: RecordId,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Day to summarize (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(cmd: AttendanceCommand, data_dir: &Path) -> Result<()> {
    let mut store: RecordStore<AttendanceEntry> = super::open(data_dir);

    match cmd.command {
        AttendanceSubcommand::Add(args) => add(&mut store, args),
        AttendanceSubcommand::List(args) => list(&store, args),
        AttendanceSubcommand::Edit(args) => edit(&mut store, args),
        AttendanceSubcommand::Remove(args) => super::remove(&mut store, args.record),
        AttendanceSubcommand::Stats(args) => stats(&store, args),
        AttendanceSubcommand::Export => super::export(&store),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn add(store: &mut RecordStore<AttendanceEntry>, args: AddArgs) -> Result<()> {
    let entry = AttendanceEntry::new(
        args.name,
        args.student_id,
        args.date.unwrap_or_else(today),
        args.status,
    )
    .with_remarks(args.remarks);

    let record = store.add(entry).context("Failed to add record")?;

    println!("{}", record.id);
    output::success("Record added successfully!");

    Ok(())
}

fn list(store: &RecordStore<AttendanceEntry>, args: ListAttendanceArgs) -> Result<()> {
    let filter = AttendanceFilter {
        search: args.search,
        status: args.status,
        date: args.date,
    };
    let sort = args
        .by_date
        .then(|| Sort::by_key(|r: &Record<AttendanceEntry>| r.fields.date).reversed());

    super::list(store.query(filter.into_filter(), sort), &args.list, render)
}

fn render(record: &Record<AttendanceEntry>) {
    let entry = &record.fields;
    let status = match entry.status {
        AttendanceStatus::Present => entry.status.as_str().green(),
        AttendanceStatus::Absent => entry.status.as_str().red(),
        AttendanceStatus::Late => entry.status.as_str().yellow(),
    };
    let remarks = if entry.remarks.is_empty() {
        "-"
    } else {
        entry.remarks.as_str()
    };

    println!(
        "{}  {}  {}  {} ({})  {}",
        record.id.to_string().dimmed(),
        entry.date.format("%a, %b %-d, %Y"),
        status,
        entry.student_name.bold(),
        entry.student_id,
        remarks
    );
}

fn edit(store: &mut RecordStore<AttendanceEntry>, args: EditArgs) -> Result<()> {
    let patch = AttendancePatch {
        student_name: args.name,
        student_id: args.student_id,
        date: args.date,
        status: args.status,
        remarks: args.remarks,
    };

    let record = store
        .update(args.record, patch)
        .context("Failed to update record")?;

    output::success("Record updated successfully!");
    output::field("Student", &record.fields.student_name);
    output::field("Date", &record.fields.date.to_string());
    output::field("Status", record.fields.status.as_str());

    Ok(())
}

fn stats(store: &RecordStore<AttendanceEntry>, args: StatsArgs) -> Result<()> {
    let stats = AttendanceStats::compute(store.iter(), args.date.unwrap_or_else(today));

    if args.json {
        return output::json_pretty(&stats);
    }

    output::field("Total records", &stats.total.to_string());
    output::field("Day", &stats.day.to_string());
    for status in AttendanceStatus::ALL {
        output::field(
            status.as_str(),
            &format!("{} ({}%)", stats.count(status), stats.percentage(status)),
        );
    }

    Ok(())
}
