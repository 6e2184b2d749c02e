//! Contact subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use slate_core::{Record, RecordId, RecordStore};
use slate_domains::{Contact, ContactFilter, ContactPatch};

use super::ListArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ContactsCommand {
    #[command(subcommand)]
    pub command: ContactsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContactsSubcommand {
    /// Add a contact
    Add(AddArgs),

    /// List contacts in the order they were added
    List(ListContactsArgs),

    /// Change an existing contact
    Edit(EditArgs),

    /// Delete a contact
    Remove(RemoveArgs),

    /// Print every contact as JSON
    Export,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct ListContactsArgs {
    /// Match name, phone or email
    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Contact id
    pub record: RecordId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Contact id
    pub record: RecordId,
}

pub fn handle(cmd: ContactsCommand, data_dir: &Path) -> Result<()> {
    let mut store: RecordStore<Contact> = super::open(data_dir);

    match cmd.command {
        ContactsSubcommand::Add(args) => {
            let record = store
                .add(Contact::new(args.name, args.phone, args.email))
                .context("Failed to add contact")?;
            println!("{}", record.id);
            output::success("Contact added");
            Ok(())
        }
        ContactsSubcommand::List(args) => {
            let filter = ContactFilter {
                search: args.search,
            };
            super::list(store.query(filter.into_filter(), None), &args.list, render)
        }
        ContactsSubcommand::Edit(args) => {
            let patch = ContactPatch {
                name: args.name,
                phone: args.phone,
                email: args.email,
            };
            let record = store
                .update(args.record, patch)
                .context("Failed to update contact")?;
            output::success("Contact updated");
            output::field("Name", &record.fields.name);
            Ok(())
        }
        ContactsSubcommand::Remove(args) => super::remove(&mut store, args.record),
        ContactsSubcommand::Export => super::export(&store),
    }
}

fn render(record: &Record<Contact>) {
    let contact = &record.fields;
    println!(
        "{}  {}  {}  {}",
        record.id.to_string().dimmed(),
        contact.name.bold(),
        contact.phone,
        contact.email
    );
}
