//! Blog subcommands.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use slate_core::{Record, RecordId, RecordStore};
use slate_domains::{BlogFilter, BlogPatch, BlogPost, parse_tags};

use super::ListArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BlogCommand {
    #[command(subcommand)]
    pub command: BlogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BlogSubcommand {
    /// Publish a new post
    Add(AddArgs),

    /// List posts, newest first
    List(ListPostsArgs),

    /// Change an existing post
    Edit(EditArgs),

    /// Delete a post
    Remove(RemoveArgs),

    /// Print every post as JSON
    Export,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    #[arg(long)]
    pub category: String,

    /// Post body (use - to read from stdin)
    #[arg(long)]
    pub content: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Args, Debug)]
pub struct ListPostsArgs {
    /// Match title, author, content or tags
    #[arg(long)]
    pub search: Option<String>,

    /// Only posts in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Characters of content to show per post
    #[arg(long, default_value_t = 200)]
    pub excerpt: usize,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Post id
    pub record: RecordId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// New body (use - to read from stdin)
    #[arg(long)]
    pub content: Option<String>,

    /// Replace the tag list (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Post id
    pub record: RecordId,
}

pub fn handle(cmd: BlogCommand, data_dir: &Path) -> Result<()> {
    let mut store: RecordStore<BlogPost> = super::open(data_dir);

    match cmd.command {
        BlogSubcommand::Add(args) => add(&mut store, args),
        BlogSubcommand::List(args) => list(&store, args),
        BlogSubcommand::Edit(args) => edit(&mut store, args),
        BlogSubcommand::Remove(args) => super::remove(&mut store, args.record),
        BlogSubcommand::Export => super::export(&store),
    }
}

/// Resolve `-` to the contents of stdin.
fn read_content(content: String) -> Result<String> {
    if content != "-" {
        return Ok(content);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

fn add(store: &mut RecordStore<BlogPost>, args: AddArgs) -> Result<()> {
    let post = BlogPost::new(
        args.title,
        args.author,
        args.category,
        read_content(args.content)?,
    )
    .with_tags(parse_tags(&args.tags));

    let record = store.add(post).context("Failed to publish post")?;

    println!("{}", record.id);
    output::success("Post published successfully!");

    Ok(())
}

fn list(store: &RecordStore<BlogPost>, args: ListPostsArgs) -> Result<()> {
    let filter = BlogFilter {
        search: args.search,
        category: args.category,
    };
    let excerpt = args.excerpt;

    super::list(
        store.query(filter.into_filter(), None),
        &args.list,
        |record: &Record<BlogPost>| render(record, excerpt),
    )
}

fn render(record: &Record<BlogPost>, excerpt: usize) {
    let post = &record.fields;

    println!(
        "{}  {}  [{}]",
        record.id.to_string().dimmed(),
        post.title.bold(),
        post.category
    );
    println!(
        "    {} · {}",
        post.author,
        record.created_at.format("%b %-d, %Y %H:%M")
    );
    println!("    {}", post.excerpt(excerpt));
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|tag| format!("#{}", tag)).collect();
        println!("    {}", tags.join(" ").cyan());
    }
    println!();
}

fn edit(store: &mut RecordStore<BlogPost>, args: EditArgs) -> Result<()> {
    let patch = BlogPatch {
        title: args.title,
        author: args.author,
        category: args.category,
        content: args.content.map(read_content).transpose()?,
        tags: args.tags.as_deref().map(parse_tags),
    };

    let record = store
        .update(args.record, patch)
        .context("Failed to update post")?;

    output::success("Post updated successfully!");
    output::field("Title", &record.fields.title);
    output::field("Tags", &record.fields.tags.join(", "));

    Ok(())
}
