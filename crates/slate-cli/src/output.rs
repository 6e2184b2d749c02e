//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use slate_core::Page;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed note on stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the position of `page` within its result set.
pub fn page_footer<T>(page: &Page<'_, T>) {
    if page.total_pages > 1 {
        eprintln!();
        note(&format!(
            "Page {} of {} ({} records)",
            page.number, page.total_pages, page.total_items
        ));
    }
}

/// Report a failed command, one line per validation message.
pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<slate_core::Error>() {
        Some(slate_core::Error::Validation(validation)) => {
            for field_error in validation.errors() {
                error(&field_error.message);
            }
        }
        _ => error(&format!("{:#}", err)),
    }
}
