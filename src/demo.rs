//! Insert/search/delete walkthrough

use std::io::Write;

use crate::scalar::Scalar;
use crate::script::{OutputFormat, ScriptError};
use crate::table::ChainedHashTable;

fn write_table<W: Write>(
    table: &ChainedHashTable<Scalar, Scalar>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ScriptError> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", table)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&table.dump())?)?,
    }
    Ok(())
}

fn show(value: Option<&Scalar>) -> String {
    value.map_or_else(|| "not found".to_string(), Scalar::to_string)
}

/// Insert `apple`, `banana` and `10`, update `apple`, then search and
/// delete, printing the table before and after.
pub fn run_demo<W: Write>(
    table: &mut ChainedHashTable<Scalar, Scalar>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ScriptError> {
    let apple = Scalar::from("apple");
    let banana = Scalar::from("banana");

    table.insert(apple.clone(), Scalar::Int(1));
    table.insert(banana.clone(), Scalar::Int(2));
    table.insert(Scalar::Int(10), Scalar::from("ten"));
    // Update existing key
    table.insert(apple.clone(), Scalar::Int(99));

    writeln!(out, "Hash Table after insertions:")?;
    write_table(table, format, out)?;
    writeln!(out)?;

    writeln!(out, "Search 'apple': {}", show(table.search(&apple)))?;
    writeln!(out, "Search 'banana': {}", show(table.search(&banana)))?;
    writeln!(out, "Search 42: {}", show(table.search(&Scalar::Int(42))))?;
    writeln!(out)?;

    writeln!(out, "Delete 'banana': {}", table.delete(&banana))?;
    writeln!(out, "Delete 'banana' again: {}", table.delete(&banana))?;
    writeln!(out)?;

    writeln!(out, "Hash Table after deletions:")?;
    write_table(table, format, out)
}
