use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use varwin_core::models::WindowTable;

use crate::output::{OutputFormat, open_output, write_windows};

pub fn run_windows(matches: &ArgMatches) -> Result<()> {
    let window_size = *matches
        .get_one::<u32>("window-size")
        .expect("--window-size is required");
    let max_bp = *matches
        .get_one::<u32>("max-bp")
        .expect("--max-bp is required");
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .expect("--format has a default")
        .parse()?;

    let table = WindowTable::build(window_size, max_bp)
        .context("Failed to build the window table")?;
    info!(
        "{} windows of {} bp cover 1..={}",
        table.len(),
        window_size,
        table.last_end()
    );

    let mut out = open_output(matches.get_one::<String>("output"))?;
    write_windows(&table, format, &mut out)
}
