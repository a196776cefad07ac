mod output;
mod windowize;
mod windows;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "varwin";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about(
            "Summarize base-pair resolution genomic data (sequence composition, \
             variant density, annotation overlap) in fixed-size windows.",
        )
        .subcommand_required(true)
        .subcommand(windows::cli::create_windows_cli())
        .subcommand(windowize::cli::create_sequence_cli())
        .subcommand(windowize::cli::create_variants_cli())
        .subcommand(windowize::cli::create_annotations_cli())
        .subcommand(windowize::cli::create_all_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // WINDOW TABLE
        //
        Some((windows::cli::WINDOWS_CMD, matches)) => {
            windows::handlers::run_windows(matches)?;
        }

        //
        // WINDOWIZE
        //
        Some((
            cmd @ (windowize::cli::SEQUENCE_CMD
            | windowize::cli::VARIANTS_CMD
            | windowize::cli::ANNOTATIONS_CMD
            | windowize::cli::ALL_CMD),
            matches,
        )) => {
            windowize::handlers::run_windowize(cmd, matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
