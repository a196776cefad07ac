use clap::{Arg, Command, arg};

pub const WINDOWS_CMD: &str = "windows";

pub fn create_windows_cli() -> Command {
    Command::new(WINDOWS_CMD)
        .about("Print the fixed-size window table covering 1..=max_bp.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .short('w')
                .required(true)
                .value_parser(clap::value_parser!(u32))
                .help("Window size in base pairs"),
        )
        .arg(
            Arg::new("max-bp")
                .long("max-bp")
                .required(true)
                .value_parser(clap::value_parser!(u32))
                .help("Size of the coordinate space"),
        )
        .arg(
            arg!(--format <FORMAT>)
                .required(false)
                .default_value("tsv")
                .help("Output format: tsv or json"),
        )
        .arg(
            arg!(-o --output <OUTPUT>)
                .required(false)
                .help("Output path (default: stdout)"),
        )
}
