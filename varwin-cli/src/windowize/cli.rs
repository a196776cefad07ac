use clap::{Arg, ArgAction, Command, arg};

pub const SEQUENCE_CMD: &str = "sequence";
pub const VARIANTS_CMD: &str = "variants";
pub const ANNOTATIONS_CMD: &str = "annotations";
pub const ALL_CMD: &str = "all";

/// Options shared by every windowize subcommand.
fn with_window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("window-size")
            .long("window-size")
            .short('w')
            .required(false)
            .value_parser(clap::value_parser!(u32))
            .help("Window size in base pairs (required unless set in --config)"),
    )
    .arg(
        Arg::new("max-bp")
            .long("max-bp")
            .required(false)
            .value_parser(clap::value_parser!(u32))
            .help("Size of the coordinate space (default: extent of the inputs)"),
    )
    .arg(
        arg!(-c --config <CONFIG>)
            .required(false)
            .help("TOML file with window_size, max_bp, out_of_range and variant_binning"),
    )
    .arg(
        Arg::new("on-out-of-range")
            .long("on-out-of-range")
            .required(false)
            .help("What to do with coordinates past the last window: fail or drop"),
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

fn fasta_arg(required: bool) -> Arg {
    arg!(-f --fasta <FASTA>)
        .required(required)
        .help("FASTA file holding the sequence (optionally gzipped)")
}

fn record_arg() -> Arg {
    arg!(--record <RECORD>)
        .required(false)
        .help("Id of the FASTA record to use (default: the first record)")
}

fn gc_arg() -> Arg {
    Arg::new("gc")
        .long("gc")
        .action(ArgAction::SetTrue)
        .help("Append the G/C fraction of unambiguous bases per window")
}

fn variants_arg(required: bool) -> Arg {
    arg!(-v --variants <VARIANTS>)
        .required(required)
        .help("Variant positions: a VCF or one 1-based position per line (optionally gzipped)")
}

fn binning_arg() -> Arg {
    Arg::new("binning")
        .long("binning")
        .required(false)
        .help("Variant binning: single-step (sorted input, forward cursor) or direct")
}

fn annotations_arg(required: bool) -> Arg {
    arg!(-a --annotations <ANNOTATIONS>)
        .required(required)
        .help("Annotated intervals: BED, or GTF/GFF by extension (optionally gzipped)")
}

pub fn create_sequence_cli() -> Command {
    with_window_args(
        Command::new(SEQUENCE_CMD)
            .about("Count A, C, G, T, N and other symbols per window.")
            .arg_required_else_help(true)
            .arg(fasta_arg(true))
            .arg(record_arg())
            .arg(gc_arg()),
    )
}

pub fn create_variants_cli() -> Command {
    with_window_args(
        Command::new(VARIANTS_CMD)
            .about("Count variant positions per window.")
            .arg_required_else_help(true)
            .arg(variants_arg(true))
            .arg(binning_arg()),
    )
}

pub fn create_annotations_cli() -> Command {
    with_window_args(
        Command::new(ANNOTATIONS_CMD)
            .about("Count annotated (genic) positions per window.")
            .arg_required_else_help(true)
            .arg(annotations_arg(true)),
    )
}

pub fn create_all_cli() -> Command {
    with_window_args(
        Command::new(ALL_CMD)
            .about("Run every aggregation for which an input is given over one window table.")
            .arg_required_else_help(true)
            .arg(fasta_arg(false))
            .arg(record_arg())
            .arg(gc_arg())
            .arg(variants_arg(false))
            .arg(binning_arg())
            .arg(annotations_arg(false)),
    )
}
