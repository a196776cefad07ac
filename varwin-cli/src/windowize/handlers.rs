use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;
use clap::ArgMatches;
use log::{info, warn};

use varwin_core::models::AnnotationSet;
use varwin_core::utils::{get_dynamic_reader, read_positions};
use varwin_windowize::{
    AggregationResult, WindowizeConfig, aggregate_annotations_with_policy,
    aggregate_sequence_with_policy, aggregate_variants_with,
};

use crate::output::{OutputFormat, open_output, write_result};
use crate::windowize::cli::ALL_CMD;

/// Look up an optional string argument that not every subcommand defines.
fn optional<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a String> {
    matches.try_get_one::<String>(id).ok().flatten()
}

///
/// Build the windowize settings: the `--config` file if given, then the
/// explicit flags on top of it.
///
pub fn resolve_config(matches: &ArgMatches) -> Result<WindowizeConfig> {
    let window_size = matches.get_one::<u32>("window-size").copied();

    let mut config = match optional(matches, "config") {
        Some(path) => WindowizeConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => {
            let window_size = window_size.ok_or_else(|| {
                anyhow::anyhow!("--window-size is required unless --config is given")
            })?;
            WindowizeConfig::new(window_size)
        }
    };

    if let Some(window_size) = window_size {
        config.window_size = window_size;
    }
    if let Some(max_bp) = matches.get_one::<u32>("max-bp") {
        config.max_bp = Some(*max_bp);
    }
    if let Some(policy) = optional(matches, "on-out-of-range") {
        config.out_of_range = policy.parse()?;
    }
    if let Some(binning) = optional(matches, "binning") {
        config.variant_binning = binning.parse()?;
    }

    Ok(config)
}

///
/// Read one record of a FASTA file as raw bytes.
///
/// # Arguments
/// - path: FASTA file, gzipped if it ends in `.gz`
/// - record_id: id of the record to use; the first record when `None`
///
pub fn read_sequence(path: &str, record_id: Option<&String>) -> Result<Vec<u8>> {
    let reader = get_dynamic_reader(Path::new(path))?;
    let records = fasta::Reader::new(reader).records();

    for record in records {
        let record = record.with_context(|| format!("Failed to parse FASTA file: {}", path))?;
        if record_id.is_none_or(|id| record.id() == id.as_str()) {
            return Ok(record.seq().to_vec());
        }
    }

    match record_id {
        Some(id) => Err(anyhow::anyhow!("Record {} not found in {}", id, path)),
        None => Err(anyhow::anyhow!("No records found in {}", path)),
    }
}

pub fn run_windowize(cmd: &str, matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .expect("--format has a default")
        .parse()?;
    let with_gc = matches
        .try_get_one::<bool>("gc")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false);

    let sequence = optional(matches, "fasta")
        .map(|path| read_sequence(path, optional(matches, "record")))
        .transpose()?;
    let positions = optional(matches, "variants")
        .map(|path| {
            read_positions(Path::new(path))
                .with_context(|| format!("Failed to read variant positions: {}", path))
        })
        .transpose()?;
    let annotations = optional(matches, "annotations")
        .map(|path| {
            AnnotationSet::try_from(path.as_str())
                .with_context(|| format!("Failed to read annotations: {}", path))
        })
        .transpose()?;

    if cmd == ALL_CMD && sequence.is_none() && positions.is_none() && annotations.is_none() {
        return Err(anyhow::anyhow!(
            "`{}` needs at least one of --fasta, --variants or --annotations",
            ALL_CMD
        ));
    }

    // extent of the inputs, used when max_bp is not configured
    let inferred_max_bp = [
        sequence
            .as_ref()
            .map(|s| u32::try_from(s.len()).unwrap_or(u32::MAX)),
        positions.as_ref().and_then(|p| p.iter().copied().max()),
        annotations.as_ref().and_then(|a| a.max_end()),
    ]
    .into_iter()
    .flatten()
    .filter(|&bp| bp > 0)
    .max();

    let table = config.window_table(inferred_max_bp)?;
    info!(
        "Windowizing into {} windows of {} bp (covering 1..={})",
        table.len(),
        table.window_size(),
        table.last_end()
    );

    let mut results: Vec<AggregationResult> = Vec::new();
    if let Some(sequence) = &sequence {
        results.push(
            aggregate_sequence_with_policy(&table, sequence, config.out_of_range)
                .context("Sequence aggregation failed")?,
        );
    }
    if let Some(positions) = &positions {
        results.push(
            aggregate_variants_with(
                &table,
                positions,
                config.variant_binning,
                config.out_of_range,
            )
            .context("Variant aggregation failed")?,
        );
    }
    if let Some(annotations) = &annotations {
        results.push(
            aggregate_annotations_with_policy(&table, &annotations.annotations, config.out_of_range)
                .context("Annotation aggregation failed")?,
        );
    }

    let mut results = results.into_iter();
    let first = results
        .next()
        .ok_or_else(|| anyhow::anyhow!("Nothing to windowize"))?;
    let combined = results.try_fold(first, |acc, next| acc.join(next))?;

    let gc = if with_gc {
        let gc = combined.gc_fraction();
        if gc.is_none() {
            warn!("--gc needs a sequence input; skipping the gc column");
        }
        gc
    } else {
        None
    };

    let mut out = open_output(optional(matches, "output"))?;
    write_result(&combined, gc.as_deref(), format, &mut out)
}
