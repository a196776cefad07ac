use std::io::Write;
use std::thread;

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::Builder;

use varwin_core::models::{Annotation, AnnotationSet, WindowTable};
use varwin_core::utils::read_positions;
use varwin_windowize::{
    OutOfRangePolicy, VariantBinning, WindowizeConfig, aggregate_annotations,
    aggregate_annotations_with_policy, aggregate_sequence, aggregate_sequence_with_policy,
    aggregate_variants, aggregate_variants_with,
};

#[fixture]
fn sequence() -> Vec<u8> {
    // 23 bp, two ambiguity codes and a gap
    b"ACGTacgtNNRYACGT-ACGTAC".to_vec()
}

#[rstest]
fn test_all_aggregations_share_one_table(sequence: Vec<u8>) {
    let table = WindowTable::build(10, 23).unwrap();

    let composition = aggregate_sequence(&table, &sequence).unwrap();
    let density = aggregate_variants(&table, &[2, 4, 12, 21, 22]).unwrap();
    let genic = aggregate_annotations(&table, &[Annotation::new(8, 14)]).unwrap();

    let combined = composition.join(density).unwrap().join(genic).unwrap();
    assert_eq!(
        combined.column_names(),
        vec!["A", "C", "G", "T", "N", "other", "variants", "genic"]
    );
    assert_eq!(combined.column("A"), Some(&[2, 2, 1][..]));
    assert_eq!(combined.column("N"), Some(&[2, 0, 0][..]));
    assert_eq!(combined.column("other"), Some(&[0, 3, 0][..]));
    assert_eq!(combined.column("variants"), Some(&[2, 1, 2][..]));
    assert_eq!(combined.column("genic"), Some(&[3, 4, 0][..]));

    // table columns are untouched by aggregation
    assert_eq!(combined.table(), &table);
}

#[rstest]
fn test_aggregators_run_concurrently_over_shared_table(sequence: Vec<u8>) {
    let table = WindowTable::build(5, 23).unwrap();
    let annotations = vec![Annotation::new(1, 7), Annotation::new(3, 12)];

    let (composition, density, genic) = thread::scope(|s| {
        let c = s.spawn(|| aggregate_sequence(&table, &sequence));
        let d = s.spawn(|| aggregate_variants(&table, &[1, 6, 11, 16, 21]));
        let g = s.spawn(|| aggregate_annotations(&table, &annotations));
        (
            c.join().unwrap().unwrap(),
            d.join().unwrap().unwrap(),
            g.join().unwrap().unwrap(),
        )
    });

    assert_eq!(composition, aggregate_sequence(&table, &sequence).unwrap());
    assert_eq!(density.column("variants"), Some(&[1, 1, 1, 1, 1][..]));
    assert_eq!(genic.column("genic"), Some(&[5, 5, 2, 0, 0][..]));
}

#[rstest]
fn test_gc_fraction_from_composition(sequence: Vec<u8>) {
    let table = WindowTable::build(10, 23).unwrap();
    let composition = aggregate_sequence(&table, &sequence).unwrap();

    let gc = composition.gc_fraction().unwrap();
    assert_eq!(gc[0], Some(0.5));
    assert_eq!(gc.len(), 3);
}

#[rstest]
fn test_drop_policy_never_fails(sequence: Vec<u8>) {
    let table = WindowTable::build(5, 9).unwrap(); // covers 1..=10

    let composition =
        aggregate_sequence_with_policy(&table, &sequence, OutOfRangePolicy::Drop).unwrap();
    let total: u32 = composition
        .columns()
        .iter()
        .flat_map(|c| c.values.iter())
        .sum();
    assert_eq!(total, 10);

    let density = aggregate_variants_with(
        &table,
        &[9, 10, 11, 50],
        VariantBinning::Direct,
        OutOfRangePolicy::Drop,
    )
    .unwrap();
    assert_eq!(density.column("variants"), Some(&[0, 2][..]));

    let genic = aggregate_annotations_with_policy(
        &table,
        &[Annotation::new(8, 30)],
        OutOfRangePolicy::Drop,
    )
    .unwrap();
    assert_eq!(genic.column("genic"), Some(&[0, 3][..]));
}

#[rstest]
fn test_inputs_loaded_from_files() {
    let mut vcf = Builder::new().suffix(".vcf").tempfile().unwrap();
    writeln!(vcf, "##fileformat=VCFv4.2").unwrap();
    writeln!(vcf, "#CHROM\tPOS\tID\tREF\tALT").unwrap();
    for pos in [1, 3, 5, 6, 9, 11] {
        writeln!(vcf, "chr1\t{}\t.\tA\tC", pos).unwrap();
    }

    let mut bed = Builder::new().suffix(".bed").tempfile().unwrap();
    writeln!(bed, "chr1\t4\t25\tgene1").unwrap();

    let positions = read_positions(vcf.path()).unwrap();
    let annotations = AnnotationSet::try_from(bed.path()).unwrap();

    let config = WindowizeConfig::new(5);
    let inferred = positions.iter().copied().max().max(annotations.max_end());
    let table = config.window_table(inferred).unwrap();
    assert_eq!(table.max_bp(), 25);

    let density = aggregate_variants(&table, &positions).unwrap();
    assert_eq!(density.column("variants"), Some(&[3, 2, 1, 0, 0, 0][..]));

    let genic = aggregate_annotations(&table, &annotations.annotations).unwrap();
    assert_eq!(genic.column("genic"), Some(&[1, 5, 5, 5, 5, 0][..]));
}
