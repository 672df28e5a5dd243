//! Integration tests for a full benchmark run over a small data directory.

use approx::assert_relative_eq;
use phenobench::prelude::*;
use phenobench::pipeline::{BIOLOG_RESULTS, ESSENTIALITY_RESULTS, SUMMARY_FILE};
use phenobench::reconstruct::ReconstructionRequest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// glc__D or succ feed g6p, nh4 feeds aa; biomass needs both.
/// Transport of succ needs (b2 and b3) or b4. Succinate uptake is closed in
/// the model's own bounds.
const TOY_MODEL: &str = r#"{
    "id": "toy",
    "metabolites": [
        {"id": "glc__D_e"}, {"id": "succ_e"}, {"id": "nh4_e"}, {"id": "so4_e"},
        {"id": "g6p_c"}, {"id": "aa_c"}
    ],
    "reactions": [
        {"id": "EX_glc__D_e", "metabolites": {"glc__D_e": -1}, "lower_bound": -10, "upper_bound": 1000},
        {"id": "EX_succ_e", "metabolites": {"succ_e": -1}, "lower_bound": 0, "upper_bound": 1000},
        {"id": "EX_nh4_e", "metabolites": {"nh4_e": -1}, "lower_bound": -10, "upper_bound": 1000},
        {"id": "EX_so4_e", "metabolites": {"so4_e": -1}, "lower_bound": -10, "upper_bound": 1000},
        {"id": "GLCt", "metabolites": {"glc__D_e": -1, "g6p_c": 1}, "lower_bound": 0, "gene_reaction_rule": "b1"},
        {"id": "SUCCt", "metabolites": {"succ_e": -1, "g6p_c": 1}, "lower_bound": 0, "gene_reaction_rule": "(b2 and b3) or b4"},
        {"id": "AAS", "metabolites": {"nh4_e": -1, "aa_c": 1}, "lower_bound": 0, "gene_reaction_rule": "b5"},
        {"id": "BIOMASS", "metabolites": {"g6p_c": -1, "aa_c": -1}, "lower_bound": 0, "objective_coefficient": 1}
    ],
    "genes": [{"id": "b1"}, {"id": "b2"}, {"id": "b3"}, {"id": "b4"}, {"id": "b5"}, {"id": "b6"}]
}"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Data directory with two organisms: `ecol` (biolog C and N on M9,
/// essentiality on M9 with an explicit non-essential list) and `mgen`
/// (essential-only screen on the model's default medium).
fn create_data_dir() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "media_db.tsv",
        "medium\tdescription\tcompound\tname\n\
         M9\tMinimal\tglc__D\tGlucose\n\
         M9\tMinimal\tnh4\tAmmonium\n\
         M9\tMinimal\tpi\tPhosphate\n\
         M9\tMinimal\tso4\tSulfate\n\
         LB\tRich\tglc__D\tGlucose\n",
    );
    write(
        root,
        "biolog/ecol/biolog_carbon.tsv",
        "bigg_id\tname\tgrowth\nsucc\tSuccinate\t1\nglc__D\tGlucose\t1\nfru\tFructose\t1\nac\tAcetate\t0\n",
    );
    write(
        root,
        "biolog/ecol/biolog_nitrogen.tsv",
        "bigg_id\tname\tgrowth\nnh4\tAmmonium\t1\nala__L\tAlanine\t0\nurea\tUrea\t1\n",
    );
    write(
        root,
        "essentiality/ecol.tsv",
        "bigg_id\tphenotype\nb1\tE\nb5\tE\nb9\tE\nb2\tNE\nb6\tNE\n",
    );
    write(root, "essentiality/mgen.tsv", "bigg_id\tphenotype\nb1\tE\nb4\tE\n");
    write(root, "fasta/ecoli.faa", ">b1\nMKV\n");
    write(root, "fasta/mgen.faa", ">b1\nMKV\n");
    write(root, "models/ecol.json", TOY_MODEL);
    write(root, "models/mgen.json", TOY_MODEL);

    let yaml = format!(
        r#"name: integration
layout:
  root: '{}'
organisms:
  - id: ecol
    name: Escherichia coli (K-12 MG1655)
    genome: ecoli.faa
    biolog:
      medium: M9
      categories: [C, N]
    essentiality:
      medium: M9
  - id: mgen
    name: Mycoplasma genitalium (G-37)
    genome: mgen.faa
    essentiality:
      medium: null
parallel: true
"#,
        root.display()
    );
    write(root, "benchmark.yaml", &yaml);
    dir
}

fn config(dir: &TempDir) -> BenchmarkConfig {
    BenchmarkConfig::from_file(dir.path().join("benchmark.yaml")).unwrap()
}

fn skip_rebuild() -> RunOptions {
    RunOptions {
        rebuild: false,
        ..RunOptions::default()
    }
}

/// Writes the toy model instead of running an external tool.
struct FixtureReconstructor;

impl Reconstructor for FixtureReconstructor {
    fn reconstruct(&self, request: &ReconstructionRequest) -> Result<PathBuf> {
        assert!(request.genome.exists());
        fs::write(&request.output, TOY_MODEL)?;
        Ok(request.output.clone())
    }
}

#[test]
fn test_full_run() {
    let dir = create_data_dir();
    let benchmark = Benchmark::new(config(&dir)).unwrap();

    let run = benchmark.run(skip_rebuild(), &FixtureReconstructor).unwrap();

    let biolog = run.biolog.unwrap();
    assert_eq!(biolog.table.len(), 7);
    assert_eq!(biolog.score.counts, ConfusionCounts::new(3, 0, 2, 2));
    assert_relative_eq!(biolog.mcc(), 6.0 / 120.0_f64.sqrt(), epsilon = 1e-12);
    assert_eq!(biolog.score.by_category.len(), 2);

    let essentiality = run.essentiality.unwrap();
    // ecol: b9 is not in the model and b3/b4 are unlabeled
    assert_eq!(essentiality.table.for_organism("ecol").count(), 4);
    // mgen: every model gene is labeled
    assert_eq!(essentiality.table.for_organism("mgen").count(), 6);
    assert_eq!(essentiality.score.counts, ConfusionCounts::new(3, 1, 5, 1));
    assert_relative_eq!(essentiality.mcc(), 14.0 / 24.0, epsilon = 1e-12);
    assert!(essentiality.failures.is_empty());

    let results = dir.path().join("results");
    assert!(results.join(BIOLOG_RESULTS).exists());
    assert!(results.join(ESSENTIALITY_RESULTS).exists());
    assert!(results.join(SUMMARY_FILE).exists());
}

#[test]
fn test_result_tables_rescore() {
    let dir = create_data_dir();
    let benchmark = Benchmark::new(config(&dir)).unwrap();
    let run = benchmark.run(skip_rebuild(), &FixtureReconstructor).unwrap();

    let results = dir.path().join("results");
    let biolog = ComparisonTable::from_tsv(results.join(BIOLOG_RESULTS), Assay::Biolog).unwrap();
    let essentiality =
        ComparisonTable::from_tsv(results.join(ESSENTIALITY_RESULTS), Assay::Essentiality).unwrap();

    assert_eq!(biolog, run.biolog.unwrap().table);
    assert_eq!(
        ConfusionCounts::from_records(essentiality.iter()),
        run.essentiality.unwrap().score.counts
    );

    let header = fs::read_to_string(results.join(BIOLOG_RESULTS)).unwrap();
    assert!(header.starts_with("org\tsource\tmet\tvalue\n"));
    assert!(header.contains("ecol\tC\tsucc\tTP"));

    let summary = RunSummary::from_json(results.join(SUMMARY_FILE)).unwrap();
    assert_eq!(summary.name, "integration");
    assert_eq!(summary.organisms, vec!["ecol", "mgen"]);
}

#[test]
fn test_idempotent() {
    let dir = create_data_dir();
    let benchmark = Benchmark::new(config(&dir)).unwrap();

    let first = benchmark.run(skip_rebuild(), &FixtureReconstructor).unwrap();
    let second = benchmark.run(skip_rebuild(), &FixtureReconstructor).unwrap();

    let (a, b) = (first.biolog.unwrap(), second.biolog.unwrap());
    assert_eq!(a.table, b.table);
    assert_eq!(a.score.counts, b.score.counts);
    assert_eq!(a.mcc(), b.mcc());

    let (a, b) = (first.essentiality.unwrap(), second.essentiality.unwrap());
    assert_eq!(a.table, b.table);
    assert_eq!(a.mcc(), b.mcc());
}

#[test]
fn test_rebuild_then_run() {
    let dir = create_data_dir();
    fs::remove_dir_all(dir.path().join("models")).unwrap();
    let benchmark = Benchmark::new(config(&dir)).unwrap();

    let run = benchmark.run(RunOptions::default(), &FixtureReconstructor).unwrap();

    assert!(dir.path().join("models/ecol.json").exists());
    assert!(dir.path().join("models/mgen.json").exists());
    assert_eq!(run.essentiality.unwrap().table.len(), 10);
}

#[test]
fn test_skip_stages() {
    let dir = create_data_dir();
    let benchmark = Benchmark::new(config(&dir)).unwrap();
    let options = RunOptions {
        rebuild: false,
        biolog: false,
        essentiality: true,
    };

    let run = benchmark.run(options, &FixtureReconstructor).unwrap();

    assert!(run.biolog.is_none());
    assert!(run.summary.biolog.is_none());
    assert!(run.essentiality.is_some());
    assert!(!dir.path().join("results").join(BIOLOG_RESULTS).exists());
}

#[test]
fn test_malformed_label_policy() {
    let dir = create_data_dir();
    write(
        dir.path(),
        "biolog/ecol/biolog_nitrogen.tsv",
        "bigg_id\tgrowth\nnh4\t1\nala__L\tmaybe\nurea\t1\n",
    );

    let strict = Benchmark::new(config(&dir)).unwrap();
    let err = strict.run(skip_rebuild(), &FixtureReconstructor).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("ecol"));
    assert!(msg.contains("maybe"));

    let mut lenient_config = config(&dir);
    lenient_config.strict_labels = false;
    let lenient = Benchmark::new(lenient_config).unwrap();
    let run = lenient.run(skip_rebuild(), &FixtureReconstructor).unwrap();
    assert_eq!(run.biolog.unwrap().table.len(), 6);
}

#[test]
fn test_missing_biolog_table_is_fatal() {
    let dir = create_data_dir();
    fs::remove_file(dir.path().join("biolog/ecol/biolog_nitrogen.tsv")).unwrap();
    let benchmark = Benchmark::new(config(&dir)).unwrap();

    let err = benchmark.run(skip_rebuild(), &FixtureReconstructor).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("ecol"));
    assert!(msg.contains("nitrogen"));
}
