//! Integration tests for the split and adjust stages.

use gwas_adjust::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const N_TESTS: usize = 1000;

/// Write a combined association export for three traits.
///
/// - GY: the worked example (1e-7 significant, 0 and NaN dropped)
/// - HT: several hits, some ties, values around the threshold
/// - TKW: only invalid p-values
fn write_combined(dir: &Path) -> PathBuf {
    let path = dir.join("mlm_stats.txt");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "Trait\tMarker\tChr\tPos\tdf\tF\tp\tadd_effect").unwrap();

    let gy = [("1e-7", 1), ("0.5", 2), ("0", 3), ("NaN", 4), ("0.0001", 5)];
    for (p, i) in gy {
        writeln!(file, "GY\tsnp{}\t1A\t{}\t1\t3.2\t{}\t0.1", i, i * 1000, p).unwrap();
    }

    let ht = [
        "0.03", "1e-9", "4e-5", "0.03", "5e-5", "0.9", "2e-6", "NA", "0.03", "0.0002", "1",
        "6e-5",
    ];
    for (i, p) in ht.iter().enumerate() {
        writeln!(file, "HT\tsnp{}\t2B\t{}\t1\t1.0\t{}\t-0.2", i + 1, (i + 1) * 500, p).unwrap();
    }

    for (i, p) in ["0", "-1", "inf"].iter().enumerate() {
        writeln!(file, "TKW\tsnp{}\t3D\t\t1\t0.0\t{}\t0.0", i + 1, p).unwrap();
    }
    file.flush().unwrap();
    path
}

struct Run {
    _dir: TempDir,
    out: PathBuf,
    summary: PathBuf,
    outcome: AdjustOutcome,
}

fn run_split_and_adjust(top_n: usize) -> Run {
    let dir = tempdir().unwrap();
    let combined = write_combined(dir.path());
    let traits = dir.path().join("traits");
    split_traits(&combined, &traits, DEFAULT_PREFIX).unwrap();

    let out = dir.path().join("adjusted");
    let summary = dir.path().join("significant_snps.csv");
    let params = RunParameters::new(N_TESTS, top_n).unwrap();
    let options = AdjustOptions::new(&traits, &out, &summary, params);
    let outcome = run_adjust(&options).unwrap();

    Run {
        _dir: dir,
        out,
        summary,
        outcome,
    }
}

fn read_rows(path: &Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            headers
                .iter()
                .zip(r.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

fn num(row: &HashMap<String, String>, column: &str) -> f64 {
    row[column].parse().unwrap()
}

#[test]
fn test_output_files_and_columns() {
    let run = run_split_and_adjust(3);

    for trait_id in ["GY", "HT", "TKW"] {
        assert!(run.out.join(format!("adj_p_{}.csv", trait_id)).is_file());
        assert!(run.out.join(format!("top_3_{}.csv", trait_id)).is_file());
    }

    let mut reader = csv::Reader::from_path(run.out.join("adj_p_GY.csv")).unwrap();
    let headers: Vec<_> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, OUTPUT_COLUMNS.to_vec());
}

#[test]
fn test_worked_example_trait() {
    let run = run_split_and_adjust(10);
    let rows = read_rows(&run.out.join("adj_p_GY.csv"));

    let markers: Vec<_> = rows.iter().map(|r| r["Marker"].as_str()).collect();
    assert_eq!(markers, vec!["snp1", "snp2", "snp5"]);

    let flags: Vec<_> = rows.iter().map(|r| r["significant"].as_str()).collect();
    assert_eq!(flags, vec!["yes", "no", "no"]);
    assert_eq!(rows[0]["Pos"], "1000");
}

#[test]
fn test_all_invalid_trait_writes_headers_only() {
    let run = run_split_and_adjust(5);

    assert!(read_rows(&run.out.join("adj_p_TKW.csv")).is_empty());
    assert!(read_rows(&run.out.join("top_5_TKW.csv")).is_empty());

    let tkw = run
        .outcome
        .report
        .traits
        .iter()
        .find(|t| t.trait_id == "TKW")
        .unwrap();
    assert_eq!(tkw.cleaning.n_input, 3);
    assert_eq!(tkw.rows_written, 0);
    assert_eq!(tkw.significant, 0);
}

#[test]
fn test_correction_properties() {
    let run = run_split_and_adjust(4);
    let threshold = 0.05 / N_TESTS as f64;

    for trait_id in ["GY", "HT"] {
        let mut rows = read_rows(&run.out.join(format!("adj_p_{}.csv", trait_id)));

        for row in &rows {
            let p = num(row, "p");
            let p_bonf = num(row, "p_Bonferroni");

            // Cleaning completeness
            assert!(p.is_finite() && p > 0.0);
            // Bonferroni monotonicity and saturation
            assert!(p_bonf >= p);
            assert!(p_bonf <= 1.0);
            if p >= 1.0 / N_TESTS as f64 {
                assert_eq!(p_bonf, 1.0);
            }
            // Threshold consistency
            assert_eq!(row["significant"] == "yes", p < threshold);
            assert!((num(row, "log10_threshold") - (-threshold.log10())).abs() < 1e-12);
        }

        // FDR monotonicity in p order
        rows.sort_by(|a, b| num(a, "p").partial_cmp(&num(b, "p")).unwrap());
        for pair in rows.windows(2) {
            assert!(num(&pair[0], "p_FDR") <= num(&pair[1], "p_FDR"));
        }
    }
}

#[test]
fn test_top_n_is_smallest() {
    let run = run_split_and_adjust(4);
    let full = read_rows(&run.out.join("adj_p_HT.csv"));
    let top = read_rows(&run.out.join("top_4_HT.csv"));

    assert_eq!(top.len(), 4.min(full.len()));
    let max_top = top.iter().map(|r| num(r, "p")).fold(0.0, f64::max);
    let top_markers: Vec<_> = top.iter().map(|r| r["Marker"].clone()).collect();
    for row in full.iter().filter(|r| !top_markers.contains(&r["Marker"])) {
        assert!(max_top <= num(row, "p"));
    }

    let ps: Vec<_> = top.iter().map(|r| num(r, "p")).collect();
    assert_eq!(ps, vec![1e-9, 2e-6, 4e-5, 5e-5]);

    // GY has fewer rows than top_n.
    let gy_top = read_rows(&run.out.join("top_4_GY.csv"));
    assert_eq!(gy_top.len(), 3);
}

#[test]
fn test_summary_completeness() {
    let run = run_split_and_adjust(10);
    let summary = read_rows(&run.summary);

    let mut expected = Vec::new();
    for trait_id in ["GY", "HT", "TKW"] {
        for row in read_rows(&run.out.join(format!("adj_p_{}.csv", trait_id))) {
            if row["significant"] == "yes" {
                expected.push((row["Trait"].clone(), row["Marker"].clone()));
            }
        }
    }
    let actual: Vec<_> = summary
        .iter()
        .map(|r| (r["Trait"].clone(), r["Marker"].clone()))
        .collect();

    assert_eq!(actual, expected);
    // GY: 1e-7; HT: 1e-9, 4e-5, 2e-6 (5e-5 is not below the threshold)
    assert_eq!(actual.len(), 4);
    assert_eq!(run.outcome.summary.len(), 4);
    assert_eq!(run.outcome.report.summary_rows, 4);
}

#[test]
fn test_reruns_are_byte_identical() {
    let dir = tempdir().unwrap();
    let combined = write_combined(dir.path());
    let traits = dir.path().join("traits");
    split_traits(&combined, &traits, DEFAULT_PREFIX).unwrap();

    let params = RunParameters::new(N_TESTS, 5).unwrap();
    let mut snapshots = Vec::new();
    for run in ["first", "second"] {
        let out = dir.path().join(run);
        let summary = out.join("summary.csv");
        run_adjust(&AdjustOptions::new(&traits, &out, &summary, params)).unwrap();

        let mut files: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        let contents: Vec<_> = files
            .iter()
            .map(|p| (p.file_name().unwrap().to_owned(), fs::read(p).unwrap()))
            .collect();
        snapshots.push(contents);
    }

    assert_eq!(snapshots[0], snapshots[1]);
}

#[test]
fn test_empty_summary_has_header() {
    let dir = tempdir().unwrap();
    let traits = dir.path().join("traits");
    fs::create_dir(&traits).unwrap();
    fs::write(
        traits.join("mlm_stats_GY.csv"),
        "Trait,Marker,Chr,Pos,p\nGY,snp1,1A,10,0.4\nGY,snp2,1A,20,0.02\n",
    )
    .unwrap();

    let summary = dir.path().join("summary.csv");
    let params = RunParameters::new(N_TESTS, 10).unwrap();
    run_adjust(&AdjustOptions::new(&traits, dir.path().join("out"), &summary, params)).unwrap();

    let content = fs::read_to_string(&summary).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("\"Trait\""));
}

#[test]
fn test_missing_input_dir() {
    let dir = tempdir().unwrap();
    let params = RunParameters::new(N_TESTS, 10).unwrap();
    let options = AdjustOptions::new(
        dir.path().join("absent"),
        dir.path().join("out"),
        dir.path().join("summary.csv"),
        params,
    );

    assert!(matches!(
        run_adjust(&options),
        Err(GwasError::InputDirNotFound(_))
    ));
    assert!(!dir.path().join("summary.csv").exists());
}

#[test]
fn test_config_driven_pipeline() {
    let dir = tempdir().unwrap();
    write_combined(dir.path());
    let config_path = dir.path().join("pipeline.yaml");
    fs::write(
        &config_path,
        "\
name: integration
trait_split:
  input: mlm_stats.txt
  output_dir: traits
trait_adjust:
  output_dir: adjusted
  summary_file: significant_snps.csv
  n_tests: 1000
  top_n: 2
  report: adjust_report.json
",
    )
    .unwrap();

    let config = PipelineConfig::from_file(&config_path).unwrap();
    let outcome = Pipeline::from_config(config).run(None, false).unwrap();

    assert_eq!(outcome.split.as_ref().unwrap().len(), 3);
    let adjust = outcome.adjust.unwrap();
    assert_eq!(adjust.summary.len(), 4);
    assert!(dir.path().join("adjusted").join("top_2_HT.csv").is_file());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("adjust_report.json")).unwrap())
            .unwrap();
    assert_eq!(report["summary_rows"], 4);
    assert_eq!(report["traits"].as_array().unwrap().len(), 3);
}

#[test]
fn test_selected_stage_runs_alone() {
    let dir = tempdir().unwrap();
    write_combined(dir.path());
    let config_path = dir.path().join("pipeline.yaml");
    fs::write(
        &config_path,
        "\
trait_split:
  input: mlm_stats.txt
  output_dir: traits
trait_adjust:
  output_dir: adjusted
  summary_file: significant_snps.csv
  n_tests: 1000
  top_n: 2
",
    )
    .unwrap();
    let pipeline = Pipeline::from_config(PipelineConfig::from_file(&config_path).unwrap());

    let split_only = select_stages(&["trait_split"]).unwrap();
    let outcome = pipeline.run(Some(split_only.as_slice()), false).unwrap();
    assert_eq!(outcome.split.as_ref().unwrap().len(), 3);
    assert!(outcome.adjust.is_none());
    assert!(dir.path().join("traits").join("mlm_stats_GY.csv").is_file());
    assert!(!dir.path().join("adjusted").exists());
    assert!(!dir.path().join("significant_snps.csv").exists());

    // The adjust stage picks up the split output on a later, separate run.
    let adjust_only = select_stages(&["trait_adjust"]).unwrap();
    let outcome = pipeline.run(Some(adjust_only.as_slice()), false).unwrap();
    assert!(outcome.split.is_none());
    assert_eq!(outcome.adjust.unwrap().summary.len(), 4);
}
