//! Tests for the result exporter.

use std::fs;

use super::*;
use crate::schema::{FinalSolution, GreedyStepRecord};
use featurebound_solver::{run_selection, RunOptions};
use featurebound_test::{abc_universe, features, CardinalityEvaluator, ConstantEvaluator};
use serde_json::Value;

fn abc_run() -> RunOutcome {
    run_selection(
        &abc_universe(),
        CardinalityEvaluator::new(3),
        &RunOptions::default(),
    )
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_export_all_writes_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = ResultExporter::new(dir.path());

    let report = exporter.export_all(&abc_run());

    assert!(report.is_success());
    assert_eq!(report.written().count(), 3);
    for artifact in Artifact::ALL {
        assert!(dir.path().join(artifact.default_file_name()).is_file());
    }
}

#[test]
fn test_tree_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = ResultExporter::new(dir.path())
        .export_tree(&abc_run().search)
        .unwrap();

    let tree = read_json(&path);
    let nodes = tree.as_array().unwrap();
    assert_eq!(nodes.len(), 7);

    assert_eq!(nodes[0]["decision"], "ROOT");
    assert_eq!(nodes[0]["parent_id"], -1);
    // The empty root scores the worst sentinel
    assert!(nodes[0]["score"].is_null());

    assert_eq!(nodes[4]["decision"], "INCLUDE c");
    assert_eq!(nodes[4]["status"], "CURRENT_BEST_SOLUTION");
    assert!(nodes[4]["score"].as_f64().unwrap() > 0.33);

    assert_eq!(nodes[6]["status"], "BOUND_PRUNED");
    assert!(nodes[6]["score"].is_null());
}

#[test]
fn test_tree_is_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let path = ResultExporter::new(dir.path())
        .export_tree(&abc_run().search)
        .unwrap();

    let text = fs::read_to_string(path).unwrap();
    assert!(text.starts_with("[\n  {\n    \"id\": 0,"));
}

#[test]
fn test_summary_contents() {
    let dir = tempfile::tempdir().unwrap();
    let run = abc_run();
    let path = ResultExporter::new(dir.path())
        .export_summary(&run.search, &run.metrics)
        .unwrap();

    let summary: RunSummary = serde_json::from_value(read_json(&path)).unwrap();
    match summary.final_solution {
        FinalSolution::Found {
            features: found,
            feature_count,
            r2_score,
        } => {
            assert_eq!(found, features(&["c"]));
            assert_eq!(feature_count, 1);
            assert!((r2_score - 1.0 / 3.0).abs() < 1e-12);
        }
        FinalSolution::Empty {} => panic!("expected a solution"),
    }
    assert_eq!(summary.execution_metrics.nodes_visited, 5);
    assert_eq!(summary.execution_metrics.solutions_found_count, 1);
    assert_eq!(summary.execution_metrics.r2_goal, 0.3);
    assert_eq!(summary.solutions_timeline.len(), 1);
}

#[test]
fn test_infeasible_run_exports_empty_objects() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_selection(
        &abc_universe(),
        ConstantEvaluator::new(0.1),
        &RunOptions::default(),
    );
    let exporter = ResultExporter::new(dir.path());
    assert!(exporter.export_all(&run).is_success());

    let summary = read_json(&exporter.path_for(Artifact::Summary));
    assert_eq!(summary["final_solution"], serde_json::json!({}));
    assert_eq!(summary["solutions_timeline"], serde_json::json!([]));

    let comparison = read_json(&exporter.path_for(Artifact::Comparison));
    assert_eq!(comparison["bnb_optimal"], serde_json::json!({}));
}

#[test]
fn test_comparison_contents() {
    let dir = tempfile::tempdir().unwrap();
    let run = abc_run();
    let path = ResultExporter::new(dir.path())
        .export_comparison(&run.search, &run.greedy)
        .unwrap();

    let comparison: HeuristicComparison = serde_json::from_value(read_json(&path)).unwrap();
    assert!(comparison.bnb_optimal.is_found());
    let counts: Vec<u32> = comparison
        .greedy_heuristic_steps
        .iter()
        .map(|s: &GreedyStepRecord| s.feature_count)
        .collect();
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(
        comparison.greedy_heuristic_steps[2].features,
        features(&["a", "b", "c"])
    );
}

#[test]
fn test_configured_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = OutputConfig {
        directory: dir.path().join("nested"),
        tree_file: "tree.json".to_string(),
        summary_file: "summary.json".to_string(),
        comparison_file: "compare.json".to_string(),
    };
    let exporter = ResultExporter::from_config(&config);

    assert!(exporter.export_all(&abc_run()).is_success());
    assert!(dir.path().join("nested/tree.json").is_file());
    assert!(dir.path().join("nested/summary.json").is_file());
    assert!(dir.path().join("nested/compare.json").is_file());
}

#[test]
fn test_one_failure_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the summary file should go
    fs::create_dir(dir.path().join(Artifact::Summary.default_file_name())).unwrap();

    let report = ResultExporter::new(dir.path()).export_all(&abc_run());

    assert!(!report.is_success());
    let failed: Vec<Artifact> = report.failures().map(|(a, _)| a).collect();
    assert_eq!(failed, vec![Artifact::Summary]);
    assert!(matches!(
        report.get(Artifact::Summary),
        Some(Err(ExportError::Io { .. }))
    ));
    assert!(report.get(Artifact::Tree).unwrap().is_ok());
    assert!(report.get(Artifact::Comparison).unwrap().is_ok());
}

#[test]
fn test_unwritable_directory_fails_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let report = ResultExporter::new(&blocker).export_all(&abc_run());

    assert_eq!(report.failures().count(), 3);
    for (_, err) in report.failures() {
        assert!(err.path().starts_with(&blocker));
    }
}
