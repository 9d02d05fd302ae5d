//! End-to-end runs from a CSV file to the three JSON artifacts.

use std::fs;
use std::path::Path;

use featurebound::{
    select_features, Artifact, DataError, NodeStatus, PipelineError, SelectionConfig,
};
use serde_json::Value;

// quality == x1; x2 and x3 are orthogonal to each other and only weakly
// correlated with the target (R² 0.048 and 0.190, 0.238 together).
const WINE: &str = "\
Id,x1,x2,x3,quality
1,1,1,1,1
2,2,-1,1,2
3,3,1,-1,3
4,4,-1,-1,4
5,5,1,1,5
6,6,-1,1,6
7,7,1,-1,7
8,8,-1,-1,8
";

fn setup(dir: &Path) -> SelectionConfig {
    let csv = dir.join("wine.csv");
    fs::write(&csv, WINE).unwrap();
    let mut config = SelectionConfig::new()
        .with_dataset_path(&csv)
        .with_goal(0.3);
    config.output.directory = dir.join("out");
    config
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_selects_single_feature() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let result = select_features(&config).unwrap();

    assert_eq!(result.row_count, 8);
    assert_eq!(result.feature_count, 3);
    let best = result.run.search.final_solution.as_ref().unwrap();
    assert_eq!(best.features, vec!["x1".to_string()]);
    assert!(best.score.value() > 0.999);

    // Exclude-first visits x3 and x2 subsets before x1; nothing is pruned
    assert_eq!(result.run.search.node_count(), 9);
    assert_eq!(result.run.search.count_by_status(NodeStatus::BoundPruned), 0);
    assert_eq!(result.run.metrics.nodes_visited, 9);

    assert_eq!(result.run.greedy[0].features, vec!["x1".to_string()]);
    assert!(result.report.is_success());
}

#[test]
fn test_artifacts_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    select_features(&config).unwrap();

    let out = dir.path().join("out");
    for artifact in Artifact::ALL {
        assert!(out.join(artifact.default_file_name()).is_file());
    }

    let summary = read_json(&out.join("export_bnb_summary.json"));
    assert_eq!(summary["final_solution"]["features"][0], "x1");
    assert_eq!(summary["final_solution"]["feature_count"], 1);
    assert_eq!(summary["execution_metrics"]["r2_goal"], 0.3);
    assert_eq!(summary["execution_metrics"]["solutions_found_count"], 1);

    let tree = read_json(&out.join("export_bnb_tree.json"));
    // The Id column is never a feature
    for node in tree.as_array().unwrap() {
        let features = node["features"].as_array().unwrap();
        assert!(features.iter().all(|f| f != "Id"));
    }
}

#[test]
fn test_unreachable_goal_reports_no_solution() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path()).with_goal(1.5);

    let result = select_features(&config).unwrap();

    assert!(result.run.search.final_solution.is_none());
    assert_eq!(result.run.search.node_count(), 15);
    let summary = read_json(&dir.path().join("out/export_bnb_summary.json"));
    assert_eq!(summary["final_solution"], serde_json::json!({}));
}

#[test]
fn test_missing_dataset_path() {
    let err = select_features(&SelectionConfig::new()).unwrap_err();
    assert!(matches!(err, PipelineError::MissingDataset));
}

#[test]
fn test_missing_target_column() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    config.dataset.target = "price".to_string();

    let err = select_features(&config).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Data(DataError::MissingTargetColumn(ref name)) if name == "price"
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path()).with_goal(f64::NAN);
    let err = select_features(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}
