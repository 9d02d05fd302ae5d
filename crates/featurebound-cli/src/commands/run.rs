//! Selection run command implementation.

use super::CliError;
use featurebound::{
    select_features, Artifact, BranchOrderType, GreedyStep, SelectionConfig, SelectionRun,
};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Arguments of the `run` command. Flags override the config file.
#[derive(clap::Args, Debug)]
pub(crate) struct RunArgs {
    /// TOML or YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV dataset with a header row
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Target column name
    #[arg(short, long)]
    target: Option<String>,

    /// Minimum R² a subset must reach
    #[arg(short, long)]
    goal: Option<f64>,

    /// Directory for the JSON artifacts
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop the search after this many seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Stop the search after this many nodes
    #[arg(long)]
    node_limit: Option<u64>,

    /// Explore the include branch before the exclude branch
    #[arg(long)]
    include_first: bool,

    /// Skip the greedy baseline
    #[arg(long)]
    no_greedy: bool,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration or dataset is invalid, or if any
/// artifact failed to export.
pub(crate) fn execute(args: RunArgs) -> Result<(), CliError> {
    let config = build_config(&args)?;

    if !args.quiet {
        featurebound::console::init();
    }

    let result = select_features(&config)?;
    print_summary(&result);

    let failures: Vec<String> = result
        .report
        .failures()
        .map(|(_, e)| e.to_string())
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} artifact(s) failed to export: {}",
            failures.len(),
            failures.join("; ")
        )))
    }
}

fn build_config(args: &RunArgs) -> Result<SelectionConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => SelectionConfig::load(path)?,
        None => SelectionConfig::new(),
    };

    if let Some(data) = &args.data {
        config.dataset.path = Some(data.clone());
    }
    if let Some(target) = &args.target {
        config.dataset.target = target.clone();
    }
    if let Some(goal) = args.goal {
        config.search.goal = goal;
    }
    if let Some(output) = &args.output {
        config.output.directory = output.clone();
    }
    if let Some(seconds) = args.time_limit {
        config.search.time_limit_seconds = Some(seconds);
    }
    if let Some(nodes) = args.node_limit {
        config.search.node_limit = Some(nodes);
    }
    if args.include_first {
        config.search.branch_order = BranchOrderType::IncludeFirst;
    }
    if args.no_greedy {
        config.greedy.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(result: &SelectionRun) {
    let search = &result.run.search;
    let metrics = &result.run.metrics;

    println!();
    match &search.final_solution {
        Some(best) => {
            println!(
                "{} {} of {} features reach R² {:.4} (goal {})",
                "Optimal:".bright_green().bold(),
                best.feature_count(),
                result.feature_count,
                best.score.value(),
                metrics.goal
            );
            println!("  {}", best.features.join(", "));
        }
        None => {
            println!(
                "{} no subset reaches R² {}; try a lower goal",
                "No solution:".bright_red().bold(),
                metrics.goal
            );
        }
    }
    if search.terminated_early {
        println!(
            "  {}",
            "search stopped early; the result may not be optimal".yellow()
        );
    }

    if !result.run.greedy.is_empty() {
        println!();
        println!("{}", "Greedy baseline:".bold());
        for step in &result.run.greedy {
            print_greedy_step(step);
        }
    }

    println!();
    println!(
        "{} nodes evaluated, {} created, {} solutions in {:.3}s",
        metrics.nodes_visited,
        search.node_count(),
        metrics.solutions_found,
        metrics.elapsed_seconds()
    );
    for artifact in Artifact::ALL {
        if let Some(Ok(path)) = result.report.get(artifact) {
            println!("  {} {}", "wrote".bright_black(), path.display());
        }
    }
}

fn print_greedy_step(step: &GreedyStep) {
    let score = step
        .score
        .finite()
        .map_or_else(|| "-".to_string(), |s| format!("{s:.4}"));
    println!(
        "  {:>3}  {}  {}",
        step.feature_count(),
        score,
        step.features.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> RunArgs {
        let mut argv = vec!["featurebound"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().run
    }

    #[test]
    fn test_defaults_without_config() {
        let config = build_config(&parse(&[])).unwrap();
        assert_eq!(config, SelectionConfig::new());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "--data",
            "wine.csv",
            "--target",
            "price",
            "--goal",
            "0.45",
            "--output",
            "out",
            "--node-limit",
            "500",
            "--include-first",
            "--no-greedy",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.dataset.path, Some(PathBuf::from("wine.csv")));
        assert_eq!(config.dataset.target, "price");
        assert_eq!(config.search.goal, 0.45);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.search.node_limit, Some(500));
        assert_eq!(config.search.branch_order, BranchOrderType::IncludeFirst);
        assert!(!config.greedy.enabled);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.toml");
        fs::write(
            &path,
            "[dataset]\npath = \"from_file.csv\"\n\n[search]\ngoal = 0.2\ntime_limit_seconds = 30\n",
        )
        .unwrap();

        let config_arg = path.to_string_lossy().to_string();
        let args = parse(&["--config", &config_arg, "--goal", "0.35"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.dataset.path, Some(PathBuf::from("from_file.csv")));
        assert_eq!(config.search.goal, 0.35);
        assert_eq!(config.search.time_limit_seconds, Some(30));
    }

    #[test]
    fn test_zero_node_limit_rejected() {
        let err = build_config(&parse(&["--node-limit", "0"])).unwrap_err();
        assert!(err.to_string().contains("search.node_limit"));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(build_config(&parse(&["--config", "/nonexistent/selection.toml"])).is_err());
    }
}
