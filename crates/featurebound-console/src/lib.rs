//! Colorful console output for feature selection runs.
//!
//! Provides a custom `tracing` layer that formats run events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (dataset, greedy steps, new best, export)
//! - **WARN**: Early termination, no feasible solution, export failures
//! - **DEBUG**: Bound-pruning decisions and evaluator failures
//! - **TRACE**: Individual node evaluations

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str =
    "featurebound_solver=info,featurebound_data=info,featurebound_export=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing; `RUST_LOG` overrides the
/// default filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SelectionConsoleLayer)
            .try_init();
    });
}

// Marks the start of the run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  __            _                      _                           _
 / _| ___  __ _| |_ _   _ _ __ ___    | |__   ___  _   _ _ __   __| |
| |_ / _ \/ _` | __| | | | '__/ _ \___| '_ \ / _ \| | | | '_ \ / _` |
|  _|  __/ (_| | |_| |_| | | |  __/___| |_) | (_) | |_| | | | | (_| |
|_|  \___|\__,_|\__|\__,_|_|  \___|   |_.__/ \___/ \__,_|_| |_|\__,_|
"#;

    let version_line = format!(
        "                 v{} - Minimum Feature Subset Search\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats run events with colors.
pub struct SelectionConsoleLayer;

impl<S: Subscriber> Layer<S> for SelectionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("featurebound") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    score: Option<String>,
    best_score: Option<String>,
    features: Option<String>,
    added: Option<String>,
    order: Option<String>,
    artifact: Option<String>,
    path: Option<String>,
    target: Option<String>,
    error: Option<String>,
    id: Option<u64>,
    rows: Option<u64>,
    feature_count: Option<u64>,
    nodes_created: Option<u64>,
    nodes_visited: Option<u64>,
    pruned: Option<u64>,
    pending: Option<u64>,
    solutions_found: Option<u64>,
    best_feature_count: Option<u64>,
    steps: Option<u64>,
    evaluations: Option<u64>,
    elapsed_ms: Option<u64>,
    goal: Option<f64>,
    terminated_early: Option<bool>,
}

fn unquote(s: String) -> String {
    s.trim_matches('"').to_string()
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(unquote(s)),
            "score" => self.score = Some(unquote(s)),
            "best_score" => self.best_score = Some(unquote(s)),
            "features" => self.features = Some(s),
            "order" => self.order = Some(unquote(s)),
            "artifact" => self.artifact = Some(unquote(s)),
            "path" => self.path = Some(unquote(s)),
            "error" => self.error = Some(unquote(s)),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "id" => self.id = Some(value),
            "rows" => self.rows = Some(value),
            "feature_count" => self.feature_count = Some(value),
            "nodes_created" => self.nodes_created = Some(value),
            "nodes_visited" => self.nodes_visited = Some(value),
            "pruned" => self.pruned = Some(value),
            "pending" => self.pending = Some(value),
            "solutions_found" => self.solutions_found = Some(value),
            "best_feature_count" => self.best_feature_count = Some(value),
            "steps" => self.steps = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "goal" {
            self.goal = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "terminated_early" {
            self.terminated_early = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "added" => self.added = Some(value.to_string()),
            "target" => self.target = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "dataset_loaded" => format_dataset_loaded(v),
        "run_start" => {
            mark_run_start();
            String::new()
        }
        "greedy_start" => format_greedy_start(v),
        "greedy_step" => format_greedy_step(v),
        "greedy_end" => format_greedy_end(v),
        "search_start" => format_search_start(v),
        "new_best" => format_new_best(v),
        "search_terminated" => format_search_terminated(v),
        "search_end" => format_search_end(v),
        "no_feasible_solution" => format_no_feasible(v),
        "export" => format_export(v, level),
        "bound_pruned" if level == Level::DEBUG => format_bound_pruned(v),
        "node_evaluated" if level == Level::TRACE => format_node_evaluated(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_dataset_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Dataset {} │ {} rows │ {} features │ target {}",
        format_elapsed(),
        "●".bright_blue(),
        v.path.as_deref().unwrap_or("?").white().bold(),
        count(v.rows).bright_yellow(),
        count(v.feature_count).bright_yellow(),
        v.target.as_deref().unwrap_or("?").bright_magenta()
    )
}

fn format_greedy_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} started │ {} candidates",
        format_elapsed(),
        "▶".bright_blue(),
        "Greedy baseline".white().bold(),
        count(v.feature_count).bright_yellow()
    )
}

fn format_greedy_step(v: &EventVisitor) -> String {
    format!(
        "{} {} Step {:>3} │ +{} │ {}",
        format_elapsed(),
        "↑".bright_green(),
        count(v.feature_count).white(),
        v.added.as_deref().unwrap_or("?").bright_white(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_greedy_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} ended │ {} steps │ {} evaluations │ best {}",
        format_elapsed(),
        "◀".bright_blue(),
        "Greedy baseline".white().bold(),
        count(v.steps).white(),
        count(v.evaluations).bright_magenta().bold(),
        format_score(v.best_score.as_deref().unwrap_or("N/A"))
    )
}

fn format_search_start(v: &EventVisitor) -> String {
    let goal = v.goal.unwrap_or(0.0);
    let features = v.feature_count.unwrap_or(0);

    format!(
        "{} {} Branch and bound │ {} features │ goal {} │ up to {} nodes │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.feature_count).bright_yellow(),
        format!("{:.4}", goal).bright_yellow(),
        worst_case_nodes(features).bright_magenta(),
        v.order.as_deref().unwrap_or("ExcludeFirst").bright_black()
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "{} {} New best │ node {} │ {} features │ {} │ {}",
        format_elapsed(),
        "★".bright_yellow().bold(),
        count(v.id).white(),
        count(v.feature_count).bright_green().bold(),
        format_score(v.score.as_deref().unwrap_or("N/A")),
        v.features.as_deref().unwrap_or("[]").bright_white()
    )
}

fn format_search_terminated(v: &EventVisitor) -> String {
    format!(
        "{} {} Search terminated early │ {} nodes │ {} branches abandoned",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        count(v.nodes_created).white(),
        count(v.pending).bright_yellow()
    )
}

fn format_no_feasible(v: &EventVisitor) -> String {
    format!(
        "{} {} No subset reached goal {}; consider a lower goal",
        format_elapsed(),
        "✗".bright_red().bold(),
        format!("{:.4}", v.goal.unwrap_or(0.0)).bright_yellow()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let feasible = v.best_feature_count.is_some();
    let terminated = v.terminated_early.unwrap_or(false);

    let status = match (feasible, terminated) {
        (true, false) => "OPTIMAL".bright_green().bold().to_string(),
        (true, true) => "BEST FOUND".bright_yellow().bold().to_string(),
        (false, _) => "NO SOLUTION".bright_red().bold().to_string(),
    };

    let mut output = format!(
        "{} {} Search complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow(),
        status
    );

    let rows = [
        ("Nodes created:", count(v.nodes_created)),
        ("Nodes evaluated:", count(v.nodes_visited)),
        ("Bound pruned:", count(v.pruned)),
        ("Solutions found:", count(v.solutions_found)),
        (
            "Best feature count:",
            v.best_feature_count
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        ),
    ];

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<20}{:>34}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_export(v: &EventVisitor, level: Level) -> String {
    let artifact = v.artifact.as_deref().unwrap_or("?");
    if level == Level::WARN {
        return format!(
            "{} {} Export {} failed │ {}",
            format_elapsed(),
            "✗".bright_red().bold(),
            artifact.white().bold(),
            v.error.as_deref().unwrap_or("unknown error").bright_red()
        );
    }
    format!(
        "{} {} Exported {} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        artifact.white().bold(),
        v.path.as_deref().unwrap_or("?").bright_black()
    )
}

fn format_bound_pruned(v: &EventVisitor) -> String {
    format!(
        "{} {} Node {:>8} │ {} features │ pruned",
        format_elapsed(),
        "✂".bright_black(),
        count(v.id).bright_black(),
        count(v.feature_count).bright_black()
    )
}

fn format_node_evaluated(v: &EventVisitor) -> String {
    format!(
        "{} {} Node {:>8} │ {} features │ {}",
        format_elapsed(),
        "·".bright_black(),
        count(v.id).bright_black(),
        count(v.feature_count).bright_black(),
        format_score(v.score.as_deref().unwrap_or("N/A")).bright_black()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_score(score: &str) -> String {
    match score.parse::<f64>() {
        Ok(n) if n >= 0.0 => score.bright_green().to_string(),
        Ok(_) => score.yellow().to_string(),
        Err(_) => score.bright_red().to_string(),
    }
}

// Size of the full binary decision tree over `features` features.
fn worst_case_nodes(features: u64) -> String {
    match 2u64.checked_pow(u32::try_from(features).unwrap_or(u32::MAX).saturating_add(1)) {
        Some(n) if features < 63 => (n - 1).to_formatted_string(&Locale::en),
        _ => format!("2^{}", features.saturating_add(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_worst_case_nodes() {
        assert_eq!(worst_case_nodes(0), "1");
        assert_eq!(worst_case_nodes(3), "15");
        assert_eq!(worst_case_nodes(11), "4,095");
        assert_eq!(worst_case_nodes(100), "2^101");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("score_calculated".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_prune_lines_only_at_debug() {
        let visitor = EventVisitor {
            event: Some("bound_pruned".to_string()),
            id: Some(6),
            feature_count: Some(1),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(format_event(&visitor, Level::DEBUG).contains("pruned"));
    }

    #[test]
    fn test_search_end_without_solution() {
        let visitor = EventVisitor {
            event: Some("search_end".to_string()),
            nodes_created: Some(15),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("NO SOLUTION"));
        assert!(output.contains("Best feature count:"));
    }
}
