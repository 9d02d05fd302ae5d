//! Dataset inspection command.

use super::CliError;
use featurebound::TrainingTable;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded.
pub(crate) fn execute(data: PathBuf, target: String, exclude: Vec<String>) -> Result<(), CliError> {
    let table = TrainingTable::from_csv_path(&data, &target, &exclude)?;
    let universe = table.universe();

    println!("Dataset: {}", data.display().bold());
    println!("  Rows:     {}", table.row_count());
    println!("  Target:   {}", table.target_name().bright_magenta());
    println!("  Features: {}", universe.len());
    println!();
    for (index, name) in universe.iter().enumerate() {
        println!("  {:>3}  {}", index, name);
    }
    println!();
    println!(
        "Search tree has at most {} nodes",
        tree_bound(universe.len()).bright_yellow()
    );

    Ok(())
}

fn tree_bound(features: usize) -> String {
    match u32::try_from(features + 1).ok().and_then(|e| 2u128.checked_pow(e)) {
        Some(n) => (n - 1).to_string(),
        None => format!("2^{} - 1", features + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_bound() {
        assert_eq!(tree_bound(0), "1");
        assert_eq!(tree_bound(11), "4095");
        assert_eq!(tree_bound(200), "2^201 - 1");
    }
}
