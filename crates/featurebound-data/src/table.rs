//! CSV training table.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use featurebound_core::FeatureUniverse;
use tracing::info;

use crate::error::DataError;

/// A numeric training table: one target column plus candidate features.
///
/// Feature columns keep the order they have in the source header; that
/// order becomes the [`FeatureUniverse`] order of the run.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    universe: FeatureUniverse,
    columns: Vec<Vec<f64>>,
    target_name: String,
    target: Vec<f64>,
}

impl TrainingTable {
    /// Loads a table from a CSV file with a header row.
    ///
    /// Every column other than `target` and those listed in `exclude`
    /// becomes a candidate feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, the target
    /// column is absent, a cell is not a finite number, or there are no rows.
    pub fn from_csv_path(
        path: impl AsRef<Path>,
        target: &str,
        exclude: &[String],
    ) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file), target, exclude)?;

        info!(
            event = "dataset_loaded",
            path = %path.display(),
            rows = table.row_count() as u64,
            feature_count = table.universe.len() as u64,
            target = table.target_name.as_str(),
        );
        Ok(table)
    }

    /// Loads a table from any CSV source with a header row.
    pub fn from_reader<R: Read>(
        reader: R,
        target: &str,
        exclude: &[String],
    ) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let target_index = headers
            .iter()
            .position(|h| h == target)
            .ok_or_else(|| DataError::MissingTargetColumn(target.to_string()))?;

        let feature_indices: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(i, name)| *i != target_index && !exclude.contains(*name))
            .map(|(i, _)| i)
            .collect();

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); feature_indices.len()];
        let mut target_values = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            target_values.push(parse_cell(&record, &headers, target_index, row)?);
            for (slot, &index) in feature_indices.iter().enumerate() {
                columns[slot].push(parse_cell(&record, &headers, index, row)?);
            }
        }

        let feature_names = feature_indices.iter().map(|&i| headers[i].clone());
        Self::from_columns(feature_names, columns, target, target_values)
    }

    /// Builds a table from in-memory columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a column length differs from
    /// the target length, a value is NaN or infinite, or feature names are
    /// blank or duplicated.
    pub fn from_columns<I, S>(
        feature_names: I,
        columns: Vec<Vec<f64>>,
        target_name: &str,
        target: Vec<f64>,
    ) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let universe = FeatureUniverse::new(feature_names)?;
        if target.is_empty() {
            return Err(DataError::EmptyTable);
        }
        if universe.len() != columns.len() {
            return Err(DataError::RaggedColumn {
                column: "<feature list>".to_string(),
                expected: universe.len(),
                actual: columns.len(),
            });
        }
        for (name, column) in universe.iter().zip(&columns) {
            if column.len() != target.len() {
                return Err(DataError::RaggedColumn {
                    column: name.to_string(),
                    expected: target.len(),
                    actual: column.len(),
                });
            }
            check_finite(name, column)?;
        }
        check_finite(target_name, &target)?;

        Ok(Self {
            universe,
            columns,
            target_name: target_name.to_string(),
            target,
        })
    }

    /// Returns the candidate features in header order.
    pub fn universe(&self) -> &FeatureUniverse {
        &self.universe
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.target.len()
    }

    /// Returns the target column name.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Returns the target values.
    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Returns the values of a feature column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.universe
            .index_of(name)
            .map(|index| self.columns[index].as_slice())
    }
}

/// Rows are reported 1-based, counting data rows only.
fn check_finite(column: &str, values: &[f64]) -> Result<(), DataError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DataError::NonFinite {
            column: column.to_string(),
            row: index + 1,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn parse_cell(
    record: &csv::StringRecord,
    headers: &[String],
    index: usize,
    row: usize,
) -> Result<f64, DataError> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<f64>().map_err(|_| DataError::NonNumeric {
        column: headers[index].clone(),
        row: row + 1,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WINE: &str = "\
fixed acidity,alcohol,sulphates,quality,Id
7.4,9.4,0.56,5,0
7.8,9.8,0.68,5,1
11.2,9.8,0.58,6,2
";

    fn exclude_id() -> Vec<String> {
        vec!["Id".to_string()]
    }

    #[test]
    fn test_from_reader_splits_target_and_features() {
        let table = TrainingTable::from_reader(WINE.as_bytes(), "quality", &exclude_id()).unwrap();

        let features: Vec<&str> = table.universe().iter().collect();
        assert_eq!(features, vec!["fixed acidity", "alcohol", "sulphates"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.target(), &[5.0, 5.0, 6.0]);
        assert_eq!(table.column("alcohol"), Some(&[9.4, 9.8, 9.8][..]));
        assert_eq!(table.column("Id"), None);
        assert_eq!(table.target_name(), "quality");
    }

    #[test]
    fn test_missing_target_column() {
        let err = TrainingTable::from_reader(WINE.as_bytes(), "price", &exclude_id()).unwrap_err();
        assert!(matches!(err, DataError::MissingTargetColumn(ref c) if c == "price"));
    }

    #[test]
    fn test_non_numeric_cell() {
        let csv = "a,quality\n1.0,5\nabc,6\n";
        let err = TrainingTable::from_reader(csv.as_bytes(), "quality", &[]).unwrap_err();
        match err {
            DataError::NonNumeric { column, row, value } => {
                assert_eq!(column, "a");
                assert_eq!(row, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_cells_rejected() {
        let csv = "x,z,quality\n1,NaN,1\n2,1,2\n3,inf,4\n4,2,3\n";
        let err = TrainingTable::from_reader(csv.as_bytes(), "quality", &[]).unwrap_err();
        match err {
            DataError::NonFinite { column, row, value } => {
                assert_eq!(column, "z");
                assert_eq!(row, 1);
                assert!(value.is_nan());
            }
            other => panic!("unexpected error: {other}"),
        }

        let csv = "x,quality\n1,2\n2,-inf\n";
        let err = TrainingTable::from_reader(csv.as_bytes(), "quality", &[]).unwrap_err();
        assert!(matches!(
            err,
            DataError::NonFinite { ref column, row: 2, value } if column == "quality" && value == f64::NEG_INFINITY
        ));
    }

    #[test]
    fn test_from_columns_rejects_non_finite() {
        let err = TrainingTable::from_columns(["a"], vec![vec![1.0, f64::INFINITY]], "y", vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, DataError::NonFinite { row: 2, .. }));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let err = TrainingTable::from_reader("a,quality\n".as_bytes(), "quality", &[]).unwrap_err();
        assert!(matches!(err, DataError::EmptyTable));
    }

    #[test]
    fn test_target_only_gives_empty_universe() {
        let table = TrainingTable::from_reader("quality\n5\n6\n".as_bytes(), "quality", &[]).unwrap();
        assert!(table.universe().is_empty());
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = TrainingTable::from_csv_path("no/such/wine.csv", "quality", &[]).unwrap_err();
        assert!(matches!(err, DataError::FileNotFound(_)));
    }

    #[test]
    fn test_from_csv_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WINE.as_bytes()).unwrap();

        let table = TrainingTable::from_csv_path(file.path(), "quality", &exclude_id()).unwrap();
        assert_eq!(table.universe().len(), 3);
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = TrainingTable::from_columns(["a"], vec![vec![1.0]], "y", vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, DataError::RaggedColumn { .. }));
    }

    #[test]
    fn test_from_columns_rejects_duplicate_names() {
        let err = TrainingTable::from_columns(
            ["a", "a"],
            vec![vec![1.0], vec![2.0]],
            "y",
            vec![1.0],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Features(_)));
    }
}
