use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{BaselineDataset, ReferenceDataset, SignalSet};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while reading the input files.
///
/// Only [`LoadError::Missing`] gets special treatment (fixed message, exit
/// code 1); the rest bubble up unhandled.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("{}:{line}: '{token}' is not a number", .file.display())]
    BadNumber {
        file: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: expected 5 columns, found {found}", .file.display())]
    ShortRow {
        file: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("reading {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Single-column files (baseline dataset)
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::Missing(path.to_path_buf()),
        _ => LoadError::Io {
            file: path.to_path_buf(),
            source,
        },
    })
}

fn parse_value(token: &str, file: &Path, line: usize) -> Result<f64, LoadError> {
    token.parse().map_err(|_| LoadError::BadNumber {
        file: file.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

/// Load one waveform from a file holding one float per line.
pub fn load_series(path: &Path) -> Result<Vec<f64>, LoadError> {
    let text = read_file(path)?;
    text.lines()
        .enumerate()
        .map(|(i, line)| parse_value(line.trim(), path, i + 1))
        .collect()
}

// ---------------------------------------------------------------------------
// Tabular reference file
// ---------------------------------------------------------------------------

/// Load the pa9 results table.
///
/// Rows are whitespace-separated floats `[time, phi1, phi2, phi4, phi5]`;
/// the first and last lines are a header and a footer and are skipped.
/// Extra columns are parsed but ignored.
pub fn load_reference(path: &Path) -> Result<ReferenceDataset, LoadError> {
    let text = read_file(path)?;
    let lines: Vec<&str> = text.lines().collect();

    let mut dataset = ReferenceDataset::default();
    if lines.len() <= 2 {
        return Ok(dataset);
    }

    for (i, row) in lines[1..lines.len() - 1].iter().enumerate() {
        let line = i + 2;
        let values: Vec<f64> = row
            .split_whitespace()
            .map(|token| parse_value(token, path, line))
            .collect::<Result<_, _>>()?;
        if values.len() < 5 {
            return Err(LoadError::ShortRow {
                file: path.to_path_buf(),
                line,
                found: values.len(),
            });
        }
        dataset.t.push(values[0]);
        dataset.phi1.push(values[1]);
        dataset.phi2.push(values[2]);
        dataset.phi4.push(values[3]);
        dataset.phi5.push(values[4]);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load both datasets from `dir` and pair them up.
///
/// File names are fixed; there is no way to relocate them.
pub fn load_all(dir: &Path) -> Result<SignalSet, LoadError> {
    let baseline = BaselineDataset {
        t: load_series(&dir.join("t.txt"))?,
        phi1: load_series(&dir.join("phi1.txt"))?,
        phi2: load_series(&dir.join("phi2.txt"))?,
        phi4: load_series(&dir.join("phi4.txt"))?,
        phi5: load_series(&dir.join("phi5.txt"))?,
    };
    let reference = load_reference(&dir.join("results_new.txt"))?;
    Ok(SignalSet::pair(baseline, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_baseline(dir: &Path) {
        fs::write(dir.join("t.txt"), "0.0\n1.0\n").unwrap();
        for name in ["phi1.txt", "phi2.txt", "phi4.txt", "phi5.txt"] {
            fs::write(dir.join(name), "1.0\n2.0\n").unwrap();
        }
    }

    fn write_reference(dir: &Path) {
        fs::write(
            dir.join("results_new.txt"),
            "time phi1 phi2 phi4 phi5\n\
             0.0 1.0 2.0 3.0 4.0\n\
             1.0 5.0 6.0 7.0 8.0\n\
             end of results\n",
        )
        .unwrap();
    }

    #[test]
    fn loads_and_pairs_both_datasets() {
        let dir = tempdir().unwrap();
        write_baseline(dir.path());
        write_reference(dir.path());

        let set = load_all(dir.path()).unwrap();
        assert_eq!(set.baseline_t, vec![0.0, 1.0]);
        assert_eq!(set.reference_t, vec![0.0, 1.0]);
        for entry in &set.entries {
            assert_eq!(entry.baseline.len(), 2);
            assert_eq!(entry.reference.len(), 2);
        }
        // columns land positionally
        assert_eq!(set.entries[0].reference, vec![1.0, 5.0]);
        assert_eq!(set.entries[1].reference, vec![2.0, 6.0]);
        assert_eq!(set.entries[2].reference, vec![3.0, 7.0]);
        assert_eq!(set.entries[3].reference, vec![4.0, 8.0]);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        write_baseline(dir.path());
        write_reference(dir.path());
        fs::remove_file(dir.path().join("phi4.txt")).unwrap();

        let err = load_all(dir.path()).unwrap_err();
        match err {
            LoadError::Missing(path) => assert!(path.ends_with("phi4.txt")),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn malformed_number_names_line_and_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phi1.txt");
        fs::write(&path, "1.0\nabc\n").unwrap();

        let err = load_series(&path).unwrap_err();
        match err {
            LoadError::BadNumber { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn short_reference_row_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results_new.txt");
        fs::write(&path, "header\n0.0 1.0 2.0\nfooter\n").unwrap();

        let err = load_reference(&path).unwrap_err();
        match err {
            LoadError::ShortRow { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected ShortRow, got {other:?}"),
        }
    }

    #[test]
    fn reference_without_data_rows_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results_new.txt");
        fs::write(&path, "header\nfooter\n").unwrap();

        let dataset = load_reference(&path).unwrap();
        assert!(dataset.t.is_empty());
        assert!(dataset.phi1.is_empty());
    }

    #[test]
    fn extra_reference_columns_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results_new.txt");
        fs::write(&path, "header\n0.0 1.0 2.0 3.0 4.0 99.0\nfooter\n").unwrap();

        let dataset = load_reference(&path).unwrap();
        assert_eq!(dataset.t, vec![0.0]);
        assert_eq!(dataset.phi5, vec![4.0]);
    }
}
