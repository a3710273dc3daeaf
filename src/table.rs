//! Two-column numeric tables (`x y` per row) and their text loader.
//!
//! ```text
//! # r [bohr]   V [hartree]
//! 4.0          0.0213
//! 4.5          -0.0021
//! 5.0          -0.0154
//! ```
//!
//! Blank lines and comments are skipped. Every other row must hold exactly two
//! finite numbers.

use std::{fs, path::Path, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    knot::Knot,
};

const IN_MEMORY_SOURCE: &str = "<memory>";

/// Layout of a table file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableFormat {
    /// Field separator. `None` splits on any run of whitespace.
    pub delimiter: Option<char>,
    /// Everything from this character to the end of a row is ignored.
    pub comment: char,
}

impl Default for TableFormat {
    fn default() -> Self {
        TableFormat { delimiter: None, comment: '#' }
    }
}

/// Ordered sequence of samples, in the order they were read.
#[derive(Debug, Clone)]
pub struct SampleTable {
    knots: Vec<Knot>,
}

impl SampleTable {
    pub fn new(knots: Vec<Knot>) -> Self {
        SampleTable { knots }
    }

    /// Builds a table from separate `x` and `y` columns.
    /// # Errors
    /// [Error::Parse] when the columns differ in length.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::Parse {
                source_name: IN_MEMORY_SOURCE.to_string(),
                line: 0,
                message: format!("column lengths differ: {} x values, {} y values", xs.len(), ys.len()),
            });
        }
        let knots = xs.iter().zip(ys).map(|(x, y)| Knot::new(*x, *y)).collect();
        Ok(SampleTable { knots })
    }

    /// Reads a whitespace separated table from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &TableFormat::default())
    }

    /// Reads a table from `path` using the given layout.
    /// # Errors
    /// - [Error::NotFound] when the file cannot be read,
    /// - [Error::Parse] on the first malformed row.
    pub fn load_with<P: AsRef<Path>>(path: P, format: &TableFormat) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let table = parse_rows(&content, format, &path.display().to_string())?;
        debug!("loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parses table text that is already in memory.
    pub fn parse(content: &str, format: &TableFormat) -> Result<Self> {
        parse_rows(content, format, IN_MEMORY_SOURCE)
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn xs(&self) -> Vec<f64> {
        self.knots.iter().map(|k| k.get_x()).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.knots.iter().map(|k| k.get_y()).collect()
    }

    /// Smallest and largest `x`, or `None` for an empty table.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let mut xs = self.knots.iter().map(|k| k.get_x());
        let first = xs.next()?;
        Some(xs.fold((first, first), |(min, max), x| (min.min(x), max.max(x))))
    }

    /// True when `x` is strictly increasing.
    pub fn is_sorted(&self) -> bool {
        self.knots.windows(2).all(|w| w[0].get_x() < w[1].get_x())
    }

    /// Same samples ordered by `x`. Rows with equal `x` keep their file order.
    pub fn sorted(mut self) -> Self {
        self.knots.sort();
        self
    }

    pub(crate) fn into_knots(self) -> Vec<Knot> {
        self.knots
    }
}

impl FromStr for SampleTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, &TableFormat::default())
    }
}

fn parse_rows(content: &str, format: &TableFormat, source_name: &str) -> Result<SampleTable> {
    let mut knots = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = match raw_line.find(format.comment) {
            Some(position) => &raw_line[..position],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parse_error = |message: String| Error::Parse {
            source_name: source_name.to_string(),
            line: idx + 1,
            message,
        };

        let fields: Vec<&str> = match format.delimiter {
            Some(delimiter) => line.split(delimiter).map(str::trim).collect(),
            None => line.split_whitespace().collect(),
        };
        if fields.len() != 2 {
            return Err(parse_error(format!("expected 2 fields, found {} in '{}'", fields.len(), line)));
        }

        let x = parse_field(fields[0]).map_err(|m| parse_error(format!("invalid x value: {}", m)))?;
        let y = parse_field(fields[1]).map_err(|m| parse_error(format!("invalid y value: {}", m)))?;
        knots.push(Knot::new(x, y));
    }

    Ok(SampleTable { knots })
}

fn parse_field(field: &str) -> std::result::Result<f64, String> {
    let value: f64 = field.parse().map_err(|_| format!("'{}' is not a number", field))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not finite", field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whitespace_table() {
        let table: SampleTable = "4.0   0.0213\n4.5\t-2.1e-3\n  5.0 -0.0154  \n".parse().unwrap();

        assert_eq!(3, table.len());
        assert_eq!(vec![4.0, 4.5, 5.0], table.xs());
        assert_eq!(vec![0.0213, -0.0021, -0.0154], table.ys());
        assert!(table.is_sorted());
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let content = "# r V\n\n1.0 2.0 # first\n\n   # indented comment\n2.0 3.0\n";
        let table: SampleTable = content.parse().unwrap();

        assert_eq!(2, table.len());
        assert_eq!(vec![2.0, 3.0], table.ys());
    }

    #[test]
    fn test_custom_delimiter() {
        let format = TableFormat { delimiter: Some(','), comment: '%' };
        let table = SampleTable::parse("% header\n1.0, 10.0\n2.0 ,20.0\n", &format).unwrap();

        assert_eq!(vec![1.0, 2.0], table.xs());
        assert_eq!(vec![10.0, 20.0], table.ys());
    }

    #[test]
    fn test_single_field_row_is_parse_error() {
        let err = "0.0 0.0\n1.0\n2.0 4.0\n".parse::<SampleTable>().unwrap_err();

        match err {
            Error::Parse { source_name, line, .. } => {
                assert_eq!(IN_MEMORY_SOURCE, source_name);
                assert_eq!(2, line);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_three_field_row_is_parse_error() {
        let err = "0.0 0.0 1.0\n".parse::<SampleTable>().unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_non_numeric_and_non_finite_fields() {
        assert!(matches!("1.0 abc\n".parse::<SampleTable>(), Err(Error::Parse { .. })));
        assert!(matches!("NaN 1.0\n".parse::<SampleTable>(), Err(Error::Parse { .. })));
        assert!(matches!("1.0 inf\n".parse::<SampleTable>(), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = SampleTable::load("definitely/not/a/table").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_from_columns() {
        let table = SampleTable::from_columns(&[3.0, 1.0, 2.0], &[30.0, 10.0, 20.0]).unwrap();

        assert!(!table.is_sorted());
        assert_eq!(Some((1.0, 3.0)), table.x_range());

        let sorted = table.sorted();
        assert!(sorted.is_sorted());
        assert_eq!(vec![10.0, 20.0, 30.0], sorted.ys());

        assert!(SampleTable::from_columns(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table: SampleTable = "# nothing here\n".parse().unwrap();

        assert!(table.is_empty());
        assert_eq!(None, table.x_range());
    }
}
