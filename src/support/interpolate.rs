//! Monotone time-table interpolation with strict domain handling.
//!
//! The user-supplied temperature profile and the external-simulator output
//! are both "time versus value" tables sampled at arbitrary instants by the
//! simulation loop. [`TimeTable`] validates the table once at construction
//! (at least two points, strictly increasing time, finite entries), is exact
//! at the supplied knots, interpolates linearly between them, and treats any
//! query outside the supplied domain as a typed error rather than silently
//! extrapolating.

use thiserror::Error;

/// Errors from constructing, parsing, or sampling a [`TimeTable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A table needs at least two points to interpolate.
    #[error("table has {count} points; at least 2 are required")]
    TooFewPoints { count: usize },

    /// Time entries must be strictly increasing.
    #[error("time entries must be strictly increasing (violated at row {index})")]
    NonIncreasingTime { index: usize },

    /// Entries must be finite numbers.
    #[error("non-finite entry at row {index}")]
    NonFinite { index: usize },

    /// The query lies outside the supplied time domain.
    #[error("query time {time} is outside the table domain [{min}, {max}]")]
    OutOfDomain { time: f64, min: f64, max: f64 },

    /// A data line is missing the requested column.
    #[error("line {line} has no column {column}")]
    MissingColumn { line: usize, column: usize },

    /// A token could not be parsed as a number.
    #[error("line {line}: cannot parse {text:?} as a number")]
    InvalidNumber { line: usize, text: String },
}

/// A strictly-increasing time/value table with linear interpolation.
///
/// Units are the caller's convention; the reservoir models that use this
/// type document theirs (years and degrees Celsius).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTable {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl TimeTable {
    /// Builds a table from `(time, value)` points.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if fewer than two points are supplied, any
    /// entry is non-finite, or times are not strictly increasing.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, TableError> {
        let (times, values): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        if times.len() < 2 {
            return Err(TableError::TooFewPoints { count: times.len() });
        }
        for (index, (&t, &v)) in times.iter().zip(&values).enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(TableError::NonFinite { index });
            }
            if index > 0 && t <= times[index - 1] {
                return Err(TableError::NonIncreasingTime { index });
            }
        }

        Ok(Self { times, values })
    }

    /// Parses whitespace-delimited column text.
    ///
    /// Column 0 is time; `value_column` selects the value channel (commonly 1).
    /// Blank lines and lines starting with `#` are skipped; extra columns are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] for malformed lines or an invalid resulting
    /// table.
    pub fn parse_columns(text: &str, value_column: usize) -> Result<Self, TableError> {
        let mut points = Vec::new();
        for (line_index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let time = parse_field(&fields, 0, line_index)?;
            let value = parse_field(&fields, value_column, line_index)?;
            points.push((time, value));
        }
        Self::new(points)
    }

    /// The first time in the table.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.times[0]
    }

    /// The last time in the table.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Samples the table at `time`.
    ///
    /// Exact at knots; linear between them.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfDomain`] outside the supplied time range
    /// (including NaN queries).
    pub fn sample(&self, time: f64) -> Result<f64, TableError> {
        let (min, max) = (self.start(), self.end());
        if !time.is_finite() || time < min || time > max {
            return Err(TableError::OutOfDomain { time, min, max });
        }

        match self.times.binary_search_by(|probe| probe.total_cmp(&time)) {
            Ok(index) => Ok(self.values[index]),
            Err(index) => {
                // `index` is the first knot above `time`; domain check
                // guarantees 1 <= index < len.
                let (t0, t1) = (self.times[index - 1], self.times[index]);
                let (v0, v1) = (self.values[index - 1], self.values[index]);
                let fraction = (time - t0) / (t1 - t0);
                Ok(v0 + fraction * (v1 - v0))
            }
        }
    }
}

fn parse_field(fields: &[&str], column: usize, line_index: usize) -> Result<f64, TableError> {
    let text = fields
        .get(column)
        .ok_or(TableError::MissingColumn {
            line: line_index + 1,
            column,
        })?;
    text.parse().map_err(|_| TableError::InvalidNumber {
        line: line_index + 1,
        text: (*text).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn table() -> TimeTable {
        TimeTable::new([(0.0, 150.0), (10.0, 140.0), (30.0, 100.0)]).unwrap()
    }

    #[test]
    fn exact_at_knots() {
        let table = table();
        assert_relative_eq!(table.sample(0.0).unwrap(), 150.0);
        assert_relative_eq!(table.sample(10.0).unwrap(), 140.0);
        assert_relative_eq!(table.sample(30.0).unwrap(), 100.0);
    }

    #[test]
    fn linear_between_knots() {
        let table = table();
        assert_relative_eq!(table.sample(5.0).unwrap(), 145.0);
        assert_relative_eq!(table.sample(20.0).unwrap(), 120.0);
    }

    #[test]
    fn out_of_domain_is_an_error() {
        let table = table();
        assert!(matches!(
            table.sample(-0.1),
            Err(TableError::OutOfDomain { .. })
        ));
        assert!(matches!(
            table.sample(30.1),
            Err(TableError::OutOfDomain { .. })
        ));
        assert!(matches!(
            table.sample(f64::NAN),
            Err(TableError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(matches!(
            TimeTable::new([(0.0, 1.0)]),
            Err(TableError::TooFewPoints { count: 1 })
        ));
        assert!(matches!(
            TimeTable::new([(0.0, 1.0), (0.0, 2.0)]),
            Err(TableError::NonIncreasingTime { index: 1 })
        ));
        assert!(matches!(
            TimeTable::new([(0.0, 1.0), (1.0, f64::NAN)]),
            Err(TableError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn parses_column_text() {
        let text = "# time[yr]  T[degC]  flow\n0.0  170.0  40.0\n\n15.0  160.5  40.0\n30.0  149.0  39.0\n";
        let table = TimeTable::parse_columns(text, 1).unwrap();
        assert_relative_eq!(table.sample(0.0).unwrap(), 170.0);
        assert_relative_eq!(table.sample(30.0).unwrap(), 149.0);
        assert_relative_eq!(table.sample(22.5).unwrap(), 154.75);
    }

    #[test]
    fn parse_reports_bad_lines() {
        assert!(matches!(
            TimeTable::parse_columns("0.0 10.0\n1.0", 1),
            Err(TableError::MissingColumn { line: 2, column: 1 })
        ));
        assert!(matches!(
            TimeTable::parse_columns("0.0 abc\n1.0 2.0", 1),
            Err(TableError::InvalidNumber { line: 1, .. })
        ));
    }
}
