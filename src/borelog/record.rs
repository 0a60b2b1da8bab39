//! Bore-log records: one depth interval of one borehole.

use crate::error::{BoreSliceError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Which lithology label column to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LithologyColumn {
    /// Dominant lithology.
    #[default]
    Primary,
    /// Next most significant lithology.
    Secondary,
}

/// One depth interval of one borehole.
///
/// Elevations are AHD (metres above the datum), so the interval top
/// `depth_from_ahd` is numerically greater than or equal to the bottom
/// `depth_to_ahd`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreLogRecord {
    /// Easting of the borehole.
    pub easting: f64,
    /// Northing of the borehole.
    pub northing: f64,
    /// Elevation of the interval top.
    pub depth_from_ahd: f64,
    /// Elevation of the interval bottom.
    pub depth_to_ahd: f64,
    /// Primary lithology label, empty when unresolved.
    #[serde(default)]
    pub primary_lithology: String,
    /// Class number of the primary lithology.
    #[serde(default)]
    pub primary_class: Option<u32>,
    /// Secondary lithology label, empty when unresolved.
    #[serde(default)]
    pub secondary_lithology: String,
    /// Class number of the secondary lithology.
    #[serde(default)]
    pub secondary_class: Option<u32>,
    /// Raw lithological description.
    #[serde(default)]
    pub description: String,
}

impl BoreLogRecord {
    /// Creates an unlabelled record.
    pub fn new(
        easting: f64,
        northing: f64,
        depth_from_ahd: f64,
        depth_to_ahd: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            easting,
            northing,
            depth_from_ahd,
            depth_to_ahd,
            primary_lithology: String::new(),
            primary_class: None,
            secondary_lithology: String::new(),
            secondary_class: None,
            description: description.into(),
        }
    }

    /// Sets the primary lithology label and class number.
    pub fn with_primary(mut self, label: impl Into<String>, class: Option<u32>) -> Self {
        self.primary_lithology = label.into();
        self.primary_class = class;
        self
    }

    /// Label stored in `column`.
    #[inline]
    pub fn lithology(&self, column: LithologyColumn) -> &str {
        match column {
            LithologyColumn::Primary => &self.primary_lithology,
            LithologyColumn::Secondary => &self.secondary_lithology,
        }
    }

    /// Class number stored for `column`.
    #[inline]
    pub fn class(&self, column: LithologyColumn) -> Option<u32> {
        match column {
            LithologyColumn::Primary => self.primary_class,
            LithologyColumn::Secondary => self.secondary_class,
        }
    }

    /// Returns true if the closed interval contains `elevation`.
    #[inline]
    pub fn spans(&self, elevation: f64) -> bool {
        self.depth_from_ahd >= elevation && self.depth_to_ahd <= elevation
    }

    /// Checks that the interval top is not below its bottom.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.depth_from_ahd < self.depth_to_ahd {
            return Err(BoreSliceError::InvalidInterval {
                index,
                from: self.depth_from_ahd,
                to: self.depth_to_ahd,
            });
        }
        Ok(())
    }
}

/// Ordered collection of bore-log records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoreLogTable {
    records: Vec<BoreLogRecord>,
}

impl BoreLogTable {
    /// Creates a table, checking every interval.
    pub fn new(records: Vec<BoreLogRecord>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            record.validate(i)?;
        }
        Ok(Self { records })
    }

    /// Reads a JSON array of records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<BoreLogRecord> = serde_json::from_reader(reader)?;
        Self::new(records)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in order.
    #[inline]
    pub fn records(&self) -> &[BoreLogRecord] {
        &self.records
    }

    /// Mutable rows, for filling label columns.
    #[inline]
    pub fn records_mut(&mut self) -> &mut [BoreLogRecord] {
        &mut self.records
    }

    /// Iterates over rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, BoreLogRecord> {
        self.records.iter()
    }

    /// Keeps rows for which `predicate` holds, in order.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&BoreLogRecord) -> bool,
    {
        Self {
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Raw descriptions in row order.
    pub fn descriptions(&self) -> Vec<String> {
        self.records.iter().map(|r| r.description.clone()).collect()
    }

    /// Highest interval top and lowest interval bottom, if the table has rows.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        if self.records.is_empty() {
            return None;
        }
        let top = self
            .records
            .iter()
            .map(|r| r.depth_from_ahd)
            .fold(f64::NEG_INFINITY, f64::max);
        let bottom = self
            .records
            .iter()
            .map(|r| r.depth_to_ahd)
            .fold(f64::INFINITY, f64::min);
        Some((top, bottom))
    }
}

impl<'a> IntoIterator for &'a BoreLogTable {
    type Item = &'a BoreLogRecord;
    type IntoIter = std::slice::Iter<'a, BoreLogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_closed_interval() {
        let record = BoreLogRecord::new(0.0, 0.0, 10.0, 5.0, "clay");
        assert!(record.spans(7.0));
        assert!(record.spans(10.0));
        assert!(record.spans(5.0));
        assert!(!record.spans(12.0));
        assert!(!record.spans(4.9));
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let records = vec![
            BoreLogRecord::new(0.0, 0.0, 10.0, 5.0, "clay"),
            BoreLogRecord::new(0.0, 0.0, 3.0, 8.0, "sand"),
        ];
        let err = BoreLogTable::new(records).unwrap_err();
        assert!(matches!(err, BoreSliceError::InvalidInterval { index: 1, .. }));
    }

    #[test]
    fn test_label_columns() {
        let mut record = BoreLogRecord::new(1.0, 2.0, 3.0, 2.0, "sandy clay").with_primary("clay", Some(2));
        record.secondary_lithology = "sand".to_string();
        assert_eq!(record.lithology(LithologyColumn::Primary), "clay");
        assert_eq!(record.lithology(LithologyColumn::Secondary), "sand");
        assert_eq!(record.class(LithologyColumn::Primary), Some(2));
        assert_eq!(record.class(LithologyColumn::Secondary), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"easting": 1.0, "northing": 2.0, "depth_from_ahd": 5.0, "depth_to_ahd": 1.0,
             "description": "Sandy CLAY"},
            {"easting": 3.0, "northing": 4.0, "depth_from_ahd": 1.0, "depth_to_ahd": -2.0,
             "primary_lithology": "sand", "primary_class": 0}
        ]"#;
        let table = BoreLogTable::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].primary_lithology, "");
        assert_eq!(table.records()[1].primary_class, Some(0));
        assert_eq!(table.elevation_range(), Some((5.0, -2.0)));
    }

    #[test]
    fn test_empty_table() {
        let table = BoreLogTable::default();
        assert!(table.is_empty());
        assert_eq!(table.elevation_range(), None);
    }
}
