//! Historical Boston housing records.
//!
//! The 1970s census table ships inside the binary. Prices (`MEDV`) are in thousands of dollars.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use itertools::Itertools;
use serde::Deserialize;

use crate::math::statistics::median;
use crate::prelude::*;
use crate::property::PropertyFeatures;

const EMBEDDED_CSV: &str = include_str!("../data/boston.csv");

/// A single census tract. Field names follow the original column headers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct HousingRecord {
    pub crim: f64,
    pub zn: f64,

    /// Dropped before fitting.
    pub indus: f64,

    pub chas: f64,
    pub nox: f64,
    pub rm: f64,

    /// Dropped before fitting.
    pub age: f64,

    pub dis: f64,
    pub rad: f64,
    pub tax: f64,
    pub ptratio: f64,
    pub b: f64,
    pub lstat: f64,
    pub medv: f64,
}

impl HousingRecord {
    fn values(&self) -> [f64; 14] {
        [
            self.crim,
            self.zn,
            self.indus,
            self.chas,
            self.nox,
            self.rm,
            self.age,
            self.dis,
            self.rad,
            self.tax,
            self.ptratio,
            self.b,
            self.lstat,
            self.medv,
        ]
    }

    /// Retained feature columns, `INDUS` and `AGE` dropped.
    pub const fn features(&self) -> PropertyFeatures {
        PropertyFeatures {
            crime_rate: self.crim,
            residential_zoning: self.zn,
            near_river: self.chas,
            nitric_oxides: self.nox,
            rooms: self.rm,
            employment_distance: self.dis,
            highway_access: self.rad,
            property_tax: self.tax,
            student_teacher_ratio: self.ptratio,
            b_index: self.b,
            lower_status: self.lstat,
        }
    }
}

/// Immutable in-memory table.
pub struct Dataset {
    records: Vec<HousingRecord>,
}

impl Dataset {
    /// Loads the bundled table.
    #[instrument(level = "debug")]
    pub fn load_embedded() -> Result<Self> {
        Self::from_reader(EMBEDDED_CSV.as_bytes()).context("failed to load the embedded dataset")
    }

    #[instrument(level = "debug", skip_all)]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to load `{}`", path.display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let records: Vec<HousingRecord> = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .deserialize()
            .try_collect()
            .context("failed to parse the records")?;
        Self::new(records)
    }

    pub fn new(records: Vec<HousingRecord>) -> Result<Self> {
        if records.is_empty() {
            bail!("the dataset is empty");
        }
        for (i, record) in records.iter().enumerate() {
            if !record.values().iter().all(|value| value.is_finite()) {
                bail!("record #{} contains a non-finite value", i + 1);
            }
            if record.medv <= 0.0 {
                bail!("record #{} has a non-positive price {}", i + 1, record.medv);
            }
        }
        info!(n_records = records.len(), "loaded");
        Ok(Self { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn features(&self) -> Vec<PropertyFeatures> {
        self.records.iter().map(HousingRecord::features).collect()
    }

    /// Natural logarithm of each price, the regression target.
    #[must_use]
    pub fn log_prices(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.medv.ln()).collect()
    }

    /// Median price, in thousands of 1970s dollars.
    #[must_use]
    pub fn median_price(&self) -> f64 {
        median(self.records.iter().map(|record| record.medv).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "CRIM,ZN,INDUS,CHAS,NOX,RM,AGE,DIS,RAD,TAX,PTRATIO,B,LSTAT,MEDV\n";

    #[test]
    fn load_embedded_ok() -> crate::Result {
        let dataset = Dataset::load_embedded()?;
        assert_eq!(dataset.len(), 506);

        let first = dataset.records[0];
        assert!((first.crim - 0.00632).abs() < f64::EPSILON);
        assert!((first.rm - 6.575).abs() < f64::EPSILON);
        assert!((first.medv - 24.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn median_price_ok() -> crate::Result {
        let dataset = Dataset::load_embedded()?;
        assert!((dataset.median_price() - 21.2).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn features_drop_indus_and_age() -> crate::Result {
        let dataset = Dataset::from_reader(
            format!("{}1,2,3,1,5,6,7,8,9,10,11,12,13,14\n", HEADER).as_bytes(),
        )?;
        let features = dataset.features()[0];
        assert_eq!(
            features.to_vec(),
            vec![1.0, 2.0, 1.0, 5.0, 6.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0],
        );
        assert!((dataset.log_prices()[0] - 14.0_f64.ln()).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn empty_dataset_fails() {
        assert!(Dataset::from_reader(HEADER.as_bytes()).is_err());
    }

    #[test]
    fn non_positive_price_fails() {
        let csv = format!("{}1,2,3,0,5,6,7,8,9,10,11,12,13,0\n", HEADER);
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn non_numeric_value_fails() {
        let csv = format!("{}1,2,3,0,5,six,7,8,9,10,11,12,13,14\n", HEADER);
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_fails() {
        assert!(Dataset::from_path("/nonexistent/boston.csv").is_err());
    }
}
