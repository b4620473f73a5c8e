use serde::Serialize;

pub const N_FEATURES: usize = 11;

/// Column names in the same order as [`PropertyFeatures::to_vec`].
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "CRIM", "ZN", "CHAS", "NOX", "RM", "DIS", "RAD", "TAX", "PTRATIO", "B", "LSTAT",
];

/// Feature vector the regression is fitted on.
///
/// The field order is the column order of the fitted coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyFeatures {
    /// Per capita crime rate by town.
    pub crime_rate: f64,

    /// Proportion of residential land zoned for lots over 25,000 sq. ft.
    pub residential_zoning: f64,

    /// `1.0` if the tract bounds the Charles River, `0.0` otherwise.
    pub near_river: f64,

    /// Nitric oxides concentration, parts per 10 million.
    pub nitric_oxides: f64,

    /// Average number of rooms per dwelling.
    pub rooms: f64,

    /// Weighted distance to five Boston employment centres.
    pub employment_distance: f64,

    /// Index of accessibility to radial highways.
    pub highway_access: f64,

    /// Full-value property tax rate per $10,000.
    pub property_tax: f64,

    /// Pupil-teacher ratio by town.
    pub student_teacher_ratio: f64,

    pub b_index: f64,

    /// Percentage of lower status population.
    pub lower_status: f64,
}

impl PropertyFeatures {
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.crime_rate,
            self.residential_zoning,
            self.near_river,
            self.nitric_oxides,
            self.rooms,
            self.employment_distance,
            self.highway_access,
            self.property_tax,
            self.student_teacher_ratio,
            self.b_index,
            self.lower_status,
        ]
    }

    /// Column-wise arithmetic mean, or `None` for an empty slice.
    #[must_use]
    pub fn mean(all: &[Self]) -> Option<Self> {
        if all.is_empty() {
            return None;
        }
        let n = all.len() as f64;
        let mean = |get: fn(&Self) -> f64| all.iter().map(get).sum::<f64>() / n;
        Some(Self {
            crime_rate: mean(|features| features.crime_rate),
            residential_zoning: mean(|features| features.residential_zoning),
            near_river: mean(|features| features.near_river),
            nitric_oxides: mean(|features| features.nitric_oxides),
            rooms: mean(|features| features.rooms),
            employment_distance: mean(|features| features.employment_distance),
            highway_access: mean(|features| features.highway_access),
            property_tax: mean(|features| features.property_tax),
            student_teacher_ratio: mean(|features| features.student_teacher_ratio),
            b_index: mean(|features| features.b_index),
            lower_status: mean(|features| features.lower_status),
        })
    }

    /// Returns a copy with the caller-controlled fields overridden.
    #[must_use]
    pub fn with_query(mut self, query: &PropertyQuery) -> Self {
        self.rooms = query.rooms;
        self.student_teacher_ratio = query.student_teacher_ratio;
        self.near_river = if query.near_river { 1.0 } else { 0.0 };
        self
    }
}

/// The property fields a caller is allowed to set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyQuery {
    pub rooms: f64,
    pub student_teacher_ratio: f64,
    pub near_river: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(rooms: f64, near_river: f64) -> PropertyFeatures {
        PropertyFeatures {
            crime_rate: 1.0,
            residential_zoning: 2.0,
            near_river,
            nitric_oxides: 0.5,
            rooms,
            employment_distance: 4.0,
            highway_access: 3.0,
            property_tax: 300.0,
            student_teacher_ratio: 18.0,
            b_index: 390.0,
            lower_status: 12.0,
        }
    }

    #[test]
    fn to_vec_follows_names() {
        let vector = features(6.0, 1.0).to_vec();
        let get = |column: &str| {
            vector[FEATURE_NAMES.iter().position(|&name| name == column).unwrap()]
        };
        assert_eq!(vector.len(), FEATURE_NAMES.len());
        assert_eq!(get("RM"), 6.0);
        assert_eq!(get("CHAS"), 1.0);
        assert_eq!(get("PTRATIO"), 18.0);
    }

    #[test]
    fn mean_ok() {
        let mean = PropertyFeatures::mean(&[features(4.0, 0.0), features(8.0, 1.0)]).unwrap();
        assert_eq!(mean, features(6.0, 0.5));
    }

    #[test]
    fn mean_empty() {
        assert_eq!(PropertyFeatures::mean(&[]), None);
    }

    #[test]
    fn with_query_overrides_only_controlled_fields() {
        let baseline = features(6.0, 0.5);
        let query = PropertyQuery {
            rooms: 3.0,
            student_teacher_ratio: 12.0,
            near_river: true,
        };
        let configured = baseline.with_query(&query);
        assert_eq!(configured.rooms, 3.0);
        assert_eq!(configured.student_teacher_ratio, 12.0);
        assert_eq!(configured.near_river, 1.0);
        assert_eq!(configured.property_tax, baseline.property_tax);
        assert_eq!(configured.lower_status, baseline.lower_status);
        assert_eq!(baseline.rooms, 6.0);
    }
}
