//! Practice analytics dashboard.
//!
//! The dashboard shows fixed demonstration datasets. Filters can be edited and applied, but
//! applying them only records the selection; the datasets stay as they are.

use crate::value::{FormValue, Record};
use crate::{IntakeError, IntakeResult};
use serde::Serialize;

/// Filter keys, in the order the dashboard shows them.
pub const FILTER_KEYS: [&str; 6] = [
    "diagnosis",
    "duration",
    "ageRange",
    "gender",
    "occupation",
    "location",
];

/// The dashboard's filter selection. A blank filter means "any".
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalyticsFilters {
    fields: Record,
}

impl Default for AnalyticsFilters {
    fn default() -> Self {
        Self {
            fields: FILTER_KEYS.iter().map(|key| (*key, "")).collect(),
        }
    }
}

impl AnalyticsFilters {
    /// A copy of the filters with `key` set to `value`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidInput` for a key that is not a dashboard filter.
    pub fn with_filter(&self, key: &str, value: &str) -> IntakeResult<Self> {
        if !FILTER_KEYS.contains(&key) {
            return Err(IntakeError::InvalidInput(format!(
                "unknown analytics filter '{key}'"
            )));
        }
        Ok(Self {
            fields: self.fields.with(key, FormValue::from(value.trim())),
        })
    }

    pub fn get(&self, key: &str) -> &str {
        self.fields.text(key)
    }

    /// Filters with a value, in display order.
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        FILTER_KEYS
            .iter()
            .map(|key| (*key, self.get(key)))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosisCount {
    pub name: &'static str,
    pub count: u32,
    pub percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroup {
    pub age_group: &'static str,
    pub male: u32,
    pub female: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenderShare {
    pub name: &'static str,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: &'static str,
    pub patients: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatistics {
    pub total_patients: u32,
    pub this_month: u32,
    pub female_percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub diagnoses: Vec<DiagnosisCount>,
    pub age_distribution: Vec<AgeGroup>,
    pub gender: Vec<GenderShare>,
    pub monthly_trends: Vec<MonthlyCount>,
    pub filters: AnalyticsFilters,
}

impl Dashboard {
    pub fn sample() -> Self {
        let diagnosis = |name, count, percentage| DiagnosisCount {
            name,
            count,
            percentage,
        };
        let ages = |age_group, male, female| AgeGroup {
            age_group,
            male,
            female,
        };
        let month = |month, patients| MonthlyCount { month, patients };

        Self {
            diagnoses: vec![
                diagnosis("Contact Dermatitis", 45, 35),
                diagnosis("Eczema", 32, 25),
                diagnosis("Psoriasis", 20, 15),
                diagnosis("Acne", 18, 14),
                diagnosis("Fungal Infections", 14, 11),
            ],
            age_distribution: vec![
                ages("0-18", 12, 15),
                ages("19-35", 25, 28),
                ages("36-50", 20, 18),
                ages("51-65", 15, 12),
                ages("65+", 8, 10),
            ],
            gender: vec![
                GenderShare {
                    name: "Female",
                    value: 83,
                },
                GenderShare {
                    name: "Male",
                    value: 80,
                },
            ],
            monthly_trends: vec![
                month("Jan", 45),
                month("Feb", 52),
                month("Mar", 48),
                month("Apr", 61),
                month("May", 55),
                month("Jun", 67),
            ],
            filters: AnalyticsFilters::default(),
        }
    }

    pub fn key_statistics(&self) -> KeyStatistics {
        let total_patients: u32 = self.gender.iter().map(|g| g.value).sum();
        let female: u32 = self
            .gender
            .iter()
            .filter(|g| g.name == "Female")
            .map(|g| g.value)
            .sum();
        let female_percentage = if total_patients == 0 {
            0
        } else {
            (f64::from(female) * 100.0 / f64::from(total_patients)).round() as u32
        };

        KeyStatistics {
            total_patients,
            this_month: self.monthly_trends.last().map_or(0, |m| m.patients),
            female_percentage,
        }
    }

    /// Record `filters` as the dashboard's selection.
    pub fn apply(&mut self, filters: AnalyticsFilters) {
        tracing::info!(active = ?filters.active(), "applying analytics filters");
        self.filters = filters;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_statistics_from_sample() {
        let stats = Dashboard::sample().key_statistics();
        assert_eq!(
            stats,
            KeyStatistics {
                total_patients: 163,
                this_month: 67,
                female_percentage: 51,
            }
        );
    }

    #[test]
    fn test_empty_dashboard_statistics() {
        let mut dashboard = Dashboard::sample();
        dashboard.gender.clear();
        dashboard.monthly_trends.clear();
        let stats = dashboard.key_statistics();
        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.this_month, 0);
        assert_eq!(stats.female_percentage, 0);
    }

    #[test]
    fn test_filters_are_copy_on_write() {
        let blank = AnalyticsFilters::default();
        let filtered = blank
            .with_filter("gender", "F")
            .and_then(|f| f.with_filter("location", " Bangalore "))
            .expect("known filters");

        assert_eq!(filtered.active(), [("gender", "F"), ("location", "Bangalore")]);
        assert!(blank.active().is_empty());
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let err = AnalyticsFilters::default()
            .with_filter("income", "high")
            .expect_err("not a filter");
        assert!(matches!(err, IntakeError::InvalidInput(_)));
    }

    #[test]
    fn test_apply_keeps_datasets() {
        let mut dashboard = Dashboard::sample();
        let filters = AnalyticsFilters::default()
            .with_filter("diagnosis", "eczema")
            .expect("known filter");

        dashboard.apply(filters.clone());

        assert_eq!(dashboard.filters, filters);
        assert_eq!(dashboard.diagnoses, Dashboard::sample().diagnoses);
        assert_eq!(dashboard.key_statistics().total_patients, 163);
    }

    #[test]
    fn test_filters_serialize_as_flat_mapping() {
        let json = serde_json::to_value(AnalyticsFilters::default()).expect("serializes");
        assert_eq!(json["ageRange"], "");
        assert_eq!(json.as_object().map(|o| o.len()), Some(6));
    }
}
