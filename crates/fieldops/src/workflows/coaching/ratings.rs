use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use super::criteria::{self, Criterion, CriterionId};

/// How intake treats a rating outside its criterion's scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingPolicy {
    /// Out-of-range or off-grid values are errors.
    #[default]
    Reject,
    /// Values are clamped to `[0, max]` and rounded to the nearest half point.
    Clamp,
}

impl RatingPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "clamp" => Some(Self::Clamp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("rating for {criterion:?} is not a finite number")]
    NotFinite { criterion: CriterionId },
    #[error("rating {value} for {criterion:?} is outside 0..={max}")]
    OutOfRange {
        criterion: CriterionId,
        value: f64,
        max: f64,
    },
    #[error("rating {value} for {criterion:?} is not a multiple of 0.5")]
    OffGrid { criterion: CriterionId, value: f64 },
}

/// A validated score held as a count of half points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating {
    half_points: u8,
}

impl Rating {
    pub const ZERO: Rating = Rating { half_points: 0 };

    pub fn for_criterion(
        criterion: &Criterion,
        value: f64,
        policy: RatingPolicy,
    ) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite {
                criterion: criterion.id,
            });
        }

        let doubled = match policy {
            RatingPolicy::Reject => {
                if value < 0.0 || value > criterion.max_score {
                    return Err(RatingError::OutOfRange {
                        criterion: criterion.id,
                        value,
                        max: criterion.max_score,
                    });
                }
                let doubled = value * 2.0;
                if doubled.fract() != 0.0 {
                    return Err(RatingError::OffGrid {
                        criterion: criterion.id,
                        value,
                    });
                }
                doubled
            }
            RatingPolicy::Clamp => (value.clamp(0.0, criterion.max_score) * 2.0).round(),
        };

        Ok(Self {
            half_points: doubled as u8,
        })
    }

    pub fn value(self) -> f64 {
        f64::from(self.half_points) / 2.0
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Ratings keyed by criterion. Absent criteria read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatingSet {
    ratings: BTreeMap<CriterionId, Rating>,
}

impl RatingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores<I>(scores: I, policy: RatingPolicy) -> Result<Self, RatingError>
    where
        I: IntoIterator<Item = (CriterionId, f64)>,
    {
        let mut set = Self::new();
        for (id, value) in scores {
            set.set(id, value, policy)?;
        }
        Ok(set)
    }

    /// Builds a set from a persisted score object, copying only numeric values stored under
    /// known backing field names.
    pub fn hydrate(fields: &Map<String, Value>, policy: RatingPolicy) -> Result<Self, RatingError> {
        let mut set = Self::new();
        for (criterion, value) in numeric_fields(fields) {
            let rating = Rating::for_criterion(criterion, value, policy)?;
            set.ratings.insert(criterion.id, rating);
        }
        Ok(set)
    }

    /// Re-reads persisted scores. Values off the current scale are clamped onto it and logged
    /// rather than failing the record.
    pub fn restore(fields: &Map<String, Value>) -> Self {
        let mut set = Self::new();
        for (criterion, value) in numeric_fields(fields) {
            match Rating::for_criterion(criterion, value, RatingPolicy::Clamp) {
                Ok(rating) => {
                    if rating.value() != value {
                        warn!(
                            criterion = ?criterion.id,
                            stored = value,
                            restored = rating.value(),
                            "stored rating outside rubric scale"
                        );
                    }
                    set.ratings.insert(criterion.id, rating);
                }
                Err(error) => warn!(%error, "skipping unreadable stored rating"),
            }
        }
        set
    }

    pub fn set(
        &mut self,
        id: CriterionId,
        value: f64,
        policy: RatingPolicy,
    ) -> Result<Rating, RatingError> {
        let rating = Rating::for_criterion(criteria::criterion(id), value, policy)?;
        self.ratings.insert(id, rating);
        Ok(rating)
    }

    pub fn rating(&self, id: CriterionId) -> Rating {
        self.ratings.get(&id).copied().unwrap_or(Rating::ZERO)
    }

    pub fn get(&self, id: CriterionId) -> f64 {
        self.rating(id).value()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CriterionId, Rating)> + '_ {
        self.ratings.iter().map(|(id, rating)| (*id, *rating))
    }

    /// Persisted shape: backing field name to numeric rating.
    pub fn to_fields(&self) -> Map<String, Value> {
        self.iter()
            .map(|(id, rating)| {
                (
                    criteria::criterion(id).field.to_string(),
                    Value::from(rating.value()),
                )
            })
            .collect()
    }
}

fn numeric_fields(
    fields: &Map<String, Value>,
) -> impl Iterator<Item = (&'static Criterion, f64)> + '_ {
    criteria::CRITERIA.iter().filter_map(move |criterion| {
        fields
            .get(criterion.field)
            .and_then(Value::as_f64)
            .map(|value| (criterion, value))
    })
}
