use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::banding::EvaluationBand;
use super::criteria::CriterionId;
use super::ratings::RatingSet;
use super::scorecard::Scorecard;

/// Identifier wrapper for coaching evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Medical representative being coached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeRef {
    pub employee_id: String,
    pub name: String,
}

/// Payload posted by the double-visit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub representative: RepresentativeRef,
    pub supervisor: String,
    pub visit_date: NaiveDate,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub ratings: BTreeMap<CriterionId, f64>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Persisted shape. Ratings live under their backing field names, as the backend stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvaluation {
    pub id: EvaluationId,
    pub representative: RepresentativeRef,
    pub supervisor: String,
    pub visit_date: NaiveDate,
    pub doctor: Option<String>,
    pub comments: Option<String>,
    pub rubric_version: u16,
    pub scores: Map<String, Value>,
}

impl StoredEvaluation {
    pub fn ratings(&self) -> RatingSet {
        RatingSet::restore(&self.scores)
    }
}

/// A stored evaluation together with its hydrated ratings and derived scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedRecord {
    pub id: EvaluationId,
    pub representative: RepresentativeRef,
    pub supervisor: String,
    pub visit_date: NaiveDate,
    pub doctor: Option<String>,
    pub comments: Option<String>,
    pub rubric_version: u16,
    pub ratings: RatingSet,
    pub scorecard: Scorecard,
}

impl EvaluatedRecord {
    pub fn from_stored(stored: StoredEvaluation) -> Self {
        let ratings = stored.ratings();
        let scorecard = Scorecard::from_ratings(&ratings);
        Self {
            id: stored.id,
            representative: stored.representative,
            supervisor: stored.supervisor,
            visit_date: stored.visit_date,
            doctor: stored.doctor,
            comments: stored.comments,
            rubric_version: stored.rubric_version,
            ratings,
            scorecard,
        }
    }

    pub fn summary_view(&self) -> EvaluationSummaryView {
        EvaluationSummaryView {
            id: self.id.clone(),
            employee_id: self.representative.employee_id.clone(),
            visit_date: self.visit_date,
            supervisor: self.supervisor.clone(),
            grand_total: self.scorecard.grand_total,
            band: self.scorecard.band,
            label: self.scorecard.label,
        }
    }
}

/// Row of a representative's evaluation history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummaryView {
    pub id: EvaluationId,
    pub employee_id: String,
    pub visit_date: NaiveDate,
    pub supervisor: String,
    pub grand_total: f64,
    pub band: EvaluationBand,
    pub label: &'static str,
}
