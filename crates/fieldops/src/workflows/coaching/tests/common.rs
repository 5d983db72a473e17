use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::CoachingConfig;
use crate::workflows::coaching::criteria::{CriterionId, CRITERIA};
use crate::workflows::coaching::domain::{
    EvaluationId, EvaluationSubmission, RepresentativeRef, StoredEvaluation,
};
use crate::workflows::coaching::ratings::{RatingPolicy, RatingSet};
use crate::workflows::coaching::repository::{EvaluationRepository, RepositoryError};
use crate::workflows::coaching::{coaching_router, CoachingService};

pub(super) fn worked_example_scores() -> BTreeMap<CriterionId, f64> {
    use CriterionId::*;
    BTreeMap::from([
        (PreviousFollowup, 5.0),
        (OrganizeCall, 5.0),
        (Targeting, 5.0),
        (Presentation, 4.0),
        (AreaKnowledge, 4.0),
        (OpeningSubject, 3.0),
        (OpeningProducts, 3.0),
        (CustomerAccept, 3.0),
        (ProbeUse, 3.0),
        (Listening, 3.0),
        (ProductKnowledge, 4.0),
        (CustomerNeed, 3.0),
        (ConfidentVoice, 4.0),
        (DetailingAids, 3.0),
        (ClosingBusiness, 3.0),
        (ClosingFeedback, 8.0),
        (ResolvingObjection, 3.0),
        (ReportingPunctuality, 4.0),
        (TotalVisits, 4.0),
    ])
}

pub(super) fn worked_example() -> RatingSet {
    RatingSet::from_scores(worked_example_scores(), RatingPolicy::Reject)
        .expect("worked example is within scale")
}

pub(super) fn full_marks() -> RatingSet {
    RatingSet::from_scores(
        CRITERIA.iter().map(|row| (row.id, row.max_score)),
        RatingPolicy::Reject,
    )
    .expect("maxima are within scale")
}

pub(super) fn all_zero() -> RatingSet {
    RatingSet::from_scores(CRITERIA.iter().map(|row| (row.id, 0.0)), RatingPolicy::Reject)
        .expect("zero is within scale")
}

/// Fills criteria in table order until `total` (a multiple of 0.5) is reached.
pub(super) fn ratings_totalling(total: f64) -> RatingSet {
    let mut remaining = total;
    let mut set = RatingSet::new();
    for row in &CRITERIA {
        if remaining <= 0.0 {
            break;
        }
        let value = remaining.min(row.max_score);
        set.set(row.id, value, RatingPolicy::Reject)
            .expect("value within scale");
        remaining -= value;
    }
    assert_eq!(remaining, 0.0, "total {total} exceeds the rubric");
    set
}

pub(super) fn scores_of(ratings: &RatingSet) -> BTreeMap<CriterionId, f64> {
    ratings
        .iter()
        .map(|(id, rating)| (id, rating.value()))
        .collect()
}

pub(super) fn visit_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).expect("valid date")
}

pub(super) fn submission_for(
    employee_id: &str,
    name: &str,
    day: u32,
    ratings: BTreeMap<CriterionId, f64>,
) -> EvaluationSubmission {
    EvaluationSubmission {
        representative: RepresentativeRef {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
        },
        supervisor: "Dr. Sami Nabil".to_string(),
        visit_date: visit_date(day),
        doctor: Some("Dr. Hala Mostafa".to_string()),
        ratings,
        comments: None,
    }
}

pub(super) fn submission() -> EvaluationSubmission {
    submission_for("E-100", "Mona Adel", 2, worked_example_scores())
}

pub(super) fn coaching_config() -> CoachingConfig {
    CoachingConfig {
        rating_policy: RatingPolicy::Reject,
        top_performers: 2,
    }
}

pub(super) fn build_service() -> (CoachingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CoachingService::new(repository.clone(), coaching_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EvaluationId, StoredEvaluation>>>,
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, record: StoredEvaluation) -> Result<StoredEvaluation, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: StoredEvaluation) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<StoredEvaluation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl EvaluationRepository for ConflictRepository {
    fn insert(&self, _record: StoredEvaluation) -> Result<StoredEvaluation, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: StoredEvaluation) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<StoredEvaluation>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: StoredEvaluation) -> Result<StoredEvaluation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: StoredEvaluation) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<StoredEvaluation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn coaching_router_with_service(
    service: CoachingService<MemoryRepository>,
) -> axum::Router {
    coaching_router(Arc::new(service))
}
