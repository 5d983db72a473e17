use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::config::CoachingConfig;

use super::criteria::{CriterionId, RUBRIC_VERSION};
use super::domain::{EvaluatedRecord, EvaluationId, EvaluationSubmission, StoredEvaluation};
use super::ratings::{RatingError, RatingPolicy, RatingSet};
use super::report::CoachingReport;
use super::repository::{EvaluationRepository, RepositoryError};
use super::scorecard::Scorecard;

/// Service composing rating validation, the repository, and the scoring rubric.
pub struct CoachingService<R> {
    repository: Arc<R>,
    config: CoachingConfig,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<R> CoachingService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: CoachingConfig) -> Self {
        Self { repository, config }
    }

    pub fn policy(&self) -> RatingPolicy {
        self.config.rating_policy
    }

    pub fn default_top_performers(&self) -> usize {
        self.config.top_performers
    }

    /// Validate and store a new evaluation.
    pub fn submit(
        &self,
        submission: EvaluationSubmission,
    ) -> Result<EvaluatedRecord, CoachingServiceError> {
        let ratings = RatingSet::from_scores(submission.ratings, self.policy())?;

        let stored = StoredEvaluation {
            id: next_evaluation_id(),
            representative: submission.representative,
            supervisor: submission.supervisor,
            visit_date: submission.visit_date,
            doctor: submission.doctor,
            comments: submission.comments,
            rubric_version: RUBRIC_VERSION,
            scores: ratings.to_fields(),
        };

        let stored = self.repository.insert(stored)?;
        let record = EvaluatedRecord::from_stored(stored);

        info!(
            evaluation_id = %record.id.0,
            employee_id = %record.representative.employee_id,
            grand_total = record.scorecard.grand_total,
            band = ?record.scorecard.band,
            "coaching evaluation recorded"
        );
        Ok(record)
    }

    /// Fetch an evaluation, restoring its ratings from the stored score fields.
    pub fn get(&self, id: &EvaluationId) -> Result<EvaluatedRecord, CoachingServiceError> {
        let stored = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(EvaluatedRecord::from_stored(stored))
    }

    /// Replace every rating of an existing evaluation.
    pub fn update_ratings(
        &self,
        id: &EvaluationId,
        ratings: BTreeMap<CriterionId, f64>,
    ) -> Result<EvaluatedRecord, CoachingServiceError> {
        let ratings = RatingSet::from_scores(ratings, self.policy())?;
        let mut stored = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        stored.scores = ratings.to_fields();
        stored.rubric_version = RUBRIC_VERSION;
        self.repository.update(stored.clone())?;

        let record = EvaluatedRecord::from_stored(stored);
        info!(
            evaluation_id = %record.id.0,
            grand_total = record.scorecard.grand_total,
            band = ?record.scorecard.band,
            "coaching ratings updated"
        );
        Ok(record)
    }

    /// Score ratings without storing anything.
    pub fn preview(
        &self,
        ratings: BTreeMap<CriterionId, f64>,
    ) -> Result<Scorecard, CoachingServiceError> {
        let ratings = RatingSet::from_scores(ratings, self.policy())?;
        Ok(Scorecard::from_ratings(&ratings))
    }

    /// Evaluations of one representative, most recent visit first.
    pub fn history(&self, employee_id: &str) -> Result<Vec<EvaluatedRecord>, CoachingServiceError> {
        let mut records = self
            .repository
            .list_for_rep(employee_id)?
            .into_iter()
            .map(EvaluatedRecord::from_stored)
            .collect::<Vec<_>>();
        records.sort_by(|a, b| {
            b.visit_date
                .cmp(&a.visit_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    pub fn team_report(&self, top_n: usize) -> Result<CoachingReport, CoachingServiceError> {
        let records = self
            .repository
            .list()?
            .into_iter()
            .map(EvaluatedRecord::from_stored)
            .collect::<Vec<_>>();
        Ok(CoachingReport::build(&records, top_n))
    }
}

/// Error raised by the coaching service.
#[derive(Debug, thiserror::Error)]
pub enum CoachingServiceError {
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
