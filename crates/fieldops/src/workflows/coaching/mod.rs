//! Double-visit coaching evaluations.
//!
//! Supervisors rate a medical representative against a fixed 19-criterion rubric. Ratings are
//! summed per category ([`scoring::aggregate`]), the grand total is banded
//! ([`banding::band_for_total`]) and a separate ladder picks coaching recommendations
//! ([`banding::recommendations`]). Everything around that core (storage, HTTP, CSV import,
//! team reporting) lives in the sibling modules.

pub mod banding;
pub mod criteria;
pub mod domain;
pub mod import;
pub mod ratings;
pub mod report;
pub mod repository;
pub mod router;
pub mod scorecard;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use banding::{band_for_total, recommendations, EvaluationBand};
pub use criteria::{Category, Criterion, CriterionId, CRITERIA, RUBRIC_VERSION};
pub use domain::{
    EvaluatedRecord, EvaluationId, EvaluationSubmission, EvaluationSummaryView,
    RepresentativeRef, StoredEvaluation,
};
pub use import::{CoachingCsvImporter, CoachingImportError};
pub use ratings::{Rating, RatingError, RatingPolicy, RatingSet};
pub use report::{BandCount, CategoryAverage, CoachingReport, RepresentativeSummary};
pub use repository::{EvaluationRepository, RepositoryError};
pub use router::{coaching_router, RatingsPayload};
pub use scorecard::{CategoryScore, Scorecard};
pub use scoring::{aggregate, CategoryTotals};
pub use service::{CoachingService, CoachingServiceError};
