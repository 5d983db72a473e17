use super::domain::{EvaluationId, StoredEvaluation};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: StoredEvaluation) -> Result<StoredEvaluation, RepositoryError>;
    fn update(&self, record: StoredEvaluation) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<StoredEvaluation>, RepositoryError>;
    fn list(&self) -> Result<Vec<StoredEvaluation>, RepositoryError>;

    fn list_for_rep(&self, employee_id: &str) -> Result<Vec<StoredEvaluation>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| record.representative.employee_id == employee_id)
            .collect())
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
