use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use csv::StringRecord;
use tracing::debug;

use super::criteria::{self, Criterion, RUBRIC_VERSION};
use super::domain::{EvaluatedRecord, EvaluationId, RepresentativeRef, StoredEvaluation};
use super::ratings::{RatingError, RatingPolicy, RatingSet};

const EVALUATION_ID: &str = "Evaluation ID";
const EMPLOYEE_ID: &str = "Employee ID";
const REPRESENTATIVE: &str = "Representative";
const SUPERVISOR: &str = "Supervisor";
const VISIT_DATE: &str = "Visit Date";
const DOCTOR: &str = "Doctor";
const COMMENTS: &str = "Comments";

#[derive(Debug)]
pub enum CoachingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    EmptyCell { line: usize, column: &'static str },
    InvalidDate { line: usize, value: String },
    Rating { line: usize, source: RatingError },
}

impl std::fmt::Display for CoachingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoachingImportError::Io(err) => write!(f, "failed to read coaching export: {}", err),
            CoachingImportError::Csv(err) => write!(f, "invalid coaching CSV data: {}", err),
            CoachingImportError::MissingColumn(column) => {
                write!(f, "coaching export is missing the '{}' column", column)
            }
            CoachingImportError::EmptyCell { line, column } => {
                write!(f, "line {}: '{}' must not be empty", line, column)
            }
            CoachingImportError::InvalidDate { line, value } => {
                write!(f, "line {}: '{}' is not a visit date", line, value)
            }
            CoachingImportError::Rating { line, source } => {
                write!(f, "line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for CoachingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoachingImportError::Io(err) => Some(err),
            CoachingImportError::Csv(err) => Some(err),
            CoachingImportError::Rating { source, .. } => Some(source),
            CoachingImportError::MissingColumn(_)
            | CoachingImportError::EmptyCell { .. }
            | CoachingImportError::InvalidDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for CoachingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CoachingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads evaluation exports: identity columns followed by one column per rubric field.
pub struct CoachingCsvImporter;

impl CoachingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        policy: RatingPolicy,
    ) -> Result<Vec<EvaluatedRecord>, CoachingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, policy)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        policy: RatingPolicy,
    ) -> Result<Vec<EvaluatedRecord>, CoachingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns = Columns::from_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            // Header occupies line 1.
            let line = index + 2;
            records.push(columns.evaluation(&row, line, policy)?);
        }

        debug!(count = records.len(), "imported coaching evaluations");
        Ok(records)
    }
}

struct Columns {
    evaluation_id: usize,
    employee_id: usize,
    representative: usize,
    supervisor: usize,
    visit_date: usize,
    doctor: Option<usize>,
    comments: Option<usize>,
    ratings: Vec<(usize, &'static Criterion)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, CoachingImportError> {
        let position = |name: &str| headers.iter().position(|header| header == name);
        let required =
            |name: &'static str| position(name).ok_or(CoachingImportError::MissingColumn(name));

        let ratings = headers
            .iter()
            .enumerate()
            .filter_map(|(index, header)| criteria::by_field(header).map(|row| (index, row)))
            .collect();

        Ok(Self {
            evaluation_id: required(EVALUATION_ID)?,
            employee_id: required(EMPLOYEE_ID)?,
            representative: required(REPRESENTATIVE)?,
            supervisor: required(SUPERVISOR)?,
            visit_date: required(VISIT_DATE)?,
            doctor: position(DOCTOR),
            comments: position(COMMENTS),
            ratings,
        })
    }

    fn evaluation(
        &self,
        row: &StringRecord,
        line: usize,
        policy: RatingPolicy,
    ) -> Result<EvaluatedRecord, CoachingImportError> {
        let cell = |index: usize| row.get(index).unwrap_or_default().to_string();
        let identity = |index: usize, column: &'static str| {
            let value = cell(index);
            if value.is_empty() {
                Err(CoachingImportError::EmptyCell { line, column })
            } else {
                Ok(value)
            }
        };
        let optional = |index: Option<usize>| {
            index
                .and_then(|index| row.get(index))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let raw_date = cell(self.visit_date);
        let visit_date = parse_visit_date(&raw_date).ok_or(CoachingImportError::InvalidDate {
            line,
            value: raw_date.clone(),
        })?;

        let mut ratings = RatingSet::new();
        for (index, criterion) in &self.ratings {
            let Some(value) = row.get(*index).and_then(|value| value.parse::<f64>().ok()) else {
                continue;
            };
            ratings
                .set(criterion.id, value, policy)
                .map_err(|source| CoachingImportError::Rating { line, source })?;
        }

        let stored = StoredEvaluation {
            id: EvaluationId(identity(self.evaluation_id, EVALUATION_ID)?),
            representative: RepresentativeRef {
                employee_id: identity(self.employee_id, EMPLOYEE_ID)?,
                name: cell(self.representative),
            },
            supervisor: cell(self.supervisor),
            visit_date,
            doctor: optional(self.doctor),
            comments: optional(self.comments),
            rubric_version: RUBRIC_VERSION,
            scores: ratings.to_fields(),
        };

        Ok(EvaluatedRecord::from_stored(stored))
    }
}

fn parse_visit_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
