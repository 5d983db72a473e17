use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::banding::EvaluationBand;
use super::criteria::Category;
use super::domain::EvaluatedRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub category: Category,
    pub label: &'static str,
    pub average: f64,
    pub max_points: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub band: EvaluationBand,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepresentativeSummary {
    pub employee_id: String,
    pub name: String,
    pub evaluations: usize,
    pub average_total: f64,
    pub latest_visit: NaiveDate,
    pub latest_band: EvaluationBand,
}

/// Team-level coaching roll-up feeding the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachingReport {
    pub evaluations: usize,
    pub average_total: f64,
    pub category_averages: Vec<CategoryAverage>,
    pub band_distribution: Vec<BandCount>,
    pub representatives: Vec<RepresentativeSummary>,
    pub top_performers: Vec<RepresentativeSummary>,
}

struct RepAccumulator {
    name: String,
    evaluations: usize,
    total: f64,
    latest_visit: NaiveDate,
    latest_band: EvaluationBand,
}

impl CoachingReport {
    pub fn build(records: &[EvaluatedRecord], top_n: usize) -> Self {
        let evaluations = records.len();

        let category_averages = Category::ordered()
            .into_iter()
            .map(|category| CategoryAverage {
                category,
                label: category.label(),
                average: mean(
                    records
                        .iter()
                        .map(|record| record.scorecard.totals.get(category)),
                    evaluations,
                ),
                max_points: category.max_points(),
            })
            .collect();

        let band_distribution = EvaluationBand::ordered()
            .into_iter()
            .map(|band| BandCount {
                band,
                label: band.label(),
                count: records
                    .iter()
                    .filter(|record| record.scorecard.band == band)
                    .count(),
            })
            .collect();

        let mut by_rep: BTreeMap<&str, RepAccumulator> = BTreeMap::new();
        for record in records {
            let scorecard = &record.scorecard;
            let entry = by_rep
                .entry(record.representative.employee_id.as_str())
                .or_insert_with(|| RepAccumulator {
                    name: record.representative.name.clone(),
                    evaluations: 0,
                    total: 0.0,
                    latest_visit: record.visit_date,
                    latest_band: scorecard.band,
                });
            entry.evaluations += 1;
            entry.total += scorecard.grand_total;
            if record.visit_date > entry.latest_visit {
                entry.latest_visit = record.visit_date;
                entry.latest_band = scorecard.band;
                entry.name = record.representative.name.clone();
            }
        }

        let mut representatives: Vec<RepresentativeSummary> = by_rep
            .into_iter()
            .map(|(employee_id, acc)| RepresentativeSummary {
                employee_id: employee_id.to_string(),
                name: acc.name,
                evaluations: acc.evaluations,
                average_total: acc.total / acc.evaluations as f64,
                latest_visit: acc.latest_visit,
                latest_band: acc.latest_band,
            })
            .collect();
        representatives.sort_by(|a, b| {
            b.average_total
                .total_cmp(&a.average_total)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });

        let top_performers = representatives.iter().take(top_n).cloned().collect();

        Self {
            evaluations,
            average_total: mean(
                records.iter().map(|record| record.scorecard.grand_total),
                evaluations,
            ),
            category_averages,
            band_distribution,
            representatives,
            top_performers,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}
