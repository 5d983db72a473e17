use serde::Serialize;

use super::banding::{band_for_total, recommendations, EvaluationBand};
use super::criteria::Category;
use super::ratings::RatingSet;
use super::scoring::{aggregate, CategoryTotals};

/// One category line of a scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub label: &'static str,
    pub score: f64,
    pub max_points: f64,
}

/// Everything the dashboard renders for a rating set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub totals: CategoryTotals,
    pub categories: Vec<CategoryScore>,
    pub grand_total: f64,
    pub band: EvaluationBand,
    pub label: &'static str,
    pub style_hint: &'static str,
    pub recommendations: Vec<&'static str>,
}

impl Scorecard {
    pub fn from_ratings(ratings: &RatingSet) -> Self {
        let totals = aggregate(ratings);
        let grand_total = totals.grand_total();
        let band = band_for_total(grand_total);

        let categories = Category::ordered()
            .into_iter()
            .map(|category| CategoryScore {
                category,
                label: category.label(),
                score: totals.get(category),
                max_points: category.max_points(),
            })
            .collect();

        Self {
            totals,
            categories,
            grand_total,
            band,
            label: band.label(),
            style_hint: band.style_hint(),
            recommendations: recommendations(&totals),
        }
    }
}
