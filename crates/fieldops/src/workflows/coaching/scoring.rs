use serde::{Deserialize, Serialize};

use super::criteria::{Category, CRITERIA};
use super::ratings::RatingSet;

/// Per-category sums of a rating set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub planning: f64,
    pub personal_traits: f64,
    pub knowledge: f64,
    pub selling_skills: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Planning => self.planning,
            Category::PersonalTraits => self.personal_traits,
            Category::Knowledge => self.knowledge,
            Category::SellingSkills => self.selling_skills,
        }
    }

    fn slot(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Planning => &mut self.planning,
            Category::PersonalTraits => &mut self.personal_traits,
            Category::Knowledge => &mut self.knowledge,
            Category::SellingSkills => &mut self.selling_skills,
        }
    }

    pub fn grand_total(&self) -> f64 {
        self.planning + self.personal_traits + self.knowledge + self.selling_skills
    }
}

/// Adds every criterion's rating to its category. Unrated criteria contribute zero.
pub fn aggregate(ratings: &RatingSet) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for criterion in &CRITERIA {
        *totals.slot(criterion.category) += ratings.get(criterion.id);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::coaching::criteria::CriterionId;
    use crate::workflows::coaching::ratings::RatingPolicy;

    #[test]
    fn empty_set_sums_to_zero() {
        let totals = aggregate(&RatingSet::new());
        assert_eq!(totals, CategoryTotals::default());
        assert_eq!(totals.grand_total(), 0.0);
    }

    #[test]
    fn a_single_rating_lands_in_its_category() {
        let ratings = RatingSet::from_scores(
            [(CriterionId::ClosingFeedback, 9.5)],
            RatingPolicy::Reject,
        )
        .expect("valid");

        let totals = aggregate(&ratings);

        assert_eq!(totals.selling_skills, 9.5);
        assert_eq!(totals.get(Category::SellingSkills), 9.5);
        assert_eq!(totals.planning + totals.personal_traits + totals.knowledge, 0.0);
    }
}
