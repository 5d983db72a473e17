use super::common::*;
use crate::workflows::coaching::criteria::{Category, CriterionId};
use crate::workflows::coaching::ratings::{RatingPolicy, RatingSet};
use crate::workflows::coaching::scorecard::Scorecard;
use crate::workflows::coaching::scoring::aggregate;
use crate::workflows::coaching::EvaluationBand;

#[test]
fn all_zero_ratings_need_improvement() {
    let scorecard = Scorecard::from_ratings(&all_zero());

    assert_eq!(scorecard.grand_total, 0.0);
    assert_eq!(scorecard.band, EvaluationBand::NeedsImprovement);
    assert_eq!(scorecard.label, "يحتاج تحسين");
}

#[test]
fn full_marks_are_excellent() {
    let ratings = full_marks();
    let totals = aggregate(&ratings);

    assert_eq!(totals.planning, 15.0);
    assert_eq!(totals.personal_traits, 20.0);
    assert_eq!(totals.knowledge, 10.0);
    assert_eq!(totals.selling_skills, 55.0);

    let scorecard = Scorecard::from_ratings(&ratings);
    assert_eq!(scorecard.grand_total, 100.0);
    assert_eq!(scorecard.label, "ممتاز");
    assert_eq!(scorecard.style_hint, "success");
}

#[test]
fn worked_example_matches_category_table() {
    let totals = aggregate(&worked_example());

    assert_eq!(totals.planning, 15.0);
    assert_eq!(totals.personal_traits, 16.0);
    assert_eq!(totals.knowledge, 8.0);
    assert_eq!(totals.selling_skills, 35.0);
    assert_eq!(totals.grand_total(), 74.0);

    let scorecard = Scorecard::from_ratings(&worked_example());
    assert_eq!(scorecard.band, EvaluationBand::Good);
    assert_eq!(scorecard.label, "جيد");
}

#[test]
fn category_totals_sum_to_grand_total_exactly() {
    let mut half_points = RatingSet::new();
    for (id, value) in [
        (CriterionId::Targeting, 2.5),
        (CriterionId::Presentation, 3.5),
        (CriterionId::ProductKnowledge, 0.5),
        (CriterionId::ClosingFeedback, 7.5),
        (CriterionId::Listening, 4.5),
    ] {
        half_points
            .set(id, value, RatingPolicy::Reject)
            .expect("valid rating");
    }

    for ratings in [all_zero(), full_marks(), worked_example(), half_points] {
        let totals = aggregate(&ratings);
        let by_category = totals.planning
            + totals.personal_traits
            + totals.knowledge
            + totals.selling_skills;
        let by_criterion: f64 = ratings.iter().map(|(_, rating)| rating.value()).sum();

        assert_eq!(by_category, totals.grand_total());
        assert_eq!(by_criterion, totals.grand_total());
    }
}

#[test]
fn aggregation_is_idempotent() {
    let ratings = worked_example();

    let first = aggregate(&ratings);
    let second = aggregate(&ratings);

    assert_eq!(first, second);
    assert_eq!(
        Scorecard::from_ratings(&ratings),
        Scorecard::from_ratings(&ratings)
    );
}

#[test]
fn missing_keys_count_as_zero() {
    let mut scores = worked_example_scores();
    scores.remove(&CriterionId::ClosingFeedback);
    scores.remove(&CriterionId::AreaKnowledge);
    let ratings = RatingSet::from_scores(scores, RatingPolicy::Reject).expect("valid");

    let totals = aggregate(&ratings);

    assert_eq!(totals.selling_skills, 27.0);
    assert_eq!(totals.knowledge, 4.0);
    assert_eq!(totals.grand_total(), 62.0);
}

#[test]
fn scorecard_lists_categories_in_rubric_order() {
    let scorecard = Scorecard::from_ratings(&worked_example());

    let categories: Vec<_> = scorecard
        .categories
        .iter()
        .map(|line| (line.category, line.score, line.max_points))
        .collect();

    assert_eq!(
        categories,
        vec![
            (Category::Planning, 15.0, 15.0),
            (Category::PersonalTraits, 16.0, 20.0),
            (Category::Knowledge, 8.0, 10.0),
            (Category::SellingSkills, 35.0, 55.0),
        ]
    );
}
