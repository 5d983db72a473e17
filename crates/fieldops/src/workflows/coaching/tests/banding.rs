use super::common::*;
use crate::workflows::coaching::banding::{
    band_for_total, recommendations, EvaluationBand, CALL_PLANNING, INTENSIVE_TRAINING,
    PEER_MENTORING, PERSONAL_TRAITS, PRODUCT_KNOWLEDGE_TRAINING, SELLING_SKILLS_FUNDAMENTALS,
    SELLING_SKILLS_PRACTICE, SELLING_SKILLS_REFINEMENT,
};
use crate::workflows::coaching::scorecard::Scorecard;
use crate::workflows::coaching::scoring::CategoryTotals;

fn totals(
    planning: f64,
    personal_traits: f64,
    knowledge: f64,
    selling_skills: f64,
) -> CategoryTotals {
    CategoryTotals {
        planning,
        personal_traits,
        knowledge,
        selling_skills,
    }
}

#[test]
fn label_boundaries_are_exclusive() {
    assert_eq!(band_for_total(85.0), EvaluationBand::VeryGood);
    assert_eq!(band_for_total(85.0001), EvaluationBand::Excellent);
    assert_eq!(band_for_total(75.0), EvaluationBand::Good);
    assert_eq!(band_for_total(75.0001), EvaluationBand::VeryGood);
    assert_eq!(band_for_total(65.0), EvaluationBand::Acceptable);
    assert_eq!(band_for_total(65.0001), EvaluationBand::Good);
    assert_eq!(band_for_total(55.0), EvaluationBand::NeedsImprovement);
    assert_eq!(band_for_total(55.0001), EvaluationBand::Acceptable);
}

#[test]
fn totals_outside_the_scale_are_not_clamped() {
    assert_eq!(band_for_total(140.0), EvaluationBand::Excellent);
    assert_eq!(band_for_total(-3.0), EvaluationBand::NeedsImprovement);
}

#[test]
fn rating_sets_on_each_boundary_take_the_lower_label() {
    let cases = [
        (85.0, "جيد جداً"),
        (85.5, "ممتاز"),
        (75.0, "جيد"),
        (75.5, "جيد جداً"),
        (65.0, "مقبول"),
        (65.5, "جيد"),
        (55.0, "يحتاج تحسين"),
        (55.5, "مقبول"),
    ];

    for (total, label) in cases {
        let scorecard = Scorecard::from_ratings(&ratings_totalling(total));
        assert_eq!(scorecard.grand_total, total);
        assert_eq!(scorecard.label, label, "total {total}");
    }
}

#[test]
fn low_totals_get_the_fixed_intensive_list() {
    let items = recommendations(&totals(5.0, 10.0, 5.0, 35.0));
    assert_eq!(items, INTENSIVE_TRAINING.to_vec());

    let all_zero = recommendations(&CategoryTotals::default());
    assert_eq!(all_zero.len(), 3);
}

#[test]
fn just_above_intensive_cutoff_uses_the_fine_ladder() {
    let items = recommendations(&totals(8.0, 12.0, 5.0, 30.5));
    assert_eq!(
        items,
        vec![
            SELLING_SKILLS_FUNDAMENTALS,
            PRODUCT_KNOWLEDGE_TRAINING,
            CALL_PLANNING,
            PERSONAL_TRAITS,
        ]
    );
}

#[test]
fn recommendation_ladder_differs_from_label_ladder() {
    // Labelled "Good" (> 65) but still on the lower recommendation rung (< 70).
    let mixed = totals(12.0, 15.0, 5.0, 36.0);
    assert_eq!(band_for_total(mixed.grand_total()), EvaluationBand::Good);
    assert_eq!(recommendations(&mixed), vec![PRODUCT_KNOWLEDGE_TRAINING]);
}

#[test]
fn middle_rung_uses_forty_point_selling_cutoff() {
    let items = recommendations(&totals(12.0, 14.0, 8.0, 38.0));
    assert_eq!(items, vec![SELLING_SKILLS_PRACTICE, PERSONAL_TRAITS]);

    let worked = recommendations(&Scorecard::from_ratings(&worked_example()).totals);
    assert_eq!(worked, vec![SELLING_SKILLS_PRACTICE]);
}

#[test]
fn top_rung_always_recommends_mentoring() {
    assert_eq!(
        recommendations(&totals(15.0, 20.0, 10.0, 44.0)),
        vec![SELLING_SKILLS_REFINEMENT, PEER_MENTORING]
    );
    assert_eq!(
        Scorecard::from_ratings(&full_marks()).recommendations,
        vec![PEER_MENTORING]
    );
}

#[test]
fn bands_expose_labels_and_styles() {
    let labels: Vec<_> = EvaluationBand::ordered()
        .into_iter()
        .map(|band| (band.label(), band.style_hint()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("ممتاز", "success"),
            ("جيد جداً", "info"),
            ("جيد", "primary"),
            ("مقبول", "warning"),
            ("يحتاج تحسين", "danger"),
        ]
    );
    assert_eq!(EvaluationBand::VeryGood.english_label(), "Very good");
}
