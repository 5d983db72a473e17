use serde::{Deserialize, Serialize};

use super::scoring::CategoryTotals;

/// Qualitative tier for a grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationBand {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl EvaluationBand {
    /// Highest tier first.
    pub const fn ordered() -> [EvaluationBand; 5] {
        [
            EvaluationBand::Excellent,
            EvaluationBand::VeryGood,
            EvaluationBand::Good,
            EvaluationBand::Acceptable,
            EvaluationBand::NeedsImprovement,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            EvaluationBand::Excellent => "ممتاز",
            EvaluationBand::VeryGood => "جيد جداً",
            EvaluationBand::Good => "جيد",
            EvaluationBand::Acceptable => "مقبول",
            EvaluationBand::NeedsImprovement => "يحتاج تحسين",
        }
    }

    pub const fn english_label(self) -> &'static str {
        match self {
            EvaluationBand::Excellent => "Excellent",
            EvaluationBand::VeryGood => "Very good",
            EvaluationBand::Good => "Good",
            EvaluationBand::Acceptable => "Acceptable",
            EvaluationBand::NeedsImprovement => "Needs improvement",
        }
    }

    /// Badge colour used by the dashboard.
    pub const fn style_hint(self) -> &'static str {
        match self {
            EvaluationBand::Excellent => "success",
            EvaluationBand::VeryGood => "info",
            EvaluationBand::Good => "primary",
            EvaluationBand::Acceptable => "warning",
            EvaluationBand::NeedsImprovement => "danger",
        }
    }
}

/// Label ladder. Boundaries are exclusive: 85 is `VeryGood`.
pub fn band_for_total(total: f64) -> EvaluationBand {
    if total > 85.0 {
        EvaluationBand::Excellent
    } else if total > 75.0 {
        EvaluationBand::VeryGood
    } else if total > 65.0 {
        EvaluationBand::Good
    } else if total > 55.0 {
        EvaluationBand::Acceptable
    } else {
        EvaluationBand::NeedsImprovement
    }
}

pub const INTENSIVE_TRAINING: [&str; 3] = [
    "الالتحاق ببرنامج تدريبي مكثف على مهارات البيع",
    "زيارات مزدوجة أسبوعية مع المشرف لمدة شهر",
    "مراجعة شاملة لمعلومات المنتجات مع قسم التدريب",
];

pub const SELLING_SKILLS_FUNDAMENTALS: &str =
    "التركيز على أساسيات مهارات البيع: الافتتاح والاستكشاف والإغلاق";
pub const SELLING_SKILLS_PRACTICE: &str = "التدريب العملي على معالجة الاعتراضات وإغلاق البيع";
pub const SELLING_SKILLS_REFINEMENT: &str = "صقل أسلوب الإغلاق والحصول على التزام العميل";
pub const PRODUCT_KNOWLEDGE_TRAINING: &str = "حضور جلسات تدريبية عن المنتجات ومعرفة المنطقة";
pub const PRODUCT_KNOWLEDGE_REVIEW: &str = "مراجعة الدراسات العلمية الخاصة بالمنتجات";
pub const CALL_PLANNING: &str = "تحسين التخطيط المسبق للزيارات ومتابعة الزيارات السابقة";
pub const TARGETING_REVIEW: &str = "مراجعة قائمة الاستهداف مع المشرف";
pub const PEER_MENTORING: &str = "ترشيح المندوب لتدريب زملائه الجدد";
pub const PERSONAL_TRAITS: &str = "تطوير الصفات الشخصية: المظهر والثقة والالتزام بالتقارير";

/// Recommendation ladder. Its cutoffs are independent of [`band_for_total`].
pub fn recommendations(totals: &CategoryTotals) -> Vec<&'static str> {
    let total = totals.grand_total();
    if total <= 55.0 {
        return INTENSIVE_TRAINING.to_vec();
    }

    let mut items = Vec::new();
    if total < 70.0 {
        if totals.selling_skills < 35.0 {
            items.push(SELLING_SKILLS_FUNDAMENTALS);
        }
        if totals.knowledge < 6.0 {
            items.push(PRODUCT_KNOWLEDGE_TRAINING);
        }
        if totals.planning < 9.0 {
            items.push(CALL_PLANNING);
        }
    } else if total < 85.0 {
        if totals.selling_skills < 40.0 {
            items.push(SELLING_SKILLS_PRACTICE);
        }
        if totals.knowledge < 7.0 {
            items.push(PRODUCT_KNOWLEDGE_REVIEW);
        }
        if totals.planning < 11.0 {
            items.push(TARGETING_REVIEW);
        }
    } else {
        if totals.selling_skills < 45.0 {
            items.push(SELLING_SKILLS_REFINEMENT);
        }
        items.push(PEER_MENTORING);
    }

    if totals.personal_traits < 15.0 {
        items.push(PERSONAL_TRAITS);
    }

    items
}
