use serde::{Deserialize, Serialize};

/// Bumped whenever a criterion, its category, or its maximum changes.
pub const RUBRIC_VERSION: u16 = 1;

/// The four fixed groupings every criterion is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Planning,
    PersonalTraits,
    Knowledge,
    SellingSkills,
}

impl Category {
    pub const fn ordered() -> [Category; 4] {
        [
            Category::Planning,
            Category::PersonalTraits,
            Category::Knowledge,
            Category::SellingSkills,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Planning => "التخطيط",
            Category::PersonalTraits => "الصفات الشخصية",
            Category::Knowledge => "المعرفة",
            Category::SellingSkills => "مهارات البيع",
        }
    }

    /// Sum of the maximum scores of the criteria in this category.
    pub fn max_points(self) -> f64 {
        CRITERIA
            .iter()
            .filter(|criterion| criterion.category == self)
            .map(|criterion| criterion.max_score)
            .sum()
    }
}

/// Closed set of rubric questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionId {
    PreviousFollowup,
    OrganizeCall,
    Targeting,
    Presentation,
    ConfidentVoice,
    ReportingPunctuality,
    TotalVisits,
    AreaKnowledge,
    ProductKnowledge,
    OpeningSubject,
    OpeningProducts,
    CustomerAccept,
    ProbeUse,
    Listening,
    CustomerNeed,
    DetailingAids,
    ClosingBusiness,
    ClosingFeedback,
    ResolvingObjection,
}

impl CriterionId {
    pub fn criterion(self) -> &'static Criterion {
        criterion(self)
    }
}

/// One rubric row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub text: &'static str,
    pub category: Category,
    pub max_score: f64,
    /// Key under which persisted records store this rating.
    pub field: &'static str,
}

const fn row(
    id: CriterionId,
    text: &'static str,
    category: Category,
    max_score: f64,
    field: &'static str,
) -> Criterion {
    Criterion {
        id,
        text,
        category,
        max_score,
        field,
    }
}

pub static CRITERIA: [Criterion; 19] = [
    row(
        CriterionId::PreviousFollowup,
        "متابعة الزيارة السابقة",
        Category::Planning,
        5.0,
        "previousFollowup",
    ),
    row(
        CriterionId::OrganizeCall,
        "تنظيم الزيارة",
        Category::Planning,
        5.0,
        "organizeCall",
    ),
    row(
        CriterionId::Targeting,
        "الاستهداف الصحيح للعملاء",
        Category::Planning,
        5.0,
        "targeting",
    ),
    row(
        CriterionId::Presentation,
        "المظهر العام",
        Category::PersonalTraits,
        5.0,
        "presentation",
    ),
    row(
        CriterionId::ConfidentVoice,
        "الثقة بالنفس ونبرة الصوت",
        Category::PersonalTraits,
        5.0,
        "confidentVoice",
    ),
    row(
        CriterionId::ReportingPunctuality,
        "الالتزام بمواعيد التقارير",
        Category::PersonalTraits,
        5.0,
        "reportingPunctuality",
    ),
    row(
        CriterionId::TotalVisits,
        "عدد الزيارات الإجمالي",
        Category::PersonalTraits,
        5.0,
        "totalVisits",
    ),
    row(
        CriterionId::AreaKnowledge,
        "معرفة المنطقة",
        Category::Knowledge,
        5.0,
        "areaKnowledge",
    ),
    row(
        CriterionId::ProductKnowledge,
        "معرفة المنتج",
        Category::Knowledge,
        5.0,
        "productKnowledge",
    ),
    row(
        CriterionId::OpeningSubject,
        "افتتاح الموضوع",
        Category::SellingSkills,
        5.0,
        "openingSubject",
    ),
    row(
        CriterionId::OpeningProducts,
        "تقديم المنتجات",
        Category::SellingSkills,
        5.0,
        "openingProducts",
    ),
    row(
        CriterionId::CustomerAccept,
        "قبول العميل",
        Category::SellingSkills,
        5.0,
        "customerAccept",
    ),
    row(
        CriterionId::ProbeUse,
        "استخدام الأسئلة الاستكشافية",
        Category::SellingSkills,
        5.0,
        "probeUse",
    ),
    row(
        CriterionId::Listening,
        "مهارة الاستماع",
        Category::SellingSkills,
        5.0,
        "listening",
    ),
    row(
        CriterionId::CustomerNeed,
        "تحديد احتياجات العميل",
        Category::SellingSkills,
        5.0,
        "customerNeed",
    ),
    row(
        CriterionId::DetailingAids,
        "استخدام وسائل العرض",
        Category::SellingSkills,
        5.0,
        "detailingAids",
    ),
    row(
        CriterionId::ClosingBusiness,
        "إغلاق البيع",
        Category::SellingSkills,
        5.0,
        "closingBusiness",
    ),
    row(
        CriterionId::ClosingFeedback,
        "الحصول على التزام العميل",
        Category::SellingSkills,
        10.0,
        "closingFeedback",
    ),
    row(
        CriterionId::ResolvingObjection,
        "معالجة الاعتراضات",
        Category::SellingSkills,
        5.0,
        "resolvingObjection",
    ),
];

pub fn criterion(id: CriterionId) -> &'static Criterion {
    // Rows are declared in enum order.
    &CRITERIA[id as usize]
}

pub fn by_field(field: &str) -> Option<&'static Criterion> {
    CRITERIA.iter().find(|criterion| criterion.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rows_follow_enum_order() {
        for (index, row) in CRITERIA.iter().enumerate() {
            assert_eq!(row.id as usize, index, "{:?} out of place", row.id);
            assert_eq!(criterion(row.id).field, row.field);
        }
    }

    #[test]
    fn category_maxima_sum_to_one_hundred() {
        assert_eq!(Category::Planning.max_points(), 15.0);
        assert_eq!(Category::PersonalTraits.max_points(), 20.0);
        assert_eq!(Category::Knowledge.max_points(), 10.0);
        assert_eq!(Category::SellingSkills.max_points(), 55.0);

        let total: f64 = Category::ordered()
            .into_iter()
            .map(Category::max_points)
            .sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn maxima_are_five_or_ten_and_fields_are_unique() {
        let mut fields = HashSet::new();
        for row in &CRITERIA {
            assert!(row.max_score == 5.0 || row.max_score == 10.0);
            assert!(fields.insert(row.field), "duplicate field {}", row.field);
        }
    }

    #[test]
    fn looks_up_rows_by_backing_field() {
        let row = by_field("closingFeedback").expect("known field");
        assert_eq!(row.id, CriterionId::ClosingFeedback);
        assert_eq!(row.max_score, 10.0);
        assert!(by_field("closing_feedback").is_none());
    }
}
