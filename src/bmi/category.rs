use std::fmt;

use serde::{Deserialize, Serialize};

/// BMI 점수로 나눈 체형 분류. 선언 순서가 곧 점수 순서이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    Underweight,
    NormalWeight,
    MarginallyOverweight,
    Overweight,
    Obese,
}

/// (상한 미만, 분류) 표. 상한값과 같은 점수는 다음 분류로 넘어간다.
const THRESHOLDS: [(f64, BodyCategory); 4] = [
    (18.5, BodyCategory::Underweight),
    (24.9, BodyCategory::NormalWeight),
    (29.9, BodyCategory::MarginallyOverweight),
    (34.9, BodyCategory::Overweight),
];

impl BodyCategory {
    pub const ALL: [BodyCategory; 5] = [
        BodyCategory::Underweight,
        BodyCategory::NormalWeight,
        BodyCategory::MarginallyOverweight,
        BodyCategory::Overweight,
        BodyCategory::Obese,
    ];

    /// 점수를 분류한다. NaN은 어떤 상한보다도 작지 않으므로 Obese가 된다.
    pub fn from_score(score: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(upper, _)| score < *upper)
            .map(|(_, category)| *category)
            .unwrap_or(BodyCategory::Obese)
    }

    /// 화면 표시용 영문 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            BodyCategory::Underweight => "Underweight",
            BodyCategory::NormalWeight => "Normal weight",
            BodyCategory::MarginallyOverweight => "Marginally Overweight",
            BodyCategory::Overweight => "Overweight",
            BodyCategory::Obese => "Obese",
        }
    }

    /// 번역 키.
    pub fn i18n_key(&self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            BodyCategory::Underweight => CATEGORY_UNDERWEIGHT,
            BodyCategory::NormalWeight => CATEGORY_NORMAL_WEIGHT,
            BodyCategory::MarginallyOverweight => CATEGORY_MARGINALLY_OVERWEIGHT,
            BodyCategory::Overweight => CATEGORY_OVERWEIGHT,
            BodyCategory::Obese => CATEGORY_OBESE,
        }
    }

    /// 분류에 해당하는 점수 구간 [하한, 상한). 끝 구간은 None.
    pub fn score_range(&self) -> (Option<f64>, Option<f64>) {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        let lower = idx.checked_sub(1).map(|i| THRESHOLDS[i].0);
        let upper = THRESHOLDS.get(idx).map(|(u, _)| *u);
        (lower, upper)
    }
}

impl fmt::Display for BodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_upper_category() {
        assert_eq!(BodyCategory::from_score(18.49), BodyCategory::Underweight);
        assert_eq!(BodyCategory::from_score(18.5), BodyCategory::NormalWeight);
        assert_eq!(BodyCategory::from_score(24.9), BodyCategory::MarginallyOverweight);
        assert_eq!(BodyCategory::from_score(29.9), BodyCategory::Overweight);
        assert_eq!(BodyCategory::from_score(34.9), BodyCategory::Obese);
        assert_eq!(BodyCategory::from_score(f64::INFINITY), BodyCategory::Obese);
        assert_eq!(BodyCategory::from_score(-3.0), BodyCategory::Underweight);
    }

    #[test]
    fn ranges_chain_without_gaps() {
        assert_eq!(BodyCategory::Underweight.score_range(), (None, Some(18.5)));
        assert_eq!(BodyCategory::Overweight.score_range(), (Some(29.9), Some(34.9)));
        assert_eq!(BodyCategory::Obese.score_range(), (Some(34.9), None));
        for pair in BodyCategory::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].score_range().1, pair[1].score_range().0);
        }
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(BodyCategory::NormalWeight.to_string(), "Normal weight");
        assert_eq!(
            BodyCategory::MarginallyOverweight.label(),
            "Marginally Overweight"
        );
    }
}
