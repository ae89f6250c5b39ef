use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::BodyCategory;
use crate::conversion::{self, ConversionError, UnitSystem};
use crate::quantity::{self, QuantityKind};
use crate::units::LengthUnit;

/// BMI 계산 시 발생 가능한 오류.
///
/// 호출 측은 이 오류를 "결과 없음"으로 다루면 된다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BmiError {
    /// 체중/신장 문자열을 숫자로 해석할 수 없음
    #[error("숫자가 아닌 입력 ({field}): {input:?}")]
    InvalidNumericInput { field: &'static str, input: String },
}

/// 성별.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "남" | "남성" => Ok(Gender::Male),
            "female" | "f" | "여" | "여성" => Ok(Gender::Female),
            _ => Err(ConversionError::UnknownOption(s.to_string())),
        }
    }
}

/// 성별에 따라 BMI 원값에 더하는 보정 상수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderAdjustment {
    pub male: f64,
    pub female: f64,
}

impl GenderAdjustment {
    /// 보정 없음. 성별은 결과에 영향을 주지 않는다.
    pub const NONE: GenderAdjustment = GenderAdjustment {
        male: 0.0,
        female: 0.0,
    };

    /// 구버전 계산기의 ±1.0 보정.
    pub const CLASSIC: GenderAdjustment = GenderAdjustment {
        male: 1.0,
        female: -1.0,
    };

    pub fn for_gender(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    /// 두 성별의 보정값이 같으면 성별 입력은 결과를 바꾸지 못한다.
    pub fn is_inert(&self) -> bool {
        self.male == self.female
    }
}

impl Default for GenderAdjustment {
    fn default() -> Self {
        GenderAdjustment::NONE
    }
}

/// 점수 반올림 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rounding {
    /// 소수 둘째 자리 (0.5는 0에서 먼 쪽)
    TwoDecimals,
    /// 가장 가까운 정수 (0.5는 +∞ 쪽)
    #[default]
    NearestInteger,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::TwoDecimals => (value * 100.0).round() / 100.0,
            Rounding::NearestInteger => (value + 0.5).floor(),
        }
    }

    /// 반올림 방식에 맞춰 점수를 문자열로 만든다.
    pub fn format(self, value: f64) -> String {
        match self {
            Rounding::TwoDecimals => format!("{value:.2}"),
            Rounding::NearestInteger => format!("{value:.0}"),
        }
    }
}

/// 계산 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationProfile {
    /// 현행: cm 입력, 성별 보정 없음, 정수 반올림
    Current,
    /// 구버전: m 입력, ±1.0 성별 보정, 소수 둘째 자리
    Classic,
}

impl CalculationProfile {
    pub fn options(self, unit_system: UnitSystem) -> BmiOptions {
        let base = match self {
            CalculationProfile::Current => BmiOptions::current(),
            CalculationProfile::Classic => BmiOptions::classic(),
        };
        BmiOptions {
            unit_system,
            ..base
        }
    }
}

impl FromStr for CalculationProfile {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(CalculationProfile::Current),
            "classic" | "legacy" => Ok(CalculationProfile::Classic),
            _ => Err(ConversionError::UnknownOption(s.to_string())),
        }
    }
}

/// BMI 계산 옵션. 모든 동작 차이는 여기서 명시적으로 고른다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmiOptions {
    pub unit_system: UnitSystem,
    /// 미터법일 때 신장 입력 단위 (cm 또는 m)
    pub metric_height_unit: LengthUnit,
    pub rounding: Rounding,
    /// TOML 하위 테이블이 되므로 마지막 필드로 둔다.
    pub gender_adjustment: GenderAdjustment,
}

impl BmiOptions {
    pub fn current() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            metric_height_unit: LengthUnit::Centimeter,
            gender_adjustment: GenderAdjustment::NONE,
            rounding: Rounding::NearestInteger,
        }
    }

    pub fn classic() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            metric_height_unit: LengthUnit::Meter,
            gender_adjustment: GenderAdjustment::CLASSIC,
            rounding: Rounding::TwoDecimals,
        }
    }

    /// 설정이 어느 프리셋과 일치하는지 확인한다. 개별 수정된 경우 None.
    pub fn profile(&self) -> Option<CalculationProfile> {
        [CalculationProfile::Current, CalculationProfile::Classic]
            .into_iter()
            .find(|p| p.options(self.unit_system) == *self)
    }
}

impl Default for BmiOptions {
    fn default() -> Self {
        Self::current()
    }
}

/// 계산 결과. 점수는 반올림이 끝난 값이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    pub score: f64,
    pub category: BodyCategory,
    pub rounding: Rounding,
}

impl BmiResult {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn formatted_score(&self) -> String {
        self.rounding.format(self.score)
    }
}

/// 문자열 입력으로 BMI를 계산한다.
///
/// 둘 중 하나라도 숫자가 아니면 `BmiError::InvalidNumericInput`을 반환한다.
pub fn compute_bmi(
    weight_text: &str,
    height_text: &str,
    gender: Gender,
    options: &BmiOptions,
) -> Result<BmiResult, BmiError> {
    let weight = quantity::parse_measurement(QuantityKind::Weight, weight_text)
        .inspect_err(|e| debug!("체중 입력 거부: {e}"))?;
    let height = quantity::parse_measurement(QuantityKind::Height, height_text)
        .inspect_err(|e| debug!("신장 입력 거부: {e}"))?;
    Ok(compute_bmi_from_values(weight, height, gender, options))
}

/// 이미 숫자로 가진 체중/신장으로 BMI를 계산한다.
///
/// 신장이 0이면 점수는 무한대가 되고 Obese로 분류된다.
pub fn compute_bmi_from_values(
    weight: f64,
    height: f64,
    gender: Gender,
    options: &BmiOptions,
) -> BmiResult {
    let (weight_kg, height_cm) =
        conversion::to_base_units(weight, height, options.unit_system, options.metric_height_unit);
    let height_m = height_cm.value_base / 100.0;
    let raw = weight_kg.value_base / (height_m * height_m)
        + options.gender_adjustment.for_gender(gender);
    let score = options.rounding.apply(raw);
    // 분류는 반올림된 점수 기준
    let category = classify(score);
    debug!(
        "BMI 계산: {:.3} kg, {:.2} cm, {gender:?} → raw={raw:.4}, score={score}, {category:?}",
        weight_kg.value_base, height_cm.value_base
    );
    BmiResult {
        score,
        category,
        rounding: options.rounding,
    }
}

/// 점수를 체형 분류로 변환한다.
pub fn classify(score: f64) -> BodyCategory {
    BodyCategory::from_score(score)
}
