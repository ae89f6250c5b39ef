use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::{QuantityKind, QuantityValue};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 알 수 없는 단위 시스템 이름
    #[error("알 수 없는 단위 시스템: {0}")]
    UnknownUnitSystem(String),
    /// 성별/프리셋 등 알 수 없는 선택값
    #[error("알 수 없는 선택값: {0}")]
    UnknownOption(String),
}

impl ConversionError {
    /// 화면 표시용 번역 키.
    pub fn i18n_key(&self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            ConversionError::UnknownUnit(_) => ERROR_UNKNOWN_UNIT,
            ConversionError::UnknownUnitSystem(_) => ERROR_UNKNOWN_UNIT_SYSTEM,
            ConversionError::UnknownOption(_) => ERROR_UNKNOWN_OPTION,
        }
    }

    /// 거부된 입력 문자열.
    pub fn input(&self) -> &str {
        match self {
            ConversionError::UnknownUnit(s)
            | ConversionError::UnknownUnitSystem(s)
            | ConversionError::UnknownOption(s) => s,
        }
    }
}

/// 체중/신장 입력에 적용하는 단위 시스템.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// kg + cm (미터 입력 설정 가능)
    #[default]
    Metric,
    /// lb + ft
    Imperial,
}

impl UnitSystem {
    /// 체중 입력 단위.
    pub fn mass_unit(self) -> MassUnit {
        match self {
            UnitSystem::Metric => MassUnit::Kilogram,
            UnitSystem::Imperial => MassUnit::Pound,
        }
    }

    /// 신장 입력 단위. 미터법에서는 설정된 미터법 신장 단위를 따른다.
    pub fn length_unit(self, metric_height: LengthUnit) -> LengthUnit {
        match self {
            UnitSystem::Metric => metric_height,
            UnitSystem::Imperial => LengthUnit::Foot,
        }
    }
}

impl FromStr for UnitSystem {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" | "m" => Ok(UnitSystem::Metric),
            "imperial" | "us" | "i" => Ok(UnitSystem::Imperial),
            _ => Err(ConversionError::UnknownUnitSystem(s.to_string())),
        }
    }
}

/// 입력된 체중/신장을 내부 기준(kg, cm)으로 환산한다.
pub fn to_base_units(
    weight: f64,
    height: f64,
    system: UnitSystem,
    metric_height: LengthUnit,
) -> (QuantityValue, QuantityValue) {
    let weight_kg = convert_mass(weight, system.mass_unit(), MassUnit::Kilogram);
    let height_cm = convert_length(
        height,
        system.length_unit(metric_height),
        LengthUnit::Centimeter,
    );
    (
        QuantityValue {
            kind: QuantityKind::Weight,
            value_base: weight_kg,
        },
        QuantityValue {
            kind: QuantityKind::Height,
            value_base: height_cm,
        },
    )
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `kg`, `lb`, `cm`, `m`, `ft`, `in` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Weight => {
            let from = parse_mass_unit(from_unit_str)?;
            let to = parse_mass_unit(to_unit_str)?;
            Ok(convert_mass(value, from, to))
        }
        QuantityKind::Height => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
    }
}

pub fn parse_mass_unit(s: &str) -> Result<MassUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kg" | "kilogram" => Ok(MassUnit::Kilogram),
        "lb" | "lbs" | "pound" => Ok(MassUnit::Pound),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "cm" | "centimeter" | "centimetre" => Ok(LengthUnit::Centimeter),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
