use serde::{Deserialize, Serialize};

/// 신장 입력에 쓰는 길이 단위. 내부 기준은 센티미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Centimeter,
    Meter,
    Foot,
    Inch,
}

/// 1 ft 당 센티미터.
pub const CM_PER_FOOT: f64 = 30.48;

fn to_centimeter(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Centimeter => value,
        LengthUnit::Meter => value * 100.0,
        LengthUnit::Foot => value * CM_PER_FOOT,
        LengthUnit::Inch => value * CM_PER_FOOT / 12.0,
    }
}

fn from_centimeter(value_cm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Centimeter => value_cm,
        LengthUnit::Meter => value_cm / 100.0,
        LengthUnit::Foot => value_cm / CM_PER_FOOT,
        LengthUnit::Inch => value_cm * 12.0 / CM_PER_FOOT,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let cm = to_centimeter(value, from);
    from_centimeter(cm, to)
}
