use crate::bmi::BmiError;

/// 계산기가 받는 입력 항목 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Weight,
    Height,
}

impl QuantityKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuantityKind::Weight => "weight",
            QuantityKind::Height => "height",
        }
    }
}

/// 내부 기준 단위로 환산된 값을 담는 컨테이너.
///
/// `value_base`는 체중이면 kg, 신장이면 cm로 저장한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityValue {
    pub kind: QuantityKind,
    pub value_base: f64,
}

/// 사용자가 입력한 문자열을 실수로 해석한다.
///
/// 앞뒤 공백은 무시한다. 숫자가 아니거나 NaN/무한대이면 `InvalidNumericInput`.
/// 범위(음수 등)는 검사하지 않는다.
pub fn parse_measurement(kind: QuantityKind, text: &str) -> Result<f64, BmiError> {
    let invalid = || BmiError::InvalidNumericInput {
        field: kind.name(),
        input: text.to_string(),
    };
    let value = text.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}
