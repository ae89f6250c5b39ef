use serde::{Deserialize, Serialize};

/// 체중 입력에 쓰는 질량 단위. 내부 기준은 kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Kilogram,
    Pound,
}

/// 1 kg 당 파운드. 계산기 전통값(2.205)을 그대로 쓴다.
pub const POUNDS_PER_KG: f64 = 2.205;

fn to_kg(value: f64, unit: MassUnit) -> f64 {
    match unit {
        MassUnit::Kilogram => value,
        MassUnit::Pound => value / POUNDS_PER_KG,
    }
}

fn from_kg(value: f64, unit: MassUnit) -> f64 {
    match unit {
        MassUnit::Kilogram => value,
        MassUnit::Pound => value * POUNDS_PER_KG,
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    let base = to_kg(value, from);
    from_kg(base, to)
}
