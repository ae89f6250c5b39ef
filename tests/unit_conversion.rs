//! 체중/신장 단위 변환 회귀 테스트.
use bmi_calculator::conversion::{self, to_base_units, ConversionError};
use bmi_calculator::quantity::QuantityKind;
use bmi_calculator::units::{convert_length, convert_mass, LengthUnit, MassUnit};
use bmi_calculator::UnitSystem;

#[test]
fn pounds_use_calculator_factor() {
    let kg = convert_mass(220.5, MassUnit::Pound, MassUnit::Kilogram);
    assert!((kg - 100.0).abs() < 1e-9);
}

#[test]
fn feet_and_inches_to_centimeters() {
    assert!((convert_length(6.0, LengthUnit::Foot, LengthUnit::Centimeter) - 182.88).abs() < 1e-9);
    assert!((convert_length(12.0, LengthUnit::Inch, LengthUnit::Foot) - 1.0).abs() < 1e-12);
    assert!((convert_length(1.75, LengthUnit::Meter, LengthUnit::Centimeter) - 175.0).abs() < 1e-9);
}

#[test]
fn base_units_follow_unit_system() {
    let (w, h) = to_base_units(70.0, 175.0, UnitSystem::Metric, LengthUnit::Centimeter);
    assert_eq!((w.value_base, h.value_base), (70.0, 175.0));
    assert_eq!(w.kind, QuantityKind::Weight);

    let (w, h) = to_base_units(70.0, 1.75, UnitSystem::Metric, LengthUnit::Meter);
    assert!((h.value_base - 175.0).abs() < 1e-9);
    assert_eq!(w.value_base, 70.0);

    // 미터법 신장 설정은 야드파운드법에서 무시된다
    let (w, h) = to_base_units(154.35, 5.0, UnitSystem::Imperial, LengthUnit::Meter);
    assert!((w.value_base - 70.0).abs() < 1e-9);
    assert!((h.value_base - 152.4).abs() < 1e-9);
}

#[test]
fn string_units_convert() {
    let lb = conversion::convert(QuantityKind::Weight, 10.0, "kg", "lbs").unwrap();
    assert!((lb - 22.05).abs() < 1e-9);
    let inch = conversion::convert(QuantityKind::Height, 30.48, "CM", "in").unwrap();
    assert!((inch - 12.0).abs() < 1e-9);
}

#[test]
fn unknown_unit_is_rejected() {
    let err = conversion::convert(QuantityKind::Height, 1.0, "cm", "furlong").unwrap_err();
    assert!(matches!(err, ConversionError::UnknownUnit(u) if u == "furlong"));
    // 질량 단위를 신장 변환에 쓰면 거부
    assert!(conversion::convert(QuantityKind::Height, 1.0, "kg", "cm").is_err());
}

#[test]
fn unit_system_names() {
    assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
    assert_eq!(" metric ".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
    assert!(matches!(
        "cubits".parse::<UnitSystem>(),
        Err(ConversionError::UnknownUnitSystem(_))
    ));
}
