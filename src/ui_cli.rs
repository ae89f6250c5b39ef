use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::bmi::{self, BmiOptions, BmiResult, BodyCategory, CalculationProfile, Gender};
use crate::config::{Config, UnitSystem};
use crate::conversion;
use crate::i18n::{keys, Translator};
use crate::quantity::QuantityKind;
use crate::units::{LengthUnit, MassUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    UnitConversion,
    Settings,
    Exit,
}

/// 설정 메뉴에서 바뀐 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    None,
    Calculation,
    Language,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATE));
    println!("{}", tr.t(keys::MAIN_MENU_UNIT_CONVERSION));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::UnitConversion),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// BMI 계산 메뉴를 처리한다. 숫자가 아닌 입력은 "결과 없음"으로 표시하고 돌아간다.
pub fn handle_calculation(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let options = &cfg.calculation;
    println!("{}", tr.t(keys::CALC_HEADING));
    println!("{} {}", tr.t(keys::CALC_ACTIVE_SETTINGS), describe_options(tr, options));
    let weight = read_line(weight_prompt(tr, options.unit_system.mass_unit()))?;
    let height = read_line(height_prompt(
        tr,
        options.unit_system.length_unit(options.metric_height_unit),
    ))?;
    let gender = read_gender(tr)?;
    let result = bmi::compute_bmi(&weight, &height, gender, options).ok();
    print_result(tr, options, result.as_ref());
    Ok(())
}

/// 결과(또는 결과 없음)를 출력한다.
pub fn print_result(tr: &Translator, options: &BmiOptions, result: Option<&BmiResult>) {
    for line in format_result(tr, options, result) {
        println!("{line}");
    }
}

/// 결과 표시 문구를 만든다.
pub fn format_result(
    tr: &Translator,
    options: &BmiOptions,
    result: Option<&BmiResult>,
) -> Vec<String> {
    let mut lines = Vec::new();
    match result {
        Some(r) => {
            lines.push(format!("{} {}", tr.t(keys::RESULT_SCORE), r.formatted_score()));
            lines.push(format!(
                "{} {}",
                tr.t(keys::RESULT_CATEGORY),
                tr.t(r.category.i18n_key())
            ));
            lines.push(format!(
                "{} {}",
                tr.t(keys::RESULT_RANGE),
                describe_range(r.category)
            ));
            if options.gender_adjustment.is_inert() {
                lines.push(tr.t(keys::NOTE_GENDER_INERT).to_string());
            }
        }
        None => lines.push(tr.t(keys::RESULT_NONE).to_string()),
    }
    lines
}

/// 분류 구간을 `하한 ≤ BMI < 상한` 형태로 표시한다.
fn describe_range(category: BodyCategory) -> String {
    match category.score_range() {
        (Some(lower), Some(upper)) => format!("{lower} ≤ BMI < {upper}"),
        (None, Some(upper)) => format!("BMI < {upper}"),
        (Some(lower), None) => format!("BMI ≥ {lower}"),
        (None, None) => "BMI".to_string(),
    }
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        match sel.trim() {
            "1" => break QuantityKind::Weight,
            "2" => break QuantityKind::Height,
            _ => println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED)),
        }
    };
    let value = read_f64(tr, tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    println!("{}", format_conversion(tr, kind, value, &from_unit, &to_unit));
    Ok(())
}

/// 변환 결과 문구를 만든다. 알 수 없는 단위는 오류 문구로 돌려주고 메뉴는 계속된다.
pub fn format_conversion(
    tr: &Translator,
    kind: QuantityKind,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> String {
    match conversion::convert(kind, value, from_unit.trim(), to_unit.trim()) {
        Ok(result) => format!(
            "{} {result:.4} {}",
            tr.t(keys::UNIT_CONVERSION_RESULT),
            to_unit.trim()
        ),
        Err(e) => {
            let err = AppError::from(e);
            format!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized_message(tr))
        }
    }
}

/// 설정 메뉴를 처리하고 바뀐 항목을 돌려준다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<SettingsChange, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {:?}",
        tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM),
        cfg.calculation.unit_system
    );
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_PROFILE),
        profile_name(tr, &cfg.calculation)
    );
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let changed = match sel.trim() {
        "" => return Ok(SettingsChange::None),
        "1" => {
            println!("{}", tr.t(keys::SETTINGS_UNIT_OPTIONS));
            match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => {
                    cfg.set_unit_system(UnitSystem::Metric);
                    SettingsChange::Calculation
                }
                "2" => {
                    cfg.set_unit_system(UnitSystem::Imperial);
                    SettingsChange::Calculation
                }
                _ => SettingsChange::None,
            }
        }
        "2" => {
            println!("{}", tr.t(keys::SETTINGS_PROFILE_OPTIONS));
            match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => {
                    cfg.apply_profile(CalculationProfile::Current);
                    SettingsChange::Calculation
                }
                "2" => {
                    cfg.apply_profile(CalculationProfile::Classic);
                    SettingsChange::Calculation
                }
                _ => SettingsChange::None,
            }
        }
        "3" => {
            let lang = read_line(tr.t(keys::SETTINGS_LANGUAGE_PROMPT))?;
            match lang.trim().to_lowercase().as_str() {
                code @ ("auto" | "ko" | "en") => {
                    cfg.language = code.to_string();
                    SettingsChange::Language
                }
                _ => SettingsChange::None,
            }
        }
        _ => SettingsChange::None,
    };
    if changed != SettingsChange::None {
        println!("{} {}", tr.t(keys::SETTINGS_SAVED), describe_options(tr, &cfg.calculation));
    } else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
    }
    Ok(changed)
}

/// 계산 옵션을 한 줄로 요약한다.
pub fn describe_options(tr: &Translator, options: &BmiOptions) -> String {
    let mass = match options.unit_system.mass_unit() {
        MassUnit::Kilogram => "kg",
        MassUnit::Pound => "lb",
    };
    format!(
        "{:?} ({mass}, {}), {}",
        options.unit_system,
        length_symbol(options.unit_system.length_unit(options.metric_height_unit)),
        profile_name(tr, options)
    )
}

fn profile_name(tr: &Translator, options: &BmiOptions) -> String {
    match options.profile() {
        Some(p) => format!("{p:?}"),
        None => tr.t(keys::PROFILE_CUSTOM).to_string(),
    }
}

fn length_symbol(unit: LengthUnit) -> &'static str {
    match unit {
        LengthUnit::Centimeter => "cm",
        LengthUnit::Meter => "m",
        LengthUnit::Foot => "ft",
        LengthUnit::Inch => "in",
    }
}

fn weight_prompt(tr: &Translator, unit: MassUnit) -> &str {
    match unit {
        MassUnit::Kilogram => tr.t(keys::PROMPT_WEIGHT_KG),
        MassUnit::Pound => tr.t(keys::PROMPT_WEIGHT_LB),
    }
}

fn height_prompt(tr: &Translator, unit: LengthUnit) -> &str {
    match unit {
        LengthUnit::Centimeter => tr.t(keys::PROMPT_HEIGHT_CM),
        LengthUnit::Meter => tr.t(keys::PROMPT_HEIGHT_M),
        LengthUnit::Foot => tr.t(keys::PROMPT_HEIGHT_FT),
        LengthUnit::Inch => tr.t(keys::PROMPT_HEIGHT_IN),
    }
}

fn read_gender(tr: &Translator) -> Result<Gender, AppError> {
    loop {
        let sel = read_line(tr.t(keys::PROMPT_GENDER))?;
        let gender = match sel.trim() {
            "1" => Some(Gender::Male),
            "2" => Some(Gender::Female),
            other => other.parse::<Gender>().ok(),
        };
        match gender {
            Some(g) => return Ok(g),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 0바이트(EOF)면 `UnexpectedEof`.
pub fn read_line_from<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(AppError::UnexpectedEof);
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_result_is_reported_not_scored() {
        let tr = Translator::new("en");
        let lines = format_result(&tr, &BmiOptions::current(), None);
        assert_eq!(lines, vec![tr.t(keys::RESULT_NONE).to_string()]);
    }

    #[test]
    fn classic_result_shows_two_decimals_without_inert_note() {
        let tr = Translator::new("en");
        let options = BmiOptions::classic();
        let result = bmi::compute_bmi("70", "1.75", Gender::Male, &options).unwrap();
        let lines = format_result(&tr, &options, Some(&result));
        assert_eq!(
            lines,
            vec![
                "BMI: 23.86",
                "Category: Normal weight",
                "Category range: 18.5 ≤ BMI < 24.9",
            ]
        );
    }

    #[test]
    fn open_ended_categories_show_one_bound() {
        let tr = Translator::new("en");
        let options = BmiOptions::current();
        let thin = bmi::compute_bmi("40", "175", Gender::Male, &options).unwrap();
        let heavy = bmi::compute_bmi("120", "170", Gender::Male, &options).unwrap();
        assert_eq!(format_result(&tr, &options, Some(&thin))[2], "Category range: BMI < 18.5");
        assert_eq!(format_result(&tr, &options, Some(&heavy))[2], "Category range: BMI ≥ 34.9");
    }

    #[test]
    fn current_result_flags_inert_gender() {
        let tr = Translator::new("ko");
        let options = BmiOptions::current();
        let result = bmi::compute_bmi("70", "175", Gender::Female, &options).unwrap();
        let lines = format_result(&tr, &options, Some(&result));
        assert_eq!(lines[0], "BMI: 23");
        assert_eq!(lines[1], "분류: 정상 체중");
        assert_eq!(lines[2], "분류 구간: 18.5 ≤ BMI < 24.9");
        assert_eq!(lines[3], tr.t(keys::NOTE_GENDER_INERT));
    }

    #[test]
    fn describe_imperial_classic() {
        let tr = Translator::new("en");
        let options = CalculationProfile::Classic.options(UnitSystem::Imperial);
        assert_eq!(describe_options(&tr, &options), "Imperial (lb, ft), Classic");
    }

    #[test]
    fn read_line_reports_end_of_input() {
        let mut input = io::Cursor::new("");
        assert!(matches!(
            read_line_from(&mut input, "> "),
            Err(AppError::UnexpectedEof)
        ));
    }

    #[test]
    fn read_line_returns_each_line_then_eof() {
        let mut input = io::Cursor::new("1\n\n");
        assert_eq!(read_line_from(&mut input, "> ").unwrap(), "1\n");
        // 빈 줄은 EOF가 아니다.
        assert_eq!(read_line_from(&mut input, "> ").unwrap(), "\n");
        assert!(matches!(
            read_line_from(&mut input, "> "),
            Err(AppError::UnexpectedEof)
        ));
    }

    #[test]
    fn unknown_unit_is_reported_in_session_language() {
        let en = Translator::new("en");
        let ko = Translator::new("ko");
        assert_eq!(
            format_conversion(&en, QuantityKind::Weight, 1.0, "furlong\n", "kg\n"),
            "Error: Unknown unit: furlong"
        );
        assert_eq!(
            format_conversion(&ko, QuantityKind::Weight, 1.0, "furlong", "kg"),
            "오류: 알 수 없는 단위: furlong"
        );
    }

    #[test]
    fn conversion_result_uses_target_unit() {
        let tr = Translator::new("en");
        assert_eq!(
            format_conversion(&tr, QuantityKind::Height, 6.0, "ft\n", "cm\n"),
            "Result: 182.8800 cm"
        );
    }
}
