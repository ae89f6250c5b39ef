use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_UNEXPECTED_EOF: &str = "error.unexpected_eof";
    pub const ERROR_CONFIG_IO: &str = "error.config_io";
    pub const ERROR_CONFIG_PARSE: &str = "error.config_parse";
    pub const ERROR_CONFIG_SERIALIZE: &str = "error.config_serialize";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";
    pub const ERROR_UNKNOWN_UNIT_SYSTEM: &str = "error.unknown_unit_system";
    pub const ERROR_UNKNOWN_OPTION: &str = "error.unknown_option";

    pub const CALC_HEADING: &str = "calculate.heading";
    pub const CALC_ACTIVE_SETTINGS: &str = "calculate.active_settings";
    pub const PROMPT_WEIGHT_KG: &str = "prompt.weight_kg";
    pub const PROMPT_WEIGHT_LB: &str = "prompt.weight_lb";
    pub const PROMPT_HEIGHT_CM: &str = "prompt.height_cm";
    pub const PROMPT_HEIGHT_M: &str = "prompt.height_m";
    pub const PROMPT_HEIGHT_FT: &str = "prompt.height_ft";
    pub const PROMPT_HEIGHT_IN: &str = "prompt.height_in";
    pub const PROMPT_GENDER: &str = "prompt.gender";
    pub const RESULT_SCORE: &str = "result.score";
    pub const RESULT_CATEGORY: &str = "result.category";
    pub const RESULT_NONE: &str = "result.none";
    pub const RESULT_RANGE: &str = "result.range";
    pub const NOTE_GENDER_INERT: &str = "note.gender_inert";

    pub const CATEGORY_UNDERWEIGHT: &str = "category.underweight";
    pub const CATEGORY_NORMAL_WEIGHT: &str = "category.normal_weight";
    pub const CATEGORY_MARGINALLY_OVERWEIGHT: &str = "category.marginally_overweight";
    pub const CATEGORY_OVERWEIGHT: &str = "category.overweight";
    pub const CATEGORY_OBESE: &str = "category.obese";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_CURRENT_PROFILE: &str = "settings.current_profile";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_UNIT_OPTIONS: &str = "settings.unit_options";
    pub const SETTINGS_PROFILE_OPTIONS: &str = "settings.profile_options";
    pub const SETTINGS_LANGUAGE_PROMPT: &str = "settings.language_prompt";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const PROFILE_CUSTOM: &str = "settings.profile_custom";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 섹션.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        debug!("언어팩 로드: {}", path.display());
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== BMI Calculator ===",
        MAIN_MENU_CALCULATE => "1) BMI 계산",
        MAIN_MENU_UNIT_CONVERSION => "2) 단위 변환기",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_IO => "입출력 오류:",
        ERROR_UNEXPECTED_EOF => "입력이 끝났습니다.",
        ERROR_CONFIG_IO => "설정 파일 입출력 오류:",
        ERROR_CONFIG_PARSE => "설정 파싱 오류:",
        ERROR_CONFIG_SERIALIZE => "설정 직렬화 오류:",
        ERROR_UNKNOWN_UNIT => "알 수 없는 단위:",
        ERROR_UNKNOWN_UNIT_SYSTEM => "알 수 없는 단위 시스템:",
        ERROR_UNKNOWN_OPTION => "알 수 없는 선택값:",
        CALC_HEADING => "\n-- BMI 계산 --",
        CALC_ACTIVE_SETTINGS => "적용 설정:",
        PROMPT_WEIGHT_KG => "체중 [kg]: ",
        PROMPT_WEIGHT_LB => "체중 [lb]: ",
        PROMPT_HEIGHT_CM => "신장 [cm]: ",
        PROMPT_HEIGHT_M => "신장 [m]: ",
        PROMPT_HEIGHT_FT => "신장 [ft]: ",
        PROMPT_HEIGHT_IN => "신장 [in]: ",
        PROMPT_GENDER => "성별 (1=남성, 2=여성): ",
        RESULT_SCORE => "BMI:",
        RESULT_CATEGORY => "분류:",
        RESULT_NONE => "체중/신장이 숫자가 아니어서 결과가 없습니다.",
        RESULT_RANGE => "분류 구간:",
        NOTE_GENDER_INERT => "참고: 현재 설정에서는 성별이 결과에 영향을 주지 않습니다.",
        CATEGORY_UNDERWEIGHT => "저체중",
        CATEGORY_NORMAL_WEIGHT => "정상 체중",
        CATEGORY_MARGINALLY_OVERWEIGHT => "경도 과체중",
        CATEGORY_OVERWEIGHT => "과체중",
        CATEGORY_OBESE => "비만",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 체중  2) 신장",
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: kg, lb, cm, ft): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: lb, kg, in, m): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_CURRENT_PROFILE => "현재 계산 프리셋:",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 단위 시스템  2) 계산 프리셋  3) 언어",
        SETTINGS_UNIT_OPTIONS => "1) Metric (kg, cm)  2) Imperial (lb, ft)",
        SETTINGS_PROFILE_OPTIONS => {
            "1) 현행 (cm, 성별 보정 없음, 정수)  2) 구버전 (m, 성별 ±1.0, 소수 둘째 자리)"
        }
        SETTINGS_LANGUAGE_PROMPT => "언어 코드 (auto/ko/en): ",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다:",
        PROFILE_CUSTOM => "사용자 지정",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== BMI Calculator ===",
        MAIN_MENU_CALCULATE => "1) Calculate BMI",
        MAIN_MENU_UNIT_CONVERSION => "2) Unit Converter",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_IO => "I/O error:",
        ERROR_UNEXPECTED_EOF => "Input ended.",
        ERROR_CONFIG_IO => "Config file I/O error:",
        ERROR_CONFIG_PARSE => "Config parse error:",
        ERROR_CONFIG_SERIALIZE => "Config serialization error:",
        ERROR_UNKNOWN_UNIT => "Unknown unit:",
        ERROR_UNKNOWN_UNIT_SYSTEM => "Unknown unit system:",
        ERROR_UNKNOWN_OPTION => "Unknown option:",
        CALC_HEADING => "\n-- BMI Calculation --",
        CALC_ACTIVE_SETTINGS => "Active settings:",
        PROMPT_WEIGHT_KG => "Weight [kg]: ",
        PROMPT_WEIGHT_LB => "Weight [lb]: ",
        PROMPT_HEIGHT_CM => "Height [cm]: ",
        PROMPT_HEIGHT_M => "Height [m]: ",
        PROMPT_HEIGHT_FT => "Height [ft]: ",
        PROMPT_HEIGHT_IN => "Height [in]: ",
        PROMPT_GENDER => "Gender (1=male, 2=female): ",
        RESULT_SCORE => "BMI:",
        RESULT_CATEGORY => "Category:",
        RESULT_NONE => "No result: weight and height must be numbers.",
        RESULT_RANGE => "Category range:",
        NOTE_GENDER_INERT => "Note: gender has no effect under the current settings.",
        CATEGORY_UNDERWEIGHT => "Underweight",
        CATEGORY_NORMAL_WEIGHT => "Normal weight",
        CATEGORY_MARGINALLY_OVERWEIGHT => "Marginally Overweight",
        CATEGORY_OVERWEIGHT => "Overweight",
        CATEGORY_OBESE => "Obese",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Weight  2) Height",
        UNIT_CONVERSION_PROMPT_KIND => "Enter item number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: kg, lb, cm, ft): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: lb, kg, in, m): ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported selection.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_CURRENT_PROFILE => "Current calculation profile:",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Unit system  2) Calculation profile  3) Language",
        SETTINGS_UNIT_OPTIONS => "1) Metric (kg, cm)  2) Imperial (lb, ft)",
        SETTINGS_PROFILE_OPTIONS => {
            "1) Current (cm, no gender adjustment, integer)  2) Classic (m, gender ±1.0, two decimals)"
        }
        SETTINGS_LANGUAGE_PROMPT => "Language code (auto/ko/en): ",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings changed:",
        PROFILE_CUSTOM => "Custom",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BodyCategory;

    #[test]
    fn english_category_labels_match_canonical() {
        let tr = Translator::new("en-us");
        for category in BodyCategory::ALL {
            assert_eq!(tr.t(category.i18n_key()), category.label());
        }
    }

    #[test]
    fn unknown_code_falls_back_to_korean() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::CATEGORY_OBESE), "비만");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-gb")), "en");
    }

    #[test]
    fn pack_overrides_builtin_strings() {
        let dir = std::env::temp_dir().join(format!("bmi_calculator_pack_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("en.toml"),
            "[category]\nobese = \"Obesity\"\n",
        )
        .unwrap();
        let tr = Translator::new_with_pack("en-us", dir.to_str());
        assert_eq!(tr.t(keys::CATEGORY_OBESE), "Obesity");
        assert_eq!(tr.t(keys::CATEGORY_OVERWEIGHT), "Overweight");
        let _ = fs::remove_dir_all(&dir);
    }
}
