use log::debug;
use thiserror::Error;

use crate::bmi::{self, BmiResult, Gender};
use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::i18n::{self, keys, Translator};
use crate::ui_cli::{self, MenuChoice, SettingsChange};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
///
/// 숫자가 아닌 체중/신장 입력은 오류가 아니라 "결과 없음"으로 처리되므로 여기에 없다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 입력 스트림 종료
    #[error("입력이 끝났습니다")]
    UnexpectedEof,
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
}

impl AppError {
    /// 현재 언어로 오류 메시지를 만든다.
    pub fn localized_message(&self, tr: &Translator) -> String {
        match self {
            AppError::Io(e) => format!("{} {e}", tr.t(keys::ERROR_IO)),
            AppError::UnexpectedEof => tr.t(keys::ERROR_UNEXPECTED_EOF).to_string(),
            AppError::Config(e) => format!("{} {}", tr.t(e.i18n_key()), e.detail()),
            AppError::Conversion(e) => format!("{} {}", tr.t(e.i18n_key()), e.input()),
        }
    }
}

/// 한 번의 계산 요청.
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    pub weight: String,
    pub height: String,
    pub gender: Gender,
}

/// 세션 언어를 결정한다. CLI 플래그가 설정값보다 우선한다.
pub fn session_language(cli_lang: &str, config: &Config) -> String {
    i18n::resolve_language(cli_lang, Some(config.language.as_str()))
}

/// 세션 언어에 맞는 번역기를 만든다.
pub fn session_translator(cli_lang: &str, config: &Config) -> Translator {
    let lang = session_language(cli_lang, config);
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// 요청 하나를 계산해 결과 문구를 출력한다. 결과가 없으면 None.
pub fn run_once(
    config: &Config,
    tr: &Translator,
    request: &CalculationRequest,
) -> Option<BmiResult> {
    let result = bmi::compute_bmi(
        &request.weight,
        &request.height,
        request.gender,
        &config.calculation,
    )
    .ok();
    ui_cli::print_result(tr, &config.calculation, result.as_ref());
    result
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 입력이 끝나면(EOF) 종료 메뉴와 같이 설정을 저장하고 빠져나온다.
pub fn run(config: &mut Config, tr: &mut Translator, cli_lang: &str) -> Result<(), AppError> {
    let mut cli_lang = cli_lang.to_string();
    loop {
        match step(config, tr, &mut cli_lang) {
            Ok(true) => {}
            Ok(false) => break,
            Err(AppError::UnexpectedEof) => {
                debug!("입력 종료, 설정 저장 후 종료");
                config.save()?;
                println!();
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// 메뉴 한 번을 처리한다. 계속 진행하면 true.
fn step(
    config: &mut Config,
    tr: &mut Translator,
    cli_lang: &mut String,
) -> Result<bool, AppError> {
    match ui_cli::main_menu(tr)? {
        MenuChoice::Calculate => ui_cli::handle_calculation(tr, config)?,
        MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(tr)?,
        MenuChoice::Settings => match ui_cli::handle_settings(tr, config)? {
            SettingsChange::None => {}
            SettingsChange::Calculation => config.save()?,
            SettingsChange::Language => {
                config.save()?;
                // 세션 중 직접 고른 언어가 시작 플래그보다 우선한다.
                *cli_lang = config.language.clone();
                *tr = session_translator(cli_lang.as_str(), config);
            }
        },
        MenuChoice::Exit => {
            config.save()?;
            println!("{}", tr.t(keys::APP_EXIT));
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn cli_language_survives_unrelated_settings() {
        let mut cfg = Config::default();
        assert_eq!(session_language("en", &cfg), "en");
        cfg.set_unit_system(crate::config::UnitSystem::Imperial);
        assert_eq!(session_language("en", &cfg), "en");
        assert_eq!(session_translator("en", &cfg).language(), Language::En);
    }

    #[test]
    fn config_language_used_without_flag() {
        let mut cfg = Config::default();
        cfg.language = "ko".into();
        assert_eq!(session_language("auto", &cfg), "ko");
        assert_eq!(session_language("en", &cfg), "en");
    }

    #[test]
    fn errors_follow_session_language() {
        let err = AppError::from(ConversionError::UnknownUnit("furlong".into()));
        assert_eq!(
            err.localized_message(&Translator::new("en")),
            "Unknown unit: furlong"
        );
        assert_eq!(
            err.localized_message(&Translator::new("ko")),
            "알 수 없는 단위: furlong"
        );
        assert_eq!(
            AppError::UnexpectedEof.localized_message(&Translator::new("en")),
            "Input ended."
        );
    }
}
