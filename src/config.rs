use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use log::{info, warn};

use crate::bmi::{BmiOptions, CalculationProfile};
pub use crate::conversion::UnitSystem;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn default_language() -> String {
    "auto".to_string()
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// UI 언어 코드 (auto/ko/en)
    #[serde(default = "default_language")]
    pub language: String,
    /// 외부 언어팩 디렉터리
    #[serde(default)]
    pub language_pack_dir: Option<String>,
    /// BMI 계산 옵션
    #[serde(default)]
    pub calculation: BmiOptions,
    /// 저장 위치. 파일에는 기록하지 않는다.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            language_pack_dir: None,
            calculation: BmiOptions::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// 화면 표시용 번역 키.
    pub fn i18n_key(&self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            ConfigError::Io(_) => ERROR_CONFIG_IO,
            ConfigError::Parse(_) => ERROR_CONFIG_PARSE,
            ConfigError::Serialize(_) => ERROR_CONFIG_SERIALIZE,
        }
    }

    /// 원인 오류 메시지.
    pub fn detail(&self) -> String {
        match self {
            ConfigError::Io(e) => e.to_string(),
            ConfigError::Parse(e) => e.to_string(),
            ConfigError::Serialize(e) => e.to_string(),
        }
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!("설정 로드: {}", path.display());
        cfg
    } else {
        warn!("{} 없음, 기본 설정으로 생성", path.display());
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 파일(없으면 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }

    /// 단위 시스템만 바꾼다. 나머지 계산 옵션은 유지한다.
    pub fn set_unit_system(&mut self, system: UnitSystem) {
        self.calculation.unit_system = system;
    }

    /// 프리셋을 적용한다. 단위 시스템은 유지한다.
    pub fn apply_profile(&mut self, profile: CalculationProfile) {
        self.calculation = profile.options(self.calculation.unit_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::Rounding;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bmi_calculator_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn missing_file_creates_default() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.calculation, BmiOptions::current());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_profile_survives_reload() {
        let path = temp_path("reload");
        let _ = fs::remove_file(&path);
        let mut cfg = load_or_default(&path).unwrap();
        cfg.set_unit_system(UnitSystem::Imperial);
        cfg.apply_profile(CalculationProfile::Classic);
        cfg.language = "ko".into();
        cfg.save().unwrap();

        let loaded = load_or_default(&path).unwrap();
        assert_eq!(loaded.language, "ko");
        assert_eq!(loaded.calculation.unit_system, UnitSystem::Imperial);
        assert_eq!(loaded.calculation.rounding, Rounding::TwoDecimals);
        assert_eq!(loaded.calculation.profile(), Some(CalculationProfile::Classic));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [calculation]
            rounding = "TwoDecimals"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.language, "auto");
        assert_eq!(cfg.calculation.rounding, Rounding::TwoDecimals);
        assert_eq!(cfg.calculation.unit_system, UnitSystem::Metric);
        assert_eq!(cfg.calculation.profile(), None);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let path = temp_path("bad");
        fs::write(&path, "calculation = 3").unwrap();
        let err = load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(&path);
    }
}
