use std::path::PathBuf;
use std::process::ExitCode;

use bmi_calculator::{
    app::{self, AppError, CalculationRequest},
    bmi::{CalculationProfile, Gender},
    config::{self, UnitSystem},
    i18n::{self, keys, Translator},
};
use clap::Parser;
use log::{debug, error};

/// 체중/신장으로 BMI를 계산하고 체형을 분류한다.
#[derive(Debug, Parser)]
#[command(name = "bmi_calculator", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// UI 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 계산 프리셋 (current/classic)
    #[arg(long)]
    profile: Option<CalculationProfile>,
    /// 단위 시스템 (metric/imperial)
    #[arg(long)]
    units: Option<UnitSystem>,
    /// 성별 (male/female)
    #[arg(long, default_value = "male")]
    gender: Gender,
    /// 체중. --height와 함께 주면 한 번만 계산하고 종료한다.
    #[arg(long, requires = "height", allow_hyphen_values = true)]
    weight: Option<String>,
    /// 신장
    #[arg(long, requires = "weight", allow_hyphen_values = true)]
    height: Option<String>,
    /// 디버그 로그 출력
    #[arg(long, short)]
    verbose: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match try_run(cli) {
        Ok(code) => code,
        Err((tr, err)) => {
            error!("{err:?}");
            eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized_message(&tr));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, (Translator, AppError)> {
    let fallback = Translator::new(&i18n::resolve_language(&cli.lang, None));
    let mut cfg = config::load_or_default(&cli.config).map_err(|e| (fallback, e.into()))?;

    if let Some(units) = cli.units {
        cfg.set_unit_system(units);
    }
    if let Some(profile) = cli.profile {
        cfg.apply_profile(profile);
    }
    let mut tr = app::session_translator(&cli.lang, &cfg);
    debug!("언어: {}, 계산 옵션: {:?}", tr.language_code(), cfg.calculation);

    match (cli.weight, cli.height) {
        (Some(weight), Some(height)) => {
            let request = CalculationRequest {
                weight,
                height,
                gender: cli.gender,
            };
            match app::run_once(&cfg, &tr, &request) {
                Some(_) => Ok(ExitCode::SUCCESS),
                // 결과 없음은 안내만 하고 종료 코드로 구분한다.
                None => Ok(ExitCode::from(2)),
            }
        }
        _ => {
            app::run(&mut cfg, &mut tr, &cli.lang).map_err(|e| (tr.clone(), e))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
