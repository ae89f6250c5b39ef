//! `--weight`/`--height` 한 번 계산 경로 테스트

use bmi_calculator::app::{self, CalculationRequest};
use bmi_calculator::bmi::{CalculationProfile, Gender};
use bmi_calculator::config::Config;
use bmi_calculator::i18n::Translator;
use bmi_calculator::BodyCategory;

fn request(weight: &str, height: &str) -> CalculationRequest {
    CalculationRequest {
        weight: weight.to_string(),
        height: height.to_string(),
        gender: Gender::Male,
    }
}

#[test]
fn non_numeric_weight_has_no_result() {
    let cfg = Config::default();
    let tr = Translator::new("en");
    assert!(app::run_once(&cfg, &tr, &request("abc", "175")).is_none());
    assert!(app::run_once(&cfg, &tr, &request("70", "")).is_none());
}

#[test]
fn default_settings_score_metric_input() {
    let cfg = Config::default();
    let tr = Translator::new("en");
    let result = app::run_once(&cfg, &tr, &request("70", "175")).unwrap();
    assert_eq!(result.score, 23.0);
    assert_eq!(result.category, BodyCategory::NormalWeight);
}

#[test]
fn applied_profile_reaches_one_shot() {
    let mut cfg = Config::default();
    cfg.apply_profile(CalculationProfile::Classic);
    let tr = Translator::new("en");
    let result = app::run_once(&cfg, &tr, &request("70", "1.75")).unwrap();
    assert!((result.score - 23.86).abs() < 1e-9);
    assert_eq!(result.formatted_score(), "23.86");
}
