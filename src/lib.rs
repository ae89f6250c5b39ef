//! BMI 계산 로직을 라이브러리로 분리하여 CLI 외의 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod bmi;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod quantity;
pub mod ui_cli;
pub mod units;

pub use bmi::{compute_bmi, BmiError, BmiOptions, BmiResult, BodyCategory, Gender};
pub use conversion::UnitSystem;
