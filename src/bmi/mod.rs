//! BMI 계산과 체형 분류 모듈 모음.

pub mod calculator;
pub mod category;

pub use calculator::*;
pub use category::BodyCategory;
