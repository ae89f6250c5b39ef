//! 체중/신장 단위 정의 및 변환 모듈 모음.

pub mod length;
pub mod mass;

pub use length::{convert_length, LengthUnit};
pub use mass::{convert_mass, MassUnit};
