//! Ames Prep - подготовка данных о продажах домов для статистических моделей

pub mod error;
pub mod types;
pub mod preprocessing;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use error::{CleaningError, Result};
pub use types::*;
pub use preprocessing::*;
pub use pipeline::HousingCleaner;
