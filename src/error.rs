//! Ошибки предобработки

use thiserror::Error;

/// Ошибки очистки и обогащения таблицы
#[derive(Debug, Error)]
pub enum CleaningError {
    /// Параметр вне допустимого диапазона
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// В таблице нет ожидаемого столбца
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Неизвестная стратегия заполнения пропусков
    #[error("Unrecognized fill strategy: {0:?} (expected \"0\" or \"mean\")")]
    UnsupportedFillStrategy(String),

    /// Нет ни одного числового столбца
    #[error("No numeric columns found in the table")]
    NoNumericColumns,

    /// Для категориального столбца нет словаря
    #[error("No vocabulary recorded for categorical column: {0}")]
    VocabularyMismatch(String),

    #[error("Column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// В числовом столбце остались пропуски
    #[error("Column {0} still contains missing values")]
    MissingValues(String),

    #[error("Cleaner not fitted")]
    NotFitted,

    #[error("Vocabulary serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CleaningError>;
