//! Ограничение выбросов сверху по перцентилю

use crate::error::{CleaningError, Result};
use crate::types::{Column, ColumnData, Table};

/// Перцентиль `q` (0-100) с линейной интерполяцией между рангами.
/// Возвращает `None` для пустого среза.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub struct OutlierCapper;

impl OutlierCapper {
    /// Заменяет значения выше `upper_limit`-го перцентиля на сам перцентиль.
    ///
    /// Каждый числовой столбец обрабатывается независимо, нижний хвост не трогается.
    /// Столбцы с пропусками остаются как есть: перцентиль для них не определён.
    pub fn cap(table: Table, upper_limit: f64) -> Result<Table> {
        if !(upper_limit > 0.0 && upper_limit < 100.0) {
            return Err(CleaningError::InvalidParameter {
                name: "upper_limit",
                value: upper_limit,
                reason: "must be strictly between 0 and 100",
            });
        }

        if table.numeric_names().is_empty() {
            return Err(CleaningError::NoNumericColumns);
        }

        let mut columns = Vec::with_capacity(table.n_cols());
        for Column { name, data } in table.into_columns() {
            let data = match data {
                ColumnData::Numeric(values) => {
                    ColumnData::Numeric(Self::cap_column(&name, values, upper_limit))
                }
                categorical => categorical,
            };
            columns.push(Column { name, data });
        }

        Table::from_columns(columns)
    }

    fn cap_column(name: &str, values: Vec<Option<f64>>, upper_limit: f64) -> Vec<Option<f64>> {
        let observed: Option<Vec<f64>> = values.iter().copied().collect();
        let Some(observed) = observed else {
            tracing::warn!("Column {} has missing values, skipping outlier capping", name);
            return values;
        };

        let Some(limit) = percentile(&observed, upper_limit) else {
            return values;
        };

        let capped = observed.iter().filter(|v| **v > limit).count();
        tracing::debug!("Column {}: capped {} values at {:.4}", name, capped, limit);

        observed
            .into_iter()
            .map(|v| Some(if v > limit { limit } else { v }))
            .collect()
    }
}
