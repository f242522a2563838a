//! Feature engineering для данных о продажах домов

use crate::error::{CleaningError, Result};
use crate::preprocessing::categories::{CategoryCollapser, CollapseMode};
use crate::preprocessing::columns::{
    required_columns, Arith, CATEGORICAL_FILL, CATEGORY_THRESHOLD, DERIVED, DROPPED,
    GARAGE_CAR_VALUES, MISSING_LABEL, NEW_CONSTRUCTION_AGE, NO, NUMBER_WORDS, ORDINAL_TO_WORDS,
    PORCH_PARTS, PRESENCE_BY_MISSING, PRESENCE_BY_NONZERO, RENAMES, YES,
};
use crate::types::{ColumnData, FillStrategy, Table, Vocabulary};

pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Полный цикл построения признаков с порогом редкости 20.
    ///
    /// Без словаря (или с пустым) категории обучаются на этой таблице,
    /// с непустым словарём - применяются.
    /// Возвращает обогащённую таблицу и словарь категорий.
    pub fn build(
        table: Table,
        fill: FillStrategy,
        vocabulary: Option<&Vocabulary>,
    ) -> Result<(Table, Vocabulary)> {
        Self::build_with_threshold(table, fill, vocabulary, CATEGORY_THRESHOLD)
    }

    pub fn build_with_threshold(
        table: Table,
        fill: FillStrategy,
        vocabulary: Option<&Vocabulary>,
        threshold: usize,
    ) -> Result<(Table, Vocabulary)> {
        let table = Self::normalize_names(table);
        Self::check_schema(&table)?;

        let table = Self::add_presence_indicators(table)?;
        let table = Self::add_garage_flags(table)?;
        let table = Self::fill_categorical(table)?;
        let table = Self::ordinal_to_words(table)?;
        let table = Self::add_derived(table)?;
        let table = Self::fill_numeric(table, fill);

        // Пустой словарь равносилен его отсутствию
        let mode = match vocabulary {
            Some(vocabulary) if !vocabulary.is_empty() => CollapseMode::Apply(vocabulary),
            _ => CollapseMode::Fit { threshold },
        };
        let (table, vocabulary) = CategoryCollapser::collapse(table, mode)?;

        let table = Self::numeric_first(table)?.drop_columns(DROPPED);

        tracing::info!(
            "Built features: {} rows, {} columns, {} categorical vocabularies",
            table.n_rows(),
            table.n_cols(),
            vocabulary.len()
        );
        Ok((table, vocabulary))
    }

    /// Имена в нижнем регистре, пробелы -> `_`, затем известные переименования
    pub fn normalize_names(table: Table) -> Table {
        table.rename_with(|name| {
            let normalized = name.to_lowercase().replace(' ', "_");
            RENAMES
                .iter()
                .find(|(from, _)| *from == normalized)
                .map(|(_, to)| to.to_string())
                .unwrap_or(normalized)
        })
    }

    fn check_schema(table: &Table) -> Result<()> {
        match required_columns().into_iter().find(|c| !table.contains(c)) {
            Some(missing) => Err(CleaningError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    fn add_presence_indicators(mut table: Table) -> Result<Table> {
        for (source, target) in PRESENCE_BY_MISSING {
            let present: Vec<bool> = match table.column(source) {
                Some(ColumnData::Numeric(values)) => values.iter().map(Option::is_some).collect(),
                Some(ColumnData::Categorical(values)) => values.iter().map(Option::is_some).collect(),
                None => return Err(CleaningError::MissingColumn(source.to_string())),
            };
            table.set_column(*target, yes_no(present))?;
        }

        let mut porch = vec![Some(0.0); table.n_rows()];
        for part in PORCH_PARTS {
            porch = combine(&porch, table.numeric(part)?, |a, b| a + b);
        }
        table.push_numeric("porch_sf", porch)?;

        for source in PRESENCE_BY_NONZERO {
            // Пропуск не равен нулю, поэтому считается наличием
            let present: Vec<bool> = table
                .numeric(source)?
                .iter()
                .map(|v| *v != Some(0.0))
                .collect();
            table.set_column(format!("have_{source}"), yes_no(present))?;
        }

        tracing::debug!("Presence indicators added, {} columns", table.n_cols());
        Ok(table)
    }

    fn add_garage_flags(mut table: Table) -> Result<Table> {
        for value in GARAGE_CAR_VALUES {
            let flags: Vec<bool> = table
                .numeric("garage_cars")?
                .iter()
                .map(|v| *v == Some(f64::from(*value)))
                .collect();
            table.set_column(format!("garage_cars_{value}"), yes_no(flags))?;
        }

        let unfinished: Vec<bool> = as_labels("bsmtfin_type_2", &table)?
            .iter()
            .map(|v| v.as_deref() == Some("unf"))
            .collect();
        table.set_column("bsmtfin_type_2_unf", yes_no(unfinished))?;

        Ok(table)
    }

    fn fill_categorical(mut table: Table) -> Result<Table> {
        for name in CATEGORICAL_FILL {
            let filled: Vec<Option<String>> = as_labels(name, &table)?
                .into_iter()
                .map(|v| Some(v.unwrap_or_else(|| MISSING_LABEL.to_string())))
                .collect();
            table.push_categorical(*name, filled)?;
        }
        Ok(table)
    }

    /// Оценки 1-10 становятся словами и дальше кодируются как категории
    fn ordinal_to_words(mut table: Table) -> Result<Table> {
        for name in ORDINAL_TO_WORDS {
            let words: Vec<Option<String>> = table
                .numeric(name)?
                .iter()
                .map(|v| v.and_then(number_word).map(str::to_string))
                .collect();
            table.push_categorical(*name, words)?;
        }
        Ok(table)
    }

    fn add_derived(mut table: Table) -> Result<Table> {
        for (target, left, op, right) in DERIVED {
            let values = {
                let left = table.numeric(left)?;
                let right = table.numeric(right)?;
                match *op {
                    Arith::WeightedSum(weight) => combine(left, right, |a, b| a + weight * b),
                    Arith::Difference => combine(left, right, |a, b| a - b),
                    Arith::Product => combine(left, right, |a, b| a * b),
                }
            };
            table.push_numeric(*target, values)?;

            if *target == "age" {
                let new: Vec<bool> = table
                    .numeric("age")?
                    .iter()
                    .map(|v| v.map_or(false, |age| age < NEW_CONSTRUCTION_AGE))
                    .collect();
                table.set_column("new_construction", yes_no(new))?;
            }
        }

        let remodeled: Vec<bool> = table
            .numeric("year_built")?
            .iter()
            .zip(table.numeric("year_remod")?)
            .map(|(built, remod)| !matches!((built, remod), (Some(b), Some(r)) if b == r))
            .collect();
        table.set_column("house_remodeled", yes_no(remodeled))?;

        tracing::debug!("Derived features added, {} columns", table.n_cols());
        Ok(table)
    }

    /// Заполняет пропуски во всех числовых столбцах по текущему состоянию таблицы
    fn fill_numeric(mut table: Table, fill: FillStrategy) -> Table {
        let names: Vec<String> = table
            .numeric_names()
            .into_iter()
            .filter(|name| table.missing_count(name).unwrap_or(0) > 0)
            .map(str::to_string)
            .collect();

        for name in &names {
            if let Some(ColumnData::Numeric(values)) = table.column_mut(name) {
                let value = match fill {
                    FillStrategy::Zero => 0.0,
                    FillStrategy::Mean => mean(values).unwrap_or_else(|| {
                        tracing::warn!("Column {} has no observed values, filling with 0", name);
                        0.0
                    }),
                };
                for v in values.iter_mut().filter(|v| v.is_none()) {
                    *v = Some(value);
                }
            }
        }

        tracing::debug!("Filled {} numeric columns with strategy {}", names.len(), fill);
        table
    }

    /// Числовые столбцы, затем категориальные; порядок внутри групп сохраняется
    fn numeric_first(table: Table) -> Result<Table> {
        let (numeric, categorical): (Vec<_>, Vec<_>) = table
            .into_columns()
            .into_iter()
            .partition(|c| c.data.is_numeric());
        Table::from_columns(numeric.into_iter().chain(categorical).collect())
    }
}

fn yes_no(flags: Vec<bool>) -> ColumnData {
    ColumnData::Categorical(
        flags
            .into_iter()
            .map(|flag| Some(if flag { YES } else { NO }.to_string()))
            .collect(),
    )
}

/// Поэлементная операция; пропуск в любом операнде даёт пропуск
fn combine<F: Fn(f64, f64) -> f64>(
    left: &[Option<f64>],
    right: &[Option<f64>],
    f: F,
) -> Vec<Option<f64>> {
    left.iter()
        .zip(right)
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(f(*a, *b)),
            _ => None,
        })
        .collect()
}

/// Столбец как метки; числовой (например, целиком пустой) приводится к строкам
fn as_labels(name: &str, table: &Table) -> Result<Vec<Option<String>>> {
    match table.column(name) {
        Some(ColumnData::Categorical(values)) => Ok(values.clone()),
        Some(ColumnData::Numeric(values)) => Ok(values.iter().map(|v| v.map(format_number)).collect()),
        None => Err(CleaningError::MissingColumn(name.to_string())),
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn number_word(value: f64) -> Option<&'static str> {
    if value.fract() != 0.0 || !(1.0..=10.0).contains(&value) {
        return None;
    }
    NUMBER_WORDS.get(value as usize - 1).copied()
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    if observed.is_empty() {
        None
    } else {
        Some(observed.iter().sum::<f64>() / observed.len() as f64)
    }
}
