//! Свёртка редких категорий в метку "infrequent"

use std::collections::HashMap;

use crate::error::{CleaningError, Result};
use crate::preprocessing::columns::INFREQUENT_LABEL;
use crate::types::{Column, ColumnData, Table, Vocabulary};

/// Режим работы свёртки
#[derive(Debug, Clone, Copy)]
pub enum CollapseMode<'a> {
    /// Обучение: метки с частотой меньше порога заменяются на "infrequent"
    Fit { threshold: usize },
    /// Применение: всё, чего нет в словаре, заменяется на "infrequent"
    Apply(&'a Vocabulary),
}

pub struct CategoryCollapser;

impl CategoryCollapser {
    /// Сворачивает категориальные столбцы таблицы; числовые не трогаются.
    ///
    /// При обучении пропуски не считаются и остаются пропусками.
    /// В режиме `Apply` всё вне словаря, включая пропуски, становится "infrequent",
    /// а возвращается копия переданного словаря.
    pub fn collapse(table: Table, mode: CollapseMode<'_>) -> Result<(Table, Vocabulary)> {
        if let CollapseMode::Apply(vocabulary) = mode {
            // Проверяем до изменений, чтобы не вернуть наполовину свёрнутую таблицу
            if let Some(name) = table
                .categorical_names()
                .into_iter()
                .find(|name| vocabulary.labels(name).is_none())
            {
                return Err(CleaningError::VocabularyMismatch(name.to_string()));
            }
        }

        let mut fitted = Vocabulary::new();
        let mut columns = Vec::with_capacity(table.n_cols());

        for column in table.into_columns() {
            let Column { name, data } = column;
            let data = match data {
                ColumnData::Categorical(values) => {
                    let values = match mode {
                        CollapseMode::Fit { threshold } => {
                            let values = Self::collapse_rare(values, threshold);
                            fitted.insert(name.clone(), Self::labels_by_frequency(&values));
                            values
                        }
                        CollapseMode::Apply(vocabulary) => {
                            let labels = vocabulary.labels(&name).unwrap_or(&[]);
                            Self::collapse_unknown(values, labels)
                        }
                    };
                    ColumnData::Categorical(values)
                }
                numeric => numeric,
            };
            columns.push(Column { name, data });
        }

        let vocabulary = match mode {
            CollapseMode::Fit { .. } => fitted,
            CollapseMode::Apply(vocabulary) => vocabulary.clone(),
        };

        tracing::debug!("Collapsed {} categorical columns", vocabulary.len());
        Ok((Table::from_columns(columns)?, vocabulary))
    }

    fn collapse_rare(values: Vec<Option<String>>, threshold: usize) -> Vec<Option<String>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in values.iter().flatten() {
            *counts.entry(value.clone()).or_default() += 1;
        }

        values
            .into_iter()
            .map(|value| {
                value.map(|label| {
                    if counts.get(&label).copied().unwrap_or(0) < threshold {
                        INFREQUENT_LABEL.to_string()
                    } else {
                        label
                    }
                })
            })
            .collect()
    }

    /// Пропуск тоже не входит в словарь и становится "infrequent"
    fn collapse_unknown(values: Vec<Option<String>>, labels: &[String]) -> Vec<Option<String>> {
        values
            .into_iter()
            .map(|value| match value {
                Some(label) if labels.contains(&label) => Some(label),
                _ => Some(INFREQUENT_LABEL.to_string()),
            })
            .collect()
    }

    /// Различные метки по убыванию частоты; при равенстве - по первому появлению
    fn labels_by_frequency(values: &[Option<String>]) -> Vec<String> {
        let mut order: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for value in values.iter().flatten() {
            match index.get(value.as_str()) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(value.as_str(), order.len());
                    order.push((value.as_str(), 1));
                }
            }
        }

        // sort_by стабилен, поэтому порядок первого появления сохраняется
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order.into_iter().map(|(label, _)| label.to_string()).collect()
    }
}
