/// Типы данных для предобработки

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CleaningError, Result};

/// Значения одного столбца; `None` означает пропуск
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnData::Numeric(_))
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Таблица: упорядоченный набор именованных столбцов одинаковой длины
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Собирает таблицу из готовых столбцов, проверяя длины
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.set_column(column.name, column.data)?;
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn numeric_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn categorical_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !c.data.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnData> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.data)
    }

    /// Числовой столбец по имени
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.column(name) {
            Some(ColumnData::Numeric(values)) => Ok(values),
            _ => Err(CleaningError::MissingColumn(name.to_string())),
        }
    }

    /// Категориальный столбец по имени
    pub fn categorical(&self, name: &str) -> Result<&[Option<String>]> {
        match self.column(name) {
            Some(ColumnData::Categorical(values)) => Ok(values),
            _ => Err(CleaningError::MissingColumn(name.to_string())),
        }
    }

    pub fn missing_count(&self, name: &str) -> Option<usize> {
        self.column(name).map(ColumnData::missing_count)
    }

    /// Заменяет столбец на месте или добавляет его в конец
    pub fn set_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() {
            self.n_rows = data.len();
        } else if data.len() != self.n_rows {
            return Err(CleaningError::LengthMismatch {
                column: name,
                expected: self.n_rows,
                actual: data.len(),
            });
        }

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.data = data,
            None => self.columns.push(Column { name, data }),
        }
        Ok(())
    }

    pub fn push_numeric(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        self.set_column(name, ColumnData::Numeric(values))
    }

    pub fn push_categorical(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Result<()> {
        self.set_column(name, ColumnData::Categorical(values))
    }

    /// Переименовывает столбцы функцией от старого имени
    pub fn rename_with<F: FnMut(&str) -> String>(mut self, mut f: F) -> Self {
        for column in &mut self.columns {
            column.name = f(&column.name);
        }
        self
    }

    /// Удаляет перечисленные столбцы; отсутствующие имена игнорируются
    pub fn drop_columns(mut self, names: &[&str]) -> Self {
        self.columns.retain(|c| !names.contains(&c.name.as_str()));
        if self.columns.is_empty() {
            self.n_rows = 0;
        }
        self
    }

    /// Числовой блок таблицы в виде матрицы (строки x признаки) для моделей
    pub fn numeric_matrix(&self) -> Result<(Array2<f64>, Vec<String>)> {
        let numeric: Vec<(&str, &[Option<f64>])> = self
            .columns
            .iter()
            .filter_map(|c| match &c.data {
                ColumnData::Numeric(values) => Some((c.name.as_str(), values.as_slice())),
                ColumnData::Categorical(_) => None,
            })
            .collect();

        if numeric.is_empty() {
            return Err(CleaningError::NoNumericColumns);
        }

        let mut matrix = Array2::zeros((self.n_rows, numeric.len()));
        for (j, (name, values)) in numeric.iter().enumerate() {
            for (i, value) in values.iter().enumerate() {
                matrix[[i, j]] = value.ok_or_else(|| CleaningError::MissingValues(name.to_string()))?;
            }
        }

        let names = numeric.iter().map(|(name, _)| name.to_string()).collect();
        Ok((matrix, names))
    }
}

/// Словарь категорий: столбец -> допустимые метки (в порядке убывания частоты)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(BTreeMap<String, Vec<String>>);

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, labels: Vec<String>) {
        self.0.insert(column.into(), labels);
    }

    pub fn labels(&self, column: &str) -> Option<&[String]> {
        self.0.get(column).map(Vec::as_slice)
    }

    pub fn contains(&self, column: &str, label: &str) -> bool {
        self.labels(column)
            .map(|labels| labels.iter().any(|l| l == label))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Стратегия заполнения пропусков в числовых столбцах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillStrategy {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "mean")]
    Mean,
}

impl FromStr for FillStrategy {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "0" => Ok(FillStrategy::Zero),
            "mean" => Ok(FillStrategy::Mean),
            other => Err(CleaningError::UnsupportedFillStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::Zero => write!(f, "0"),
            FillStrategy::Mean => write!(f, "mean"),
        }
    }
}

/// Настройки конвейера очистки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    #[serde(default = "default_fill_strategy")]
    pub fill_strategy: FillStrategy,
    #[serde(default = "default_category_threshold")]
    pub category_threshold: usize,
    #[serde(default = "default_upper_limit")]
    pub upper_limit: f64, // перцентиль, 0 < p < 100
    #[serde(default = "default_cap_outliers")]
    pub cap_outliers: bool,
}

fn default_fill_strategy() -> FillStrategy { FillStrategy::Mean }
fn default_category_threshold() -> usize { 20 }
fn default_upper_limit() -> f64 { 95.0 }
fn default_cap_outliers() -> bool { true }

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            fill_strategy: default_fill_strategy(),
            category_threshold: default_category_threshold(),
            upper_limit: default_upper_limit(),
            cap_outliers: default_cap_outliers(),
        }
    }
}
