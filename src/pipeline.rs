//! Конвейер очистки: признаки + ограничение выбросов с сохранением словаря

use crate::error::{CleaningError, Result};
use crate::preprocessing::{FeatureBuilder, OutlierCapper};
use crate::types::{CleaningConfig, Table, Vocabulary};

pub struct HousingCleaner {
    config: CleaningConfig,
    vocabulary: Option<Vocabulary>,
}

impl HousingCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self {
            config,
            vocabulary: None,
        }
    }

    /// Восстанавливает очиститель из сохранённого словаря (например, для инференса)
    pub fn with_vocabulary(config: CleaningConfig, vocabulary: Vocabulary) -> Self {
        Self {
            config,
            vocabulary: Some(vocabulary),
        }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Обучает словарь категорий на обучающей таблице и очищает её
    pub fn fit_transform(&mut self, table: Table) -> Result<Table> {
        self.check_upper_limit()?;

        let (table, vocabulary) = FeatureBuilder::build_with_threshold(
            table,
            self.config.fill_strategy,
            None,
            self.config.category_threshold,
        )?;
        let table = self.cap(table)?;

        self.vocabulary = Some(vocabulary);
        Ok(table)
    }

    /// Очищает новые данные с уже обученным словарём
    pub fn transform(&self, table: Table) -> Result<Table> {
        let vocabulary = self.vocabulary.as_ref().ok_or(CleaningError::NotFitted)?;
        self.check_upper_limit()?;

        let (table, _) = FeatureBuilder::build_with_threshold(
            table,
            self.config.fill_strategy,
            Some(vocabulary),
            self.config.category_threshold,
        )?;
        self.cap(table)
    }

    fn cap(&self, table: Table) -> Result<Table> {
        if self.config.cap_outliers {
            OutlierCapper::cap(table, self.config.upper_limit)
        } else {
            Ok(table)
        }
    }

    // Ошибка в настройках не должна обнаруживаться после построения признаков
    fn check_upper_limit(&self) -> Result<()> {
        let limit = self.config.upper_limit;
        if self.config.cap_outliers && !(limit > 0.0 && limit < 100.0) {
            return Err(CleaningError::InvalidParameter {
                name: "upper_limit",
                value: limit,
                reason: "must be strictly between 0 and 100",
            });
        }
        Ok(())
    }
}

impl Default for HousingCleaner {
    fn default() -> Self {
        Self::new(CleaningConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::housing_table;
    use crate::types::FillStrategy;

    #[test]
    fn test_transform_requires_fit() {
        let cleaner = HousingCleaner::default();
        assert!(!cleaner.is_fitted());
        assert!(cleaner.vocabulary().is_none());
        assert!(matches!(
            cleaner.transform(housing_table(10)),
            Err(CleaningError::NotFitted)
        ));
    }

    #[test]
    fn test_fit_then_transform() {
        let mut cleaner = HousingCleaner::default();
        let train = cleaner.fit_transform(housing_table(100)).unwrap();
        assert!(cleaner.is_fitted());
        assert!(cleaner.vocabulary().unwrap().contains("neighborhood", "NAmes"));

        let test = cleaner.transform(housing_table(40)).unwrap();
        assert_eq!(train.names(), test.names());
        assert!(test.numeric_matrix().is_ok());

        // Blmngtn не попал в словарь при обучении
        assert_eq!(
            test.categorical("neighborhood").unwrap()[0].as_deref(),
            Some("infrequent")
        );
    }

    #[test]
    fn test_outliers_capped_after_fill() {
        let mut cleaner = HousingCleaner::default();
        let table = cleaner.fit_transform(housing_table(100)).unwrap();

        // saleprice = 100000 + 1000 * i, 95-й перцентиль = 194050
        let price = table.numeric("SalePrice").unwrap();
        let max = price.iter().flatten().copied().fold(f64::MIN, f64::max);
        assert!((max - 194_050.0).abs() < 1e-6);
        assert_eq!(price[0], Some(100_000.0));
    }

    #[test]
    fn test_capping_can_be_disabled() {
        let config = CleaningConfig {
            fill_strategy: FillStrategy::Zero,
            cap_outliers: false,
            ..CleaningConfig::default()
        };
        let mut cleaner = HousingCleaner::new(config);
        let table = cleaner.fit_transform(housing_table(100)).unwrap();
        assert_eq!(table.numeric("SalePrice").unwrap()[99], Some(199_000.0));
    }

    #[test]
    fn test_invalid_limit_fails_before_fit() {
        let config = CleaningConfig {
            upper_limit: 100.0,
            ..CleaningConfig::default()
        };
        let mut cleaner = HousingCleaner::new(config);
        assert!(matches!(
            cleaner.fit_transform(housing_table(10)),
            Err(CleaningError::InvalidParameter { .. })
        ));
        assert!(!cleaner.is_fitted());
    }

    #[test]
    fn test_restore_from_persisted_vocabulary() {
        let mut cleaner = HousingCleaner::default();
        cleaner.fit_transform(housing_table(100)).unwrap();
        let json = cleaner.vocabulary().unwrap().to_json().unwrap();

        let restored =
            HousingCleaner::with_vocabulary(CleaningConfig::default(), Vocabulary::from_json(&json).unwrap());
        assert!(restored.is_fitted());
        assert_eq!(
            restored.transform(housing_table(30)).unwrap(),
            cleaner.transform(housing_table(30)).unwrap()
        );
    }
}
