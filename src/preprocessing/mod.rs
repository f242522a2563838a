/// Модуль предобработки данных

pub mod categories;
pub mod columns;
pub mod feature_engineering;
pub mod outliers;

pub use categories::{CategoryCollapser, CollapseMode};
pub use feature_engineering::FeatureBuilder;
pub use outliers::{percentile, OutlierCapper};
