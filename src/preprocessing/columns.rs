//! Фиксированные списки столбцов набора данных Ames

/// Переименования после нормализации имён (нижний регистр, `_` вместо пробелов)
pub const RENAMES: &[(&str, &str)] = &[
    ("id", "Id"),
    ("saleprice", "SalePrice"),
    ("year_remod/add", "year_remod"),
    ("2nd_flr_sf", "second_flr_sf"),
    ("1st_flr_sf", "first_flr_sf"),
];

/// Качественные столбцы: признак наличия = значение не пропущено
pub const PRESENCE_BY_MISSING: &[(&str, &str)] = &[
    ("pool_qc", "have_pool"),
    ("misc_feature", "have_misc_features"),
    ("fence", "have_fence"),
];

/// Слагаемые площади веранд
pub const PORCH_PARTS: &[&str] = &["open_porch_sf", "enclosed_porch", "3ssn_porch", "screen_porch"];

/// Числовые столбцы: признак наличия `have_<col>` = значение не равно нулю
pub const PRESENCE_BY_NONZERO: &[&str] = &[
    "garage_area",
    "total_bsmt_sf",
    "bsmtfin_sf_1",
    "bsmtfin_sf_2",
    "mas_vnr_area",
    "fireplaces",
    "wood_deck_sf",
    "porch_sf",
];

pub const GARAGE_CAR_VALUES: &[u8] = &[1, 2, 3];

/// Пропуски в этих столбцах означают отсутствие объекта, а не редкость
pub const CATEGORICAL_FILL: &[&str] = &[
    "alley",
    "fence",
    "fireplace_qu",
    "garage_finish",
    "garage_type",
    "bsmt_exposure",
    "bsmt_cond",
    "bsmt_qual",
    "mas_vnr_type",
    "bsmtfin_type_1",
    "bsmtfin_type_2",
    "electrical",
    "garage_cond",
    "garage_qual",
];

/// Порядковые оценки 1-10, превращаемые в категории
pub const ORDINAL_TO_WORDS: &[&str] = &["overall_qual", "overall_cond"];

pub const NUMBER_WORDS: [&str; 10] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// Числовые столбцы, из которых строятся производные признаки
pub const DERIVATION_INPUTS: &[&str] = &[
    "garage_cars",
    "bsmt_full_bath",
    "bsmt_half_bath",
    "full_bath",
    "half_bath",
    "yr_sold",
    "year_built",
    "year_remod",
    "gr_liv_area",
    "bedroom_abvgr",
];

/// Арифметика производного признака: `left op right`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arith {
    /// left + weight * right
    WeightedSum(f64),
    Difference,
    Product,
}

/// Производные числовые признаки `(имя, левый, операция, правый)`.
/// Порядок важен: признак может ссылаться только на уже построенные.
pub const DERIVED: &[(&str, &str, Arith, &str)] = &[
    ("bsmt_total_bath", "bsmt_full_bath", Arith::WeightedSum(0.5), "bsmt_half_bath"),
    ("total_bath", "full_bath", Arith::WeightedSum(0.5), "half_bath"),
    ("age", "yr_sold", Arith::Difference, "year_built"),
    ("age_by_remodel", "yr_sold", Arith::Difference, "year_remod"),
    ("total_area_sf", "gr_liv_area", Arith::WeightedSum(1.0), "total_bsmt_sf"),
    ("total_area_sf_sq", "total_area_sf", Arith::Product, "total_area_sf"),
    ("age_squared", "age", Arith::Product, "age"),
    ("age_by_remodel_squared", "age_by_remodel", Arith::Product, "age_by_remodel"),
    ("garage_area_X_garage_cars", "garage_area", Arith::Product, "garage_cars"),
    ("gr_liv_area_X_garage_cars", "gr_liv_area", Arith::Product, "garage_cars"),
    ("gr_liv_area_X_total_bath", "gr_liv_area", Arith::Product, "total_bath"),
    ("gr_liv_area_X_bedroom_abvgr", "gr_liv_area", Arith::Product, "bedroom_abvgr"),
    ("bsmtfin_sf_1_squared", "bsmtfin_sf_1", Arith::Product, "bsmtfin_sf_1"),
];

/// Дома моложе этого возраста считаются новостройками
pub const NEW_CONSTRUCTION_AGE: f64 = 5.0;

/// Столбцы, которые не нужны после построения признаков
pub const DROPPED: &[&str] = &[
    "pid",
    "pool_qc",
    "misc_feature",
    "garage_qual",
    "bsmtfin_type_2",
    "garage_yr_blt",
    "garage_cond",
    "ms_subclass",
    "street",
    "utilities",
    "condition_2",
    "roof_matl",
    "exterior_2nd",
    "heating",
    "pool_area",
    "misc_val",
    "year_built",
    "year_remod",
    "bsmt_full_bath",
    "bsmt_half_bath",
    "full_bath",
    "half_bath",
];

pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const MISSING_LABEL: &str = "missing";
pub const INFREQUENT_LABEL: &str = "infrequent";

/// Порог редкости категорий внутри построителя признаков
pub const CATEGORY_THRESHOLD: usize = 20;

/// Все столбцы входной таблицы, на которые ссылаются этапы построения
pub fn required_columns() -> Vec<&'static str> {
    let mut required: Vec<&'static str> = Vec::new();
    let lists: [&[&'static str]; 5] = [
        PORCH_PARTS,
        CATEGORICAL_FILL,
        ORDINAL_TO_WORDS,
        DERIVATION_INPUTS,
        DROPPED,
    ];
    for list in lists {
        required.extend_from_slice(list);
    }
    required.extend(PRESENCE_BY_MISSING.iter().map(|(source, _)| *source));
    // porch_sf строится на этапе 2, остальные столбцы должны быть во входе
    required.extend(PRESENCE_BY_NONZERO.iter().copied().filter(|c| *c != "porch_sf"));

    let mut seen = std::collections::HashSet::new();
    required.retain(|c| seen.insert(*c));
    required
}
