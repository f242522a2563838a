//! Тестовые данные: синтетическая таблица в схеме Ames с исходными именами столбцов

use crate::types::Table;

/// "garage_area" -> "Garage Area", как в исходном CSV
fn raw_name(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn numeric(table: &mut Table, name: &str, rows: usize, f: impl Fn(usize) -> Option<f64>) {
    table.push_numeric(raw_name(name), (0..rows).map(f).collect()).unwrap();
}

fn categorical(table: &mut Table, name: &str, rows: usize, f: impl Fn(usize) -> Option<&'static str>) {
    table
        .push_categorical(raw_name(name), (0..rows).map(|i| f(i).map(str::to_string)).collect())
        .unwrap();
}

/// Детерминированная таблица из `rows` домов.
///
/// garage_cars = i % 4, garage_area пропущен при i % 17 == 5,
/// total_bsmt_sf = 0 при i % 5 == 0, fence пропущен на нечётных строках,
/// neighborhood = "Blmngtn" при i % 25 == 0.
pub fn housing_table(rows: usize) -> Table {
    let mut t = Table::new();
    let n = rows;

    numeric(&mut t, "id", n, |i| Some(i as f64 + 1.0));
    numeric(&mut t, "pid", n, |i| Some(1000.0 + i as f64));
    numeric(&mut t, "ms_subclass", n, |_| Some(20.0));
    categorical(&mut t, "street", n, |_| Some("Pave"));
    categorical(&mut t, "alley", n, |_| None);
    categorical(&mut t, "utilities", n, |_| Some("AllPub"));
    categorical(&mut t, "neighborhood", n, |i| {
        Some(if i % 25 == 0 { "Blmngtn" } else if i % 2 == 0 { "NAmes" } else { "CollgCr" })
    });
    categorical(&mut t, "condition_2", n, |_| Some("Norm"));
    numeric(&mut t, "overall_qual", n, |i| Some((i % 10) as f64 + 1.0));
    numeric(&mut t, "overall_cond", n, |_| Some(5.0));
    numeric(&mut t, "year_built", n, |i| Some(1950.0 + (i % 60) as f64));
    numeric(&mut t, "year_remod/add", n, |i| {
        Some(if i % 2 == 0 { 1950.0 + (i % 60) as f64 } else { 2000.0 })
    });
    categorical(&mut t, "roof_matl", n, |_| Some("CompShg"));
    categorical(&mut t, "exterior_2nd", n, |_| Some("VinylSd"));
    categorical(&mut t, "mas_vnr_type", n, |i| if i % 2 == 0 { None } else { Some("BrkFace") });
    numeric(&mut t, "mas_vnr_area", n, |i| {
        if i % 11 == 0 { None } else { Some((i % 2) as f64 * 100.0) }
    });
    categorical(&mut t, "bsmt_qual", n, |i| if i % 5 == 0 { None } else { Some("TA") });
    categorical(&mut t, "bsmt_cond", n, |i| if i % 5 == 0 { None } else { Some("TA") });
    categorical(&mut t, "bsmt_exposure", n, |i| if i % 5 == 0 { None } else { Some("No") });
    categorical(&mut t, "bsmtfin_type_1", n, |i| if i % 5 == 0 { None } else { Some("GLQ") });
    numeric(&mut t, "bsmtfin_sf_1", n, |i| Some(if i % 3 == 0 { 0.0 } else { 400.0 }));
    categorical(&mut t, "bsmtfin_type_2", n, |i| if i % 2 == 0 { Some("Rec") } else { Some("unf") });
    numeric(&mut t, "bsmtfin_sf_2", n, |_| Some(0.0));
    numeric(&mut t, "total_bsmt_sf", n, |i| {
        Some(if i % 5 == 0 { 0.0 } else { 800.0 + i as f64 })
    });
    categorical(&mut t, "heating", n, |_| Some("GasA"));
    categorical(&mut t, "electrical", n, |i| if i == 3 { None } else { Some("SBrkr") });
    numeric(&mut t, "1st_flr_sf", n, |_| Some(1000.0));
    numeric(&mut t, "2nd_flr_sf", n, |_| Some(500.0));
    numeric(&mut t, "gr_liv_area", n, |i| Some(1500.0 + i as f64));
    numeric(&mut t, "bsmt_full_bath", n, |_| Some(1.0));
    numeric(&mut t, "bsmt_half_bath", n, |i| if i % 13 == 7 { None } else { Some(0.0) });
    numeric(&mut t, "full_bath", n, |_| Some(2.0));
    numeric(&mut t, "half_bath", n, |i| Some((i % 2) as f64));
    numeric(&mut t, "bedroom_abvgr", n, |_| Some(3.0));
    numeric(&mut t, "fireplaces", n, |i| Some((i % 3) as f64));
    categorical(&mut t, "fireplace_qu", n, |i| if i % 3 == 0 { None } else { Some("TA") });
    categorical(&mut t, "garage_type", n, |i| if i % 4 == 0 { None } else { Some("Attchd") });
    numeric(&mut t, "garage_yr_blt", n, |i| {
        if i % 4 == 0 { None } else { Some(1950.0 + (i % 60) as f64) }
    });
    categorical(&mut t, "garage_finish", n, |i| if i % 4 == 0 { None } else { Some("Unf") });
    numeric(&mut t, "garage_cars", n, |i| Some((i % 4) as f64));
    numeric(&mut t, "garage_area", n, |i| {
        if i % 17 == 5 { None } else { Some((i % 4) as f64 * 250.0) }
    });
    categorical(&mut t, "garage_qual", n, |i| if i % 4 == 0 { None } else { Some("TA") });
    categorical(&mut t, "garage_cond", n, |i| if i % 4 == 0 { None } else { Some("TA") });
    numeric(&mut t, "wood_deck_sf", n, |i| Some(if i % 2 == 0 { 0.0 } else { 120.0 }));
    numeric(&mut t, "open_porch_sf", n, |i| Some((i % 4) as f64 * 10.0));
    numeric(&mut t, "enclosed_porch", n, |_| Some(0.0));
    numeric(&mut t, "3ssn_porch", n, |_| Some(0.0));
    numeric(&mut t, "screen_porch", n, |i| Some(if i % 7 == 0 { 90.0 } else { 0.0 }));
    numeric(&mut t, "pool_area", n, |i| Some(if i == 0 { 512.0 } else { 0.0 }));
    categorical(&mut t, "pool_qc", n, |i| if i == 0 { Some("Gd") } else { None });
    categorical(&mut t, "fence", n, |i| if i % 2 == 0 { Some("MnPrv") } else { None });
    categorical(&mut t, "misc_feature", n, |_| None);
    numeric(&mut t, "misc_val", n, |_| Some(0.0));
    numeric(&mut t, "yr_sold", n, |_| Some(2010.0));
    numeric(&mut t, "saleprice", n, |i| Some(100_000.0 + 1000.0 * i as f64));

    t
}

#[test]
fn test_raw_names_normalize_back() {
    assert_eq!(raw_name("garage_area"), "Garage Area");
    assert_eq!(raw_name("year_remod/add"), "Year Remod/add");
    assert_eq!(raw_name("3ssn_porch"), "3ssn Porch");
}
