use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use fuel_reports::report::{self, ParseOptions, ParsedReport};
use fuel_reports::report::common::LocationType;
use fuel_reports::summary;

#[derive(Clone, Copy)]
enum Value {
    Text(&'static str),
    Number(f64),
    Empty,
}

use Value::*;

type SheetData = (&'static str, Vec<Vec<Value>>);

fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().copied().map(Number).collect()
}

fn row(fixed: &[Value], values: &[f64]) -> Vec<Value> {
    let mut row = fixed.to_vec();
    row.extend(numbers(values));
    row
}

fn structure_sheet() -> SheetData {
    ("1-Структура", vec![
        vec![Text("Субъект Российской Федерации"), Text("Республика Саха (Якутия)")],
        vec![Text("Информация по состоянию за:"), Text("15.12.2025")],
        vec![Text("Исполнитель:"), Text("Иванов И.И.")],
        vec![Text("Контактный телефон:"), Text("8 (4112) 00-00-00")],
        Vec::new(),
        vec![Text("Таблица №1 Структура сети")],
        numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]),
        vec![
            Text("Принадлежность"), Text("Наименование"), Text("Количество нефтебаз"),
            Text("Количество АЗС"), Text("Действующих АЗС"),
        ],
        row(&[Text("ООО Сибирь Ойл"), Text("Сибирь Ойл")], &[5.0, 42.0, 40.0]),
        row(&[Text("=A9"), Text("Сибирь Ойл Резерв")], &[1.0, 1.0, 1.0]),
        row(&[Text("ООО Сибирь Ойл"), Text("Сибирь Ойл Север")], &[2.0, 10.0, 9.0]),
        row(&[Empty, Text("Сибирь Ойл Запад")], &[1.0, 7.0, 7.0]),
    ])
}

fn demand_sheet() -> SheetData {
    ("2-Потребность", vec![
        vec![Text("Потребность в моторном топливе")],
        row(&[Text("ГОД 2025")], &[1000.0, 100.0, 500.0, 300.0, 100.0, 2000.0, 800.0, 700.0, 300.0, 200.0]),
        row(&[Text("МЕСЯЦ декабрь")], &[80.0, 5.0, 40.0, 30.0, 5.0, 150.0, 60.0, 50.0, 20.0, 20.0]),
    ])
}

fn balance_sheet() -> SheetData {
    ("3-Остатки", vec![
        vec![Text("Таблица №5 Остатки моторного топлива")],
        vec![Text("Принадлежность"), Text("Наименование"), Text("Местонахождение")],
        Vec::new(),
        row(&[Text("Сибойл"), Text("ООО Сибирь Ойл"), Text("НБ Ленск")],
            &[0.0, 120.0, 80.0, 0.0, 300.0, 150.0, 0.0, 0.0]),
        row(&[Text("Сибойл"), Text("ООО Сибирь Ойл"), Text("АЗС №1")],
            &[0.0, 10.0, 5.0, 0.0, 20.0, 0.0, 0.0, 0.0]),
    ])
}

fn supply_sheet() -> SheetData {
    ("4-Поставка", vec![
        vec![Text("Таблица №6 Поставка")],
        Vec::new(),
        Vec::new(),
        row(&[Text("Сибойл"), Text("ООО Сибирь Ойл"), Text("НБ Ленск"), Text("10.12.2025")],
            &[0.0, 500.0, 0.0, 0.0, 1000.0, 0.0, 0.0, 0.0]),
    ])
}

fn sales_sheet() -> SheetData {
    ("5-Реализация", vec![
        vec![Text("Таблица №7 Реализация")],
        Vec::new(),
        Vec::new(),
        row(&[Text("Сибойл"), Text("ООО Сибирь Ойл"), Text("АЗС №1")], &[
            0.0, 3.0, 2.0, 0.0, 6.0, 0.0, 0.0, 0.0,
            0.0, 45.0, 30.0, 0.0, 90.0, 0.0, 0.0, 0.0,
        ]),
    ])
}

fn aviation_sheet() -> SheetData {
    ("6-Авиатопливо", vec![
        vec![Text("Таблица №8 Авиатопливо")],
        Vec::new(),
        Vec::new(),
        row(&[Text("Ленск"), Text("ТЗК Ленск"), Text("Договор №7")], &[10.0, 40.0, 150.0, 8.0, 35.0, 60.0]),
    ])
}

fn remarks_sheet() -> SheetData {
    ("7-Справка", vec![
        vec![Text("Таблица №9 Справка")],
        Vec::new(),
        Vec::new(),
        vec![Text("Бензин"), Text("Стабильная"), Text("Завоз по зимнику")],
    ])
}

fn standard_sheets() -> Vec<SheetData> {
    vec![
        structure_sheet(), demand_sheet(), balance_sheet(), supply_sheet(), sales_sheet(),
        aviation_sheet(), remarks_sheet(),
    ]
}

fn write_report(dir: &Path, filename: &str, sheets: &[SheetData]) -> PathBuf {
    let path = dir.join(filename);
    let mut workbook = rust_xlsxwriter::Workbook::new();

    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();

        for (row_id, row) in rows.iter().enumerate() {
            for (column_id, value) in row.iter().enumerate() {
                let (row_id, column_id) = (row_id as u32, column_id as u16);
                match *value {
                    Text(text) => sheet.write_string(row_id, column_id, text).unwrap(),
                    Number(number) => sheet.write_number(row_id, column_id, number).unwrap(),
                    Empty => continue,
                };
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

fn read(path: &Path) -> ParsedReport {
    report::read_report(path, &ParseOptions::default()).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn full_report() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), "Сибойл 15.12.2025.xlsx", &standard_sheets());
    let report = read(&path);

    let metadata = &report.metadata;
    assert_eq!(metadata.filename, "Сибойл 15.12.2025.xlsx");
    assert_eq!(metadata.company, "Сибойл");
    assert_eq!(metadata.report_date, date(2025, 12, 15).and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(metadata.executor, "Иванов И.И.");
    assert_eq!(metadata.phone, "8 (4112) 00-00-00");
    assert_eq!(metadata.region, "Республика Саха (Якутия)");

    let structure = &report.structure;
    assert_eq!(structure.len(), 2);
    assert_eq!(structure[0].company.as_deref(), Some("Сибойл"));
    assert_eq!(structure[0].affiliation, "ООО Сибирь Ойл");
    assert_eq!(structure[0].company_name, "Сибирь Ойл");
    assert_eq!(structure[0].oil_depots_count, 5);
    assert_eq!(structure[0].azs_count, 42);
    assert_eq!(structure[0].working_azs_count, 40);
    assert_eq!(structure[1].affiliation, "ООО Сибирь Ойл");
    assert_eq!(structure[1].company_name, "Сибирь Ойл Север");

    assert_eq!(report.demand.len(), 2);
    assert_eq!(report.demand[0].year, 2025);
    assert_eq!(report.demand[0].gasoline_total, dec!(1000));
    assert_eq!(report.demand[1].month.as_deref(), Some("декабрь"));
    assert_eq!(report.demand[1].diesel_total, dec!(150));

    assert_eq!(report.balance.len(), 2);
    assert_eq!(report.balance[0].location_type, LocationType::OilDepot);
    assert_eq!(report.balance[0].stock.ai92, dec!(120));
    assert_eq!(report.balance[0].stock.diesel_winter, dec!(300));
    assert_eq!(report.balance[1].location_type, LocationType::FuelStation);

    assert_eq!(report.supply.len(), 1);
    assert_eq!(report.supply[0].supply_date, Some(date(2025, 12, 10)));
    assert_eq!(report.supply[0].volumes.ai92, dec!(500));
    assert_eq!(report.supply[0].volumes.diesel_winter, dec!(1000));

    assert_eq!(report.sales.len(), 1);
    assert_eq!(report.sales[0].daily.ai92, dec!(3));
    assert_eq!(report.sales[0].month_to_date.ai92, dec!(45));
    assert_eq!(report.sales[0].month_to_date.diesel_winter, dec!(90));

    assert_eq!(report.aviation.len(), 1);
    assert_eq!(report.aviation[0].depot_name, "ТЗК Ленск");
    assert_eq!(report.aviation[0].end_of_day_balance, dec!(60));

    assert_eq!(report.remarks.len(), 1);
    assert_eq!(report.remarks[0].comments, "Завоз по зимнику");
    assert_eq!(report.remarks[0].company.as_deref(), Some("Сибойл"));
}

#[test]
fn missing_section() {
    let dir = TempDir::new().unwrap();

    let sheets: Vec<SheetData> = standard_sheets().into_iter()
        .filter(|(name, _)| *name != "3-Остатки")
        .collect();
    let report = read(&write_report(dir.path(), "Сибойл.xlsx", &sheets));

    assert!(report.balance.is_empty());
    assert_eq!(report.structure.len(), 2);
    assert_eq!(report.demand.len(), 2);
    assert_eq!(report.supply.len(), 1);
    assert_eq!(report.sales.len(), 1);
    assert_eq!(report.aviation.len(), 1);
    assert_eq!(report.remarks.len(), 1);
}

#[test]
fn renamed_sheets() {
    let dir = TempDir::new().unwrap();

    let names = ["Лист1", "Лист2", "Лист3", "Лист4", "Лист5", "Лист6", "Лист7"];
    let sheets: Vec<SheetData> = standard_sheets().into_iter().zip(names)
        .map(|((_, rows), name)| (name, rows))
        .collect();
    let report = read(&write_report(dir.path(), "report.xlsx", &sheets));

    // The company is found in the structure table
    assert_eq!(report.metadata.company, "Сибойл");
    assert_eq!(report.structure.len(), 2);
    assert_eq!(report.balance.len(), 2);
    assert_eq!(report.remarks.len(), 1);
}

#[test]
fn unknown_company() {
    let dir = TempDir::new().unwrap();
    let report = read(&write_report(dir.path(), "report.xlsx", &[remarks_sheet()]));

    assert_eq!(report.metadata.company, "Неизвестная компания");
    assert_eq!(report.remarks.len(), 1);
    assert_eq!(report.remarks[0].company, None);
}

#[test]
fn unsupported_workbook() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), "report.xlsx", &[("Лист1", vec![vec![Text("Пусто")]])]);
    assert!(report::read_report(&path, &ParseOptions::default()).is_err());
}

#[test]
fn broken_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    fs::write(&path, b"not a spreadsheet").unwrap();

    assert!(report::read_report(&path, &ParseOptions::default()).is_err());
    assert!(report::read_report(&dir.path().join("missing.xlsx"), &ParseOptions::default()).is_err());
}

#[test]
fn summary() {
    let dir = TempDir::new().unwrap();
    let reports = [
        read(&write_report(dir.path(), "Сибойл.xlsx", &standard_sheets())),
        read(&write_report(dir.path(), "Туймаада-Нефть.xlsx", &[structure_sheet(), remarks_sheet()])),
    ];

    let summaries = summary::aggregate(&reports);
    assert_eq!(summaries.len(), 2);

    let summary = &summaries[0];
    assert_eq!(summary.company, "Сибойл");
    assert_eq!(summary.azs_count, 52);
    assert_eq!(summary.yearly_diesel_demand, dec!(2000));
    assert_eq!(summary.stock.ai92, dec!(130));
    assert_eq!(summary.supply.total(), dec!(1500));
    assert_eq!(summary.daily_sales.ai92, dec!(3));
    assert_eq!(summary.aviation_balance, dec!(60));

    assert_eq!(summaries[1].company, "Туймаада-Нефть");
    assert_eq!(summaries[1].records.structure, 2);
    assert_eq!(summaries[1].records.balance, 0);
}
