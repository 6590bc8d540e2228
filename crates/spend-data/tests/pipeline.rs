use std::io::Write;

use chrono::NaiveDate;
use spend_data::core::error::SpendError;
use spend_data::dashboard::{Dashboard, DashboardQuery};
use spend_data::distribution::extract_distribution;
use spend_data::reader::load_expenses;
use spend_data::series::build_rolling_series;
use tempfile::NamedTempFile;

const EXPORT: &str = "\
Date,Note,Category,Amount
2021-01-01,Daily Budget,Daily Budget,30.00
2021-01-01,Corner shop,Groceries,-10.00
2021-01-01,Market,Groceries,-5.00
2021-01-02,Daily Budget,Daily Budget,30.00
2021-01-02,Lunch for mom,For Others - Food,-12.00
2021-01-03,Supermarket,Groceries,-9.00
2021-01-03,Paycheck,Income,\"2,500.00\"
2021-01-04,Anniversary dinner,Restaurant,\"-1,234.50\"
";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn export_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn test_csv_to_rolling_series() {
    let file = export_file(EXPORT);
    let records = load_expenses(file.path()).unwrap();

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.note != "Daily Budget"));
    assert!(records.iter().all(|r| r.amount > 0.0));

    let points = build_rolling_series(
        &records,
        &["groceries".to_string()],
        ymd(2021, 1, 1),
        ymd(2021, 1, 3),
        3,
    )
    .unwrap();
    let averages: Vec<f64> = points.iter().map(|p| p.rolling_average).collect();
    assert_eq!(averages, vec![15.0, 7.5, 8.0]);
}

#[test]
fn test_csv_to_distribution() {
    let file = export_file(EXPORT);
    let records = load_expenses(file.path()).unwrap();

    let rows = extract_distribution(
        &records,
        &["restaurant".to_string(), "for_others_food".to_string()],
        ymd(2021, 1, 1),
        ymd(2021, 1, 31),
    )
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "for_others_food");
    assert_eq!(rows[0].weekday_name, "Saturday");
    assert_eq!(rows[1].amount, 1234.50);

    let none = extract_distribution(
        &records,
        &["restaurant".to_string()],
        ymd(2021, 2, 1),
        ymd(2021, 2, 28),
    )
    .unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_dashboard_session() {
    let file = export_file(EXPORT);
    let mut dashboard = Dashboard::new(load_expenses(file.path()).unwrap());

    assert_eq!(
        dashboard.categories(),
        ["groceries", "for_others_food", "restaurant"]
    );

    let mut query = DashboardQuery {
        categories: vec!["groceries".to_string(), "restaurant".to_string()],
        start: ymd(2021, 1, 1),
        end: ymd(2021, 1, 4),
        window_days: 2,
    };
    let data = dashboard.query(&query).unwrap();
    assert_eq!(data.rolling.points.len(), 8);
    assert_eq!(data.rolling.points[4].category, "restaurant");
    assert_eq!(data.rolling.points[7].rolling_average, 617.25);

    query.start = ymd(2021, 1, 5);
    assert!(matches!(
        dashboard.query(&query),
        Err(SpendError::InvalidRange { .. })
    ));
}

#[test]
fn test_bad_amount_aborts_load() {
    let file = export_file("Date,Note,Category,Amount\n2021-01-01,x,Food,12..5\n");
    assert!(matches!(
        load_expenses(file.path()),
        Err(SpendError::AmountParse { row: 1, .. })
    ));
}
