// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use salescope_model::{SalesRecord, FACT_SCHEMA};

use crate::columns::HeaderMap;

/// Accepted order-date layouts, tried in order.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses an order date and returns it as ISO `YYYY-MM-DD`.
pub fn parse_order_date(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
        return Ok(dt.date().format("%Y-%m-%d").to_string());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| format!("unrecognised order_date {raw:?}"))
}

fn field<'r>(record: &'r StringRecord, map: &HeaderMap, schema_index: usize) -> &'r str {
    record.get(map.position(schema_index)).unwrap_or("").trim()
}

fn required_text(record: &StringRecord, map: &HeaderMap, idx: usize) -> Result<String, String> {
    let value = field(record, map, idx);
    if value.is_empty() {
        return Err(format!("{} is empty", FACT_SCHEMA[idx].0));
    }
    Ok(value.to_string())
}

fn real(record: &StringRecord, map: &HeaderMap, idx: usize) -> Result<f64, String> {
    let value = field(record, map, idx);
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("{} is not a number: {value:?}", FACT_SCHEMA[idx].0))?;
    if !parsed.is_finite() {
        return Err(format!("{} is not finite: {value:?}", FACT_SCHEMA[idx].0));
    }
    Ok(parsed)
}

fn integer(record: &StringRecord, map: &HeaderMap, idx: usize) -> Result<i64, String> {
    let value = field(record, map, idx);
    if let Ok(v) = value.parse::<i64>() {
        return Ok(v);
    }
    // Spreadsheet exports write whole days as `3.0`.
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(format!("{} is not an integer: {value:?}", FACT_SCHEMA[idx].0)),
    }
}

/// Decodes one CSV record into a fact row. Extra columns are ignored.
pub fn decode_record(record: &StringRecord, map: &HeaderMap) -> Result<SalesRecord, String> {
    if record.len() < map.width() {
        return Err(format!(
            "expected {} fields, found {}",
            map.width(),
            record.len()
        ));
    }
    Ok(SalesRecord {
        order_id: required_text(record, map, 0)?,
        customer_id: required_text(record, map, 1)?,
        customer_name: field(record, map, 2).to_string(),
        order_date: parse_order_date(field(record, map, 3))?,
        product: required_text(record, map, 4)?,
        product_category: field(record, map, 5).to_string(),
        region: field(record, map, 6).to_string(),
        city: field(record, map, 7).to_string(),
        segment: field(record, map, 8).to_string(),
        sales: real(record, map, 9)?,
        profit: real(record, map, 10)?,
        aging: integer(record, map, 11)?,
        ship_mode: field(record, map, 12).to_string(),
        shipping_cost: real(record, map, 13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> HeaderMap {
        HeaderMap::resolve(FACT_SCHEMA.iter().map(|(n, _)| *n)).expect("header")
    }

    fn row(date: &str, sales: &str, aging: &str) -> StringRecord {
        StringRecord::from(vec![
            "O1", "C1", "Ada", date, "Desk", "Furniture", "West", "Austin", "Consumer", sales,
            "-2.5", aging, "Standard", "4",
        ])
    }

    #[test]
    fn dates_normalise_to_iso() {
        assert_eq!(parse_order_date("2024-03-20").as_deref(), Ok("2024-03-20"));
        assert_eq!(parse_order_date("2024-03-20 14:05:00").as_deref(), Ok("2024-03-20"));
        assert_eq!(parse_order_date("03/20/2024").as_deref(), Ok("2024-03-20"));
        assert_eq!(parse_order_date("20-03-2024").as_deref(), Ok("2024-03-20"));
        assert!(parse_order_date("March 20").is_err());
    }

    #[test]
    fn decodes_full_row() {
        let rec = decode_record(&row("01/05/2024", "100.5", "3.0"), &header()).expect("decode");
        assert_eq!(rec.order_date, "2024-01-05");
        assert_eq!(rec.sales, 100.5);
        assert_eq!(rec.profit, -2.5);
        assert_eq!(rec.aging, 3);
    }

    #[test]
    fn rejects_bad_numbers_and_short_rows() {
        assert!(decode_record(&row("2024-01-05", "abc", "3"), &header())
            .expect_err("sales")
            .contains("sales"));
        assert!(decode_record(&row("2024-01-05", "1", "2.5"), &header())
            .expect_err("aging")
            .contains("aging"));
        assert!(decode_record(&row("2024-01-05", "NaN", "1"), &header()).is_err());
        let short = StringRecord::from(vec!["O1", "C1"]);
        assert!(decode_record(&short, &header())
            .expect_err("short")
            .contains("expected 14 fields"));
    }
}
