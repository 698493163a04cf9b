//! Batch CSV and JSON import/export.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use superstore::{OrderInputRecord, PredictionResult};
use thiserror::Error;

/// Column names of an order CSV, without the optional `sales` label.
pub const ORDER_CSV_HEADER: [&str; 10] = [
    "quantity",
    "unit_price",
    "discount_pct",
    "category",
    "segment",
    "region",
    "ship_mode",
    "year",
    "month",
    "day_of_week",
];

/// Errors that can occur while reading or writing batch files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be interpreted
    #[error("Row {row}: {message}")]
    InvalidRecord {
        /// 1-based data row
        row: usize,
        /// What is wrong with it
        message: String,
    },
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,

    /// Compact JSON
    Json,

    /// Pretty-printed JSON
    PrettyJson,
}

impl ExportFormat {
    /// File extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::PrettyJson,
            _ => Self::Csv,
        }
    }
}

/// Trait for types that can be exported.
pub trait Exporter {
    /// Export to a string in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export to a file in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// One order of a batch with its prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Number of units
    pub quantity: u32,
    /// Price per unit
    pub unit_price: f64,
    /// Discount percentage
    pub discount_pct: f64,
    /// Product category
    pub category: String,
    /// Customer segment
    pub segment: String,
    /// Sales region
    pub region: String,
    /// Shipping mode
    pub ship_mode: String,
    /// Order year
    pub year: i32,
    /// Order month
    pub month: u32,
    /// Weekday name
    pub day_of_week: String,
    /// Model prediction
    pub predicted_sales: f64,
    /// Formula estimate
    pub expected_by_formula: f64,
    /// Absolute difference of the two
    pub absolute_difference: f64,
}

impl BatchRow {
    /// Combine an order with its prediction.
    pub fn new(order: &OrderInputRecord, result: &PredictionResult) -> Self {
        Self {
            quantity: order.quantity,
            unit_price: order.unit_price,
            discount_pct: order.discount_pct(),
            category: order.category.clone(),
            segment: order.segment.clone(),
            region: order.region.clone(),
            ship_mode: order.ship_mode.clone(),
            year: order.year,
            month: order.month,
            day_of_week: order.day_of_week.clone(),
            predicted_sales: result.predicted_sales,
            expected_by_formula: result.expected_by_formula,
            absolute_difference: result.absolute_difference,
        }
    }
}

impl Exporter for [BatchRow] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for row in self {
                    wtr.serialize(row)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                String::from_utf8(bytes).map_err(|e| {
                    ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<BatchRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        self.as_slice().export_to_string(format)
    }
}

/// An order read from CSV, with observed sales if the file has them.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledOrder {
    /// The order
    pub order: OrderInputRecord,

    /// Observed sales
    pub sales: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OrderCsvRecord {
    quantity: u32,
    unit_price: f64,
    discount_pct: f64,
    category: String,
    segment: String,
    region: String,
    ship_mode: String,
    year: i32,
    month: u32,
    day_of_week: String,
    #[serde(default)]
    sales: Option<f64>,
}

impl From<OrderCsvRecord> for LabelledOrder {
    fn from(r: OrderCsvRecord) -> Self {
        Self {
            order: OrderInputRecord {
                quantity: r.quantity,
                unit_price: r.unit_price,
                discount: OrderInputRecord::discount_from_pct(r.discount_pct),
                category: r.category,
                segment: r.segment,
                region: r.region,
                ship_mode: r.ship_mode,
                year: r.year,
                month: r.month,
                day_of_week: r.day_of_week,
            },
            sales: r.sales,
        }
    }
}

/// Parse orders from CSV with a header row.
///
/// Only the columns of [`ORDER_CSV_HEADER`] are required; a `sales` column
/// is read as the observed value. Values are not range-checked here.
pub fn read_orders_csv<R: Read>(reader: R) -> Result<Vec<LabelledOrder>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = ORDER_CSV_HEADER
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ExportError::InvalidRecord {
            row: 0,
            message: format!("missing column {missing:?}"),
        });
    }

    rdr.deserialize::<OrderCsvRecord>()
        .enumerate()
        .map(|(i, record)| {
            record
                .map(LabelledOrder::from)
                .map_err(|e| ExportError::InvalidRecord {
                    row: i + 1,
                    message: e.to_string(),
                })
        })
        .collect()
}

/// Parse an order CSV file.
pub fn read_orders_file(path: &Path) -> Result<Vec<LabelledOrder>, ExportError> {
    read_orders_csv(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CSV: &str = "\
quantity,unit_price,discount_pct,category,segment,region,ship_mode,year,month,day_of_week
5,100.0,15,Technology,Consumer,West,Standard Class,2024,11,Friday
2, 19.99 ,0,Furniture,Corporate,East,Same Day,2023,3,Monday
";

    #[test]
    fn test_read_orders() {
        let orders = read_orders_csv(CSV.as_bytes()).unwrap();
        assert_eq!(orders.len(), 2);

        let first = &orders[0];
        assert_eq!(first.order.quantity, 5);
        assert_relative_eq!(first.order.discount, 0.15);
        assert_eq!(first.order.ship_mode, "Standard Class");
        assert_eq!(first.sales, None);

        assert_relative_eq!(orders[1].order.unit_price, 19.99);
    }

    #[test]
    fn test_read_labelled_orders() {
        let csv = "\
quantity,unit_price,discount_pct,category,segment,region,ship_mode,year,month,day_of_week,sales
1,10,0,Furniture,Consumer,South,First Class,2021,1,Sunday,9.5
";
        let orders = read_orders_csv(csv.as_bytes()).unwrap();
        assert_eq!(orders[0].sales, Some(9.5));
    }

    #[test]
    fn test_missing_column() {
        let csv = "quantity,unit_price\n1,2\n";
        match read_orders_csv(csv.as_bytes()) {
            Err(ExportError::InvalidRecord { row: 0, message }) => {
                assert!(message.contains("discount_pct"));
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_reports_row() {
        let csv = format!("{CSV}x,1,0,Furniture,Consumer,South,First Class,2021,1,Sunday\n");
        match read_orders_csv(csv.as_bytes()) {
            Err(ExportError::InvalidRecord { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn test_export_csv() {
        let order = OrderInputRecord::default();
        let rows = vec![BatchRow::new(&order, &PredictionResult::new(400.0, 425.0))];

        let csv = rows.export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "quantity,unit_price,discount_pct,category,segment,region,ship_mode,year,month,day_of_week,predicted_sales,expected_by_formula,absolute_difference"
        );
        let record = lines.next().unwrap();
        assert!(record.starts_with("5,100.0,"));
        assert!(record.ends_with(",400.0,425.0,25.0"));
    }

    #[test]
    fn test_export_json() {
        let order = OrderInputRecord::default();
        let rows = vec![BatchRow::new(&order, &PredictionResult::new(400.0, 425.0))];
        let json: serde_json::Value =
            serde_json::from_str(&rows.export_to_string(ExportFormat::Json).unwrap()).unwrap();
        assert_eq!(json[0]["absolute_difference"], 25.0);
        assert_eq!(json[0]["day_of_week"], "Friday");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), ExportFormat::PrettyJson);
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Csv);
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
