//! CSV transaction loader for the Online Retail II export shape.
//!
//! Expected columns:
//!   Invoice, StockCode, Description, Quantity, InvoiceDate, Price,
//!   Customer ID, Country
//!
//! Cleaning applied in order: rows without a customer identifier are
//! dropped, then rows whose invoice carries the cancellation prefix. The
//! surviving rows keep their file order.

use chrono::NaiveDateTime;
use rfm_core::config::IngestionConfig;
use rfm_core::{RfmError, RfmResult, TransactionRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// One raw CSV row before cleaning.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "Invoice")]
    pub invoice: String,
    #[serde(rename = "StockCode")]
    pub stock_code: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Customer ID", default)]
    pub customer_id: String,
    #[serde(rename = "Country", default)]
    pub country: String,
}

/// Load and clean transaction records from a CSV reader.
///
/// Unparseable rows fail the whole load: downstream scoring needs a
/// complete, consistent population, so there is no partial result to give.
pub fn load_transactions<R: Read>(
    reader: R,
    config: &IngestionConfig,
) -> RfmResult<Vec<TransactionRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut missing_id = 0usize;
    let mut cancelled = 0usize;

    for (index, row) in csv_reader.deserialize().enumerate() {
        // +2: one for the header row, one for 1-based numbering.
        let line = index + 2;
        let raw: RawTransaction =
            row.map_err(|e| RfmError::Ingestion(format!("row {line}: {e}")))?;

        if raw.customer_id.is_empty() {
            missing_id += 1;
            continue;
        }
        if raw.invoice.starts_with(&config.cancellation_prefix) {
            cancelled += 1;
            continue;
        }

        let invoice_ts = NaiveDateTime::parse_from_str(&raw.invoice_date, &config.timestamp_format)
            .map_err(|e| {
                RfmError::Ingestion(format!(
                    "row {line}: bad invoice date '{}': {e}",
                    raw.invoice_date
                ))
            })?;

        records.push(TransactionRecord {
            customer_id: raw.customer_id,
            invoice_id: raw.invoice,
            invoice_ts,
            unit_price: raw.price,
            quantity: raw.quantity,
        });
    }

    info!(
        kept = records.len(),
        missing_id, cancelled, "loaded transaction history"
    );
    Ok(records)
}

/// Load and clean transaction records from a CSV file path.
pub fn load_transactions_file(
    path: &Path,
    config: &IngestionConfig,
) -> RfmResult<Vec<TransactionRecord>> {
    let file = File::open(path)
        .map_err(|e| RfmError::Ingestion(format!("failed to open '{}': {e}", path.display())))?;
    load_transactions(file, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
Invoice,StockCode,Description,Quantity,InvoiceDate,Price,Customer ID,Country
536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01 08:26:00,2.55,17850,United Kingdom
536365,71053,WHITE METAL LANTERN,6,2010-12-01 08:26:00,3.39,17850,United Kingdom
C536379,D,Discount,-1,2010-12-01 09:41:00,27.50,14527,United Kingdom
536366,22633,HAND WARMER UNION JACK,6,2010-12-01 08:28:00,1.85,,United Kingdom
536367,84406B,CREAM CUPID HEARTS COAT HANGER,8,2010-12-01 08:34:00,2.75,13047,United Kingdom
";

    #[test]
    fn cleaning_drops_cancellations_and_missing_ids() {
        let config = IngestionConfig::default();
        let records = load_transactions(SAMPLE_CSV.as_bytes(), &config).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.customer_id.is_empty()));
        assert!(records.iter().all(|r| !r.invoice_id.starts_with('C')));
    }

    #[test]
    fn rows_keep_file_order_and_field_values() {
        let config = IngestionConfig::default();
        let records = load_transactions(SAMPLE_CSV.as_bytes(), &config).unwrap();

        assert_eq!(records[0].customer_id, "17850");
        assert_eq!(records[0].invoice_id, "536365");
        assert!((records[0].unit_price - 2.55).abs() < 1e-9);
        assert_eq!(records[0].quantity, 6);
        assert_eq!(
            records[0].invoice_ts,
            NaiveDateTime::parse_from_str("2010-12-01 08:26:00", "%Y-%m-%d %H:%M:%S").unwrap()
        );
        assert_eq!(records[2].customer_id, "13047");
    }

    #[test]
    fn bad_invoice_date_fails_the_load() {
        let csv_data = "\
Invoice,StockCode,Description,Quantity,InvoiceDate,Price,Customer ID,Country
536365,85123A,HOLDER,6,01/12/2010 08:26,2.55,17850,United Kingdom
";
        let config = IngestionConfig::default();
        let err = load_transactions(csv_data.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, RfmError::Ingestion(_)));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn unparseable_quantity_fails_the_load() {
        let csv_data = "\
Invoice,StockCode,Description,Quantity,InvoiceDate,Price,Customer ID,Country
536365,85123A,HOLDER,six,2010-12-01 08:26:00,2.55,17850,United Kingdom
";
        let config = IngestionConfig::default();
        assert!(matches!(
            load_transactions(csv_data.as_bytes(), &config),
            Err(RfmError::Ingestion(_))
        ));
    }

    #[test]
    fn custom_cancellation_prefix_is_respected() {
        let csv_data = "\
Invoice,StockCode,Description,Quantity,InvoiceDate,Price,Customer ID,Country
X536365,85123A,HOLDER,6,2010-12-01 08:26:00,2.55,17850,United Kingdom
536366,22633,HAND WARMER,6,2010-12-01 08:28:00,1.85,13047,United Kingdom
";
        let config = IngestionConfig {
            cancellation_prefix: "X".to_string(),
            ..IngestionConfig::default()
        };
        let records = load_transactions(csv_data.as_bytes(), &config).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].invoice_id, "536366");
    }

    #[test]
    fn loads_from_a_file_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let config = IngestionConfig::default();
        let records = load_transactions_file(file.path(), &config).unwrap();
        assert_eq!(records.len(), 3);
    }
}
