//! Metric aggregation — reduces the transaction history to one
//! Recency/Frequency/Monetary triple per distinct customer.

use chrono::{Duration, NaiveDateTime};
use rfm_core::{CustomerMetrics, RfmError, RfmResult, TransactionRecord};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Reference instant for recency: one day past the newest invoice in the
/// dataset. Computed once for the whole run, so every customer ends up with
/// recency >= 1 and ties are broken only at calendar-day granularity.
pub fn snapshot_instant(records: &[TransactionRecord]) -> RfmResult<NaiveDateTime> {
    let max_ts = records
        .iter()
        .map(|r| r.invoice_ts)
        .max()
        .ok_or(RfmError::EmptyPopulation)?;
    Ok(max_ts + Duration::days(1))
}

struct CustomerAccumulator {
    last_seen: NaiveDateTime,
    invoices: HashSet<String>,
    monetary: f64,
}

/// Produce exactly one `CustomerMetrics` per distinct customer identifier,
/// in first-seen order. That order is load-bearing downstream: it is the
/// tie-break order for frequency ranking.
///
/// A record with an empty customer identifier is a logic-boundary violation
/// (cleaning happens upstream) and fails the whole run.
pub fn aggregate(
    records: &[TransactionRecord],
    snapshot: NaiveDateTime,
) -> RfmResult<Vec<CustomerMetrics>> {
    if records.is_empty() {
        return Err(RfmError::EmptyPopulation);
    }

    let mut order: Vec<String> = Vec::new();
    let mut by_customer: HashMap<String, CustomerAccumulator> = HashMap::new();

    for record in records {
        if record.customer_id.is_empty() {
            return Err(RfmError::MalformedRecord(format!(
                "invoice {} has no customer identifier",
                record.invoice_id
            )));
        }
        let acc = by_customer
            .entry(record.customer_id.clone())
            .or_insert_with(|| {
                order.push(record.customer_id.clone());
                CustomerAccumulator {
                    last_seen: record.invoice_ts,
                    invoices: HashSet::new(),
                    monetary: 0.0,
                }
            });
        acc.last_seen = acc.last_seen.max(record.invoice_ts);
        acc.invoices.insert(record.invoice_id.clone());
        acc.monetary += record.line_total();
    }

    let population: Vec<CustomerMetrics> = order
        .into_iter()
        .map(|customer_id| {
            let acc = &by_customer[&customer_id];
            CustomerMetrics {
                // Calendar-day difference: time of day must not shift the
                // count, only the invoice date matters.
                recency_days: (snapshot.date() - acc.last_seen.date()).num_days(),
                frequency: acc.invoices.len() as u64,
                monetary_value: acc.monetary,
                customer_id,
            }
        })
        .collect();

    info!(customers = population.len(), "aggregated RFM metrics");
    Ok(population)
}
