use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One cleaned line item from the transaction history. A record belongs to
/// exactly one customer and one invoice; the ingestion stage has already
/// dropped rows without a customer identifier and cancelled orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub customer_id: String,
    pub invoice_id: String,
    pub invoice_ts: NaiveDateTime,
    pub unit_price: f64,
    pub quantity: i64,
}

impl TransactionRecord {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Recency/Frequency/Monetary triple for one customer, computed once per run
/// over the full transaction set and immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMetrics {
    pub customer_id: String,
    /// Calendar days between the snapshot date and the date of the
    /// customer's most recent invoice. Always >= 1: the snapshot sits one
    /// day past the newest invoice in the dataset.
    pub recency_days: i64,
    /// Count of distinct invoice identifiers (repeated line items on the
    /// same invoice count once).
    pub frequency: u64,
    /// Sum of line totals. May be negative when upstream data carries
    /// negative line items; not corrected here.
    pub monetary_value: f64,
}

/// Composite RFM code: the three quartile scores in R, F, M order.
/// Renders and serializes as a 3-digit string, e.g. "432".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RfmCode {
    pub r: u8,
    pub f: u8,
    pub m: u8,
}

impl RfmCode {
    pub fn new(r: u8, f: u8, m: u8) -> Self {
        Self { r, f, m }
    }
}

impl fmt::Display for RfmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.r, self.f, self.m)
    }
}

impl std::str::FromStr for RfmCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<u8> = s
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| format!("RFM code '{s}' contains a non-digit"))?;
        match digits.as_slice() {
            [r, f, m] => Ok(RfmCode::new(*r, *f, *m)),
            _ => Err(format!("RFM code '{s}' must be exactly 3 digits")),
        }
    }
}

impl Serialize for RfmCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RfmCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Named behavioral segment. Variant order is the rule-table evaluation
/// order with the fallback last; it doubles as the deterministic tie-break
/// for count sorting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Champions,
    LoyalCustomers,
    PotentialLoyalists,
    RecentCustomers,
    Lost,
    Hibernating,
    Others,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::Champions,
        Segment::LoyalCustomers,
        Segment::PotentialLoyalists,
        Segment::RecentCustomers,
        Segment::Lost,
        Segment::Hibernating,
        Segment::Others,
    ];
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Champions => write!(f, "Champions"),
            Segment::LoyalCustomers => write!(f, "Loyal Customers"),
            Segment::PotentialLoyalists => write!(f, "Potential Loyalists"),
            Segment::RecentCustomers => write!(f, "Recent Customers"),
            Segment::Lost => write!(f, "Lost"),
            Segment::Hibernating => write!(f, "Hibernating"),
            Segment::Others => write!(f, "Others"),
        }
    }
}

/// A customer with quartile scores, composite code, and assigned segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub metrics: CustomerMetrics,
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    pub rfm_code: RfmCode,
    pub segment: Segment,
}

/// Customers per segment. Every defined segment is present even at zero, so
/// downstream reporting never has to special-case missing labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDistribution {
    counts: BTreeMap<Segment, u64>,
}

impl SegmentDistribution {
    pub fn new() -> Self {
        Self {
            counts: Segment::ALL.iter().map(|&s| (s, 0)).collect(),
        }
    }

    pub fn record(&mut self, segment: Segment) {
        *self.counts.entry(segment).or_insert(0) += 1;
    }

    pub fn count(&self, segment: Segment) -> u64 {
        self.counts.get(&segment).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Counts sorted by descending size; ties break in rule-table order so
    /// repeated runs print identically.
    pub fn sorted_counts(&self) -> Vec<(Segment, u64)> {
        let mut rows: Vec<(Segment, u64)> = self.counts.iter().map(|(&s, &c)| (s, c)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }
}

impl Default for SegmentDistribution {
    fn default() -> Self {
        Self::new()
    }
}
