//! Shared core types: query types and confidence scores

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of business query an input resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    /// Catch-all when nothing more specific matches
    GeneralSearch,
    // Accounting
    PaymentSearch,
    BankBalance,
    CommissionReport,
    ExpenseReport,
    // Inventory
    StockCheck,
    DeliveryStatus,
    // Sales
    SalesReport,
    CustomerSearch,
    // Service
    TicketSearch,
    ScheduleLookup,
    // Marketing
    CampaignReport,
    LeadSearch,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display matches the wire form
        let s = match self {
            QueryType::GeneralSearch => "GENERAL_SEARCH",
            QueryType::PaymentSearch => "PAYMENT_SEARCH",
            QueryType::BankBalance => "BANK_BALANCE",
            QueryType::CommissionReport => "COMMISSION_REPORT",
            QueryType::ExpenseReport => "EXPENSE_REPORT",
            QueryType::StockCheck => "STOCK_CHECK",
            QueryType::DeliveryStatus => "DELIVERY_STATUS",
            QueryType::SalesReport => "SALES_REPORT",
            QueryType::CustomerSearch => "CUSTOMER_SEARCH",
            QueryType::TicketSearch => "TICKET_SEARCH",
            QueryType::ScheduleLookup => "SCHEDULE_LOOKUP",
            QueryType::CampaignReport => "CAMPAIGN_REPORT",
            QueryType::LeadSearch => "LEAD_SEARCH",
        };
        f.write_str(s)
    }
}

/// A [0, 1] estimate of how well an interpretation matches user intent
///
/// Construction clamps, so a `Confidence` can never leave the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Confidence assigned when type inference finds a keyword
    pub const KEYWORD: Confidence = Confidence(0.6);
    /// Confidence assigned when no keyword category matches
    pub const FALLBACK: Confidence = Confidence(0.3);
    /// Confidence assigned when every store lookup failed
    pub const DEGRADED: Confidence = Confidence(0.2);

    /// Ceiling for exact-pattern confidence
    const EXACT_CAP: f64 = 0.95;
    /// Boost added to a pattern's priority score on an exact hit
    const EXACT_BOOST: f64 = 0.1;

    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Confidence for an exact pattern hit: `min(0.95, priority + 0.1)`
    pub fn exact_match(priority_score: f64) -> Self {
        Self::new(f64::min(
            Self::EXACT_CAP,
            priority_score.clamp(0.0, 1.0) + Self::EXACT_BOOST,
        ))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Clamp a raw score into [0, 1]
pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
