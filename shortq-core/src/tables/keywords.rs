//! Per-department keyword lists for query-type inference
//!
//! Each department carries an ordered list of (query type, keywords).
//! Inference scans the list in order and the first category with a keyword
//! present as a whole token in the normalized text wins. Lists include the
//! common abbreviated forms so inference works on raw shorthand before
//! expansion runs.

use crate::department::Department;
use crate::types::QueryType;

type Categories = &'static [(QueryType, &'static [&'static str])];

const ACCOUNTING: Categories = &[
    (
        QueryType::PaymentSearch,
        &["payment", "payments", "pay", "pmt", "p"],
    ),
    (QueryType::BankBalance, &["bank", "bnk", "balance", "bal"]),
    (QueryType::CommissionReport, &["commission", "comm"]),
    (QueryType::ExpenseReport, &["expense", "expenses", "exp"]),
];

const INVENTORY: Categories = &[
    (
        QueryType::StockCheck,
        &["stock", "stk", "item", "items", "qty", "quantity"],
    ),
    (
        QueryType::DeliveryStatus,
        &["delivery", "deliveries", "dlv"],
    ),
];

const SALES: Categories = &[
    (
        QueryType::SalesReport,
        &["sales", "sale", "sls", "revenue", "rev"],
    ),
    (QueryType::CustomerSearch, &["customer", "cust", "client"]),
];

const SERVICE: Categories = &[
    (
        QueryType::TicketSearch,
        &["ticket", "tkt", "issue", "complaint"],
    ),
    (
        QueryType::ScheduleLookup,
        &["schedule", "sched", "appointment"],
    ),
];

const MARKETING: Categories = &[
    (QueryType::CampaignReport, &["campaign", "cmp", "ads"]),
    (QueryType::LeadSearch, &["lead", "leads", "prospect"]),
];

/// The ordered keyword categories for a department
pub fn keyword_categories(department: Department) -> Categories {
    match department {
        Department::Accounting => ACCOUNTING,
        Department::Inventory => INVENTORY,
        Department::Sales => SALES,
        Department::Service => SERVICE,
        Department::Marketing => MARKETING,
    }
}

/// Infer the query type for normalized text, if any keyword category matches
pub fn infer_query_type(department: Department, text: &str) -> Option<QueryType> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for (query_type, keywords) in keyword_categories(department) {
        if keywords.iter().any(|kw| tokens.contains(kw)) {
            return Some(*query_type);
        }
    }
    None
}
