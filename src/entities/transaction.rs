//! Payments and refunds

use crate::core::aggregate::{
    breakdown, count, growth, period_totals, rate, sum, trend, AggregateSnapshot, Granularity,
    TrendWindow,
};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;
use crate::entities::Plan;
use chrono::NaiveDate;
use uuid::Uuid;

categorical_enum! {
    pub enum PaymentMethod {
        #[default]
        Card => "card",
        PayPal => "paypal",
        ApplePay => "apple_pay",
        GooglePay => "google_pay",
        BankTransfer => "bank_transfer",
    }
}

categorical_enum! {
    pub enum TransactionStatus {
        #[default]
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

impl TransactionStatus {
    /// Money was collected, whether or not it was later refunded
    pub fn is_settled(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Refunded)
    }
}

define_record!(
    Transaction, TransactionPatch, "transaction",
    id: Uuid,
    {
        /// Processor reference, e.g. `TXN-004211`
        reference: String,
        customer: String,
        amount: f64,
        currency: String,
        method: PaymentMethod,
        status: TransactionStatus,
        plan: Plan,
        date: NaiveDate,
    },
    searchable: ["reference", "customer"],
    categorical: ["method", "status", "plan"],
    required: ["customer"],
    date_field: "date",
    rules: [
        FieldRule::new("amount").positive(),
        FieldRule::new("currency").one_of(["USD", "EUR", "GBP"]),
    ],
    tabs: transaction_tabs,
);

fn transaction_tabs() -> Vec<Tab<Transaction>> {
    vec![
        Tab::all(),
        Tab::new("completed", "Completed", |t: &Transaction| t.status == TransactionStatus::Completed),
        Tab::new("refunded", "Refunded", |t: &Transaction| t.status == TransactionStatus::Refunded),
        Tab::new("pending", "Pending", |t: &Transaction| t.status == TransactionStatus::Pending),
    ]
}

/// Numbers of the payments dashboard
///
/// Gross revenue counts every settled transaction, refunded ones included;
/// net revenue subtracts the refunds. Growth compares the anchor's calendar
/// month with the month before.
pub fn summary(transactions: &[Transaction], today: NaiveDate) -> AggregateSnapshot {
    let settled_amount = |t: &Transaction| if t.status.is_settled() { t.amount } else { 0.0 };
    let on = |t: &Transaction| Some(t.date);

    let gross = sum(transactions, settled_amount);
    let refunded = sum(transactions, |t| {
        if t.status == TransactionStatus::Refunded { t.amount } else { 0.0 }
    });
    let settled: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.status.is_settled())
        .cloned()
        .collect();
    let completed = count(transactions, |t| t.status == TransactionStatus::Completed);
    let (this_month, last_month) = period_totals(
        transactions,
        on,
        settled_amount,
        TrendWindow::new(Granularity::Month, 1),
        today,
    );

    AggregateSnapshot::builder("transaction")
        .total("gross_revenue", gross)
        .total("refunded", refunded)
        .total("net_revenue", gross - refunded)
        .total(
            "average_order_value",
            if settled.is_empty() { 0.0 } else { gross / settled.len() as f64 },
        )
        .count("transactions", transactions.len())
        .count("completed", completed)
        .count("refunds", count(transactions, |t| t.status == TransactionStatus::Refunded))
        .count("failed", count(transactions, |t| t.status == TransactionStatus::Failed))
        .count("pending", count(transactions, |t| t.status == TransactionStatus::Pending))
        .breakdown("revenue_by_method", breakdown(&settled, |t| t.method, |t| t.amount))
        .breakdown("revenue_by_plan", breakdown(&settled, |t| t.plan, |t| t.amount))
        .trend(
            "monthly_revenue",
            trend(transactions, on, settled_amount, TrendWindow::last_12_months(), today),
        )
        .growth("revenue_mom", growth(this_month, last_month))
        .rate("refund_rate", rate(refunded, gross))
        .rate("success_rate", rate(completed as f64, transactions.len() as f64))
        .build()
}
