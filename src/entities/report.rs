//! Moderation reports filed by listeners and rights holders

use crate::core::aggregate::{
    count, count_by, growth, period_totals, rate, trend, AggregateSnapshot, TrendWindow,
};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;
use chrono::NaiveDate;
use uuid::Uuid;

categorical_enum! {
    pub enum ReportKind {
        Copyright => "copyright",
        Abuse => "abuse",
        Spam => "spam",
        Bug => "bug",
        #[default]
        Other => "other",
    }
}

categorical_enum! {
    pub enum ReportStatus {
        #[default]
        Open => "open",
        InReview => "in_review",
        Resolved => "resolved",
        Dismissed => "dismissed",
    }
}

categorical_enum! {
    pub enum Priority {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

impl ReportStatus {
    /// Still waiting on a moderator
    pub fn is_open(&self) -> bool {
        matches!(self, ReportStatus::Open | ReportStatus::InReview)
    }
}

define_record!(
    Report, ReportPatch, "report",
    id: Uuid,
    {
        subject: String,
        description: String,
        reporter: String,
        kind: ReportKind,
        status: ReportStatus,
        priority: Priority,
        /// What the report is about, e.g. a track title
        target: String,
        filed_on: NaiveDate,
    },
    searchable: ["subject", "description", "reporter"],
    categorical: ["kind", "status", "priority"],
    required: ["subject", "kind"],
    date_field: "filed_on",
    rules: [
        FieldRule::new("subject").max_length(140),
        FieldRule::new("description").max_length(2000),
    ],
    tabs: report_tabs,
);

fn report_tabs() -> Vec<Tab<Report>> {
    vec![
        Tab::all(),
        Tab::new("open", "Open", |r: &Report| r.status.is_open()),
        Tab::new("resolved", "Resolved", |r: &Report| !r.status.is_open()),
    ]
}

/// Numbers of the reports dashboard
///
/// `filed_weekly` compares the last seven days with the seven before.
pub fn summary(reports: &[Report], today: NaiveDate) -> AggregateSnapshot {
    let total = reports.len();
    let open = count(reports, |r| r.status.is_open());
    let resolved = count(reports, |r| r.status == ReportStatus::Resolved);
    let filed = |r: &Report| Some(r.filed_on);
    let (this_week, last_week) =
        period_totals(reports, filed, |_| 1.0, TrendWindow::last_7_days(), today);

    AggregateSnapshot::builder("report")
        .count("total", total)
        .count("open", open)
        .count("urgent_open", count(reports, |r| r.status.is_open() && r.priority == Priority::Urgent))
        .breakdown("by_kind", count_by(reports, |r| r.kind))
        .breakdown("by_priority", count_by(reports, |r| r.priority))
        .trend("filed", trend(reports, filed, |_| 1.0, TrendWindow::last_7_days(), today))
        .growth("filed_weekly", growth(this_week, last_week))
        .rate("resolution_rate", rate(resolved as f64, total as f64))
        .build()
}
