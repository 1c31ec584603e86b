//! Listener and staff accounts

use crate::core::aggregate::{
    count, count_by, growth, period_totals, rate, trend, AggregateSnapshot, Granularity,
    TrendWindow,
};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;
use crate::entities::Plan;
use chrono::NaiveDate;

categorical_enum! {
    /// Role of an account in the platform
    pub enum UserRole {
        #[default]
        Listener => "listener",
        Artist => "artist",
        Curator => "curator",
        Admin => "admin",
    }
}

categorical_enum! {
    pub enum UserStatus {
        #[default]
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

define_record!(
    User, UserPatch, "user",
    id: i64,
    {
        name: String,
        email: String,
        role: UserRole,
        status: UserStatus,
        plan: Plan,
        country: String,
        /// Day the account signed up
        joined_on: NaiveDate,
        /// Lifetime stream count
        streams: i64,
    },
    searchable: ["name", "email"],
    categorical: ["role", "status", "plan"],
    required: ["name", "email"],
    date_field: "joined_on",
    rules: [
        FieldRule::new("email").email(),
        FieldRule::new("name").max_length(80),
    ],
    tabs: user_tabs,
);

fn user_tabs() -> Vec<Tab<User>> {
    vec![
        Tab::all(),
        Tab::new("admins", "Admins", |u: &User| u.role == UserRole::Admin),
        Tab::new("active", "Active", |u: &User| u.status == UserStatus::Active),
        Tab::new("suspended", "Suspended", |u: &User| u.status == UserStatus::Suspended),
    ]
}

/// Numbers of the users dashboard
pub fn summary(users: &[User], today: NaiveDate) -> AggregateSnapshot {
    let total = users.len();
    let active = count(users, |u| u.status == UserStatus::Active);
    let paying = count(users, |u| u.plan.is_paid());
    let joined = |u: &User| Some(u.joined_on);

    let (this_month, last_month) =
        period_totals(users, joined, |_| 1.0, TrendWindow::new(Granularity::Month, 1), today);

    AggregateSnapshot::builder("user")
        .count("total", total)
        .count("active", active)
        .count("suspended", count(users, |u| u.status == UserStatus::Suspended))
        .count("paying", paying)
        .breakdown("by_plan", count_by(users, |u| u.plan))
        .breakdown("by_role", count_by(users, |u| u.role))
        .trend("signups", trend(users, joined, |_| 1.0, TrendWindow::last_12_months(), today))
        .growth("signups_mom", growth(this_month, last_month))
        .rate("active_rate", rate(active as f64, total as f64))
        .rate("paying_rate", rate(paying as f64, total as f64))
        .build()
}
