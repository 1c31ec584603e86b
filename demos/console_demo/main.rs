//! Console walkthrough over generated catalogue data
//!
//! This example demonstrates:
//! - Seeding repositories with deterministic sample records
//! - Filtering, sorting and paging a list view
//! - Creating and rejecting records through the mutation engine
//! - Dashboard summaries over the authoritative collection
//!
//! Run with `RUST_LOG=backstage=debug` to see the engine's log lines.

use anyhow::Result;
use backstage::entities::album::{self, Album, AlbumPatch, AlbumStatus};
use backstage::entities::transaction::{self, PaymentMethod, Transaction, TransactionPatch, TransactionStatus};
use backstage::entities::{MusicGenre, Plan};
use backstage::prelude::*;
use chrono::{Days, TimeZone};
use tracing_subscriber::EnvFilter;

/// Small linear congruential generator so every run prints the same numbers
struct Seed(u64);

impl Seed {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound.max(1)
    }

    fn pick<T: Copy>(&mut self, values: &[T]) -> T {
        values[self.next(values.len() as u64) as usize]
    }
}

fn album_drafts(seed: &mut Seed, today: NaiveDate) -> Vec<AlbumPatch> {
    let artists = ["Nina Vale", "The Low Tides", "Kofi Mensah", "Aurora Drift", "Los Sueños"];
    let statuses = [AlbumStatus::Published, AlbumStatus::Published, AlbumStatus::Draft, AlbumStatus::Archived];
    (1..=25)
        .map(|n| {
            AlbumPatch::default()
                .title(format!("Sessions Vol. {n}"))
                .artist(seed.pick(&artists))
                .genre(seed.pick(MusicGenre::ALL))
                .status(seed.pick(&statuses))
                .track_count(8 + seed.next(8) as i64)
                .duration_minutes(30 + seed.next(40) as i64)
                .streams(seed.next(2_000_000) as i64)
                .release_date(today - Days::new(seed.next(400)))
        })
        .collect()
}

fn transaction_drafts(seed: &mut Seed, today: NaiveDate) -> Vec<TransactionPatch> {
    let statuses = [
        TransactionStatus::Completed,
        TransactionStatus::Completed,
        TransactionStatus::Completed,
        TransactionStatus::Refunded,
        TransactionStatus::Failed,
        TransactionStatus::Pending,
    ];
    let paid_plans = [Plan::Premium, Plan::Family, Plan::Student];
    (1..=60)
        .map(|n| {
            let plan = seed.pick(&paid_plans);
            let amount = match plan {
                Plan::Family => 16.99,
                Plan::Student => 5.99,
                _ => 10.99,
            };
            TransactionPatch::default()
                .reference(format!("TXN-{:06}", 4_000 + n))
                .customer(format!("listener{n}@backstage.fm"))
                .amount(amount)
                .currency("USD")
                .method(seed.pick(PaymentMethod::ALL))
                .status(seed.pick(&statuses))
                .plan(plan)
                .date(today - Days::new(seed.next(90)))
        })
        .collect()
}

fn print_page(page: &Page<Album>) {
    println!(
        "   page {} of {} ({} matching albums)",
        page.meta.page, page.total_pages, page.meta.total
    );
    for album in &page.items {
        println!(
            "   #{:<3} {:<20} {:<16} {:<10} {:>9} streams",
            album.id, album.title, album.artist, album.genre.as_str(), album.streams
        );
    }
    println!();
}

fn print_snapshot(snapshot: &AggregateSnapshot) {
    for (name, value) in &snapshot.totals {
        println!("   {name:<22} {value:>12.2}");
    }
    for (name, value) in &snapshot.counts {
        println!("   {name:<22} {value:>12}");
    }
    for (name, value) in &snapshot.rates {
        println!("   {name:<22} {value:>11.2}%");
    }
    for (name, value) in &snapshot.growth {
        println!("   {name:<22} {value:>12}");
    }
    for (name, shares) in &snapshot.breakdowns {
        let parts: Vec<String> = shares.iter().map(|s| format!("{} {}%", s.group, s.percentage)).collect();
        println!("   {name:<22} {}", parts.join(", "));
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🎧 Backstage Console Demo");
    println!("=========================\n");

    let clock = Clock::fixed(Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap());
    let today = clock.today();
    let mut seed = Seed(2024);

    // Seed repositories
    let albums: InMemoryRepository<Album> = InMemoryRepository::new().with_clock(clock);
    for draft in album_drafts(&mut seed, today) {
        albums.create(draft).await?;
    }
    let transactions: InMemoryRepository<Transaction> = InMemoryRepository::new().with_clock(clock);
    for draft in transaction_drafts(&mut seed, today) {
        transactions.create(draft).await?;
    }
    println!("✅ Seeded {} albums and {} transactions\n", albums.list().await?.len(), transactions.list().await?.len());

    // List view
    let config = ConsoleConfig::from_yaml_str(
        r#"
entities:
  - entity_type: album
    page_size: 6
"#,
    )?;
    let mut view = ListView::new(config.schema_for::<Album>(), albums.list().await?).with_clock(clock);

    println!("📄 All albums");
    print_page(&view.visible());

    view.set_tab("published");
    view.set_sort("streams:desc")?;
    println!("📄 Published albums, most streamed first");
    print_page(&view.visible());

    view.set_search("sessions vol. 1");
    view.set_date_range(DateRange::Last30Days);
    println!("📄 Searching \"sessions vol. 1\" released in the last 30 days");
    print_page(&view.visible());
    view.clear_filters();

    // Mutations
    let id = view.create(
        AlbumPatch::default()
            .title("Night Shift")
            .artist("Aurora Drift")
            .genre(MusicGenre::Electronic)
            .status(AlbumStatus::Published)
            .release_date(today),
    )?;
    println!("➕ Created album #{id}");

    if let Err(err) = view.create(AlbumPatch::default().artist("Nobody")) {
        let response = err.to_response();
        println!("⚠️  Rejected draft: [{}] {}\n", response.code, response.message);
    }

    // Dashboards
    println!("📊 Albums dashboard");
    print_snapshot(&album::summary(view.records().as_slice(), today));

    println!("📊 Payments dashboard");
    let ledger = transactions.list().await?;
    let snapshot = transaction::summary(ledger.as_slice(), today);
    print_snapshot(&snapshot);

    if let Some(series) = snapshot.trend("monthly_revenue") {
        println!("📈 Monthly revenue");
        for point in series.iter().rev().take(4).rev() {
            println!("   {:<4} {:>10.2}", point.label, point.value);
        }
    }

    Ok(())
}
