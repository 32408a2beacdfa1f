use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;

use travel_api::config::AppConfig;
use travel_api::db;
use travel_api::seed::{seed_database, SampleGenerator, SeedCounts};

/// Seeds the database with sample users, listings, bookings and reviews.
#[derive(Debug, Parser)]
#[command(name = "seed", version, about)]
struct Args {
    /// Number of users to create
    #[arg(long, default_value_t = 5)]
    users: usize,

    /// Number of listings to create
    #[arg(long, default_value_t = 10)]
    listings: usize,

    /// Number of bookings to create
    #[arg(long, default_value_t = 20)]
    bookings: usize,

    /// Number of reviews to create
    #[arg(long, default_value_t = 30)]
    reviews: usize,

    /// Random seed, for a reproducible data set
    #[arg(long)]
    seed: Option<u64>,
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    let pool = db::get_db_pool(&config).await?;
    db::run_migrations(&pool).await?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = chrono::Local::now().date_naive();
    let mut generator = SampleGenerator::new(rng, today);

    log::info!("Starting database seeding...");
    let counts = SeedCounts {
        users: args.users,
        listings: args.listings,
        bookings: args.bookings,
        reviews: args.reviews,
    };
    let report = seed_database(&pool, counts, &mut generator).await?;

    log::info!(
        "Database seeding completed: {} new amenities, {} users, {} listings, {} bookings, {} reviews",
        report.amenities_created,
        report.users,
        report.listings,
        report.bookings,
        report.reviews
    );
    Ok(())
}
