use clap::Args;
use std::fs::File;
use std::path::PathBuf;

use franchise_hub::catalog::{parse_listings, FranchiseRepository, NewFranchise};
use franchise_hub::config::AppConfig;
use franchise_hub::error::AppError;
use franchise_hub::projections::{PaybackPeriod, ProjectionEngine, ProjectionInput};
use franchise_hub::store::SqliteStore;

#[derive(Args, Debug, Default)]
pub(crate) struct SeedArgs {
    /// Database file to seed (defaults to the configured APP_DATABASE_PATH)
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
    /// CSV export of listings; omit to load the built-in samples
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProjectArgs {
    /// Staff headcount
    #[arg(long, default_value_t = 0)]
    pub(crate) workers: u32,
    /// Hours per shift
    #[arg(long, default_value_t = 0)]
    pub(crate) shift_hours: u32,
    /// Shifts per day
    #[arg(long, default_value_t = 0)]
    pub(crate) shifts: u32,
    /// Monthly salary per worker-hour unit
    #[arg(long, default_value_t = 0)]
    pub(crate) salary: u32,
}

pub(crate) fn run_seed(args: SeedArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args.database.unwrap_or(config.database.path);

    let listings = match args.listings {
        Some(csv_path) => parse_listings(File::open(csv_path)?)?,
        None => sample_listings(),
    };

    let store = SqliteStore::open(&path)?;
    let franchises = store.franchises();
    let mut seeded = 0usize;
    for listing in listings {
        let franchise = franchises.insert(listing)?;
        println!("seeded #{} {}", franchise.id.0, franchise.name);
        seeded += 1;
    }

    println!("{seeded} listing(s) written to {}", path.display());
    Ok(())
}

pub(crate) fn run_projection(args: ProjectArgs) -> Result<(), AppError> {
    let input = ProjectionInput {
        workers: args.workers,
        shift_hours: args.shift_hours,
        shifts_per_day: args.shifts,
        salary_rate: args.salary,
    };

    let projection = ProjectionEngine::default().project(&input);

    println!("labor cost:      {}", projection.labor_cost);
    println!("other costs:     {}", projection.other_costs);
    println!("revenue:         {}", projection.revenue);
    println!("total expenses:  {}", projection.total_expenses);
    println!("net profit:      {}", projection.net_profit);
    println!("roi:             {:.1}%", projection.roi);
    match projection.payback_period {
        PaybackPeriod::Months(months) => println!("payback period:  {months:.2} months"),
        PaybackPeriod::NotComputable => {
            println!("payback period:  not computable (net profit is zero)")
        }
    }

    Ok(())
}

fn sample_listings() -> Vec<NewFranchise> {
    let rows = [
        (
            "Coffee Point",
            "Compact espresso bar for malls and transit hubs",
            1_200_000,
            "island",
            "5% royalty, marketing fund included",
            "sales@coffeepoint.example",
        ),
        (
            "Bakery Lane",
            "Neighborhood bakery with a fixed supply chain",
            900_000,
            "street",
            "fixed monthly fee",
            "hello@bakerylane.example",
        ),
        (
            "Fit Studio 24",
            "Small-format round-the-clock gym",
            2_500_000,
            "mall",
            "7% royalty after the first year",
            "franchise@fitstudio.example",
        ),
    ];

    rows.into_iter()
        .map(
            |(name, description, investment_amount, format, conditions, contact_info)| {
                NewFranchise {
                    name: name.to_string(),
                    description: description.to_string(),
                    investment_amount,
                    format: format.to_string(),
                    conditions: conditions.to_string(),
                    contact_info: contact_info.to_string(),
                    template_path: None,
                    created_by: None,
                }
            },
        )
        .collect()
}
