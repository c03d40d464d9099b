use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Platemap - geospatial analysis of city business records
#[derive(Parser, Debug)]
#[command(name = "platemap")]
#[command(about = "Geospatial analysis of city business records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the dataset CSV
    #[arg(long, global = true, default_value = "data/records.csv")]
    pub data: PathBuf,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Records within a radius of a point, nearest first
    Nearby(NearbyArgs),

    /// Per-cell record density over a lat/lon grid
    Density(DensityArgs),

    /// Underserved cells with missing-cuisine suggestions
    Gaps(GapsArgs),

    /// Filter records by cuisine, feature, name, and price ceiling
    Filter(FilterArgs),

    /// Sentiment bands from dining or delivery ratings, with best and worst lists
    Sentiment(SentimentArgs),

    /// Price tiers with an optional name search
    Affordability(AffordabilityArgs),

    /// Cuisine popularity ranking
    Cuisines(CuisinesArgs),

    /// Price distribution and demand lists
    Stats(StatsArgs),

    /// Dataset summary and load diagnostics
    Status,
}

/// Attribute predicates shared by the analysis commands
///
/// "All" is accepted as a no-constraint sentinel for the text fields.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterOpts {
    /// Cuisine substring to match
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Feature substring to match
    #[arg(long)]
    pub feature: Option<String>,

    /// Maximum price for two; records without a price are excluded
    #[arg(long)]
    pub max_price: Option<f64>,
}

#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Origin latitude
    pub lat: f64,

    /// Origin longitude
    pub lon: f64,

    /// Search radius in meters (defaults to the configured radius)
    #[arg(long)]
    pub radius: Option<f64>,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct DensityArgs {
    /// Cell size in degrees (defaults to the configured size)
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Aggregate delivery ratings over delivery-rated records only
    #[arg(long)]
    pub delivery: bool,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct GapsArgs {
    /// Cell size in degrees
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Minimum records per cell before it can be flagged
    #[arg(long)]
    pub min_count: Option<u32>,

    /// Mean rating below which a qualifying cell is underserved
    #[arg(long)]
    pub max_rating: Option<f64>,

    /// How many citywide top cuisines to compare coverage against
    #[arg(long)]
    pub top_n: Option<usize>,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Display-name substring to match
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct SentimentArgs {
    /// How many best and worst records to list
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Band delivery ratings over delivery-rated records only
    #[arg(long)]
    pub delivery: bool,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct AffordabilityArgs {
    /// Display-name substring to search for
    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub filter: FilterOpts,
}

#[derive(Args, Debug)]
pub struct CuisinesArgs {
    /// How many cuisines to list
    #[arg(long)]
    pub top_n: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// How many records in the demand list
    #[arg(long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub filter: FilterOpts,
}
