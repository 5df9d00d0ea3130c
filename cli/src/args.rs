use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meals")]
#[command(about = "Browse and manage the meal catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Collection URL of the Food resource. Overrides MEALS_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Apply the stricter form rules (rating 1-5, URL parsing, price required).
    #[arg(long, global = true)]
    pub strict: bool,

    /// Send notifications to the log instead of stdout.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the featured meals.
    List {
        /// Print every meal instead of the featured slice.
        #[arg(long)]
        all: bool,
    },

    /// Show meals whose name contains TERM.
    Search {
        term: String,

        #[arg(long)]
        all: bool,
    },

    /// Create a meal.
    Add {
        #[command(flatten)]
        fields: MealFields,
    },

    /// Edit a meal. Unset flags keep their current value.
    Edit {
        id: String,

        #[command(flatten)]
        fields: MealFields,
    },

    /// Delete a meal.
    Delete { id: String },
}

#[derive(Args, Debug, Default, Clone)]
pub struct MealFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub rating: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub restaurant_name: Option<String>,

    #[arg(long)]
    pub restaurant_logo_url: Option<String>,

    /// "Open Now" or "Closed".
    #[arg(long)]
    pub status: Option<String>,
}
