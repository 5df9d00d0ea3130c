//! Command-line host for the meal catalog.
//!
//! Each invocation loads the catalog, runs one user action through
//! `Dashboard`, prints the result, then prints whatever notifications the
//! action produced.

pub mod args;
pub mod config;
pub mod transport;

use std::io::{self, Write};

use anyhow::bail;
use meal_core::{
    Catalog, Dashboard, DashboardError, Field, FormState, Meal, MealClient, MealService, NotificationLog,
    Notifier, PriceSource, SeededPrices, TracingNotifier, Transport, ValidationRules, FEATURED_LIMIT,
};
use tracing::debug;

pub use args::{Cli, Commands, MealFields};
pub use config::Config;
pub use transport::UreqTransport;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let api_url = cli.api_url.unwrap_or(config.api_url);
    debug!(api_url = %api_url, strict = cli.strict, quiet = cli.quiet, "starting");

    let client = MealClient::new(&api_url)?;
    let prices = config
        .price_seed
        .map_or_else(SeededPrices::from_entropy, SeededPrices::new);
    let service = MealService::new(client, UreqTransport::new(), prices);
    let rules = if cli.strict {
        ValidationRules::strict()
    } else {
        ValidationRules::standard()
    };
    let mut out = io::stdout().lock();
    if cli.quiet {
        let mut dashboard = Dashboard::new(service, TracingNotifier).with_rules(rules);
        return execute(&mut dashboard, cli.command, &mut out);
    }

    let mut dashboard = Dashboard::new(service, NotificationLog::default()).with_rules(rules);
    let outcome = execute(&mut dashboard, cli.command, &mut out);
    for notification in dashboard.notifier_mut().drain() {
        writeln!(out, "[{}] {}", notification.title, notification.description)?;
    }
    outcome
}

/// Run one command against an already configured dashboard.
pub fn execute<T, P, N>(dashboard: &mut Dashboard<T, P, N>, command: Commands, out: &mut impl Write) -> anyhow::Result<()>
where
    T: Transport,
    P: PriceSource,
    N: Notifier,
{
    match command {
        Commands::List { all } => {
            dashboard.refresh()?;
            render(dashboard.catalog(), all, out)?;
        }
        Commands::Search { term, all } => {
            dashboard.refresh()?;
            dashboard.search(&term);
            render(dashboard.catalog(), all, out)?;
        }
        Commands::Add { fields } => {
            dashboard.open_add();
            if let Some(form) = dashboard.form_mut() {
                fill(form, &fields);
            }
            save(dashboard, out)?;
        }
        Commands::Edit { id, fields } => {
            dashboard.refresh()?;
            dashboard.open_edit(&id)?;
            if let Some(form) = dashboard.form_mut() {
                fill(form, &fields);
            }
            save(dashboard, out)?;
        }
        Commands::Delete { id } => {
            dashboard.refresh()?;
            dashboard.open_delete(&id)?;
            dashboard.confirm_delete()?;
            writeln!(out, "deleted {id}")?;
        }
    }
    Ok(())
}

fn fill(form: &mut FormState, fields: &MealFields) {
    let pairs = [
        (Field::FoodName, &fields.name),
        (Field::FoodRating, &fields.rating),
        (Field::FoodImageUrl, &fields.image_url),
        (Field::FoodPrice, &fields.price),
        (Field::RestaurantName, &fields.restaurant_name),
        (Field::RestaurantLogoUrl, &fields.restaurant_logo_url),
        (Field::RestaurantStatus, &fields.status),
    ];
    for (field, value) in pairs {
        if let Some(value) = value {
            form.set_field(field, value.as_str());
        }
    }
}

fn save<T, P, N>(dashboard: &mut Dashboard<T, P, N>, out: &mut impl Write) -> anyhow::Result<()>
where
    T: Transport,
    P: PriceSource,
    N: Notifier,
{
    match dashboard.confirm_save() {
        Ok(meal) => {
            writeln!(out, "{}", format_meal(&meal))?;
            Ok(())
        }
        Err(DashboardError::Validation(errors)) => {
            for (key, message) in errors.iter() {
                writeln!(out, "{key}: {message}")?;
            }
            bail!("{} field(s) failed validation", errors.len())
        }
        Err(err) => Err(err.into()),
    }
}

fn render(catalog: &Catalog, all: bool, out: &mut impl Write) -> io::Result<()> {
    if let Some(state) = catalog.empty_state() {
        return writeln!(out, "{}", state.message());
    }
    let meals = if all { catalog.displayed() } else { catalog.featured() };
    for meal in meals {
        writeln!(out, "{}", format_meal(meal))?;
    }
    if !all && catalog.has_more() {
        let hidden = catalog.displayed().len() - FEATURED_LIMIT;
        writeln!(out, "... {hidden} more (view more with --all)")?;
    }
    Ok(())
}

fn format_meal(meal: &Meal) -> String {
    format!(
        "{:>6}  {:<28} ${:>6.2}  * {:.1}  {} ({}){}",
        meal.id,
        meal.name,
        meal.price,
        meal.rating,
        meal.restaurant.name,
        meal.restaurant.status,
        if meal.is_new { "  NEW" } else { "" }
    )
}
