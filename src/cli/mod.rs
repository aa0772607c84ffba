use std::fs::File;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::application::{DaoManager, Exporter, OrderService, ReportService};
use crate::domain::{format_decimal, parse_price, Item, ItemType, Order, Position, User};
use crate::io::{ConsoleExporter, CsvExporter, JsonExporter};
use crate::storage::{Database, SalesPeriod};

/// Brewpos - coffee-bar order intake and sales reporting
#[derive(Parser)]
#[command(name = "brewpos")]
#[command(about = "Record orders and report sales per salesperson")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "BREWPOS_DATABASE", default_value = "brewpos.db")]
    pub database: String,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record an order
    Order {
        /// First name of the person taking the order
        #[arg(long)]
        first: String,

        /// Last name of the person taking the order
        #[arg(long)]
        last: String,

        /// Position: manager, salesman
        #[arg(long, default_value = "salesman")]
        position: String,

        /// Item as NAME:PRICE:TYPE (e.g. "espresso:2.00:beverage"), repeatable
        #[arg(short, long = "item")]
        items: Vec<String>,

        /// Date the order was placed (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Report sales per salesperson
    Report {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,

        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Install the global log subscriber. `RUST_LOG` overrides the defaults.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "brewpos=debug,sqlx=warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                let db = Database::create_file(&self.database).await?;
                db.close().await;
                println!("Database initialized: {}", self.database);
            }

            Commands::Order {
                first,
                last,
                position,
                items,
                date,
            } => {
                let position = Position::from_str(&position)
                    .with_context(|| format!("Unknown position '{}'", position))?;
                let mut order = Order::new(User::new(first, last, position));
                for spec in &items {
                    order.add_item(parse_item(spec)?);
                }
                if let Some(date) = date {
                    order = order.with_placed_at(parse_date(&date)?);
                }

                let db = Database::open_file(&self.database).await?;
                let mut service = OrderService::new(db.dao_manager());
                let result = service.save(&order).await;
                db.close().await;

                let order_id = result?;
                println!(
                    "Saved order #{} for {} ({} items, total {})",
                    order_id,
                    order.user().full_name(),
                    order.items().len(),
                    format_decimal(&order.total())
                );
            }

            Commands::Report {
                format,
                from,
                to,
                output,
            } => {
                let period = parse_period(from.as_deref(), to.as_deref())?;
                if !matches!(format.as_str(), "table" | "json" | "csv") {
                    bail!("Unknown format '{}'. Use table, json or csv", format);
                }
                let writer: Box<dyn Write> = match &output {
                    Some(path) => Box::new(
                        File::create(path)
                            .with_context(|| format!("Failed to create {}", path))?,
                    ),
                    None => Box::new(io::stdout()),
                };

                let db = Database::open_file(&self.database).await?;
                let result = match format.as_str() {
                    "json" => report_sales(&db, period, &mut JsonExporter::new(writer)).await,
                    "csv" => report_sales(&db, period, &mut CsvExporter::new(writer)).await,
                    _ => report_sales(&db, period, &mut ConsoleExporter::new(writer)).await,
                };
                db.close().await;
                result?;

                if let Some(path) = output {
                    eprintln!("Report written to {}", path);
                }
            }
        }

        Ok(())
    }
}

/// Run one sales report and release its unit of work, so the pool can be
/// closed afterwards.
pub async fn report_sales<E: Exporter>(
    db: &Database,
    period: SalesPeriod,
    exporter: &mut E,
) -> Result<()> {
    let mut service = ReportService::new(db.dao_manager_for(period));
    let reported = service.report(exporter).await;
    let closed = service.into_inner().close_connection().await;

    reported?;
    closed
}

/// Parse "NAME:PRICE:TYPE". The name may itself contain colons.
fn parse_item(spec: &str) -> Result<Item> {
    let mut parts = spec.rsplitn(3, ':');
    let (Some(item_type), Some(price), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        bail!("Invalid item '{}'. Use NAME:PRICE:TYPE", spec);
    };

    let price = parse_price(price).with_context(|| format!("Invalid price in '{}'", spec))?;
    let item_type = ItemType::from_str(item_type)
        .with_context(|| format!("Unknown item type '{}'. Use beverage or addition", item_type))?;

    Ok(Item::new(name, price, item_type))
}

fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", date_str))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .with_context(|| format!("Invalid date '{}'", date_str))
}

/// Both ends are whole days; `to` includes the named day.
fn parse_period(from: Option<&str>, to: Option<&str>) -> Result<SalesPeriod> {
    let from = from.map(parse_date).transpose()?;
    let to = to
        .map(|s| {
            parse_date(s)?
                .checked_add_days(Days::new(1))
                .with_context(|| format!("Date out of range '{}'", s))
        })
        .transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from >= to {
            bail!("--from must not be after --to");
        }
    }
    Ok(SalesPeriod::between(from, to))
}
