use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nordic_core::{ItineraryInputs, LengthControl};
use nordic_observability::{AppMetrics, init_tracing};
use nordic_planner::TripPlanner;
use nordic_storage::{CatalogHandle, CatalogStore, DEFAULT_CATALOG_PATH};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "nordic-routes")]
#[command(about = "Build day-by-day Nordic itineraries from the route catalog")]
struct Cli {
    #[arg(long, env = "NORDIC_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog regions.
    Regions,
    /// Show the route menu for a region.
    Routes { region: String },
    /// Show how the trip length is chosen for a route.
    Length { route: String },
    /// Build an itinerary.
    Plan {
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        route: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        length: Option<i64>,
        #[arg(long)]
        budget: Option<String>,
    },
    /// Interactive form: region, route, length, budget.
    Form,
}

#[derive(Debug, Serialize)]
struct LengthView {
    control: LengthControl,
    initial_value: Option<u32>,
    help: Option<String>,
}

impl From<LengthControl> for LengthView {
    fn from(control: LengthControl) -> Self {
        Self {
            control,
            initial_value: control.initial_value(),
            help: control.help_text(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("nordic_routes");
    let cli = Cli::parse();

    let planner = build_planner(cli.catalog);

    match cli.command {
        Command::Regions => print_json(&planner.regions().await)?,
        Command::Routes { region } => print_json(&planner.route_menu(&region).await)?,
        Command::Length { route } => {
            print_json(&LengthView::from(planner.length_control(&route).await))?
        }
        Command::Plan {
            region,
            route,
            length,
            budget,
        } => {
            let itinerary = planner
                .plan(ItineraryInputs {
                    region,
                    route,
                    length,
                    budget,
                })
                .await;
            print_json(&itinerary)?;
        }
        Command::Form => run_form(&planner).await?,
    }

    Ok(())
}

fn build_planner(catalog_path: PathBuf) -> TripPlanner {
    let (handle, _loader) = CatalogHandle::spawn_load(CatalogStore::file(catalog_path));
    TripPlanner::new(handle, AppMetrics::shared())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed rendering output")?;
    println!("{rendered}");
    Ok(())
}

async fn run_form(planner: &TripPlanner) -> Result<()> {
    println!("Nordic Routes itinerary form. type 'exit' to quit.");

    loop {
        let Some(region) = prompt("Region")? else {
            break;
        };

        let menu = planner.route_menu(&region).await;
        println!("{}", menu.prompt);

        let route = match &menu.auto_selected {
            Some(id) => Some(id.clone()),
            None if menu.options.is_empty() => None,
            None => {
                for option in &menu.options {
                    println!("  {:<20} {}", option.id, option.label);
                }
                let Some(choice) = prompt("Route id")? else {
                    break;
                };
                Some(choice)
            }
        };

        let control = planner
            .length_control(route.as_deref().unwrap_or_default())
            .await;
        if let Some(help) = control.help_text() {
            println!("{help}");
        }

        let length = if control.is_locked() {
            None
        } else {
            let Some(raw) = prompt("Length (days)")? else {
                break;
            };
            raw.parse::<i64>().ok()
        };

        let Some(budget) = prompt("Budget [budget/mid/premium]")? else {
            break;
        };

        let itinerary = planner
            .plan(ItineraryInputs {
                region: Some(region),
                route,
                length,
                budget: Some(budget),
            })
            .await;

        println!(
            "\n{} days in {} ({}): {}{}",
            itinerary.length,
            itinerary.region,
            itinerary.budget.as_code(),
            itinerary.currency,
            itinerary.estimate
        );
        println!(
            "Focus: {}",
            if itinerary.focus.is_empty() {
                "—".to_string()
            } else {
                itinerary.focus.join(", ")
            }
        );
        for day in &itinerary.days {
            println!("- {}", day.title);
            println!("    Morning:   {}", day.morning);
            println!("    Afternoon: {}", day.afternoon);
            println!("    Evening:   {}", day.evening);
        }
        println!(
            "Hotels: {}  Activities: {}  Transport: {}",
            itinerary.affiliates.hotel,
            itinerary.affiliates.activity,
            itinerary.affiliates.transport
        );
        println!();
    }

    Ok(())
}

/// Reads one trimmed answer; `None` on EOF, `exit` or `quit`.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let answer = line.trim();
    if answer.eq_ignore_ascii_case("exit") || answer.eq_ignore_ascii_case("quit") {
        return Ok(None);
    }

    Ok(Some(answer.to_string()))
}
