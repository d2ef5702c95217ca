use autoluxe_common::options::{self, FilterOption};
use autoluxe_common::{FilterField, FilterSelection, PriceRange};
use autoluxe_core::auth::AuthSession;
use autoluxe_core::car_draft::NewCar;
use autoluxe_core::catalog::{CatalogClient, CatalogError};
use autoluxe_core::config::Config;
use autoluxe_core::filter_store::FilterStore;
use autoluxe_core::listing::ListingController;
use autoluxe_core::query_codec;
use autoluxe_core::storage::FileSessionStorage;
use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// autoluxe headless client: browse the rental catalog from a terminal.
#[derive(Parser)]
#[command(name = "autoluxe")]
struct Args {
    /// Base URL of the catalog service.
    #[arg(long, env = "AUTOLUXE_BACKEND_URL")]
    backend_url: Option<String>,

    /// Cars requested per page.
    #[arg(long, env = "AUTOLUXE_PAGE_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    /// Directory holding the browsing session.
    #[arg(long, env = "AUTOLUXE_SESSION_DIR")]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List cars matching the current filters.
    Browse {
        /// Apply a shared link query (e.g. `brands=ferrari&type=sports`) first.
        #[arg(long)]
        query: Option<String>,

        /// Number of pages to load.
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Print the current filters and the listing link for them.
    Show,
    /// Change filters.
    Set {
        /// Toggle a brand (selecting one replaces the previous brand). Empty for any.
        #[arg(long)]
        brand: Option<String>,

        /// Daily price range as `MIN-MAX`. Empty for any.
        #[arg(long, value_parser = parse_price_range)]
        price: Option<PriceRange>,

        /// Car type (`sedan`, `suv`, `sports`, `luxury`). Empty for any.
        #[arg(long = "type")]
        car_type: Option<String>,

        /// `automatic` or `manual`. Empty for any.
        #[arg(long)]
        transmission: Option<String>,
    },
    /// Reset every filter.
    Clear,
    /// Show one car.
    Car { id: String },
    /// Create a car listing from a JSON file.
    AddCar {
        #[arg(long)]
        file: PathBuf,
    },
    /// Store the bearer token issued by the identity provider.
    Login {
        #[arg(long, env = "AUTOLUXE_TOKEN")]
        token: String,
    },
    Logout,
    /// Print the effective configuration.
    Config {
        /// Write it to ~/.autoluxe/config.yaml.
        #[arg(long)]
        save: bool,
    },
    /// Forget the session (filters and credentials).
    EndSession,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn fail(context: &str, e: impl Display) -> ! {
    error!("{context}: {e}");
    std::process::exit(1);
}

/// `MIN-MAX`, or a blank value for no price constraint.
fn parse_price_range(raw: &str) -> Result<PriceRange, String> {
    if raw.trim().is_empty() {
        return Ok(PriceRange::UNSET);
    }
    let parse = |s: &str| s.trim().parse::<u64>().map_err(|e| format!("{s:?}: {e}"));
    let (min, max) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got {raw:?}"))?;
    let (min, max) = (parse(min)?, parse(max)?);
    if min > max {
        return Err(format!("minimum {min} is above maximum {max}"));
    }
    Ok(PriceRange::new(min, max))
}

fn load_config(args: &Args) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| fail("Failed to load config", e));
    if let Some(url) = &args.backend_url {
        config.backend_url = url.clone();
    }
    if let Some(size) = args.page_size {
        config.page_size = size;
    }
    if let Some(dir) = &args.session_dir {
        config.session_dir = dir.clone();
    }
    config
}

/// Stores backing one browsing session.
struct Session {
    filters: FilterStore,
    auth: AuthSession,
}

impl Session {
    fn open(config: &Config) -> Self {
        let filters = FileSessionStorage::open(config.filters_dir())
            .unwrap_or_else(|e| fail("Failed to open filter session", e));
        let auth = FileSessionStorage::open(config.auth_dir())
            .unwrap_or_else(|e| fail("Failed to open auth session", e));
        Self {
            filters: FilterStore::new(Arc::new(filters)),
            auth: AuthSession::new(Arc::new(auth)),
        }
    }

    fn client(&self, config: &Config) -> CatalogClient {
        CatalogClient::from_config(config).with_auth(self.auth.clone())
    }
}

fn label(options: &[FilterOption], value: &str) -> String {
    if value.is_empty() {
        "Any".to_string()
    } else {
        options::label_for(options, value).to_string()
    }
}

fn print_filters(filters: &FilterSelection) {
    let brands = if filters.brands.is_empty() {
        "Any".to_string()
    } else {
        filters
            .brands
            .iter()
            .map(|b| options::label_for(options::BRANDS, b))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Brand:        {brands}");
    println!("Price:        {}", filters.price_range.label());
    println!("Type:         {}", label(options::CAR_TYPES, &filters.car_type));
    println!(
        "Transmission: {}",
        label(options::TRANSMISSIONS, &filters.transmission)
    );
    println!("Active:       {}", filters.active_count());
    println!("Link:         {}", query_codec::listing_href(filters));
}

async fn browse(session: &Session, config: &Config, query: Option<&str>, pages: u32) {
    if let Some(query) = query {
        query_codec::apply_query(&session.filters, query);
    }

    let client = session.client(config);
    let mut listing = ListingController::new(session.filters.current());
    for _ in 0..pages {
        if !listing.load_next(&client).await {
            break;
        }
    }

    if let Some(e) = listing.error() {
        if matches!(e, CatalogError::Unauthorized { .. }) {
            warn!("Session expired, run `autoluxe login` again");
        }
        fail("Failed to load cars", e);
    }

    if listing.car_count() == 0 {
        println!("No cars match these filters.");
        return;
    }

    for car in listing.cars() {
        println!(
            "{:<26} {:<32} {:<18} {}",
            car.id,
            car.title(),
            car.daily_price_label().unwrap_or_default(),
            car.location_name().unwrap_or("-")
        );
    }

    let total = listing
        .total_cars()
        .map_or_else(|| "?".to_string(), |t| t.to_string());
    println!(
        "\n{} of {total} cars ({} pages loaded)",
        listing.car_count(),
        listing.pages_loaded()
    );
    if listing.has_next_page() {
        println!("More available: rerun with --pages {}", pages + 1);
    }
}

fn set_filters(
    store: &FilterStore,
    brand: Option<String>,
    price: Option<PriceRange>,
    car_type: Option<String>,
    transmission: Option<String>,
) {
    match brand.as_deref().map(str::trim) {
        Some("") => {
            store.set_field(FilterField::Brands(Vec::new()));
        }
        Some(brand) => {
            store.toggle_brand(brand);
        }
        None => {}
    }
    // An unset range still goes through set_price_range; with no bounds
    // it is never sent.
    if let Some(price) = price {
        store.set_price_range(price);
    }
    if let Some(car_type) = car_type {
        store.set_field(FilterField::Type(car_type.trim().to_string()));
    }
    if let Some(transmission) = transmission {
        store.set_field(FilterField::Transmission(transmission.trim().to_string()));
    }
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();
    let config = load_config(&args);
    info!("Using catalog at {}", config.backend_url);

    match args.command {
        Command::Browse { query, pages } => {
            let session = Session::open(&config);
            browse(&session, &config, query.as_deref(), pages).await;
        }
        Command::Show => {
            let session = Session::open(&config);
            print_filters(&session.filters.current());
        }
        Command::Set {
            brand,
            price,
            car_type,
            transmission,
        } => {
            let session = Session::open(&config);
            set_filters(&session.filters, brand, price, car_type, transmission);
            print_filters(&session.filters.current());
        }
        Command::Clear => {
            let session = Session::open(&config);
            print_filters(&session.filters.clear());
        }
        Command::Car { id } => {
            let session = Session::open(&config);
            let car = session
                .client(&config)
                .fetch_car(&id)
                .await
                .unwrap_or_else(|e| fail("Failed to load car", e));
            let json = serde_json::to_string_pretty(&car)
                .unwrap_or_else(|e| fail("Failed to format car", e));
            println!("{json}");
        }
        Command::AddCar { file } => {
            let raw = std::fs::read_to_string(&file)
                .unwrap_or_else(|e| fail(&format!("Failed to read {}", file.display()), e));
            let draft: NewCar =
                serde_json::from_str(&raw).unwrap_or_else(|e| fail("Invalid car JSON", e));
            let session = Session::open(&config);
            if !session.auth.is_signed_in() {
                warn!("Not signed in, the catalog may reject this request");
            }
            let created = session
                .client(&config)
                .create_car(&draft)
                .await
                .unwrap_or_else(|e| fail("Failed to create car", e));
            println!("Created {} ({})", created.id, created.title());
        }
        Command::Login { token } => {
            let session = Session::open(&config);
            session
                .auth
                .set_token(token.trim())
                .unwrap_or_else(|e| fail("Failed to store token", e));
            println!("Signed in.");
        }
        Command::Logout => {
            let session = Session::open(&config);
            session
                .auth
                .sign_out()
                .unwrap_or_else(|e| fail("Failed to sign out", e));
            println!("Signed out.");
        }
        Command::Config { save } => {
            println!("backend_url: {}", config.backend_url);
            println!("page_size:   {}", config.page_size);
            println!("session_dir: {}", config.session_dir.display());
            if save {
                let Some(path) = Config::config_path() else {
                    fail("Failed to save config", "no home directory");
                };
                config
                    .save_to_config_yaml(&path)
                    .unwrap_or_else(|e| fail("Failed to save config", e));
                println!("Saved to {}", path.display());
            }
        }
        Command::EndSession => {
            FileSessionStorage::open(&config.session_dir)
                .and_then(FileSessionStorage::end_session)
                .unwrap_or_else(|e| fail("Failed to end session", e));
            println!("Session ended.");
        }
    }
}
