//! FoodShare command line
//!
//! Thin driver over the marketplace core: browse and rank listings, manage the
//! signed-in session, and run the donor/shelter operations. Listings live in
//! the in-memory repository, so changes last for one invocation; the session
//! record persists in the session directory.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodshare_core::common::{Coordinates, DonationId};
use foodshare_core::config::{parse_radius_km, Config};
use foodshare_core::domains::auth::{Registration, Session, UserRole};
use foodshare_core::domains::donations::actions::{
    browse_donations, collect_donation, create_donation, discover_nearby, reserve_donation,
};
use foodshare_core::domains::donations::{
    Dashboard, Donation, DonationFilter, DonationStatus, FoodCategory, NewDonation,
};
use foodshare_core::kernel::{with_cancel, FixedLocationProvider, FoodShareKernel};

#[derive(Parser)]
#[command(name = "foodshare")]
#[command(about = "Share surplus food with shelters nearby")]
struct Cli {
    /// Directory holding the session record (overrides FOODSHARE_SESSION_DIR)
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List donations, optionally filtered
    Browse {
        /// Matches title or location, case-insensitive
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<FoodCategory>,
        #[arg(long)]
        status: Option<DonationStatus>,
    },

    /// Available donations ranked by distance (the map view)
    Nearby {
        #[arg(long)]
        category: Option<FoodCategory>,
        /// Drop listings farther than this (overrides FOODSHARE_NEARBY_RADIUS_KM)
        #[arg(long, value_parser = parse_radius_flag, allow_hyphen_values = true)]
        radius_km: Option<f64>,
        /// Your latitude; without it the configured fallback center is used
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Show one donation
    Show {
        #[arg(value_parser = parse_donation_id)]
        id: DonationId,
    },

    /// Reserve an available donation for the signed-in member
    Reserve {
        #[arg(value_parser = parse_donation_id)]
        id: DonationId,
    },

    /// Confirm pickup of a reserved donation
    Collect {
        #[arg(value_parser = parse_donation_id)]
        id: DonationId,
    },

    /// Publish a new donation
    Donate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: FoodCategory,
        /// e.g. "5kg" or "20 units"
        #[arg(long)]
        quantity: String,
        /// Expiry date, YYYY-MM-DD
        #[arg(long)]
        expires: NaiveDate,
        /// Pickup address
        #[arg(long)]
        location: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        description: Option<String>,
    },

    /// Your listings or reservations
    Dashboard,

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "donor")]
        role: UserRole,
    },

    /// Sign out
    Logout,

    /// Show the signed-in member
    Whoami,
}

/// Accepts a full UUID or the short numeric ids of the seed listings.
fn parse_donation_id(raw: &str) -> std::result::Result<DonationId, String> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u128>() {
        return Ok(DonationId::from_u128(n));
    }
    DonationId::parse(raw).map_err(|e| format!("invalid donation id {:?}: {}", raw, e))
}

fn parse_radius_flag(raw: &str) -> std::result::Result<f64, String> {
    parse_radius_km(raw).map_err(|e| format!("{:#}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,foodshare_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.session_dir.clone() {
        config.session_dir = Some(dir);
    }

    let kernel = FoodShareKernel::from_config(&config);
    let mut session =
        Session::restore(kernel.session_store.clone()).context("Failed to restore session")?;

    // Ctrl-C abandons whatever call is in flight
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let out = Output { json: cli.json };

    match cli.command {
        Commands::Browse {
            search,
            category,
            status,
        } => {
            let filter = DonationFilter {
                search,
                category,
                status,
            };
            let found = browse_donations(&filter, &kernel, &cancel).await?;
            out.donations(&found)
        }

        Commands::Nearby {
            category,
            radius_km,
            lat,
            lng,
        } => {
            let mut kernel = kernel;
            if let (Some(lat), Some(lng)) = (lat, lng) {
                let here = Coordinates::new(lat, lng)?;
                kernel.location = Arc::new(FixedLocationProvider::new(here));
            }
            let radius_km = radius_km.or(config.nearby_radius_km);

            let view = discover_nearby(category, radius_km, &kernel, &cancel).await?;
            if out.json {
                return out.print_json(&view);
            }
            if view.reference.is_fallback() {
                println!(
                    "Location unknown, distances from ({:.4}, {:.4})",
                    view.reference.coordinates.latitude(),
                    view.reference.coordinates.longitude()
                );
            }
            for ranked in &view.listings {
                println!("{:>7.2} km  {}", ranked.distance_km, summary_line(&ranked.item));
            }
            Ok(())
        }

        Commands::Show { id } => {
            let donation = with_cancel(&cancel, kernel.donations.get(id)).await?;
            out.donation(&donation)
        }

        Commands::Reserve { id } => {
            let donation = reserve_donation(id, &session, &kernel, &cancel).await?;
            out.donation(&donation)
        }

        Commands::Collect { id } => {
            let donation = collect_donation(id, &session, &kernel, &cancel).await?;
            out.donation(&donation)
        }

        Commands::Donate {
            title,
            category,
            quantity,
            expires,
            location,
            lat,
            lng,
            description,
        } => {
            let new = NewDonation::builder()
                .title(title)
                .category(category)
                .quantity(quantity)
                .expiry_date(expires)
                .location(location)
                .coordinates(Coordinates::new(lat, lng)?)
                .build();
            let new = NewDonation {
                description,
                ..new
            };

            let donation = create_donation(new, &session, &kernel, &cancel).await?;
            out.donation(&donation)
        }

        Commands::Dashboard => {
            let user = session.require_user()?;
            let all = with_cancel(&cancel, kernel.donations.list()).await?;
            let dashboard = Dashboard::for_user(user, &all);
            let summary = dashboard.summary();

            if out.json {
                return out.print_json(&serde_json::json!({
                    "summary": summary,
                    "active": dashboard.active(),
                    "history": dashboard.history(),
                }));
            }

            println!("Hello, {}!", user.first_name());
            println!(
                "{} listings, {} active, {} completed",
                summary.total, summary.active, summary.completed
            );
            println!("\nActive:");
            for donation in dashboard.active() {
                println!("  {}", summary_line(donation));
            }
            println!("\nHistory:");
            for donation in dashboard.history() {
                println!("  {}", summary_line(donation));
            }
            Ok(())
        }

        Commands::Login { email, password } => {
            let user = with_cancel(&cancel, session.login(kernel.auth.as_ref(), &email, &password))
                .await?;
            println!("Signed in as {} ({})", user.name, user.role);
            Ok(())
        }

        Commands::Register {
            name,
            email,
            password,
            role,
        } => {
            let registration = Registration::new(name, email, password, role);
            let user =
                with_cancel(&cancel, session.register(kernel.auth.as_ref(), registration)).await?;
            println!("Welcome, {}! Signed in as {}", user.first_name(), user.role);
            Ok(())
        }

        Commands::Logout => {
            session.logout()?;
            println!("Signed out");
            Ok(())
        }

        Commands::Whoami => match session.user() {
            Some(user) if out.json => out.print_json(user),
            Some(user) => {
                println!("{} <{}> ({})", user.name, user.email, user.role);
                if let Some(phone) = &user.phone {
                    println!("  phone: {}", phone);
                }
                if let Some(bio) = &user.bio {
                    println!("  about: {}", bio);
                }
                Ok(())
            }
            None => {
                println!("Not signed in");
                Ok(())
            }
        },
    }
}

// ============================================================================
// Output
// ============================================================================

struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn donations(&self, donations: &[Donation]) -> Result<()> {
        if self.json {
            return self.print_json(donations);
        }
        if donations.is_empty() {
            println!("No donations found");
        }
        for donation in donations {
            println!("{}", summary_line(donation));
        }
        Ok(())
    }

    fn donation(&self, donation: &Donation) -> Result<()> {
        if self.json {
            return self.print_json(donation);
        }

        println!("{}", donation.title);
        println!("  id:        {}", donation.id);
        println!("  category:  {}", donation.category.label());
        println!("  quantity:  {}", donation.quantity);
        println!("  expires:   {}", donation.expiry_date);
        println!("  pickup:    {}", donation.location);
        let area = donation.coordinates.coarsened();
        println!("  area:      {:.2}, {:.2}", area.latitude(), area.longitude());
        println!("  donor:     {}", donation.donor_name);
        println!("  status:    {}", donation.status);
        if let Some(reserved_by) = &donation.reserved_by {
            println!("  reserved:  {}", reserved_by);
        }
        if let Some(description) = &donation.description {
            println!("  notes:     {}", description);
        }
        Ok(())
    }
}

fn summary_line(donation: &Donation) -> String {
    let expired = if donation.is_expired(Utc::now().date_naive()) {
        " (expired)"
    } else {
        ""
    };
    format!(
        "[{}] {} - {} ({}) at {}{}",
        donation.status,
        donation.title,
        donation.quantity,
        donation.category.label(),
        donation.location,
        expired
    )
}
