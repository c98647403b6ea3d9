//! Kacamata CLI - Inspect and edit storefront client state.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals
//! kc cart list
//!
//! # Add a product to the cart
//! kc cart add --id frame-01 --name "Aviator" --name-id "Aviator Emas" --price 450000
//!
//! # Pick size and color for a cart line
//! kc cart update frame-01 --size M --color Gold
//!
//! # Resolve a translation value
//! kc translate '{"en":"Sunglasses","id":"Kacamata Hitam"}' --locale id
//! ```
//!
//! # Commands
//!
//! - `cart` - List, add, remove, and update cart lines
//! - `wishlist` - List, add, and remove saved products
//! - `compare` - List, add, remove, and clear compared products
//! - `translate` - Resolve a translation value for a locale
//!
//! Storage is selected through the same environment variables the
//! storefront reads (`STOREFRONT_STORAGE`, `STOREFRONT_STATE_DIR`, ...).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use kacamata_core::Locale;
use kacamata_storefront::{ClientState, StorefrontConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::ProductArgs;

#[derive(Parser)]
#[command(name = "kc")]
#[command(author, version, about = "Kacamata storefront state tools")]
struct Cli {
    /// Locale for displayed names (`en`, `id`)
    #[arg(short, long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: SavedCommand,
    },
    /// Manage the compare list
    Compare {
        #[command(subcommand)]
        action: CompareCommand,
    },
    /// Resolve a translation value (plain text or JSON)
    Translate {
        /// Plain text, a JSON string, or `{"en": ..., "id": ...}`
        value: String,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Print cart lines as JSON
    List,
    /// Add a new cart line
    Add(ProductArgs),
    /// Remove every line for a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Update quantity and selections for a product
    Update {
        /// Product ID
        id: String,

        /// Quantity (values below 1 become 1)
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Selected size
        #[arg(short, long)]
        size: Option<String>,

        /// Selected color
        #[arg(short, long)]
        color: Option<String>,
    },
}

#[derive(Subcommand)]
enum SavedCommand {
    /// Print saved products as JSON
    List,
    /// Save a product
    Add(ProductArgs),
    /// Remove a saved product
    Remove {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CompareCommand {
    /// Print compared products as JSON
    List,
    /// Add a product to the comparison
    Add(ProductArgs),
    /// Remove a product from the comparison
    Remove {
        /// Product ID
        id: String,
    },
    /// Remove every product from the comparison
    Clear,
}

// Stores spawn their persisters on this runtime.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let result = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kacamata_cli=info,kacamata_storefront=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let locale = cli
        .locale
        .as_deref()
        .map_or(config.locale, Locale::parse_or_default);

    if let Commands::Translate { value } = &cli.command {
        commands::translate::run(value, locale)?;
        return Ok(());
    }

    let mut state = ClientState::open(&config)?;
    tracing::debug!(storage = ?config.storage, dir = %config.state_dir.display(), "Opened storage");

    match cli.command {
        Commands::Cart { action } => {
            state.cart.hydrate();
            match action {
                CartCommand::List => commands::cart::list(&state.cart, locale)?,
                CartCommand::Add(product) => commands::cart::add(&state.cart, product)?,
                CartCommand::Remove { id } => commands::cart::remove(&state.cart, &id)?,
                CartCommand::Update {
                    id,
                    quantity,
                    size,
                    color,
                } => commands::cart::update(&state.cart, &id, quantity, size, color)?,
            }
        }
        Commands::Wishlist { action } => {
            state.wishlist.hydrate();
            match action {
                SavedCommand::List => commands::wishlist::list(&state.wishlist, locale)?,
                SavedCommand::Add(product) => commands::wishlist::add(&state.wishlist, product)?,
                SavedCommand::Remove { id } => commands::wishlist::remove(&state.wishlist, &id)?,
            }
        }
        Commands::Compare { action } => {
            state.compare.hydrate();
            match action {
                CompareCommand::List => commands::compare::list(&state.compare, locale)?,
                CompareCommand::Add(product) => commands::compare::add(&state.compare, product)?,
                CompareCommand::Remove { id } => commands::compare::remove(&state.compare, &id)?,
                CompareCommand::Clear => commands::compare::clear(&state.compare),
            }
        }
        Commands::Translate { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_update() {
        let cli = Cli::try_parse_from(["kc", "cart", "update", "frame-01", "-q", "2", "-s", "M"])
            .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Cart {
            action:
                CartCommand::Update {
                    id,
                    quantity,
                    size,
                    color,
                },
        } = cli.command
        else {
            panic!("expected cart update");
        };
        assert_eq!(id, "frame-01");
        assert_eq!(quantity, Some(2));
        assert_eq!(size.as_deref(), Some("M"));
        assert_eq!(color, None);
    }

    #[test]
    fn test_parse_global_locale() {
        let cli = Cli::try_parse_from(["kc", "translate", "Halo", "--locale", "id"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.locale.as_deref(), Some("id"));
    }
}
