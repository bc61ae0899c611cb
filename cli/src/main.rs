use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use catalog::config::{Config, loader};
use catalog::db::Store;
use catalog::migration;
use catalog::product::db::{fetch_product_by_slug, list_products};
use catalog::product::mutations::{CreateProductInput, create_product_raw, preview_slug};
use catalog::validation::slug::validate_slug;

#[derive(Parser)]
#[command(name = "nutri")]
#[command(about = "Nutri catalog CLI - Manage products and their slugs", long_about = None)]
struct Cli {
    /// Config file (defaults to NUTRI_CONFIG_PATH, nutri.ron, .nutri/config.ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign slugs to every product that lacks one
    MigrateSlugs,
    #[command(subcommand)]
    Product(ProductCommands),
    #[command(subcommand)]
    Slug(SlugCommands),
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Add a product
    Add {
        /// Display name
        name: String,
        /// Explicit slug (lowercase, alphanumeric, hyphens only)
        #[arg(short, long)]
        slug: Option<String>,
    },
    /// List all products
    List,
    /// Show the product with the given slug
    Show { slug: String },
}

#[derive(Subcommand)]
enum SlugCommands {
    /// Show the slug a product with this name would receive
    Preview { name: String },
    /// Check that a slug is well-formed
    Check { slug: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_from_file(path)?,
        None => loader::load_with_discovery()?,
    };

    if let Commands::Slug(SlugCommands::Check { slug }) = &cli.command {
        return check_slug(slug);
    }

    let store = Store::open(&config).await?;
    let result = dispatch(&store, &config, cli.command).await;
    store.close().await;
    result
}

async fn dispatch(store: &Store, config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::MigrateSlugs => migrate_slugs(store, config).await,
        Commands::Product(product_cmd) => match product_cmd {
            ProductCommands::Add { name, slug } => add_product(store, config, name, slug).await,
            ProductCommands::List => show_products(store).await,
            ProductCommands::Show { slug } => show_product(store, &slug).await,
        },
        Commands::Slug(slug_cmd) => match slug_cmd {
            SlugCommands::Preview { name } => preview(store, config, &name).await,
            SlugCommands::Check { slug } => check_slug(&slug),
        },
    }
}

async fn migrate_slugs(store: &Store, config: &Config) -> Result<()> {
    let report = migration::run(store, &config.slugs).await?;

    println!("✓ Slug backfill complete");
    println!("  Database: {}", store.root().display());
    println!("  Updated:  {}", report.updated);
    println!("  Skipped:  {}", report.skipped);
    if report.fallbacks > 0 {
        println!("  Timestamp fallbacks: {}", report.fallbacks);
    }
    if report.placeholders > 0 {
        println!("  Placeholder names:   {}", report.placeholders);
    }

    Ok(())
}

async fn add_product(
    store: &Store,
    config: &Config,
    name: String,
    slug: Option<String>,
) -> Result<()> {
    let input = CreateProductInput { name, slug };
    let product = create_product_raw(store.pool(), &config.slugs, input).await?;

    println!("✓ Product created successfully!");
    println!("  ID:   {}", product.id);
    println!("  Name: {}", product.name);
    println!("  Slug: {}", product.slug.unwrap_or_default());

    Ok(())
}

async fn show_products(store: &Store) -> Result<()> {
    let products = list_products(store.pool())
        .await
        .context("failed to list products")?;

    if products.is_empty() {
        println!("No products");
        return Ok(());
    }

    for product in products {
        let slug = product.assigned_slug().unwrap_or("(no slug)");
        println!("{}  {:<40}  {}", product.id, slug, product.name);
    }

    Ok(())
}

async fn show_product(store: &Store, slug: &str) -> Result<()> {
    let product = fetch_product_by_slug(store.pool(), slug)
        .await
        .context("failed to look up product")?
        .with_context(|| format!("no product with slug '{}'", slug))?;

    println!("  ID:   {}", product.id);
    println!("  Name: {}", product.name);
    println!("  Slug: {}", slug);

    Ok(())
}

async fn preview(store: &Store, config: &Config, name: &str) -> Result<()> {
    let resolution = preview_slug(store.pool(), &config.slugs, name).await?;

    println!("{}", resolution.as_str());
    if resolution.is_fallback() {
        println!("  (numbered suffixes exhausted, timestamp suffix used)");
    }

    Ok(())
}

fn check_slug(slug: &str) -> Result<()> {
    validate_slug(slug).map_err(|e| anyhow::anyhow!("Invalid slug: {}", e))?;
    println!("✓ '{}' is a valid slug", slug);
    Ok(())
}
