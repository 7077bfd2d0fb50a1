//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod config;
pub mod product;
pub mod search;
pub mod wishlist;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use dialoguer::Confirm;
use lustre_commerce::catalog::{ProductRecord, ProductType, ProductView};
use lustre_commerce::listing::{Listing, SortKey};
use lustre_commerce::search::ProductQuery;
use lustre_commerce::ProductId;
use lustre_storefront::{FetchFailure, ProductFeed, ProductSource};

use crate::context::Context;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category slug to filter by.
    #[arg(long)]
    pub category: Option<String>,

    /// Product line (makeup, skincare, perfume, hair).
    #[arg(short = 't', long = "type")]
    pub product_type: Option<ProductType>,

    /// Sort order (featured, price-asc, price-desc, rating, reviews, newest, trending).
    #[arg(short, long, default_value = "featured")]
    pub sort: SortKey,

    /// Show every product instead of the first eight.
    #[arg(short, long)]
    pub all: bool,

    /// Records per page (default: api.page_size).
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Number of server pages to load.
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text. Empty shows suggestions.
    pub query: Vec<String>,

    /// Sort order for results.
    #[arg(short, long, default_value = "featured")]
    pub sort: SortKey,

    /// Show every result instead of the first eight.
    #[arg(short, long)]
    pub all: bool,

    /// Maximum results to request (default: api.page_size).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product IDs.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the bag.
    List,
    /// Add a product to the bag.
    Add {
        /// Product ID.
        id: String,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Remove a product from the bag.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Place the order and empty the bag.
    Checkout {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show saved products.
    List,
    /// Save a product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a saved product.
    Remove {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Product API base URL.
        #[arg(long)]
        base_url: Option<String>,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Ask whether to retry a failed fetch. Never asks when non-interactive.
pub(crate) fn confirm_retry(ctx: &Context) -> Result<bool> {
    if !ctx.output.is_interactive() {
        return Ok(false);
    }
    let retry = Confirm::new()
        .with_prompt("Try again?")
        .default(true)
        .interact()?;
    Ok(retry)
}

/// Load `query` into the feed, offering a manual retry while it fails.
pub(crate) async fn load_feed<S: ProductSource>(
    feed: &mut ProductFeed<S>,
    query: ProductQuery,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    feed.load(query).await;
    spinner.finish_and_clear();
    settle_feed(feed, ctx).await
}

/// Fetch the next server page into the feed. Returns `false` when there is
/// no further page.
pub(crate) async fn load_more<S: ProductSource>(
    feed: &mut ProductFeed<S>,
    ctx: &Context,
) -> Result<bool> {
    let spinner = ctx.output.spinner("Loading more...");
    let fetched = feed.load_more().await;
    spinner.finish_and_clear();
    if fetched {
        settle_feed(feed, ctx).await?;
    }
    Ok(fetched)
}

async fn settle_feed<S: ProductSource>(feed: &mut ProductFeed<S>, ctx: &Context) -> Result<()> {
    while let Some(failure) = feed.state().failure().cloned() {
        ctx.output.fetch_failure(&failure);
        if !confirm_retry(ctx)? {
            bail!("{}", failure);
        }
        let spinner = ctx.output.spinner("Retrying...");
        feed.retry().await;
        spinner.finish_and_clear();
    }
    Ok(())
}

/// Fetch one product, offering a manual retry on network or server errors.
pub(crate) async fn fetch_product<S: ProductSource + ?Sized>(
    source: &S,
    id: &ProductId,
    ctx: &Context,
) -> Result<ProductRecord> {
    loop {
        let spinner = ctx.output.spinner(&format!("Fetching {}...", id));
        let result = source.get_product(id).await;
        spinner.finish_and_clear();

        match result {
            Ok(record) => return Ok(record),
            Err(e) if e.status() == Some(404) => bail!("Product not found: {}", id),
            Err(e) => {
                ctx.output.fetch_failure(&FetchFailure::from(&e));
                if !confirm_retry(ctx)? {
                    return Err(e).with_context(|| format!("Failed to fetch product {}", id));
                }
            }
        }
    }
}

/// Sort, truncate and print a result set.
pub(crate) fn render_listing(views: Vec<ProductView>, sort: SortKey, all: bool, ctx: &Context) {
    let mut listing = Listing::new(views);
    listing.set_sort(sort);
    if all {
        listing.show_all();
    }

    if ctx.output.is_json() {
        ctx.output.json(&listing.visible());
        return;
    }

    ctx.output.debug(&format!("sorted by {}", listing.sort_key()));
    for (i, product) in listing.visible().iter().enumerate() {
        ctx.output.product_line(i + 1, product);
    }
    if listing.has_view_all_control() && !listing.is_showing_all() {
        ctx.output.info(&format!(
            "{} more not shown. Run with --all to view all.",
            listing.hidden_count()
        ));
    }
}

/// Print suggestions as a bulleted list.
pub(crate) fn render_suggestions(suggestions: &[String], ctx: &Context) {
    for suggestion in suggestions {
        ctx.output.list_item(suggestion);
    }
}
