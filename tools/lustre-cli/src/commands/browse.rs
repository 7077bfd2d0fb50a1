//! List products from the catalog.

use anyhow::Result;
use lustre_commerce::catalog::map_products;
use lustre_commerce::search::ProductQuery;
use lustre_storefront::ProductFeed;

use super::{load_feed, load_more, render_listing, BrowseArgs};
use crate::context::Context;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let mut query =
        ProductQuery::new().with_limit(args.limit.unwrap_or(ctx.config.api.page_size));
    if let Some(category) = &args.category {
        query = query.with_category(category.clone());
    }
    if let Some(product_type) = args.product_type {
        query = query.with_product_type(product_type);
    }

    let title = match args.product_type {
        Some(product_type) => product_type.display_name().to_string(),
        None => "All Products".to_string(),
    };
    ctx.output.header(&title);

    let mut feed = ProductFeed::new(ctx.source()?);
    load_feed(&mut feed, query, ctx).await?;
    for _ in 1..args.pages.max(1) {
        if !load_more(&mut feed, ctx).await? {
            break;
        }
    }

    let Some(page) = feed.state().page() else {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!([]));
        } else {
            ctx.output.info("No products found.");
        }
        return Ok(());
    };

    if page.skipped > 0 {
        ctx.output
            .warn(&format!("{} malformed product(s) were skipped", page.skipped));
    }

    render_listing(map_products(&page.products), args.sort, args.all, ctx);

    if page.pagination.has_next_page {
        ctx.output.info(&format!(
            "Loaded {} of {} products. Use --pages to load more.",
            page.len(),
            page.pagination.total
        ));
    }

    Ok(())
}
