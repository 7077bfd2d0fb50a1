//! Show product details.

use anyhow::{bail, Result};
use lustre_commerce::catalog::{ProductRecord, ProductShape};
use lustre_commerce::ProductId;
use lustre_storefront::{get_products, FetchFailure, ImageResolver};

use super::ProductArgs;
use crate::context::Context;
use crate::output::price_tag;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let source = ctx.source()?;
    let ids: Vec<ProductId> = args.ids.iter().map(ProductId::new).collect();

    let spinner = ctx.output.spinner(&format!("Fetching {} product(s)...", ids.len()));
    let results = get_products(&*source, &ids).await;
    spinner.finish_and_clear();

    let mut found = Vec::new();
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(record) => found.push(record),
            Err(e) if e.status() == Some(404) => {
                ctx.output.warn(&format!("Product not found: {}", id));
            }
            Err(e) => {
                ctx.output.fetch_failure(&FetchFailure::from(&e));
            }
        }
    }

    if found.is_empty() {
        bail!("No products could be loaded");
    }

    if ctx.output.is_json() {
        ctx.output.json(&found);
        return Ok(());
    }

    for record in &found {
        print_detail(record, ctx);
    }

    Ok(())
}

fn print_detail(record: &ProductRecord, ctx: &Context) {
    let view = record.to_view();
    let images = ctx.images();

    ctx.output.header(&format!("{} {}", view.brand, view.name));
    ctx.output.kv("id", view.id.as_str());

    let mut price = price_tag(view.price);
    if record.is_on_sale() {
        if let Some(original) = view.original_price {
            price = format!("{} (was {})", price, price_tag(original));
        }
        if let Some(percent) = record.discount_percentage() {
            price = format!("{}, {:.0}% off", price, percent);
        }
    }
    ctx.output.kv("price", &price);
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", view.rating, view.review_count),
    );
    ctx.output.kv("type", view.product_type.display_name());
    if !view.category.is_empty() {
        ctx.output.kv("category", &view.category);
    }
    ctx.output
        .kv("availability", if view.in_stock { "In stock" } else { "Out of stock" });

    let attributes = [
        ("skin type", &view.skin_type),
        ("season", &view.season),
        ("hair type", &view.hair_type),
        ("hair concern", &view.hair_concern),
        ("skin tone", &view.skin_tone),
        ("finish", &view.finish),
    ];
    for (label, value) in attributes {
        if let Some(value) = value {
            ctx.output.kv(label, value);
        }
    }

    let badges = view.badges();
    if !badges.is_empty() {
        ctx.output.kv("badges", &badges.join(", "));
    }
    ctx.output
        .kv("image", &images.resolve(view.primary_image().unwrap_or_default()));
    if let Some(description) = &view.description {
        ctx.output.info(description);
    }
}
