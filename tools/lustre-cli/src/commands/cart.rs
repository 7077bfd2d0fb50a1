//! Shopping bag commands.

use anyhow::{bail, Result};
use chrono::Local;
use dialoguer::Confirm;
use lustre_commerce::cart::{CartItem, CartStore};
use lustre_commerce::ProductId;

use super::{fetch_product, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = CartStore::open(ctx.cache()?);

    match args.command {
        CartCommand::List => {
            ctx.output.header("Your Bag");
            ctx.output.cart(store.cart());
        }
        CartCommand::Add { id, quantity } => {
            let source = ctx.source()?;
            let record = fetch_product(&*source, &ProductId::new(id), ctx).await?;
            if !record.in_stock {
                ctx.output
                    .warn(&format!("{} is currently out of stock", record.name));
            }
            store.add_item(CartItem::from(&record), quantity)?;
            ctx.output
                .success(&format!("Added {} × {} to your bag", quantity, record.name));
            if ctx.output.is_json() {
                ctx.output.json(store.cart());
            }
        }
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if store.remove_item(&id) {
                ctx.output.success(&format!("Removed {} from your bag", id));
            } else {
                ctx.output.warn(&format!("{} is not in your bag", id));
            }
            if ctx.output.is_json() {
                ctx.output.json(store.cart());
            }
        }
        CartCommand::Checkout { yes } => checkout(&mut store, yes, ctx)?,
    }

    Ok(())
}

fn checkout(store: &mut CartStore, yes: bool, ctx: &Context) -> Result<()> {
    if store.cart().is_empty() {
        bail!("Your bag is empty");
    }

    ctx.output.header("Checkout");
    ctx.output.cart(store.cart());

    if !yes && ctx.output.is_interactive() {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Checkout cancelled");
            return Ok(());
        }
    }

    let summary = store.complete_checkout()?;
    let completed_at = Local::now();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "summary": summary,
            "completedAt": completed_at.to_rfc3339(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order placed: {} item(s), {}",
        summary.item_count, summary.subtotal
    ));
    ctx.output
        .kv("placed", &completed_at.format("%Y-%m-%d %H:%M").to_string());

    Ok(())
}
