//! Wishlist commands.

use anyhow::Result;
use lustre_commerce::cart::{WishlistItem, WishlistStore};
use lustre_commerce::ProductId;

use super::{fetch_product, WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut store = WishlistStore::open(ctx.cache()?);

    match args.command {
        WishlistCommand::List => {
            if ctx.output.is_json() {
                ctx.output.json(store.wishlist());
                return Ok(());
            }
            ctx.output.header("Wishlist");
            if store.wishlist().is_empty() {
                ctx.output.info("Nothing saved yet.");
            }
            for item in &store.wishlist().items {
                ctx.output.wishlist_line(item);
            }
        }
        WishlistCommand::Add { id } => {
            let id = ProductId::new(id);
            if store.contains(&id) {
                ctx.output.info(&format!("{} is already saved", id));
                return Ok(());
            }
            let source = ctx.source()?;
            let record = fetch_product(&*source, &id, ctx).await?;
            store.add_item(WishlistItem::from(&record));
            ctx.output
                .success(&format!("Saved {} to your wishlist", record.name));
        }
        WishlistCommand::Remove { id } => {
            let id = ProductId::new(id);
            if store.remove_item(&id) {
                ctx.output.success(&format!("Removed {} from your wishlist", id));
            } else {
                ctx.output.warn(&format!("{} is not in your wishlist", id));
            }
        }
    }

    Ok(())
}
