//! Search the catalog.

use anyhow::{bail, Result};
use lustre_storefront::{SearchPipeline, SearchView};

use super::{confirm_retry, render_listing, render_suggestions, SearchArgs};
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let text = args.query.join(" ");
    let limit = args.limit.unwrap_or(ctx.config.api.page_size);
    let mut pipeline = SearchPipeline::new(ctx.source()?, ctx.config.search.suggestions.clone())
        .with_limit(limit);

    pipeline.submit(&text);
    loop {
        let spinner = ctx.output.spinner(&format!("Searching for \"{}\"...", text.trim()));
        let state = pipeline.settled().await;
        spinner.finish_and_clear();

        match state.view {
            SearchView::Loading => continue,
            SearchView::Prompt { suggestions } => {
                if ctx.output.is_json() {
                    ctx.output.json(&serde_json::json!({
                        "query": state.query,
                        "results": [],
                        "suggestions": suggestions,
                    }));
                } else {
                    ctx.output.info("What are you looking for? Try:");
                    render_suggestions(&suggestions, ctx);
                }
            }
            SearchView::NoResults { suggestions } => {
                if ctx.output.is_json() {
                    ctx.output.json(&serde_json::json!({
                        "query": state.query,
                        "results": [],
                        "suggestions": suggestions,
                    }));
                } else {
                    ctx.output
                        .info(&format!("No results for \"{}\". Try:", state.query));
                    render_suggestions(&suggestions, ctx);
                }
            }
            SearchView::Results(views) => {
                ctx.output.header(&format!(
                    "{} result(s) for \"{}\"",
                    views.len(),
                    state.query
                ));
                render_listing(views, args.sort, args.all, ctx);
            }
            SearchView::Failed(failure) => {
                ctx.output.fetch_failure(&failure);
                if confirm_retry(ctx)? {
                    pipeline.retry();
                    continue;
                }
                bail!("{}", failure);
            }
        }
        return Ok(());
    }
}
