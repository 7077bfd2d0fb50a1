//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use lustre_commerce::cart::{Cart, CartItem, WishlistItem};
use lustre_commerce::catalog::ProductView;
use lustre_commerce::Money;
use lustre_storefront::FetchFailure;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print the error panel for a failed fetch.
    pub fn fetch_failure(&self, failure: &FetchFailure) {
        self.error(failure.headline());
        self.debug(failure.detail());
    }

    /// Print one product card line.
    pub fn product_line(&self, index: usize, product: &ProductView) {
        if self.json {
            return;
        }
        let mut price = style(price_tag(product.price)).bold().to_string();
        if let Some(original) = product.original_price.filter(|o| *o > product.price) {
            price = format!("{} {}", price, style(price_tag(original)).dim().strikethrough());
        }
        let badges = product.badges();
        let badges = if badges.is_empty() {
            String::new()
        } else {
            format!("  {}", style(badges.join(" · ")).magenta())
        };
        let stock = if product.in_stock {
            String::new()
        } else {
            format!("  {}", style("out of stock").red())
        };

        println!(
            "  {:>3}. {} {}  {}  {} {:.1} ({}){}{}",
            index,
            style(&product.brand).dim(),
            product.name,
            price,
            style("★").yellow(),
            product.rating,
            product.review_count,
            badges,
            stock,
        );
        self.debug(&format!("id: {}", product.id));
    }

    /// Print the cart as a table with a subtotal line.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(cart);
            return;
        }
        if cart.is_empty() {
            self.info("Your bag is empty.");
            return;
        }
        for item in &cart.items {
            self.cart_line(item);
        }
        match cart.subtotal() {
            Ok(subtotal) => self.kv("Subtotal", &subtotal.to_string()),
            Err(e) => self.warn(&format!("Could not compute subtotal: {}", e)),
        }
        self.kv("Items", &cart.item_count().to_string());
    }

    fn cart_line(&self, item: &CartItem) {
        let total = item
            .line_total()
            .map(|m| m.to_string())
            .unwrap_or_else(|_| "-".to_string());
        println!(
            "  {:<32} {:>3} × {:>9}  {:>10}",
            format!("{} {}", item.brand, item.name),
            item.quantity,
            price_tag(item.price),
            style(total).bold(),
        );
        self.debug(&format!("id: {}", item.id));
    }

    pub fn wishlist_line(&self, item: &WishlistItem) {
        if self.json {
            return;
        }
        println!(
            "  {} {} {}  {}",
            style("♥").red(),
            style(&item.brand).dim(),
            item.name,
            price_tag(item.price),
        );
        self.debug(&format!("id: {}", item.id));
    }

    /// Create a spinner for the loading state.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether prompts can be shown.
    pub fn is_interactive(&self) -> bool {
        !self.json && self.term.is_term()
    }
}

/// Format a decimal API price, e.g. `$24.50`.
pub fn price_tag(price: f64) -> String {
    Money::from_decimal(price).to_string()
}
