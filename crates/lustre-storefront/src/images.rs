//! Image URL resolution.

/// Turns a product image identifier into a URL that can be loaded.
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, image: &str) -> String;
}

/// Resolves relative identifiers against a CDN base URL.
#[derive(Debug, Clone)]
pub struct CdnImageResolver {
    base_url: String,
    placeholder: String,
}

impl CdnImageResolver {
    pub fn new(base_url: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

fn is_absolute(image: &str) -> bool {
    ["http://", "https://", "//", "data:"]
        .iter()
        .any(|scheme| image.starts_with(scheme))
}

impl ImageResolver for CdnImageResolver {
    fn resolve(&self, image: &str) -> String {
        let image = image.trim();
        if image.is_empty() {
            return self.placeholder.clone();
        }
        if is_absolute(image) || self.base_url.is_empty() {
            return image.to_string();
        }
        format!("{}/{}", self.base_url, image.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> CdnImageResolver {
        CdnImageResolver::new("https://cdn.lustre.shop/img/", "/static/placeholder.png")
    }

    #[test]
    fn test_absolute_unchanged() {
        let url = "https://images.example.com/a.jpg";
        assert_eq!(resolver().resolve(url), url);
        assert_eq!(resolver().resolve("//cdn.x/b.jpg"), "//cdn.x/b.jpg");
    }

    #[test]
    fn test_relative_joined() {
        assert_eq!(
            resolver().resolve("/products/lip-1.jpg"),
            "https://cdn.lustre.shop/img/products/lip-1.jpg"
        );
        assert_eq!(
            resolver().resolve("lip-1.jpg"),
            "https://cdn.lustre.shop/img/lip-1.jpg"
        );
    }

    #[test]
    fn test_empty_uses_placeholder() {
        assert_eq!(resolver().resolve("  "), "/static/placeholder.png");
    }
}
