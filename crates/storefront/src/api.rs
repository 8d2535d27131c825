//! Backend endpoint table.
//!
//! All URLs are absolute and derived from the single configured base URL.
//! Path parameters are percent-encoded before interpolation.

use url::Url;

/// Absolute URLs of every backend endpoint the storefront uses.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    base: String,
}

impl ApiUrls {
    /// Build the endpoint table for a backend base URL.
    #[must_use]
    pub fn new(base: &Url) -> Self {
        Self {
            base: base.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn path(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn with_id(&self, prefix: &str, id: &str) -> String {
        format!("{}{prefix}{}", self.base, urlencoding::encode(id))
    }

    // Auth

    #[must_use]
    pub fn login(&self) -> String {
        self.path("/api/auth/login")
    }

    #[must_use]
    pub fn register(&self) -> String {
        self.path("/api/auth/register")
    }

    // Users

    /// Profile of the user owning the bearer token.
    #[must_use]
    pub fn current_user(&self) -> String {
        self.path("/api/users/me")
    }

    #[must_use]
    pub fn update_user(&self, id: &str) -> String {
        self.with_id("/api/users/update/", id)
    }

    #[must_use]
    pub fn update_avatar(&self) -> String {
        self.path("/api/users/update/avatar")
    }

    // Products

    #[must_use]
    pub fn all_products(&self) -> String {
        self.path("/api/products/all")
    }

    /// Products owned by the user owning the bearer token.
    #[must_use]
    pub fn my_products(&self) -> String {
        self.path("/api/products/myproducts")
    }

    #[must_use]
    pub fn product(&self, id: &str) -> String {
        self.with_id("/api/products/", id)
    }

    #[must_use]
    pub fn create_product(&self) -> String {
        self.path("/api/products/create")
    }

    #[must_use]
    pub fn update_product(&self, id: &str) -> String {
        self.with_id("/api/products/update/", id)
    }

    #[must_use]
    pub fn delete_product(&self, id: &str) -> String {
        self.with_id("/api/products/delete/", id)
    }

    // Media

    /// Attach one image to a product.
    #[must_use]
    pub fn add_media(&self, product_id: &str) -> String {
        self.with_id("/api/media/add/", product_id)
    }

    #[must_use]
    pub fn delete_media(&self, media_id: &str) -> String {
        self.with_id("/api/media/delete/", media_id)
    }

    // Admin

    #[must_use]
    pub fn all_users(&self) -> String {
        self.path("/api/admin/users/all")
    }

    #[must_use]
    pub fn delete_user(&self, id: &str) -> String {
        self.with_id("/api/admin/users/del/", id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn urls(base: &str) -> ApiUrls {
        ApiUrls::new(&Url::parse(base).unwrap())
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let api = urls("https://localhost:8443/");
        assert_eq!(api.login(), "https://localhost:8443/api/auth/login");
        assert_eq!(api.base(), "https://localhost:8443");
    }

    #[test]
    fn test_id_endpoints() {
        let api = urls("http://127.0.0.1:8090");
        assert_eq!(
            api.update_product("p1"),
            "http://127.0.0.1:8090/api/products/update/p1"
        );
        assert_eq!(
            api.delete_media("m9"),
            "http://127.0.0.1:8090/api/media/delete/m9"
        );
        assert_eq!(
            api.delete_user("u2"),
            "http://127.0.0.1:8090/api/admin/users/del/u2"
        );
    }

    #[test]
    fn test_path_params_are_encoded() {
        let api = urls("http://localhost:8090");
        assert_eq!(
            api.product("a/b c"),
            "http://localhost:8090/api/products/a%2Fb%20c"
        );
    }
}
