//! Product listings, seller CRUD and product images.

use buy01_core::{MediaId, Price, Product, ProductId};
use reqwest::Method;
use reqwest::multipart::Form;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::batch::{BatchKind, BatchReport};
use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::services::auth::json_part;
use crate::upload::Upload;

pub const PRODUCT_CREATED: &str = "Product created successfully!";
pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
pub const PRODUCT_DELETED: &str = "Product deleted successfully!";

/// Fields of a product to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Changed product fields; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
    }
}

impl StorefrontClient {
    /// Every product, in backend order. No token needed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.request(Method::GET, &self.api().all_products());
        let products: Vec<Product> = self.send_json(request).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Products owned by the signed-in seller.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self))]
    pub async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.authed(Method::GET, &self.api().my_products())?;
        let products: Vec<Product> = self.send_json(request).await?;
        debug!(count = products.len(), "Fetched own products");
        Ok(products)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let request = self.authed(Method::GET, &self.api().product(id.as_str()))?;
        self.send_json(request).await
    }

    /// Create a product with its initial images in one multipart request.
    ///
    /// Returns the created product when the response body can be read as one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self, product, images), fields(name = %product.name, images = images.len()))]
    pub async fn create_product(
        &self,
        product: &NewProduct,
        images: Vec<Upload>,
    ) -> Result<Option<Product>, ApiError> {
        let data = serde_json::to_string(product).map_err(|e| ApiError::Client(e.to_string()))?;
        let mut form = Form::new().part("data", json_part(data)?);
        for image in images {
            form = form.part("files", image.into_part()?);
        }

        let request = self
            .authed(Method::POST, &self.api().create_product())?
            .multipart(form);
        let body: serde_json::Value = self.send_json(request).await?;

        info!("Product created");
        self.notifier().success(PRODUCT_CREATED);
        Ok(serde_json::from_value(body).ok())
    }

    /// Update product fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(&self, id: &ProductId, update: &ProductUpdate) -> Result<(), ApiError> {
        let request = self
            .authed(Method::PUT, &self.api().update_product(id.as_str()))?
            .json(update);
        self.send_empty(request).await?;

        info!("Product updated");
        self.notifier().success(PRODUCT_UPDATED);
        Ok(())
    }

    /// Delete a product. Any 2xx answer counts as success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let request = self.authed(Method::DELETE, &self.api().delete_product(id.as_str()))?;
        self.send_empty(request).await?;

        info!("Product deleted");
        self.notifier().success(PRODUCT_DELETED);
        Ok(())
    }

    /// Upload images to a product, one request per file.
    ///
    /// Requests run sequentially with the configured delay between them and
    /// continue past failures.
    #[instrument(skip(self, images), fields(product_id = %product_id, images = images.len()))]
    pub async fn add_images(&self, product_id: &ProductId, images: Vec<Upload>) -> BatchReport {
        let url = self.api().add_media(product_id.as_str());
        let mut report = BatchReport::new(BatchKind::Upload);
        let count = images.len();

        for (index, image) in images.into_iter().enumerate() {
            let file_name = image.file_name.clone();
            match self.upload_image(&url, image).await {
                Ok(()) => {
                    debug!(file = %file_name, "Image uploaded");
                    report.record_success();
                }
                Err(e) => {
                    warn!(file = %file_name, error = %e, "Image upload failed");
                    report.record_failure(e.user_message());
                }
            }

            if index + 1 < count {
                self.pause_between_requests().await;
            }
        }

        report
    }

    async fn upload_image(&self, url: &str, image: Upload) -> Result<(), ApiError> {
        let form = Form::new().part("file", image.into_part()?);
        let request = self.authed(Method::POST, url)?.multipart(form);
        self.send_empty(request).await
    }

    /// Delete images by media id, one request per image.
    ///
    /// Requests run sequentially with the configured delay between them and
    /// continue past failures.
    #[instrument(skip(self, media_ids), fields(images = media_ids.len()))]
    pub async fn delete_images(&self, media_ids: &[MediaId]) -> BatchReport {
        let mut report = BatchReport::new(BatchKind::Delete);

        for (index, media_id) in media_ids.iter().enumerate() {
            let result = match self.authed(Method::DELETE, &self.api().delete_media(media_id.as_str())) {
                Ok(request) => self.send_empty(request).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    debug!(media_id = %media_id, "Image deleted");
                    report.record_success();
                }
                Err(e) => {
                    warn!(media_id = %media_id, error = %e, "Image delete failed");
                    report.record_failure(format!("{media_id}: {}", e.user_message()));
                }
            }

            if index + 1 < media_ids.len() {
                self.pause_between_requests().await;
            }
        }

        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_serializes_price_as_number() {
        let product = NewProduct {
            name: "Lampe".to_string(),
            description: "LED".to_string(),
            price: "19.99".parse().unwrap(),
            quantity: 3,
            category: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json["price"].is_number());
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_product_update_sends_only_changes() {
        let update = ProductUpdate {
            quantity: Some(0),
            ..ProductUpdate::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"quantity":0}"#);
        assert!(ProductUpdate::default().is_empty());
    }
}
