//! Product and product image records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MediaId, Price, ProductId, timestamp};

/// A product listed by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock.
    #[serde(default)]
    pub quantity: u32,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Images attached to the product, managed through the media endpoints.
    #[serde(default)]
    pub image_urls: Vec<ProductImage>,
    /// Display name of the seller.
    #[serde(default)]
    pub seller_name: String,
    /// Seller avatar path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_avatar: Option<String>,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Category label used for grouping; products without one fall into `Other`.
    #[must_use]
    pub fn category_or_other(&self) -> &str {
        self.category.as_deref().unwrap_or(Self::OTHER_CATEGORY)
    }

    /// Label for products without a category.
    pub const OTHER_CATEGORY: &'static str = "Other";
}

/// An image owned by a product.
///
/// Added and removed independently of the product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Media ID used by the delete endpoint.
    pub id: MediaId,
    /// Server path of the stored image.
    pub image_path: String,
    /// Owning product.
    pub product_id: ProductId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing_entry() {
        let json = r#"{
            "id": "p1",
            "name": "Lampe LED",
            "description": "Minimal desk lamp",
            "price": 159.0,
            "quantity": 8,
            "imageUrls": [{"id": "m1", "imagePath": "/media/m1.png", "productId": "p1"}],
            "sellerName": "Deco Moderne",
            "createdAt": "2024-01-05T09:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.image_urls.len(), 1);
        assert_eq!(product.image_urls[0].id.as_str(), "m1");
        assert_eq!(product.category_or_other(), "Other");
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_missing_images_default_to_empty() {
        let json = r#"{"id":"p2","name":"Mug","price":4.5,"sellerName":"Shop"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.image_urls.is_empty());
        assert_eq!(product.quantity, 0);
        assert_eq!(product.description, "");
    }
}
