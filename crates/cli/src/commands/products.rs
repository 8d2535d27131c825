//! Product commands.
//!
//! # Usage
//!
//! ```bash
//! # Everyone's products, newest first
//! buy01 products list
//!
//! # Your own products, cheapest first
//! buy01 products list --mine --sort price
//!
//! buy01 products create --name Lamp --description "LED desk lamp" --price 159 --quantity 8
//! buy01 products edit 65f1c2 --price 149 --add-image side.png --remove-image 65f1d0
//! buy01 products delete 65f1c2
//! ```

use std::path::PathBuf;

use buy01_core::{MediaId, Product, ProductId, reverse_list};
use buy01_storefront::catalog::{self, CatalogQuery, SortField, SortOrder};
use buy01_storefront::{ProductForm, StorefrontClient, Upload};
use chrono::Utc;
use rust_decimal::Decimal;

use super::{CliError, report, require};

const NEW_PRODUCT_ROUTE: &str = "/products/new";
const MY_PRODUCTS_ROUTE: &str = "/products/myproduct";

/// Arguments of `products list`.
pub struct ListArgs {
    pub mine: bool,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortField>,
    pub desc: bool,
}

/// Product fields given on the command line; `None` keeps the current value.
pub struct ProductArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
}

impl ProductArgs {
    fn apply(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(quantity) = self.quantity {
            form.quantity = quantity;
        }
        if let Some(category) = self.category {
            form.category = Some(category);
        }
    }
}

/// List products newest first, optionally filtered and sorted.
pub async fn list(client: &StorefrontClient, args: ListArgs) -> Result<(), CliError> {
    let products = if args.mine {
        require(client, MY_PRODUCTS_ROUTE).await?;
        client.my_products().await?
    } else {
        client.products().await?
    };

    let newest_first = reverse_list(&products);
    let mut query = CatalogQuery {
        search: args.search.unwrap_or_default(),
        ..CatalogQuery::default()
    };
    if let Some(category) = args.category {
        query.category = category;
    }

    let shown: Vec<Product> = match args.sort {
        Some(field) => {
            query.sort_by = field;
            query.order = if args.desc { SortOrder::Desc } else { SortOrder::Asc };
            query.apply(&newest_first)
        }
        None => newest_first
            .into_iter()
            .filter(|p| query.matches(p))
            .collect(),
    };

    let stats = catalog::stats(&products);
    tracing::info!(
        "{} of {} products, {} categories, average price {}",
        shown.len(),
        stats.total_products,
        stats.total_categories,
        stats.average_price
    );
    tracing::info!("Categories: {}", catalog::categories(&products).join(", "));

    let now = Utc::now();
    for product in &shown {
        let badge = catalog::badge(product, now).map_or_else(String::new, |b| format!(" [{b}]"));
        tracing::info!(
            "{}  {}  {}  {}  {}{}",
            product.id,
            product.name,
            product.price,
            product.category_or_other(),
            catalog::stock_status(product.quantity),
            badge
        );
    }
    Ok(())
}

pub async fn show(client: &StorefrontClient, id: &str) -> Result<(), CliError> {
    let product = client.product(&ProductId::new(id)).await?;

    tracing::info!("{} ({})", product.name, product.id);
    tracing::info!("  Price: {}", product.price);
    tracing::info!("  Stock: {}", catalog::stock_status(product.quantity));
    tracing::info!("  Category: {}", product.category_or_other());
    tracing::info!("  Seller: {}", product.seller_name);
    tracing::info!("  {}", product.description);
    for image in &product.image_urls {
        tracing::info!("  Image {}: {}", image.id, image.image_path);
    }
    Ok(())
}

/// Create a product with its images in one request.
pub async fn create(
    client: &StorefrontClient,
    fields: ProductArgs,
    images: &[PathBuf],
) -> Result<(), CliError> {
    require(client, NEW_PRODUCT_ROUTE).await?;

    let mut form = ProductForm::new();
    fields.apply(&mut form);
    for path in images {
        form.add_upload(Upload::from_path(path).await?)?;
    }

    let outcome = form.submit(client).await?;
    report(&outcome);
    Ok(())
}

/// Update fields, upload new images and delete marked ones.
pub async fn edit(
    client: &StorefrontClient,
    id: &str,
    fields: ProductArgs,
    add_images: &[PathBuf],
    remove_images: &[String],
) -> Result<(), CliError> {
    require(client, MY_PRODUCTS_ROUTE).await?;

    let product = client.product(&ProductId::new(id)).await?;
    let mut form = ProductForm::edit(&product);
    fields.apply(&mut form);

    for path in add_images {
        form.add_upload(Upload::from_path(path).await?)?;
    }
    for media_id in remove_images {
        if !form.mark_for_removal(&MediaId::new(media_id.as_str())) {
            return Err(CliError::InvalidArgument(format!(
                "product {id} has no image {media_id}"
            )));
        }
    }

    let outcome = form.submit(client).await?;
    report(&outcome);
    tracing::info!("{} image(s) attached", form.slide_count());
    Ok(())
}

pub async fn delete(client: &StorefrontClient, id: &str) -> Result<(), CliError> {
    require(client, MY_PRODUCTS_ROUTE).await?;
    client.delete_product(&ProductId::new(id)).await?;
    tracing::info!("Product {id} deleted");
    Ok(())
}
