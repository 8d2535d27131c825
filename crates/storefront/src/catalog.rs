//! Product browsing: filtering, sorting and listing helpers.

use std::cmp::Ordering;

use buy01_core::Product;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Category value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Field a listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    Price,
    /// Creation time, newest first in ascending order.
    Date,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown sort field '{other}' (expected name, price or date)")),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Price => write!(f, "price"),
            Self::Date => write!(f, "date"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search, category filter and sort applied to a product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: String,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_by: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl CatalogQuery {
    /// Back to no search, every category, name ascending.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sorting again by the same field flips the order; a new field starts
    /// ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.order = self.order.flipped();
        } else {
            self.sort_by = field;
            self.order = SortOrder::Asc;
        }
    }

    /// Whether `product` passes the category filter and the search.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category == ALL_CATEGORIES
            || product.category_or_other() == self.category;
        if !category_ok {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(product.name.as_str()),
            Some(product.description.as_str()),
            product.category.as_deref(),
            Some(product.seller_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filtered and sorted copy of `products`. Equal elements keep their
    /// relative order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut filtered: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| {
            let ordering = compare(self.sort_by, a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        filtered
    }
}

fn compare(field: SortField, a: &Product, b: &Product) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Date => created(b).cmp(&created(a)),
    }
}

fn created(product: &Product) -> DateTime<Utc> {
    product.created_at.unwrap_or(DateTime::UNIX_EPOCH)
}

/// `all` followed by each distinct category in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        let category = product.category_or_other();
        if !categories.iter().skip(1).any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

/// Headline numbers for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_categories: usize,
    /// Mean price rounded half away from zero to a whole amount; zero for an
    /// empty listing.
    pub average_price: Decimal,
}

#[must_use]
pub fn stats(products: &[Product]) -> CatalogStats {
    let total: Decimal = products.iter().map(|p| p.price.amount()).sum();
    let average_price = if products.is_empty() {
        Decimal::ZERO
    } else {
        (total / Decimal::from(products.len()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    };

    CatalogStats {
        total_products: products.len(),
        total_categories: categories(products).len() - 1,
        average_price,
    }
}

/// Highlight label for a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    New,
    LimitedStock,
    Promo,
    Premium,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::LimitedStock => write!(f, "Limited stock"),
            Self::Promo => write!(f, "Promo"),
            Self::Premium => write!(f, "Premium"),
        }
    }
}

/// First applicable badge: created within a week, 1-5 left, under 200,
/// over 300.
#[must_use]
pub fn badge(product: &Product, now: DateTime<Utc>) -> Option<Badge> {
    let age_days = (now - created(product)).num_days();
    let price = product.price.amount();

    if age_days <= 7 {
        Some(Badge::New)
    } else if (1..=5).contains(&product.quantity) {
        Some(Badge::LimitedStock)
    } else if price < Decimal::from(200) {
        Some(Badge::Promo)
    } else if price > Decimal::from(300) {
        Some(Badge::Premium)
    } else {
        None
    }
}

/// Stock line for a quantity.
#[must_use]
pub fn stock_status(quantity: u32) -> String {
    match quantity {
        0 => "Out of stock".to_string(),
        1..=5 => format!("Only {quantity} left"),
        _ => "In stock".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use buy01_core::ProductId;
    use chrono::TimeZone;

    fn product(id: &str, name: &str, price: &str, category: Option<&str>, day: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: price.parse().unwrap(),
            quantity: 10,
            category: category.map(str::to_string),
            image_urls: Vec::new(),
            seller_name: "TechStore Pro".to_string(),
            seller_avatar: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    fn listing() -> Vec<Product> {
        vec![
            product("1", "Smartphone", "999", Some("Electronics"), 15),
            product("2", "veste", "249", Some("Fashion"), 10),
            product("3", "Lampe", "159", None, 5),
            product("4", "Casque", "299", Some("Electronics"), 8),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_by_name_case_insensitive() {
        let sorted = CatalogQuery::default().apply(&listing());
        assert_eq!(ids(&sorted), vec!["4", "3", "1", "2"]);
    }

    #[test]
    fn test_category_filter() {
        let query = CatalogQuery {
            category: "Electronics".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&listing())), vec!["4", "1"]);

        let other = CatalogQuery {
            category: Product::OTHER_CATEGORY.to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&other.apply(&listing())), vec!["3"]);
    }

    #[test]
    fn test_search_covers_every_text_field() {
        let mut query = CatalogQuery {
            search: "  FASHION ".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&listing())), vec!["2"]);

        query.search = "techstore".to_string();
        assert_eq!(query.apply(&listing()).len(), 4);

        query.search = "lampe desc".to_string();
        assert_eq!(ids(&query.apply(&listing())), vec!["3"]);
    }

    #[test]
    fn test_price_and_date_sorting() {
        let mut query = CatalogQuery::default();
        query.toggle_sort(SortField::Price);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(ids(&query.apply(&listing())), vec!["3", "2", "4", "1"]);

        query.toggle_sort(SortField::Price);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(ids(&query.apply(&listing())), vec!["1", "4", "2", "3"]);

        query.toggle_sort(SortField::Date);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(ids(&query.apply(&listing())), vec!["1", "2", "4", "3"]);

        query.reset();
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            categories(&listing()),
            vec!["all", "Electronics", "Fashion", "Other"]
        );
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_stats() {
        let stats = stats(&listing());
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_categories, 3);
        assert_eq!(stats.average_price, Decimal::from(427));
        assert_eq!(super::stats(&[]).average_price, Decimal::ZERO);
    }

    #[test]
    fn test_badges_and_stock() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let products = listing();
        assert_eq!(badge(&products[0], now), Some(Badge::New));
        assert_eq!(badge(&products[2], now), Some(Badge::Promo));
        assert_eq!(badge(&products[3], now), None);

        let mut scarce = products[1].clone();
        scarce.quantity = 2;
        assert_eq!(badge(&scarce, now), Some(Badge::LimitedStock));

        assert_eq!(stock_status(0), "Out of stock");
        assert_eq!(stock_status(3), "Only 3 left");
        assert_eq!(stock_status(30), "In stock");
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("PRICE".parse::<SortField>().unwrap(), SortField::Price);
        assert!("rating".parse::<SortField>().is_err());
    }
}
