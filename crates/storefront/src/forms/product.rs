use buy01_core::{MediaId, Price, Product, ProductId, ProductImage};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::{Carousel, FormError, StepFailures, SubmitOutcome, publish};
use crate::client::StorefrontClient;
use crate::services::products::{PRODUCT_CREATED, PRODUCT_UPDATED};
use crate::services::{NewProduct, ProductUpdate};
use crate::upload::Upload;

/// Whether the form creates a product or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Seller product form.
///
/// In edit mode a submission runs up to three independent steps: update
/// the fields, upload new images, delete images marked for removal. Every
/// step runs even when an earlier one failed, and nothing is rolled back.
/// Uploads and removals that failed stay queued for the next submission.
#[derive(Debug, Clone)]
pub struct ProductForm {
    mode: FormMode,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub category: Option<String>,
    existing_images: Vec<ProductImage>,
    marked_for_removal: Vec<MediaId>,
    new_uploads: Vec<Upload>,
    carousel: Carousel,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// Empty form in create mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            quantity: 0,
            category: None,
            existing_images: Vec::new(),
            marked_for_removal: Vec::new(),
            new_uploads: Vec::new(),
            carousel: Carousel::default(),
        }
    }

    /// Form in edit mode, prefilled from `product`.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        let mut form = Self {
            mode: FormMode::Edit(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount(),
            quantity: i64::from(product.quantity),
            category: product.category.clone(),
            existing_images: product.image_urls.clone(),
            ..Self::new()
        };
        form.sync_carousel();
        form
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub const fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Existing images that stay after submission.
    pub fn kept_images(&self) -> impl Iterator<Item = &ProductImage> {
        self.existing_images
            .iter()
            .filter(|image| !self.marked_for_removal.contains(&image.id))
    }

    #[must_use]
    pub fn marked_for_removal(&self) -> &[MediaId] {
        &self.marked_for_removal
    }

    #[must_use]
    pub fn new_uploads(&self) -> &[Upload] {
        &self.new_uploads
    }

    /// Kept images plus new uploads.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.kept_images().count() + self.new_uploads.len()
    }

    /// Queue an image for upload.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Invalid` if the file is not an accepted image.
    pub fn add_upload(&mut self, upload: Upload) -> Result<(), FormError> {
        upload
            .validate_product_image()
            .map_err(|e| FormError::Invalid(vec![e.user_message()]))?;
        self.new_uploads.push(upload);
        self.sync_carousel();
        Ok(())
    }

    /// Drop a queued upload by position.
    pub fn remove_upload(&mut self, index: usize) -> Option<Upload> {
        if index >= self.new_uploads.len() {
            return None;
        }
        let removed = self.new_uploads.remove(index);
        self.sync_carousel();
        Some(removed)
    }

    /// Mark an existing image for deletion on submit.
    ///
    /// Returns `false` if the product has no such image.
    pub fn mark_for_removal(&mut self, media_id: &MediaId) -> bool {
        if !self.existing_images.iter().any(|image| &image.id == media_id) {
            return false;
        }
        if !self.marked_for_removal.contains(media_id) {
            self.marked_for_removal.push(media_id.clone());
            self.sync_carousel();
        }
        true
    }

    pub fn unmark_for_removal(&mut self, media_id: &MediaId) {
        self.marked_for_removal.retain(|id| id != media_id);
        self.sync_carousel();
    }

    fn sync_carousel(&mut self) {
        let count = self.slide_count();
        self.carousel.set_len(count);
    }

    /// Check every field, collecting all problems.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Invalid` listing each problem.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("Name is required.".to_string());
        }
        if self.description.trim().is_empty() {
            problems.push("Description is required.".to_string());
        }
        if self.price < Decimal::ZERO {
            problems.push("Price must be 0 or more.".to_string());
        }
        if self.quantity < 0 {
            problems.push("Quantity must be 0 or more.".to_string());
        } else if u32::try_from(self.quantity).is_err() {
            problems.push("Quantity is too large.".to_string());
        }
        for upload in &self.new_uploads {
            if let Err(e) = upload.validate_product_image() {
                problems.push(e.user_message());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(problems))
        }
    }

    fn fields(&self) -> Result<NewProduct, FormError> {
        self.validate()?;
        let price = Price::new(self.price).map_err(|e| FormError::Invalid(vec![e.to_string()]))?;
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| FormError::Invalid(vec!["Quantity must be 0 or more.".to_string()]))?;
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            quantity,
            category,
        })
    }

    /// Validate and submit, publishing the outcome on the notifier.
    ///
    /// # Errors
    ///
    /// - `FormError::Invalid` if validation fails; nothing is sent
    /// - `FormError::Api` if the create request fails
    /// - `FormError::Partial` if any edit step fails, with each failing
    ///   step's message joined by `"; "`
    #[instrument(skip(self, client), fields(mode = ?self.mode))]
    pub async fn submit(&mut self, client: &StorefrontClient) -> Result<SubmitOutcome, FormError> {
        let result = self.run(client).await;
        publish(client, result)
    }

    async fn run(&mut self, client: &StorefrontClient) -> Result<SubmitOutcome, FormError> {
        let fields = self.fields()?;
        match self.mode.clone() {
            FormMode::Create => self.submit_create(client, &fields).await,
            FormMode::Edit(id) => self.submit_edit(client, &id, fields).await,
        }
    }

    async fn submit_create(
        &mut self,
        client: &StorefrontClient,
        fields: &NewProduct,
    ) -> Result<SubmitOutcome, FormError> {
        client.create_product(fields, self.new_uploads.clone()).await?;
        info!(name = %fields.name, "Product form submitted");
        *self = Self::new();
        Ok(SubmitOutcome {
            message: PRODUCT_CREATED.to_string(),
            redirect_to: Some("/products/myproduct".to_string()),
        })
    }

    async fn submit_edit(
        &mut self,
        client: &StorefrontClient,
        id: &ProductId,
        fields: NewProduct,
    ) -> Result<SubmitOutcome, FormError> {
        let mut failures = StepFailures::default();

        let update = ProductUpdate {
            name: Some(fields.name),
            description: Some(fields.description),
            price: Some(fields.price),
            quantity: Some(fields.quantity),
            category: fields.category,
        };
        if let Err(e) = client.update_product(id, &update).await {
            failures.push(e.user_message());
        }

        // Only failed items stay queued.
        if !self.new_uploads.is_empty() {
            let report = client.add_images(id, self.new_uploads.clone()).await;
            if !report.all_succeeded() {
                failures.push(report.summary());
            }
            let (_, pending) = report.partition(std::mem::take(&mut self.new_uploads));
            self.new_uploads = pending;
        }

        if !self.marked_for_removal.is_empty() {
            let report = client.delete_images(&self.marked_for_removal).await;
            if !report.all_succeeded() {
                failures.push(report.summary());
            }
            let (removed, pending) =
                report.partition(std::mem::take(&mut self.marked_for_removal));
            self.existing_images.retain(|image| !removed.contains(&image.id));
            self.marked_for_removal = pending;
        }

        self.sync_carousel();
        failures.into_result(SubmitOutcome {
            message: PRODUCT_UPDATED.to_string(),
            redirect_to: None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png(name: &str) -> Upload {
        Upload::new(name, "image/png", vec![1, 2, 3])
    }

    fn product_with_images(count: usize) -> Product {
        let images = (0..count)
            .map(|i| ProductImage {
                id: MediaId::new(format!("m{i}")),
                image_path: format!("/media/m{i}.png"),
                product_id: ProductId::new("p1"),
            })
            .collect();
        Product {
            id: ProductId::new("p1"),
            name: "Lampe".to_string(),
            description: "LED desk lamp".to_string(),
            price: "159".parse().unwrap(),
            quantity: 8,
            category: Some("Maison".to_string()),
            image_urls: images,
            seller_name: "Deco".to_string(),
            seller_avatar: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let mut form = ProductForm::new();
        form.price = Decimal::NEGATIVE_ONE;
        form.quantity = -2;

        match form.validate().unwrap_err() {
            FormError::Invalid(problems) => {
                assert_eq!(problems.len(), 4);
                assert!(problems.contains(&"Name is required.".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_price_and_quantity_are_valid() {
        let mut form = ProductForm::new();
        form.name = "Free sample".to_string();
        form.description = "Gift".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_add_upload_rejects_unsupported_files() {
        let mut form = ProductForm::new();
        assert!(form.add_upload(png("a.png")).is_ok());
        assert!(
            form.add_upload(Upload::new("a.gif", "image/gif", vec![1]))
                .is_err()
        );
        assert_eq!(form.new_uploads().len(), 1);
    }

    #[test]
    fn test_edit_prefills_and_tracks_slides() {
        let mut form = ProductForm::edit(&product_with_images(4));
        assert_eq!(form.mode(), &FormMode::Edit(ProductId::new("p1")));
        assert_eq!(form.slide_count(), 4);
        assert!(form.carousel().show_navigation());

        form.carousel_mut().next();
        assert_eq!(form.carousel().current_index(), 1);

        assert!(form.mark_for_removal(&MediaId::new("m3")));
        assert!(!form.mark_for_removal(&MediaId::new("unknown")));
        assert_eq!(form.slide_count(), 3);
        assert_eq!(form.carousel().current_index(), 0);

        form.add_upload(png("new.png")).unwrap();
        assert_eq!(form.slide_count(), 4);

        form.unmark_for_removal(&MediaId::new("m3"));
        assert_eq!(form.kept_images().count(), 4);
        assert!(form.remove_upload(0).is_some());
        assert!(form.remove_upload(5).is_none());
    }

    #[test]
    fn test_marking_twice_is_idempotent() {
        let mut form = ProductForm::edit(&product_with_images(2));
        form.mark_for_removal(&MediaId::new("m0"));
        form.mark_for_removal(&MediaId::new("m0"));
        assert_eq!(form.marked_for_removal().len(), 1);
    }
}
