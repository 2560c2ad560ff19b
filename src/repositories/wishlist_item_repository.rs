use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::entities::commerce::wishlist_item::{
    ActiveModel as WishlistItemActiveModel, Column, NewWishlistItem, WishlistItemChanges,
};
use crate::entities::commerce::{
    ProductVariantModel, WishlistItem, WishlistItemModel, WishlistModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for wishlist item operations
#[derive(Debug, Clone)]
pub struct WishlistItemRepository {
    base: BaseRepository,
}

impl WishlistItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new wishlist item. The id and timestamps are assigned on save.
    #[instrument(skip(self))]
    pub async fn create(&self, input: NewWishlistItem) -> Result<WishlistItemModel, ServiceError> {
        let item = input.into_active_model().insert(self.get_db()).await?;

        info!(
            wishlist_item_id = %item.id,
            wishlist_id = %item.wishlist_id,
            product_variant_id = %item.product_variant_id,
            "Created wishlist item"
        );
        Ok(item)
    }

    /// Find a wishlist item by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WishlistItemModel>, ServiceError> {
        Ok(WishlistItem::find_by_id(id).one(self.get_db()).await?)
    }

    /// Like [`find_by_id`](Self::find_by_id), but a missing row is an error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<WishlistItemModel, ServiceError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Wishlist item", id))
    }

    /// All items of a wishlist, in no particular order.
    #[instrument(skip(self))]
    pub async fn find_by_wishlist(
        &self,
        wishlist_id: Uuid,
    ) -> Result<Vec<WishlistItemModel>, ServiceError> {
        let items = WishlistItem::find()
            .filter(Column::WishlistId.eq(wishlist_id))
            .all(self.get_db())
            .await?;

        debug!(count = items.len(), "Loaded wishlist items");
        Ok(items)
    }

    /// Reassign the wishlist and/or product variant of an existing item.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        changes: WishlistItemChanges,
    ) -> Result<WishlistItemModel, ServiceError> {
        let existing = self.get(id).await?;
        if changes.is_empty() {
            return Ok(existing);
        }

        let mut active_model: WishlistItemActiveModel = existing.into();
        changes.apply_to(&mut active_model);

        let item = active_model.update(self.get_db()).await?;

        info!(wishlist_item_id = %item.id, "Updated wishlist item");
        Ok(item)
    }

    /// Delete a wishlist item
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let item = self.get(id).await?;

        item.delete(self.get_db()).await?;

        info!(wishlist_item_id = %id, "Deleted wishlist item");
        Ok(())
    }

    /// The wishlist that owns `item`.
    #[instrument(skip(self, item), fields(wishlist_item_id = %item.id))]
    pub async fn wishlist_of(&self, item: &WishlistItemModel) -> Result<WishlistModel, ServiceError> {
        item.wishlist(self.get_db()).await
    }

    /// The product variant that `item` points at.
    #[instrument(skip(self, item), fields(wishlist_item_id = %item.id))]
    pub async fn product_variant_of(
        &self,
        item: &WishlistItemModel,
    ) -> Result<ProductVariantModel, ServiceError> {
        item.product_variant(self.get_db()).await
    }
}

impl Repository for WishlistItemRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
