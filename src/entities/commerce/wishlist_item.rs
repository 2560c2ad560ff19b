use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// A product variant saved to a wishlist.
///
/// `id` and both timestamps are filled in when the row is saved; callers only
/// ever provide the two references, see [`NewWishlistItem`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub wishlist_id: Uuid,

    pub product_variant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wishlist::Entity",
        from = "Column::WishlistId",
        to = "super::wishlist::Column::Id"
    )]
    Wishlist,

    #[sea_orm(
        belongs_to = "super::product_variant::Entity",
        from = "Column::ProductVariantId",
        to = "super::product_variant::Column::Id"
    )]
    ProductVariant,
}

impl Related<super::wishlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wishlist.def()
    }
}

impl Related<super::product_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariant.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr> {
        let mut active_model = self;
        let now = Utc::now();
        if insert {
            active_model.set_id_if_needed();
            if active_model.created_at.is_not_set() {
                active_model.created_at = Set(now);
            }
        }
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}

impl ActiveModel {
    fn set_id_if_needed(&mut self) {
        if self.id.is_not_set() {
            self.id = Set(Uuid::new_v4());
        }
    }
}

impl Model {
    /// Resolves the owning wishlist by `wishlist_id`.
    pub async fn wishlist<C>(&self, db: &C) -> Result<super::wishlist::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        super::wishlist::Entity::find_by_id(self.wishlist_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Wishlist", self.wishlist_id))
    }

    /// Resolves the referenced product variant by `product_variant_id`.
    pub async fn product_variant<C>(
        &self,
        db: &C,
    ) -> Result<super::product_variant::Model, ServiceError>
    where
        C: ConnectionTrait,
    {
        super::product_variant::Entity::find_by_id(self.product_variant_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product variant", self.product_variant_id))
    }
}

/// Input for creating a wishlist item.
///
/// Only the two references are accepted. Unknown fields in a deserialized
/// payload (an `id`, timestamps, anything else) are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWishlistItem {
    pub wishlist_id: Uuid,
    pub product_variant_id: Uuid,
}

impl NewWishlistItem {
    pub fn new(wishlist_id: Uuid, product_variant_id: Uuid) -> Self {
        Self {
            wishlist_id,
            product_variant_id,
        }
    }
}

impl IntoActiveModel<ActiveModel> for NewWishlistItem {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            wishlist_id: Set(self.wishlist_id),
            product_variant_id: Set(self.product_variant_id),
            ..Default::default()
        }
    }
}

/// Reassignment of one or both references of an existing item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItemChanges {
    #[serde(default)]
    pub wishlist_id: Option<Uuid>,
    #[serde(default)]
    pub product_variant_id: Option<Uuid>,
}

impl WishlistItemChanges {
    pub fn is_empty(&self) -> bool {
        self.wishlist_id.is_none() && self.product_variant_id.is_none()
    }

    /// Copies the provided references onto `active_model`, leaving the rest untouched.
    pub fn apply_to(self, active_model: &mut ActiveModel) {
        if let Some(wishlist_id) = self.wishlist_id {
            active_model.wishlist_id = Set(wishlist_id);
        }
        if let Some(product_variant_id) = self.product_variant_id {
            active_model.product_variant_id = Set(product_variant_id);
        }
    }
}
