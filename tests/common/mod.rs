#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Schema,
    Set,
};
use uuid::Uuid;
use wishlist_items::db::{self, DbConfig};
use wishlist_items::entities::commerce::{
    product_variant, wishlist, ProductVariant, ProductVariantModel, Wishlist, WishlistItem,
    WishlistItemModel, WishlistModel,
};
use wishlist_items::{NewWishlistItem, WishlistItemRepository};

/// Helper harness backed by a fresh in-memory SQLite database.
pub struct TestDb {
    pub db: Arc<DatabaseConnection>,
    pub repo: WishlistItemRepository,
}

impl TestDb {
    pub async fn new() -> Self {
        // A single pooled connection keeps every query on the same in-memory database.
        let cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: Duration::from_secs(3600),
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&cfg)
            .await
            .expect("failed to create test database");

        create_table(&pool, Wishlist).await;
        create_table(&pool, ProductVariant).await;
        create_table(&pool, WishlistItem).await;

        let db = Arc::new(pool);
        let repo = WishlistItemRepository::new(db.clone());
        Self { db, repo }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.db
    }
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&stmt))
        .await
        .expect("create table from entity");
}

/// Inserts a wishlist owned by a random customer.
pub async fn create_wishlist(db: &DatabaseConnection, name: &str) -> WishlistModel {
    wishlist::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(None),
        is_public: Set(false),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("insert wishlist")
}

/// Inserts a product variant with a unique SKU.
pub async fn create_product_variant(db: &DatabaseConnection, name: &str) -> ProductVariantModel {
    let id = Uuid::new_v4();
    product_variant::ActiveModel {
        id: Set(id),
        product_id: Set(Uuid::new_v4()),
        sku: Set(format!("SKU-{}", id.simple())),
        name: Set(name.to_string()),
        price: Set(Decimal::new(25, 0)),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("insert product variant")
}

/// Inserts an item linking `wishlist` to `variant`.
pub async fn create_wishlist_item(
    db: &DatabaseConnection,
    wishlist: &WishlistModel,
    variant: &ProductVariantModel,
) -> WishlistItemModel {
    NewWishlistItem::new(wishlist.id, variant.id)
        .into_active_model()
        .insert(db)
        .await
        .expect("insert wishlist item")
}
