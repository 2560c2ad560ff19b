/// Commerce entities module
pub mod product_variant;
pub mod wishlist;
pub mod wishlist_item;

// Re-export entities
pub use product_variant::{Entity as ProductVariant, Model as ProductVariantModel};
pub use wishlist::{Entity as Wishlist, Model as WishlistModel};
pub use wishlist_item::{Entity as WishlistItem, Model as WishlistItemModel};
