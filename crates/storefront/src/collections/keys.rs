//! Storage keys for persisted collections.
//!
//! Keys are versioned; bump the suffix when the stored shape changes
//! incompatibly. The `lumina` prefix predates the current brand and is kept
//! so existing visitors keep their saved state.

/// Key for the cart.
pub const CART: &str = "lumina-cart-v1";

/// Key for the wishlist.
pub const WISHLIST: &str = "lumina-wishlist-v1";

/// Key for the compare list.
pub const COMPARE: &str = "lumina-compare-v1";
