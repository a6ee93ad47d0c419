use super::ProductId;

/// Stock level reported by the catalog for a single product.
///
/// `amount` is the maximum quantity a cart may hold for `id`. It is fetched
/// for every check and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}
