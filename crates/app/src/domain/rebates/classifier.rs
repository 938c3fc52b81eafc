//! Product role classification from free-text category labels.

/// Role a cart line plays in an instant-rebate bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductRole {
    Tv,
    Soundbar,
    Subwoofer,
}

/// Classify a line by case-insensitive substring match on its category.
///
/// Checked in order `tv`, `soundbar`, `sub`; the first hit wins. Lines without
/// a matching category play no role in the bundle.
#[must_use]
pub fn classify_role(category: Option<&str>) -> Option<ProductRole> {
    let category = category?.to_lowercase();

    if category.contains("tv") {
        Some(ProductRole::Tv)
    } else if category.contains("soundbar") {
        Some(ProductRole::Soundbar)
    } else if category.contains("sub") {
        Some(ProductRole::Subwoofer)
    } else {
        None
    }
}
