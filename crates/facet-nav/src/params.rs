//! Request parameter names with a dedicated builder.

/// Free-text keyword search.
pub const QUERY: &str = "query";
/// Brand filter.
pub const BRAND: &str = "brand";
/// Product type filter.
pub const PRODUCT_TYPE: &str = "productType";
/// Price band filter, `CUR-_-FROM-_-TO`.
pub const PRICE: &str = "price";
/// Tag filter.
pub const TAG: &str = "tag";
/// Product identity filter.
pub const PRODUCT_ID: &str = "productId";
/// SKU code filter.
pub const SKU_CODE: &str = "skuCode";
/// Exact category scope.
pub const CATEGORY: &str = "productCategory";
/// Category scope including subcategories.
pub const CATEGORY_INC_PARENTS: &str = "productCategoryIncParents";
/// Shop scope.
pub const SHOP: &str = "productShop";
/// In-stock scope.
pub const SHOP_IN_STOCK: &str = "productShopInStock";
/// Has-price scope.
pub const SHOP_HAS_PRICE: &str = "productShopHasPrice";
/// Key of the default attribute builder.
pub const ATTRIBUTE: &str = "attributeCode";
