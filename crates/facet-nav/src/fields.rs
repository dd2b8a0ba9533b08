//! Index field names targeted by the builders.
//!
//! These names are a contract with the backing index schema.

/// Product identifier.
pub const PRODUCT_ID: &str = "productId";
/// SKU identifier.
pub const SKU_ID: &str = "skuId";
/// Owning shop.
pub const SHOP: &str = "shopId";
/// Shop in which the product has a price.
pub const SHOP_HAS_PRICE: &str = "shopHasPrice";
/// Prefix of the in-stock flag fields; the suffix is `0` or `1`.
pub const SHOP_IN_STOCK_FLAG: &str = "shopInStockFlag";
/// Direct category membership.
pub const CATEGORY: &str = "productCategory";
/// Category membership including every ancestor category.
pub const CATEGORY_INC_PARENTS: &str = "productCategoryIncParents";
/// Product tags.
pub const TAG: &str = "tag";
/// Creation instant, epoch milliseconds.
pub const CREATED: &str = "createdTimestamp";

/// Product name.
pub const NAME: &str = "name";
/// Stemmed product name.
pub const NAME_STEM: &str = "name_stem";
/// Localised display name.
pub const DISPLAY_NAME: &str = "displayName";
/// Stemmed display name.
pub const DISPLAY_NAME_STEM: &str = "displayName_stem";
/// Brand name.
pub const BRAND: &str = "brand";
/// Category names the product belongs to.
pub const CATEGORY_NAME: &str = "categoryName";
/// Stemmed category names.
pub const CATEGORY_NAME_STEM: &str = "categoryName_stem";
/// Product type name.
pub const TYPE: &str = "type";
/// Stemmed product type name.
pub const TYPE_STEM: &str = "type_stem";
/// Product code.
pub const CODE: &str = "code";
/// Stemmed product code.
pub const CODE_STEM: &str = "code_stem";
/// Manufacturer code.
pub const MANUFACTURER_CODE: &str = "manufacturerCode";
/// Stemmed manufacturer code.
pub const MANUFACTURER_CODE_STEM: &str = "manufacturerCode_stem";
/// Codes of the product's SKUs.
pub const SKU_CODE: &str = "sku.code";
/// Stemmed SKU codes.
pub const SKU_CODE_STEM: &str = "sku.code_stem";
/// Manufacturer codes of the product's SKUs.
pub const SKU_MANUFACTURER_CODE: &str = "sku.manufacturerCode";
/// Stemmed SKU manufacturer codes.
pub const SKU_MANUFACTURER_CODE_STEM: &str = "sku.manufacturerCode_stem";
/// Values of attributes marked as primary search values.
pub const ATTRIBUTE_SEARCH_PRIMARY: &str = "attribute.attrvalsearchprimary";
/// Values of attributes searchable as phrases.
pub const ATTRIBUTE_SEARCH_PHRASE: &str = "attribute.attrvalsearchphrase";
/// Values of all searchable attributes.
pub const ATTRIBUTE_SEARCH: &str = "attribute.attrvalsearch";

/// Prefix of attribute facet fields, followed by the attribute code.
pub const FACET_PREFIX: &str = "facet_";

/// Name of the in-stock flag field for the given flag.
pub fn in_stock_flag(in_stock: bool) -> String {
    format!("{SHOP_IN_STOCK_FLAG}{}", u8::from(in_stock))
}

/// Name of the price range field for a customer shop and currency.
pub fn price_range(customer_shop_id: i64, currency: &str) -> String {
    format!("facet_price_{customer_shop_id}_{currency}_range")
}

/// Name of the facet field for an attribute code.
pub fn attribute_facet(code: &str) -> String {
    format!("{FACET_PREFIX}{code}")
}
