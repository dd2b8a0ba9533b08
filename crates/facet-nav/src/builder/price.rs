//! Price band builder.
//!
//! A price band arrives as `CUR-_-FROM-_-TO`, e.g. `EUR-_-10.50-_-99`. Bounds are
//! decimal amounts in major units and are matched against the per-shop, per-currency
//! range field in minor units (cents). Either bound may be empty for an open range.

use std::iter;

use facet_query::QueryNode;

use super::{Scope, SearchQueryBuilder, alternatives};
use crate::{FilterValue, fields};

/// Separator between the components of a price band token.
const SEPARATOR: &str = "-_-";

/// Matches the product price for the customer shop against a price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBuilder;

impl SearchQueryBuilder for PriceBuilder {
    fn strict(&self, scope: Scope, _parameter: &str, value: &FilterValue) -> Option<QueryNode> {
        alternatives(value, &|item| {
            let (currency, from, to) = decompose_price(&item.to_text())?;
            Some(QueryNode::range(
                fields::price_range(scope.customer_shop_id, &currency),
                from,
                to,
            ))
        })
    }
}

/// Splits a price band token into currency and bounds in cents.
///
/// Returns `None` for a malformed token.
pub fn decompose_price(token: &str) -> Option<(String, Option<i64>, Option<i64>)> {
    let mut parts = token.trim().split(SEPARATOR);
    let currency = parts.next()?.trim();
    let from = parts.next()?;
    let to = parts.next()?;
    if parts.next().is_some() || currency.is_empty() {
        return None;
    }
    if !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((currency.to_uppercase(), bound(from)?, bound(to)?))
}

/// Parses an optional bound; an empty bound is open.
fn bound(text: &str) -> Option<Option<i64>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(None);
    }
    to_cents(text).map(Some)
}

/// Converts a non-negative decimal amount to cents, truncating extra fraction digits.
fn to_cents(amount: &str) -> Option<i64> {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let cents: i64 = fraction
        .chars()
        .chain(iter::repeat('0'))
        .take(2)
        .collect::<String>()
        .parse()
        .ok()?;
    whole.checked_mul(100)?.checked_add(cents)
}
