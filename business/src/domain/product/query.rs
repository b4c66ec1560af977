use std::num::IntErrorKind;
use std::ops::Range;

use super::model::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// 1-based page window over a filtered product sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Zero values fall back to the defaults.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Resolves raw query-string values.
    ///
    /// A leading integer prefix is honoured (`"3abc"` is page 3). Missing,
    /// non-numeric and non-positive values resolve to the defaults; numbers
    /// too large for `usize` saturate.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Index range of this page within a sequence of `len` items.
    /// Pages past the end give an empty range.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = (self.page.max(1) - 1).saturating_mul(self.limit).min(len);
        let end = start.saturating_add(self.limit).min(len);
        start..end
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<usize>() {
        Ok(n) => Some(n).filter(|n| *n > 0),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    }
}

/// Category filter, name search and page window for a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub pagination: Pagination,
}

/// One page of a filtered listing together with the filtered total.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: usize,
}

impl ProductQuery {
    /// Empty filter values are treated as absent.
    pub fn new(category: Option<String>, search: Option<String>, pagination: Pagination) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            search: search.filter(|s| !s.is_empty()),
            pagination,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_matches = self
            .category
            .as_ref()
            .is_none_or(|category| product.category.to_lowercase() == category.to_lowercase());
        let name_matches = self.search.as_ref().is_none_or(|term| {
            product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        category_matches && name_matches
    }

    /// Filters `products` in order, then cuts the requested page.
    pub fn apply(&self, products: &[Product]) -> ProductPage {
        let filtered: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        let total = filtered.len();
        let items = filtered[self.pagination.window(total)]
            .iter()
            .map(|p| (*p).clone())
            .collect();

        ProductPage { items, total }
    }
}
