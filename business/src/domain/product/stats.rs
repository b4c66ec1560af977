use std::collections::BTreeMap;

use super::model::Product;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Product counts per category, ordered by category name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    counts: BTreeMap<String, usize>,
}

impl CategoryStats {
    pub fn tally<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut counts = BTreeMap::new();
        for product in products {
            let category = if product.category.is_empty() {
                UNCATEGORIZED
            } else {
                product.category.as_str()
            };
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn total_categories(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn into_counts(self) -> BTreeMap<String, usize> {
        self.counts
    }
}
