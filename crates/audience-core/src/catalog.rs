//! Product catalog and campaign budget snapshot consumed by the campaign
//! planning layer alongside segment results.

use serde::{Deserialize, Serialize};

/// Stock used for products not present in the catalog.
pub const UNKNOWN_PRODUCT_STOCK: u32 = 300;
/// Price used for products not present in the catalog.
pub const UNKNOWN_PRODUCT_PRICE: u32 = 160;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub stock: u32,
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    fn new(name: &str, stock: u32, price: u32, category: &str) -> Self {
        Self {
            name: name.to_string(),
            stock,
            price,
            category: Some(category.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            products: vec![
                Product::new("Wireless Headphones", 250, 180, "Audio"),
                Product::new("Smart Watch", 180, 250, "Wearables"),
                Product::new("Professional Headphones", 300, 160, "Electronics"),
            ],
        }
    }
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Case-insensitive substring match of `name` against product names,
    /// truncated to `top_k`. With no match, returns a single placeholder entry
    /// named `name` with the default stock and price.
    pub fn search(&self, name: &str, top_k: usize) -> Vec<Product> {
        let needle = name.to_lowercase();
        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if matches.is_empty() {
            return vec![Product {
                name: name.to_string(),
                stock: UNKNOWN_PRODUCT_STOCK,
                price: UNKNOWN_PRODUCT_PRICE,
                category: None,
            }];
        }
        matches.truncate(top_k);
        matches
    }
}

/// Campaign budget figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub total_budget: u64,
    pub allocated: u64,
}

impl Default for BudgetSnapshot {
    fn default() -> Self {
        Self {
            total_budget: 50_000,
            allocated: 15_000,
        }
    }
}

impl BudgetSnapshot {
    pub fn remaining(&self) -> u64 {
        self.total_budget.saturating_sub(self.allocated)
    }
}
