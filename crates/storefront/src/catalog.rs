//! Static, read-only product catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shoplite_core::ProductId;

/// A product in the catalog.
///
/// Products are defined once at startup and never mutated or destroyed. The
/// cart denormalizes the fields it needs at add-time, so a reseeded catalog
/// does not retroactively alter cart display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in USD (non-negative).
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category tag used by [`Catalog::list`].
    pub category: String,
    /// Image reference, relative to the asset root.
    pub img: String,
    /// Short plain-text description.
    pub description: String,
}

/// Category filter for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every product, in catalog definition order.
    All,
    /// Products whose category tag matches exactly.
    Category(String),
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(value.to_owned())
        }
    }
}

/// The static in-memory product catalog.
///
/// Pure reads over immutable data; the only "failure" is a lookup miss,
/// reported as `None`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a custom seed.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn lookup(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// List products matching `filter`, preserving catalog definition order.
    #[must_use]
    pub fn list(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| match filter {
                CategoryFilter::All => true,
                CategoryFilter::Category(category) => &p.category == category,
            })
            .collect()
    }

    /// The first `n` products, as featured on the home page.
    #[must_use]
    pub fn featured(&self, n: usize) -> &[Product] {
        let n = n.min(self.products.len());
        self.products.get(..n).unwrap_or(&[])
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    /// The demo seed: four products across three categories.
    fn default() -> Self {
        Self::new(vec![
            seed(
                "p1",
                "Wireless Headphones",
                7999,
                "electronics",
                "assets/sample1.png",
                "Comfortable over-ear headphones with crisp sound.",
            ),
            seed(
                "p2",
                "Smart Watch",
                12999,
                "electronics",
                "assets/sample2.png",
                "Fitness tracking, notifications, and sleek design.",
            ),
            seed(
                "p3",
                "Laptop Stand",
                2999,
                "office",
                "assets/sample3.png",
                "Ergonomic aluminum stand for better posture.",
            ),
            seed(
                "p4",
                "USB-C Hub",
                3999,
                "accessories",
                "assets/sample4.png",
                "Expand ports: HDMI, USB-A, SD, and more.",
            ),
        ])
    }
}

fn seed(id: &str, name: &str, cents: i64, category: &str, img: &str, description: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::new(cents, 2),
        category: category.to_owned(),
        img: img.to_owned(),
        description: description.to_owned(),
    }
}
