//! Catalogue and cart data types
//!
//! Prices are whole currency units (`u64`). The storefront never shows
//! fractional amounts.

use serde::{Deserialize, Serialize};

/// Product snapshot as served by the catalogue API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<u64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sku: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            name: name.into(),
            description: String::new(),
            price,
            sale_price: None,
            images: Vec::new(),
            category: String::new(),
            tags: Vec::new(),
            stock: 0,
            sku: String::new(),
        }
    }

    pub fn with_sale_price(mut self, sale_price: u64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// Price actually charged: the sale price when there is a non-zero one
    pub fn unit_price(&self) -> u64 {
        match self.sale_price {
            Some(sale) if sale > 0 => sale,
            _ => self.price,
        }
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Flattened product fields written by the product listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareProduct {
    pub product_id: String,
    #[serde(default)]
    pub product_slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub image: String,
}

/// What a cart line points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductRef {
    Snapshot(Product),
    Bare(BareProduct),
}

impl ProductRef {
    pub fn id(&self) -> &str {
        match self {
            ProductRef::Snapshot(p) => &p.id,
            ProductRef::Bare(b) => &b.product_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProductRef::Snapshot(p) => &p.name,
            ProductRef::Bare(b) => &b.name,
        }
    }

    pub fn unit_price(&self) -> u64 {
        match self {
            ProductRef::Snapshot(p) => p.unit_price(),
            ProductRef::Bare(b) => b.price,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            ProductRef::Snapshot(p) => p.primary_image(),
            ProductRef::Bare(b) if !b.image.is_empty() => Some(&b.image),
            ProductRef::Bare(_) => None,
        }
    }

    /// Known stock level, if the reference carries one
    pub fn stock(&self) -> Option<u32> {
        match self {
            ProductRef::Snapshot(p) if p.stock > 0 => Some(p.stock),
            _ => None,
        }
    }

    pub fn preview(&self) -> ItemPreview {
        ItemPreview {
            name: self.name().to_string(),
            image: self.image().map(str::to_string),
        }
    }
}

impl From<Product> for ProductRef {
    fn from(product: Product) -> Self {
        ProductRef::Snapshot(product)
    }
}

impl From<BareProduct> for ProductRef {
    fn from(bare: BareProduct) -> Self {
        ProductRef::Bare(bare)
    }
}

/// Name and image used purely for notification copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPreview {
    pub name: String,
    pub image: Option<String>,
}

impl ItemPreview {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One line of the cart. Quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct CartEntry {
    pub product: ProductRef,
    pub quantity: u32,
}

impl CartEntry {
    pub fn new(product: impl Into<ProductRef>, quantity: u32) -> Self {
        Self {
            product: product.into(),
            quantity: quantity.max(1),
        }
    }

    pub fn product_id(&self) -> &str {
        self.product.id()
    }

    pub fn line_total(&self) -> u64 {
        self.product
            .unit_price()
            .saturating_mul(u64::from(self.quantity))
    }
}

fn default_quantity() -> u32 {
    1
}

/// Persisted shapes: `{product, quantity}` and the flattened listing shape
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Snapshot {
        product: Product,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },
    Bare {
        #[serde(flatten)]
        product: BareProduct,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },
}

impl From<StoredEntry> for CartEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Snapshot { product, quantity } => CartEntry::new(product, quantity),
            StoredEntry::Bare { product, quantity } => CartEntry::new(product, quantity),
        }
    }
}

impl From<CartEntry> for StoredEntry {
    fn from(entry: CartEntry) -> Self {
        match entry.product {
            ProductRef::Snapshot(product) => StoredEntry::Snapshot {
                product,
                quantity: entry.quantity,
            },
            ProductRef::Bare(product) => StoredEntry::Bare {
                product,
                quantity: entry.quantity,
            },
        }
    }
}
