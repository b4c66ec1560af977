use super::errors::ProductError;
use super::value_objects::ProductId;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

pub struct NewProductProps {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Partial replacement of a product's business fields.
///
/// `None` keeps the stored value. `Some(0.0)` and `Some(false)` are values
/// like any other and do replace it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        if props.name.is_empty()
            || props.description.is_empty()
            || props.category.is_empty()
            || props.price == 0.0
            || props.price.is_nan()
        {
            return Err(ProductError::missing_fields());
        }

        Ok(Self {
            id: ProductId::generate(),
            name: props.name,
            description: props.description,
            price: props.price,
            category: props.category,
            in_stock: props.in_stock,
        })
    }

    pub fn apply_changes(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(in_stock) = changes.in_stock {
            self.in_stock = in_stock;
        }
    }
}
