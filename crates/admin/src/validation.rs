//! Product form validation.
//!
//! Add and edit submissions arrive as loosely-typed form fields and go
//! through two passes before anything is written: type coercion
//! ([`ProductForm::coerce`]) and value checks ([`ProductForm::validate_new`],
//! [`ProductForm::validate_edit`]).

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use thiserror::Error;

use ims_core::{Price, PriceError, ProductId};

use crate::models::{NewProduct, Product};

/// Which product form is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// `POST /products/add`
    Add,
    /// `POST /products/edit/submit`
    Edit,
}

impl FormKind {
    const fn negative_message(self) -> &'static str {
        match self {
            Self::Add => "quantity and/or price was less than 0",
            Self::Edit => "At least one of id, quantity, or price was less than 0",
        }
    }
}

/// Reasons a product form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent from the submission.
    #[error("One or more required fields were not provided")]
    MissingField,

    /// A numeric field did not parse as a number.
    #[error("invalid {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A count field parsed, but has a fractional part.
    #[error("invalid {field}: '{value}' is not a whole number")]
    NotWholeNumber { field: &'static str, value: String },

    /// A numeric field was below zero.
    #[error("{}", .0.negative_message())]
    NegativeValue(FormKind),

    /// A numeric field was above the largest storable value.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: &'static str, max: Decimal },

    /// The name was empty after trimming.
    #[error("name must be provided")]
    EmptyName,
}

/// Raw product form submission.
///
/// Every field is optional so that a missing field is reported as a
/// validation failure instead of an extractor rejection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity_available: Option<String>,
    pub price: Option<String>,
}

/// Form fields after type coercion, before value checks.
#[derive(Debug, Clone, PartialEq)]
struct CoercedProduct {
    id: Option<i64>,
    name: String,
    description: String,
    quantity: i64,
    price: Decimal,
}

impl ProductForm {
    /// Validate an add submission.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate_new(&self) -> Result<NewProduct, ValidationError> {
        let coerced = self.coerce(FormKind::Add)?;
        coerced.check(FormKind::Add)
    }

    /// Validate an edit submission.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate_edit(&self) -> Result<Product, ValidationError> {
        let coerced = self.coerce(FormKind::Edit)?;
        let id = coerced.id.ok_or(ValidationError::MissingField)?;
        if id < 0 {
            return Err(ValidationError::NegativeValue(FormKind::Edit));
        }
        let product = coerced.check(FormKind::Edit)?;
        Ok(Product::from_new(ProductId::new(id), product))
    }

    fn coerce(&self, kind: FormKind) -> Result<CoercedProduct, ValidationError> {
        let id = match kind {
            FormKind::Add => None,
            FormKind::Edit => Some(required(self.id.as_deref())?),
        };
        let name = required(self.name.as_deref())?;
        let quantity = required(self.quantity_available.as_deref())?;
        let price = required(self.price.as_deref())?;

        Ok(CoercedProduct {
            id: id.map(|raw| parse_whole("id", raw)).transpose()?,
            name: name.to_string(),
            description: self.description.clone().unwrap_or_default(),
            quantity: parse_whole("quantity_available", quantity)?,
            price: parse_decimal("price", price)?,
        })
    }
}

impl CoercedProduct {
    fn check(self, kind: FormKind) -> Result<NewProduct, ValidationError> {
        let name = self.name.trim();
        let description = self.description.trim();

        if self.quantity < 0 || self.price < Decimal::ZERO {
            return Err(ValidationError::NegativeValue(kind));
        }
        if u32::try_from(self.quantity).is_err() {
            return Err(ValidationError::TooLarge {
                field: "quantity_available",
                max: Decimal::from(u32::MAX),
            });
        }
        let price = Price::rounded(self.price).map_err(|e| match e {
            PriceError::TooLarge(_) => ValidationError::TooLarge {
                field: "price",
                max: Price::MAX.amount(),
            },
            PriceError::Negative(_) | PriceError::NotFinite => {
                ValidationError::NegativeValue(kind)
            }
        })?;
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            quantity_available: self.quantity,
            price,
        })
    }
}

fn required(value: Option<&str>) -> Result<&str, ValidationError> {
    value.ok_or(ValidationError::MissingField)
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw.trim()).map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parse a count. `"5"` and `"5.0"` are both five; `"5.5"` is rejected.
fn parse_whole(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let value = parse_decimal(field, raw)?;
    if !value.fract().is_zero() {
        return Err(ValidationError::NotWholeNumber {
            field,
            value: raw.to_string(),
        });
    }
    value.to_i64().ok_or_else(|| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
