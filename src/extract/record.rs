use crate::vendor::Vendor;
use std::fmt;

/// Product attributes an extraction record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Product,
    Format,
    Material,
    Surface,
    Reference,
    Environment,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Product,
        Field::Format,
        Field::Material,
        Field::Surface,
        Field::Reference,
        Field::Environment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Product => "produto",
            Self::Format => "formato",
            Self::Material => "material",
            Self::Surface => "superficie",
            Self::Reference => "referencia",
            Self::Environment => "ambiente",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attributes extracted from one product page
///
/// Every present value is sanitized and non-empty; a field no strategy
/// could fill is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    pub vendor: Vendor,
    pub product: Option<String>,
    pub format: Option<String>,
    pub material: Option<String>,
    pub surface: Option<String>,
    pub reference: Option<String>,
    pub environment: Option<String>,
}

impl ExtractionRecord {
    pub fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            product: None,
            format: None,
            material: None,
            surface: None,
            reference: None,
            environment: None,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Product => self.product.as_deref(),
            Field::Format => self.format.as_deref(),
            Field::Material => self.material.as_deref(),
            Field::Surface => self.surface.as_deref(),
            Field::Reference => self.reference.as_deref(),
            Field::Environment => self.environment.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::Product => &mut self.product,
            Field::Format => &mut self.format,
            Field::Material => &mut self.material,
            Field::Surface => &mut self.surface,
            Field::Reference => &mut self.reference,
            Field::Environment => &mut self.environment,
        };
        *slot = value;
    }

    /// Present fields as `(field, value)` pairs, in field order
    pub fn present(&self) -> Vec<(Field, &str)> {
        Field::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|value| (*field, value)))
            .collect()
    }
}
