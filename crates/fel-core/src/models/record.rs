//! Normalized invoice record extracted from one FEL document.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Placeholder stored when an expected attribute is absent.
pub const MISSING_VALUE: &str = "No disponible";

/// Amount stored for tax categories the document does not mention.
pub const ZERO_AMOUNT: &str = "0";

/// One invoice, flattened to the fields the report needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRecord {
    /// Document ID from the general data node.
    pub invoice_number: String,

    /// Issue date as `DD/MM/YYYY`.
    pub issue_date: String,

    /// DTE type code (FACT, FCAM, NCRE, ...).
    pub document_type: String,

    /// Issuer NIT.
    pub issuer_tax_id: String,

    pub issuer_name: String,

    pub establishment_code: String,

    pub receiver_name: String,

    /// Lines in document order.
    pub line_items: Vec<LineItem>,

    pub grand_total: String,

    /// Tax totals for the fixed SAT categories.
    pub tax_amounts: TaxAmounts,

    /// Authorization series assigned by the certifier.
    pub certification_series: String,

    /// Authorization number assigned by the certifier.
    pub certification_number: String,
}

/// A single invoice line. Numeric values are kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub quantity: String,
    pub description: String,
    pub kind: ItemKind,
    pub unit_price: String,
    pub line_total: String,
}

/// Whether a line sells a good or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Bien.
    Good,
    /// Servicio.
    Service,
}

impl ItemKind {
    /// Map the `BienOServicio` code. Only `"B"` is a good; any other code,
    /// or no code at all, is a service.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("B") => ItemKind::Good,
            _ => ItemKind::Service,
        }
    }

    /// Label used in the report.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Good => "Bien",
            ItemKind::Service => "Servicio",
        }
    }
}

/// Tax categories tracked per invoice, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxCategory {
    Iva,
    Petroleo,
    TurismoHospedaje,
    TimbreDePrensa,
    Bomberos,
    BebidasAlcoholicas,
    BebidasNoAlcoholicas,
}

impl TaxCategory {
    /// Every category, in report column order.
    pub const ALL: [TaxCategory; 7] = [
        TaxCategory::Iva,
        TaxCategory::Petroleo,
        TaxCategory::TurismoHospedaje,
        TaxCategory::TimbreDePrensa,
        TaxCategory::Bomberos,
        TaxCategory::BebidasAlcoholicas,
        TaxCategory::BebidasNoAlcoholicas,
    ];

    /// The `NombreCorto` SAT uses for this tax.
    pub fn short_name(&self) -> &'static str {
        match self {
            TaxCategory::Iva => "IVA",
            TaxCategory::Petroleo => "PETROLEO",
            TaxCategory::TurismoHospedaje => "TURISMO HOSPEDAJE",
            TaxCategory::TimbreDePrensa => "TIMBRE DE PRENSA",
            TaxCategory::Bomberos => "BOMBEROS",
            TaxCategory::BebidasAlcoholicas => "BEBIDAS ALCOHOLICAS",
            TaxCategory::BebidasNoAlcoholicas => "BEBIDAS NO ALCOHOLICAS",
        }
    }

    /// Case-sensitive lookup by short name.
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.short_name() == name)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Tax totals keyed by [`TaxCategory`]. Always holds all seven categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxAmounts {
    amounts: [String; 7],
}

impl TaxAmounts {
    /// All categories set to `"0"`.
    pub fn new() -> Self {
        Self {
            amounts: std::array::from_fn(|_| ZERO_AMOUNT.to_string()),
        }
    }

    pub fn get(&self, category: TaxCategory) -> &str {
        &self.amounts[category.index()]
    }

    pub fn set(&mut self, category: TaxCategory, amount: impl Into<String>) {
        self.amounts[category.index()] = amount.into();
    }

    /// Categories and amounts in report column order.
    pub fn iter(&self) -> impl Iterator<Item = (TaxCategory, &str)> {
        TaxCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for TaxAmounts {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for TaxAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (category, amount) in self.iter() {
            map.serialize_entry(category.short_name(), amount)?;
        }
        map.end()
    }
}
