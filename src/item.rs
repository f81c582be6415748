//! Line items and the money rules that keep their amounts consistent

/// One line of a requisition. `amount` tracks `quantity * unit_price`
/// unless the manual override is on.
#[derive(Debug, Clone, PartialEq, minicbor::Encode, minicbor::Decode)]
pub struct RequisitionItem {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub category: String, // may carry a "Main/Sub" hierarchy, empty = uncategorized
    #[n(2)]
    pub name: String,
    #[n(3)]
    pub quantity: f64,
    #[n(4)]
    pub unit_price: f64,
    #[n(5)]
    pub amount: f64,
    #[n(6)]
    pub is_manual: bool,
    #[n(7)]
    pub is_priority: bool,
}

/// A single field edit as dispatched by the hosting application.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Category(String),
    Name(String),
    Quantity(f64),
    UnitPrice(f64),
    Amount(f64),
    Manual(bool),
    Priority(bool),
}

/// Coerce a numeric input to something safe to total. NaN and infinities
/// collapse to zero.
pub fn to_finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub fn compute_amount(quantity: f64, unit_price: f64) -> f64 {
    to_finite(quantity) * to_finite(unit_price)
}

impl RequisitionItem {
    /// A freshly added line: one unit, unpriced, uncategorized.
    pub fn new(id: String) -> Self {
        Self {
            id,
            category: String::new(),
            name: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
            amount: 0.0,
            is_manual: false,
            is_priority: false,
        }
    }

    /// Apply one field edit. Quantity and unit-price edits recompute the
    /// amount unless the manual override is on; switching the override off
    /// recomputes immediately.
    pub fn apply(&mut self, edit: ItemField) {
        match edit {
            ItemField::Category(category) => self.category = category,
            ItemField::Name(name) => self.name = name,
            ItemField::Quantity(quantity) => {
                self.quantity = to_finite(quantity);
                if !self.is_manual {
                    self.amount = compute_amount(self.quantity, self.unit_price);
                }
            }
            ItemField::UnitPrice(unit_price) => {
                self.unit_price = to_finite(unit_price);
                if !self.is_manual {
                    self.amount = compute_amount(self.quantity, self.unit_price);
                }
            }
            ItemField::Amount(amount) => self.amount = to_finite(amount),
            ItemField::Manual(is_manual) => {
                self.is_manual = is_manual;
                if !is_manual {
                    self.amount = compute_amount(self.quantity, self.unit_price);
                }
            }
            ItemField::Priority(is_priority) => self.is_priority = is_priority,
        }
    }
}

impl ItemField {
    /// Edits to category or priority change where the item sorts; the
    /// editor re-sorts after applying them.
    pub fn affects_ordering(&self) -> bool {
        matches!(self, ItemField::Category(_) | ItemField::Priority(_))
    }
}
