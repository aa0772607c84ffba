use serde::{Deserialize, Serialize};

use super::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    /// Coffee, tea and other drinks
    Beverage,
    /// Milk, syrup, extra shot and similar add-ons
    Addition,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Beverage => "BEVERAGE",
            ItemType::Addition => "ADDITION",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BEVERAGE" => Some(ItemType::Beverage),
            "ADDITION" => Some(ItemType::Addition),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single purchasable line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: Price,
    pub item_type: ItemType,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Price, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            price,
            item_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_roundtrip() {
        for item_type in [ItemType::Beverage, ItemType::Addition] {
            let parsed = ItemType::from_str(item_type.as_str()).unwrap();
            assert_eq!(item_type, parsed);
        }
    }

    #[test]
    fn test_item_type_rejects_unknown() {
        assert_eq!(ItemType::from_str("dessert"), None);
    }
}
