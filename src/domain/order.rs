use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{sum_decimals, Item, Price, User};

/// Identifier generated by the store when an order is inserted.
pub type OrderId = i64;

/// A purchase placed by a user. Items keep their insertion order and may
/// repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    user: User,
    items: Vec<Item>,
    placed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user: User) -> Self {
        Self {
            user,
            items: Vec::new(),
            placed_at: Utc::now(),
        }
    }

    /// Backdate (or postdate) the moment the order was placed.
    pub fn with_placed_at(mut self, placed_at: DateTime<Utc>) -> Self {
        self.placed_at = placed_at;
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.add_items(items);
        self
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Price {
        sum_decimals(self.items.iter().map(|item| &item.price))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::{format_decimal, ItemType, Position};

    fn espresso() -> Item {
        Item::new("espresso", Price::from_str("2.0000").unwrap(), ItemType::Beverage)
    }

    #[test]
    fn test_new_order_is_empty() {
        let order = Order::new(User::new("Oleg", "Strunevskiy", Position::Manager));
        assert!(order.is_empty());
        assert_eq!(format_decimal(&order.total()), "0");
    }

    #[test]
    fn test_items_keep_insertion_order_and_duplicates() {
        let latte = Item::new("latte", Price::from_str("2.5").unwrap(), ItemType::Addition);
        let order = Order::new(User::new("Oleg", "Strunevskiy", Position::Manager))
            .with_items([espresso(), latte.clone(), espresso()]);

        let names: Vec<&str> = order.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["espresso", "latte", "espresso"]);
        assert_eq!(format_decimal(&order.total()), "6.5");
    }

    #[test]
    fn test_add_item_appends() {
        let mut order = Order::new(User::new("Ann", "Lee", Position::Salesman));
        order.add_item(espresso());
        order.add_item(espresso());

        assert!(!order.is_empty());
        assert_eq!(order.items().len(), 2);
        assert_eq!(format_decimal(&order.total()), "4");
    }
}
