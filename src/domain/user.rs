use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Runs the shift, may also take orders
    Manager,
    /// Takes orders at the counter
    Salesman,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Manager => "MANAGER",
            Position::Salesman => "SALESMAN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MANAGER" => Some(Position::Manager),
            "SALESMAN" => Some(Position::Salesman),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The person placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, position: Position) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            position,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
