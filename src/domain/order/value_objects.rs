use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Lifecycle status of an order.
///
/// Encoded on the ledger as its name string. Names outside the closed set
/// (written by earlier chaincode, or accepted in legacy mode) are carried as
/// `Unrecognized` and re-encoded verbatim, so existing records survive a
/// read-modify-write untouched. The zero value is the empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Issued,
    Shipped,
    ArrivedToPO,
    Finished,
    Unrecognized(String),
}

impl OrderStatus {
    pub const RECOGNIZED: [OrderStatus; 4] = [
        OrderStatus::Issued,
        OrderStatus::Shipped,
        OrderStatus::ArrivedToPO,
        OrderStatus::Finished,
    ];

    /// Exact, case-sensitive match against the closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Issued" => Some(Self::Issued),
            "Shipped" => Some(Self::Shipped),
            "ArrivedToPO" => Some(Self::ArrivedToPO),
            "Finished" => Some(Self::Finished),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Issued => "Issued",
            Self::Shipped => "Shipped",
            Self::ArrivedToPO => "ArrivedToPO",
            Self::Finished => "Finished",
            Self::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<String> for OrderStatus {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or(Self::Unrecognized(name))
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unrecognized(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchasing party. Numeric in the `write`/`delete` dialect, free-form text
/// in the order lifecycle dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    Number(i64),
    Text(String),
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Split a comma-separated item list. Empty input yields a single empty
/// item, and empty segments are kept.
pub fn split_items(csv: &str) -> Vec<String> {
    csv.split(',').map(str::to_string).collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
