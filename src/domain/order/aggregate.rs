use serde::{Deserialize, Deserializer, Serialize};

use super::value_objects::{CustomerId, OrderStatus};

// ============================================================================
// Order - the only record kept on the ledger
// ============================================================================
//
// Stored as a JSON object under the key the order was submitted with:
//
//   {"Id":1,"ItemsId":["a","b"],"CustomerId":"42","Status":"Issued"}
//
// Missing and null fields decode to their zero values. Every write replaces
// the whole record.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Order {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub items_id: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_id: CustomerId,
    #[serde(deserialize_with = "null_as_default")]
    pub status: OrderStatus,
}

/// Earlier chaincode wrote `null` for an unset item list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Order {
    /// A freshly submitted order.
    pub fn issue(id: i64, items_id: Vec<String>, customer_id: CustomerId) -> Self {
        Self {
            id,
            items_id,
            customer_id,
            status: OrderStatus::Issued,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn replace_items(&mut self, items_id: Vec<String>) {
        self.items_id = items_id;
    }

    pub fn change_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}
