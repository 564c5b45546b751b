use crate::ledger::LedgerError;

// ============================================================================
// Chaincode Errors
// ============================================================================
//
// Every failure aborts the invocation and is handed back to the host as-is.
// Nothing is retried and nothing is partially applied.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChaincodeError {
    #[error("Incorrect number of arguments for {function}. Expecting {expected}, got {actual}")]
    InvalidArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Received unknown function invocation: {0}")]
    UnknownFunction(String),

    #[error("Invalid order id: {0:?}")]
    InvalidOrderId(String),

    #[error("Invalid order status: {0:?}")]
    InvalidStatus(String),

    #[error("Failed to get state for {key}")]
    StateRead {
        key: String,
        #[source]
        source: LedgerError,
    },

    #[error("Failed to put state for {key}")]
    StateWrite {
        key: String,
        #[source]
        source: LedgerError,
    },

    #[error("Failed to delete state for {key}")]
    StateDelete {
        key: String,
        #[source]
        source: LedgerError,
    },

    #[error("Failed to encode order {key}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode order {key}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Nil amount for {key}")]
    NilValue { key: String },
}

impl ChaincodeError {
    /// The error as returned to the invoking client: `{"Error":"<message>"}`.
    pub fn to_json_payload(&self) -> String {
        serde_json::json!({ "Error": self.to_string() }).to_string()
    }

    /// Short stable name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgumentCount { .. } => "invalid_argument_count",
            Self::UnknownFunction(_) => "unknown_function",
            Self::InvalidOrderId(_) => "invalid_order_id",
            Self::InvalidStatus(_) => "invalid_status",
            Self::StateRead { .. } => "state_read",
            Self::StateWrite { .. } => "state_write",
            Self::StateDelete { .. } => "state_delete",
            Self::Serialization { .. } => "serialization",
            Self::Deserialization { .. } => "deserialization",
            Self::NilValue { .. } => "nil_value",
        }
    }

    /// True when the record the invocation needed was not on the ledger.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NilValue { .. })
    }
}
