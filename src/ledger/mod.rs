// ============================================================================
// Ledger State Access
// ============================================================================
//
// The host runtime owns the ledger. Chaincode only sees the three
// key-value primitives below, handed in for the duration of one call.
//
// Implementations:
// - `MemLedger` (this module) - in-memory BTreeMap with fault injection
// - the hosting peer, via whatever binding embeds this crate
//
// ============================================================================

mod memory;

pub use memory::MemLedger;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("key {key:?} rejected by ledger: {reason}")]
    Rejected { key: String, reason: String },
}

/// Key-value state accessor provided by the host for a single transaction.
///
/// Writes and deletes are treated as atomic and durable once they return
/// `Ok`. Reads of a key that does not exist return `Ok(None)`.
pub trait ChaincodeStub {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError>;
}

impl<T: ChaincodeStub + ?Sized> ChaincodeStub for &mut T {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        (**self).put_state(key, value)
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        (**self).del_state(key)
    }
}
