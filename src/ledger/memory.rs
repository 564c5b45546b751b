use std::collections::BTreeMap;

use super::{ChaincodeStub, LedgerError};

// ============================================================================
// In-Memory Ledger
// ============================================================================
//
// BTreeMap-backed stand-in for the peer's world state. Used by the local
// host binary and by tests. Individual primitives can be made to fail so
// error propagation is observable.
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemLedger {
    state: BTreeMap<String, Vec<u8>>,
    faults: Faults,
}

#[derive(Debug, Clone, Copy, Default)]
struct Faults {
    get: bool,
    put: bool,
    del: bool,
}

impl MemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key directly, bypassing chaincode.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.state.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Make every subsequent `get_state` fail.
    pub fn fail_reads(&mut self, fail: bool) {
        self.faults.get = fail;
    }

    /// Make every subsequent `put_state` fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.faults.put = fail;
    }

    /// Make every subsequent `del_state` fail.
    pub fn fail_deletes(&mut self, fail: bool) {
        self.faults.del = fail;
    }
}

impl ChaincodeStub for MemLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if self.faults.get {
            return Err(LedgerError::Unavailable(format!("read of {key:?} failed")));
        }
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        if self.faults.put {
            return Err(LedgerError::Unavailable(format!("write of {key:?} failed")));
        }
        if key.is_empty() {
            return Err(LedgerError::Rejected {
                key: key.to_string(),
                reason: "key must not be an empty string".to_string(),
            });
        }
        self.state.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        if self.faults.del {
            return Err(LedgerError::Unavailable(format!("delete of {key:?} failed")));
        }
        if key.is_empty() {
            return Err(LedgerError::Rejected {
                key: key.to_string(),
                reason: "key must not be an empty string".to_string(),
            });
        }
        // Deleting an absent key is not an error.
        self.state.remove(key);
        Ok(())
    }
}
