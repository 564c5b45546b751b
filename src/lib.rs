// ============================================================================
// Order Chaincode
// ============================================================================
//
// Order records kept in a key-value ledger owned by an external blockchain
// runtime. The runtime calls `init`, `invoke` and `query` on
// `OrderChaincode`, handing in its state accessor for the duration of the
// call.
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod host;
pub mod ledger;
pub mod metrics;

pub use config::{ApiVersion, ChaincodeConfig, Compatibility, ConfigError, QueryResponse};
pub use domain::order::{ChaincodeError, CustomerId, Order, OrderChaincode, OrderCommand, OrderStatus};
pub use ledger::{ChaincodeStub, LedgerError, MemLedger};
pub use metrics::Metrics;
