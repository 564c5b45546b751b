// ============================================================================
// Order Domain - the chaincode proper
// ============================================================================
//
// - Value objects (OrderStatus, CustomerId)
// - Aggregate (Order, the ledger record)
// - Commands (typed invocations resolved from function name + args)
// - Errors (ChaincodeError)
// - Command handler (OrderChaincode, the host-facing entry points)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
