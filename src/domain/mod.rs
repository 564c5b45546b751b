// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Ledger-agnostic chaincode logic. Reaches state only through the
// `ChaincodeStub` handed in by the host.
//
// ============================================================================

pub mod order;
