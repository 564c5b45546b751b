use std::num::IntErrorKind;

use crate::config::{ApiVersion, ChaincodeConfig};

use super::errors::ChaincodeError;
use super::value_objects::{split_items, CustomerId, OrderStatus};

// ============================================================================
// Order Commands - invocations resolved into typed requests
// ============================================================================
//
// The host hands us a function name and a list of strings. They are turned
// into exactly one of the types below before the ledger is touched, so an
// arity or name mismatch never reaches state.
//
// ============================================================================

pub const QUERY_FUNCTION: &str = "query";

/// Mutating operations reachable through `invoke`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    SubmitOrder(SubmitOrder),
    EditOrder(EditOrder),
    ChangeStatus(ChangeStatus),
    CancelOrder(CancelOrder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOrder {
    /// Ledger key, the id argument exactly as received.
    pub key: String,
    pub id: i64,
    pub items_id: Vec<String>,
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOrder {
    pub key: String,
    pub items_id: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatus {
    pub key: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrder {
    pub key: String,
}

/// Argument of `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitLedger {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOrder {
    pub key: String,
}

impl OrderCommand {
    /// Resolve an `invoke` request.
    ///
    /// The `write`/`delete` dialect matches names exactly; the order
    /// lifecycle dialect lower-cases the name first.
    pub fn resolve(
        config: &ChaincodeConfig,
        function: &str,
        args: &[String],
    ) -> Result<Self, ChaincodeError> {
        let name = match config.api_version {
            ApiVersion::V1 => function.to_string(),
            ApiVersion::V2 => function.to_lowercase(),
        };

        match (config.api_version, name.as_str()) {
            (ApiVersion::V1, "write") => {
                expect_args(&name, args, 2)?;
                Ok(Self::SubmitOrder(SubmitOrder {
                    key: args[0].clone(),
                    id: parse_order_id(config, &args[0])?,
                    items_id: split_items(&args[1]),
                    customer_id: CustomerId::Number(0),
                }))
            }
            (ApiVersion::V1, "delete") | (ApiVersion::V2, "cancelorder") => {
                expect_args(&name, args, 1)?;
                Ok(Self::CancelOrder(CancelOrder { key: args[0].clone() }))
            }
            (ApiVersion::V2, "submitorder") => {
                expect_args(&name, args, 3)?;
                Ok(Self::SubmitOrder(SubmitOrder {
                    key: args[0].clone(),
                    id: parse_order_id(config, &args[0])?,
                    items_id: split_items(&args[1]),
                    customer_id: CustomerId::Text(args[2].clone()),
                }))
            }
            (ApiVersion::V2, "editorder") => {
                expect_args(&name, args, 2)?;
                Ok(Self::EditOrder(EditOrder {
                    key: args[0].clone(),
                    items_id: split_items(&args[1]),
                }))
            }
            (ApiVersion::V2, "changestatus") => {
                expect_args(&name, args, 2)?;
                Ok(Self::ChangeStatus(ChangeStatus {
                    key: args[0].clone(),
                    status: parse_status(config, &args[1])?,
                }))
            }
            _ => Err(ChaincodeError::UnknownFunction(name)),
        }
    }

    /// Canonical function name, used for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitOrder(_) => "submitOrder",
            Self::EditOrder(_) => "editOrder",
            Self::ChangeStatus(_) => "changeStatus",
            Self::CancelOrder(_) => "cancelOrder",
        }
    }

    /// Ledger key the command operates on.
    pub fn key(&self) -> &str {
        match self {
            Self::SubmitOrder(c) => &c.key,
            Self::EditOrder(c) => &c.key,
            Self::ChangeStatus(c) => &c.key,
            Self::CancelOrder(c) => &c.key,
        }
    }
}

impl InitLedger {
    pub fn resolve(args: &[String]) -> Result<Self, ChaincodeError> {
        expect_args("init", args, 1)?;
        Ok(Self { value: args[0].clone() })
    }
}

impl QueryOrder {
    /// Only the exact, case-sensitive name `query` is served.
    pub fn resolve(function: &str, args: &[String]) -> Result<Self, ChaincodeError> {
        if function != QUERY_FUNCTION {
            return Err(ChaincodeError::UnknownFunction(function.to_string()));
        }
        expect_args(QUERY_FUNCTION, args, 1)?;
        Ok(Self { key: args[0].clone() })
    }
}

fn expect_args(function: &str, args: &[String], expected: usize) -> Result<(), ChaincodeError> {
    if args.len() != expected {
        return Err(ChaincodeError::InvalidArgumentCount {
            function: function.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

/// Legacy mode keeps what the deployed chaincode stored: out-of-range ids
/// saturate at the integer bounds, anything else non-numeric becomes `0`.
fn parse_order_id(config: &ChaincodeConfig, raw: &str) -> Result<i64, ChaincodeError> {
    let err = match raw.parse::<i64>() {
        Ok(id) => return Ok(id),
        Err(e) => e,
    };
    if !config.is_legacy() {
        return Err(ChaincodeError::InvalidOrderId(raw.to_string()));
    }

    let id = match err.kind() {
        IntErrorKind::PosOverflow => i64::MAX,
        IntErrorKind::NegOverflow => i64::MIN,
        _ => 0,
    };
    tracing::warn!(key = %raw, id = id, "Order id is not a valid integer, storing fallback id");
    Ok(id)
}

fn parse_status(config: &ChaincodeConfig, raw: &str) -> Result<OrderStatus, ChaincodeError> {
    match OrderStatus::from_name(raw) {
        Some(status) => Ok(status),
        None if config.is_legacy() => Ok(OrderStatus::Unrecognized(raw.to_string())),
        None => {
            let known: Vec<String> = OrderStatus::RECOGNIZED.iter().map(|s| s.as_str().to_string()).collect();
            tracing::warn!(status = %raw, known = ?known, "Rejecting unknown order status");
            Err(ChaincodeError::InvalidStatus(raw.to_string()))
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
