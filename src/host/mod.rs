use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use uuid::Uuid;

use crate::domain::order::{ChaincodeError, OrderChaincode};
use crate::ledger::ChaincodeStub;

// ============================================================================
// Local Host - stands in for the peer runtime during development
// ============================================================================
//
// Reads one JSON request per line, wraps it in a Transaction, runs it
// against the chaincode and a ledger, and writes one JSON response per line.
//
//   in:  {"kind":"invoke","function":"submitOrder","args":["1","a,b","42"]}
//   out: {"tx_id":"…","status":200,"payload":""}
//
// Transactions run strictly one after another.
//
// ============================================================================

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_ERROR: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Init,
    Invoke,
    Query,
}

/// A request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// A request after the host has accepted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    pub function: String,
    pub args: Vec<String>,
}

impl Transaction {
    pub fn new(request: TransactionRequest) -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: request.kind,
            function: request.function,
            args: request.args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub tx_id: Uuid,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TransactionResponse {
    fn success(tx_id: Uuid, payload: &[u8]) -> Self {
        Self {
            tx_id,
            status: STATUS_OK,
            payload: Some(String::from_utf8_lossy(payload).into_owned()),
            message: None,
        }
    }

    fn failure(tx_id: Uuid, error: &ChaincodeError) -> Self {
        Self {
            tx_id,
            status: STATUS_ERROR,
            payload: None,
            message: Some(error.to_json_payload()),
        }
    }

    fn bad_request(message: String) -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            status: STATUS_BAD_REQUEST,
            payload: None,
            message: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Totals for one run of the request loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub succeeded: usize,
    pub failed: usize,
    pub rejected: usize,
}

pub struct Host<L> {
    chaincode: OrderChaincode,
    ledger: L,
}

impl<L: ChaincodeStub> Host<L> {
    pub fn new(chaincode: OrderChaincode, ledger: L) -> Self {
        Self { chaincode, ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Run one transaction to completion.
    pub fn execute(&mut self, tx: &Transaction) -> TransactionResponse {
        let span = tracing::info_span!("tx", tx_id = %tx.tx_id, kind = ?tx.kind);
        let _guard = span.enter();

        let result = match tx.kind {
            TransactionKind::Init => self.chaincode.init(&mut self.ledger, &tx.function, &tx.args),
            TransactionKind::Invoke => self.chaincode.invoke(&mut self.ledger, &tx.function, &tx.args),
            TransactionKind::Query => self.chaincode.query(&self.ledger, &tx.function, &tx.args),
        };

        match result {
            Ok(payload) => TransactionResponse::success(tx.tx_id, &payload),
            Err(e) => {
                tracing::error!(function = %tx.function, error = %e, "Transaction failed");
                TransactionResponse::failure(tx.tx_id, &e)
            }
        }
    }

    /// Parse and run a single request line.
    pub fn execute_line(&mut self, line: &str) -> TransactionResponse {
        match serde_json::from_str::<TransactionRequest>(line) {
            Ok(request) => self.execute(&Transaction::new(request)),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request");
                TransactionResponse::bad_request(format!("malformed request: {}", e))
            }
        }
    }

    /// Serve requests until `input` is exhausted. Blank lines are skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<HostStats> {
        let mut stats = HostStats::default();

        for line in input.lines() {
            let line = line.context("Failed to read request")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.execute_line(&line);
            match response.status {
                STATUS_OK => stats.succeeded += 1,
                STATUS_BAD_REQUEST => stats.rejected += 1,
                _ => stats.failed += 1,
            }

            serde_json::to_writer(&mut output, &response).context("Failed to encode response")?;
            output.write_all(b"\n").context("Failed to write response")?;
            output.flush().context("Failed to flush response")?;
        }

        tracing::info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            rejected = stats.rejected,
            "Input exhausted"
        );

        Ok(stats)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
