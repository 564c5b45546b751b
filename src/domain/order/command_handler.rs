use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{ApiVersion, ChaincodeConfig, QueryResponse};
use crate::ledger::ChaincodeStub;
use crate::metrics::Metrics;

use super::aggregate::Order;
use super::commands::{
    CancelOrder, ChangeStatus, EditOrder, InitLedger, OrderCommand, QueryOrder, SubmitOrder,
};
use super::errors::ChaincodeError;

// ============================================================================
// Order Chaincode
// ============================================================================
//
// Orchestrates: (function, args) → OrderCommand → ledger read/write
//
// One invocation maps to at most one read and one write on a single key.
// No state is kept between invocations.
//
// ============================================================================

pub struct OrderChaincode {
    config: ChaincodeConfig,
    metrics: Option<Arc<Metrics>>,
}

/// JSON description of a queried order, also written to the log.
#[derive(Debug, Serialize)]
struct QuerySummary<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Order", skip_serializing_if = "Option::is_none")]
    order: Option<Cow<'a, str>>,
    #[serde(rename = "Customer Id", skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
}

impl OrderChaincode {
    pub fn new(config: ChaincodeConfig) -> Self {
        Self { config, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Host entry points
    // ------------------------------------------------------------------------

    /// Store the single argument under the bootstrap key.
    pub fn init<S>(&self, stub: &mut S, function: &str, args: &[String]) -> Result<Vec<u8>, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::debug!(function = %function, arg_count = args.len(), "Init called");

        let result = InitLedger::resolve(args).and_then(|init| {
            let key = self.config.bootstrap_key.as_str();
            self.put(stub, key, init.value.as_bytes())?;
            tracing::info!(key = %key, "Ledger initialized");
            Ok(Vec::new())
        });

        self.record("init", "init", &result);
        result
    }

    /// Resolve and run a mutating function.
    pub fn invoke<S>(&self, stub: &mut S, function: &str, args: &[String]) -> Result<Vec<u8>, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::debug!(function = %function, arg_count = args.len(), "Invoke called");

        let command = match OrderCommand::resolve(&self.config, function, args) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(function = %function, error = %e, "Invoke rejected");
                self.record_outcome("invoke", "unresolved", false);
                return Err(e);
            }
        };

        let name = command.name();
        let key = command.key().to_string();
        let result = self.handle(stub, command);
        if let Err(e) = &result {
            tracing::warn!(function = %name, order_id = %key, error = %e, "Invoke failed");
        }
        self.record("invoke", name, &result);
        result
    }

    /// Read one order. Only the function name `query` is served.
    pub fn query<S>(&self, stub: &S, function: &str, args: &[String]) -> Result<Vec<u8>, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::debug!(function = %function, arg_count = args.len(), "Query called");

        let result = QueryOrder::resolve(function, args).and_then(|query| self.query_order(stub, &query));
        if let Err(e) = &result {
            tracing::warn!(function = %function, error = %e, "Query failed");
        }

        self.record("query", "query", &result);
        result
    }

    /// Execute an already resolved command.
    pub fn handle<S>(&self, stub: &mut S, command: OrderCommand) -> Result<Vec<u8>, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        match command {
            OrderCommand::SubmitOrder(cmd) => self.submit_order(stub, cmd),
            OrderCommand::EditOrder(cmd) => self.edit_order(stub, cmd),
            OrderCommand::ChangeStatus(cmd) => self.change_status(stub, cmd),
            OrderCommand::CancelOrder(cmd) => self.cancel_order(stub, cmd),
        }?;
        Ok(Vec::new())
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    fn submit_order<S>(&self, stub: &mut S, cmd: SubmitOrder) -> Result<(), ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::info!(
            order_id = %cmd.key,
            item_count = cmd.items_id.len(),
            customer_id = %cmd.customer_id,
            "Submitting order"
        );

        let order = Order::issue(cmd.id, cmd.items_id, cmd.customer_id);
        self.store(stub, &cmd.key, &order)
    }

    fn edit_order<S>(&self, stub: &mut S, cmd: EditOrder) -> Result<(), ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::info!(order_id = %cmd.key, item_count = cmd.items_id.len(), "Editing order items");

        let mut order = self.load_for_update(stub, &cmd.key)?;
        order.replace_items(cmd.items_id);
        self.store(stub, &cmd.key, &order)
    }

    fn change_status<S>(&self, stub: &mut S, cmd: ChangeStatus) -> Result<(), ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::info!(order_id = %cmd.key, status = %cmd.status, "Changing order status");
        if !cmd.status.is_recognized() {
            tracing::warn!(order_id = %cmd.key, status = %cmd.status, "Storing status outside the known set");
        }

        let mut order = self.load_for_update(stub, &cmd.key)?;
        order.change_status(cmd.status);
        self.store(stub, &cmd.key, &order)
    }

    fn cancel_order<S>(&self, stub: &mut S, cmd: CancelOrder) -> Result<(), ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        tracing::info!(order_id = %cmd.key, "Cancelling order");

        let result = stub.del_state(&cmd.key);
        self.record_ledger("del_state", result.is_ok());
        result.map_err(|source| ChaincodeError::StateDelete { key: cmd.key, source })
    }

    fn query_order<S>(&self, stub: &S, query: &QueryOrder) -> Result<Vec<u8>, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        let key = query.key.as_str();

        let bytes = match self.get(stub, key)? {
            Some(bytes) => bytes,
            // The lifecycle dialect never checked for absence.
            None if self.config.api_version == ApiVersion::V2 && self.config.is_legacy() => Vec::new(),
            None => return Err(ChaincodeError::NilValue { key: key.to_string() }),
        };

        let summary = self.summarize(key, &bytes)?;
        tracing::debug!(order_id = %key, response = %String::from_utf8_lossy(&summary), "Query response");

        Ok(match self.config.query_response {
            QueryResponse::Raw => bytes,
            QueryResponse::Summary => summary,
        })
    }

    /// V1 embeds the stored bytes, V2 decodes them and names the customer.
    fn summarize(&self, key: &str, bytes: &[u8]) -> Result<Vec<u8>, ChaincodeError> {
        let summary = match self.config.api_version {
            ApiVersion::V1 => QuerySummary {
                name: key,
                order: Some(String::from_utf8_lossy(bytes)),
                customer_id: None,
            },
            ApiVersion::V2 => {
                let order = self.decode(key, bytes)?;
                QuerySummary {
                    name: key,
                    order: None,
                    customer_id: Some(order.customer_id.to_string()),
                }
            }
        };

        serde_json::to_vec(&summary).map_err(|source| ChaincodeError::Serialization {
            key: key.to_string(),
            source,
        })
    }

    // ------------------------------------------------------------------------
    // Ledger helpers
    // ------------------------------------------------------------------------

    /// Read an order that is about to be modified.
    ///
    /// Strict mode refuses absent or undecodable records. Legacy mode
    /// carries on with a zero-valued order, which is then written back.
    fn load_for_update<S>(&self, stub: &S, key: &str) -> Result<Order, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        match self.get(stub, key)? {
            Some(bytes) => self.decode(key, &bytes),
            None if self.config.is_legacy() => {
                tracing::warn!(order_id = %key, "Order not found, continuing with empty order");
                Ok(Order::default())
            }
            None => Err(ChaincodeError::NilValue { key: key.to_string() }),
        }
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> Result<Order, ChaincodeError> {
        match Order::from_bytes(bytes) {
            Ok(order) => Ok(order),
            Err(e) if self.config.is_legacy() => {
                tracing::warn!(order_id = %key, error = %e, "Stored order is unreadable, continuing with empty order");
                Ok(Order::default())
            }
            Err(source) => Err(ChaincodeError::Deserialization { key: key.to_string(), source }),
        }
    }

    fn store<S>(&self, stub: &mut S, key: &str, order: &Order) -> Result<(), ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        let bytes = order.to_bytes().map_err(|source| ChaincodeError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.put(stub, key, &bytes)
    }

    fn get<S>(&self, stub: &S, key: &str) -> Result<Option<Vec<u8>>, ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        let result = stub.get_state(key);
        self.record_ledger("get_state", result.is_ok());
        result.map_err(|source| ChaincodeError::StateRead { key: key.to_string(), source })
    }

    fn put<S>(&self, stub: &mut S, key: &str, value: &[u8]) -> Result<(), ChaincodeError>
    where
        S: ChaincodeStub + ?Sized,
    {
        let result = stub.put_state(key, value);
        self.record_ledger("put_state", result.is_ok());
        result.map_err(|source| ChaincodeError::StateWrite { key: key.to_string(), source })
    }

    // ------------------------------------------------------------------------
    // Metrics
    // ------------------------------------------------------------------------

    fn record(&self, kind: &str, function: &str, result: &Result<Vec<u8>, ChaincodeError>) {
        if let Err(e) = result {
            tracing::debug!(kind = %kind, function = %function, error_kind = e.kind(), "Invocation failed");
        }
        self.record_outcome(kind, function, result.is_ok());
    }

    fn record_outcome(&self, kind: &str, function: &str, success: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_invocation(kind, function, success);
        }
    }

    fn record_ledger(&self, operation: &str, success: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_ledger_operation(operation, success);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Compatibility;
    use crate::domain::order::{CustomerId, OrderStatus};
    use crate::ledger::MemLedger;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn stored(ledger: &MemLedger, key: &str) -> Order {
        Order::from_bytes(ledger.get(key).expect("key present")).unwrap()
    }

    fn v2() -> OrderChaincode {
        OrderChaincode::new(ChaincodeConfig::v2())
    }

    fn v2_legacy() -> OrderChaincode {
        OrderChaincode::new(ChaincodeConfig::legacy(ApiVersion::V2))
    }

    fn submit(cc: &OrderChaincode, ledger: &mut MemLedger, id: &str, items: &str, customer: &str) {
        cc.invoke(ledger, "submitOrder", &args(&[id, items, customer])).unwrap();
    }

    // ---- init ----

    #[test]
    fn test_init_writes_bootstrap_key() {
        let mut ledger = MemLedger::new();
        let out = v2().init(&mut ledger, "init", &args(&["hello"])).unwrap();

        assert!(out.is_empty());
        assert_eq!(ledger.get("hello_world"), Some(&b"hello"[..]));
    }

    #[test]
    fn test_init_uses_configured_key() {
        let mut ledger = MemLedger::new();
        let cc = OrderChaincode::new(ChaincodeConfig::v1().with_bootstrap_key("genesis"));
        cc.init(&mut ledger, "", &args(&["x"])).unwrap();
        assert!(ledger.contains("genesis"));
    }

    #[test]
    fn test_init_wrong_arity_writes_nothing() {
        let mut ledger = MemLedger::new();
        let err = v2().init(&mut ledger, "init", &args(&["a", "b"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::InvalidArgumentCount { expected: 1, actual: 2, .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_init_write_failure() {
        let mut ledger = MemLedger::new();
        ledger.fail_writes(true);
        let err = v2().init(&mut ledger, "init", &args(&["a"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::StateWrite { .. }));
    }

    // ---- submit / query ----

    #[test]
    fn test_submit_then_query_recovers_items() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a,b,c", "42");

        let bytes = cc.query(&ledger, "query", &args(&["1"])).unwrap();
        let order = Order::from_bytes(&bytes).unwrap();
        assert_eq!(order.items_id, args(&["a", "b", "c"]));
        assert_eq!(order.id, 1);
        assert_eq!(order.customer_id, CustomerId::Text("42".to_string()));
        assert_eq!(order.status, OrderStatus::Issued);
    }

    #[test]
    fn test_v1_write_then_query() {
        let cc = OrderChaincode::new(ChaincodeConfig::v1());
        let mut ledger = MemLedger::new();
        cc.invoke(&mut ledger, "write", &args(&["5", "x,y"])).unwrap();

        let order = Order::from_bytes(&cc.query(&ledger, "query", &args(&["5"])).unwrap()).unwrap();
        assert_eq!(order.items_id, args(&["x", "y"]));
        assert_eq!(order.customer_id, CustomerId::Number(0));
        assert_eq!(order.status, OrderStatus::Issued);
    }

    #[test]
    fn test_submit_overwrites_existing_order() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c1");
        cc.invoke(&mut ledger, "changeStatus", &args(&["1", "Shipped"])).unwrap();
        submit(&cc, &mut ledger, "1", "b", "c2");

        let order = stored(&ledger, "1");
        assert_eq!(order.items_id, args(&["b"]));
        assert_eq!(order.status, OrderStatus::Issued);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_submit_write_failure() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        ledger.fail_writes(true);
        let err = cc.invoke(&mut ledger, "submitorder", &args(&["1", "a", "c"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::StateWrite { ref key, .. } if key == "1"));
    }

    #[test]
    fn test_submit_invalid_id_strict_writes_nothing() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        let err = cc.invoke(&mut ledger, "submitorder", &args(&["one", "a", "c"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::InvalidOrderId(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_submit_invalid_id_legacy_stores_zero_under_raw_key() {
        let cc = v2_legacy();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "one", "a", "c");
        assert_eq!(stored(&ledger, "one").id, 0);
    }

    // ---- edit / change status ----

    #[test]
    fn test_edit_preserves_other_fields() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a,b", "42");
        cc.invoke(&mut ledger, "changestatus", &args(&["1", "ArrivedToPO"])).unwrap();
        let before = stored(&ledger, "1");

        cc.invoke(&mut ledger, "editOrder", &args(&["1", "z"])).unwrap();
        let after = stored(&ledger, "1");

        assert_eq!(after.items_id, args(&["z"]));
        assert_eq!(after.id, before.id);
        assert_eq!(after.customer_id, before.customer_id);
        assert_eq!(after.status, before.status);
    }

    #[test]
    fn test_change_status_preserves_other_fields() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a,b", "42");
        let before = stored(&ledger, "1");

        cc.invoke(&mut ledger, "changeStatus", &args(&["1", "Finished"])).unwrap();
        let after = stored(&ledger, "1");

        assert_eq!(after.status, OrderStatus::Finished);
        assert_eq!(after.items_id, before.items_id);
        assert_eq!(after.customer_id, before.customer_id);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn test_edit_missing_order_strict() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        let err = cc.invoke(&mut ledger, "editorder", &args(&["9", "a"])).unwrap_err();
        assert!(err.is_not_found());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_edit_missing_order_legacy_writes_zero_order() {
        let cc = v2_legacy();
        let mut ledger = MemLedger::new();
        cc.invoke(&mut ledger, "editorder", &args(&["9", "a"])).unwrap();

        let order = stored(&ledger, "9");
        assert_eq!(order.id, 0);
        assert_eq!(order.items_id, args(&["a"]));
        assert_eq!(order.customer_id, CustomerId::default());
        assert_eq!(order.status.as_str(), "");
    }

    #[test]
    fn test_change_status_corrupt_record() {
        let mut ledger = MemLedger::new();
        ledger.insert("3", "garbage");

        let err = v2().invoke(&mut ledger, "changestatus", &args(&["3", "Shipped"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::Deserialization { .. }));
        assert_eq!(ledger.get("3"), Some(&b"garbage"[..]));

        v2_legacy().invoke(&mut ledger, "changestatus", &args(&["3", "Shipped"])).unwrap();
        let order = stored(&ledger, "3");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.id, 0);
    }

    #[test]
    fn test_change_status_legacy_accepts_any_string() {
        let cc = v2_legacy();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");
        cc.invoke(&mut ledger, "changestatus", &args(&["1", "with courier"])).unwrap();

        assert_eq!(stored(&ledger, "1").status.as_str(), "with courier");

        // A strict handler can still edit the record without losing the status.
        v2().invoke(&mut ledger, "editorder", &args(&["1", "b"])).unwrap();
        assert_eq!(stored(&ledger, "1").status.as_str(), "with courier");
    }

    #[test]
    fn test_edit_record_with_null_items_keeps_other_fields() {
        let record = r#"{"Id":1,"ItemsId":null,"CustomerId":"cust","Status":"Shipped"}"#;

        for cc in [v2(), v2_legacy()] {
            let mut ledger = MemLedger::new();
            ledger.insert("1", record);

            cc.invoke(&mut ledger, "editorder", &args(&["1", "a"])).unwrap();
            let order = stored(&ledger, "1");
            assert_eq!(order.id, 1);
            assert_eq!(order.items_id, args(&["a"]));
            assert_eq!(order.customer_id, CustomerId::Text("cust".to_string()));
            assert_eq!(order.status, OrderStatus::Shipped);
        }
    }

    #[test]
    fn test_change_status_and_query_record_with_null_items() {
        let cc = OrderChaincode::new(ChaincodeConfig::v2().with_query_response(QueryResponse::Summary));
        let mut ledger = MemLedger::new();
        ledger.insert("1", r#"{"Id":1,"ItemsId":null,"CustomerId":"cust","Status":"Shipped"}"#);

        let out = cc.query(&ledger, "query", &args(&["1"])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"Name":"1","Customer Id":"cust"}"#);

        cc.invoke(&mut ledger, "changestatus", &args(&["1", "Finished"])).unwrap();
        let order = stored(&ledger, "1");
        assert_eq!(order.status, OrderStatus::Finished);
        assert_eq!(order.customer_id, CustomerId::Text("cust".to_string()));
        assert!(order.items_id.is_empty());
    }

    #[test]
    fn test_edit_read_failure() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");
        ledger.fail_reads(true);

        let err = cc.invoke(&mut ledger, "editorder", &args(&["1", "b"])).unwrap_err();
        assert_eq!(err.to_json_payload(), r#"{"Error":"Failed to get state for 1"}"#);
    }

    // ---- cancel ----

    #[test]
    fn test_cancel_then_query_reports_absence() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");
        cc.invoke(&mut ledger, "cancelOrder", &args(&["1"])).unwrap();

        let err = cc.query(&ledger, "query", &args(&["1"])).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_json_payload(), r#"{"Error":"Nil amount for 1"}"#);
    }

    #[test]
    fn test_v1_delete_then_query_nil_value_even_in_legacy() {
        let cc = OrderChaincode::new(ChaincodeConfig::legacy(ApiVersion::V1));
        let mut ledger = MemLedger::new();
        cc.invoke(&mut ledger, "write", &args(&["1", "a"])).unwrap();
        cc.invoke(&mut ledger, "delete", &args(&["1"])).unwrap();

        let err = cc.query(&ledger, "query", &args(&["1"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::NilValue { .. }));
    }

    #[test]
    fn test_v2_legacy_query_of_missing_key_is_empty() {
        let cc = v2_legacy();
        let ledger = MemLedger::new();
        let out = cc.query(&ledger, "query", &args(&["404"])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_cancel_delete_failure() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");
        ledger.fail_deletes(true);

        let err = cc.invoke(&mut ledger, "cancelorder", &args(&["1"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::StateDelete { .. }));
        assert!(ledger.contains("1"));
    }

    // ---- query ----

    #[test]
    fn test_query_requires_exact_name() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");

        let err = cc.query(&ledger, "QUERY", &args(&["1"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::UnknownFunction(_)));
    }

    #[test]
    fn test_query_read_failure() {
        let mut ledger = MemLedger::new();
        ledger.fail_reads(true);
        let err = v2().query(&ledger, "query", &args(&["1"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::StateRead { .. }));
    }

    #[test]
    fn test_query_corrupt_record_strict_vs_legacy() {
        let mut ledger = MemLedger::new();
        ledger.insert("1", "{not json");

        let err = v2().query(&ledger, "query", &args(&["1"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::Deserialization { .. }));

        let out = v2_legacy().query(&ledger, "query", &args(&["1"])).unwrap();
        assert_eq!(out, b"{not json".to_vec());
    }

    #[test]
    fn test_v1_query_returns_raw_bytes_without_decoding() {
        let cc = OrderChaincode::new(ChaincodeConfig::v1());
        let mut ledger = MemLedger::new();
        cc.init(&mut ledger, "init", &args(&["bootstrap"])).unwrap();

        let out = cc.query(&ledger, "query", &args(&["hello_world"])).unwrap();
        assert_eq!(out, b"bootstrap".to_vec());
    }

    #[test]
    fn test_query_summary_v2() {
        let cc = OrderChaincode::new(ChaincodeConfig::v2().with_query_response(QueryResponse::Summary));
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "cust-7");

        let out = cc.query(&ledger, "query", &args(&["1"])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"{"Name":"1","Customer Id":"cust-7"}"#);
    }

    #[test]
    fn test_query_summary_v1_embeds_order() {
        let cc = OrderChaincode::new(ChaincodeConfig::v1().with_query_response(QueryResponse::Summary));
        let mut ledger = MemLedger::new();
        ledger.insert("1", "raw");

        let out = cc.query(&ledger, "query", &args(&["1"])).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json, serde_json::json!({ "Name": "1", "Order": "raw" }));
    }

    // ---- dispatch ----

    #[test]
    fn test_unknown_function_mutates_nothing() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");
        let snapshot = ledger.clone();

        for name in ["query", "init", "transfer", "write"] {
            let err = cc.invoke(&mut ledger, name, &args(&["1", "b"])).unwrap_err();
            assert!(matches!(err, ChaincodeError::UnknownFunction(_)), "{name}");
        }
        assert_eq!(ledger.get("1"), snapshot.get("1"));
        assert_eq!(ledger.len(), snapshot.len());
    }

    #[test]
    fn test_wrong_arity_mutates_nothing() {
        let cc = v2();
        let mut ledger = MemLedger::new();
        submit(&cc, &mut ledger, "1", "a", "c");
        let before = ledger.get("1").map(<[u8]>::to_vec);

        for (name, given) in [("submitorder", 2), ("editorder", 1), ("changestatus", 3), ("cancelorder", 2)] {
            let err = cc.invoke(&mut ledger, name, &vec!["1".to_string(); given]).unwrap_err();
            assert!(matches!(err, ChaincodeError::InvalidArgumentCount { .. }), "{name}");
        }
        assert_eq!(ledger.get("1").map(<[u8]>::to_vec), before);
    }

    #[test]
    fn test_order_lifecycle_scenario() {
        let cc = v2().with_metrics(Arc::new(Metrics::new().unwrap()));
        let mut ledger = MemLedger::new();

        submit(&cc, &mut ledger, "1", "a,b,c", "42");
        let order = stored(&ledger, "1");
        assert_eq!(order.items_id, args(&["a", "b", "c"]));
        assert_eq!(order.status, OrderStatus::Issued);

        cc.invoke(&mut ledger, "ChangeStatus", &args(&["1", "Shipped"])).unwrap();
        let queried = Order::from_bytes(&cc.query(&ledger, "query", &args(&["1"])).unwrap()).unwrap();
        assert_eq!(queried.status, OrderStatus::Shipped);

        cc.invoke(&mut ledger, "CancelOrder", &args(&["1"])).unwrap();
        assert!(cc.query(&ledger, "query", &args(&["1"])).unwrap_err().is_not_found());
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let cc = OrderChaincode::new(ChaincodeConfig::v2().with_compatibility(Compatibility::Strict))
            .with_metrics(metrics.clone());
        let mut ledger = MemLedger::new();

        submit(&cc, &mut ledger, "1", "a", "c");
        let _ = cc.invoke(&mut ledger, "nope", &args(&[]));
        let _ = cc.query(&ledger, "query", &args(&["2"]));

        assert_eq!(metrics.invocation_count("invoke", "submitOrder", true), 1);
        assert_eq!(metrics.invocation_count("invoke", "unresolved", false), 1);
        assert_eq!(metrics.invocation_count("query", "query", false), 1);
        assert_eq!(metrics.ledger_operation_count("put_state", true), 1);
        assert_eq!(metrics.ledger_operation_count("get_state", true), 1);
    }
}
