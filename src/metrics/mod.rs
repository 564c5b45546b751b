use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus counters for chaincode activity
// ============================================================================
//
// - Invocations by entry point, function and outcome
// - Ledger primitive calls by operation and outcome
//
// Function labels come from the resolved command, never from raw input, so
// label cardinality stays bounded.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub invocations_total: IntCounterVec,
    pub ledger_operations_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let invocations_total = IntCounterVec::new(
            Opts::new("chaincode_invocations_total", "Total chaincode invocations"),
            &["kind", "function", "outcome"],
        )?;
        registry.register(Box::new(invocations_total.clone()))?;

        let ledger_operations_total = IntCounterVec::new(
            Opts::new("ledger_operations_total", "Total ledger state accessor calls"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(ledger_operations_total.clone()))?;

        Ok(Self {
            registry,
            invocations_total,
            ledger_operations_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_invocation(&self, kind: &str, function: &str, success: bool) {
        self.invocations_total
            .with_label_values(&[kind, function, outcome(success)])
            .inc();
    }

    pub fn record_ledger_operation(&self, operation: &str, success: bool) {
        self.ledger_operations_total
            .with_label_values(&[operation, outcome(success)])
            .inc();
    }

    pub fn invocation_count(&self, kind: &str, function: &str, success: bool) -> u64 {
        self.invocations_total
            .with_label_values(&[kind, function, outcome(success)])
            .get()
    }

    pub fn ledger_operation_count(&self, operation: &str, success: bool) -> u64 {
        self.ledger_operations_total
            .with_label_values(&[operation, outcome(success)])
            .get()
    }

    /// Text exposition format of everything registered.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

fn outcome(success: bool) -> &'static str {
    if success { "ok" } else { "error" }
}
