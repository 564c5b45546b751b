use std::fmt;
use std::str::FromStr;

// ============================================================================
// Chaincode Configuration
// ============================================================================
//
// Selects which of the two chaincode dialects is served and whether the
// historical decoding/parsing quirks are reproduced.
//
// ============================================================================

pub const DEFAULT_BOOTSTRAP_KEY: &str = "hello_world";

pub const ENV_API_VERSION: &str = "ORDER_CC_API_VERSION";
pub const ENV_COMPAT: &str = "ORDER_CC_COMPAT";
pub const ENV_BOOTSTRAP_KEY: &str = "ORDER_CC_BOOTSTRAP_KEY";
pub const ENV_QUERY_RESPONSE: &str = "ORDER_CC_QUERY_RESPONSE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var} (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Function-name dialect served by the handler.
///
/// - `V1`: `write` / `delete`, numeric customer ids, names matched exactly.
/// - `V2`: `submitOrder` / `editOrder` / `changeStatus` / `cancelOrder`,
///   free-form customer ids, names matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

/// How absent or malformed input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// Unparseable ids, unknown statuses, absent and corrupt records are
    /// reported as errors before any field is touched.
    #[default]
    Strict,
    /// Reproduces the deployed chaincode: ids that fail to parse become `0`,
    /// undecodable records become a zero-valued order, any status string
    /// is accepted.
    Legacy,
}

/// Shape of a successful query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryResponse {
    /// The stored order bytes, untouched.
    #[default]
    Raw,
    /// A small JSON object naming the key and the order data.
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeConfig {
    pub api_version: ApiVersion,
    pub compatibility: Compatibility,
    /// Key written by `init`.
    pub bootstrap_key: String,
    pub query_response: QueryResponse,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::default(),
            compatibility: Compatibility::default(),
            bootstrap_key: DEFAULT_BOOTSTRAP_KEY.to_string(),
            query_response: QueryResponse::default(),
        }
    }
}

impl ChaincodeConfig {
    /// `write` / `delete` dialect with strict checking
    pub fn v1() -> Self {
        Self {
            api_version: ApiVersion::V1,
            ..Self::default()
        }
    }

    /// Order lifecycle dialect with strict checking
    pub fn v2() -> Self {
        Self {
            api_version: ApiVersion::V2,
            ..Self::default()
        }
    }

    /// Behaves exactly like the deployed chaincode of the given version
    pub fn legacy(api_version: ApiVersion) -> Self {
        Self {
            api_version,
            compatibility: Compatibility::Legacy,
            ..Self::default()
        }
    }

    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }

    pub fn with_query_response(mut self, query_response: QueryResponse) -> Self {
        self.query_response = query_response;
        self
    }

    pub fn with_bootstrap_key(mut self, key: impl Into<String>) -> Self {
        self.bootstrap_key = key.into();
        self
    }

    pub fn is_legacy(&self) -> bool {
        self.compatibility == Compatibility::Legacy
    }

    /// Load configuration from `ORDER_CC_*` environment variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_API_VERSION) {
            config.api_version = value.parse()?;
        }
        if let Some(value) = lookup(ENV_COMPAT) {
            config.compatibility = value.parse()?;
        }
        if let Some(value) = lookup(ENV_QUERY_RESPONSE) {
            config.query_response = value.parse()?;
        }
        if let Some(value) = lookup(ENV_BOOTSTRAP_KEY) {
            if value.is_empty() {
                return Err(ConfigError::Empty(ENV_BOOTSTRAP_KEY));
            }
            config.bootstrap_key = value;
        }

        Ok(config)
    }
}

// ============================================================================
// Parsing
// ============================================================================

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_API_VERSION,
                value: s.to_string(),
                expected: "v1, v2",
            }),
        }
    }
}

impl FromStr for Compatibility {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "legacy" => Ok(Self::Legacy),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_COMPAT,
                value: s.to_string(),
                expected: "strict, legacy",
            }),
        }
    }
}

impl FromStr for QueryResponse {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "summary" => Ok(Self::Summary),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_QUERY_RESPONSE,
                value: s.to_string(),
                expected: "raw, summary",
            }),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
