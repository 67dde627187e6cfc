//! SBI Error Types
//!
//! Error types for NF profile construction and NRF request assembly

use thiserror::Error;

use crate::types::NfType;

/// Error classes of the build layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// A trusted collaborator broke an invariant (missing id, unknown info type)
    Contract,
    /// The deployed configuration cannot produce a valid profile
    Configuration,
    /// The operation failed while producing its output
    Resource,
}

/// SBI Error type
#[derive(Error, Debug)]
pub enum SbiError {
    /// Required identifier absent or empty
    #[error("Missing identifier: {0}")]
    MissingIdentifier(&'static str),

    /// NF service without a service name
    #[error("NF service [{0}] has no service name")]
    MissingServiceName(String),

    /// Two NF services sharing one service instance id
    #[error("Duplicate NF service id [{0}]")]
    DuplicateServiceId(String),

    /// NF service without any API version
    #[error("NF service [{0}] has no API version")]
    MissingVersion(String),

    /// Address stored in the wrong family list
    #[error("Address {addr} is not {expected}")]
    AddressFamilyMismatch {
        addr: std::net::SocketAddr,
        expected: &'static str,
    },

    /// NF info block whose wire shape is not defined
    #[error("Not implemented NF-type[{0}]")]
    UnsupportedNfInfo(NfType),

    /// Service type has no target NF type
    #[error("No target NF type for service [{0}]")]
    NoTargetNfType(String),

    /// No local server to build a callback URI from
    #[error("No SBI server endpoint configured")]
    NoServerEndpoint,

    /// SMF info declares no network slice
    #[error("CHECK CONFIGURATION: No S-NSSAI")]
    NoSnssai,

    /// Network slice declared without DNN
    #[error("CHECK CONFIGURATION: No DNN for S-NSSAI[SST:{sst} SD:{sd}]")]
    NoDnn { sst: u8, sd: String },

    /// TAI range declared without start/end pairs
    #[error("CHECK CONFIGURATION: No Start/End in TacRange[{index}]")]
    NoTacRange { index: usize },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SbiError {
    /// Classify this error
    pub fn tier(&self) -> ErrorTier {
        match self {
            Self::MissingIdentifier(_)
            | Self::MissingServiceName(_)
            | Self::MissingVersion(_)
            | Self::DuplicateServiceId(_)
            | Self::AddressFamilyMismatch { .. }
            | Self::UnsupportedNfInfo(_)
            | Self::NoTargetNfType(_)
            | Self::NoServerEndpoint => ErrorTier::Contract,
            Self::NoSnssai
            | Self::NoDnn { .. }
            | Self::NoTacRange { .. }
            | Self::Config(_)
            | Self::Yaml(_)
            | Self::IoError(_) => ErrorTier::Configuration,
            Self::SerializationError(_) => ErrorTier::Resource,
        }
    }

    /// Errors the caller must not retry without fixing configuration or code
    pub fn is_fatal(&self) -> bool {
        !matches!(self.tier(), ErrorTier::Resource)
    }
}

/// Result type for SBI operations
pub type SbiResult<T> = Result<T, SbiError>;
