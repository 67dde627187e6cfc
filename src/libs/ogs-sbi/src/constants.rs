//! SBI Constants
//!
//! HTTP methods, resource names, content types and discovery parameters
//! used by the NRF builders.

/// HTTP Methods
pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const PATCH: &str = "PATCH";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

/// API Versions
pub mod api {
    pub const V1: &str = "v1";
}

/// Service Names
pub mod service {
    pub const NNRF_NFM: &str = "nnrf-nfm";
    pub const NNRF_DISC: &str = "nnrf-disc";
}

/// Resource Names
pub mod resource {
    pub const NF_INSTANCES: &str = "nf-instances";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const NF_STATUS_NOTIFY: &str = "nf-status-notify";
}

/// HTTP Headers
pub mod header {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_ENCODING: &str = "Content-Encoding";
}

/// Content Types
pub mod content_type {
    pub const APPLICATION_JSON: &str = "application/json";
    pub const APPLICATION_PATCH_JSON: &str = "application/json-patch+json";
}

/// Query Parameters
pub mod param {
    pub const TARGET_NF_TYPE: &str = "target-nf-type";
    pub const REQUESTER_NF_TYPE: &str = "requester-nf-type";
    pub const TARGET_NF_INSTANCE_ID: &str = "target-nf-instance-id";
    pub const REQUESTER_NF_INSTANCE_ID: &str = "requester-nf-instance-id";
    pub const SERVICE_NAMES: &str = "service-names";
    pub const TARGET_PLMN_LIST: &str = "target-plmn-list";
    pub const REQUESTER_PLMN_LIST: &str = "requester-plmn-list";
    pub const REQUESTER_FEATURES: &str = "requester-features";
    pub const DNN: &str = "dnn";
    pub const SNSSAIS: &str = "snssais";
    pub const TAI: &str = "tai";
    pub const GUAMI: &str = "guami";
    pub const HNRF_URI: &str = "hnrf-uri";
}

/// Patch paths
pub mod patch_path {
    pub const NF_STATUS: &str = "/nfStatus";
}

/// Maximum values
pub mod limits {
    pub const MAX_NUM_OF_RESOURCE_COMPONENT: usize = 8;
}

/// Supported feature numbers, 1-based as in the 3GPP feature tables
pub mod features {
    /// Nnrf_NFManagement: nfServiceList keyed by serviceInstanceId
    pub const NNRF_NFM_SERVICE_MAP: u32 = 1;

    fn bit(n: u32) -> u64 {
        n.checked_sub(1)
            .and_then(|shift| 1u64.checked_shl(shift))
            .unwrap_or(0)
    }

    /// Set feature `n` in `features`; numbers outside 1..=64 are ignored
    pub fn set(features: &mut u64, n: u32) {
        *features |= bit(n);
    }

    /// Test feature `n` in `features`
    pub fn is_set(features: u64, n: u32) -> bool {
        features & bit(n) != 0
    }
}
