//! NextGCore SBI (Service Based Interface) Library
//!
//! NF profile construction and NRF request assembly for 5G core network
//! functions. The builders turn the local NF instance snapshot held in an
//! [`SbiContext`] into TS 29.510 JSON bodies and fill in a transport
//! independent [`SbiRequest`]; sending it is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use ogs_sbi::{nnrf_build, NfInstance, NfType, SbiContext};
//!
//! let ctx = SbiContext::new(NfInstance::new("nf-inst-1", NfType::Amf));
//! let request = nnrf_build::build_register(&ctx).unwrap();
//!
//! assert_eq!(request.header.method, "PUT");
//! assert_eq!(request.header.uri, "/nnrf-nfm/v1/nf-instances/nf-inst-1");
//! ```
//!
//! # Modules
//!
//! - [`types`] - NF types, statuses and the service name table
//! - [`constants`] - methods, resource names, content types, feature bits
//! - [`conv`] - scalar converters (IP, TAC, SD, PLMN ID)
//! - [`context`] - local NF instance snapshot and [`SbiContext`]
//! - [`openapi`] - wire model of the NFProfile and related bodies
//! - [`message`] - request envelope and discovery option
//! - [`nnrf_build`] - profile builder, teardown and NRF request assemblers
//! - [`config`] - YAML configuration of the local instance
//! - [`error`] - Error types

pub mod config;
pub mod constants;
pub mod context;
pub mod conv;
pub mod error;
pub mod message;
pub mod nnrf_build;
pub mod openapi;
pub mod types;


// Re-export commonly used types
pub use config::SbiConf;
pub use context::{
    Guami, NfInfo, NfInstance, NfService, NfSubscription, NrTai, NrTaiRange, SNssai, SbiContext,
    ServerEndpoint, SmfInfoConf, SmfSlice,
};
pub use conv::PlmnId;
pub use error::{ErrorTier, SbiError, SbiResult};
pub use message::{SbiDiscoveryOption, SbiHeader, SbiHttpMessage, SbiRequest};
pub use nnrf_build::{build_nf_profile, free_nf_profile, ReleaseTally};
pub use openapi::{Collapsed, NfProfile, NfServiceCollection};
pub use types::{NfServiceStatus, NfStatus, NfType, SbiServiceType, UriScheme};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_roundtrip() {
        let service_type = SbiServiceType::NnrfNfm;
        let name = service_type.to_name();
        let parsed = SbiServiceType::from_name(name);
        assert_eq!(parsed, Some(service_type));
    }

    #[test]
    fn test_build_assemble_free_cycle() {
        let mut instance = NfInstance::new("nf-inst-1", NfType::Smf);
        instance.add_service(NfService::new("1", "nsmf-pdusession"));
        let ctx = SbiContext::new(instance);

        let profile = build_nf_profile(&ctx.nf_instance, None, 0).unwrap();
        let body = serde_json::to_value(&profile).unwrap();
        assert_eq!(body["nfServices"][0]["serviceName"], "nsmf-pdusession");

        let tally = free_nf_profile(profile);
        assert_eq!(tally.services, 1);

        let request = nnrf_build::build_register(&ctx).unwrap();
        assert_eq!(request.json_body().unwrap()["nfServiceList"]["1"]["serviceInstanceId"], "1");
    }
}
