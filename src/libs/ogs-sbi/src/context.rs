//! SBI Context
//!
//! The local NF instance snapshot the builders read from, and the explicit
//! context value handed to every request assembler.

use std::net::SocketAddr;

use crate::constants::{api, service};
use crate::conv::PlmnId;
use crate::types::{NfServiceStatus, NfStatus, NfType, UriScheme};

/// S-NSSAI (Single Network Slice Selection Assistance Information)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SNssai {
    /// Slice/Service Type
    pub sst: u8,
    /// Slice Differentiator, 24 bits
    pub sd: Option<u32>,
}

impl SNssai {
    pub fn new(sst: u8, sd: Option<u32>) -> Self {
        Self { sst, sd }
    }
}

/// 5GS Tracking Area Identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NrTai {
    pub plmn_id: PlmnId,
    /// 24-bit TAC
    pub tac: u32,
}

/// GUAMI (Globally Unique AMF Identifier)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guami {
    pub plmn_id: PlmnId,
    /// AMF region, set and pointer packed in 24 bits
    pub amf_id: u32,
}

/// One API version of an NF service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfServiceVersion {
    /// e.g. "v1"
    pub in_uri: String,
    /// e.g. "1.0.0"
    pub full: String,
    pub expiry: Option<String>,
}

impl NfServiceVersion {
    pub fn new(in_uri: impl Into<String>, full: impl Into<String>) -> Self {
        Self {
            in_uri: in_uri.into(),
            full: full.into(),
            expiry: None,
        }
    }
}

/// One endpoint of an NF service; emitted only if an address is present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfServiceAddr {
    pub ipv4: Option<SocketAddr>,
    pub ipv6: Option<SocketAddr>,
    pub port: u16,
}

/// NF service record of the local instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfService {
    /// Service instance id
    pub id: String,
    /// Service name, e.g. "nsmf-pdusession"
    pub name: String,
    pub versions: Vec<NfServiceVersion>,
    pub scheme: UriScheme,
    pub status: NfServiceStatus,
    pub fqdn: Option<String>,
    pub addr: Vec<NfServiceAddr>,
    pub allowed_nf_types: Vec<NfType>,
    pub priority: u16,
    pub capacity: u16,
    pub load: u8,
}

impl NfService {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            versions: vec![NfServiceVersion::new(api::V1, "1.0.0")],
            scheme: UriScheme::Http,
            status: NfServiceStatus::Registered,
            fqdn: None,
            addr: Vec::new(),
            allowed_nf_types: Vec::new(),
            priority: 0,
            capacity: 100,
            load: 0,
        }
    }
}

/// Network slice served by an SMF, with its DNNs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmfSlice {
    pub s_nssai: SNssai,
    pub dnn: Vec<String>,
}

/// Tracking area range: one PLMN, TAC start/end pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NrTaiRange {
    pub plmn_id: PlmnId,
    /// (start, end) TAC pairs
    pub tac_range: Vec<(u32, u32)>,
}

/// SMF capability data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmfInfoConf {
    pub slice: Vec<SmfSlice>,
    pub nr_tai: Vec<NrTai>,
    pub nr_tai_range: Vec<NrTaiRange>,
}

/// NF-type specific capability record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NfInfo {
    Smf(SmfInfoConf),
    /// A block for an NF type whose wire format is not built here
    Other(NfType),
}

impl NfInfo {
    pub fn nf_type(&self) -> NfType {
        match self {
            Self::Smf(_) => NfType::Smf,
            Self::Other(nf_type) => *nf_type,
        }
    }
}

/// NF Instance - the local instance snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfInstance {
    /// NF Instance ID (UUID)
    pub id: String,
    pub nf_type: NfType,
    pub nf_status: NfStatus,
    pub fqdn: Option<String>,
    /// Heartbeat interval in seconds, 0 = none
    pub heartbeat_interval: u32,
    pub priority: u16,
    pub capacity: u16,
    pub load: u8,
    pub ipv4: Vec<SocketAddr>,
    pub ipv6: Vec<SocketAddr>,
    pub allowed_nf_types: Vec<NfType>,
    pub services: Vec<NfService>,
    pub info: Vec<NfInfo>,
}

impl NfInstance {
    pub fn new(id: impl Into<String>, nf_type: NfType) -> Self {
        Self {
            id: id.into(),
            nf_type,
            nf_status: NfStatus::Registered,
            fqdn: None,
            heartbeat_interval: 0,
            priority: 0,
            capacity: 100,
            load: 0,
            ipv4: Vec::new(),
            ipv6: Vec::new(),
            allowed_nf_types: Vec::new(),
            services: Vec::new(),
            info: Vec::new(),
        }
    }

    pub fn add_service(&mut self, service: NfService) {
        self.services.push(service);
    }

    pub fn find_service(&self, name: &str) -> Option<&NfService> {
        self.services.iter().find(|s| s.name == name)
    }
}

/// Condition of a status subscription
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscrCondition {
    /// Watch instances of this NF type
    pub nf_type: Option<NfType>,
}

/// NF status subscription toward the NRF
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfSubscription {
    /// Subscription id assigned by the NRF
    pub id: Option<String>,
    pub req_nf_type: Option<NfType>,
    pub req_nf_instance_id: Option<String>,
    pub subscr_cond: SubscrCondition,
    pub requester_features: u64,
}

/// Local SBI server endpoint, source of callback URIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    pub scheme: UriScheme,
    /// Host name or IP literal
    pub host: String,
    pub port: u16,
}

impl ServerEndpoint {
    pub fn new(scheme: UriScheme, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
        }
    }

    pub fn from_addr(scheme: UriScheme, addr: SocketAddr) -> Self {
        Self::new(scheme, addr.ip().to_string(), addr.port())
    }

    /// Absolute URI of a resource served under `service`/`version`
    pub fn uri(&self, service_name: &str, api_version: &str, resource: &[&str]) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        let mut uri = format!(
            "{}://{}:{}/{}/{}",
            self.scheme, host, self.port, service_name, api_version
        );
        for component in resource {
            uri.push('/');
            uri.push_str(component);
        }
        uri
    }
}

/// SBI Context - explicit state passed to every NRF builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbiContext {
    /// Self NF instance
    pub nf_instance: NfInstance,
    /// Local servers; the first one receives notifications
    pub servers: Vec<ServerEndpoint>,
    /// Content-Encoding applied to registration bodies
    pub content_encoding: Option<String>,
}

impl SbiContext {
    pub fn new(nf_instance: NfInstance) -> Self {
        Self {
            nf_instance,
            servers: Vec::new(),
            content_encoding: None,
        }
    }

    pub fn with_server(mut self, server: ServerEndpoint) -> Self {
        self.servers.push(server);
        self
    }

    pub fn first_server(&self) -> Option<&ServerEndpoint> {
        self.servers.first()
    }

    /// Callback URI for NF status notifications
    pub fn nf_status_notify_uri(&self) -> Option<String> {
        self.first_server().map(|server| {
            server.uri(
                service::NNRF_NFM,
                api::V1,
                &[crate::constants::resource::NF_STATUS_NOTIFY],
            )
        })
    }
}
