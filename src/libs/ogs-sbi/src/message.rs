//! SBI Message Structures
//!
//! The generic request envelope filled in by the NRF builders, the
//! discovery option, and `build_request()` which turns a borrowed
//! [`SbiMessage`] into an owned [`SbiRequest`].

use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{content_type, header, limits, param};
use crate::context::{Guami, NrTai, SNssai};
use crate::conv::{self, PlmnId};
use crate::error::SbiResult;
use crate::openapi::{GuamiWire, NfProfile, PatchItem, Snssai, SubscriptionData, Tai};
use crate::types::NfType;

/// SBI Header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbiHeader {
    /// HTTP method (GET, POST, PUT, DELETE, PATCH)
    pub method: String,
    /// Path part of the URI: /{service}/{version}/{resource...}
    pub uri: String,
    pub service_name: Option<String>,
    pub api_version: Option<String>,
    /// Resource path components
    pub resource: Vec<String>,
}

impl SbiHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource component
    pub fn add_resource(&mut self, component: impl Into<String>) {
        if self.resource.len() < limits::MAX_NUM_OF_RESOURCE_COMPONENT {
            self.resource.push(component.into());
        }
    }

    /// Build the resource path from components
    pub fn resource_path(&self) -> String {
        self.resource.join("/")
    }
}

/// Query parameters, headers and body of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbiHttpMessage {
    pub params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub content: Option<String>,
}

impl SbiHttpMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get_param(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn get_header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    pub fn content_length(&self) -> usize {
        self.content.as_ref().map(|c| c.len()).unwrap_or(0)
    }
}

/// SBI Request - the envelope handed to the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbiRequest {
    pub header: SbiHeader,
    pub http: SbiHttpMessage,
}

impl SbiRequest {
    pub fn method(&self) -> &str {
        &self.header.method
    }

    pub fn uri(&self) -> &str {
        &self.header.uri
    }

    /// Body parsed back as JSON, for inspection
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.http
            .content
            .as_deref()
            .and_then(|c| serde_json::from_str(c).ok())
    }
}

/// Discovery Option - filters for NF discovery and profile service lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbiDiscoveryOption {
    pub target_nf_instance_id: Option<String>,
    pub requester_nf_instance_id: Option<String>,
    pub service_names: Vec<String>,
    pub snssais: Vec<SNssai>,
    pub dnn: Option<String>,
    pub tai: Option<NrTai>,
    pub guami: Option<Guami>,
    pub target_plmn_list: Vec<PlmnId>,
    pub requester_plmn_list: Vec<PlmnId>,
    pub requester_features: u64,
    pub hnrf_uri: Option<String>,
}

impl SbiDiscoveryOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_nf_instance_id(mut self, id: impl Into<String>) -> Self {
        self.target_nf_instance_id = Some(id.into());
        self
    }

    pub fn with_requester_nf_instance_id(mut self, id: impl Into<String>) -> Self {
        self.requester_nf_instance_id = Some(id.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_names.push(name.into());
        self
    }

    pub fn with_snssai(mut self, s_nssai: SNssai) -> Self {
        self.snssais.push(s_nssai);
        self
    }

    pub fn with_dnn(mut self, dnn: impl Into<String>) -> Self {
        self.dnn = Some(dnn.into());
        self
    }

    pub fn with_tai(mut self, tai: NrTai) -> Self {
        self.tai = Some(tai);
        self
    }

    pub fn with_requester_features(mut self, features: u64) -> Self {
        self.requester_features = features;
        self
    }

    /// Exact, case-sensitive service name match
    pub fn has_service_name(&self, name: &str) -> bool {
        self.service_names.iter().any(|n| n == name)
    }
}

/// Body of an outgoing message, borrowed until serialized
#[derive(Debug, Clone, Copy)]
pub enum SbiBody<'a> {
    NfProfile(&'a NfProfile),
    PatchItemList(&'a [PatchItem]),
    SubscriptionData(&'a SubscriptionData),
}

impl SbiBody<'_> {
    fn to_json(self) -> serde_json::Result<String> {
        match self {
            Self::NfProfile(profile) => serde_json::to_string(profile),
            Self::PatchItemList(items) => serde_json::to_string(items),
            Self::SubscriptionData(data) => serde_json::to_string(data),
        }
    }
}

/// Query parameters of an outgoing message
#[derive(Debug, Clone, Copy, Default)]
pub struct SbiMessageParams<'a> {
    pub target_nf_type: Option<NfType>,
    pub requester_nf_type: Option<NfType>,
    pub discovery_option: Option<&'a SbiDiscoveryOption>,
}

/// Outgoing message description consumed by [`build_request`]
#[derive(Debug, Clone, Default)]
pub struct SbiMessage<'a> {
    pub method: &'a str,
    pub service_name: &'a str,
    pub api_version: &'a str,
    pub resource: Vec<&'a str>,
    pub param: SbiMessageParams<'a>,
    pub body: Option<SbiBody<'a>>,
    /// Overrides application/json
    pub content_type: Option<&'a str>,
    pub content_encoding: Option<&'a str>,
}

/// Build an owned request envelope from a message description
pub fn build_request(message: &SbiMessage<'_>) -> SbiResult<SbiRequest> {
    let mut request = SbiRequest::default();

    request.header.method = message.method.to_string();
    request.header.service_name = Some(message.service_name.to_string());
    request.header.api_version = Some(message.api_version.to_string());
    for component in &message.resource {
        request.header.add_resource(*component);
    }

    let mut uri = format!("/{}/{}", message.service_name, message.api_version);
    for component in &request.header.resource {
        uri.push('/');
        uri.push_str(component);
    }
    request.header.uri = uri;

    if let Some(nf_type) = message.param.target_nf_type {
        request.http.set_param(param::TARGET_NF_TYPE, nf_type.to_str());
    }
    if let Some(nf_type) = message.param.requester_nf_type {
        request.http.set_param(param::REQUESTER_NF_TYPE, nf_type.to_str());
    }
    if let Some(discovery_option) = message.param.discovery_option {
        add_discovery_params(&mut request.http, discovery_option)?;
    }

    if let Some(body) = message.body {
        request.http.set_content(body.to_json()?);
        request.http.set_header(
            header::CONTENT_TYPE,
            message.content_type.unwrap_or(content_type::APPLICATION_JSON),
        );
        if let Some(encoding) = message.content_encoding {
            request.http.set_header(header::CONTENT_ENCODING, encoding);
        }
    }

    log::debug!("[{}] {}", request.header.method, request.header.uri);

    Ok(request)
}

fn json_param<T: Serialize + ?Sized>(value: &T) -> SbiResult<String> {
    Ok(serde_json::to_string(value)?)
}

fn snssai_wire(s_nssai: &SNssai) -> Snssai {
    Snssai {
        sst: s_nssai.sst,
        sd: conv::s_nssai_sd_to_string(s_nssai.sd),
    }
}

fn add_discovery_params(
    http: &mut SbiHttpMessage,
    discovery_option: &SbiDiscoveryOption,
) -> SbiResult<()> {
    if let Some(id) = &discovery_option.target_nf_instance_id {
        http.set_param(param::TARGET_NF_INSTANCE_ID, id);
    }
    if let Some(id) = &discovery_option.requester_nf_instance_id {
        http.set_param(param::REQUESTER_NF_INSTANCE_ID, id);
    }
    if !discovery_option.service_names.is_empty() {
        http.set_param(param::SERVICE_NAMES, discovery_option.service_names.join(","));
    }
    if !discovery_option.snssais.is_empty() {
        let snssais: Vec<Snssai> = discovery_option.snssais.iter().map(snssai_wire).collect();
        http.set_param(param::SNSSAIS, json_param(&snssais)?);
    }
    if let Some(dnn) = &discovery_option.dnn {
        http.set_param(param::DNN, dnn);
    }
    if let Some(tai) = &discovery_option.tai {
        let tai = Tai {
            plmn_id: conv::build_plmn_id(&tai.plmn_id),
            tac: conv::uint24_to_0string(tai.tac),
        };
        http.set_param(param::TAI, json_param(&tai)?);
    }
    if let Some(guami) = &discovery_option.guami {
        let guami = GuamiWire {
            plmn_id: conv::build_plmn_id(&guami.plmn_id),
            amf_id: conv::uint24_to_0string(guami.amf_id),
        };
        http.set_param(param::GUAMI, json_param(&guami)?);
    }
    if !discovery_option.target_plmn_list.is_empty() {
        let list: Vec<_> = discovery_option
            .target_plmn_list
            .iter()
            .map(conv::build_plmn_id)
            .collect();
        http.set_param(param::TARGET_PLMN_LIST, json_param(&list)?);
    }
    if !discovery_option.requester_plmn_list.is_empty() {
        let list: Vec<_> = discovery_option
            .requester_plmn_list
            .iter()
            .map(conv::build_plmn_id)
            .collect();
        http.set_param(param::REQUESTER_PLMN_LIST, json_param(&list)?);
    }
    if discovery_option.requester_features != 0 {
        http.set_param(
            param::REQUESTER_FEATURES,
            conv::uint64_to_string(discovery_option.requester_features),
        );
    }
    if let Some(hnrf_uri) = &discovery_option.hnrf_uri {
        http.set_param(param::HNRF_URI, hnrf_uri);
    }

    Ok(())
}
