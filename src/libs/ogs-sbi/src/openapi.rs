//! OpenAPI wire model for Nnrf_NFManagement
//!
//! The JSON shapes of TS 29.510 that the NRF builders emit. Optional
//! collections are never serialized empty. Two fields of `NfProfile` change
//! their wire name with their shape:
//!
//! - services: `nfServices` (array) or `nfServiceList` (object keyed by
//!   serviceInstanceId), see [`NfServiceCollection`]
//! - SMF info: `smfInfo` (single object) or `smfInfoList` (object keyed
//!   "1".."N"), see [`Collapsed`]

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::types::{NfServiceStatus, NfStatus, NfType, UriScheme};

/// String-keyed map that serializes in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> OrderedMap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or replace, keeping the first insertion position
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for OrderedMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Wire field names of a cardinality-collapsed block
pub trait CollapsedField {
    /// Field used when exactly one entry exists
    const ONE: &'static str;
    /// Field used when two or more entries exist
    const MANY: &'static str;
}

/// A block emitted as nothing, a single value, or an ordinal-keyed map
#[derive(Debug, Clone, PartialEq)]
pub enum Collapsed<T> {
    Empty,
    One(T),
    Many(OrderedMap<T>),
}

impl<T> Collapsed<T> {
    /// Collapse by cardinality; `Many` keys are "1", "2", ... in order
    pub fn from_vec(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => Self::Empty,
            1 => match items.pop() {
                Some(item) => Self::One(item),
                None => Self::Empty,
            },
            _ => {
                let mut map = OrderedMap::new();
                for (i, item) in items.into_iter().enumerate() {
                    map.insert((i + 1).to_string(), item);
                }
                Self::Many(map)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in build order
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Empty => Vec::new(),
            Self::One(item) => vec![item],
            Self::Many(map) => map.into_iter().map(|(_, v)| v).collect(),
        }
    }
}

impl<T> Default for Collapsed<T> {
    fn default() -> Self {
        Self::Empty
    }
}

// Serialized as a map fragment so that `#[serde(flatten)]` merges it into
// the enclosing object.
impl<T: Serialize + CollapsedField> Serialize for Collapsed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len().min(1)))?;
        match self {
            Self::Empty => {}
            Self::One(item) => map.serialize_entry(T::ONE, item)?,
            Self::Many(items) => map.serialize_entry(T::MANY, items)?,
        }
        map.end()
    }
}

/// NF service collection in one of its two wire shapes
#[derive(Debug, Clone, PartialEq)]
pub enum NfServiceCollection {
    /// `nfServices`: plain array
    List(Vec<NfService>),
    /// `nfServiceList`: keyed by serviceInstanceId
    Map(OrderedMap<NfService>),
}

impl NfServiceCollection {
    pub fn len(&self) -> usize {
        match self {
            Self::List(list) => list.len(),
            Self::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Services in build order, whatever the shape
    pub fn services(&self) -> Vec<&NfService> {
        match self {
            Self::List(list) => list.iter().collect(),
            Self::Map(map) => map.values().collect(),
        }
    }
}

impl Serialize for NfServiceCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::List(list) => map.serialize_entry("nfServices", list)?,
            Self::Map(services) => map.serialize_entry("nfServiceList", services)?,
        }
        map.end()
    }
}

/// NFProfile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfProfile {
    pub nf_instance_id: String,
    pub nf_type: NfType,
    pub nf_status: NfStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_beat_timer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv4_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv6_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_nf_types: Vec<NfType>,
    pub priority: u16,
    pub capacity: u16,
    pub load: u8,
    pub nf_profile_changes_support_ind: bool,
    #[serde(flatten)]
    pub services: Option<NfServiceCollection>,
    #[serde(flatten)]
    pub smf_info: Collapsed<SmfInfo>,
}

/// NFService
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfService {
    pub service_instance_id: String,
    pub service_name: String,
    pub versions: Vec<NfServiceVersion>,
    pub scheme: UriScheme,
    pub nf_service_status: NfServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_end_points: Vec<IpEndPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_nf_types: Vec<NfType>,
    pub priority: u16,
    pub capacity: u16,
    pub load: u8,
}

/// NFServiceVersion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfServiceVersion {
    pub api_version_in_uri: String,
    pub api_full_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
}

/// IpEndPoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpEndPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    pub port: u16,
}

/// SmfInfo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmfInfo {
    pub s_nssai_smf_info_list: Vec<SnssaiSmfInfoItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tai_list: Vec<Tai>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tai_range_list: Vec<TaiRange>,
}

impl CollapsedField for SmfInfo {
    const ONE: &'static str = "smfInfo";
    const MANY: &'static str = "smfInfoList";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnssaiSmfInfoItem {
    pub s_nssai: Snssai,
    pub dnn_smf_info_list: Vec<DnnSmfInfoItem>,
}

/// Snssai
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snssai {
    pub sst: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnnSmfInfoItem {
    pub dnn: String,
}

/// Tai
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tai {
    pub plmn_id: PlmnIdWire,
    pub tac: String,
}

/// TaiRange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaiRange {
    pub plmn_id: PlmnIdWire,
    pub tac_range_list: Vec<TacRange>,
}

/// TacRange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacRange {
    pub start: String,
    pub end: String,
}

/// PlmnId as carried in JSON
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlmnIdWire {
    pub mcc: String,
    pub mnc: String,
}

/// Guami as carried in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuamiWire {
    pub plmn_id: PlmnIdWire,
    pub amf_id: String,
}

/// SubscriptionData
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionData {
    pub nf_status_notification_uri: String,
    pub req_nf_type: NfType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_nf_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscr_cond: Option<SubscrCond>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_features: Option<String>,
}

/// SubscriptionData.subscrCond, NfTypeCond variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscrCond {
    pub nf_type: NfType,
}

/// JSON Patch operation (RFC 6902)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    Add,
    Copy,
    Move,
    Remove,
    Replace,
    Test,
}

/// PatchItem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchItem {
    pub op: PatchOperation,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl PatchItem {
    pub fn replace(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            op: PatchOperation::Replace,
            path: path.into(),
            from: None,
            value: Some(value),
        }
    }
}
