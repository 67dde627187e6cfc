//! NRF Message Building
//!
//! Builds the NFProfile of the local instance and assembles the
//! Nnrf_NFManagement / Nnrf_NFDiscovery requests sent to the NRF.
//!
//! A profile lives for one build, assemble and release cycle: every
//! assembler that carries a profile builds it, serializes it through
//! [`build_request`], and hands it to [`free_nf_profile`] before returning,
//! on the error path as well.

use std::fmt;
use std::net::SocketAddr;

use crate::constants::{api, content_type, features, method, patch_path, resource, service};
use crate::context::{self, NfInfo, NfInstance, NfSubscription, SbiContext, SmfInfoConf};
use crate::conv;
use crate::error::{SbiError, SbiResult};
use crate::message::{build_request, SbiBody, SbiDiscoveryOption, SbiMessage, SbiMessageParams, SbiRequest};
use crate::openapi::{
    Collapsed, DnnSmfInfoItem, IpEndPoint, NfProfile, NfService, NfServiceCollection,
    NfServiceVersion, OrderedMap, PatchItem, PlmnIdWire, SmfInfo, Snssai, SnssaiSmfInfoItem,
    SubscrCond, SubscriptionData, Tai, TaiRange, TacRange,
};
use crate::types::{NfStatus, SbiServiceType};

// ============================================================================
// Profile builder
// ============================================================================

/// Build the NFProfile of `nf_instance`
///
/// With a discovery option naming services, only those services are
/// emitted (exact, case-sensitive match, original order kept). The
/// NNRF_NFM SERVICE_MAP bit of `supported_features` selects the
/// `nfServiceList` shape over `nfServices`.
pub fn build_nf_profile(
    nf_instance: &NfInstance,
    discovery_option: Option<&SbiDiscoveryOption>,
    supported_features: u64,
) -> SbiResult<NfProfile> {
    if nf_instance.id.is_empty() {
        return Err(SbiError::MissingIdentifier("nf_instance.id"));
    }

    log::trace!("[{}] build_nf_profile()", nf_instance.id);
    log::trace!(
        "NF-Type[{}] NF-Status[{}] IPv4[{}] IPv6[{}]",
        nf_instance.nf_type,
        nf_instance.nf_status,
        nf_instance.ipv4.len(),
        nf_instance.ipv6.len()
    );

    let ipv4_addresses = build_addresses(&nf_instance.ipv4, "IPv4", SocketAddr::is_ipv4)?;
    let ipv6_addresses = build_addresses(&nf_instance.ipv6, "IPv6", SocketAddr::is_ipv6)?;

    let services = build_nf_services(nf_instance, discovery_option, supported_features)?;

    let mut smf_infos = Vec::new();
    for nf_info in &nf_instance.info {
        match nf_info {
            NfInfo::Smf(smf) => smf_infos.push(build_smf_info(smf)?),
            NfInfo::Other(nf_type) => {
                let err = SbiError::UnsupportedNfInfo(*nf_type);
                log::error!("{}", err);
                return Err(err);
            }
        }
    }

    Ok(NfProfile {
        nf_instance_id: nf_instance.id.clone(),
        nf_type: nf_instance.nf_type,
        nf_status: nf_instance.nf_status,
        heart_beat_timer: (nf_instance.heartbeat_interval != 0)
            .then_some(nf_instance.heartbeat_interval),
        fqdn: nf_instance.fqdn.clone(),
        ipv4_addresses,
        ipv6_addresses,
        allowed_nf_types: nf_instance.allowed_nf_types.clone(),
        priority: nf_instance.priority,
        capacity: nf_instance.capacity,
        load: nf_instance.load,
        nf_profile_changes_support_ind: true,
        services,
        smf_info: Collapsed::from_vec(smf_infos),
    })
}

fn build_addresses(
    addrs: &[SocketAddr],
    expected: &'static str,
    is_family: fn(&SocketAddr) -> bool,
) -> SbiResult<Vec<String>> {
    addrs
        .iter()
        .map(|addr| {
            log::trace!("{} [{}]", expected, addr);
            if is_family(addr) {
                Ok(conv::ipstr(addr))
            } else {
                Err(SbiError::AddressFamilyMismatch {
                    addr: *addr,
                    expected,
                })
            }
        })
        .collect()
}

fn build_nf_services(
    nf_instance: &NfInstance,
    discovery_option: Option<&SbiDiscoveryOption>,
    supported_features: u64,
) -> SbiResult<Option<NfServiceCollection>> {
    let filter = discovery_option.filter(|option| !option.service_names.is_empty());
    let service_map = features::is_set(supported_features, features::NNRF_NFM_SERVICE_MAP);

    let mut list = Vec::new();
    let mut map = OrderedMap::new();
    let mut ids: Vec<&str> = Vec::new();

    for nf_service in &nf_instance.services {
        if let Some(option) = filter {
            if nf_service.name.is_empty() || !option.has_service_name(&nf_service.name) {
                continue;
            }
        }

        let service = build_nf_service(nf_service)?;
        if ids.contains(&nf_service.id.as_str()) {
            let err = SbiError::DuplicateServiceId(nf_service.id.clone());
            log::error!("{}", err);
            return Err(err);
        }
        ids.push(&nf_service.id);

        if service_map {
            map.insert(nf_service.id.clone(), service);
        } else {
            list.push(service);
        }
    }

    let services = if service_map {
        NfServiceCollection::Map(map)
    } else {
        NfServiceCollection::List(list)
    };

    Ok((!services.is_empty()).then_some(services))
}

/// Build the wire NFService of one local service record
pub fn build_nf_service(nf_service: &context::NfService) -> SbiResult<NfService> {
    if nf_service.id.is_empty() {
        return Err(SbiError::MissingIdentifier("nf_service.id"));
    }
    if nf_service.name.is_empty() {
        return Err(SbiError::MissingServiceName(nf_service.id.clone()));
    }
    if nf_service.versions.is_empty() {
        return Err(SbiError::MissingVersion(nf_service.name.clone()));
    }

    let versions = nf_service
        .versions
        .iter()
        .map(|version| NfServiceVersion {
            api_version_in_uri: version.in_uri.clone(),
            api_full_version: version.full.clone(),
            expiry: version.expiry.clone(),
        })
        .collect();

    let ip_end_points = nf_service
        .addr
        .iter()
        .filter(|addr| addr.ipv4.is_some() || addr.ipv6.is_some())
        .map(|addr| IpEndPoint {
            ipv4_address: addr.ipv4.as_ref().map(conv::ipstr),
            ipv6_address: addr.ipv6.as_ref().map(conv::ipstr),
            port: addr.port,
        })
        .collect();

    Ok(NfService {
        service_instance_id: nf_service.id.clone(),
        service_name: nf_service.name.clone(),
        versions,
        scheme: nf_service.scheme,
        nf_service_status: nf_service.status,
        fqdn: nf_service.fqdn.clone(),
        ip_end_points,
        allowed_nf_types: nf_service.allowed_nf_types.clone(),
        priority: nf_service.priority,
        capacity: nf_service.capacity,
        load: nf_service.load,
    })
}

/// Build the wire SmfInfo of one SMF capability record
pub fn build_smf_info(smf: &SmfInfoConf) -> SbiResult<SmfInfo> {
    if smf.slice.is_empty() {
        let err = SbiError::NoSnssai;
        log::error!("{}", err);
        return Err(err);
    }

    let mut s_nssai_smf_info_list = Vec::with_capacity(smf.slice.len());
    for slice in &smf.slice {
        if slice.dnn.is_empty() {
            let err = SbiError::NoDnn {
                sst: slice.s_nssai.sst,
                sd: conv::uint24_to_0string(slice.s_nssai.sd.unwrap_or(conv::S_NSSAI_NO_SD_VALUE)),
            };
            log::error!("{}", err);
            return Err(err);
        }

        s_nssai_smf_info_list.push(SnssaiSmfInfoItem {
            s_nssai: Snssai {
                sst: slice.s_nssai.sst,
                sd: conv::s_nssai_sd_to_string(slice.s_nssai.sd),
            },
            dnn_smf_info_list: slice
                .dnn
                .iter()
                .map(|dnn| DnnSmfInfoItem { dnn: dnn.clone() })
                .collect(),
        });
    }

    let tai_list = smf
        .nr_tai
        .iter()
        .map(|tai| Tai {
            plmn_id: conv::build_plmn_id(&tai.plmn_id),
            tac: conv::uint24_to_0string(tai.tac),
        })
        .collect();

    let mut tai_range_list = Vec::with_capacity(smf.nr_tai_range.len());
    for (index, range) in smf.nr_tai_range.iter().enumerate() {
        if range.tac_range.is_empty() {
            let err = SbiError::NoTacRange { index };
            log::error!("{}", err);
            return Err(err);
        }

        tai_range_list.push(TaiRange {
            plmn_id: conv::build_plmn_id(&range.plmn_id),
            tac_range_list: range
                .tac_range
                .iter()
                .map(|&(start, end)| TacRange {
                    start: conv::uint24_to_0string(start),
                    end: conv::uint24_to_0string(end),
                })
                .collect(),
        });
    }

    Ok(SmfInfo {
        s_nssai_smf_info_list,
        tai_list,
        tai_range_list,
    })
}

// ============================================================================
// Mirror teardown
// ============================================================================

/// Counts of what [`free_nf_profile`] released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseTally {
    pub strings: usize,
    pub services: usize,
    pub versions: usize,
    pub endpoints: usize,
    pub nf_infos: usize,
    pub slices: usize,
    pub dnns: usize,
    pub tais: usize,
    pub tai_ranges: usize,
    pub tac_ranges: usize,
}

impl ReleaseTally {
    fn string(&mut self, value: String) {
        self.strings += 1;
        drop(value);
    }

    fn opt_string(&mut self, value: Option<String>) {
        if let Some(value) = value {
            self.string(value);
        }
    }

    fn plmn_id(&mut self, plmn_id: PlmnIdWire) {
        self.string(plmn_id.mcc);
        self.string(plmn_id.mnc);
    }
}

impl fmt::Display for ReleaseTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "strings[{}] services[{}] versions[{}] endpoints[{}] nf-infos[{}] \
             slices[{}] dnns[{}] tais[{}] tai-ranges[{}] tac-ranges[{}]",
            self.strings,
            self.services,
            self.versions,
            self.endpoints,
            self.nf_infos,
            self.slices,
            self.dnns,
            self.tais,
            self.tai_ranges,
            self.tac_ranges
        )
    }
}

/// Release a built profile, walking the same shapes the builder produced
pub fn free_nf_profile(profile: NfProfile) -> ReleaseTally {
    let mut tally = ReleaseTally::default();

    let NfProfile {
        nf_instance_id,
        fqdn,
        ipv4_addresses,
        ipv6_addresses,
        allowed_nf_types,
        services,
        smf_info,
        ..
    } = profile;

    let id = nf_instance_id.clone();
    tally.string(nf_instance_id);
    tally.opt_string(fqdn);
    for addr in ipv4_addresses.into_iter().chain(ipv6_addresses) {
        tally.string(addr);
    }
    drop(allowed_nf_types);

    match services {
        Some(NfServiceCollection::List(list)) => {
            for service in list {
                free_nf_service(service, &mut tally);
            }
        }
        Some(NfServiceCollection::Map(map)) => {
            for (key, service) in map {
                tally.string(key);
                free_nf_service(service, &mut tally);
            }
        }
        None => {}
    }

    match smf_info {
        Collapsed::Empty => {}
        Collapsed::One(info) => free_smf_info(info, &mut tally),
        Collapsed::Many(map) => {
            for (key, info) in map {
                tally.string(key);
                free_smf_info(info, &mut tally);
            }
        }
    }

    log::trace!("[{}] free_nf_profile() {}", id, tally);

    tally
}

fn free_nf_service(service: NfService, tally: &mut ReleaseTally) {
    let NfService {
        service_instance_id,
        service_name,
        versions,
        fqdn,
        ip_end_points,
        allowed_nf_types,
        ..
    } = service;

    tally.services += 1;
    tally.string(service_instance_id);
    tally.string(service_name);

    for version in versions {
        tally.versions += 1;
        tally.string(version.api_version_in_uri);
        tally.string(version.api_full_version);
        tally.opt_string(version.expiry);
    }

    for end_point in ip_end_points {
        tally.endpoints += 1;
        tally.opt_string(end_point.ipv4_address);
        tally.opt_string(end_point.ipv6_address);
    }

    drop(allowed_nf_types);
    tally.opt_string(fqdn);
}

fn free_smf_info(info: SmfInfo, tally: &mut ReleaseTally) {
    tally.nf_infos += 1;

    for item in info.s_nssai_smf_info_list {
        tally.slices += 1;
        for dnn in item.dnn_smf_info_list {
            tally.dnns += 1;
            tally.string(dnn.dnn);
        }
        tally.opt_string(item.s_nssai.sd);
    }

    for tai in info.tai_list {
        tally.tais += 1;
        tally.plmn_id(tai.plmn_id);
        tally.string(tai.tac);
    }

    for range in info.tai_range_list {
        tally.tai_ranges += 1;
        tally.plmn_id(range.plmn_id);
        for tac_range in range.tac_range_list {
            tally.tac_ranges += 1;
            tally.string(tac_range.start);
            tally.string(tac_range.end);
        }
    }
}

// ============================================================================
// Nnrf_NFManagement
// ============================================================================

fn nf_instance_id(ctx: &SbiContext) -> SbiResult<&str> {
    match ctx.nf_instance.id.as_str() {
        "" => Err(SbiError::MissingIdentifier("nf_instance.id")),
        id => Ok(id),
    }
}

/// NFRegister: PUT /nnrf-nfm/v1/nf-instances/{nfInstanceId}
pub fn build_register(ctx: &SbiContext) -> SbiResult<SbiRequest> {
    let id = nf_instance_id(ctx)?;

    let mut supported_features = 0;
    features::set(&mut supported_features, features::NNRF_NFM_SERVICE_MAP);

    let profile = build_nf_profile(&ctx.nf_instance, None, supported_features)?;

    let request = build_request(&SbiMessage {
        method: method::PUT,
        service_name: service::NNRF_NFM,
        api_version: api::V1,
        resource: vec![resource::NF_INSTANCES, id],
        body: Some(SbiBody::NfProfile(&profile)),
        content_encoding: ctx.content_encoding.as_deref(),
        ..Default::default()
    });

    free_nf_profile(profile);

    request
}

/// NFUpdate: PATCH /nnrf-nfm/v1/nf-instances/{nfInstanceId}
///
/// Body is a single JSON patch replacing `/nfStatus` with REGISTERED.
pub fn build_update(ctx: &SbiContext) -> SbiResult<SbiRequest> {
    let id = nf_instance_id(ctx)?;

    let items = [PatchItem::replace(
        patch_path::NF_STATUS,
        serde_json::Value::String(NfStatus::Registered.to_str().to_string()),
    )];

    let message = SbiMessage {
        method: method::PATCH,
        service_name: service::NNRF_NFM,
        api_version: api::V1,
        resource: vec![resource::NF_INSTANCES, id],
        body: Some(SbiBody::PatchItemList(&items)),
        content_type: Some(content_type::APPLICATION_PATCH_JSON),
        ..Default::default()
    };

    build_request(&message)
}

/// NFDeregister: DELETE /nnrf-nfm/v1/nf-instances/{nfInstanceId}
pub fn build_de_register(ctx: &SbiContext) -> SbiResult<SbiRequest> {
    let id = nf_instance_id(ctx)?;

    let message = SbiMessage {
        method: method::DELETE,
        service_name: service::NNRF_NFM,
        api_version: api::V1,
        resource: vec![resource::NF_INSTANCES, id],
        ..Default::default()
    };

    build_request(&message)
}

/// NFStatusSubscribe: POST /nnrf-nfm/v1/subscriptions
pub fn build_status_subscribe(
    ctx: &SbiContext,
    subscription: &NfSubscription,
) -> SbiResult<SbiRequest> {
    let req_nf_type = subscription
        .req_nf_type
        .ok_or(SbiError::MissingIdentifier("subscription.req_nf_type"))?;

    let nf_status_notification_uri = ctx
        .nf_status_notify_uri()
        .ok_or(SbiError::NoServerEndpoint)?;

    let mut requester_features = subscription.requester_features;
    features::set(&mut requester_features, features::NNRF_NFM_SERVICE_MAP);

    let subscription_data = SubscriptionData {
        nf_status_notification_uri,
        req_nf_type,
        req_nf_instance_id: subscription.req_nf_instance_id.clone(),
        subscr_cond: subscription
            .subscr_cond
            .nf_type
            .map(|nf_type| SubscrCond { nf_type }),
        requester_features: Some(conv::uint64_to_string(requester_features)),
    };

    let message = SbiMessage {
        method: method::POST,
        service_name: service::NNRF_NFM,
        api_version: api::V1,
        resource: vec![resource::SUBSCRIPTIONS],
        body: Some(SbiBody::SubscriptionData(&subscription_data)),
        ..Default::default()
    };

    build_request(&message)
}

/// NFStatusUnSubscribe: DELETE /nnrf-nfm/v1/subscriptions/{subscriptionId}
pub fn build_status_unsubscribe(subscription: &NfSubscription) -> SbiResult<SbiRequest> {
    let id = subscription
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(SbiError::MissingIdentifier("subscription.id"))?;

    let message = SbiMessage {
        method: method::DELETE,
        service_name: service::NNRF_NFM,
        api_version: api::V1,
        resource: vec![resource::SUBSCRIPTIONS, id],
        ..Default::default()
    };

    build_request(&message)
}

/// NFProfileRetrieval: GET /nnrf-nfm/v1/nf-instances/{nfInstanceId}
pub fn build_profile_retrieve(nf_instance_id: &str) -> SbiResult<SbiRequest> {
    if nf_instance_id.is_empty() {
        return Err(SbiError::MissingIdentifier("nf_instance_id"));
    }

    let message = SbiMessage {
        method: method::GET,
        service_name: service::NNRF_NFM,
        api_version: api::V1,
        resource: vec![resource::NF_INSTANCES, nf_instance_id],
        ..Default::default()
    };

    build_request(&message)
}

// ============================================================================
// Nnrf_NFDiscovery
// ============================================================================

/// NFDiscover: GET /nnrf-disc/v1/nf-instances?target-nf-type=..&requester-nf-type=..
pub fn build_discover(
    ctx: &SbiContext,
    service_type: SbiServiceType,
    discovery_option: Option<&SbiDiscoveryOption>,
) -> SbiResult<SbiRequest> {
    let target_nf_type = service_type
        .to_nf_type()
        .ok_or_else(|| SbiError::NoTargetNfType(service_type.to_string()))?;

    let message = SbiMessage {
        method: method::GET,
        service_name: service::NNRF_DISC,
        api_version: api::V1,
        resource: vec![resource::NF_INSTANCES],
        param: SbiMessageParams {
            target_nf_type: Some(target_nf_type),
            requester_nf_type: Some(ctx.nf_instance.nf_type),
            discovery_option,
        },
        ..Default::default()
    };

    build_request(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::header;
    use crate::context::{
        NfServiceAddr, NfServiceVersion as LocalVersion, NrTai, NrTaiRange, SNssai,
        ServerEndpoint, SmfSlice, SubscrCondition,
    };
    use crate::conv::PlmnId;
    use crate::types::{NfType, UriScheme};
    use serde_json::json;

    fn service(id: &str, name: &str) -> context::NfService {
        let mut service = context::NfService::new(id, name);
        service.addr.push(NfServiceAddr {
            ipv4: Some("127.0.0.4:7777".parse().unwrap()),
            ipv6: None,
            port: 7777,
        });
        service
    }

    fn smf_conf(dnns: &[&str]) -> SmfInfoConf {
        SmfInfoConf {
            slice: vec![SmfSlice {
                s_nssai: SNssai::new(1, Some(0x000001)),
                dnn: dnns.iter().map(|d| d.to_string()).collect(),
            }],
            nr_tai: vec![NrTai {
                plmn_id: PlmnId::build(999, 70, 2),
                tac: 0x00A1B2,
            }],
            nr_tai_range: vec![NrTaiRange {
                plmn_id: PlmnId::build(999, 70, 2),
                tac_range: vec![(1, 9), (0x10, 0x20)],
            }],
        }
    }

    fn smf_instance() -> NfInstance {
        let mut instance = NfInstance::new("nf-inst-1", NfType::Smf);
        instance.fqdn = Some("smf.localdomain".to_string());
        instance.heartbeat_interval = 10;
        instance.ipv4.push("127.0.0.4:7777".parse().unwrap());
        instance.ipv6.push("[::1]:7777".parse().unwrap());
        instance.allowed_nf_types.push(NfType::Amf);
        instance.add_service(service("1", "nsmf-pdusession"));
        instance.add_service(service("2", "nsmf-event-exposure"));
        instance.info.push(NfInfo::Smf(smf_conf(&["internet"])));
        instance
    }

    fn context() -> SbiContext {
        SbiContext::new(smf_instance())
            .with_server(ServerEndpoint::new(UriScheme::Http, "127.0.0.4", 7777))
    }

    fn service_names(profile: &NfProfile) -> Vec<String> {
        profile
            .services
            .as_ref()
            .map(|s| s.services().iter().map(|s| s.service_name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_build_nf_profile() {
        let profile = build_nf_profile(&smf_instance(), None, 0).unwrap();
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["nfInstanceId"], "nf-inst-1");
        assert_eq!(value["nfType"], "SMF");
        assert_eq!(value["nfStatus"], "REGISTERED");
        assert_eq!(value["heartBeatTimer"], 10);
        assert_eq!(value["fqdn"], "smf.localdomain");
        assert_eq!(value["ipv4Addresses"], json!(["127.0.0.4"]));
        assert_eq!(value["ipv6Addresses"], json!(["::1"]));
        assert_eq!(value["allowedNfTypes"], json!(["AMF"]));
        assert_eq!(value["nfProfileChangesSupportInd"], true);
        assert_eq!(value["nfServices"][1]["serviceName"], "nsmf-event-exposure");
        assert_eq!(
            value["nfServices"][0]["ipEndPoints"],
            json!([{"ipv4Address": "127.0.0.4", "port": 7777}])
        );
        assert_eq!(value["smfInfo"]["taiList"][0]["tac"], "00a1b2");
        assert_eq!(
            value["smfInfo"]["taiRangeList"][0]["tacRangeList"][1],
            json!({"start": "000010", "end": "000020"})
        );
        assert!(value.get("nfServiceList").is_none());
        assert!(value.get("smfInfoList").is_none());
    }

    #[test]
    fn test_profile_omits_empty_collections() {
        let instance = NfInstance::new("nf-inst-2", NfType::Amf);
        let value = serde_json::to_value(build_nf_profile(&instance, None, 0).unwrap()).unwrap();

        for field in [
            "heartBeatTimer",
            "fqdn",
            "ipv4Addresses",
            "ipv6Addresses",
            "allowedNfTypes",
            "nfServices",
            "nfServiceList",
            "smfInfo",
            "smfInfoList",
        ] {
            assert!(value.get(field).is_none(), "{field} should be absent");
        }
    }

    #[test]
    fn test_service_map_shape() {
        let profile = build_nf_profile(&smf_instance(), None, 0x1).unwrap();
        let value = serde_json::to_value(&profile).unwrap();

        assert!(value.get("nfServices").is_none());
        assert_eq!(value["nfServiceList"]["1"]["serviceName"], "nsmf-pdusession");
        assert_eq!(value["nfServiceList"]["2"]["serviceInstanceId"], "2");
    }

    #[test]
    fn test_discovery_filter_keeps_order() {
        let mut instance = NfInstance::new("nf-inst-1", NfType::Smf);
        instance.add_service(service("a", "A"));
        instance.add_service(service("b", "B"));
        instance.add_service(service("c", "C"));

        let option = SbiDiscoveryOption::new().with_service_name("C").with_service_name("A");
        let profile = build_nf_profile(&instance, Some(&option), 0).unwrap();
        assert_eq!(service_names(&profile), vec!["A", "C"]);

        let option = SbiDiscoveryOption::new().with_service_name("a");
        let profile = build_nf_profile(&instance, Some(&option), 0).unwrap();
        assert!(profile.services.is_none());

        let empty = SbiDiscoveryOption::new();
        let profile = build_nf_profile(&instance, Some(&empty), 0).unwrap();
        assert_eq!(service_names(&profile), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_skips_unnamed_service() {
        let mut instance = NfInstance::new("nf-inst-1", NfType::Smf);
        instance.add_service(service("x", ""));
        instance.add_service(service("a", "A"));

        let option = SbiDiscoveryOption::new().with_service_name("A");
        let profile = build_nf_profile(&instance, Some(&option), 0).unwrap();
        assert_eq!(service_names(&profile), vec!["A"]);

        let err = build_nf_profile(&instance, None, 0).unwrap_err();
        assert!(matches!(err, SbiError::MissingServiceName(id) if id == "x"));
    }

    #[test]
    fn test_smf_info_collapsing() {
        let mut instance = smf_instance();
        instance.info.push(NfInfo::Smf(smf_conf(&["ims", "internet"])));

        let profile = build_nf_profile(&instance, None, 0).unwrap();
        assert!(matches!(&profile.smf_info, Collapsed::Many(map) if map.len() == 2));

        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("smfInfo").is_none());
        assert_eq!(
            value["smfInfoList"]["2"]["sNssaiSmfInfoList"][0]["dnnSmfInfoList"][0]["dnn"],
            "ims"
        );
    }

    #[test]
    fn test_slice_without_dnn_fails() {
        let mut instance = smf_instance();
        instance.info = vec![NfInfo::Smf(smf_conf(&[]))];

        let err = build_nf_profile(&instance, None, 0).unwrap_err();
        assert!(matches!(err, SbiError::NoDnn { sst: 1, ref sd } if sd == "000001"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_smf_info_without_slice_fails() {
        let mut instance = smf_instance();
        instance.info = vec![NfInfo::Smf(SmfInfoConf::default())];
        assert!(matches!(
            build_nf_profile(&instance, None, 0),
            Err(SbiError::NoSnssai)
        ));
    }

    #[test]
    fn test_build_smf_info_requires_slice() {
        let err = build_smf_info(&SmfInfoConf::default()).unwrap_err();
        assert!(matches!(err, SbiError::NoSnssai));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_duplicate_service_id_rejected() {
        let mut instance = NfInstance::new("nf-inst-1", NfType::Smf);
        instance.add_service(service("1", "nsmf-pdusession"));
        instance.add_service(service("1", "nsmf-event-exposure"));

        for features in [0x0, 0x1] {
            let err = build_nf_profile(&instance, None, features).unwrap_err();
            assert!(matches!(err, SbiError::DuplicateServiceId(ref id) if id == "1"));
            assert_eq!(err.tier(), crate::error::ErrorTier::Contract);
        }

        let option = SbiDiscoveryOption::new().with_service_name("nsmf-pdusession");
        let profile = build_nf_profile(&instance, Some(&option), 0x1).unwrap();
        assert_eq!(service_names(&profile), vec!["nsmf-pdusession"]);
    }

    #[test]
    fn test_tai_range_without_tac_fails() {
        let mut conf = smf_conf(&["internet"]);
        conf.nr_tai_range.push(NrTaiRange {
            plmn_id: PlmnId::build(1, 1, 2),
            tac_range: Vec::new(),
        });
        assert!(matches!(build_smf_info(&conf), Err(SbiError::NoTacRange { index: 1 })));
    }

    #[test]
    fn test_unsupported_nf_info() {
        let mut instance = smf_instance();
        instance.info.push(NfInfo::Other(NfType::Amf));
        assert!(matches!(
            build_nf_profile(&instance, None, 0),
            Err(SbiError::UnsupportedNfInfo(NfType::Amf))
        ));
    }

    #[test]
    fn test_contract_violations() {
        let instance = NfInstance::new("", NfType::Smf);
        assert!(matches!(
            build_nf_profile(&instance, None, 0),
            Err(SbiError::MissingIdentifier(_))
        ));

        let mut instance = NfInstance::new("nf-1", NfType::Smf);
        instance.ipv4.push("[::1]:80".parse().unwrap());
        assert!(matches!(
            build_nf_profile(&instance, None, 0),
            Err(SbiError::AddressFamilyMismatch { expected: "IPv4", .. })
        ));

        let mut nf_service = service("1", "nsmf-pdusession");
        nf_service.versions.clear();
        assert!(matches!(build_nf_service(&nf_service), Err(SbiError::MissingVersion(_))));
    }

    #[test]
    fn test_service_endpoint_filtering() {
        let mut nf_service = service("1", "nsmf-pdusession");
        nf_service.addr.push(NfServiceAddr { ipv4: None, ipv6: None, port: 80 });
        nf_service.addr.push(NfServiceAddr {
            ipv4: None,
            ipv6: Some("[2001:db8::1]:80".parse().unwrap()),
            port: 80,
        });
        nf_service.versions.push(LocalVersion {
            in_uri: "v2".to_string(),
            full: "2.0.0".to_string(),
            expiry: Some("2030-01-01T00:00:00Z".to_string()),
        });

        let wire = build_nf_service(&nf_service).unwrap();
        assert_eq!(wire.ip_end_points.len(), 2);
        assert_eq!(wire.ip_end_points[1].ipv6_address.as_deref(), Some("2001:db8::1"));
        assert_eq!(wire.versions[1].expiry.as_deref(), Some("2030-01-01T00:00:00Z"));
        assert!(wire.allowed_nf_types.is_empty());
    }

    #[test]
    fn test_free_nf_profile_tally() {
        let profile = build_nf_profile(&smf_instance(), None, 0x1).unwrap();
        let tally = free_nf_profile(profile);

        assert_eq!(tally.services, 2);
        assert_eq!(tally.versions, 2);
        assert_eq!(tally.endpoints, 2);
        assert_eq!(tally.nf_infos, 1);
        assert_eq!(tally.slices, 1);
        assert_eq!(tally.dnns, 1);
        assert_eq!(tally.tais, 1);
        assert_eq!(tally.tai_ranges, 1);
        assert_eq!(tally.tac_ranges, 2);
        // id, fqdn, 2 addresses
        // per service: map key, id, name, 2 version strings, 1 endpoint address
        // smf: sd, dnn, tai (mcc, mnc, tac), range (mcc, mnc, 2 x start/end)
        assert_eq!(tally.strings, 4 + 2 * 6 + (2 + 3 + 6));
    }

    #[test]
    fn test_free_collapsed_shapes() {
        let mut instance = NfInstance::new("nf-1", NfType::Smf);
        assert_eq!(free_nf_profile(build_nf_profile(&instance, None, 0).unwrap()).nf_infos, 0);

        instance.info.push(NfInfo::Smf(smf_conf(&["internet"])));
        assert_eq!(free_nf_profile(build_nf_profile(&instance, None, 0).unwrap()).nf_infos, 1);

        instance.info.push(NfInfo::Smf(smf_conf(&["internet"])));
        instance.info.push(NfInfo::Smf(smf_conf(&["internet"])));
        let tally = free_nf_profile(build_nf_profile(&instance, None, 0).unwrap());
        assert_eq!(tally.nf_infos, 3);
        assert_eq!(tally.dnns, 3);
    }

    #[test]
    fn test_build_register() {
        let mut ctx = context();
        ctx.content_encoding = Some("deflate".to_string());

        let request = build_register(&ctx).unwrap();
        assert_eq!(request.method(), "PUT");
        assert!(request.uri().ends_with("nf-instances/nf-inst-1"));
        assert_eq!(request.uri(), "/nnrf-nfm/v1/nf-instances/nf-inst-1");
        assert_eq!(
            request.http.get_header(header::CONTENT_TYPE).map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            request.http.get_header(header::CONTENT_ENCODING).map(String::as_str),
            Some("deflate")
        );

        let body = request.json_body().unwrap();
        assert_eq!(body["nfInstanceId"], "nf-inst-1");
        assert_eq!(body["nfServiceList"]["1"]["serviceName"], "nsmf-pdusession");
        assert!(body.get("nfServices").is_none());
    }

    #[test]
    fn test_build_register_propagates_build_failure() {
        let mut ctx = context();
        ctx.nf_instance.info.push(NfInfo::Other(NfType::Pcf));
        assert!(matches!(build_register(&ctx), Err(SbiError::UnsupportedNfInfo(NfType::Pcf))));
    }

    #[test]
    fn test_build_update() {
        let request = build_update(&context()).unwrap();
        assert_eq!(request.method(), "PATCH");
        assert_eq!(request.uri(), "/nnrf-nfm/v1/nf-instances/nf-inst-1");
        assert_eq!(
            request.http.get_header(header::CONTENT_TYPE).map(String::as_str),
            Some("application/json-patch+json")
        );
        assert_eq!(
            request.json_body().unwrap(),
            json!([{"op": "replace", "path": "/nfStatus", "value": "REGISTERED"}])
        );
    }

    #[test]
    fn test_build_de_register_and_retrieve() {
        let request = build_de_register(&context()).unwrap();
        assert_eq!(request.method(), "DELETE");
        assert_eq!(request.uri(), "/nnrf-nfm/v1/nf-instances/nf-inst-1");
        assert!(request.http.content.is_none());

        let request = build_profile_retrieve("peer-1").unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.uri(), "/nnrf-nfm/v1/nf-instances/peer-1");

        assert!(matches!(build_profile_retrieve(""), Err(SbiError::MissingIdentifier(_))));
    }

    #[test]
    fn test_build_status_subscribe() {
        let subscription = NfSubscription {
            req_nf_type: Some(NfType::Smf),
            req_nf_instance_id: Some("nf-inst-1".to_string()),
            subscr_cond: SubscrCondition { nf_type: Some(NfType::Amf) },
            requester_features: 0x10,
            ..Default::default()
        };

        let request = build_status_subscribe(&context(), &subscription).unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.uri(), "/nnrf-nfm/v1/subscriptions");
        assert_eq!(
            request.json_body().unwrap(),
            json!({
                "nfStatusNotificationUri": "http://127.0.0.4:7777/nnrf-nfm/v1/nf-status-notify",
                "reqNfType": "SMF",
                "reqNfInstanceId": "nf-inst-1",
                "subscrCond": {"nfType": "AMF"},
                "requesterFeatures": "11",
            })
        );
        assert_eq!(subscription.requester_features, 0x10);
    }

    #[test]
    fn test_build_status_subscribe_requirements() {
        let subscription = NfSubscription {
            req_nf_type: Some(NfType::Amf),
            ..Default::default()
        };
        let body = build_status_subscribe(&context(), &subscription)
            .unwrap()
            .json_body()
            .unwrap();
        assert!(body.get("subscrCond").is_none());
        assert_eq!(body["requesterFeatures"], "1");

        let no_server = SbiContext::new(smf_instance());
        assert!(matches!(
            build_status_subscribe(&no_server, &subscription),
            Err(SbiError::NoServerEndpoint)
        ));

        assert!(matches!(
            build_status_subscribe(&context(), &NfSubscription::default()),
            Err(SbiError::MissingIdentifier(_))
        ));
    }

    #[test]
    fn test_build_status_unsubscribe() {
        let subscription = NfSubscription {
            id: Some("sub-1".to_string()),
            ..Default::default()
        };
        let request = build_status_unsubscribe(&subscription).unwrap();
        assert_eq!(request.method(), "DELETE");
        assert_eq!(request.uri(), "/nnrf-nfm/v1/subscriptions/sub-1");

        assert!(matches!(
            build_status_unsubscribe(&NfSubscription::default()),
            Err(SbiError::MissingIdentifier("subscription.id"))
        ));
    }

    #[test]
    fn test_build_discover() {
        let option = SbiDiscoveryOption::new()
            .with_service_name("nsmf-pdusession")
            .with_requester_nf_instance_id("amf-1");

        let mut ctx = context();
        ctx.nf_instance.nf_type = NfType::Amf;

        let request = build_discover(&ctx, SbiServiceType::NsmfPdusession, Some(&option)).unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.uri(), "/nnrf-disc/v1/nf-instances");
        assert_eq!(request.http.get_param("target-nf-type").unwrap(), "SMF");
        assert_eq!(request.http.get_param("requester-nf-type").unwrap(), "AMF");
        assert_eq!(request.http.get_param("service-names").unwrap(), "nsmf-pdusession");
        assert_eq!(request.http.get_param("requester-nf-instance-id").unwrap(), "amf-1");
        assert!(request.http.content.is_none());

        let request = build_discover(&ctx, SbiServiceType::NnrfDisc, None).unwrap();
        assert_eq!(request.http.params.len(), 2);
    }
}
