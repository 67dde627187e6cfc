//! SBI Configuration
//!
//! YAML description of the local NF instance, loaded with serde_yaml and
//! converted into the [`SbiContext`] handed to the NRF builders.
//!
//! Emptiness rules on slices and TAC ranges are not enforced here; the
//! profile builder reports them when the profile is built.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::{
    NfInfo, NfInstance, NfService, NfServiceAddr, NfServiceVersion, NrTai, NrTaiRange, SNssai,
    SbiContext, ServerEndpoint, SmfInfoConf, SmfSlice,
};
use crate::conv::{self, PlmnId};
use crate::error::{SbiError, SbiResult};
use crate::types::{NfServiceStatus, NfStatus, NfType, UriScheme};

const DEFAULT_CAPACITY: u16 = 100;

fn default_capacity() -> u16 {
    DEFAULT_CAPACITY
}

/// Root of the SBI configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbiConf {
    #[serde(default)]
    pub sbi: SbiSectionConf,
    pub nf_instance: NfInstanceConf,
}

/// `sbi:` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbiSectionConf {
    pub server: Option<ServerConf>,
    pub content_encoding: Option<String>,
}

/// Local SBI server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConf {
    #[serde(default)]
    pub scheme: UriScheme,
    pub address: String,
    /// Defaults to the scheme's port
    pub port: Option<u16>,
}

/// `nf_instance:` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfInstanceConf {
    pub id: String,
    #[serde(rename = "type")]
    pub nf_type: NfType,
    #[serde(default)]
    pub status: NfStatus,
    pub fqdn: Option<String>,
    /// Seconds, 0 = no heartbeat
    #[serde(default)]
    pub heartbeat_interval: u32,
    #[serde(default)]
    pub priority: u16,
    #[serde(default = "default_capacity")]
    pub capacity: u16,
    #[serde(default)]
    pub load: u8,
    #[serde(default)]
    pub ipv4: Vec<SocketAddr>,
    #[serde(default)]
    pub ipv6: Vec<SocketAddr>,
    #[serde(default)]
    pub allowed_nf_types: Vec<NfType>,
    #[serde(default)]
    pub services: Vec<NfServiceConf>,
    #[serde(default)]
    pub info: Vec<NfInfoConf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfServiceConf {
    pub id: String,
    pub name: String,
    /// Defaults to v1 / 1.0.0
    #[serde(default)]
    pub versions: Vec<NfServiceVersionConf>,
    #[serde(default)]
    pub scheme: UriScheme,
    #[serde(default)]
    pub status: NfServiceStatus,
    pub fqdn: Option<String>,
    #[serde(default)]
    pub addr: Vec<NfServiceAddrConf>,
    #[serde(default)]
    pub allowed_nf_types: Vec<NfType>,
    #[serde(default)]
    pub priority: u16,
    #[serde(default = "default_capacity")]
    pub capacity: u16,
    #[serde(default)]
    pub load: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfServiceVersionConf {
    pub in_uri: String,
    pub full: String,
    pub expiry: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfServiceAddrConf {
    pub ipv4: Option<SocketAddr>,
    pub ipv6: Option<SocketAddr>,
    pub port: u16,
}

/// One `info:` entry; only SMF carries a payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfInfoConf {
    #[serde(rename = "type")]
    pub nf_type: NfType,
    pub smf: Option<SmfInfoYaml>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmfInfoYaml {
    #[serde(default)]
    pub s_nssai: Vec<SliceConf>,
    #[serde(default)]
    pub tai: Vec<TaiConf>,
    #[serde(default)]
    pub tai_range: Vec<TaiRangeConf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceConf {
    pub sst: u8,
    /// 6 hex digits
    pub sd: Option<String>,
    #[serde(default)]
    pub dnn: Vec<String>,
}

/// MCC or MNC, written as a number or a digit string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DigitsConf {
    Number(u16),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlmnIdConf {
    pub mcc: DigitsConf,
    pub mnc: DigitsConf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaiConf {
    pub plmn_id: PlmnIdConf,
    pub tac: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaiRangeConf {
    pub plmn_id: PlmnIdConf,
    #[serde(default)]
    pub tac: Vec<TacRangeConf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacRangeConf {
    pub start: u32,
    pub end: u32,
}

impl SbiConf {
    /// Parse a configuration document
    pub fn from_yaml_str(yaml: &str) -> SbiResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> SbiResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Convert into the context used by the NRF builders
    pub fn into_context(self) -> SbiResult<SbiContext> {
        let nf_instance = self.nf_instance.into_nf_instance()?;

        let mut ctx = SbiContext::new(nf_instance);
        ctx.content_encoding = self.sbi.content_encoding;
        if let Some(server) = self.sbi.server {
            let port = server.port.unwrap_or_else(|| server.scheme.default_port());
            ctx = ctx.with_server(ServerEndpoint::new(server.scheme, server.address, port));
        }

        Ok(ctx)
    }
}

impl NfInstanceConf {
    fn into_nf_instance(self) -> SbiResult<NfInstance> {
        if self.id.is_empty() {
            return Err(SbiError::Config("nf_instance.id is empty".to_string()));
        }

        let mut nf_instance = NfInstance::new(self.id, self.nf_type);
        nf_instance.nf_status = self.status;
        nf_instance.fqdn = self.fqdn;
        nf_instance.heartbeat_interval = self.heartbeat_interval;
        nf_instance.priority = self.priority;
        nf_instance.capacity = self.capacity;
        nf_instance.load = self.load;
        nf_instance.ipv4 = self.ipv4;
        nf_instance.ipv6 = self.ipv6;
        nf_instance.allowed_nf_types = self.allowed_nf_types;

        for service in self.services {
            nf_instance.add_service(service.into_nf_service()?);
        }

        for info in self.info {
            nf_instance.info.push(match info.nf_type {
                NfType::Smf => NfInfo::Smf(info.smf.unwrap_or_default().into_smf_info()?),
                other => NfInfo::Other(other),
            });
        }

        Ok(nf_instance)
    }
}

impl NfServiceConf {
    fn into_nf_service(self) -> SbiResult<NfService> {
        if self.id.is_empty() || self.name.is_empty() {
            return Err(SbiError::Config(format!(
                "service [{}:{}] needs both id and name",
                self.id, self.name
            )));
        }

        let mut nf_service = NfService::new(self.id, self.name);
        if !self.versions.is_empty() {
            nf_service.versions = self
                .versions
                .into_iter()
                .map(|v| NfServiceVersion {
                    in_uri: v.in_uri,
                    full: v.full,
                    expiry: v.expiry,
                })
                .collect();
        }
        nf_service.scheme = self.scheme;
        nf_service.status = self.status;
        nf_service.fqdn = self.fqdn;
        nf_service.addr = self
            .addr
            .into_iter()
            .map(|a| NfServiceAddr {
                ipv4: a.ipv4,
                ipv6: a.ipv6,
                port: a.port,
            })
            .collect();
        nf_service.allowed_nf_types = self.allowed_nf_types;
        nf_service.priority = self.priority;
        nf_service.capacity = self.capacity;
        nf_service.load = self.load;

        Ok(nf_service)
    }
}

impl SmfInfoYaml {
    fn into_smf_info(self) -> SbiResult<SmfInfoConf> {
        let slice = self
            .s_nssai
            .into_iter()
            .map(|s| -> SbiResult<SmfSlice> {
                let sd = match s.sd.as_deref() {
                    Some(sd) => Some(conv::s_nssai_sd_from_string(sd).ok_or_else(|| {
                        SbiError::Config(format!("invalid S-NSSAI SD [{sd}]"))
                    })?),
                    None => None,
                };
                Ok(SmfSlice {
                    s_nssai: SNssai::new(s.sst, sd),
                    dnn: s.dnn,
                })
            })
            .collect::<SbiResult<_>>()?;

        let nr_tai = self
            .tai
            .into_iter()
            .map(|t| -> SbiResult<NrTai> {
                Ok(NrTai {
                    plmn_id: t.plmn_id.to_plmn_id()?,
                    tac: check_tac(t.tac)?,
                })
            })
            .collect::<SbiResult<_>>()?;

        let nr_tai_range = self
            .tai_range
            .into_iter()
            .map(|r| -> SbiResult<NrTaiRange> {
                Ok(NrTaiRange {
                    plmn_id: r.plmn_id.to_plmn_id()?,
                    tac_range: r
                        .tac
                        .iter()
                        .map(|t| -> SbiResult<(u32, u32)> {
                            Ok((check_tac(t.start)?, check_tac(t.end)?))
                        })
                        .collect::<SbiResult<_>>()?,
                })
            })
            .collect::<SbiResult<_>>()?;

        Ok(SmfInfoConf {
            slice,
            nr_tai,
            nr_tai_range,
        })
    }
}

fn check_tac(tac: u32) -> SbiResult<u32> {
    if tac > 0x00ff_ffff {
        return Err(SbiError::Config(format!("TAC [{tac}] exceeds 24 bits")));
    }
    Ok(tac)
}

impl DigitsConf {
    /// Value and digit count
    fn digits(&self, what: &str) -> SbiResult<(u16, u8)> {
        match self {
            Self::Number(n) if *n <= 999 => Ok((*n, if *n > 99 { 3 } else { 2 })),
            Self::Text(s)
                if (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let value = s
                    .parse()
                    .map_err(|_| SbiError::Config(format!("invalid {what} [{s}]")))?;
                Ok((value, s.len() as u8))
            }
            Self::Number(n) => Err(SbiError::Config(format!("invalid {what} [{n}]"))),
            Self::Text(s) => Err(SbiError::Config(format!("invalid {what} [{s}]"))),
        }
    }
}

impl PlmnIdConf {
    fn to_plmn_id(&self) -> SbiResult<PlmnId> {
        let (mcc, _) = self.mcc.digits("MCC")?;
        let (mnc, mnc_len) = self.mnc.digits("MNC")?;
        Ok(PlmnId::build(mcc, mnc, mnc_len))
    }
}
