//! SBI Types
//!
//! NF types, statuses, URI schemes and the service name table used by the
//! NRF management and discovery builders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NF Type enumeration (TS 29.510 NFType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NfType {
    Nrf,
    Udm,
    Amf,
    Smf,
    Ausf,
    Nef,
    Pcf,
    Smsf,
    Nssf,
    Udr,
    Lmf,
    Gmlc,
    #[serde(rename = "5G_EIR")]
    FiveGEir,
    Sepp,
    Upf,
    N3iwf,
    Af,
    Udsf,
    Bsf,
    Chf,
    Nwdaf,
    Pcscf,
    Cbcf,
    Hss,
    Ucmf,
    SorAf,
    Spaf,
    Mme,
    Scp,
    Nssaaf,
}

impl NfType {
    const ALL: [NfType; 30] = [
        Self::Nrf,
        Self::Udm,
        Self::Amf,
        Self::Smf,
        Self::Ausf,
        Self::Nef,
        Self::Pcf,
        Self::Smsf,
        Self::Nssf,
        Self::Udr,
        Self::Lmf,
        Self::Gmlc,
        Self::FiveGEir,
        Self::Sepp,
        Self::Upf,
        Self::N3iwf,
        Self::Af,
        Self::Udsf,
        Self::Bsf,
        Self::Chf,
        Self::Nwdaf,
        Self::Pcscf,
        Self::Cbcf,
        Self::Hss,
        Self::Ucmf,
        Self::SorAf,
        Self::Spaf,
        Self::Mme,
        Self::Scp,
        Self::Nssaaf,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Nrf => "NRF",
            Self::Udm => "UDM",
            Self::Amf => "AMF",
            Self::Smf => "SMF",
            Self::Ausf => "AUSF",
            Self::Nef => "NEF",
            Self::Pcf => "PCF",
            Self::Smsf => "SMSF",
            Self::Nssf => "NSSF",
            Self::Udr => "UDR",
            Self::Lmf => "LMF",
            Self::Gmlc => "GMLC",
            Self::FiveGEir => "5G_EIR",
            Self::Sepp => "SEPP",
            Self::Upf => "UPF",
            Self::N3iwf => "N3IWF",
            Self::Af => "AF",
            Self::Udsf => "UDSF",
            Self::Bsf => "BSF",
            Self::Chf => "CHF",
            Self::Nwdaf => "NWDAF",
            Self::Pcscf => "PCSCF",
            Self::Cbcf => "CBCF",
            Self::Hss => "HSS",
            Self::Ucmf => "UCMF",
            Self::SorAf => "SOR_AF",
            Self::Spaf => "SPAF",
            Self::Mme => "MME",
            Self::Scp => "SCP",
            Self::Nssaaf => "NSSAAF",
        }
    }

    /// Parse the wire name of an NF type
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.to_str() == name)
    }
}

impl fmt::Display for NfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// NF instance status (TS 29.510 NFStatus)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NfStatus {
    #[default]
    Registered,
    Suspended,
    Undiscoverable,
}

impl NfStatus {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Suspended => "SUSPENDED",
            Self::Undiscoverable => "UNDISCOVERABLE",
        }
    }
}

impl fmt::Display for NfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// NF service status (TS 29.510 NFServiceStatus)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NfServiceStatus {
    #[default]
    Registered,
    Suspended,
    Undiscoverable,
}

/// URI Scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UriScheme {
    #[default]
    Http,
    Https,
}

impl UriScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for UriScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SBI service types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SbiServiceType {
    NnrfNfm,
    NnrfDisc,
    NnrfOauth2,
    NudmSdm,
    NudmUecm,
    NudmUeau,
    NudmEe,
    NudmPp,
    NamfComm,
    NamfEvts,
    NamfMt,
    NamfLoc,
    NsmfPdusession,
    NsmfEventExposure,
    NsmfNidd,
    NausfAuth,
    NausfSorprotection,
    NausfUpuprotection,
    NnefPfdmanagement,
    NpcfAmPolicyControl,
    NpcfSmpolicycontrol,
    NpcfPolicyauthorization,
    NpcfBdtpolicycontrol,
    NpcfUePolicyControl,
    NsmsfSms,
    NnssfNsselection,
    NnssfNssaiavailability,
    NudrDr,
    NlmfLoc,
    N5gEirEic,
    NbsfManagement,
    NchfConvergedcharging,
    NnwdafEventssubscription,
    NnwdafAnalyticsinfo,
    NgmlcLoc,
    NucmfProvisioning,
    NhssSdm,
    NhssUecm,
    NhssUeau,
    NseppTelescopic,
    NsorafSor,
    NspafSecuredPacket,
    NudsfDr,
    NnssaafNssaa,
}

/// Service type, service name, NF type producing the service
const SERVICE_TABLE: &[(SbiServiceType, &str, NfType)] = &[
    (SbiServiceType::NnrfNfm, "nnrf-nfm", NfType::Nrf),
    (SbiServiceType::NnrfDisc, "nnrf-disc", NfType::Nrf),
    (SbiServiceType::NnrfOauth2, "nnrf-oauth2", NfType::Nrf),
    (SbiServiceType::NudmSdm, "nudm-sdm", NfType::Udm),
    (SbiServiceType::NudmUecm, "nudm-uecm", NfType::Udm),
    (SbiServiceType::NudmUeau, "nudm-ueau", NfType::Udm),
    (SbiServiceType::NudmEe, "nudm-ee", NfType::Udm),
    (SbiServiceType::NudmPp, "nudm-pp", NfType::Udm),
    (SbiServiceType::NamfComm, "namf-comm", NfType::Amf),
    (SbiServiceType::NamfEvts, "namf-evts", NfType::Amf),
    (SbiServiceType::NamfMt, "namf-mt", NfType::Amf),
    (SbiServiceType::NamfLoc, "namf-loc", NfType::Amf),
    (SbiServiceType::NsmfPdusession, "nsmf-pdusession", NfType::Smf),
    (SbiServiceType::NsmfEventExposure, "nsmf-event-exposure", NfType::Smf),
    (SbiServiceType::NsmfNidd, "nsmf-nidd", NfType::Smf),
    (SbiServiceType::NausfAuth, "nausf-auth", NfType::Ausf),
    (SbiServiceType::NausfSorprotection, "nausf-sorprotection", NfType::Ausf),
    (SbiServiceType::NausfUpuprotection, "nausf-upuprotection", NfType::Ausf),
    (SbiServiceType::NnefPfdmanagement, "nnef-pfdmanagement", NfType::Nef),
    (SbiServiceType::NpcfAmPolicyControl, "npcf-am-policy-control", NfType::Pcf),
    (SbiServiceType::NpcfSmpolicycontrol, "npcf-smpolicycontrol", NfType::Pcf),
    (SbiServiceType::NpcfPolicyauthorization, "npcf-policyauthorization", NfType::Pcf),
    (SbiServiceType::NpcfBdtpolicycontrol, "npcf-bdtpolicycontrol", NfType::Pcf),
    (SbiServiceType::NpcfUePolicyControl, "npcf-ue-policy-control", NfType::Pcf),
    (SbiServiceType::NsmsfSms, "nsmsf-sms", NfType::Smsf),
    (SbiServiceType::NnssfNsselection, "nnssf-nsselection", NfType::Nssf),
    (SbiServiceType::NnssfNssaiavailability, "nnssf-nssaiavailability", NfType::Nssf),
    (SbiServiceType::NudrDr, "nudr-dr", NfType::Udr),
    (SbiServiceType::NlmfLoc, "nlmf-loc", NfType::Lmf),
    (SbiServiceType::N5gEirEic, "n5g-eir-eic", NfType::FiveGEir),
    (SbiServiceType::NbsfManagement, "nbsf-management", NfType::Bsf),
    (SbiServiceType::NchfConvergedcharging, "nchf-convergedcharging", NfType::Chf),
    (SbiServiceType::NnwdafEventssubscription, "nnwdaf-eventssubscription", NfType::Nwdaf),
    (SbiServiceType::NnwdafAnalyticsinfo, "nnwdaf-analyticsinfo", NfType::Nwdaf),
    (SbiServiceType::NgmlcLoc, "ngmlc-loc", NfType::Gmlc),
    (SbiServiceType::NucmfProvisioning, "nucmf-provisioning", NfType::Ucmf),
    (SbiServiceType::NhssSdm, "nhss-sdm", NfType::Hss),
    (SbiServiceType::NhssUecm, "nhss-uecm", NfType::Hss),
    (SbiServiceType::NhssUeau, "nhss-ueau", NfType::Hss),
    (SbiServiceType::NseppTelescopic, "nsepp-telescopic", NfType::Sepp),
    (SbiServiceType::NsorafSor, "nsoraf-sor", NfType::SorAf),
    (SbiServiceType::NspafSecuredPacket, "nspaf-secured-packet", NfType::Spaf),
    (SbiServiceType::NudsfDr, "nudsf-dr", NfType::Udsf),
    (SbiServiceType::NnssaafNssaa, "nnssaaf-nssaa", NfType::Nssaaf),
];

impl SbiServiceType {
    fn entry(&self) -> Option<&'static (SbiServiceType, &'static str, NfType)> {
        SERVICE_TABLE.iter().find(|(t, _, _)| t == self)
    }

    /// Convert service type to service name string
    pub fn to_name(&self) -> &'static str {
        self.entry().map(|(_, name, _)| *name).unwrap_or("")
    }

    /// Convert service name string to service type
    pub fn from_name(name: &str) -> Option<Self> {
        SERVICE_TABLE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(t, _, _)| *t)
    }

    /// NF type that produces this service (discovery target)
    pub fn to_nf_type(&self) -> Option<NfType> {
        self.entry().map(|(_, _, nf_type)| *nf_type)
    }
}

impl fmt::Display for SbiServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_name())
    }
}
