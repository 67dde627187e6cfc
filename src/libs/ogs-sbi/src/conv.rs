//! Scalar converters
//!
//! Pure conversions from the local snapshot representation to the textual
//! forms used on the wire: IP strings, 24-bit hex codes, S-NSSAI SD,
//! feature masks and packed PLMN identities.

use std::fmt;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::openapi::PlmnIdWire;

/// SD value meaning "no slice differentiator"
pub const S_NSSAI_NO_SD_VALUE: u32 = 0xffffff;

/// IP part of a socket address as text (no port, no brackets)
pub fn ipstr(addr: &SocketAddr) -> String {
    addr.ip().to_string()
}

/// 24-bit value as fixed 6-digit lower-case hex
pub fn uint24_to_0string(value: u32) -> String {
    format!("{:06x}", value & 0x00ff_ffff)
}

/// Parse a 6-digit hex string back into a 24-bit value
pub fn uint24_from_string(s: &str) -> Option<u32> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

/// S-NSSAI SD as text, `None` when the SD is absent or the reserved value
pub fn s_nssai_sd_to_string(sd: Option<u32>) -> Option<String> {
    sd.filter(|&sd| sd != S_NSSAI_NO_SD_VALUE)
        .map(uint24_to_0string)
}

/// Parse an S-NSSAI SD string
pub fn s_nssai_sd_from_string(s: &str) -> Option<u32> {
    uint24_from_string(s)
}

/// Supported-features mask as hex without leading zeros
pub fn uint64_to_string(value: u64) -> String {
    format!("{value:x}")
}

/// PLMN identity packed in 3 octets, TS 24.301 semi-octet order
///
/// octet 1: MCC digit 2 | MCC digit 1
/// octet 2: MNC digit 3 (0xF if 2-digit MNC) | MCC digit 3
/// octet 3: MNC digit 2 | MNC digit 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlmnId {
    data: [u8; 3],
}

impl PlmnId {
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self { data: bytes }
    }

    /// Build a PLMN ID from MCC, MNC, and MNC length (2 or 3)
    pub fn build(mcc: u16, mnc: u16, mnc_len: u8) -> Self {
        let digit = |v: u16, div: u16| ((v / div) % 10) as u8;

        let mut data = [0u8; 3];
        data[0] = (digit(mcc, 10) << 4) | digit(mcc, 100);
        data[1] = digit(mcc, 1);

        if mnc_len == 2 {
            data[1] |= 0xf0;
            data[2] = (digit(mnc, 1) << 4) | digit(mnc, 10);
        } else {
            data[1] |= digit(mnc, 1) << 4;
            data[2] = (digit(mnc, 10) << 4) | digit(mnc, 100);
        }

        Self { data }
    }

    pub fn mcc(&self) -> u16 {
        let mcc1 = (self.data[0] & 0x0f) as u16;
        let mcc2 = (self.data[0] >> 4) as u16;
        let mcc3 = (self.data[1] & 0x0f) as u16;
        mcc1 * 100 + mcc2 * 10 + mcc3
    }

    pub fn mnc(&self) -> u16 {
        let mnc1 = (self.data[2] & 0x0f) as u16;
        let mnc2 = (self.data[2] >> 4) as u16;
        let mnc3 = (self.data[1] >> 4) as u16;

        if self.mnc_len() == 2 {
            mnc1 * 10 + mnc2
        } else {
            mnc1 * 100 + mnc2 * 10 + mnc3
        }
    }

    pub fn mnc_len(&self) -> u8 {
        if (self.data[1] >> 4) == 0x0f {
            2
        } else {
            3
        }
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.data
    }
}

impl fmt::Display for PlmnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mnc_len() == 2 {
            write!(f, "{:03}{:02}", self.mcc(), self.mnc())
        } else {
            write!(f, "{:03}{:03}", self.mcc(), self.mnc())
        }
    }
}

/// Wire form of a packed PLMN ID
pub fn build_plmn_id(plmn_id: &PlmnId) -> PlmnIdWire {
    let mnc = if plmn_id.mnc_len() == 2 {
        format!("{:02}", plmn_id.mnc())
    } else {
        format!("{:03}", plmn_id.mnc())
    };

    PlmnIdWire {
        mcc: format!("{:03}", plmn_id.mcc()),
        mnc,
    }
}

/// Packed PLMN ID from its wire form
pub fn parse_plmn_id(wire: &PlmnIdWire) -> Option<PlmnId> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if wire.mcc.len() != 3 || !all_digits(&wire.mcc) || !all_digits(&wire.mnc) {
        return None;
    }
    let mnc_len = match wire.mnc.len() {
        2 => 2,
        3 => 3,
        _ => return None,
    };

    let mcc = wire.mcc.parse().ok()?;
    let mnc = wire.mnc.parse().ok()?;
    Some(PlmnId::build(mcc, mnc, mnc_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv6Addr, SocketAddrV6};

    #[test]
    fn test_ipstr() {
        let v4: SocketAddr = "127.0.0.4:7777".parse().unwrap();
        assert_eq!(ipstr(&v4), "127.0.0.4");

        let v6 = SocketAddr::V6(SocketAddrV6::new(
            Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1),
            7777,
            0,
            0,
        ));
        assert_eq!(ipstr(&v6), "2001:db8::1");
    }

    #[test]
    fn test_uint24_roundtrip() {
        assert_eq!(uint24_to_0string(0x00A1B2), "00a1b2");
        assert_eq!(uint24_from_string("00a1b2"), Some(0x00A1B2));
        assert_eq!(uint24_to_0string(1), "000001");
        assert_eq!(uint24_to_0string(0x1ffffff), "ffffff");
        assert_eq!(uint24_from_string("a1b2"), None);
        assert_eq!(uint24_from_string("zzzzzz"), None);
        assert_eq!(uint24_from_string("+a1b2c"), None);
        assert_eq!(uint24_from_string("-00001"), None);
        assert_eq!(s_nssai_sd_from_string("+00001"), None);
    }

    #[test]
    fn test_sd_to_string() {
        assert_eq!(s_nssai_sd_to_string(Some(0x010203)), Some("010203".to_string()));
        assert_eq!(s_nssai_sd_to_string(Some(S_NSSAI_NO_SD_VALUE)), None);
        assert_eq!(s_nssai_sd_to_string(None), None);
        assert_eq!(s_nssai_sd_from_string("000001"), Some(1));
    }

    #[test]
    fn test_uint64_to_string() {
        assert_eq!(uint64_to_string(0x1), "1");
        assert_eq!(uint64_to_string(0x1f), "1f");
        assert_eq!(uint64_to_string(0), "0");
    }

    #[test]
    fn test_plmn_id_packing() {
        let plmn = PlmnId::build(999, 70, 2);
        assert_eq!(plmn.as_bytes(), &[0x99, 0xf9, 0x07]);
        assert_eq!(plmn.mcc(), 999);
        assert_eq!(plmn.mnc(), 70);
        assert_eq!(plmn.to_string(), "99970");

        let plmn = PlmnId::build(310, 410, 3);
        assert_eq!(plmn.as_bytes(), &[0x13, 0x00, 0x14]);
        assert_eq!(plmn.mnc_len(), 3);
        assert_eq!(plmn.to_string(), "310410");
    }

    #[test]
    fn test_build_plmn_id() {
        let wire = build_plmn_id(&PlmnId::build(1, 1, 2));
        assert_eq!(wire.mcc, "001");
        assert_eq!(wire.mnc, "01");

        let wire = build_plmn_id(&PlmnId::build(1, 1, 3));
        assert_eq!(wire.mnc, "001");
        assert_eq!(parse_plmn_id(&wire), Some(PlmnId::build(1, 1, 3)));

        let bad = PlmnIdWire { mcc: "01".to_string(), mnc: "01".to_string() };
        assert_eq!(parse_plmn_id(&bad), None);
    }
}
