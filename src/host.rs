//! Individual-address whitelisting.

use crate::codec::{self, JsonFormat};
use crate::error::Result;
use crate::traits::{Acl, HostAcl};
use crate::validate;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;

/// A whitelist of individually permitted addresses.
///
/// Exact-match set semantics: adding an address twice is the same as adding
/// it once. Shares the dual-format JSON codec with [`crate::BasicNetwork`],
/// with single addresses as tokens instead of CIDR networks.
pub struct BasicHost {
    format: JsonFormat,
    addresses: RwLock<HashSet<IpAddr>>,
}

impl BasicHost {
    /// Creates an empty whitelist serializing in the compatibility format.
    pub fn new() -> Self {
        Self::with_format(JsonFormat::Compatibility)
    }

    /// Creates an empty whitelist serializing in the given format.
    pub fn with_format(format: JsonFormat) -> Self {
        Self {
            format,
            addresses: RwLock::new(HashSet::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.read().is_empty()
    }

    /// Snapshot of the whitelisted addresses, in no particular order.
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.addresses.read().iter().copied().collect()
    }

    /// Serializes the whitelist in its construction-time format.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        codec::encode(&self.address_strings(), self.format)
    }

    /// Replaces the whitelist contents from either accepted encoding. On
    /// any failure the whitelist is left empty.
    pub fn load_json(&self, raw: &[u8]) -> Result<()> {
        let parsed = parse_payload(raw);
        let mut addresses = self.addresses.write();
        match parsed {
            Ok(set) => {
                *addresses = set;
                Ok(())
            }
            Err(e) => {
                addresses.clear();
                Err(e)
            }
        }
    }

    fn address_strings(&self) -> Vec<String> {
        self.addresses
            .read()
            .iter()
            .map(|ip| ip.to_string())
            .collect()
    }
}

impl Default for BasicHost {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_payload(raw: &[u8]) -> Result<HashSet<IpAddr>> {
    codec::decode(raw)?
        .iter()
        .map(|token| validate::parse_addr(token))
        .collect()
}

#[async_trait]
impl Acl for BasicHost {
    async fn permitted(&self, raw: &[u8]) -> bool {
        let Some(ip) = validate::valid_ip(raw) else {
            return false;
        };
        self.addresses.read().contains(&ip)
    }
}

impl HostAcl for BasicHost {
    fn add(&self, ip: IpAddr) {
        self.addresses.write().insert(ip);
    }

    fn remove(&self, ip: IpAddr) {
        self.addresses.write().remove(&ip);
    }
}

impl Serialize for BasicHost {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let addresses = self.address_strings();
        match self.format {
            JsonFormat::Compatibility => serializer.serialize_str(&addresses.join(",")),
            JsonFormat::New => addresses.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BasicHost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct HostVisitor;

        impl<'de> Visitor<'de> for HostVisitor {
            type Value = HashSet<IpAddr>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a comma-separated address string or an array of address strings")
            }

            fn visit_str<E: de::Error>(self, content: &str) -> std::result::Result<Self::Value, E> {
                codec::split_compat(content)
                    .map(|token| validate::parse_addr(token).map_err(E::custom))
                    .collect()
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut addresses = HashSet::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(token) = seq.next_element::<String>()? {
                    addresses.insert(validate::parse_addr(&token).map_err(de::Error::custom)?);
                }
                Ok(addresses)
            }
        }

        let addresses = deserializer.deserialize_any(HostVisitor)?;
        Ok(Self {
            format: JsonFormat::default(),
            addresses: RwLock::new(addresses),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ip_octets;

    fn addr(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn ip(s: &str) -> Vec<u8> {
        ip_octets(addr(s))
    }

    #[tokio::test]
    async fn test_exact_match() {
        let wl = BasicHost::new();
        wl.add(addr("192.168.3.1"));

        assert!(wl.permitted(&ip("192.168.3.1")).await);
        assert!(!wl.permitted(&ip("192.168.3.2")).await);
    }

    #[tokio::test]
    async fn test_invalid_ip_is_not_permitted() {
        let wl = BasicHost::new();
        wl.add(addr("192.168.3.1"));
        assert!(!wl.permitted(&[0, 0]).await);
    }

    #[test]
    fn test_duplicates_collapse() {
        let wl = BasicHost::new();
        wl.add(addr("192.168.3.1"));
        wl.add(addr("192.168.3.1"));
        assert_eq!(wl.len(), 1);

        wl.remove(addr("192.168.3.1"));
        assert!(wl.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let wl = BasicHost::new();
        wl.add(addr("192.168.3.1"));
        wl.remove(addr("10.0.0.1"));
        assert_eq!(wl.len(), 1);
    }

    #[test]
    fn test_round_trip_both_formats() {
        for format in [JsonFormat::Compatibility, JsonFormat::New] {
            let wl = BasicHost::with_format(format);
            wl.add(addr("192.168.3.1"));
            wl.add(addr("2001:db8::1"));

            let restored = BasicHost::new();
            restored.load_json(&wl.to_json().unwrap()).unwrap();

            let mut expected = wl.addresses();
            let mut got = restored.addresses();
            expected.sort();
            got.sort();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_failed_load_leaves_whitelist_empty() {
        let wl = BasicHost::new();
        wl.add(addr("192.168.3.1"));
        assert!(wl.load_json(br#""192.168.3.1,127.0.0.256""#).is_err());
        assert!(wl.is_empty());
    }
}
