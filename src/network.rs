//! Network (CIDR) whitelisting.

use crate::codec::{self, JsonFormat};
use crate::error::Result;
use crate::traits::{Acl, NetworkAcl};
use crate::validate;

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use parking_lot::RwLock;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A whitelist of permitted IP networks guarded by a reader/writer lock.
///
/// Membership is a linear containment scan over the entry list, which is
/// fine for small whitelists and will not scale beyond that. Entries keep
/// insertion order; duplicates and overlapping networks are accepted and
/// never merged.
pub struct BasicNetwork {
    format: JsonFormat,
    entries: RwLock<Vec<IpNetwork>>,
}

impl BasicNetwork {
    /// Creates an empty whitelist serializing in the compatibility format.
    pub fn new() -> Self {
        Self::with_format(JsonFormat::Compatibility)
    }

    /// Creates an empty whitelist serializing in the given format.
    ///
    /// The format only affects output; decoding detects the input shape on
    /// its own.
    pub fn with_format(format: JsonFormat) -> Self {
        Self {
            format,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Number of whitelisted networks, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the current entries. The locked list itself is never
    /// handed out by reference.
    pub fn entries(&self) -> Vec<IpNetwork> {
        self.entries.read().clone()
    }

    /// Serializes the whitelist in its construction-time format.
    ///
    /// Takes the read lock, so it is safe alongside concurrent `permitted`
    /// checks and excluded against writers for the duration of the snapshot.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        codec::encode(&self.entry_strings(), self.format)
    }

    /// Replaces the whitelist contents from either accepted encoding.
    ///
    /// The payload is parsed in full before the entry list is swapped, so
    /// the whitelist never holds a partial decode. On any failure it is
    /// left empty and the error names the offending token.
    pub fn load_json(&self, raw: &[u8]) -> Result<()> {
        let parsed = parse_payload(raw);
        let mut entries = self.entries.write();
        match parsed {
            Ok(networks) => {
                *entries = networks;
                Ok(())
            }
            Err(e) => {
                entries.clear();
                Err(e)
            }
        }
    }

    fn entry_strings(&self) -> Vec<String> {
        self.entries.read().iter().map(|n| n.to_string()).collect()
    }
}

impl Default for BasicNetwork {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_payload(raw: &[u8]) -> Result<Vec<IpNetwork>> {
    codec::decode(raw)?
        .iter()
        .map(|token| validate::parse_network(token))
        .collect()
}

#[async_trait]
impl Acl for BasicNetwork {
    async fn permitted(&self, raw: &[u8]) -> bool {
        let Some(ip) = validate::valid_ip(raw) else {
            return false;
        };
        self.entries.read().iter().any(|n| n.contains(ip))
    }
}

impl NetworkAcl for BasicNetwork {
    fn add(&self, network: IpNetwork) {
        self.entries.write().push(validate::canonical(network));
    }

    fn remove(&self, network: IpNetwork) {
        let key = validate::canonical(network).to_string();
        let mut entries = self.entries.write();
        if let Some(index) = entries.iter().position(|n| n.to_string() == key) {
            entries.remove(index);
        }
    }
}

impl Serialize for BasicNetwork {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.entry_strings();
        match self.format {
            JsonFormat::Compatibility => serializer.serialize_str(&entries.join(",")),
            JsonFormat::New => entries.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BasicNetwork {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct NetworkVisitor;

        impl<'de> Visitor<'de> for NetworkVisitor {
            type Value = Vec<IpNetwork>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a comma-separated CIDR string or an array of CIDR strings")
            }

            fn visit_str<E: de::Error>(self, content: &str) -> std::result::Result<Self::Value, E> {
                codec::split_compat(content)
                    .map(|token| validate::parse_network(token).map_err(E::custom))
                    .collect()
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(token) = seq.next_element::<String>()? {
                    entries.push(validate::parse_network(&token).map_err(de::Error::custom)?);
                }
                Ok(entries)
            }
        }

        let entries = deserializer.deserialize_any(NetworkVisitor)?;
        Ok(Self {
            format: JsonFormat::default(),
            entries: RwLock::new(entries),
        })
    }
}
