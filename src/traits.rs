//! Capability traits shared by every whitelist implementation.
//!
//! `Acl` is the one capability the dual whitelist consumes polymorphically.
//! Add/remove signatures are deliberately not unified across shapes: an
//! address whitelist mutates by `IpAddr`, a network whitelist by
//! `IpNetwork`, and the composition holds one collaborator of each.

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Membership predicate over IP addresses.
#[async_trait]
pub trait Acl: Send + Sync {
    /// Returns true if the address is whitelisted.
    ///
    /// `raw` is the byte form of the address (4 bytes IPv4, 16 bytes IPv6;
    /// see [`crate::validate::ip_octets`]). Malformed input is never an
    /// error: it is simply not permitted.
    async fn permitted(&self, raw: &[u8]) -> bool;
}

/// Whitelist of individual addresses.
pub trait HostAcl: Acl {
    /// Whitelists an address.
    fn add(&self, ip: IpAddr);

    /// Drops an address from the whitelist, silently ignoring absent ones.
    fn remove(&self, ip: IpAddr);
}

/// Whitelist of CIDR networks.
pub trait NetworkAcl: Acl {
    /// Whitelists a network. Overlapping networks are not detected.
    fn add(&self, network: IpNetwork);

    /// Drops the first entry matching the network's canonical string,
    /// silently ignoring absent ones.
    fn remove(&self, network: IpNetwork);
}
