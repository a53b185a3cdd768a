//! Address validation and CIDR parsing shared by every ACL implementation.

use crate::error::{AclError, Result};
use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Interprets a raw byte representation as an IP address.
///
/// Four bytes decode as IPv4 and sixteen as IPv6; an IPv4-mapped IPv6
/// address collapses to its IPv4 form so it matches IPv4 whitelist entries.
/// Empty or malformed input yields `None`, which every `permitted` check
/// treats as "not permitted" without attempting a match.
pub fn valid_ip(raw: &[u8]) -> Option<IpAddr> {
    match raw.len() {
        4 => {
            let octets: [u8; 4] = raw.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        16 => {
            let octets: [u8; 16] = raw.try_into().ok()?;
            let v6 = Ipv6Addr::from(octets);
            match v6.to_ipv4_mapped() {
                Some(v4) => Some(IpAddr::V4(v4)),
                None => Some(IpAddr::V6(v6)),
            }
        }
        _ => None,
    }
}

/// Raw byte form of an address, suitable for [`crate::Acl::permitted`].
pub fn ip_octets(ip: IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

/// Parses CIDR text into its canonical network form.
///
/// Host bits are masked off, so `"192.168.3.17/24"` and `"192.168.3.0/24"`
/// name the same entry. The canonical `Display` form is the identity used
/// for removal.
pub fn parse_network(token: &str) -> Result<IpNetwork> {
    let parsed: IpNetwork = token
        .parse()
        .map_err(|_| AclError::InvalidNetwork(token.to_string()))?;
    Ok(canonical(parsed))
}

/// Masks host bits so structurally different values compare equal by
/// canonical string.
pub fn canonical(network: IpNetwork) -> IpNetwork {
    // new() cannot fail here: the prefix came from an already-valid network.
    IpNetwork::new(network.network(), network.prefix()).unwrap_or(network)
}

/// Parses a single IP address token.
pub fn parse_addr(token: &str) -> Result<IpAddr> {
    token
        .parse()
        .map_err(|_| AclError::InvalidAddress(token.to_string()))
}
