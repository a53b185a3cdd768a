//! Stub whitelists for wiring the ACL interface into a system before any
//! real policy data exists.
//!
//! Every check permits and every operation emits a warning event, so a
//! deployment running with stubbed whitelisting is visible in telemetry.

use crate::traits::{Acl, HostAcl, NetworkAcl};
use crate::validate;

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use tracing::warn;

/// Always-permit stand-in for an address whitelist.
#[derive(Debug, Clone, Copy)]
pub struct HostStub;

impl HostStub {
    pub fn new() -> Self {
        warn!("address whitelisting is stubbed: every check will be permitted");
        Self
    }
}

impl Default for HostStub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Acl for HostStub {
    async fn permitted(&self, raw: &[u8]) -> bool {
        match validate::valid_ip(raw) {
            Some(ip) => warn!(%ip, "whitelist check bypassed: address whitelisting is stubbed"),
            None => warn!(?raw, "whitelist check bypassed: address whitelisting is stubbed"),
        }
        true
    }
}

impl HostAcl for HostStub {
    fn add(&self, ip: IpAddr) {
        warn!(%ip, "address added but address whitelisting is stubbed");
    }

    fn remove(&self, ip: IpAddr) {
        warn!(%ip, "address removed but address whitelisting is stubbed");
    }
}

/// Always-permit stand-in for a network whitelist.
#[derive(Debug, Clone, Copy)]
pub struct NetworkStub;

impl NetworkStub {
    pub fn new() -> Self {
        warn!("network whitelisting is stubbed: every check will be permitted");
        Self
    }
}

impl Default for NetworkStub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Acl for NetworkStub {
    async fn permitted(&self, raw: &[u8]) -> bool {
        match validate::valid_ip(raw) {
            Some(ip) => warn!(%ip, "whitelist check bypassed: network whitelisting is stubbed"),
            None => warn!(?raw, "whitelist check bypassed: network whitelisting is stubbed"),
        }
        true
    }
}

impl NetworkAcl for NetworkStub {
    fn add(&self, network: IpNetwork) {
        warn!(%network, "network added but network whitelisting is stubbed");
    }

    fn remove(&self, network: IpNetwork) {
        warn!(%network, "network removed but network whitelisting is stubbed");
    }
}
