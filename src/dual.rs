//! Composition of an address whitelist and a network whitelist behind one
//! `permitted` check.

use crate::host::BasicHost;
use crate::network::BasicNetwork;
use crate::stub::{HostStub, NetworkStub};
use crate::traits::{Acl, HostAcl, NetworkAcl};

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// How a dual whitelist evaluates its two sub-checks. Fixed at
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchPolicy {
    /// Check addresses first; the network check only runs on a miss.
    #[default]
    Sequenced,
    /// Run both checks as independent tasks and OR the results. Both tasks
    /// are always awaited, even when the first to finish already permits;
    /// there is no timeout.
    Concurrent,
}

/// A whitelist over both individual addresses and CIDR networks.
///
/// An address is permitted when either sub-whitelist permits it. The two
/// collaborators are held behind their capability traits, so any
/// [`HostAcl`]/[`NetworkAcl`] pair composes, stubs included. Callers that
/// need to serialize the sub-whitelists should construct them first, keep
/// their own `Arc` clones, and inject them via [`BasicDual::with_acls`].
pub struct BasicDual {
    addresses: Arc<dyn HostAcl>,
    networks: Arc<dyn NetworkAcl>,
    policy: LaunchPolicy,
}

impl BasicDual {
    /// Creates a dual whitelist over empty basic sub-whitelists.
    pub fn new(policy: LaunchPolicy) -> Self {
        Self::with_acls(
            Arc::new(BasicHost::new()),
            Arc::new(BasicNetwork::new()),
            policy,
        )
    }

    /// Composes caller-supplied sub-whitelists.
    pub fn with_acls(
        addresses: Arc<dyn HostAcl>,
        networks: Arc<dyn NetworkAcl>,
        policy: LaunchPolicy,
    ) -> Self {
        Self {
            addresses,
            networks,
            policy,
        }
    }

    /// Creates a dual whitelist over stub sub-whitelists: every check is
    /// permitted and warned about. For wiring the interface in before real
    /// policy data exists.
    pub fn stubbed() -> Self {
        Self::with_acls(
            Arc::new(HostStub::new()),
            Arc::new(NetworkStub::new()),
            LaunchPolicy::Sequenced,
        )
    }

    /// Whitelists an address.
    pub fn add_address(&self, ip: IpAddr) {
        self.addresses.add(ip);
    }

    /// Whitelists a network. Overlap with whitelisted addresses or other
    /// networks is not detected.
    pub fn add_network(&self, network: IpNetwork) {
        self.networks.add(network);
    }

    /// Drops an address from the whitelist.
    pub fn remove_address(&self, ip: IpAddr) {
        self.addresses.remove(ip);
    }

    /// Drops a network from the whitelist.
    pub fn remove_network(&self, network: IpNetwork) {
        self.networks.remove(network);
    }
}

#[async_trait]
impl Acl for BasicDual {
    async fn permitted(&self, raw: &[u8]) -> bool {
        match self.policy {
            LaunchPolicy::Sequenced => {
                self.addresses.permitted(raw).await || self.networks.permitted(raw).await
            }
            LaunchPolicy::Concurrent => {
                let addresses = Arc::clone(&self.addresses);
                let networks = Arc::clone(&self.networks);
                let addr_input = raw.to_vec();
                let net_input = raw.to_vec();

                let addr_check =
                    tokio::spawn(async move { addresses.permitted(&addr_input).await });
                let net_check = tokio::spawn(async move { networks.permitted(&net_input).await });

                // Rendezvous on both tasks; a panicked check counts as a
                // miss (fail-closed). Non-short-circuiting OR keeps both
                // results consumed.
                let (addr_hit, net_hit) = tokio::join!(addr_check, net_check);
                addr_hit.unwrap_or(false) | net_hit.unwrap_or(false)
            }
        }
    }
}
