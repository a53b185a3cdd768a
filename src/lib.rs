//! Embeddable IP whitelisting for service gatekeepers.
//!
//! `ipacl` answers one question for a larger system (a proxy, an API
//! gateway): is this caller's address allowed to connect? It maintains two
//! whitelist shapes, individually permitted addresses ([`BasicHost`]) and
//! permitted CIDR networks ([`BasicNetwork`]), and composes them behind a
//! single check ([`BasicDual`]) under a sequenced or concurrent evaluation
//! policy. Stub variants permit everything while warning loudly, so the
//! interface can be wired in before real policy data exists.
//!
//! Whitelist state persists as a JSON value embedded in a larger document,
//! in either of two encodings (see [`JsonFormat`]); decoding auto-detects
//! the shape. Checks are fail-closed: malformed input is "not permitted",
//! never an error.

pub mod codec;
pub mod dual;
pub mod error;
pub mod host;
pub mod network;
pub mod stub;
pub mod traits;
pub mod validate;

pub use codec::JsonFormat;
pub use dual::{BasicDual, LaunchPolicy};
pub use error::{AclError, Result};
pub use host::BasicHost;
pub use network::BasicNetwork;
pub use stub::{HostStub, NetworkStub};
pub use traits::{Acl, HostAcl, NetworkAcl};
