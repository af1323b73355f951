//! Process-wide execution context.
//!
//! Privilege level and network reachability are facts about the whole
//! process, but they are carried as an explicitly-passed [`ExecContext`]
//! rather than consulted ambiently, so tests can substitute a fake context
//! without touching the real host.

use std::net::TcpStream;
use std::time::Duration;

use crate::shell::is_elevated;

/// Facts about the environment the provisioning sequence runs in.
///
/// Immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct ExecContext {
    /// Whether the process runs with root/administrative privilege.
    pub elevated: bool,

    /// Whether the network appeared reachable at construction time.
    pub network_available: bool,
}

impl ExecContext {
    /// Probe the real host.
    pub fn detect() -> Self {
        Self {
            elevated: is_elevated(),
            network_available: probe_network(),
        }
    }

    /// Construct a context with fixed answers (for tests).
    pub fn assume(elevated: bool, network_available: bool) -> Self {
        Self {
            elevated,
            network_available,
        }
    }
}

/// Best-effort reachability probe against a well-known public resolver.
///
/// A false negative only costs an extra warning; the failing step supplies
/// the authoritative diagnostic.
fn probe_network() -> bool {
    let timeout = Duration::from_secs(2);
    "1.1.1.1:443"
        .parse()
        .map(|addr| TcpStream::connect_timeout(&addr, timeout).is_ok())
        .unwrap_or(false)
}
