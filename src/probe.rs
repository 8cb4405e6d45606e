// Single-attempt TCP reachability check. Resolution and connect share one timeout budget.

use crate::models::PortProbeResult;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::mpsc;
use std::time::{Duration, Instant};

const MIN_TIMEOUT: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
pub struct PortProbe {
    timeout: Duration,
}

impl PortProbe {
    /// `timeout` is floored at 1 ms; `TcpStream::connect_timeout` rejects zero.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: timeout.max(MIN_TIMEOUT),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One attempt bounded by the configured timeout.
    pub fn check_port(&self, host: &str, port: u16) -> PortProbeResult {
        self.check_port_within(host, port, self.timeout)
    }

    /// Resolve `host` to its first IPv4 address and try one connect, all
    /// within `timeout`. Every failure (resolution, refusal, timeout, socket
    /// exhaustion) is unreachable.
    pub fn check_port_within(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> PortProbeResult {
        let deadline = Instant::now() + timeout.max(MIN_TIMEOUT);
        let Some(addr) = resolve_ipv4(host, port, deadline) else {
            tracing::debug!(host, port, "no IPv4 address for host");
            return PortProbeResult { reachable: false };
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining < MIN_TIMEOUT {
            tracing::debug!(%addr, "timeout spent resolving host");
            return PortProbeResult { reachable: false };
        }
        let reachable = match TcpStream::connect_timeout(&addr, remaining) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, %addr, "port probe failed");
                false
            }
        };
        PortProbeResult { reachable }
    }
}

/// IPv4 literals skip the resolver; names are looked up on a helper thread
/// that is abandoned if it outlives `deadline`.
fn resolve_ipv4(host: &str, port: u16, deadline: Instant) -> Option<SocketAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return ip.is_ipv4().then(|| SocketAddr::new(ip, port));
    }
    let host = host.to_string();
    resolve_before(deadline, move || match (host.as_str(), port).to_socket_addrs() {
        Ok(mut addrs) => addrs.find(SocketAddr::is_ipv4),
        Err(e) => {
            tracing::debug!(error = %e, host = %host, "host resolution failed");
            None
        }
    })
}

fn resolve_before<F>(deadline: Instant, resolve: F) -> Option<SocketAddr>
where
    F: FnOnce() -> Option<SocketAddr> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("port-resolve".into())
        .spawn(move || {
            let _ = tx.send(resolve());
        });
    if let Err(e) = spawned {
        tracing::debug!(error = %e, "resolver thread spawn failed");
        return None;
    }
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(addr) => addr,
        Err(_) => {
            tracing::debug!("host resolution timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soon() -> Instant {
        Instant::now() + Duration::from_secs(2)
    }

    #[test]
    fn zero_timeout_is_floored() {
        assert_eq!(PortProbe::new(Duration::ZERO).timeout(), MIN_TIMEOUT);
    }

    #[test]
    fn resolves_literal_ipv4() {
        let addr = resolve_ipv4("127.0.0.1", 8080, soon()).unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.is_ipv4());
    }

    #[test]
    fn ipv6_literal_has_no_ipv4_address() {
        assert!(resolve_ipv4("::1", 80, soon()).is_none());
    }

    #[test]
    fn garbage_host_is_unreachable() {
        let probe = PortProbe::new(Duration::from_millis(200));
        assert!(!probe.check_port("not a host name", 80).reachable);
    }

    #[test]
    fn slow_resolution_is_cut_off_at_deadline() {
        let started = Instant::now();
        let addr = resolve_before(started + Duration::from_millis(100), || {
            std::thread::sleep(Duration::from_secs(3));
            Some(SocketAddr::from(([127, 0, 0, 1], 80)))
        });
        assert!(addr.is_none());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn fast_resolution_returns_address() {
        let addr = resolve_before(soon(), || Some(SocketAddr::from(([10, 0, 0, 1], 22))));
        assert_eq!(addr, Some(SocketAddr::from(([10, 0, 0, 1], 22))));
    }
}
