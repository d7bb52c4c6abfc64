use std::net::{SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpSocket;
use tokio::time::timeout;
use tracing::debug;

use knockr_common::models::{ProbeOutcome, ScanTask};

use crate::scanner::Prober;

/// Full-handshake connect probe over a fresh non-blocking IPv4 socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber;

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, task: &ScanTask) -> ProbeOutcome {
        connect_probe(task.socket_addr(), task.timeout).await
    }
}

/// Attempts one connection to `addr`, giving up after `probe_timeout`.
///
/// The runtime registers the socket with its readiness poller, waits for it
/// to become writable and then reads the pending socket error to decide
/// whether the handshake succeeded. The socket is closed when this returns.
pub async fn connect_probe(addr: SocketAddrV4, probe_timeout: Duration) -> ProbeOutcome {
    let socket: TcpSocket = match TcpSocket::new_v4() {
        Ok(socket) => socket,
        Err(e) => {
            debug!(%addr, "could not create socket: {e}");
            return ProbeOutcome::Unreachable(e.to_string());
        }
    };

    match timeout(probe_timeout, socket.connect(SocketAddr::V4(addr))).await {
        Ok(Ok(_stream)) => ProbeOutcome::Open,
        Ok(Err(e)) => ProbeOutcome::from(&e),
        Err(_elapsed) => ProbeOutcome::TimedOut,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

    async fn closed_loopback_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[tokio::test]
    async fn connect_probe_should_find_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();

        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);
        assert_eq!(connect_probe(addr, PROBE_TIMEOUT).await, ProbeOutcome::Open);
    }

    #[tokio::test]
    async fn connect_probe_should_report_refused_port() {
        let port: u16 = closed_loopback_port().await;

        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);
        let outcome: ProbeOutcome = connect_probe(addr, PROBE_TIMEOUT).await;
        assert!(!outcome.is_open());
        assert_eq!(outcome, ProbeOutcome::Refused);
    }

    #[tokio::test]
    async fn prober_uses_task_address() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();

        let cfg = knockr_common::config::ScanConfig::default();
        let task = ScanTask::new(&cfg, port);
        assert!(TcpConnectProber.probe(&task).await.is_open());
    }

    #[tokio::test]
    #[ignore]
    async fn connect_probe_should_timeout_on_unreachable_ip() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(203, 0, 113, 1), 443);
        let outcome: ProbeOutcome = connect_probe(addr, Duration::from_millis(200)).await;
        assert!(!outcome.is_open());
    }
}
