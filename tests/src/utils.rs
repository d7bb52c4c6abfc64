use std::net::{Ipv4Addr, SocketAddrV4, TcpListener};
use std::time::Duration;

use knockr_common::config::ScanConfig;
use knockr_common::network::range::PortRange;
use knockr_common::network::target::ScanTarget;

const ATTEMPTS: usize = 64;

/// A loopback listener whose two neighbouring ports have nothing listening.
pub struct ListenerFixture {
    _listener: TcpListener,
    pub port: u16,
}

impl ListenerFixture {
    pub fn new() -> Option<Self> {
        for _ in 0..ATTEMPTS {
            let listener = TcpListener::bind(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)).ok()?;
            let port: u16 = listener.local_addr().ok()?.port();

            if port > 1 && port < u16::MAX && is_free(port - 1) && is_free(port + 1) {
                return Some(Self {
                    _listener: listener,
                    port,
                });
            }
        }
        None
    }

    /// Binds a fixed port, `None` if something else already holds it.
    pub fn on_port(port: u16) -> Option<Self> {
        let listener = TcpListener::bind(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)).ok()?;
        Some(Self {
            _listener: listener,
            port,
        })
    }
}

/// True if nothing is bound to `port` on loopback right now.
pub fn is_free(port: u16) -> bool {
    TcpListener::bind(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)).is_ok()
}

pub fn loopback_config(start: u16, end: u16, concurrency: u32) -> ScanConfig {
    ScanConfig {
        target: ScanTarget::new(Ipv4Addr::LOCALHOST).unwrap(),
        range: PortRange::new(start.into(), end.into()).unwrap(),
        timeout: Duration::from_secs(1),
        concurrency,
        verbose: false,
    }
}
