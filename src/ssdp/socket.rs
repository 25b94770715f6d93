use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

pub const SSDP_MCAST_V4: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const SSDP_PORT: u16 = 1900;
/// Hop limit for announcements: stay on the local network.
pub const MULTICAST_TTL: u32 = 2;

pub fn multicast_addr() -> SocketAddr {
    SocketAddrV4::new(SSDP_MCAST_V4, SSDP_PORT).into()
}

/// Create the announcement socket: bound to `0.0.0.0:0` (OS picks the source
/// port), `IP_MULTICAST_TTL` = [`MULTICAST_TTL`], egress on `iface` when given.
pub fn build_send_socket(iface: Option<Ipv4Addr>) -> std::io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_multicast_ttl_v4(MULTICAST_TTL)?;
    if let Some(addr) = iface {
        socket.set_multicast_if_v4(&addr)?;
    }
    socket.set_nonblocking(true)?;
    let bind_addr: SocketAddr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0).into();
    socket.bind(&bind_addr.into())?;
    let std_udp: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_udp)
}

/// Non-loopback IPv4 addresses, in the order the OS reports them.
/// Empty if enumeration fails.
pub fn list_non_loopback_v4() -> Vec<Ipv4Addr> {
    use getifaddrs::{Address, InterfaceFlags};

    let Ok(ifaces) = getifaddrs::getifaddrs() else {
        return vec![];
    };
    ifaces
        .filter(|i| !i.flags.contains(InterfaceFlags::LOOPBACK))
        .filter_map(|i| match &i.address {
            Address::V4(net_addr) => Some(net_addr.address),
            _ => None,
        })
        .collect()
}

/// Address advertised in `LOCATION` and resource URLs: the first non-loopback
/// IPv4 interface, or loopback when there is none.
pub fn resolve_host_ip() -> Ipv4Addr {
    list_non_loopback_v4()
        .into_iter()
        .next()
        .unwrap_or(Ipv4Addr::LOCALHOST)
}
