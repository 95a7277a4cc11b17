//! UDP output for the transmit loop

use std::io;
use std::net::{SocketAddr, UdpSocket};

use log::info;
use myrtio_stage_light::PacketSink;

/// Sends Art-Net datagrams from one local socket
pub(crate) struct UdpSink {
    socket: UdpSocket,
}

impl UdpSink {
    pub(crate) fn bind(address: &str) -> io::Result<Self> {
        let socket = UdpSocket::bind(address)?;
        // Nodes are often addressed through the subnet broadcast
        socket.set_broadcast(true)?;
        info!("art-net socket bound to {}", socket.local_addr()?);
        Ok(Self { socket })
    }
}

impl PacketSink for UdpSink {
    type Error = io::Error;

    fn send(&mut self, endpoint: SocketAddr, packet: &[u8]) -> Result<(), Self::Error> {
        self.socket.send_to(packet, endpoint).map(|_| ())
    }
}
