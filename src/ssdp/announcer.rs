use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ssdp::messages::{self, Advertisement};
use crate::ssdp::socket;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
/// How long `stop()` waits for the loop to exit before aborting it.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Where announcement datagrams go. Implemented for `tokio::net::UdpSocket`;
/// tests substitute an in-memory recorder.
pub trait DatagramSink: Send + Sync + 'static {
    fn send_datagram(
        &self,
        payload: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send;
}

impl DatagramSink for UdpSocket {
    fn send_datagram(
        &self,
        payload: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send {
        self.send_to(payload, target)
    }
}

#[derive(Debug, Clone)]
pub struct AnnouncerConfig {
    pub device_uuid: String,
    /// Full URL of the device description, e.g. `http://192.168.1.5:8200/description.xml`.
    pub location: String,
    pub server: String,
    pub interval: Duration,
    pub target: SocketAddr,
}

impl AnnouncerConfig {
    pub fn new(device_uuid: impl Into<String>, host: Ipv4Addr, http_port: u16) -> Self {
        Self {
            device_uuid: device_uuid.into(),
            location: format!("http://{host}:{http_port}/description.xml"),
            server: messages::server_signature(),
            interval: DEFAULT_INTERVAL,
            target: socket::multicast_addr(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

struct Running {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Periodic `ssdp:alive` announcer.
///
/// `start()` spawns a task that sends one burst immediately and then one every
/// `interval`. `stop()` cancels it, interrupting either the sleep or a burst in
/// progress, and waits at most [`STOP_TIMEOUT`]. Both are idempotent.
pub struct Announcer<S: DatagramSink> {
    config: Arc<AnnouncerConfig>,
    sink: Arc<S>,
    running: Option<Running>,
}

impl Announcer<UdpSocket> {
    /// Announcer over a real multicast socket, egressing on `iface` when given.
    pub fn multicast(config: AnnouncerConfig, iface: Option<Ipv4Addr>) -> io::Result<Self> {
        let sock = socket::build_send_socket(iface)?;
        Ok(Self::new(config, sock))
    }
}

impl<S: DatagramSink> Announcer<S> {
    pub fn new(config: AnnouncerConfig, sink: S) -> Self {
        Self {
            config: Arc::new(config),
            sink: Arc::new(sink),
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|r| !r.task.is_finished())
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.running.is_some() {
            tracing::debug!("SSDP: announcer already running");
            return;
        }
        let token = CancellationToken::new();
        let task = tokio::spawn(run(
            Arc::clone(&self.config),
            Arc::clone(&self.sink),
            token.clone(),
        ));
        tracing::info!(
            "SSDP: announcing {} every {}s",
            self.config.location,
            self.config.interval.as_secs()
        );
        self.running = Some(Running { token, task });
    }

    pub async fn stop(&mut self) {
        let Some(Running { token, mut task }) = self.running.take() else {
            return;
        };
        token.cancel();
        if tokio::time::timeout(STOP_TIMEOUT, &mut task).await.is_err() {
            tracing::warn!("SSDP: announcer did not stop within {:?}, aborting", STOP_TIMEOUT);
            task.abort();
        }
        tracing::debug!("SSDP: announcer stopped");
    }
}

impl<S: DatagramSink> Drop for Announcer<S> {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
        }
    }
}

async fn run<S: DatagramSink>(config: Arc<AnnouncerConfig>, sink: Arc<S>, token: CancellationToken) {
    let ads = messages::advertisements(&config.device_uuid);
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            sent = send_burst(&config, &ads, sink.as_ref()) => {
                tracing::debug!("SSDP: sent {}/{} NOTIFY alive", sent, ads.len());
            }
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(config.interval) => {}
        }
    }
}

/// Send one NOTIFY per advertisement. A failed send is logged and the rest
/// still go out. Returns how many were sent.
pub async fn send_burst<S: DatagramSink>(
    config: &AnnouncerConfig,
    ads: &[Advertisement],
    sink: &S,
) -> usize {
    let mut sent = 0;
    for ad in ads {
        let msg = messages::notify_alive(&config.location, &config.server, ad);
        match sink.send_datagram(msg.as_bytes(), config.target).await {
            Ok(_) => sent += 1,
            Err(e) => tracing::warn!("SSDP: NOTIFY for {} failed: {}", ad.nt, e),
        }
    }
    sent
}
