//! 连接中心实现
//!
//! 监听 TCP 端口，接收设备上报的报文。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let mut hub = ConnectionHub::builder()
//!     .listen_on("0.0.0.0:9009")
//!     .accept_workers(4)
//!     .handler_workers(256)
//!     .protocol(protocol)
//!     .build()?;
//! hub.start().await?;
//! hub.wait().await;
//! ```

use crate::config::{HubBuilder, HubConfig};
use crate::dispatch::{self, DispatchReceiver, DispatchSender};
use crate::error::HubError;
use autobus_pipeline::Protocol;
use autobus_telemetry::{TelemetryMetrics, new_connection_id};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// 单次读取的最大字节数
pub const READ_BUFFER_SIZE: usize = 256;

/// 错误通道容量
const ERROR_CHANNEL_CAPACITY: usize = 64;

type Connection = (TcpStream, SocketAddr);

/// 连接中心
///
/// - accept worker：循环 accept，把连接交给空闲的 handler worker；首次失败即退出
/// - handler worker：独占一个连接直到读写失败或 EOF，然后接下一个
/// - 错误拦截：汇总所有连接错误并记录日志（EOF 除外），不做任何补救
pub struct ConnectionHub {
    config: HubConfig,
    protocol: Arc<dyn Protocol>,
    metrics: Arc<TelemetryMetrics>,
    local_addr: Option<SocketAddr>,
    workers: Vec<JoinHandle<()>>,
}

impl ConnectionHub {
    pub fn builder() -> HubBuilder {
        HubBuilder::new()
    }

    pub(crate) fn new(
        config: HubConfig,
        protocol: Arc<dyn Protocol>,
        metrics: Arc<TelemetryMetrics>,
    ) -> Self {
        Self {
            config,
            protocol,
            metrics,
            local_addr: None,
            workers: Vec::new(),
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<TelemetryMetrics> {
        &self.metrics
    }

    /// 启动后实际绑定的地址
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// 绑定监听器并启动所有 worker，立即返回。
    ///
    /// 绑定失败时不启动任何 worker。
    pub async fn start(&mut self) -> Result<SocketAddr, HubError> {
        if self.local_addr.is_some() {
            return Err(HubError::AlreadyStarted);
        }

        info!(target: "autobus.hub", addr = %self.config.listen_addr, "starting connection hub");
        let bind_error = |source: std::io::Error| HubError::Bind {
            addr: self.config.listen_addr.clone(),
            source,
        };
        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;
        let listener = Arc::new(listener);

        let (conn_tx, conn_rx) = dispatch::channel::<Connection>();
        let (err_tx, err_rx) = mpsc::channel::<HubError>(ERROR_CHANNEL_CAPACITY);

        // accept + handlers + 错误拦截
        self.workers
            .reserve(self.config.accept_workers + self.config.handler_workers + 1);

        for worker in 0..self.config.accept_workers {
            self.workers.push(tokio::spawn(accept_loop(
                worker,
                Arc::clone(&listener),
                conn_tx.clone(),
                err_tx.clone(),
                Arc::clone(&self.metrics),
            )));
        }

        for worker in 0..self.config.handler_workers {
            let handler = Handler {
                worker,
                protocol: Arc::clone(&self.protocol),
                metrics: Arc::clone(&self.metrics),
                debug: self.config.debug,
            };
            self.workers.push(tokio::spawn(handler.run(conn_rx.clone(), err_tx.clone())));
        }

        self.workers.push(tokio::spawn(intercept_errors(err_rx)));

        info!(
            target: "autobus.hub",
            addr = %local_addr,
            accept_workers = self.config.accept_workers,
            handler_workers = self.config.handler_workers,
            "connection hub started"
        );
        self.local_addr = Some(local_addr);
        Ok(local_addr)
    }

    /// 等待所有 worker 退出。
    ///
    /// 没有停机信号：只有当所有 accept worker 都因监听器失败退出后，
    /// handler worker 与错误拦截循环才会随之结束。
    pub async fn wait(&mut self) {
        for handle in self.workers.drain(..) {
            if let Err(err) = handle.await {
                error!(target: "autobus.hub", error = %err, "hub worker panicked");
            }
        }
    }
}

async fn accept_loop(
    worker: usize,
    listener: Arc<TcpListener>,
    conns: DispatchSender<Connection>,
    errors: mpsc::Sender<HubError>,
    metrics: Arc<TelemetryMetrics>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                metrics.record_connection_accepted();
                // 阻塞直到有 handler 空闲
                if conns.send((stream, peer)).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                metrics.record_accept_error();
                let _ = errors.send(HubError::Accept(err)).await;
                break;
            }
        }
    }
    warn!(target: "autobus.hub", worker, "accept worker exited");
}

struct Handler {
    worker: usize,
    protocol: Arc<dyn Protocol>,
    metrics: Arc<TelemetryMetrics>,
    debug: bool,
}

impl Handler {
    async fn run(self, conns: DispatchReceiver<Connection>, errors: mpsc::Sender<HubError>) {
        while let Some((stream, peer)) = conns.recv().await {
            let span = info_span!(
                "connection",
                connection_id = %new_connection_id(),
                peer = %peer,
                worker = self.worker
            );
            let err = self.serve(stream, peer).instrument(span).await;
            if !err.is_eof() {
                self.metrics.record_connection_error();
            }
            let _ = errors.send(err).await;
        }
        debug!(target: "autobus.hub", worker = self.worker, "handler worker exited");
    }

    /// 服务单个连接直到读写失败或对端关闭，返回结束原因。连接随之关闭。
    async fn serve(&self, mut stream: TcpStream, peer: SocketAddr) -> HubError {
        debug!(target: "autobus.hub", "connection accepted");
        let mut buf = [0u8; READ_BUFFER_SIZE];

        loop {
            let n = match stream.read(&mut buf).await {
                Ok(0) => return HubError::Eof { peer },
                Ok(n) => n,
                Err(source) => return HubError::Read { peer, source },
            };

            // 每次读取独立处理，不做跨读取的拼包
            let response = match self.protocol.handle_message(&buf[..n]).await {
                Ok(Some(response)) => response,
                Ok(None) => continue,
                Err(err) => {
                    if self.debug {
                        debug!(target: "autobus.hub", error = %err, "dropping this message");
                    }
                    continue;
                }
            };

            if let Err(source) = stream.write_all(&response).await {
                return HubError::Write { peer, source };
            }
            self.metrics.record_response_written();
        }
    }
}

async fn intercept_errors(mut errors: mpsc::Receiver<HubError>) {
    while let Some(err) = errors.recv().await {
        if !err.is_eof() {
            warn!(target: "autobus.hub", error = %err, "got error");
        }
    }
}
