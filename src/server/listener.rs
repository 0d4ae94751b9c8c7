use std::fmt::Debug;

use anyhow::Context;

use async_trait::async_trait;

use log::debug;

use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{tcp, unix, TcpListener, UnixListener},
};

pub type SplitSocket<L> = (
    <L as SocketListener>::ReadHalf,
    <L as SocketListener>::WriteHalf,
);

/// A bound socket the web server connects to.
#[async_trait]
pub trait SocketListener: Sized + Send + Sync + 'static {
    type ReadHalf: AsyncRead + Unpin + Send + Sync + 'static;
    type WriteHalf: AsyncWrite + Unpin + Send + Sync + 'static;
    type Address: Debug + Send;

    async fn listen(bind_address: &str) -> anyhow::Result<Self>;

    async fn accept_split(&self) -> std::io::Result<(SplitSocket<Self>, Self::Address)>;
}

#[async_trait]
impl SocketListener for TcpListener {
    type ReadHalf = tcp::OwnedReadHalf;
    type WriteHalf = tcp::OwnedWriteHalf;
    type Address = std::net::SocketAddr;

    async fn listen(bind_address: &str) -> anyhow::Result<Self> {
        TcpListener::bind(bind_address)
            .await
            .with_context(|| format!("TcpListener::bind error bind_address '{}'", bind_address))
    }

    async fn accept_split(&self) -> std::io::Result<(SplitSocket<Self>, Self::Address)> {
        let (stream, address) = self.accept().await?;
        Ok((stream.into_split(), address))
    }
}

#[async_trait]
impl SocketListener for UnixListener {
    type ReadHalf = unix::OwnedReadHalf;
    type WriteHalf = unix::OwnedWriteHalf;
    type Address = unix::SocketAddr;

    async fn listen(bind_address: &str) -> anyhow::Result<Self> {
        // a socket file left by an earlier run blocks bind, the path may not exist.
        let remove_result = tokio::fs::remove_file(bind_address).await;
        debug!("remove_result = {:?}", remove_result);

        UnixListener::bind(bind_address)
            .with_context(|| format!("UnixListener::bind error path '{}'", bind_address))
    }

    async fn accept_split(&self) -> std::io::Result<(SplitSocket<Self>, Self::Address)> {
        let (stream, address) = self.accept().await?;
        Ok((stream.into_split(), address))
    }
}
