mod listener;
mod processor;

use std::sync::Arc;

use anyhow::Context;

use log::{debug, info};

use tokio::net::{TcpListener, UnixListener};

use crate::{connection::FastCGIConnectionIDFactory, handlers::RequestHandler};

use listener::SocketListener;
use processor::ConnectionProcessor;

pub struct Server {
    server_configuration: crate::config::ServerConfiguration,
    connection_processor: Arc<ConnectionProcessor>,
}

impl Server {
    pub fn new(
        router: Arc<dyn RequestHandler>,
        server_configuration: &crate::config::ServerConfiguration,
    ) -> Self {
        Self {
            server_configuration: server_configuration.clone(),
            connection_processor: ConnectionProcessor::new(
                router,
                server_configuration.fastcgi_connection_configuration(),
            ),
        }
    }

    async fn accept_loop<L: SocketListener>(&self) -> anyhow::Result<()> {
        let bind_address = self.server_configuration.bind_address();

        let listener = L::listen(bind_address).await?;

        info!(
            "{:?} server listening on '{}'",
            self.server_configuration.server_type(),
            bind_address
        );

        let connection_id_factory = FastCGIConnectionIDFactory::new();

        loop {
            let (split_socket, address) = listener
                .accept_split()
                .await
                .context("accept error")?;

            let connection_id = connection_id_factory.new_connection_id();

            debug!("connection_id {:?} from {:?}", connection_id, address);

            Arc::clone(&self.connection_processor).handle_connection(connection_id, split_socket);
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.server_configuration.server_type() {
            crate::config::ServerType::TCP => self.accept_loop::<TcpListener>().await,
            crate::config::ServerType::UNIX => self.accept_loop::<UnixListener>().await,
        }
    }
}
