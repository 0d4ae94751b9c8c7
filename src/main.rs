use anyhow::Context;

use log::info;

use fastcgi_router::{config, handlers, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_nanos()
        .init();

    let config_file = std::env::args()
        .nth(1)
        .context("config file required as command line argument")?;

    let configuration = config::read_configuration(config_file)
        .await
        .context("read_configuration error")?;

    let handlers = handlers::create_handlers(configuration.router_configuration())
        .context("create_handlers error")?;

    let server = server::Server::new(handlers, configuration.server_configuration());

    info!("starting server");

    server.run().await
}
