use anyhow::Context;
use summit::domain::config::ApiConfig;
use summit::kernel::config::load_config;
use summit_logger::Logger;
use summit_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(std::env::args_os().nth(1)).context("Critical: Configuration is malformed")?;

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}
