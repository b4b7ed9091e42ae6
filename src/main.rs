use anyhow::Result;
use clap::Parser;
use mtg_proxies::{logging, App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::resolve()?;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config, cli).await?.run().await?;

    Ok(())
}
