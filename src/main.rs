use clap::Parser;
use storefront::config::cli::CliArgs;
use storefront::utils::{logger, validation::Validate};
use storefront::{AppConfig, AppContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init(args.verbose);

    tracing::info!("Starting storefront API");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let mut config = AppConfig::load(&args.config)?;
    config.apply_env_fallbacks();
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.store.data_dir = data_dir;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let ctx = AppContext::from_config(config)?;
    storefront::serve(ctx).await?;

    Ok(())
}
