use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront backend API server")]
pub struct CliArgs {
    #[arg(long, default_value = "storefront.toml")]
    pub config: String,

    #[arg(long, help = "Override the configured bind address")]
    pub bind: Option<String>,

    #[arg(long, help = "Override the configured data directory")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
