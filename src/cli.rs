use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "stacks-wallet")]
#[command(version)]
#[command(about = "A TUI wallet for managing Stacks identities")]
pub struct Args {
    /// Tick rate in ticks per second
    #[arg(short, long, default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 30.0)]
    pub frame_rate: f64,

    /// Network to connect to (mainnet, testnet, localhost)
    /// If not specified, uses last selected network or defaults to mainnet
    #[arg(short, long)]
    pub network: Option<String>,

    /// Custom API URL (overrides network default)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Data directory path
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Add accounts by registering a username instead of creating a new identity
    #[arg(long)]
    pub usernames: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
