use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cell-inspect")]
#[command(version)]
#[command(about = "Load a Nervos CKB cell by out point and report its size and validity")]
pub struct Args {
    /// Transaction hash of the out point (0x-prefixed)
    #[arg(long)]
    pub tx_hash: String,

    /// Output index of the out point
    #[arg(short, long, default_value_t = 0)]
    pub index: u32,

    /// Network to connect to (testnet, mainnet, devnet)
    #[arg(short, long, default_value = "testnet")]
    pub network: String,

    /// Custom RPC URL (overrides network default)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Data directory path, where the log file is written
    #[arg(long)]
    pub data_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
