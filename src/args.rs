use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Placement Engine",
    long_about = "Places players on a difficulty scale and serves maps that match their rating"
)]
pub struct Args {
    /// CSV export of the map pool spreadsheet
    #[arg(short, long, env = "POOL_PATH", help = "Path to the map pool CSV")]
    pub pool_path: PathBuf,

    /// Where the player's rating and skip counter are kept between runs.
    /// Created on first save.
    #[arg(short, long, env = "STATE_PATH", default_value = "player_state.json")]
    pub state_path: PathBuf,

    /// JSON object of `{map}_{mapper}` keys to hosted image URLs
    #[arg(long, env = "LINKS_PATH", help = "Path to the image links JSON")]
    pub links_path: Option<PathBuf>,

    /// Fixes the random source so a session can be replayed
    #[arg(long, env = "ENGINE_SEED")]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
