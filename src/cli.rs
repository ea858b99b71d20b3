use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "servitui", version, about = "TUI for browsing home-service professionals")]
pub struct Args {
    /// Base URL of the marketplace API (e.g., "http://localhost:5000/api")
    #[arg(short, long)]
    pub api_url: Option<String>,

    /// Category to open on startup (e.g., "electricista")
    #[arg(short, long)]
    pub category: Option<String>,
}
