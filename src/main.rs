use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use discspot::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Find the Spotify album for a Discogs release page
    Resolve(ResolveOptions),

    /// Show every search candidate and how it scores
    Search(SearchOptions),

    /// Complete authorization from a redirect URL
    Callback(CallbackOptions),

    /// Remove the cached Spotify token
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Discogs release or master page URL
    url: String,

    /// Release heading as shown on the page
    #[clap(long)]
    title: String,

    /// Release artist
    #[clap(long)]
    artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    #[clap(long)]
    title: String,

    #[clap(long)]
    artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CallbackOptions {
    /// Redirect URL including the `#access_token=...` fragment
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file, using process environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Resolve(opt) => cli::resolve(opt.url, opt.title, opt.artist).await,
        Command::Search(opt) => cli::search(opt.title, opt.artist).await,
        Command::Callback(opt) => cli::callback(opt.url).await,
        Command::Logout => cli::logout().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
