use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use juicewrld::{CancellationToken, Client, SearchQuery, SongsQuery, cli, client::search, config, error, logging, warning};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log every API request to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Override the API base address
    #[clap(long, global = true)]
    api_url: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List songs page by page
    Songs(SongsOptions),

    /// Show a single song
    Song { id: u64 },

    /// Search songs
    Search(SearchOptions),

    /// List eras
    Eras,

    /// Show catalog statistics
    Stats,

    /// List song categories
    Categories,

    /// Resolve a song to a streamable URL
    Play(PlayOptions),

    /// Check whether a storage path can be streamed
    Stream { path: String },

    /// Browse remote files
    Browse(BrowseOptions),

    /// Show metadata of a remote file
    FileInfo { path: String },

    /// Download a remote file
    Download(DownloadOptions),

    /// Save the cover art of an audio file
    CoverArt(CoverArtOptions),

    /// Manage server-side zip archive jobs
    #[command(subcommand)]
    Zip(ZipCommand),

    /// Show the API endpoint directory
    Overview,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SongsOptions {
    #[clap(long)]
    page: Option<u32>,
    #[clap(long)]
    page_size: Option<u32>,
    /// Category filter (e.g. released, unreleased)
    #[clap(long)]
    category: Option<String>,
    #[clap(long)]
    era: Option<String>,
    #[clap(long)]
    search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    query: String,
    #[clap(long)]
    category: Option<String>,
    #[clap(long)]
    year: Option<u32>,
    /// Tag filter; can be repeated
    #[clap(long = "tag", action = ArgAction::Append, num_args = 1)]
    tags: Vec<String>,
    #[clap(long, default_value_t = search::DEFAULT_LIMIT)]
    limit: u32,
    #[clap(long, default_value_t = 0)]
    offset: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    id: u64,
    /// Open the stream URL in the default browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BrowseOptions {
    /// Directory to list; the root when omitted
    path: Option<String>,
    /// Recursive name search below the directory
    #[clap(long)]
    search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    path: String,
    /// Target file or directory; the download directory when omitted
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CoverArtOptions {
    path: String,
    #[clap(short, long)]
    output: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ZipCommand {
    /// Start a zip job for one or more paths
    Start {
        #[clap(required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    /// Show the status of a zip job
    Status { job_id: String },
    /// Cancel a zip job
    Cancel { job_id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let client = match Client::builder()
        .base_url(cli.api_url.clone().unwrap_or_else(config::api_url))
        .timeout(config::request_timeout())
        .user_agent(config::user_agent())
        .build()
    {
        Ok(client) => client,
        Err(e) => error!("Cannot create API client. Err: {}", e),
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    match cli.command {
        Command::Songs(opt) => {
            let mut query = SongsQuery::new();
            query.page = opt.page;
            query.page_size = opt.page_size;
            query.category = opt.category;
            query.era = opt.era;
            query.search = opt.search;
            cli::songs(&client, &cancel, query).await
        }
        Command::Song { id } => cli::song(&client, &cancel, id).await,
        Command::Search(opt) => {
            let mut query = SearchQuery::new(opt.query)
                .tags(opt.tags)
                .limit(opt.limit)
                .offset(opt.offset);
            query.category = opt.category;
            query.year = opt.year;
            cli::search(&client, &cancel, query).await
        }
        Command::Eras => cli::eras(&client, &cancel).await,
        Command::Stats => cli::stats(&client, &cancel).await,
        Command::Categories => cli::categories(&client, &cancel).await,
        Command::Play(opt) => cli::play(&client, &cancel, opt.id, opt.open).await,
        Command::Stream { path } => cli::stream(&client, &cancel, path).await,
        Command::Browse(opt) => cli::browse(&client, &cancel, opt.path, opt.search).await,
        Command::FileInfo { path } => cli::file_info(&client, &cancel, path).await,
        Command::Download(opt) => cli::download(&client, &cancel, opt.path, opt.output).await,
        Command::CoverArt(opt) => cli::cover_art(&client, &cancel, opt.path, opt.output).await,
        Command::Zip(ZipCommand::Start { paths }) => cli::zip_start(&client, &cancel, paths).await,
        Command::Zip(ZipCommand::Status { job_id }) => cli::zip_status(&client, &cancel, job_id).await,
        Command::Zip(ZipCommand::Cancel { job_id }) => cli::zip_cancel(&client, &cancel, job_id).await,
        Command::Overview => cli::overview(&client, &cancel).await,
        Command::Completions(_) => {}
    }

    client.close();
}
