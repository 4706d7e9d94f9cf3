use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use app_lib::commands::{settings_cmd, stock_cmd, watchlist_cmd};
use app_lib::models::view::WatchlistView;
use app_lib::models::watchlist::DisplayStock;
use app_lib::services::notifier::Notifier;
use app_lib::services::renderer::RenderTarget;
use app_lib::AppState;

#[derive(Parser, Debug)]
#[command(name = "watchlist", version, about = "안전마진 관심종목 관리")]
struct Cli {
    /// Directory holding the database and downloads
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 관심종목 추가
    Add { code: String },
    /// 관심종목 삭제
    Remove { code: String },
    /// 관심종목 목록
    List,
    /// 관심종목 카드 출력
    Render {
        #[command(flatten)]
        stocks: StockInput,
        /// Write the HTML card list to this file instead of printing a summary
        #[arg(long)]
        html_out: Option<PathBuf>,
    },
    /// 엑셀 내보내기
    Export {
        #[command(flatten)]
        stocks: StockInput,
        #[arg(long)]
        limit: Option<u32>,
        /// Minimum dividend yield (%) applied by the server
        #[arg(long)]
        dividend_filter: Option<f64>,
    },
    /// 종목명으로 종목코드 검색
    Search { company_name: String },
    /// 설정 확인 / 변경
    Config {
        #[arg(long)]
        server_url: Option<String>,
        #[arg(long)]
        download_dir: Option<String>,
        #[arg(long)]
        export_timeout_secs: Option<u64>,
        #[arg(long)]
        strict_render: Option<bool>,
        #[arg(long)]
        default_limit: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct StockInput {
    /// JSON file with an array of display stocks
    #[arg(long)]
    stocks: Option<PathBuf>,
    /// Fill current price / intrinsic value / safety margin from the server
    #[arg(long)]
    fetch: bool,
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Render target backed by a file on disk.
struct FileTarget(PathBuf);

impl RenderTarget for FileTarget {
    fn replace_content(&mut self, markup: &str) -> Result<()> {
        std::fs::write(&self.0, markup)?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(app_lib::default_data_dir);
    let state = AppState::with_notifier(data_dir, Arc::new(StderrNotifier))?;

    match cli.command {
        Command::Add { code } => {
            let items = watchlist_cmd::add_watchlist_stock(&state, code).map_err(|e| anyhow!(e))?;
            print_codes(items.iter().map(|i| i.code.as_str()));
        }
        Command::Remove { code } => {
            let items = watchlist_cmd::remove_watchlist_stock(&state, code).map_err(|e| anyhow!(e))?;
            print_codes(items.iter().map(|i| i.code.as_str()));
        }
        Command::List => {
            let items = watchlist_cmd::get_watchlist_stocks(&state).map_err(|e| anyhow!(e))?;
            print_codes(items.iter().map(|i| i.code.as_str()));
        }
        Command::Render { stocks, html_out } => {
            let stocks = collect_stocks(&state, &stocks).await?;
            match html_out {
                Some(path) => {
                    let mut target = FileTarget(path.clone());
                    watchlist_cmd::render_watchlist_html(&state, stocks, Some(&mut target))
                        .map_err(|e| anyhow!(e))?;
                    log::info!("watchlist written to {}", path.display());
                }
                None => {
                    let view = watchlist_cmd::render_watchlist(&state, stocks).map_err(|e| anyhow!(e))?;
                    print_view(&view);
                }
            }
        }
        Command::Export { stocks, limit, dividend_filter } => {
            let stocks = collect_stocks(&state, &stocks).await?;
            let saved = watchlist_cmd::export_watchlist(&state, stocks, limit, dividend_filter)
                .await
                .map_err(|e| anyhow!(e))?;
            match saved {
                Some(path) => println!("{}", path),
                None => std::process::exit(1),
            }
        }
        Command::Search { company_name } => {
            let hits = stock_cmd::search_stocks(&state, company_name).await.map_err(|e| anyhow!(e))?;
            for hit in hits {
                println!("{}\t{}", hit.code, hit.name);
            }
        }
        Command::Config {
            server_url,
            download_dir,
            export_timeout_secs,
            strict_render,
            default_limit,
        } => {
            let settings = settings_cmd::update_settings(&state, |s| {
                if let Some(url) = server_url {
                    s.server_url = url;
                }
                if let Some(dir) = download_dir {
                    s.download_dir = Some(dir);
                }
                if let Some(secs) = export_timeout_secs {
                    s.export_timeout_secs = if secs == 0 { None } else { Some(secs) };
                }
                if let Some(strict) = strict_render {
                    s.strict_metric_rendering = strict;
                }
                if let Some(limit) = default_limit {
                    s.default_export_limit = limit;
                }
            })
            .map_err(|e| anyhow!(e))?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

async fn collect_stocks(state: &AppState, input: &StockInput) -> Result<Vec<DisplayStock>> {
    let supplied: Vec<DisplayStock> = match &input.stocks {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text).map_err(|e| anyhow!("{}: {}", path.display(), e))?
        }
        None => vec![],
    };
    if !input.fetch {
        return Ok(supplied);
    }
    stock_cmd::get_watchlist_enriched(state, supplied)
        .await
        .map_err(|e| anyhow!(e))
}

fn print_codes<'a>(codes: impl Iterator<Item = &'a str>) {
    for code in codes {
        println!("{}", code);
    }
}

fn print_view(view: &WatchlistView) {
    match view {
        WatchlistView::Empty { message } => println!("{}", message),
        WatchlistView::Cards { cards } => {
            for card in cards {
                println!("{}", card.title);
                for field in &card.fields {
                    println!("  {:<8} {}", field.label, field.value);
                }
            }
        }
    }
}
