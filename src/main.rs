use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use site_crawler::api::{self, AppState, ACCESS_LOG_FORMAT};
use site_crawler::{AppConfig, CrawlRequest, CrawlStatus, Crawler};

#[derive(Parser, Debug)]
#[command(name = "site-crawler", version, about = "Crawl a site and report per-page metadata")]
struct Cli {
    /// TOML config file (falls back to $CRAWLER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the crawl API (default)
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Crawl one site and print the result as JSON
    Crawl {
        /// Seed URL; also the prefix that marks a link as internal
        url: String,

        /// Fetch only the seed page
        #[arg(long)]
        single_page: bool,

        #[arg(long)]
        max_depth: Option<usize>,

        #[arg(long)]
        max_pages: Option<usize>,

        /// Print the full crawl report instead of the page list
        #[arg(long)]
        report: bool,
    },
}

#[actix_web::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
            Ok(0)
        }
        Commands::Crawl {
            url,
            single_page,
            max_depth,
            max_pages,
            report,
        } => {
            if let Some(max_depth) = max_depth {
                config.crawler.max_depth = max_depth;
            }
            if max_pages.is_some() {
                config.crawler.max_pages = max_pages;
            }
            crawl_once(config, url, single_page, report).await
        }
    }
}

async fn crawl_once(
    config: AppConfig,
    url: String,
    single_page: bool,
    report: bool,
) -> Result<i32> {
    let crawler = Crawler::from_config(config.crawler)?;
    let result = crawler.run(CrawlRequest::new(url, single_page)).await;
    let failed = result.status == CrawlStatus::Failed;

    let output = if report {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string_pretty(&result.pages)?
    };
    println!("{}", output);

    Ok(if failed { 1 } else { 0 })
}

async fn serve(config: AppConfig) -> Result<()> {
    let crawler = Crawler::from_config(config.crawler)?;
    let state = web::Data::new(AppState { crawler });
    let host = config.server.host;
    let port = config.server.port;

    log::info!("🚀 Starting site crawler");
    log::info!("🌐 Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::new(ACCESS_LOG_FORMAT))
            .wrap(middleware::Compress::default())
            .wrap(cors)
            .configure(api::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("Server error")
}
