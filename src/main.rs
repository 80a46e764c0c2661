// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls the level, default "info")
// 2. Parse command-line arguments using clap
// 3. Crawl the site
// 4. Print results and exit with the proper code
//    (0 = no dead links, 1 = dead links found, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use dead_link_crawler::report;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

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

    match cli.command {
        Commands::Crawl {
            url,
            config,
            max_requests,
            error_text,
            status_threshold,
            timeout,
            quiet,
            json,
        } => {
            let crawl_config = cli::build_config(
                url,
                config,
                max_requests,
                error_text,
                status_threshold,
                timeout,
                quiet,
            )?;
            handle_crawl(crawl_config, json).await
        }
    }
}

async fn handle_crawl(config: dead_link_crawler::CrawlConfig, json: bool) -> Result<i32> {
    let started = std::time::Instant::now();
    let links = dead_link_crawler::start_crawl(config).await?;

    if json {
        println!("{}", report::to_json(&links)?);
    } else {
        print!("{}", report::summary(&links));
        println!("Total time: {:.2} seconds", started.elapsed().as_secs_f64());
    }

    if report::dead_count(&links) > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
