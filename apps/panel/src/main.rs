use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpPanelApi, ListOperatorsParams, PanelApi, RequestState};
use page_router::{Navigator, Page, RouteTable};
use serde::Serialize;
use shared::domain::Cnpj;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod pages;

use config::{load_settings, Settings};
use pages::Pages;

#[derive(Parser, Debug)]
#[command(name = "panel", about = "Browse operator expense data from the panel API")]
struct Cli {
    #[arg(long, default_value = "panel.toml")]
    config: PathBuf,
    /// Overrides the API base url from settings and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate expense statistics.
    Stats,
    /// One page of the operator listing.
    Operators {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Detail record of one operator.
    Operator {
        cnpj: String,
    },
    /// Expense history of one operator, in backend order.
    Expenses {
        cnpj: String,
    },
    /// Resolves a client path and loads the page it routes to.
    Open {
        path: String,
    },
}

#[derive(Serialize)]
struct OpenedPage<'a> {
    route: &'a page_router::ResolvedRoute,
    model: &'a pages::PageModel,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = load_settings(&cli.config)?;
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    Ok(settings.validated()?)
}

fn build_api(settings: &Settings) -> Result<Arc<dyn PanelApi>> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = settings.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build().context("failed to build HTTP client")?;
    Ok(HttpPanelApi::with_client(http, settings.api_base_url.clone()).into_shared())
}

fn loaded<T>(value: Option<T>, state: RequestState) -> Result<T> {
    value.ok_or_else(|| anyhow!(state.error.unwrap_or_else(|| "request failed".to_string())))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(&cli)?;
    info!(api_base_url = %settings.api_base_url, "using panel API");
    let pages = Pages::new(build_api(&settings)?);

    match cli.command {
        Command::Stats => {
            let accessor = pages.statistics();
            let statistics = loaded(accessor.load_statistics().await, accessor.state())?;
            print_json(&statistics)
        }
        Command::Operators {
            page,
            limit,
            search,
        } => {
            let accessor = pages.operators();
            let params = ListOperatorsParams {
                page,
                limit,
                search,
            };
            let listing = loaded(accessor.list_operators(&params).await, accessor.state())?;
            print_json(&listing)
        }
        Command::Operator { cnpj } => {
            let accessor = pages.operators();
            let operator = loaded(
                accessor.operator_detail(&Cnpj::new(cnpj)).await,
                accessor.state(),
            )?;
            print_json(&operator)
        }
        Command::Expenses { cnpj } => {
            let accessor = pages.operators();
            let history = loaded(
                accessor.expense_history(&Cnpj::new(cnpj)).await,
                accessor.state(),
            )?;
            print_json(&history)
        }
        Command::Open { path } => {
            let mut navigator = Navigator::new(RouteTable::standard()?);
            let route = navigator.push(&path)?;
            if let Some(from) = &route.redirected_from {
                info!(from = %from, to = %route.path, "redirected");
            }
            if let Page::NotFound { path } = &route.page {
                bail!("no page for '{path}'");
            }

            let model = pages.load(&route.page).await;
            print_json(&OpenedPage {
                route: &route,
                model: &model,
            })?;
            if !model.errors().is_empty() {
                bail!("page loaded with errors: {}", model.errors().join("; "));
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli).await
}
