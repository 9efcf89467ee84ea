//! Headless console: each command mounts the same views a UI page would
//! and prints the resulting store state.

mod args;
mod render;

pub use args::{Cli, Command, RuleArgs, RulesCommand, SearchArgs};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::app::AppContext;
use crate::config::{Config, API_URL_ENV};
use crate::model::{Page, RuleRequest, SearchQuery, Transaction};
use crate::query::keys;

/// Resolve configuration: file, then environment, then `--api-url`.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_from(&Config::config_path()).context("Failed to load config")?,
    };
    config.apply_env_overrides(std::env::var(API_URL_ENV).ok());
    config.apply_env_overrides(cli.api_url.clone());
    if let Command::Dashboard { limit: Some(limit) } = &cli.command {
        config.display.recent_limit = *limit;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let ctx = AppContext::new(config).context("Failed to create API client")?;
    let json = cli.json;

    let result = dispatch(&ctx, cli.command, json).await;
    for notice in ctx.notifications().drain() {
        eprintln!("{}", render::notice(&notice));
    }
    result
}

async fn dispatch(ctx: &AppContext, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Dashboard { .. } => {
            let view = ctx.dashboard_view();
            view.load().await;
            let state = view.store().snapshot();
            if let Some(error) = &state.error {
                bail!("Failed to load dashboard: {}", error);
            }
            if json {
                print_json(&serde_json::json!({
                    "stats": state.stats,
                    "recentTransactions": state.recent_transactions,
                }))
            } else {
                print!("{}", render::dashboard(&state));
                Ok(())
            }
        }

        Command::Transactions { status, page, size } => {
            let view = ctx.transactions_view();
            if let Some(size) = size {
                view.store().set_page_size(size);
            }
            if let Some(fetch) = view.select_status(status) {
                fetch.await.context("Transaction fetch task failed")?;
            }
            if page > 0 {
                if let Some(fetch) = view.go_to_page(page)? {
                    fetch.await.context("Transaction fetch task failed")?;
                }
            }
            let state = view.store().state();
            if let Some(error) = &state.error {
                bail!("Failed to fetch transactions: {}", error);
            }
            if json {
                print_json(&serde_json::json!({
                    "content": state.transactions,
                    "page": state.current_page,
                    "size": state.page_size,
                    "totalElements": state.total_elements,
                    "totalPages": state.total_pages,
                }))
            } else {
                print!("{}", render::transactions(&state));
                Ok(())
            }
        }

        Command::Transaction { id } => {
            let view = ctx.transaction_detail_view(&id);
            let details = view.load().await.into_result()?;
            if json {
                print_json(&*details)
            } else {
                print!("{}", render::transaction_details(&details));
                Ok(())
            }
        }

        Command::Review { id } => {
            let view = ctx.transaction_detail_view(&id);
            let reviewed = view.review().await?;
            if json {
                print_json(&reviewed)
            } else {
                println!("Transaction {} is now {}", reviewed.id, reviewed.status);
                Ok(())
            }
        }

        Command::Search(args) => {
            let query = SearchQuery::from(args);
            let api = ctx.api().clone();
            let fetch_query = query.clone();
            let page = ctx
                .cache()
                .query(keys::search(&query), move || {
                    let api = api.clone();
                    let query = fetch_query.clone();
                    async move { api.search_transactions(&query).await }
                })
                .await
                .into_result()?;
            render_page(&page, json)
        }

        Command::Statuses => {
            let api = ctx.api().clone();
            let statuses = ctx
                .cache()
                .query(keys::statuses(), move || {
                    let api = api.clone();
                    async move { api.statuses().await }
                })
                .await
                .into_result()?;
            if json {
                print_json(&*statuses)
            } else {
                print!("{}", render::lines(&statuses));
                Ok(())
            }
        }

        Command::Rules { command } => rules(ctx, command, json).await,
    }
}

async fn rules(ctx: &AppContext, command: RulesCommand, json: bool) -> Result<()> {
    match command {
        RulesCommand::List { enabled } => {
            let view = ctx.rules_view(enabled);
            view.load().await;
            let state = view.store().snapshot();
            if let Some(error) = &state.error {
                bail!("Failed to load rules: {}", error);
            }
            if json {
                print_json(&state.rules)
            } else {
                print!("{}", render::rules(&state.rules));
                Ok(())
            }
        }
        RulesCommand::Show { id } => {
            let rule = ctx.rules_view(None).rule(id).await?;
            if json {
                print_json(&*rule)
            } else {
                print!("{}", render::rule(&rule));
                Ok(())
            }
        }
        RulesCommand::Create(fields) => {
            let view = ctx.rules_view(None);
            let request = fields.apply(RuleRequest::default());
            let created = view.create(&request).await?;
            if json {
                print_json(&created)
            } else {
                print!("{}", render::rule(&created));
                Ok(())
            }
        }
        RulesCommand::Update { id, fields } => {
            let view = ctx.rules_view(None);
            view.load().await;
            let current = if view.select(id) {
                view.form()
            } else {
                RuleRequest::from_rule(&*view.rule(id).await?)
            };
            let updated = view.update(id, &fields.apply(current)).await;
            view.clear_selection();
            let updated = updated?;
            if json {
                print_json(&updated)
            } else {
                print!("{}", render::rule(&updated));
                Ok(())
            }
        }
        RulesCommand::Toggle { id } => {
            let toggled = ctx.rules_view(None).toggle(id).await?;
            if json {
                print_json(&toggled)
            } else {
                let status = if toggled.enabled { "enabled" } else { "disabled" };
                println!("Rule {} is now {}", toggled.id, status);
                Ok(())
            }
        }
        RulesCommand::Delete { id } => {
            ctx.rules_view(None).delete(id).await?;
            if json {
                print_json(&serde_json::json!({ "deleted": id }))
            } else {
                println!("Rule {} deleted", id);
                Ok(())
            }
        }
        RulesCommand::History { id } => {
            let entries = ctx.rules_view(None).history(id).await?;
            if json {
                print_json(&*entries)
            } else {
                print!("{}", render::history(&entries));
                Ok(())
            }
        }
        RulesCommand::Types => {
            let types = ctx.rules_view(None).rule_types().await?;
            if json {
                print_json(&*types)
            } else {
                print!("{}", render::lines(&types));
                Ok(())
            }
        }
    }
}

fn render_page(page: &Page<Transaction>, json: bool) -> Result<()> {
    if json {
        print_json(page)
    } else {
        print!("{}", render::search_results(page));
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
