//! Command-line access to the admin dashboard's read views.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use danci_admin::api::cards::list_card_errors;
use danci_admin::config::Config;
use danci_admin::core::completeness::Chip;
use danci_admin::logging;
use danci_admin::models::{CardErrorStatus, ChangelogTag, FeedbackStatus};
use danci_admin::{AdminResult, AdminSession};

#[derive(Parser, Debug)]
#[command(name = "danci-admin")]
#[command(about = "Admin dashboard tools for the vocabulary backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of the changelog
    Changelog {
        /// new-feature, bug-fix or announcement
        #[arg(long, value_parser = parse_tag)]
        tag: Option<ChangelogTag>,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
    /// List vocabulary cards with their completeness chips
    Cards {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// List learner feedback
    Feedback {
        #[arg(long, value_parser = parse_feedback_status)]
        status: Option<FeedbackStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List reported card errors
    Errors {
        #[arg(long, value_parser = parse_card_error_status)]
        status: Option<CardErrorStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

fn parse_tag(s: &str) -> Result<ChangelogTag, String> {
    ChangelogTag::parse(s).ok_or_else(|| format!("unknown changelog tag: {s}"))
}

fn parse_feedback_status(s: &str) -> Result<FeedbackStatus, String> {
    FeedbackStatus::parse(s).ok_or_else(|| format!("unknown feedback status: {s}"))
}

fn parse_card_error_status(s: &str) -> Result<CardErrorStatus, String> {
    CardErrorStatus::parse(s).ok_or_else(|| format!("unknown card error status: {s}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> AdminResult<()> {
    let mut session = AdminSession::new(config)?;

    match command {
        Command::Changelog { tag, page } => {
            session.ensure_changelog().await?;
            let store = session.changelog_mut();
            store.set_tag(tag);
            store.set_page(page);
            let view = store.view();
            println!(
                "page {}/{} ({} entries)",
                view.page,
                view.total_pages.max(1),
                view.total
            );
            for item in &view.items {
                println!(
                    "{}  [{}]  {}",
                    item.created_at.format("%Y-%m-%d"),
                    item.tag.as_str(),
                    item.title
                );
            }
        }
        Command::Cards { page, search } => {
            let store = session.cards_mut();
            store.set_search(search);
            store.set_page(page);
            session.refresh_cards().await?;
            println!("{} cards", session.cards().total());
            for (card, (_, chips)) in session.cards().items().iter().zip(session.card_chips()) {
                println!("{:<24} {}", card.word, render_chips(&chips));
            }
        }
        Command::Feedback { status, page } => {
            session.feedback_mut().set_status_filter(status);
            session.refresh_feedback().await?;
            if session.feedback_mut().set_page(page) {
                session.refresh_feedback().await?;
            }
            let store = session.feedback();
            println!(
                "page {}/{} ({} items)",
                store.page(),
                store.total_pages().max(1),
                store.total()
            );
            for fb in store.items() {
                let marker = if fb.status.is_closed() { ' ' } else { '*' };
                println!(
                    "{marker} {}  {:<10} {}",
                    fb.created_at.format("%Y-%m-%d"),
                    fb.status.as_str(),
                    fb.message
                );
            }
        }
        Command::Errors { status, page } => {
            let listing = list_card_errors(session.client(), status, page, 20).await?;
            println!("{} reports", listing.total);
            for report in &listing.items {
                println!(
                    "{:<10} {:<20} {}",
                    report.status.as_str(),
                    report.word.as_deref().unwrap_or(&report.card_id),
                    report.description
                );
            }
        }
    }

    Ok(())
}

fn render_chips(chips: &[Chip]) -> String {
    chips
        .iter()
        .map(|chip| chip.label.as_str())
        .collect::<Vec<_>>()
        .join("  ")
}
