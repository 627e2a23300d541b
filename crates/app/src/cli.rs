//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gigboard_application::ApiError;
use gigboard_domain::models::{ApplyRequest, JobSearchQuery, LoginRequest, WithdrawalRequest};
use gigboard_infrastructure::read_upload_file;
use tracing::warn;

use crate::context::AppContext;
use crate::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "gigboard", about = "Find and manage shift work from the terminal", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "GIGBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Search open jobs
    Jobs {
        /// Free-text search
        #[arg(long, short)]
        query: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one job
    Job {
        /// Job id
        id: String,
    },
    /// Apply to a job
    Apply {
        /// Job id
        id: String,
        /// Note for the employer
        #[arg(long, short)]
        message: Option<String>,
    },
    /// Replace the profile picture
    UploadAvatar {
        /// Image file
        path: PathBuf,
    },
    /// Withdraw earnings, e.g. `withdraw 25.50`
    Withdraw {
        /// Amount in currency units
        #[arg(value_parser = parse_amount_cents)]
        amount: i64,
    },
}

/// Runs one command.
pub(crate) async fn run(command: Command, ctx: &AppContext) -> Result<(), AppError> {
    match command {
        Command::Login { email, password } => {
            let tokens = ctx.api.login(&LoginRequest { email, password }).await?;
            ctx.session.sign_in(&tokens)?;
            println!("Signed in as {} {}", tokens.user.first_name, tokens.user.last_name);
        }
        Command::Logout => {
            if ctx.session.is_logged_in() {
                match ctx.api.logout().await {
                    Ok(()) | Err(ApiError::Unauthorized) => {}
                    Err(e) => warn!(error = %e, "server-side logout failed"),
                }
            }
            ctx.session.sign_out()?;
            println!("Signed out");
        }
        Command::Whoami => {
            ctx.require_session()?;
            let user = ctx.api.current_user().await?;
            ctx.session.set_admin(user.is_admin);
            let role = if user.is_admin { " (staff)" } else { "" };
            println!("{} {} <{}>{role}", user.first_name, user.last_name, user.email);
        }
        Command::Jobs { query, page } => {
            let results = ctx
                .api
                .search_jobs(&JobSearchQuery {
                    q: query,
                    page: Some(page),
                    ..JobSearchQuery::default()
                })
                .await?;
            for job in &results.items {
                println!(
                    "{:<12} {:<32} {:<20} {}",
                    job.id,
                    job.title,
                    job.location,
                    format_cents(job.wage.amount_cents, &job.wage.currency)
                );
            }
            println!(
                "page {} of {} jobs{}",
                results.page,
                results.total,
                if results.has_next() { ", more with --page" } else { "" }
            );
        }
        Command::Job { id } => {
            let job = ctx.api.job(&id).await?;
            println!("{} at {}", job.summary.title, job.summary.company_name);
            println!("{}", job.summary.location);
            println!("{}", format_cents(job.summary.wage.amount_cents, &job.summary.wage.currency));
            println!();
            println!("{}", job.description);
            if job.has_applied {
                println!();
                println!("You have applied to this job.");
            }
        }
        Command::Apply { id, message } => {
            ctx.require_session()?;
            let application = ctx
                .api
                .apply(
                    &id,
                    &ApplyRequest {
                        cover_message: message,
                        ..ApplyRequest::default()
                    },
                )
                .await?;
            println!("Applied to {} ({})", application.job_title, application.id);
        }
        Command::UploadAvatar { path } => {
            ctx.require_session()?;
            let file = read_upload_file(&path).await.map_err(|source| AppError::File {
                path: path.display().to_string(),
                source,
            })?;
            let ack = ctx.api.upload_profile_image(file).await?;
            match ack.url {
                Some(url) => println!("Profile picture updated: {url}"),
                None => println!("Profile picture updated"),
            }
        }
        Command::Withdraw { amount } => {
            ctx.require_session()?;
            let withdrawal = ctx
                .api
                .request_withdrawal(&WithdrawalRequest::new(amount))
                .await?;
            println!("Withdrawal {} requested: {:?}", withdrawal.id, withdrawal.status);
        }
    }
    Ok(())
}

/// Parses a currency amount such as `25`, `25.5` or `25.50` into minor units.
fn parse_amount_cents(value: &str) -> Result<i64, String> {
    let invalid = || format!("'{value}' is not an amount like 25.50");
    let (units, fraction) = value.trim().split_once('.').unwrap_or((value.trim(), ""));

    if units.is_empty() || fraction.len() > 2 {
        return Err(invalid());
    }
    if !units.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let units: i64 = units.parse().map_err(|_| invalid())?;
    let cents: i64 = format!("{fraction:0<2}").parse().map_err(|_| invalid())?;
    let total = units
        .checked_mul(100)
        .and_then(|u| u.checked_add(cents))
        .ok_or_else(invalid)?;

    if total == 0 {
        return Err("amount must be greater than zero".to_string());
    }
    Ok(total)
}

fn format_cents(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!("{sign}{}.{:02} {currency}", abs / 100, abs % 100)
}
