// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Casareach - approval-gated multi-channel outreach.
//!
//! Binary entry point: loads configuration, installs the tracing
//! subscriber, and drives the store/approval/router/ingest services.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Casareach - approval-gated multi-channel outreach.
#[derive(Parser, Debug)]
#[command(name = "casareach", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one dispatch pass over approved drafts.
    Route {
        /// Override the per-run batch cap from config.
        #[arg(long)]
        max: Option<usize>,
    },
    /// File a new outbound draft for approval.
    Draft {
        /// Lead id the draft belongs to.
        #[arg(long)]
        lead: String,
        /// Channel: email, whatsapp, telegram, linkedin, facebook.
        #[arg(long)]
        channel: String,
        /// Recipient address or external id.
        #[arg(long)]
        to: String,
        /// Subject line (email only).
        #[arg(long, default_value = "")]
        subject: String,
        /// Draft body.
        #[arg(long)]
        text: String,
    },
    /// Approve a pending draft.
    Approve {
        approval_id: String,
        /// Operator granting the approval (defaults to agent.name).
        #[arg(long)]
        by: Option<String>,
    },
    /// Reject a pending draft.
    Reject {
        approval_id: String,
        /// Operator rejecting the draft (defaults to agent.name).
        #[arg(long)]
        by: Option<String>,
        /// Reason recorded in the approval's notes.
        #[arg(long)]
        note: Option<String>,
    },
    /// Ingest one inbound message (operator/testing surface).
    Ingest {
        /// Channel the message arrived on.
        #[arg(long)]
        channel: String,
        /// Sender address or external id.
        #[arg(long)]
        from: String,
        /// Message body.
        #[arg(long)]
        body: String,
        /// Source-assigned message id (idempotency key).
        #[arg(long, default_value = "")]
        id: String,
        /// Subject line, if any.
        #[arg(long)]
        subject: Option<String>,
    },
    /// Show table row counts and pending approvals.
    Status,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match casareach_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            casareach_config::render_errors(&errors);
            return std::process::ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone())),
        )
        .init();

    let result = match cli.command {
        Some(Commands::Route { max }) => commands::route(&config, max).await,
        Some(Commands::Draft {
            lead,
            channel,
            to,
            subject,
            text,
        }) => commands::draft(&config, &lead, &channel, &to, &subject, &text).await,
        Some(Commands::Approve { approval_id, by }) => {
            commands::approve(&config, &approval_id, by.as_deref()).await
        }
        Some(Commands::Reject {
            approval_id,
            by,
            note,
        }) => commands::reject(&config, &approval_id, by.as_deref(), note.as_deref()).await,
        Some(Commands::Ingest {
            channel,
            from,
            body,
            id,
            subject,
        }) => commands::ingest(&config, &channel, &from, &body, &id, subject).await,
        Some(Commands::Status) => commands::status(&config).await,
        None => {
            println!("casareach: use --help for available commands");
            Ok(())
        }
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("casareach: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
