// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.

use std::str::FromStr;
use std::sync::Arc;

use strum::IntoEnumIterator;

use casareach_approval::{ApprovalService, DraftRequest};
use casareach_config::CasareachConfig;
use casareach_core::CasareachError;
use casareach_core::types::{ActionType, ApprovalStatus, Channel, InboundMessage};
use casareach_core::util::utc_now;
use casareach_ingest::IngestService;
use casareach_router::{AdapterRegistry, ConsoleAdapter, Dispatcher};
use casareach_store::RecordStore;

fn store(config: &CasareachConfig) -> RecordStore {
    RecordStore::new(config.store.data_dir.clone())
}

fn parse_channel(value: &str) -> Result<Channel, CasareachError> {
    Channel::from_str(value).map_err(|_| {
        CasareachError::Config(format!(
            "unknown channel `{value}` (expected one of: email, whatsapp, telegram, linkedin, facebook)"
        ))
    })
}

/// Run one dispatch pass. The console adapter stands in for live channel
/// adapters, which are deployed as external collaborators.
pub async fn route(config: &CasareachConfig, max: Option<usize>) -> Result<(), CasareachError> {
    let mut registry = AdapterRegistry::new();
    for channel in Channel::iter() {
        registry.register(Arc::new(ConsoleAdapter::new(channel)));
    }

    let max = max.unwrap_or(config.router.max_per_run);
    let summary = Dispatcher::new(store(config), registry, max)
        .process_approved()
        .await?;
    println!(
        "processed={} sent={} failed={} opened={}",
        summary.processed, summary.sent, summary.failed, summary.opened
    );
    Ok(())
}

pub async fn draft(
    config: &CasareachConfig,
    lead: &str,
    channel: &str,
    to: &str,
    subject: &str,
    text: &str,
) -> Result<(), CasareachError> {
    let channel = parse_channel(channel)?;
    let action_type = match channel {
        Channel::Email => ActionType::SendEmail,
        Channel::Linkedin | Channel::Facebook => ActionType::Dm,
        Channel::Whatsapp | Channel::Telegram => ActionType::Dm,
    };
    let approval = ApprovalService::new(store(config))
        .create_draft(DraftRequest {
            lead_id: lead.to_string(),
            channel,
            action_type,
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            notes: String::new(),
        })
        .await?;
    println!("draft filed: {}", approval.approval_id);
    Ok(())
}

pub async fn approve(
    config: &CasareachConfig,
    approval_id: &str,
    by: Option<&str>,
) -> Result<(), CasareachError> {
    let by = by.unwrap_or(&config.agent.name);
    let approval = ApprovalService::new(store(config))
        .approve(approval_id, by)
        .await?;
    println!("approved: {} by {}", approval.approval_id, approval.approved_by);
    Ok(())
}

pub async fn reject(
    config: &CasareachConfig,
    approval_id: &str,
    by: Option<&str>,
    note: Option<&str>,
) -> Result<(), CasareachError> {
    let by = by.unwrap_or(&config.agent.name);
    let approval = ApprovalService::new(store(config))
        .reject(approval_id, by, note)
        .await?;
    println!("rejected: {}", approval.approval_id);
    Ok(())
}

pub async fn ingest(
    config: &CasareachConfig,
    channel: &str,
    from: &str,
    body: &str,
    id: &str,
    subject: Option<String>,
) -> Result<(), CasareachError> {
    let channel = parse_channel(channel)?;
    let service = IngestService::new(store(config), config.ingest.reply_template.clone());
    let outcome = service
        .ingest(&InboundMessage {
            id: id.to_string(),
            from: from.to_string(),
            to: config.agent.name.clone(),
            subject,
            body: body.to_string(),
            timestamp: utc_now(),
            channel,
            raw: String::new(),
        })
        .await?;

    println!(
        "lead {} ({})",
        outcome.lead.lead_id,
        if outcome.lead_created { "created" } else { "existing" }
    );
    match (outcome.duplicate, outcome.approval_id) {
        (true, _) => println!("duplicate message, no reply draft filed"),
        (false, Some(approval_id)) => println!("reply draft filed: {approval_id}"),
        (false, None) => println!("no reply draft filed (sender on do-not-contact list)"),
    }
    Ok(())
}

pub async fn status(config: &CasareachConfig) -> Result<(), CasareachError> {
    let store = store(config);

    let leads = store.load_leads().await?;
    let approvals = store.load_approvals().await?;
    let events = store.load_events().await?;
    let contacts = store.load_contacts().await?;
    let dnc = store.load_dnc().await?;

    println!("data dir: {}", store.dir().display());
    println!(
        "leads={} approvals={} events={} contacts={} dnc={}",
        leads.len(),
        approvals.len(),
        events.len(),
        contacts.len(),
        dnc.len()
    );

    let pending: Vec<_> = approvals
        .iter()
        .filter(|a| a.status == ApprovalStatus::Pending)
        .collect();
    let approved = approvals
        .iter()
        .filter(|a| a.status == ApprovalStatus::Approved)
        .count();
    println!("pending={} approved={}", pending.len(), approved);
    for approval in pending {
        println!(
            "  {} {} {} -> {}",
            approval.approval_id, approval.channel, approval.action_type, approval.draft_to
        );
    }
    Ok(())
}
