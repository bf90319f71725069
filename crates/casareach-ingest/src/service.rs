// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message ingestion.
//!
//! Turns a channel-agnostic inbound message into domain state: a lead
//! (deduplicated by email or phone), a contact mapping for chat channels, a
//! system-generated reply draft awaiting approval, and an `ingested` audit
//! event. Re-ingesting the same (channel, message id) is idempotent.

use tracing::{info, warn};

use casareach_approval::{ApprovalService, DraftRequest};
use casareach_core::CasareachError;
use casareach_core::types::{
    ActionType, Channel, ContactEntry, EventRecord, InboundMessage, Lead, LeadStatus,
};
use casareach_core::util::{new_id, utc_now};
use casareach_store::RecordStore;

/// Event type recorded for every successful ingest.
pub const EVENT_INGESTED: &str = "ingested";

/// What one ingest call produced.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub lead: Lead,
    /// Whether a new lead row was written (false when deduplicated).
    pub lead_created: bool,
    /// Id of the filed reply draft, if one was created.
    pub approval_id: Option<String>,
    /// True when this (channel, message id) was already ingested.
    pub duplicate: bool,
}

/// Consumes inbound messages from channel-specific sources.
#[derive(Debug, Clone)]
pub struct IngestService {
    store: RecordStore,
    approvals: ApprovalService,
    reply_template: String,
}

impl IngestService {
    pub fn new(store: RecordStore, reply_template: impl Into<String>) -> Self {
        Self {
            approvals: ApprovalService::new(store.clone()),
            store,
            reply_template: reply_template.into(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Ingest one inbound message.
    ///
    /// The lead is always found or created and the contact map updated; the
    /// reply draft is skipped for duplicates and for senders on the
    /// do-not-contact list. Ingestion itself never fails for those reasons.
    pub async fn ingest(&self, msg: &InboundMessage) -> Result<IngestOutcome, CasareachError> {
        let duplicate = self.already_ingested(msg).await?;
        let (lead, lead_created) = self.find_or_create_lead(msg).await?;

        if msg.channel.is_chat() {
            self.store
                .upsert_contact(&ContactEntry {
                    lead_id: lead.lead_id.clone(),
                    channel: msg.channel,
                    external_id: msg.from.clone(),
                })
                .await?;
        }

        if duplicate {
            info!(
                message_id = %msg.id,
                channel = %msg.channel,
                lead_id = %lead.lead_id,
                "message already ingested, skipping reply draft"
            );
            return Ok(IngestOutcome {
                lead,
                lead_created,
                approval_id: None,
                duplicate: true,
            });
        }

        let approval_id = match self.create_reply_approval(&lead, msg).await {
            Ok(approval_id) => Some(approval_id),
            Err(CasareachError::DncBlocked { value }) => {
                warn!(sender = %value, "sender is on the do-not-contact list, no reply draft filed");
                None
            }
            Err(e) => return Err(e),
        };

        self.store
            .append_event(&EventRecord {
                event_id: new_id(),
                ts: utc_now(),
                lead_id: lead.lead_id.clone(),
                channel: msg.channel,
                event_type: EVENT_INGESTED.to_string(),
                campaign: String::new(),
                message_id: msg.id.clone(),
                meta_json: serde_json::json!({
                    "from": msg.from,
                    "to": msg.to,
                    "subject": msg.subject,
                    "lead_created": lead_created,
                })
                .to_string(),
            })
            .await?;

        info!(
            message_id = %msg.id,
            channel = %msg.channel,
            lead_id = %lead.lead_id,
            lead_created,
            "inbound message ingested"
        );
        Ok(IngestOutcome {
            lead,
            lead_created,
            approval_id,
            duplicate: false,
        })
    }

    /// Look up an existing lead for the sender, or synthesize a new one.
    ///
    /// Email messages key on the sender address; chat messages key on the
    /// sender phone/external id. An identity collision at the store level is
    /// a reuse, never an error.
    pub async fn find_or_create_lead(
        &self,
        msg: &InboundMessage,
    ) -> Result<(Lead, bool), CasareachError> {
        let existing = if msg.channel == Channel::Email {
            self.store.find_lead_by_email(&msg.from).await?
        } else {
            self.store.find_lead_by_phone(&msg.from).await?
        };
        if let Some(lead) = existing {
            return Ok((lead, false));
        }

        let (email, phone) = if msg.channel == Channel::Email {
            (msg.from.clone(), String::new())
        } else {
            (String::new(), msg.from.clone())
        };
        self.store
            .create_lead(Lead {
                lead_id: new_id(),
                first_name: String::new(),
                last_name: String::new(),
                email,
                phone_e164: phone,
                city: String::new(),
                province: String::new(),
                source: format!("ingest_{}", msg.channel),
                tags: String::new(),
                status: LeadStatus::New,
                created_at: utc_now(),
            })
            .await
    }

    /// File a `pending` reply draft for an ingested message.
    async fn create_reply_approval(
        &self,
        lead: &Lead,
        msg: &InboundMessage,
    ) -> Result<String, CasareachError> {
        let subject = msg
            .subject
            .as_deref()
            .map(|s| {
                if s.starts_with("Re:") {
                    s.to_string()
                } else {
                    format!("Re: {s}")
                }
            })
            .unwrap_or_default();

        let approval = self
            .approvals
            .create_draft(DraftRequest {
                lead_id: lead.lead_id.clone(),
                channel: msg.channel,
                action_type: ActionType::Reply,
                to: msg.from.clone(),
                subject,
                text: self.reply_template.clone(),
                notes: format!("system-generated reply draft for message {}", msg.id),
            })
            .await?;
        Ok(approval.approval_id)
    }

    /// Whether this (channel, message id) already has an `ingested` event.
    /// Messages without an id cannot be deduplicated and are always fresh.
    async fn already_ingested(&self, msg: &InboundMessage) -> Result<bool, CasareachError> {
        if msg.id.is_empty() {
            return Ok(false);
        }
        Ok(self.store.load_events().await?.iter().any(|e| {
            e.event_type == EVENT_INGESTED && e.channel == msg.channel && e.message_id == msg.id
        }))
    }
}
