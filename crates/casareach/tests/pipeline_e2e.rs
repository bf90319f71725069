// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline test: ingest -> approve -> route.

use std::sync::Arc;

use strum::IntoEnumIterator;
use tempfile::tempdir;

use casareach_approval::{ApprovalService, DraftRequest};
use casareach_core::types::{ActionType, ApprovalStatus, Channel, InboundMessage, LeadStatus};
use casareach_core::util::utc_now;
use casareach_ingest::IngestService;
use casareach_router::{AdapterRegistry, ConsoleAdapter, Dispatcher};
use casareach_store::RecordStore;

fn console_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    for channel in Channel::iter() {
        registry.register(Arc::new(ConsoleAdapter::new(channel)));
    }
    registry
}

#[tokio::test]
async fn inbound_email_flows_to_sent_reply() {
    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path());

    // An email reply arrives and is ingested.
    let ingest = IngestService::new(store.clone(), "Thanks! When suits you for a call?");
    let outcome = ingest
        .ingest(&InboundMessage {
            id: "imap-314".to_string(),
            from: "ana@example.com".to_string(),
            to: "team@casareach.example".to_string(),
            subject: Some("Bungalow on Elm St".to_string()),
            body: "Could we book a viewing?".to_string(),
            timestamp: utc_now(),
            channel: Channel::Email,
            raw: String::new(),
        })
        .await
        .unwrap();
    assert!(outcome.lead_created);
    let approval_id = outcome.approval_id.clone().unwrap();

    // Nothing dispatches while the draft is only pending.
    let dispatcher = Dispatcher::new(store.clone(), console_registry(), 10);
    let summary = dispatcher.process_approved().await.unwrap();
    assert_eq!(summary.processed, 0);

    // A human signs off, then the router sends it.
    let approvals = ApprovalService::new(store.clone());
    approvals.approve(&approval_id, "alex").await.unwrap();
    let summary = dispatcher.process_approved().await.unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.sent, 1);

    let approval = store.get_approval(&approval_id).await.unwrap().unwrap();
    assert_eq!(approval.status, ApprovalStatus::Sent);

    // Audit trail: one ingested event, one sent event, in that order.
    let events = store.load_events().await.unwrap();
    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(types, vec!["ingested", "sent"]);

    // The lead was drafted by the reply approval and never deleted.
    let lead = store.get_lead(&outcome.lead.lead_id).await.unwrap().unwrap();
    assert_eq!(lead.status, LeadStatus::Drafted);
}

#[tokio::test]
async fn linkedin_draft_is_opened_not_sent() {
    let dir = tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let approvals = ApprovalService::new(store.clone());

    let approval = approvals
        .create_draft(DraftRequest {
            lead_id: "l-77".to_string(),
            channel: Channel::Linkedin,
            action_type: ActionType::Dm,
            to: "in/ana-silva".to_string(),
            subject: String::new(),
            text: "Hi Ana, following up on your inquiry".to_string(),
            notes: String::new(),
        })
        .await
        .unwrap();
    approvals.approve(&approval.approval_id, "alex").await.unwrap();

    let summary = Dispatcher::new(store.clone(), console_registry(), 10)
        .process_approved()
        .await
        .unwrap();
    assert_eq!(summary.opened, 1);
    assert_eq!(summary.sent, 0);

    let stored = store.get_approval(&approval.approval_id).await.unwrap().unwrap();
    assert_eq!(stored.status, ApprovalStatus::ApprovedOpened);

    // Terminal: a second pass finds nothing to do.
    let summary = Dispatcher::new(store, console_registry(), 10)
        .process_approved()
        .await
        .unwrap();
    assert_eq!(summary.processed, 0);
}
