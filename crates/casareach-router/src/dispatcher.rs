// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch pass: approved drafts become channel actions.
//!
//! One pass loads the approvals table, walks it in stored order, dispatches
//! records whose status is exactly `approved` (up to the batch cap), appends
//! one durable audit event per processed record, and writes the whole table
//! back with a single atomic replace. A failure on one record is recorded on
//! that record and never aborts the rest of the batch.

use tracing::{info, warn};

use casareach_core::CasareachError;
use casareach_core::types::{Approval, ApprovalStatus, DispatchMode, EventRecord};
use casareach_core::util::{new_id, utc_now};
use casareach_store::RecordStore;

use crate::registry::AdapterRegistry;

/// Aggregate counts for one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
    pub opened: usize,
}

/// Converts `approved` records into channel actions, bounded per run.
pub struct Dispatcher {
    store: RecordStore,
    registry: AdapterRegistry,
    max_per_run: usize,
}

/// Result of dispatching a single record, used for its audit event.
struct DispatchOutcome {
    status: ApprovalStatus,
    ok: bool,
    message_id: String,
}

impl Dispatcher {
    pub fn new(store: RecordStore, registry: AdapterRegistry, max_per_run: usize) -> Self {
        Self {
            store,
            registry,
            max_per_run,
        }
    }

    /// Run one dispatch pass over the approvals table.
    ///
    /// The `status == approved` check here is the pipeline's hard gate: no
    /// other status ever reaches an adapter call. Records are processed
    /// sequentially so event order matches table mutation order.
    pub async fn process_approved(&self) -> Result<RunSummary, CasareachError> {
        let mut approvals = self.store.load_approvals().await?;
        let mut summary = RunSummary::default();

        for approval in approvals.iter_mut() {
            if summary.processed == self.max_per_run {
                break;
            }
            if approval.status != ApprovalStatus::Approved {
                continue;
            }

            let outcome = self.dispatch_one(approval).await;
            approval.status = outcome.status;
            summary.processed += 1;
            match outcome.status {
                ApprovalStatus::Sent => summary.sent += 1,
                ApprovalStatus::Failed => summary.failed += 1,
                ApprovalStatus::ApprovedOpened => summary.opened += 1,
                _ => unreachable!("dispatch produces only sent/failed/approved_opened"),
            }

            // Durable per-record audit trail, appended before the batched
            // approvals write.
            self.store
                .append_event(&EventRecord {
                    event_id: new_id(),
                    ts: utc_now(),
                    lead_id: approval.lead_id.clone(),
                    channel: approval.channel,
                    event_type: approval.status.to_string(),
                    campaign: String::new(),
                    message_id: outcome.message_id,
                    meta_json: serde_json::json!({
                        "approval_id": approval.approval_id,
                        "to": approval.draft_to,
                        "ok": outcome.ok,
                    })
                    .to_string(),
                })
                .await?;
        }

        // One atomic write for the whole batch.
        self.store.save_approvals(&approvals).await?;

        info!(
            processed = summary.processed,
            sent = summary.sent,
            failed = summary.failed,
            opened = summary.opened,
            "dispatch pass complete"
        );
        Ok(summary)
    }

    async fn dispatch_one(&self, approval: &mut Approval) -> DispatchOutcome {
        let Some(adapter) = self.registry.get(approval.channel) else {
            warn!(
                approval_id = %approval.approval_id,
                channel = %approval.channel,
                "no adapter registered, recording failure"
            );
            Self::record_failure(
                approval,
                &CasareachError::AdapterNotFound {
                    channel: approval.channel,
                },
            );
            return DispatchOutcome {
                status: ApprovalStatus::Failed,
                ok: false,
                message_id: String::new(),
            };
        };

        match approval.channel.dispatch_mode() {
            DispatchMode::SemiAutomatic => {
                // Invoking the adapter means "open a composition surface for
                // a human to finish"; its return value does not change the
                // terminal status.
                let message_id = match adapter.send(approval).await {
                    Ok(receipt) => receipt.message_id.map(|m| m.0).unwrap_or_default(),
                    Err(e) => {
                        warn!(
                            approval_id = %approval.approval_id,
                            channel = %approval.channel,
                            error = %e,
                            "semi-automatic open reported an error, status is approved_opened regardless"
                        );
                        String::new()
                    }
                };
                DispatchOutcome {
                    status: ApprovalStatus::ApprovedOpened,
                    ok: true,
                    message_id,
                }
            }
            DispatchMode::Automatic => match adapter.send(approval).await {
                Ok(receipt) => DispatchOutcome {
                    status: ApprovalStatus::Sent,
                    ok: true,
                    message_id: receipt.message_id.map(|m| m.0).unwrap_or_default(),
                },
                Err(e) => {
                    warn!(
                        approval_id = %approval.approval_id,
                        channel = %approval.channel,
                        error = %e,
                        "send failed"
                    );
                    Self::record_failure(approval, &e);
                    DispatchOutcome {
                        status: ApprovalStatus::Failed,
                        ok: false,
                        message_id: String::new(),
                    }
                }
            },
        }
    }

    fn record_failure(approval: &mut Approval, error: &CasareachError) {
        if !approval.notes.is_empty() {
            approval.notes.push_str(" | ");
        }
        approval
            .notes
            .push_str(&format!("[{}] send failed: {error}", utc_now()));
    }
}
