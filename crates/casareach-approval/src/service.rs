// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Approval drafting and state transitions.
//!
//! Every transition goes through [`ApprovalService::transition`], which
//! enforces the state machine: terminal states are frozen, and re-engaging
//! a rejected/sent/failed approval means creating a new Approval record for
//! the same lead.

use tracing::{info, warn};

use casareach_core::CasareachError;
use casareach_core::types::{ActionType, Approval, ApprovalStatus, Channel, LeadStatus};
use casareach_core::util::{new_id, utc_now};
use casareach_store::RecordStore;

/// Input for a new outbound draft.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub lead_id: String,
    pub channel: Channel,
    pub action_type: ActionType,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub notes: String,
}

/// Creates approval drafts and validates/executes state transitions.
#[derive(Debug, Clone)]
pub struct ApprovalService {
    store: RecordStore,
}

impl ApprovalService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// File a `pending` approval for a proposed outbound action.
    ///
    /// Recipients on the do-not-contact list are refused before anything is
    /// written: nothing DNC'd ever becomes `pending`. The referenced lead
    /// moves `new -> drafted` on its first draft.
    pub async fn create_draft(&self, req: DraftRequest) -> Result<Approval, CasareachError> {
        if self.store.dnc_contains(&req.to).await? {
            warn!(to = %req.to, "draft refused: recipient is on the do-not-contact list");
            return Err(CasareachError::DncBlocked { value: req.to });
        }

        let approval = Approval {
            approval_id: new_id(),
            ts_created: utc_now(),
            lead_id: req.lead_id,
            channel: req.channel,
            action_type: req.action_type,
            draft_subject: req.subject,
            draft_text: req.text,
            draft_to: req.to,
            status: ApprovalStatus::Pending,
            approved_by: String::new(),
            approved_at: String::new(),
            notes: req.notes,
        };
        self.store.append_approval(&approval).await?;

        if let Some(lead) = self.store.get_lead(&approval.lead_id).await? {
            if lead.status == LeadStatus::New {
                self.store
                    .set_lead_status(&lead.lead_id, LeadStatus::Drafted)
                    .await?;
            }
        }

        info!(
            approval_id = %approval.approval_id,
            lead_id = %approval.lead_id,
            channel = %approval.channel,
            "draft filed for approval"
        );
        Ok(approval)
    }

    /// Grant approval: `pending -> approved`, recording who and when.
    pub async fn approve(&self, approval_id: &str, by: &str) -> Result<Approval, CasareachError> {
        self.transition(approval_id, ApprovalStatus::Approved, |approval| {
            approval.approved_by = by.to_string();
            approval.approved_at = utc_now();
        })
        .await
    }

    /// Reject a draft: `pending -> rejected`.
    pub async fn reject(
        &self,
        approval_id: &str,
        by: &str,
        note: Option<&str>,
    ) -> Result<Approval, CasareachError> {
        let by = by.to_string();
        let note = note.map(str::to_string);
        self.transition(approval_id, ApprovalStatus::Rejected, move |approval| {
            approval.approved_by = by;
            approval.approved_at = utc_now();
            if let Some(note) = note {
                push_note(&mut approval.notes, &format!("rejected: {note}"));
            }
        })
        .await
    }

    /// Operator-only out-of-band completion: `approved -> sent_manual`.
    /// The router never produces this status.
    pub async fn complete_manual(
        &self,
        approval_id: &str,
        by: &str,
    ) -> Result<Approval, CasareachError> {
        let by = by.to_string();
        self.transition(approval_id, ApprovalStatus::SentManual, move |approval| {
            push_note(&mut approval.notes, &format!("completed manually by {by}"));
        })
        .await
    }

    async fn transition(
        &self,
        approval_id: &str,
        to: ApprovalStatus,
        apply: impl FnOnce(&mut Approval),
    ) -> Result<Approval, CasareachError> {
        let mut approval = self.store.get_approval(approval_id).await?.ok_or_else(|| {
            CasareachError::ApprovalNotFound {
                approval_id: approval_id.to_string(),
            }
        })?;

        if !approval.status.can_transition(to) {
            return Err(CasareachError::InvalidTransition {
                from: approval.status,
                to,
            });
        }

        approval.status = to;
        apply(&mut approval);
        self.store.update_approval(&approval).await?;
        info!(approval_id = %approval.approval_id, status = %approval.status, "approval transitioned");
        Ok(approval)
    }
}

/// Append a timestamped note, separated from any existing notes.
pub fn push_note(notes: &mut String, note: &str) {
    if !notes.is_empty() {
        notes.push_str(" | ");
    }
    notes.push_str(&format!("[{}] {note}", utc_now()));
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use casareach_core::types::{DncEntry, Lead};

    use super::*;

    fn draft(lead_id: &str) -> DraftRequest {
        DraftRequest {
            lead_id: lead_id.to_string(),
            channel: Channel::Email,
            action_type: ActionType::SendEmail,
            to: "sam@example.com".to_string(),
            subject: "Open house this weekend".to_string(),
            text: "Hi Sam, would you like a viewing?".to_string(),
            notes: String::new(),
        }
    }

    async fn service() -> (ApprovalService, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let service = ApprovalService::new(RecordStore::new(dir.path()));
        (service, dir)
    }

    #[tokio::test]
    async fn draft_starts_pending() {
        let (service, _dir) = service().await;
        let approval = service.create_draft(draft("l1")).await.unwrap();
        assert_eq!(approval.status, ApprovalStatus::Pending);
        assert!(approval.approved_by.is_empty());

        let stored = service
            .store()
            .get_approval(&approval.approval_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, approval);
    }

    #[tokio::test]
    async fn approve_records_actor_and_time() {
        let (service, _dir) = service().await;
        let approval = service.create_draft(draft("l1")).await.unwrap();
        let approved = service.approve(&approval.approval_id, "alex").await.unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);
        assert_eq!(approved.approved_by, "alex");
        assert!(!approved.approved_at.is_empty());
    }

    #[tokio::test]
    async fn reject_is_terminal() {
        let (service, _dir) = service().await;
        let approval = service.create_draft(draft("l1")).await.unwrap();
        let rejected = service
            .reject(&approval.approval_id, "alex", Some("tone is off"))
            .await
            .unwrap();
        assert_eq!(rejected.status, ApprovalStatus::Rejected);
        assert!(rejected.notes.contains("tone is off"));

        let err = service
            .approve(&approval.approval_id, "alex")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CasareachError::InvalidTransition {
                from: ApprovalStatus::Rejected,
                to: ApprovalStatus::Approved
            }
        ));
    }

    #[tokio::test]
    async fn complete_manual_requires_prior_approval() {
        let (service, _dir) = service().await;
        let approval = service.create_draft(draft("l1")).await.unwrap();

        let err = service
            .complete_manual(&approval.approval_id, "alex")
            .await
            .unwrap_err();
        assert!(matches!(err, CasareachError::InvalidTransition { .. }));

        service.approve(&approval.approval_id, "alex").await.unwrap();
        let done = service
            .complete_manual(&approval.approval_id, "alex")
            .await
            .unwrap();
        assert_eq!(done.status, ApprovalStatus::SentManual);
        assert!(done.notes.contains("completed manually"));
    }

    #[tokio::test]
    async fn dnc_recipient_is_refused_before_write() {
        let (service, _dir) = service().await;
        service
            .store()
            .add_dnc(&DncEntry {
                value: "sam@example.com".to_string(),
                reason: "unsubscribe".to_string(),
                ts_added: utc_now(),
            })
            .await
            .unwrap();

        let err = service.create_draft(draft("l1")).await.unwrap_err();
        assert!(matches!(err, CasareachError::DncBlocked { .. }));
        assert!(service.store().load_approvals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_draft_moves_lead_to_drafted() {
        let (service, _dir) = service().await;
        let (lead, _) = service
            .store()
            .create_lead(Lead {
                lead_id: new_id(),
                first_name: "Sam".into(),
                last_name: "Moreau".into(),
                email: "sam@example.com".into(),
                phone_e164: "".into(),
                city: "".into(),
                province: "".into(),
                source: "import".into(),
                tags: "".into(),
                status: LeadStatus::New,
                created_at: utc_now(),
            })
            .await
            .unwrap();

        service.create_draft(draft(&lead.lead_id)).await.unwrap();
        let lead = service.store().get_lead(&lead.lead_id).await.unwrap().unwrap();
        assert_eq!(lead.status, LeadStatus::Drafted);
    }

    #[tokio::test]
    async fn unknown_approval_id_errors() {
        let (service, _dir) = service().await;
        let err = service.approve("missing", "alex").await.unwrap_err();
        assert!(matches!(err, CasareachError::ApprovalNotFound { .. }));
    }
}
