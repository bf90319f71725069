// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed CRUD over the file-backed tables.
//!
//! Every operation is a whole-table read or write; there is no row-level
//! locking. The store assumes a single writer per table. Events are written
//! incrementally (one atomic rewrite per append) so the audit trail is
//! durable even when a caller batches its own table writes.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use casareach_core::CasareachError;
use casareach_core::types::{
    Approval, Channel, ContactEntry, DncEntry, EventRecord, Lead, LeadStatus,
};

use crate::schema::{self, Table};
use crate::tablefile;

/// Handle to one data directory of table files.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // --- leads ---

    pub async fn load_leads(&self) -> Result<Vec<Lead>, CasareachError> {
        let rows = tablefile::read_rows(&self.dir, Table::Leads).await?;
        rows.iter()
            .map(|row| schema::lead_from_row(row).map_err(|e| e.into_fatal(Table::Leads)))
            .collect()
    }

    pub async fn save_leads(&self, leads: &[Lead]) -> Result<(), CasareachError> {
        let rows: Vec<Vec<String>> = leads.iter().map(schema::lead_to_row).collect();
        tablefile::write_rows(&self.dir, Table::Leads, &rows).await
    }

    /// Look up a lead by exact email. Empty emails never match.
    pub async fn find_lead_by_email(&self, email: &str) -> Result<Option<Lead>, CasareachError> {
        if email.is_empty() {
            return Ok(None);
        }
        Ok(self
            .load_leads()
            .await?
            .into_iter()
            .find(|lead| lead.email == email))
    }

    /// Look up a lead by exact E.164 phone. Empty phones never match.
    pub async fn find_lead_by_phone(&self, phone: &str) -> Result<Option<Lead>, CasareachError> {
        if phone.is_empty() {
            return Ok(None);
        }
        Ok(self
            .load_leads()
            .await?
            .into_iter()
            .find(|lead| lead.phone_e164 == phone))
    }

    pub async fn get_lead(&self, lead_id: &str) -> Result<Option<Lead>, CasareachError> {
        Ok(self
            .load_leads()
            .await?
            .into_iter()
            .find(|lead| lead.lead_id == lead_id))
    }

    /// Create a lead, enforcing the identity invariant: if a lead already
    /// exists with the same non-empty email or phone, that lead is reused.
    /// Duplicate identity is never an error.
    ///
    /// Returns the stored lead and whether it was newly created.
    pub async fn create_lead(&self, lead: Lead) -> Result<(Lead, bool), CasareachError> {
        let mut leads = self.load_leads().await?;

        let existing = leads.iter().find(|l| {
            (!lead.email.is_empty() && l.email == lead.email)
                || (!lead.phone_e164.is_empty() && l.phone_e164 == lead.phone_e164)
        });
        if let Some(existing) = existing {
            debug!(lead_id = %existing.lead_id, "identity collision, reusing existing lead");
            return Ok((existing.clone(), false));
        }

        info!(lead_id = %lead.lead_id, source = %lead.source, "creating lead");
        leads.push(lead.clone());
        self.save_leads(&leads).await?;
        Ok((lead, true))
    }

    pub async fn set_lead_status(
        &self,
        lead_id: &str,
        status: LeadStatus,
    ) -> Result<(), CasareachError> {
        let mut leads = self.load_leads().await?;
        let lead = leads
            .iter_mut()
            .find(|l| l.lead_id == lead_id)
            .ok_or_else(|| CasareachError::Internal(format!("lead not found: {lead_id}")))?;
        lead.status = status;
        self.save_leads(&leads).await
    }

    // --- approvals ---

    pub async fn load_approvals(&self) -> Result<Vec<Approval>, CasareachError> {
        let rows = tablefile::read_rows(&self.dir, Table::Approvals).await?;
        rows.iter()
            .map(|row| schema::approval_from_row(row).map_err(|e| e.into_fatal(Table::Approvals)))
            .collect()
    }

    pub async fn save_approvals(&self, approvals: &[Approval]) -> Result<(), CasareachError> {
        let rows: Vec<Vec<String>> = approvals.iter().map(schema::approval_to_row).collect();
        tablefile::write_rows(&self.dir, Table::Approvals, &rows).await
    }

    pub async fn get_approval(&self, approval_id: &str) -> Result<Option<Approval>, CasareachError> {
        Ok(self
            .load_approvals()
            .await?
            .into_iter()
            .find(|a| a.approval_id == approval_id))
    }

    pub async fn append_approval(&self, approval: &Approval) -> Result<(), CasareachError> {
        let mut approvals = self.load_approvals().await?;
        approvals.push(approval.clone());
        self.save_approvals(&approvals).await
    }

    /// Replace the stored approval with the same id.
    pub async fn update_approval(&self, approval: &Approval) -> Result<(), CasareachError> {
        let mut approvals = self.load_approvals().await?;
        let slot = approvals
            .iter_mut()
            .find(|a| a.approval_id == approval.approval_id)
            .ok_or_else(|| CasareachError::ApprovalNotFound {
                approval_id: approval.approval_id.clone(),
            })?;
        *slot = approval.clone();
        self.save_approvals(&approvals).await
    }

    // --- events ---

    pub async fn load_events(&self) -> Result<Vec<EventRecord>, CasareachError> {
        let rows = tablefile::read_rows(&self.dir, Table::Events).await?;
        rows.iter()
            .map(|row| schema::event_from_row(row).map_err(|e| e.into_fatal(Table::Events)))
            .collect()
    }

    /// Append one audit event. Each append is its own atomic rewrite, so
    /// events are durable independently of any batched table write.
    pub async fn append_event(&self, event: &EventRecord) -> Result<(), CasareachError> {
        let mut rows = tablefile::read_rows(&self.dir, Table::Events).await?;
        rows.push(schema::event_to_row(event));
        tablefile::write_rows(&self.dir, Table::Events, &rows).await
    }

    // --- contacts ---

    pub async fn load_contacts(&self) -> Result<Vec<ContactEntry>, CasareachError> {
        let rows = tablefile::read_rows(&self.dir, Table::Contacts).await?;
        rows.iter()
            .map(|row| schema::contact_from_row(row).map_err(|e| e.into_fatal(Table::Contacts)))
            .collect()
    }

    pub async fn find_contact(
        &self,
        channel: Channel,
        external_id: &str,
    ) -> Result<Option<ContactEntry>, CasareachError> {
        Ok(self
            .load_contacts()
            .await?
            .into_iter()
            .find(|c| c.channel == channel && c.external_id == external_id))
    }

    /// Insert a contact mapping unless (channel, external_id) already exists.
    /// Returns whether a new mapping was written.
    pub async fn upsert_contact(&self, entry: &ContactEntry) -> Result<bool, CasareachError> {
        let mut contacts = self.load_contacts().await?;
        if contacts
            .iter()
            .any(|c| c.channel == entry.channel && c.external_id == entry.external_id)
        {
            return Ok(false);
        }
        contacts.push(entry.clone());
        let rows: Vec<Vec<String>> = contacts.iter().map(schema::contact_to_row).collect();
        tablefile::write_rows(&self.dir, Table::Contacts, &rows).await?;
        Ok(true)
    }

    // --- do-not-contact ---

    pub async fn load_dnc(&self) -> Result<Vec<DncEntry>, CasareachError> {
        let rows = tablefile::read_rows(&self.dir, Table::Dnc).await?;
        rows.iter()
            .map(|row| schema::dnc_from_row(row).map_err(|e| e.into_fatal(Table::Dnc)))
            .collect()
    }

    pub async fn add_dnc(&self, entry: &DncEntry) -> Result<(), CasareachError> {
        let mut dnc = self.load_dnc().await?;
        if dnc.iter().any(|d| d.value == entry.value) {
            return Ok(());
        }
        dnc.push(entry.clone());
        let rows: Vec<Vec<String>> = dnc.iter().map(schema::dnc_to_row).collect();
        tablefile::write_rows(&self.dir, Table::Dnc, &rows).await
    }

    /// Whether `value` (email or phone) is on the do-not-contact list.
    /// Empty values are never blocked.
    pub async fn dnc_contains(&self, value: &str) -> Result<bool, CasareachError> {
        if value.is_empty() {
            return Ok(false);
        }
        Ok(self.load_dnc().await?.iter().any(|d| d.value == value))
    }
}
