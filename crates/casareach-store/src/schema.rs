// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical table schemas and strict row validation.
//!
//! Header order is authoritative per table. A header mismatch is fatal for
//! the operation touching that table; tables are never auto-migrated.
//! Enum-valued columns are parsed strictly: unknown values are rejected,
//! never coerced. Optional text columns default to the empty string.

use std::str::FromStr;

use thiserror::Error;

use casareach_core::CasareachError;
use casareach_core::types::{Approval, ContactEntry, DncEntry, EventRecord, Lead};

/// The five persisted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Leads,
    Approvals,
    Events,
    Contacts,
    Dnc,
}

impl Table {
    /// Logical table name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Leads => "leads",
            Table::Approvals => "approvals",
            Table::Events => "events",
            Table::Contacts => "contacts",
            Table::Dnc => "dnc",
        }
    }

    /// File name of the table inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Leads => "leads.csv",
            Table::Approvals => "approvals.csv",
            Table::Events => "events.csv",
            Table::Contacts => "contacts.csv",
            Table::Dnc => "dnc.csv",
        }
    }

    /// Canonical column order. Writing and validation both use this.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Table::Leads => &[
                "lead_id",
                "first_name",
                "last_name",
                "email",
                "phone_e164",
                "city",
                "province",
                "source",
                "tags",
                "status",
                "created_at",
            ],
            Table::Approvals => &[
                "approval_id",
                "ts_created",
                "lead_id",
                "channel",
                "action_type",
                "draft_subject",
                "draft_text",
                "draft_to",
                "status",
                "approved_by",
                "approved_at",
                "notes",
            ],
            Table::Events => &[
                "event_id",
                "ts",
                "lead_id",
                "channel",
                "event_type",
                "campaign",
                "message_id",
                "meta_json",
            ],
            Table::Contacts => &["lead_id", "channel", "external_id"],
            Table::Dnc => &["value", "reason", "ts_added"],
        }
    }
}

/// Closed error type for schema violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Found headers differ from the canonical order.
    #[error("header mismatch: expected [{expected}], found [{found}]")]
    HeaderMismatch { expected: String, found: String },

    /// A row has the wrong number of columns.
    #[error("row has {found} columns, expected {expected}")]
    RowWidth { expected: usize, found: usize },

    /// An enum-valued column holds an unknown value.
    #[error("invalid value `{value}` for column `{column}`")]
    InvalidValue { column: &'static str, value: String },
}

impl SchemaError {
    /// Promote a schema violation to the fatal pipeline error for `table`.
    pub fn into_fatal(self, table: Table) -> CasareachError {
        CasareachError::Schema {
            table: table.name(),
            message: self.to_string(),
        }
    }
}

/// Exact, order-sensitive header check.
pub fn validate_headers(table: Table, found: &[String]) -> Result<(), SchemaError> {
    let expected = table.headers();
    if found.len() == expected.len() && found.iter().zip(expected).all(|(f, e)| f == e) {
        return Ok(());
    }
    Err(SchemaError::HeaderMismatch {
        expected: expected.join(", "),
        found: found.join(", "),
    })
}

fn check_width(table: Table, row: &[String]) -> Result<(), SchemaError> {
    let expected = table.headers().len();
    if row.len() != expected {
        return Err(SchemaError::RowWidth {
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

fn parse_enum<T: FromStr>(column: &'static str, value: &str) -> Result<T, SchemaError> {
    T::from_str(value).map_err(|_| SchemaError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

pub fn lead_from_row(row: &[String]) -> Result<Lead, SchemaError> {
    check_width(Table::Leads, row)?;
    Ok(Lead {
        lead_id: row[0].clone(),
        first_name: row[1].clone(),
        last_name: row[2].clone(),
        email: row[3].clone(),
        phone_e164: row[4].clone(),
        city: row[5].clone(),
        province: row[6].clone(),
        source: row[7].clone(),
        tags: row[8].clone(),
        status: parse_enum("status", &row[9])?,
        created_at: row[10].clone(),
    })
}

pub fn lead_to_row(lead: &Lead) -> Vec<String> {
    vec![
        lead.lead_id.clone(),
        lead.first_name.clone(),
        lead.last_name.clone(),
        lead.email.clone(),
        lead.phone_e164.clone(),
        lead.city.clone(),
        lead.province.clone(),
        lead.source.clone(),
        lead.tags.clone(),
        lead.status.to_string(),
        lead.created_at.clone(),
    ]
}

pub fn approval_from_row(row: &[String]) -> Result<Approval, SchemaError> {
    check_width(Table::Approvals, row)?;
    Ok(Approval {
        approval_id: row[0].clone(),
        ts_created: row[1].clone(),
        lead_id: row[2].clone(),
        channel: parse_enum("channel", &row[3])?,
        action_type: parse_enum("action_type", &row[4])?,
        draft_subject: row[5].clone(),
        draft_text: row[6].clone(),
        draft_to: row[7].clone(),
        status: parse_enum("status", &row[8])?,
        approved_by: row[9].clone(),
        approved_at: row[10].clone(),
        notes: row[11].clone(),
    })
}

pub fn approval_to_row(approval: &Approval) -> Vec<String> {
    vec![
        approval.approval_id.clone(),
        approval.ts_created.clone(),
        approval.lead_id.clone(),
        approval.channel.to_string(),
        approval.action_type.to_string(),
        approval.draft_subject.clone(),
        approval.draft_text.clone(),
        approval.draft_to.clone(),
        approval.status.to_string(),
        approval.approved_by.clone(),
        approval.approved_at.clone(),
        approval.notes.clone(),
    ]
}

pub fn event_from_row(row: &[String]) -> Result<EventRecord, SchemaError> {
    check_width(Table::Events, row)?;
    Ok(EventRecord {
        event_id: row[0].clone(),
        ts: row[1].clone(),
        lead_id: row[2].clone(),
        channel: parse_enum("channel", &row[3])?,
        event_type: row[4].clone(),
        campaign: row[5].clone(),
        message_id: row[6].clone(),
        meta_json: row[7].clone(),
    })
}

pub fn event_to_row(event: &EventRecord) -> Vec<String> {
    vec![
        event.event_id.clone(),
        event.ts.clone(),
        event.lead_id.clone(),
        event.channel.to_string(),
        event.event_type.clone(),
        event.campaign.clone(),
        event.message_id.clone(),
        event.meta_json.clone(),
    ]
}

pub fn contact_from_row(row: &[String]) -> Result<ContactEntry, SchemaError> {
    check_width(Table::Contacts, row)?;
    Ok(ContactEntry {
        lead_id: row[0].clone(),
        channel: parse_enum("channel", &row[1])?,
        external_id: row[2].clone(),
    })
}

pub fn contact_to_row(entry: &ContactEntry) -> Vec<String> {
    vec![
        entry.lead_id.clone(),
        entry.channel.to_string(),
        entry.external_id.clone(),
    ]
}

pub fn dnc_from_row(row: &[String]) -> Result<DncEntry, SchemaError> {
    check_width(Table::Dnc, row)?;
    Ok(DncEntry {
        value: row[0].clone(),
        reason: row[1].clone(),
        ts_added: row[2].clone(),
    })
}

pub fn dnc_to_row(entry: &DncEntry) -> Vec<String> {
    vec![
        entry.value.clone(),
        entry.reason.clone(),
        entry.ts_added.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use casareach_core::types::{ActionType, ApprovalStatus, Channel, LeadStatus};
    use casareach_core::util::{new_id, utc_now};

    fn sample_lead() -> Lead {
        Lead {
            lead_id: new_id(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            email: "ana@example.com".into(),
            phone_e164: "+14165551234".into(),
            city: "Toronto".into(),
            province: "ON".into(),
            source: "import".into(),
            tags: "buyer,condo".into(),
            status: LeadStatus::New,
            created_at: utc_now(),
        }
    }

    #[test]
    fn headers_are_order_sensitive() {
        let mut found: Vec<String> =
            Table::Leads.headers().iter().map(|s| s.to_string()).collect();
        assert!(validate_headers(Table::Leads, &found).is_ok());

        found.swap(0, 1);
        let err = validate_headers(Table::Leads, &found).unwrap_err();
        assert!(matches!(err, SchemaError::HeaderMismatch { .. }));
    }

    #[test]
    fn missing_column_is_header_mismatch() {
        let found: Vec<String> = Table::Dnc.headers()[..2]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(validate_headers(Table::Dnc, &found).is_err());
    }

    #[test]
    fn lead_round_trips_through_row() {
        let lead = sample_lead();
        let row = lead_to_row(&lead);
        assert_eq!(row.len(), Table::Leads.headers().len());
        let parsed = lead_from_row(&row).unwrap();
        assert_eq!(parsed, lead);
    }

    #[test]
    fn approval_round_trips_through_row() {
        let approval = Approval {
            approval_id: new_id(),
            ts_created: utc_now(),
            lead_id: new_id(),
            channel: Channel::Linkedin,
            action_type: ActionType::Dm,
            draft_subject: "".into(),
            draft_text: "Hi there, saw your listing inquiry".into(),
            draft_to: "in/ana-silva".into(),
            status: ApprovalStatus::ApprovedOpened,
            approved_by: "operator".into(),
            approved_at: utc_now(),
            notes: "".into(),
        };
        let parsed = approval_from_row(&approval_to_row(&approval)).unwrap();
        assert_eq!(parsed, approval);
    }

    #[test]
    fn unknown_status_is_rejected_not_coerced() {
        let mut row = lead_to_row(&sample_lead());
        row[9] = "lukewarm".into();
        let err = lead_from_row(&row).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                column: "status",
                value: "lukewarm".into()
            }
        );
    }

    #[test]
    fn short_row_is_rejected() {
        let row = vec!["only".to_string(), "three".to_string(), "cols".to_string()];
        let err = lead_from_row(&row).unwrap_err();
        assert!(matches!(err, SchemaError::RowWidth { expected: 11, found: 3 }));
    }

    #[test]
    fn fatal_error_names_the_table() {
        let err = SchemaError::RowWidth {
            expected: 3,
            found: 1,
        }
        .into_fatal(Table::Contacts);
        assert!(err.to_string().contains("contacts"));
    }
}
