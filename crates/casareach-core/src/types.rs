// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the casareach workspace.
//!
//! All enums are closed: wire strings are snake_case and unknown values are
//! rejected during row validation, never coerced.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Unique identifier assigned by a channel for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// An outbound/inbound medium.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Whatsapp,
    Telegram,
    Linkedin,
    Facebook,
}

/// How a channel completes a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// The adapter delivers the message itself (fire-and-forget).
    Automatic,
    /// The adapter opens a composition surface and a human finishes the send.
    SemiAutomatic,
}

impl Channel {
    /// The channel's intrinsic dispatch mode. This is authoritative for the
    /// router's channel-class policy; an adapter cannot override it.
    pub fn dispatch_mode(&self) -> DispatchMode {
        match self {
            Channel::Linkedin | Channel::Facebook => DispatchMode::SemiAutomatic,
            Channel::Email | Channel::Whatsapp | Channel::Telegram => DispatchMode::Automatic,
        }
    }

    /// Chat channels identify leads by phone number; email by address.
    pub fn is_chat(&self) -> bool {
        matches!(self, Channel::Whatsapp | Channel::Telegram)
    }
}

/// The kind of outbound action an approval proposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    SendEmail,
    Reply,
    Dm,
    Post,
    ContactCapture,
}

/// Lifecycle status of a lead. Leads are never physically deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Drafted,
    Sent,
    Replied,
    Hot,
    Dnc,
}

/// Approval state machine status.
///
/// `pending` is initial; `approved` is the only state the router dispatches
/// from. Every other state is terminal: re-engaging a terminal approval means
/// creating a new Approval record, never mutating the old one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Sent,
    Failed,
    ApprovedOpened,
    SentManual,
}

impl ApprovalStatus {
    /// Whether this status is terminal. No automated process transitions
    /// out of a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApprovalStatus::Rejected
                | ApprovalStatus::Sent
                | ApprovalStatus::Failed
                | ApprovalStatus::ApprovedOpened
                | ApprovalStatus::SentManual
        )
    }

    /// Whether the state machine permits a transition from `self` to `to`.
    pub fn can_transition(&self, to: ApprovalStatus) -> bool {
        match self {
            ApprovalStatus::Pending => {
                matches!(to, ApprovalStatus::Approved | ApprovalStatus::Rejected)
            }
            ApprovalStatus::Approved => matches!(
                to,
                ApprovalStatus::Sent
                    | ApprovalStatus::Failed
                    | ApprovalStatus::ApprovedOpened
                    | ApprovalStatus::SentManual
            ),
            _ => false,
        }
    }
}

/// A prospective client. At most one lead per non-empty email and at most one
/// per non-empty phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub lead_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// E.164 formatted phone number, or empty.
    pub phone_e164: String,
    pub city: String,
    pub province: String,
    pub source: String,
    pub tags: String,
    pub status: LeadStatus,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}

/// A proposed outbound action awaiting human sign-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub approval_id: String,
    pub ts_created: String,
    pub lead_id: String,
    pub channel: Channel,
    pub action_type: ActionType,
    pub draft_subject: String,
    pub draft_text: String,
    pub draft_to: String,
    pub status: ApprovalStatus,
    pub approved_by: String,
    pub approved_at: String,
    pub notes: String,
}

/// An immutable audit record. Events are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub event_id: String,
    pub ts: String,
    pub lead_id: String,
    pub channel: Channel,
    pub event_type: String,
    pub campaign: String,
    pub message_id: String,
    /// Free-form JSON context, e.g. `{"approval_id":..,"to":..,"ok":..}`.
    pub meta_json: String,
}

/// Per-channel external identifier for a lead, unique per
/// (channel, external_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEntry {
    pub lead_id: String,
    pub channel: Channel,
    pub external_id: String,
}

/// A do-not-contact list entry. `value` is an email address or E.164 phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DncEntry {
    pub value: String,
    pub reason: String,
    pub ts_added: String,
}

/// An inbound message produced by a channel-specific ingestion source.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Source-assigned message id, used as the ingestion idempotency key.
    pub id: String,
    /// Sender identity: email address for email, external id for chat.
    pub from: String,
    pub to: String,
    pub subject: Option<String>,
    pub body: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
    pub channel: Channel,
    /// Raw payload as received, kept for traceability.
    pub raw: String,
}

/// Result of a successful adapter send.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Channel-assigned message id, when the channel reports one.
    pub message_id: Option<MessageId>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn channel_wire_strings_round_trip() {
        for channel in Channel::iter() {
            let s = channel.to_string();
            assert_eq!(Channel::from_str(&s).unwrap(), channel);
        }
        assert_eq!(Channel::Whatsapp.to_string(), "whatsapp");
        assert_eq!(Channel::Linkedin.to_string(), "linkedin");
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!(Channel::from_str("carrier_pigeon").is_err());
        assert!(ApprovalStatus::from_str("maybe").is_err());
        assert!(ActionType::from_str("broadcast").is_err());
        assert!(LeadStatus::from_str("cold").is_err());
    }

    #[test]
    fn multi_word_statuses_use_snake_case() {
        assert_eq!(ApprovalStatus::ApprovedOpened.to_string(), "approved_opened");
        assert_eq!(ApprovalStatus::SentManual.to_string(), "sent_manual");
        assert_eq!(ActionType::SendEmail.to_string(), "send_email");
        assert_eq!(
            ApprovalStatus::from_str("approved_opened").unwrap(),
            ApprovalStatus::ApprovedOpened
        );
    }

    #[test]
    fn interactive_channels_are_semi_automatic() {
        assert_eq!(Channel::Linkedin.dispatch_mode(), DispatchMode::SemiAutomatic);
        assert_eq!(Channel::Facebook.dispatch_mode(), DispatchMode::SemiAutomatic);
        assert_eq!(Channel::Email.dispatch_mode(), DispatchMode::Automatic);
        assert_eq!(Channel::Whatsapp.dispatch_mode(), DispatchMode::Automatic);
        assert_eq!(Channel::Telegram.dispatch_mode(), DispatchMode::Automatic);
    }

    #[test]
    fn pending_transitions() {
        let pending = ApprovalStatus::Pending;
        assert!(pending.can_transition(ApprovalStatus::Approved));
        assert!(pending.can_transition(ApprovalStatus::Rejected));
        assert!(!pending.can_transition(ApprovalStatus::Sent));
        assert!(!pending.can_transition(ApprovalStatus::SentManual));
        assert!(!pending.is_terminal());
    }

    #[test]
    fn approved_transitions() {
        let approved = ApprovalStatus::Approved;
        assert!(approved.can_transition(ApprovalStatus::Sent));
        assert!(approved.can_transition(ApprovalStatus::Failed));
        assert!(approved.can_transition(ApprovalStatus::ApprovedOpened));
        assert!(approved.can_transition(ApprovalStatus::SentManual));
        assert!(!approved.can_transition(ApprovalStatus::Pending));
        assert!(!approved.can_transition(ApprovalStatus::Rejected));
        assert!(!approved.is_terminal());
    }

    #[test]
    fn terminal_states_are_frozen() {
        let terminals = [
            ApprovalStatus::Rejected,
            ApprovalStatus::Sent,
            ApprovalStatus::Failed,
            ApprovalStatus::ApprovedOpened,
            ApprovalStatus::SentManual,
        ];
        let all = [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::Sent,
            ApprovalStatus::Failed,
            ApprovalStatus::ApprovedOpened,
            ApprovalStatus::SentManual,
        ];
        for from in terminals {
            assert!(from.is_terminal());
            for to in all {
                assert!(!from.can_transition(to), "{from} -> {to} must be frozen");
            }
        }
    }

    #[test]
    fn channel_serde_uses_snake_case() {
        let json = serde_json::to_string(&Channel::Linkedin).unwrap();
        assert_eq!(json, "\"linkedin\"");
        let parsed: Channel = serde_json::from_str("\"whatsapp\"").unwrap();
        assert_eq!(parsed, Channel::Whatsapp);
    }
}
