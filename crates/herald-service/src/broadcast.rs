//! # Broadcast Fan-Out
//!
//! Best-effort delivery of one message to every registrant. Deliveries are
//! independent tasks: one recipient's failure never aborts the rest, and no
//! retry or per-delivery timeout is applied here (any timeout belongs to
//! the transport).
//!
//! Results are merged back **in input-list order**, so `failed_identities`
//! is deterministic regardless of task completion order.

use std::sync::Arc;

use tokio::task::JoinSet;

use herald_core::{Registrant, UserId};

use crate::sender::MessageSender;

/// Accounting for one broadcast invocation. Derived, never persisted —
/// discarded after the admin reply and audit entry are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Recipients that received the message.
    pub sent_count: usize,
    /// Recipients that did not.
    pub failed_count: usize,
    /// Failed recipients, in registrant-list order.
    pub failed_identities: Vec<UserId>,
}

impl BroadcastOutcome {
    /// The failed-identity list rendered for the audit entry: comma-joined
    /// identities, or the explicit `N/A` marker when nothing failed.
    pub fn failed_ids_marker(&self) -> String {
        if self.failed_identities.is_empty() {
            return "N/A".to_string();
        }
        self.failed_identities
            .iter()
            .map(UserId::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The audit `details` line for this broadcast.
    pub fn audit_details(&self, message: &str) -> String {
        format!(
            "Message: \"{message}\" | Sent: {}, Failed: {} (IDs: {})",
            self.sent_count,
            self.failed_count,
            self.failed_ids_marker()
        )
    }
}

/// Deliver `text` to every registrant concurrently and account for the
/// outcome deterministically.
pub async fn fan_out(
    sender: Arc<dyn MessageSender>,
    registrants: &[Registrant],
    text: &str,
) -> BroadcastOutcome {
    let mut tasks = JoinSet::new();
    for (index, registrant) in registrants.iter().enumerate() {
        let sender = Arc::clone(&sender);
        let identity = registrant.identity;
        let handle = registrant.handle.clone();
        let text = text.to_string();
        tasks.spawn(async move {
            let result = sender.send(identity, &text).await;
            if let Err(ref e) = result {
                tracing::warn!(
                    user_id = %identity,
                    handle = handle.as_deref().unwrap_or("N/A"),
                    error = %e,
                    "broadcast delivery failed"
                );
            }
            (index, result.is_ok())
        });
    }

    // Merge in input order: a delivery counts as failed unless its task
    // reported success (a panicked task therefore counts as a failure).
    let mut delivered = vec![false; registrants.len()];
    while let Some(joined) = tasks.join_next().await {
        if let Ok((index, ok)) = joined {
            delivered[index] = ok;
        }
    }

    let mut outcome = BroadcastOutcome {
        sent_count: 0,
        failed_count: 0,
        failed_identities: Vec::new(),
    };
    for (registrant, ok) in registrants.iter().zip(delivered) {
        if ok {
            outcome.sent_count += 1;
        } else {
            outcome.failed_count += 1;
            outcome.failed_identities.push(registrant.identity);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::MockSender;

    fn registrants(ids: &[i64]) -> Vec<Registrant> {
        ids.iter()
            .map(|&id| Registrant {
                identity: UserId::new(id),
                handle: None,
                display_name: "N/A".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn all_deliveries_succeed() {
        let sender = Arc::new(MockSender::new());
        let outcome = fan_out(sender.clone(), &registrants(&[1, 2, 3]), "launch!").await;

        assert_eq!(outcome.sent_count, 3);
        assert_eq!(outcome.failed_count, 0);
        assert!(outcome.failed_identities.is_empty());
        assert_eq!(sender.sent().len(), 3);
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_rest() {
        let sender = Arc::new(MockSender::new());
        sender.fail_for([UserId::new(2)]);

        let outcome = fan_out(sender.clone(), &registrants(&[1, 2, 3]), "launch!").await;

        assert_eq!(outcome.sent_count, 2);
        assert_eq!(outcome.failed_count, 1);
        assert_eq!(outcome.failed_identities, vec![UserId::new(2)]);
        // Recipient 3 was still delivered to, despite 2's failure.
        assert!(sender.sent().iter().any(|(id, _)| *id == UserId::new(3)));
    }

    #[tokio::test]
    async fn failures_are_reported_in_input_order() {
        let sender = Arc::new(MockSender::new());
        sender.fail_for([UserId::new(5), UserId::new(1), UserId::new(9)]);

        let outcome = fan_out(sender, &registrants(&[1, 3, 5, 7, 9]), "x").await;

        assert_eq!(
            outcome.failed_identities,
            vec![UserId::new(1), UserId::new(5), UserId::new(9)]
        );
    }

    #[tokio::test]
    async fn empty_roster_yields_zero_outcome() {
        let sender = Arc::new(MockSender::new());
        let outcome = fan_out(sender, &[], "x").await;
        assert_eq!(outcome.sent_count, 0);
        assert_eq!(outcome.failed_count, 0);
    }

    #[test]
    fn audit_details_with_failures() {
        let outcome = BroadcastOutcome {
            sent_count: 2,
            failed_count: 1,
            failed_identities: vec![UserId::new(2)],
        };
        assert_eq!(
            outcome.audit_details("The app is live!"),
            "Message: \"The app is live!\" | Sent: 2, Failed: 1 (IDs: 2)"
        );
    }

    #[test]
    fn audit_details_without_failures_uses_marker() {
        let outcome = BroadcastOutcome {
            sent_count: 3,
            failed_count: 0,
            failed_identities: Vec::new(),
        };
        assert!(outcome.audit_details("hi").ends_with("(IDs: N/A)"));
    }
}
