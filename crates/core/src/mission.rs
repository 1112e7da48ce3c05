//! Mission (service request) lifecycle rules.
//!
//! A mission moves along `PENDING -> ACCEPTED -> IN_PROGRESS -> COMPLETED`,
//! with `PENDING -> REJECTED` as the only alternate branch. [`plan_transition`]
//! validates a requested edge and returns every write it implies, so the
//! persistence layer can apply them in one transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::trust::MISSION_COMPLETION_TRUST_BONUS;

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    /// Present in stored data; no transition leads here.
    Cancelled,
    Rejected,
}

impl MissionStatus {
    pub const ALL: [MissionStatus; 6] = [
        MissionStatus::Pending,
        MissionStatus::Accepted,
        MissionStatus::InProgress,
        MissionStatus::Completed,
        MissionStatus::Cancelled,
        MissionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "PENDING",
            MissionStatus::Accepted => "ACCEPTED",
            MissionStatus::InProgress => "IN_PROGRESS",
            MissionStatus::Completed => "COMPLETED",
            MissionStatus::Cancelled => "CANCELLED",
            MissionStatus::Rejected => "REJECTED",
        }
    }

    /// No edge leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MissionStatus::Completed | MissionStatus::Cancelled | MissionStatus::Rejected
        )
    }

    /// Whether `self -> to` is one of the four permitted edges.
    pub fn can_transition_to(&self, to: MissionStatus) -> bool {
        matches!(
            (self, to),
            (MissionStatus::Pending, MissionStatus::Accepted)
                | (MissionStatus::Pending, MissionStatus::Rejected)
                | (MissionStatus::Accepted, MissionStatus::InProgress)
                | (MissionStatus::InProgress, MissionStatus::Completed)
        )
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown mission status '{s}'")))
    }
}

impl TryFrom<String> for MissionStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/* --------------------------------------------------------------------------
Hero portal actions
-------------------------------------------------------------------------- */

/// Buttons offered by the hero portal, each targeting one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionAction {
    Accept,
    StartWork,
    Complete,
    Reject,
}

impl MissionAction {
    pub fn target(&self) -> MissionStatus {
        match self {
            MissionAction::Accept => MissionStatus::Accepted,
            MissionAction::StartWork => MissionStatus::InProgress,
            MissionAction::Complete => MissionStatus::Completed,
            MissionAction::Reject => MissionStatus::Rejected,
        }
    }
}

/* --------------------------------------------------------------------------
Transition planning
-------------------------------------------------------------------------- */

/// Every write and side effect implied by one accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: MissionStatus,
    pub to: MissionStatus,
    pub photo_before: Option<String>,
    pub photo_after: Option<String>,
    /// Added to the assigned hero's trust factor.
    pub trust_delta: i64,
    /// Added to the assigned hero's completed-missions counter.
    pub missions_delta: i32,
    /// The client is emailed when the hero accepts.
    pub notify_client: bool,
}

impl TransitionPlan {
    pub fn touches_hero(&self) -> bool {
        self.trust_delta != 0 || self.missions_delta != 0
    }
}

/// Validate `from -> to` and work out what it implies.
///
/// `IN_PROGRESS` needs the "before" photo and `COMPLETED` the "after" photo;
/// a missing or blank photo is a validation error. Photos sent with other
/// transitions are ignored.
pub fn plan_transition(
    from: MissionStatus,
    to: MissionStatus,
    photo: Option<&str>,
) -> Result<TransitionPlan, CoreError> {
    if !from.can_transition_to(to) {
        return Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let photo = photo.map(str::trim).filter(|p| !p.is_empty());
    let mut plan = TransitionPlan {
        from,
        to,
        photo_before: None,
        photo_after: None,
        trust_delta: 0,
        missions_delta: 0,
        notify_client: false,
    };

    match to {
        MissionStatus::Accepted => plan.notify_client = true,
        MissionStatus::InProgress => {
            let photo = photo.ok_or_else(|| {
                CoreError::Validation("A 'before' photo is required to start work".into())
            })?;
            plan.photo_before = Some(photo.to_string());
        }
        MissionStatus::Completed => {
            let photo = photo.ok_or_else(|| {
                CoreError::Validation("An 'after' photo is required to complete a mission".into())
            })?;
            plan.photo_after = Some(photo.to_string());
            plan.trust_delta = MISSION_COMPLETION_TRUST_BONUS;
            plan.missions_delta = 1;
        }
        // No trust penalty on rejection.
        MissionStatus::Rejected => {}
        MissionStatus::Pending | MissionStatus::Cancelled => {}
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_allowed_edges_are_exactly_four() {
        let mut allowed = Vec::new();
        for from in MissionStatus::ALL {
            for to in MissionStatus::ALL {
                if from.can_transition_to(to) {
                    allowed.push((from, to));
                }
            }
        }
        assert_eq!(
            allowed,
            vec![
                (MissionStatus::Pending, MissionStatus::Accepted),
                (MissionStatus::Pending, MissionStatus::Rejected),
                (MissionStatus::Accepted, MissionStatus::InProgress),
                (MissionStatus::InProgress, MissionStatus::Completed),
            ]
        );
    }

    #[test]
    fn test_terminal_statuses_have_no_outgoing_edges() {
        for from in MissionStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            for to in MissionStatus::ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be refused");
            }
        }
    }

    #[test]
    fn test_accept_notifies_client_without_touching_hero() {
        let plan = plan_transition(MissionStatus::Pending, MissionStatus::Accepted, None).unwrap();
        assert!(plan.notify_client);
        assert!(!plan.touches_hero());
        assert_eq!(plan.photo_before, None);
    }

    #[test]
    fn test_start_work_requires_before_photo() {
        let err = plan_transition(MissionStatus::Accepted, MissionStatus::InProgress, None);
        assert_matches!(err, Err(CoreError::Validation(_)));

        let blank = plan_transition(MissionStatus::Accepted, MissionStatus::InProgress, Some("  "));
        assert_matches!(blank, Err(CoreError::Validation(_)));

        let plan = plan_transition(
            MissionStatus::Accepted,
            MissionStatus::InProgress,
            Some("data:image/jpeg;base64,AAA"),
        )
        .unwrap();
        assert_eq!(plan.photo_before.as_deref(), Some("data:image/jpeg;base64,AAA"));
        assert_eq!(plan.photo_after, None);
    }

    #[test]
    fn test_completion_awards_five_trust_and_one_mission() {
        let plan = plan_transition(
            MissionStatus::InProgress,
            MissionStatus::Completed,
            Some("https://img/after.jpg"),
        )
        .unwrap();
        assert_eq!(plan.trust_delta, 5);
        assert_eq!(plan.missions_delta, 1);
        assert_eq!(plan.photo_after.as_deref(), Some("https://img/after.jpg"));
    }

    #[test]
    fn test_completion_without_photo_is_refused() {
        let result = plan_transition(MissionStatus::InProgress, MissionStatus::Completed, None);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_rejection_has_no_penalty() {
        let plan = plan_transition(MissionStatus::Pending, MissionStatus::Rejected, None).unwrap();
        assert_eq!(plan.trust_delta, 0);
        assert!(!plan.notify_client);
    }

    #[test]
    fn test_skipping_ahead_is_an_invalid_transition() {
        let result = plan_transition(
            MissionStatus::Pending,
            MissionStatus::Completed,
            Some("https://img/after.jpg"),
        );
        assert_matches!(
            result,
            Err(CoreError::InvalidTransition { ref from, ref to }) if from == "PENDING" && to == "COMPLETED"
        );
    }

    #[test]
    fn test_going_backwards_is_an_invalid_transition() {
        let result = plan_transition(MissionStatus::InProgress, MissionStatus::Accepted, None);
        assert_matches!(result, Err(CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn test_status_strings_parse() {
        assert_eq!("IN_PROGRESS".parse::<MissionStatus>().unwrap(), MissionStatus::InProgress);
        assert_matches!("DONE".parse::<MissionStatus>(), Err(CoreError::Validation(_)));
        assert_eq!(
            serde_json::to_string(&MissionStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
    }

    #[test]
    fn test_actions_map_to_statuses() {
        assert_eq!(MissionAction::Accept.target(), MissionStatus::Accepted);
        assert_eq!(MissionAction::StartWork.target(), MissionStatus::InProgress);
        assert_eq!(MissionAction::Complete.target(), MissionStatus::Completed);
        assert_eq!(MissionAction::Reject.target(), MissionStatus::Rejected);
    }
}
