//! The unit of work relayed from a caller to the browser agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::{Action, ActionArgs};

/// One requested automation action plus its arguments.
///
/// Lifecycle: created at submission, exposed in the channel's single pending
/// slot, claimed by exactly one poll, resolved by exactly one [`Outcome`],
/// then discarded.
///
/// [`Outcome`]: crate::outcome::Outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub id: Uuid,
    pub action: Action,
    pub args: ActionArgs,
    pub created_at: DateTime<Utc>,
}

impl Command {
    pub fn new(action: Action, args: ActionArgs) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            args,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_ids_are_unique() {
        let a = Command::new(Action::Ping, ActionArgs::default());
        let b = Command::new(Action::Ping, ActionArgs::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_command_round_trip() {
        let cmd = Command::new(
            Action::SendConnection,
            ActionArgs::for_profile("https://example.com/in/jane"),
        );
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, cmd.id);
        assert_eq!(back.action, Action::SendConnection);
        assert_eq!(back.args.profile_url.as_deref(), Some("https://example.com/in/jane"));
    }
}
