//! Filter types for querying moves.

use super::MoveStatus;

/// Filter options for listing moves.
#[derive(Debug, Clone, Default)]
pub struct MoveFilter {
    /// Only moves in this status
    pub status: Option<MoveStatus>,

    /// Only moves linked to this campaign
    pub campaign_id: Option<u64>,

    /// Hide completed moves
    pub exclude_completed: bool,
}

impl MoveFilter {
    /// Moves that still need attention: everything not yet completed.
    pub fn open() -> Self {
        Self {
            exclude_completed: true,
            ..Default::default()
        }
    }

    /// Moves linked to one campaign, in any status.
    pub fn for_campaign(campaign_id: u64) -> Self {
        Self {
            campaign_id: Some(campaign_id),
            ..Default::default()
        }
    }
}
