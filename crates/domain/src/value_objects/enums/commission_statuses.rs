use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Admin payout workflow for a monthly commission batch.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    #[default]
    Calculated,
    Processed,
    Paid,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Calculated => "calculated",
            CommissionStatus::Processed => "processed",
            CommissionStatus::Paid => "paid",
        }
    }

    /// The batch workflow only moves forward: calculated -> processed -> paid.
    pub fn can_advance_to(&self, next: CommissionStatus) -> bool {
        matches!(
            (self, next),
            (CommissionStatus::Calculated, CommissionStatus::Processed)
                | (CommissionStatus::Processed, CommissionStatus::Paid)
        )
    }
}

impl Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommissionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calculated" => Ok(CommissionStatus::Calculated),
            "processed" => Ok(CommissionStatus::Processed),
            "paid" => Ok(CommissionStatus::Paid),
            other => Err(anyhow::anyhow!("unknown commission status: {}", other)),
        }
    }
}
