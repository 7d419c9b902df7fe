use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Whether the seller payout for a payment has been logically approved.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EscrowStatus {
    #[default]
    Held,
    Released,
    Refunded,
}

impl EscrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscrowStatus::Held => "held",
            EscrowStatus::Released => "released",
            EscrowStatus::Refunded => "refunded",
        }
    }
}

impl Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EscrowStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "held" => Ok(EscrowStatus::Held),
            "released" => Ok(EscrowStatus::Released),
            "refunded" => Ok(EscrowStatus::Refunded),
            other => Err(anyhow::anyhow!("unknown escrow status: {}", other)),
        }
    }
}
