use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TalentStatus {
    #[default]
    Available,
    Busy,
    Unavailable,
}

impl TalentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TalentStatus::Available => "available",
            TalentStatus::Busy => "busy",
            TalentStatus::Unavailable => "unavailable",
        }
    }
}

impl Display for TalentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TalentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TalentStatus::Available),
            "busy" => Ok(TalentStatus::Busy),
            "unavailable" => Ok(TalentStatus::Unavailable),
            other => Err(anyhow::anyhow!("unknown talent status: {}", other)),
        }
    }
}
