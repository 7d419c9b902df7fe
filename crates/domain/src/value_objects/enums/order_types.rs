use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Item,
    Talent,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Item => "item",
            OrderType::Talent => "talent",
        }
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(OrderType::Item),
            "talent" => Ok(OrderType::Talent),
            other => Err(anyhow::anyhow!("unknown order type: {}", other)),
        }
    }
}
