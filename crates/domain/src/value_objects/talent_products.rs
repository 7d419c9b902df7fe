use serde::{Deserialize, Serialize};

use crate::value_objects::enums::talent_statuses::TalentStatus;

/// One tiered offer on a talent listing. Stored as JSONB on the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageOffer {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_minor: i32,
    pub delivery_days: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertTalentProductModel {
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price_minor: i32,
    #[serde(default)]
    pub packages: Vec<PackageOffer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTalentProductModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub base_price_minor: Option<i32>,
    pub packages: Option<Vec<PackageOffer>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetTalentAvailabilityModel {
    pub status: TalentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTalentProductsFilter {
    pub category: Option<String>,
    pub status: Option<TalentStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
