use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{entity::Entity, purchase::Purchase};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityType {
    #[default]
    Share,
    Bond,
    Fund,
}

impl SecurityType {
    pub const ALL: [SecurityType; 3] = [SecurityType::Share, SecurityType::Bond, SecurityType::Fund];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::Share => "SHARE",
            SecurityType::Bond => "BOND",
            SecurityType::Fund => "FUND",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown security type: {s}"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    #[default]
    Rus,
    Usa,
    Others,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Rus, Region::Usa, Region::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Rus => "RUS",
            Region::Usa => "USA",
            Region::Others => "OTHERS",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown region: {s}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub ticker: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<SecurityType>,
    pub region: Option<Region>,

    // back-reference, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchases: Option<Vec<Purchase>>,
}

impl Security {
    pub fn reference(id: i64) -> Self {
        Security {
            id: Some(id),
            ..Default::default()
        }
    }
}

impl Entity for Security {
    const ENTITY_NAME: &'static str = "security";
    const LABEL: &'static str = "Security";
    const API_PATH: &'static str = "api/securities";
    const COLLECTION: &'static str = "security";
    const ROUTE: &'static str = "/security";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn merge_patch(&mut self, patch: Self) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.ticker.is_some() {
            self.ticker = patch.ticker;
        }
        if patch.kind.is_some() {
            self.kind = patch.kind;
        }
        if patch.region.is_some() {
            self.region = patch.region;
        }
    }

    fn for_storage(&self) -> Self {
        Security {
            purchases: None,
            ..self.clone()
        }
    }
}
