use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{entity::Entity, security::Security};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Rub,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Rub];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Rub => "RUB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown currency: {s}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Option<i64>,
    pub price: Option<f32>,
    pub currency: Option<Currency>,
    // quantity
    pub number: Option<i32>,
    pub comission: Option<f32>,
    pub security: Option<Security>,
}

impl Purchase {
    pub fn security_id(&self) -> Option<i64> {
        self.security.as_ref().and_then(|s| s.id)
    }
}

impl Entity for Purchase {
    const ENTITY_NAME: &'static str = "purchase";
    const LABEL: &'static str = "Purchase";
    const API_PATH: &'static str = "api/purchases";
    const COLLECTION: &'static str = "purchase";
    const ROUTE: &'static str = "/purchase";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn merge_patch(&mut self, patch: Self) {
        if patch.price.is_some() {
            self.price = patch.price;
        }
        if patch.currency.is_some() {
            self.currency = patch.currency;
        }
        if patch.number.is_some() {
            self.number = patch.number;
        }
        if patch.comission.is_some() {
            self.comission = patch.comission;
        }
        if patch.security.is_some() {
            self.security = patch.security;
        }
    }

    fn for_storage(&self) -> Self {
        Purchase {
            security: self.security_id().map(Security::reference),
            ..self.clone()
        }
    }
}
