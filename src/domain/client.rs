use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, Income};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    /// Declared income, when known.
    pub income: Option<Income>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// Overwrites the editable fields with the provided updates.
    pub fn apply(&mut self, updates: UpdateClient) {
        self.name = updates.name;
        self.income = updates.income;
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: ClientName,
    pub income: Option<Income>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName, income: Option<Income>) -> Self {
        Self { name, income }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub name: ClientName,
    pub income: Option<Income>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(name: ClientName, income: Option<Income>) -> Self {
        Self { name, income }
    }
}
