//! Transfer object exchanged with callers of the client service.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientName, Income, TypeConstraintError};

/// External projection of a [`Client`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct ClientDto {
    /// Identifier of the stored client. Ignored on insert.
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub income: Option<f64>,
}

impl ClientDto {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            income: None,
        }
    }

    pub fn with_income(mut self, income: f64) -> Self {
        self.income = Some(income);
        self
    }

    fn typed_fields(&self) -> Result<(ClientName, Option<Income>), TypeConstraintError> {
        let name = ClientName::new(self.name.as_str())?;
        let income = self.income.map(Income::new).transpose()?;
        Ok((name, income))
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: Some(client.id.get()),
            name: client.name.into_inner(),
            income: client.income.map(Income::get),
        }
    }
}

impl TryFrom<&ClientDto> for NewClient {
    type Error = TypeConstraintError;

    fn try_from(dto: &ClientDto) -> Result<Self, Self::Error> {
        let (name, income) = dto.typed_fields()?;
        Ok(NewClient::new(name, income))
    }
}

impl TryFrom<&ClientDto> for UpdateClient {
    type Error = TypeConstraintError;

    fn try_from(dto: &ClientDto) -> Result<Self, Self::Error> {
        let (name, income) = dto.typed_fields()?;
        Ok(UpdateClient::new(name, income))
    }
}
