use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{ClientId, ClientName, Income, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub income: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub income: Option<f64>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub income: Option<f64>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::try_from(client.id)?,
            name: ClientName::new(client.name)?,
            income: client.income.map(Income::try_from).transpose()?,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            income: client.income.map(Income::get),
        }
    }
}

impl<'a> UpdateClient<'a> {
    /// Builds the changeset for a stored client, stamping `updated_at`.
    pub fn from_client(client: &'a DomainClient, updated_at: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            income: client.income.map(Income::get),
            updated_at,
        }
    }
}
