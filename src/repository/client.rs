//! Repository implementation for clients.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        client::{Client, NewClient},
        types::{ClientId, Income},
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    pagination::Page,
    repository::{
        ClientReader, ClientWriter, DieselRepository, PageRequest,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn into_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_clients(&self, request: PageRequest) -> RepositoryResult<Page<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let total: i64 = clients::table.count().get_result(&mut conn)?;

        let Some(offset) = request.offset() else {
            return Ok(request.into_page(Vec::new(), total as usize));
        };

        let rows = clients::table
            .order(clients::id.asc())
            .limit(request.limit())
            .offset(offset)
            .load::<DbClient>(&mut conn)?;

        Ok(request.into_page(into_domain(rows)?, total as usize))
    }

    fn list_clients_by_income(
        &self,
        income: Income,
        request: PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let total: i64 = clients::table
            .filter(clients::income.eq(income.get()))
            .count()
            .get_result(&mut conn)?;

        let Some(offset) = request.offset() else {
            return Ok(request.into_page(Vec::new(), total as usize));
        };

        let rows = clients::table
            .filter(clients::income.eq(income.get()))
            .order(clients::id.asc())
            .limit(request.limit())
            .offset(offset)
            .load::<DbClient>(&mut conn)?;

        Ok(request.into_page(into_domain(rows)?, total as usize))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable: DbNewClient = new_client.into();

        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(created)?)
    }

    fn save_client(&self, client: &Client) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changes = DbUpdateClient::from_client(client, Utc::now().naive_utc());

        let saved = diesel::update(clients::table.find(client.id.get()))
            .set(&changes)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(saved)?)
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
