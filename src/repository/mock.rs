//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::{ClientId, Income};
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter, PageRequest};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, request: PageRequest) -> RepositoryResult<Page<Client>>;
        fn list_clients_by_income(
            &self,
            income: Income,
            request: PageRequest,
        ) -> RepositoryResult<Page<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn save_client(&self, client: &Client) -> RepositoryResult<Client>;
        fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    }
}
