//! Client service: paged listings, lookups and mutations over a repository.

use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ClientId, Income};
use crate::dto::client::ClientDto;
use crate::pagination::Page;
use crate::repository::{ClientReader, ClientWriter, PageRequest};
use crate::services::{ServiceError, ServiceResult};

fn validate_dto(dto: &ClientDto) -> ServiceResult<()> {
    dto.validate().map_err(|err| {
        log::error!("Failed to validate client: {err}");
        ServiceError::Validation(err.to_string())
    })
}

/// Returns one page of all clients ordered by identifier.
pub fn find_all_paged<R>(
    repo: &R,
    page_number: usize,
    page_size: usize,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo
        .list_clients(PageRequest::new(page_number, page_size))
        .map_err(|err| {
            log::error!("Failed to list clients: {err}");
            ServiceError::from(err)
        })?;

    Ok(page.map(ClientDto::from))
}

/// Returns one page of clients whose income equals `income` exactly.
pub fn find_by_income<R>(
    repo: &R,
    income: f64,
    page_number: usize,
    page_size: usize,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let income = Income::new(income)?;

    let page = repo
        .list_clients_by_income(income, PageRequest::new(page_number, page_size))
        .map_err(|err| {
            log::error!("Failed to list clients with income {income}: {err}");
            ServiceError::from(err)
        })?;

    Ok(page.map(ClientDto::from))
}

/// Fetches a single client, failing with [`ServiceError::NotFound`] when absent.
pub fn find_by_id<R>(repo: &R, id: ClientId) -> ServiceResult<ClientDto>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(id)
        .map_err(ServiceError::from)?
        .map(ClientDto::from)
        .ok_or(ServiceError::NotFound)
}

/// Applies the DTO's fields to the stored client and persists the result.
///
/// The path identifier wins over `dto.id`.
pub fn update<R>(repo: &R, id: ClientId, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    validate_dto(dto)?;
    let updates = UpdateClient::try_from(dto)?;

    let mut client = repo
        .get_client_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            log::warn!("Client {id} not found for update");
            ServiceError::NotFound
        })?;

    client.apply(updates);

    let saved = repo.save_client(&client).map_err(|err| {
        log::error!("Failed to update client {id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(saved.into())
}

/// Creates a new client from the DTO. Identifiers are assigned by the store.
pub fn insert<R>(repo: &R, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientWriter + ?Sized,
{
    validate_dto(dto)?;
    let new_client = NewClient::try_from(dto)?;

    let created = repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })?;

    Ok(created.into())
}

/// Deletes the client. A missing client surfaces as [`ServiceError::NotFound`].
pub fn delete<R>(repo: &R, id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(id).map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDateTime};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::client::Client;
    use crate::domain::types::ClientName;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn timestamp() -> NaiveDateTime {
        DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc()
    }

    fn client(id: i32, name: &str) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: ClientName::new(name).unwrap(),
            income: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn client_with_income(id: i32, name: &str, income: f64) -> Client {
        Client {
            income: Some(Income::new(income).unwrap()),
            ..client(id, name)
        }
    }

    fn id(value: i32) -> ClientId {
        ClientId::new(value).unwrap()
    }

    #[test]
    fn delete_existing_client_calls_repository_once() {
        let mut repo = MockRepository::new();
        repo.expect_delete_client()
            .with(eq(id(1)))
            .times(1)
            .returning(|_| Ok(()));

        let result = delete(&repo, id(1));

        assert!(result.is_ok());
    }

    #[test]
    fn delete_missing_client_propagates_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_client()
            .with(eq(id(100)))
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete(&repo, id(100));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn find_all_paged_returns_repository_page() {
        let expected = Page::new(
            vec![client(1, "Genilson"), client(2, "Pedro Lucas")],
            0,
            10,
            2,
        );
        let supplied = expected.clone();

        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .with(eq(PageRequest::new(0, 10)))
            .times(1)
            .returning(move |_| Ok(supplied.clone()));

        let page = find_all_paged(&repo, 0, 10).expect("page should load");

        assert_eq!(page, expected.map(ClientDto::from));
        assert_eq!(page.len(), 2);
        assert_eq!(page.items[0].name, "Genilson");
        assert_eq!(page.items[1].name, "Pedro Lucas");
    }

    #[test]
    fn find_all_paged_propagates_repository_failure() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("pool timed out".into())));

        let result = find_all_paged(&repo, 0, 10);

        assert!(matches!(result, Err(ServiceError::Internal(_))));
    }

    #[test]
    fn find_by_income_returns_repository_page() {
        let expected = Page::new(vec![client_with_income(1, "Genilson", 5000.0)], 0, 10, 1);
        let supplied = expected.clone();

        let mut repo = MockRepository::new();
        repo.expect_list_clients_by_income()
            .withf(|income, request| income.get() == 5000.0 && *request == PageRequest::new(0, 10))
            .times(1)
            .returning(move |_, _| Ok(supplied.clone()));

        let page = find_by_income(&repo, 5000.0, 0, 10).expect("page should load");

        assert_eq!(page, expected.map(ClientDto::from));
        assert_eq!(page.items[0].income, Some(5000.0));
    }

    #[test]
    fn find_by_income_rejects_negative_income() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients_by_income().never();

        let result = find_by_income(&repo, -1.0, 0, 10);

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[test]
    fn find_by_id_maps_existing_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .with(eq(id(1)))
            .times(1)
            .returning(|_| Ok(Some(client(1, "Genilson"))));

        let dto = find_by_id(&repo, id(1)).expect("client should exist");

        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.name, "Genilson");
    }

    #[test]
    fn find_by_id_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .with(eq(id(2)))
            .times(1)
            .returning(|_| Ok(None));

        let result = find_by_id(&repo, id(2));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_applies_dto_before_saving() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .with(eq(id(1)))
            .times(1)
            .returning(|_| Ok(Some(client(1, "Genilson"))));
        repo.expect_save_client()
            .withf(|client| client.id.get() == 1 && client.name.as_str() == "Pedro Lucas")
            .times(1)
            .returning(|client| Ok(client.clone()));

        let dto = update(&repo, id(1), &ClientDto::new(1, "Pedro Lucas"))
            .expect("update should succeed");

        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.name, "Pedro Lucas");
    }

    #[test]
    fn update_keeps_path_identifier() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|_| Ok(Some(client_with_income(1, "Genilson", 5000.0))));
        repo.expect_save_client()
            .withf(|client| client.id.get() == 1 && client.income.is_none())
            .times(1)
            .returning(|client| Ok(client.clone()));

        let dto = update(&repo, id(1), &ClientDto::new(42, "Genilson"))
            .expect("update should succeed");

        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.income, None);
    }

    #[test]
    fn update_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .with(eq(id(2)))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_save_client().never();

        let result = update(&repo, id(2), &ClientDto::new(2, "Pedro Lucas"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_with_empty_name_fails_validation() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().never();
        repo.expect_save_client().never();

        let result = update(&repo, id(1), &ClientDto::new(1, ""));

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn insert_returns_what_the_store_created() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .withf(|new_client| new_client.name.as_str() == "Pedro Lucas")
            .times(1)
            .returning(|new_client| {
                Ok(Client {
                    name: new_client.name.clone(),
                    income: new_client.income,
                    ..client(1, "placeholder")
                })
            });

        let dto = insert(&repo, &ClientDto::new(1, "Pedro Lucas")).expect("insert should succeed");

        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.name, "Pedro Lucas");
    }

    #[test]
    fn insert_with_blank_name_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().never();

        let result = insert(&repo, &ClientDto::new(1, "   "));

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }
}
