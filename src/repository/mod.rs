use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        client::{Client, NewClient},
        types::{ClientId, Income},
    },
    pagination::{MAX_PAGE_SIZE, Page},
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Zero-based page selector passed to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    /// Builds a request, clamping `per_page` to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip before the first item of this page, or `None`
    /// when it does not fit into an SQL `OFFSET`.
    pub fn offset(&self) -> Option<i64> {
        let per_page = i64::try_from(self.per_page).ok()?;
        i64::try_from(self.page).ok()?.checked_mul(per_page)
    }

    /// Page size as an SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    /// Wraps the loaded items into a [`Page`] carrying this request's metadata.
    pub fn into_page<T>(self, items: Vec<T>, total: usize) -> Page<T> {
        Page::new(items, self.page, self.per_page, total)
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, request: PageRequest) -> RepositoryResult<Page<Client>>;
    fn list_clients_by_income(
        &self,
        income: Income,
        request: PageRequest,
    ) -> RepositoryResult<Page<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    /// Persists the editable fields of an already stored client.
    fn save_client(&self, client: &Client) -> RepositoryResult<Client>;
    /// Removes the client, failing with `NotFound` when nothing was deleted.
    fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 0).per_page, 1);
        assert_eq!(PageRequest::new(0, 10).per_page, 10);
        assert_eq!(PageRequest::new(0, 10_000).per_page, MAX_PAGE_SIZE);
    }

    #[test]
    fn page_request_offset_is_zero_based() {
        assert_eq!(PageRequest::new(0, 10).offset(), Some(0));
        assert_eq!(PageRequest::new(3, 10).offset(), Some(30));
    }

    #[test]
    fn page_request_offset_overflow_is_none() {
        assert_eq!(PageRequest::new(usize::MAX, 10).offset(), None);
        assert_eq!(PageRequest::new(i64::MAX as usize, 2).offset(), None);
        assert_eq!(PageRequest::new(i64::MAX as usize, 1).offset(), Some(i64::MAX));
    }

    #[test]
    fn into_page_carries_request_metadata() {
        let page = PageRequest::new(2, 5).into_page(vec!["a", "b"], 12);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 5);
        assert_eq!(page.total, 12);
        assert_eq!(page.items, vec!["a", "b"]);
    }
}
