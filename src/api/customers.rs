//! Customer resource client.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::{read_body, translate_error};
use crate::error::OnvoError;
use crate::objects::{CreateCustomer, Customer, PaginatedResponse};
use crate::transport::Transport;
use crate::url_builder::encode_query_component;

const CUSTOMERS_ENDPOINT: &str = "/customers";

/// Typed client for the **customers** resource.
///
/// Obtained from [`OnvoClient::customers`](crate::OnvoClient::customers);
/// shares the facade's transport and default headers.
#[derive(Debug, Clone)]
pub struct CustomersApi {
    transport: Arc<Transport>,
}

impl CustomersApi {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `POST /customers` – create a new customer.
    ///
    /// The API answers 201 with the created customer; any other status is
    /// translated into an [`ApiError`](crate::ApiError).
    pub async fn create(&self, customer: &CreateCustomer) -> Result<Customer, OnvoError> {
        let body = serde_json::to_string(customer).map_err(|err| {
            OnvoError::InvalidArgument(format!("unable to serialize customer: {err}"))
        })?;
        debug!(%body, "creating customer");

        let response = self.transport.post(CUSTOMERS_ENDPOINT, Some(body), None).await?;
        if response.status() != 201 {
            return Err(translate_error(response.status(), response.body()));
        }
        info!("customer created");
        read_body(response.body())
    }

    /// `GET /customers/{id}` – fetch a single customer.
    ///
    /// Returns `Ok(None)` when the id is blank or the API answers 404.
    pub async fn get(&self, customer_id: &str) -> Result<Option<Customer>, OnvoError> {
        if customer_id.trim().is_empty() {
            error!("customer id is blank");
            return Ok(None);
        }
        let path = format!(
            "{CUSTOMERS_ENDPOINT}/{}",
            urlencoding::encode(customer_id)
        );

        let response = self.transport.get(&path, None).await?;
        match response.status() {
            200 => read_body(response.body()).map(Some),
            404 => {
                info!(customer_id, "customer not found");
                Ok(None)
            }
            status => Err(translate_error(status, response.body())),
        }
    }

    /// `GET /customers?email=…` – list customers matching an email address.
    pub async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<PaginatedResponse<Customer>, OnvoError> {
        if email.trim().is_empty() {
            return Err(OnvoError::InvalidArgument(
                "email must not be empty".to_owned(),
            ));
        }
        let path = format!(
            "{CUSTOMERS_ENDPOINT}?email={}",
            encode_query_component(email)
        );

        let response = self.transport.get(&path, None).await?;
        if response.status() != 200 {
            return Err(translate_error(response.status(), response.body()));
        }
        read_body(response.body())
    }

    /// `GET /customers?limit=…` – list customers with cursor pagination.
    ///
    /// `limit` must be between 1 and 100; blank cursors are ignored.
    pub async fn list(
        &self,
        limit: u32,
        ending_before: Option<&str>,
        starting_after: Option<&str>,
    ) -> Result<PaginatedResponse<Customer>, OnvoError> {
        if limit == 0 {
            return Err(OnvoError::InvalidArgument(
                "limit must be greater than 0".to_owned(),
            ));
        }
        if limit > 100 {
            return Err(OnvoError::InvalidArgument(
                "limit must be less than or equal to 100".to_owned(),
            ));
        }

        let mut params = format!("?limit={limit}");
        if let Some(cursor) = ending_before.filter(|cursor| !cursor.trim().is_empty()) {
            params.push_str("&endingBefore=");
            params.push_str(&encode_query_component(cursor));
        }
        if let Some(cursor) = starting_after.filter(|cursor| !cursor.trim().is_empty()) {
            params.push_str("&startingAfter=");
            params.push_str(&encode_query_component(cursor));
        }
        debug!(%params, "listing customers");

        let response = self
            .transport
            .get(&format!("{CUSTOMERS_ENDPOINT}{params}"), None)
            .await?;
        if response.status() != 200 {
            return Err(translate_error(response.status(), response.body()));
        }
        read_body(response.body())
    }
}
