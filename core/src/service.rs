//! One round trip per catalog operation.
//!
//! `MealService` pairs a `MealClient` with a host `Transport` and the price
//! source used when decoding. Failures are surfaced once: no retry, no
//! backoff.

use tracing::{debug, warn};

use crate::client::MealClient;
use crate::error::{FetchError, Operation};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::transform::PriceSource;
use crate::types::{Meal, MealDraft};

pub struct MealService<T, P> {
    client: MealClient,
    transport: T,
    prices: P,
}

impl<T: Transport, P: PriceSource> MealService<T, P> {
    pub fn new(client: MealClient, transport: T, prices: P) -> Self {
        Self {
            client,
            transport,
            prices,
        }
    }

    pub fn client(&self) -> &MealClient {
        &self.client
    }

    pub fn list(&mut self) -> Result<Vec<Meal>, FetchError> {
        let response = self.round_trip(Operation::List, self.client.build_list())?;
        self.client.parse_list(response, &mut self.prices)
    }

    /// A blank term returns no results without touching the network.
    pub fn search(&mut self, term: &str) -> Result<Vec<Meal>, FetchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let response = self.round_trip(Operation::Search, self.client.build_search(term))?;
        self.client.parse_search(response, &mut self.prices)
    }

    /// The store assigns the id of the returned meal.
    pub fn create(&mut self, draft: &MealDraft) -> Result<Meal, FetchError> {
        let request = self.client.build_create(draft)?;
        let response = self.round_trip(Operation::Create, request)?;
        self.client.parse_create(response, &mut self.prices)
    }

    pub fn update(&mut self, id: &str, draft: &MealDraft) -> Result<Meal, FetchError> {
        let request = self.client.build_update(id, draft)?;
        let response = self.round_trip(Operation::Update, request)?;
        self.client.parse_update(response, &mut self.prices)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), FetchError> {
        let response = self.round_trip(Operation::Delete, self.client.build_delete(id))?;
        self.client.parse_delete(response)
    }

    fn round_trip(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        debug!(
            operation = operation.as_str(),
            method = request.method.as_str(),
            url = %request.url,
            "sending request"
        );
        let response = self.transport.execute(request).map_err(|e| {
            warn!(operation = operation.as_str(), error = %e, "transport failed");
            FetchError::new(operation)
        })?;
        debug!(operation = operation.as_str(), status = response.status, "response received");
        Ok(response)
    }
}
