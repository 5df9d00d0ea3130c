//! Stateless HTTP request builder and response parser for the `Food` resource.
//!
//! # Design
//! `MealClient` holds only the base URL. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Parsing runs wire records through
//! `transform::from_wire`, so callers only ever see `Meal`.
//!
//! Any status outside 2xx, and any body that does not decode, fails with the
//! operation's `FetchError`. The cause is logged here and dropped.

use tracing::warn;
use url::Url;

use crate::error::{ClientError, FetchError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transform::{from_wire, to_wire, PriceSource};
use crate::types::{Meal, MealDraft, WireMeal};

/// Public mock endpoint the catalog was built against.
pub const DEFAULT_BASE_URL: &str = "https://6852821e0594059b23cdd834.mockapi.io/Food";

/// Query parameter the store filters names on.
const NAME_FILTER: &str = "name";

/// Synchronous, stateless client for the `Food` resource.
#[derive(Debug, Clone)]
pub struct MealClient {
    base: Url,
}

impl MealClient {
    /// `base_url` is the collection URL itself, e.g. `http://host/Food`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_string()));
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn build_list(&self) -> HttpRequest {
        get(self.base.to_string())
    }

    /// `term` is sent as given; gating blank terms is the caller's job.
    pub fn build_search(&self, term: &str) -> HttpRequest {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair(NAME_FILTER, term);
        get(url.to_string())
    }

    pub fn build_create(&self, draft: &MealDraft) -> Result<HttpRequest, FetchError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.base.to_string(),
            headers: json_headers(),
            body: Some(encode(draft, Operation::Create)?),
        })
    }

    pub fn build_update(&self, id: &str, draft: &MealDraft) -> Result<HttpRequest, FetchError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.member_url(id),
            headers: json_headers(),
            body: Some(encode(draft, Operation::Update)?),
        })
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.member_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list<P: PriceSource + ?Sized>(&self, response: HttpResponse, prices: &mut P) -> Result<Vec<Meal>, FetchError> {
        parse_many(response, prices, Operation::List)
    }

    pub fn parse_search<P: PriceSource + ?Sized>(&self, response: HttpResponse, prices: &mut P) -> Result<Vec<Meal>, FetchError> {
        parse_many(response, prices, Operation::Search)
    }

    pub fn parse_create<P: PriceSource + ?Sized>(&self, response: HttpResponse, prices: &mut P) -> Result<Meal, FetchError> {
        parse_one(response, prices, Operation::Create)
    }

    pub fn parse_update<P: PriceSource + ?Sized>(&self, response: HttpResponse, prices: &mut P) -> Result<Meal, FetchError> {
        parse_one(response, prices, Operation::Update)
    }

    /// The store echoes the deleted record; the body is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), FetchError> {
        check_status(&response, Operation::Delete)
    }

    fn member_url(&self, id: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url.to_string()
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(draft: &MealDraft, operation: Operation) -> Result<String, FetchError> {
    serde_json::to_string(&to_wire(draft)).map_err(|e| {
        warn!(operation = operation.as_str(), error = %e, "failed to encode payload");
        FetchError::new(operation)
    })
}

fn parse_many<P: PriceSource + ?Sized>(response: HttpResponse, prices: &mut P, operation: Operation) -> Result<Vec<Meal>, FetchError> {
    check_status(&response, operation)?;
    let records: Vec<WireMeal> = decode(&response.body, operation)?;
    records
        .into_iter()
        .map(|wire| convert(wire, prices, operation))
        .collect()
}

fn parse_one<P: PriceSource + ?Sized>(response: HttpResponse, prices: &mut P, operation: Operation) -> Result<Meal, FetchError> {
    check_status(&response, operation)?;
    let record: WireMeal = decode(&response.body, operation)?;
    convert(record, prices, operation)
}

fn decode<T: serde::de::DeserializeOwned>(body: &str, operation: Operation) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(operation = operation.as_str(), error = %e, "response body did not decode");
        FetchError::new(operation)
    })
}

fn convert<P: PriceSource + ?Sized>(wire: WireMeal, prices: &mut P, operation: Operation) -> Result<Meal, FetchError> {
    let id = wire.id.clone();
    from_wire(wire, prices).map_err(|e| {
        warn!(operation = operation.as_str(), id = %id, error = %e, "wire record rejected");
        FetchError::new(operation)
    })
}

/// Every non-2xx status is the same failure to the caller.
fn check_status(response: &HttpResponse, operation: Operation) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(
        operation = operation.as_str(),
        status = response.status,
        body = %response.body,
        "remote returned non-success status"
    );
    Err(FetchError::new(operation))
}
