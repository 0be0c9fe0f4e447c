//! Monta API client
//!
//! One async method per endpoint. Each call fetches a bearer token, sends a
//! single request through the shared session, and decodes the JSON body into
//! domain records. Nothing is retried, cached, or queued.

use std::collections::HashMap;
use std::sync::Arc;

use monta_domain::constants::{
    PATH_CHARGES, PATH_CHARGE_POINTS, PATH_PERSONAL_WALLET, PATH_WALLET_TRANSACTIONS,
};
use monta_domain::{
    Charge, ChargePoint, ClientConfig, Credentials, MontaError, Page, Result, Wallet,
    WalletTransaction,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::auth::{AccessTokenProvider, MontaAuthService};
use super::filters::{ChargeFilter, TransactionFilter};
use super::request::{json_request, read_json};
use crate::http::{HttpClient, HttpSession};

/// Upper bound on pages followed for a single listing
const MAX_PAGES: u32 = 1_000;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartChargeRequest {
    charge_point_id: i64,
}

/// Client for the Monta public API
pub struct MontaApiClient {
    session: Arc<dyn HttpSession>,
    auth: Arc<dyn AccessTokenProvider>,
    config: ClientConfig,
    max_pages: u32,
}

impl MontaApiClient {
    /// Create a client that authenticates with `client_id` / `client_secret`
    ///
    /// `session` stays owned by the caller; the client only keeps a handle
    /// to it and may share it with other clients.
    ///
    /// # Errors
    ///
    /// Returns `MontaError::InvalidInput` if either credential is empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        session: Arc<dyn HttpSession>,
    ) -> Result<Self> {
        Self::builder().credentials(client_id, client_secret).session(session).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> MontaApiClientBuilder {
        MontaApiClientBuilder::default()
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// All charge points visible to the account, keyed by id
    ///
    /// # Errors
    ///
    /// `Auth` on rejected credentials, `Network` on transport failure, `Api`
    /// on any other non-success status, `Decode` on an unexpected body.
    #[instrument(skip(self))]
    pub async fn async_get_charge_points(&self) -> Result<HashMap<i64, ChargePoint>> {
        let charge_points: Vec<ChargePoint> =
            self.get_all_pages(PATH_CHARGE_POINTS, Vec::new()).await?;

        let by_id: HashMap<i64, ChargePoint> =
            charge_points.into_iter().map(|cp| (cp.id, cp)).collect();

        info!(count = by_id.len(), "Fetched charge points");
        Ok(by_id)
    }

    /// Charges recorded on a charge point, in the order the API returns them
    ///
    /// # Errors
    ///
    /// `NotFound` if the charge point id is unknown.
    #[instrument(skip(self))]
    pub async fn async_get_charges(&self, charge_point_id: i64) -> Result<Vec<Charge>> {
        self.async_get_charges_filtered(charge_point_id, &ChargeFilter::default()).await
    }

    /// Charges on a charge point narrowed by state and/or created-at window
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the window is inverted, `NotFound` if the charge
    /// point id is unknown.
    #[instrument(skip(self))]
    pub async fn async_get_charges_filtered(
        &self,
        charge_point_id: i64,
        filter: &ChargeFilter,
    ) -> Result<Vec<Charge>> {
        let mut query = vec![("chargePointId", charge_point_id.to_string())];
        query.extend(filter.to_query()?);

        let charges: Vec<Charge> =
            self.get_all_pages(PATH_CHARGES, query).await.map_err(|err| match err {
                MontaError::NotFound(detail) => MontaError::NotFound(format!(
                    "charge point {} not found: {}",
                    charge_point_id, detail
                )),
                other => other,
            })?;

        info!(charge_point_id, count = charges.len(), "Fetched charges");
        Ok(charges)
    }

    /// Ask the vendor to start charging on a charge point
    ///
    /// Returns the charge the vendor created. Charge-session state lives on
    /// the vendor side; poll [`async_get_charges`](Self::async_get_charges)
    /// to follow it.
    #[instrument(skip(self))]
    pub async fn async_start_charge(&self, charge_point_id: i64) -> Result<Charge> {
        let body = StartChargeRequest { charge_point_id };
        let charge: Charge = self.post(PATH_CHARGES, Some(&body)).await?;

        info!(charge_point_id, charge_id = charge.id, state = %charge.state, "Charge started");
        Ok(charge)
    }

    /// Ask the vendor to stop a running charge
    #[instrument(skip(self))]
    pub async fn async_stop_charge(&self, charge_id: i64) -> Result<Charge> {
        let path = format!("{}/{}/stop", PATH_CHARGES, charge_id);
        let charge: Charge = self.post::<(), _>(&path, None).await?;

        info!(charge_id, state = %charge.state, "Charge stopped");
        Ok(charge)
    }

    /// Snapshot of the personal wallet
    #[instrument(skip(self))]
    pub async fn async_get_personal_wallet(&self) -> Result<Wallet> {
        let wallet: Wallet = self.get(PATH_PERSONAL_WALLET, &[]).await?;

        debug!(wallet_id = wallet.id, "Fetched personal wallet");
        Ok(wallet)
    }

    /// Wallet ledger entries, in the order the API returns them
    #[instrument(skip(self))]
    pub async fn async_get_wallet_transactions(&self) -> Result<Vec<WalletTransaction>> {
        self.async_get_wallet_transactions_filtered(&TransactionFilter::default()).await
    }

    /// Wallet ledger entries narrowed by state and/or created-at window
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the window is inverted.
    #[instrument(skip(self))]
    pub async fn async_get_wallet_transactions_filtered(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<WalletTransaction>> {
        let transactions: Vec<WalletTransaction> =
            self.get_all_pages(PATH_WALLET_TRANSACTIONS, filter.to_query()?).await?;

        info!(count = transactions.len(), "Fetched wallet transactions");
        Ok(transactions)
    }

    /// Follow a paginated listing to its end, preserving order
    ///
    /// Stops early, with a warning, if the server answers with a page number
    /// other than the one requested or repeats the previous page verbatim.
    async fn get_all_pages<T: DeserializeOwned + PartialEq>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<Vec<T>> {
        let per_page = self.config.page_size;
        let mut items: Vec<T> = Vec::new();
        let mut previous_len = 0usize;
        let mut page_number = 0u32;

        loop {
            let mut page_query = query.clone();
            page_query.push(("page", page_number.to_string()));
            page_query.push(("perPage", per_page.to_string()));

            let page: Page<T> = self.get(path, &page_query).await?;

            if page_number > 0 {
                if !page.is_page(page_number) {
                    warn!(path, page = page_number, "Server ignored the page parameter");
                    break;
                }
                let previous = &items[items.len() - previous_len..];
                if !page.data.is_empty() && page.data.as_slice() == previous {
                    warn!(path, page = page_number, "Server repeated the previous page");
                    break;
                }
            }

            let more = page.has_more(page_number, per_page);
            previous_len = page.data.len();
            items.extend(page.data);

            if !more {
                break;
            }
            page_number += 1;
            if page_number >= self.max_pages {
                warn!(path, pages = page_number, "Stopped following pagination at page limit");
                break;
            }
        }

        Ok(items)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "GET request");

        let token = self.auth.access_token().await?;
        let request = json_request::<()>(Method::GET, &url, query, Some(&token), None)?;
        let response = self.session.send(request).await?;
        read_json(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "POST request");

        let token = self.auth.access_token().await?;
        let request = json_request(Method::POST, &url, &[], Some(&token), body)?;
        let response = self.session.send(request).await?;
        read_json(response).await
    }
}

/// Builder for [`MontaApiClient`]
#[derive(Default)]
pub struct MontaApiClientBuilder {
    config: Option<ClientConfig>,
    session: Option<Arc<dyn HttpSession>>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    credentials: Option<Credentials>,
}

impl MontaApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an existing HTTP session instead of building one from the config
    pub fn session(mut self, session: Arc<dyn HttpSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Authenticate with client credentials through [`MontaAuthService`]
    pub fn credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(client_id, client_secret));
        self
    }

    /// Use a custom token provider; takes precedence over credentials
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns `MontaError::Config` if the configuration is invalid or
    /// neither an auth provider nor credentials were set, and
    /// `MontaError::InvalidInput` if the credentials are incomplete.
    pub fn build(self) -> Result<MontaApiClient> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let session: Arc<dyn HttpSession> = match self.session {
            Some(session) => session,
            None => Arc::new(HttpClient::from_config(&config)?),
        };

        let auth: Arc<dyn AccessTokenProvider> = match (self.auth, self.credentials) {
            (Some(auth), _) => auth,
            (None, Some(credentials)) => {
                Arc::new(MontaAuthService::new(credentials, session.clone(), config.clone())?)
            }
            (None, None) => {
                return Err(MontaError::Config(
                    "Either an auth provider or client credentials must be set".to_string(),
                ))
            }
        };

        Ok(MontaApiClient { session, auth, config, max_pages: MAX_PAGES })
    }
}
