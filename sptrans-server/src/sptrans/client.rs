//! Olho Vivo HTTP client.
//!
//! Every query makes sure the session is authenticated, issues one GET
//! through the session's transport and decodes the body into the record
//! type for that endpoint.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, SptransError};
use super::session::SessionManager;
use super::types::{
    ArrivalPrediction, ArrivalPredictionsByLine, Company, Corridor, Direction, Line, Stop,
    VehiclePositions,
};

/// Default base URL for the Olho Vivo API.
pub const DEFAULT_BASE_URL: &str = "https://api.olhovivo.sptrans.com.br/v2.1";

/// SPTrans sessions are good for roughly half an hour.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(30 * 60);

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the SPTrans client.
#[derive(Debug, Clone)]
pub struct SptransConfig {
    /// Olho Vivo API token
    pub credential: String,
    /// Base URL for the API (defaults to production Olho Vivo)
    pub base_url: String,
    /// Network timeout for each request, authentication included
    pub timeout_secs: u64,
    /// How long a successful authentication is trusted
    pub validity_window: Duration,
    pub user_agent: String,
}

impl SptransConfig {
    /// Create a new config with the given credential.
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            validity_window: DEFAULT_VALIDITY_WINDOW,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_validity_window(mut self, window: Duration) -> Self {
        self.validity_window = window;
        self
    }
}

/// Olho Vivo API client.
///
/// One instance per process; share it behind an `Arc`.
#[derive(Debug)]
pub struct SptransClient {
    session: SessionManager,
    http: reqwest::Client,
    base_url: String,
}

impl SptransClient {
    /// Create a new client with the given configuration.
    ///
    /// No network traffic happens here; the first query (or an explicit
    /// `session().authenticate()`) logs in.
    pub fn new(config: SptransConfig) -> Result<Self, SptransError> {
        let session = SessionManager::new(&config)?;
        let http = session.transport().clone();

        Ok(Self {
            session,
            http,
            base_url: config.base_url,
        })
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Authenticated GET of `endpoint`, decoded as `T`.
    ///
    /// Query values are percent-encoded individually. Attempted exactly once.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, SptransError> {
        self.session.ensure_authenticated().await?;

        let url = format!("{}{}", self.base_url, endpoint);

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "SPTrans response");

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "SPTrans request failed");
            return Err(SptransError::Api(
                ApiError::new(status.as_u16(), "API request failed").with_details(format!(
                    "HTTP {} for endpoint {}",
                    status.as_u16(),
                    endpoint
                )),
            ));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(endpoint, error = %e, "undecodable SPTrans response");
            SptransError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            }
        })
    }

    /// Search lines by full or partial number or name.
    pub async fn search_lines(&self, search_term: &str) -> Result<Vec<Line>, SptransError> {
        self.request("/Linha/Buscar", &[("termosBusca", search_term.to_string())])
            .await
    }

    /// Search lines in one direction only.
    pub async fn search_line_by_direction(
        &self,
        search_term: &str,
        direction: Direction,
    ) -> Result<Vec<Line>, SptransError> {
        self.request(
            "/Linha/BuscarLinhaSentido",
            &[
                ("termosBusca", search_term.to_string()),
                ("sentido", direction.code().to_string()),
            ],
        )
        .await
    }

    /// Search stops by full or partial name or address.
    pub async fn search_stops(&self, search_term: &str) -> Result<Vec<Stop>, SptransError> {
        self.request("/Parada/Buscar", &[("termosBusca", search_term.to_string())])
            .await
    }

    pub async fn get_stops_by_line(&self, line_code: u32) -> Result<Vec<Stop>, SptransError> {
        self.request(
            "/Parada/BuscarParadasPorLinha",
            &[("codigoLinha", line_code.to_string())],
        )
        .await
    }

    pub async fn get_stops_by_corridor(
        &self,
        corridor_code: u32,
    ) -> Result<Vec<Stop>, SptransError> {
        self.request(
            "/Parada/BuscarParadasPorCorredor",
            &[("codigoCorredor", corridor_code.to_string())],
        )
        .await
    }

    pub async fn get_corridors(&self) -> Result<Vec<Corridor>, SptransError> {
        self.request("/Corredor", &[]).await
    }

    pub async fn get_companies(&self) -> Result<Company, SptransError> {
        self.request("/Empresa", &[]).await
    }

    /// Positions of every vehicle in service.
    pub async fn get_vehicle_positions(&self) -> Result<VehiclePositions, SptransError> {
        self.request("/Posicao", &[]).await
    }

    pub async fn get_vehicle_positions_by_line(
        &self,
        line_code: u32,
    ) -> Result<VehiclePositions, SptransError> {
        self.request("/Posicao/Linha", &[("codigoLinha", line_code.to_string())])
            .await
    }

    /// Vehicles of a company parked in its garages, optionally narrowed to
    /// a line.
    pub async fn get_vehicle_positions_in_garage(
        &self,
        company_code: u32,
        line_code: u32,
    ) -> Result<VehiclePositions, SptransError> {
        self.request(
            "/Posicao/Garagem",
            &[
                ("codigoEmpresa", company_code.to_string()),
                ("codigoLinha", line_code.to_string()),
            ],
        )
        .await
    }

    /// Arrival predictions for one line at one stop.
    pub async fn get_arrival_predictions(
        &self,
        stop_code: u32,
        line_code: u32,
    ) -> Result<ArrivalPrediction, SptransError> {
        self.request(
            "/Previsao",
            &[
                ("codigoParada", stop_code.to_string()),
                ("codigoLinha", line_code.to_string()),
            ],
        )
        .await
    }

    /// Arrival predictions at every stop served by a line.
    pub async fn get_arrival_predictions_by_line(
        &self,
        line_code: u32,
    ) -> Result<ArrivalPredictionsByLine, SptransError> {
        self.request("/Previsao/Linha", &[("codigoLinha", line_code.to_string())])
            .await
    }

    /// Arrival predictions for every line serving a stop.
    pub async fn get_arrival_predictions_by_stop(
        &self,
        stop_code: u32,
    ) -> Result<ArrivalPredictionsByLine, SptransError> {
        self.request("/Previsao/Parada", &[("codigoParada", stop_code.to_string())])
            .await
    }
}

/// Run `operation` under a caller deadline.
///
/// On expiry the operation's future is dropped, which aborts any in-flight
/// HTTP call; session state is only written once a full authentication
/// response has been read, so nothing is left half-updated.
pub async fn within_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, SptransError>
where
    F: Future<Output = Result<T, SptransError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(deadline_ms = deadline.as_millis() as u64, "SPTrans operation cancelled");
            Err(SptransError::Cancelled { after: deadline })
        }
    }
}
