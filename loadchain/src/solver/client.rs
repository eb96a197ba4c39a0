//! HTTP client for the hosted VRPTW solver.

use tracing::debug;

use super::error::SolverError;
use super::types::{SolveRequest, SolveResponse};

/// Default request timeout. Solving can take a while on big matrices.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the solver client.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Base URL of the solver service.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SolverConfig {
    /// Create a config pointing at the given solver service.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// VRPTW solver API client.
#[derive(Debug, Clone)]
pub struct SolverClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolverClient {
    /// Create a new solver client with the given configuration.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        if config.base_url.is_empty() {
            return Err(SolverError::NotConfigured("empty base URL".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Post a problem and return the solver's reply.
    ///
    /// `solution_found: false` is a valid reply, not an error; only
    /// transport and protocol failures error.
    pub async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolverError> {
        let url = format!("{}/solve_routes", self.base_url);

        debug!(
            nodes = request.time_matrix.len(),
            loads = request.pickups_deliveries.len(),
            "posting problem to solver"
        );

        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SolverError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SolverError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_base_url() {
        let result = SolverClient::new(SolverConfig::new(""));
        assert!(matches!(result, Err(SolverError::NotConfigured(_))));
    }

    #[test]
    fn config_builder() {
        let config = SolverConfig::new("http://localhost:8000").with_timeout(10);
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 10);

        assert!(SolverClient::new(config).is_ok());
    }

    #[tokio::test]
    async fn unreachable_solver_surfaces_http_error() {
        // Port 1 has nothing listening; the request fails at connect
        let client =
            SolverClient::new(SolverConfig::new("http://127.0.0.1:1").with_timeout(2)).unwrap();

        let request = SolveRequest {
            time_matrix: vec![vec![0]],
            pickups_deliveries: vec![],
            demands: vec![0],
            time_windows: vec![[0, 1440]],
            num_vehicles: 1,
            vehicle_capacity: 45_000,
            max_route_time: 1440,
            depot_index: 0,
        };

        let result = client.solve(&request).await;
        assert!(matches!(result, Err(SolverError::Http(_))));
    }
}
