//! Port for inspecting and draining live instances.

use async_trait::async_trait;
use flavor_sdk::InstanceDescription;
use thiserror::Error;
use tokio::net::TcpStream;
use tracing::debug;

/// Outcome of a successful inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inspection {
    /// The instance answered and reported itself operational.
    Up,
    /// The instance answered and reported itself broken.
    Down,
}

/// Inspection could not produce a verdict. Always treated as transient.
#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("endpoint {endpoint} unreachable: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("inspection rejected: {0}")]
    Rejected(String),
}

/// Inspects live instances on behalf of the role flavor.
#[async_trait]
pub trait InstanceInspector: Send + Sync {
    /// Probes `endpoint` (`host:port`).
    ///
    /// # Errors
    ///
    /// Returns an error when no verdict could be obtained.
    async fn inspect(&self, endpoint: &str) -> Result<Inspection, InspectionError>;

    /// Removes `instance` from whatever it serves before destruction.
    ///
    /// Must succeed when called again for an instance already drained.
    ///
    /// # Errors
    ///
    /// Returns an error when the drain could not be confirmed.
    async fn drain(&self, _instance: &InstanceDescription) -> Result<(), InspectionError> {
        Ok(())
    }
}

/// Inspector that treats an accepted TCP connection as `Up`.
///
/// Has nothing to drain.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpInspector;

#[async_trait]
impl InstanceInspector for TcpInspector {
    async fn inspect(&self, endpoint: &str) -> Result<Inspection, InspectionError> {
        match TcpStream::connect(endpoint).await {
            Ok(_) => Ok(Inspection::Up),
            Err(source) => {
                debug!(endpoint, error = %source, "TCP probe failed");
                Err(InspectionError::Unreachable {
                    endpoint: endpoint.to_owned(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listening_port_is_up() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = listener.local_addr().unwrap().to_string();

        let outcome = TcpInspector.inspect(&endpoint).await.unwrap();
        assert_eq!(outcome, Inspection::Up);
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = listener.local_addr().unwrap().to_string();
        drop(listener);

        let err = TcpInspector.inspect(&endpoint).await.unwrap_err();
        assert!(matches!(err, InspectionError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn default_drain_succeeds_repeatedly() {
        let desc = InstanceDescription::new("i-42");
        TcpInspector.drain(&desc).await.unwrap();
        TcpInspector.drain(&desc).await.unwrap();
    }
}
