use crate::wire::HealthRes;

/// Simple health service that can be used by both the REST API and the CLI
///
/// This service provides a standardised way to check the health status of the AurumRx
/// service, including how many interaction records are being served.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance
    ///
    /// # Arguments
    /// * `record_count` - Number of records in the knowledge base being served
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health(record_count: usize) -> HealthRes {
        HealthRes {
            ok: true,
            message: format!("AurumRx is alive ({record_count} interaction records)"),
        }
    }
}
