use buzon_core_health_contracts::{HealthFeatureService, HealthStatus};

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl {
    config: HealthFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub smtp_configured: bool,
}

impl HealthFeatureServiceImpl {
    pub fn new(config: HealthFeatureConfig) -> Self {
        Self { config }
    }
}

impl HealthFeatureService for HealthFeatureServiceImpl {
    async fn get_status(&self) -> HealthStatus {
        HealthStatus {
            smtp_configured: self.config.smtp_configured,
        }
    }
}
