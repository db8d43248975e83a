pub mod assembly;
pub mod community;
pub mod health;
pub mod http;
pub mod router;
pub mod stress;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::Router;

use crate::assistant::ModelHandle;
use community::CommunityMatcher;
use health::HealthRecommender;
use router::workflow_router;
use stress::StressAnalyzer;

/// The three wellness workflows sharing one model handle.
#[derive(Debug, Clone)]
pub struct WellnessServices {
    pub stress: Arc<StressAnalyzer>,
    pub health: Arc<HealthRecommender>,
    pub community: Arc<CommunityMatcher>,
}

impl WellnessServices {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            stress: Arc::new(StressAnalyzer::new(model.clone())),
            health: Arc::new(HealthRecommender::new(model.clone())),
            community: Arc::new(CommunityMatcher::new(model)),
        }
    }

    /// All workflow routes merged into one router.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(workflow_router(Arc::clone(&self.stress)))
            .merge(workflow_router(Arc::clone(&self.health)))
            .merge(workflow_router(Arc::clone(&self.community)))
    }
}
