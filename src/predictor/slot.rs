use super::Predictor;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Holds the active predictor. Cloning shares the same slot.
///
/// An empty slot means no model is loaded. `install` swaps the whole
/// predictor, so in-flight requests finish on the one they started with.
#[derive(Clone, Default)]
pub struct PredictorSlot {
    active: Arc<RwLock<Option<Arc<dyn Predictor>>>>,
}

impl PredictorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_predictor(predictor: Arc<dyn Predictor>) -> Self {
        let slot = Self::new();
        slot.install(predictor);
        slot
    }

    pub fn install(&self, predictor: Arc<dyn Predictor>) {
        info!("Installing predictor: {}", predictor.name());
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        *active = Some(predictor);
    }

    pub fn clear(&self) {
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        *active = None;
    }

    pub fn current(&self) -> Option<Arc<dyn Predictor>> {
        let active = self.active.read().unwrap_or_else(|e| e.into_inner());
        active.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_some_and(|p| p.is_ready())
    }
}
