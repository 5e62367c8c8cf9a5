// stepline_project/demos/checkout_app/src/state.rs
use crate::config::AppConfig;
use crate::store::Store;
use std::sync::Arc;
use stepline::ActionRegistry;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<Store>,
  pub registry: Arc<ActionRegistry>,
  pub config: Arc<AppConfig>,
}
