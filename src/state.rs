use std::sync::Arc;

use crate::config::Config;
use crate::email::Dispatcher;
use crate::store::ContactStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ContactStore>,
    pub dispatcher: Dispatcher,
}
