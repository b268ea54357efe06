use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::delivery::Sender;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub sender: Sender,
}
