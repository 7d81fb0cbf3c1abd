use std::path::Path;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use minijinja::{path_loader, Environment};

use crate::{auth::signing_key, config::Config, database::DbPool};

/// Everything a handler may need, cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub templates: Arc<Environment<'static>>,
    key: Key,
}

impl AppState {
    pub fn new(config: Config, pool: DbPool) -> Self {
        let templates = create_minijinja_env(&config.template_dir);
        let key = signing_key(&config.secret_key);

        Self {
            pool,
            config: Arc::new(config),
            templates: Arc::new(templates),
            key,
        }
    }
}

// Lets SignedCookieJar find the signing key
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn create_minijinja_env(template_dir: &Path) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(path_loader(template_dir));
    env
}
