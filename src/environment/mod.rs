pub mod config;
pub mod error;
pub mod model;
pub mod notifications;
pub mod repository;
pub mod router;
pub mod types;

pub use config::AppConfig;
pub use error::ApiError;
pub use model::Model;
pub use notifications::{Notifications, Toast, ToastKind};
pub use repository::Repository;
pub use router::Router;

/// Everything the reducers may touch besides their own state
#[derive(Clone)]
pub struct Environment {
    pub model: Model,
    pub repository: Repository,
    pub router: Router,
    pub notifications: Notifications,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish()
    }
}

impl Environment {
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let repository = match config.token_directory.clone() {
            Some(directory) => Repository::with_directory(Some(directory)),
            None => Repository::new(),
        };
        Self::with_repository(config, repository)
    }

    pub fn with_repository(config: AppConfig, repository: Repository) -> Result<Self, String> {
        let router = Router::default();
        let model = Model::new(config, repository.clone(), router.clone())?;
        Ok(Self {
            model,
            repository,
            router,
            notifications: Notifications::default(),
        })
    }
}
