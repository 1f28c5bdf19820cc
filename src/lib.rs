mod app;
pub mod components;
pub mod effect;
pub mod environment;
mod helper;
pub mod store;
pub mod view_model;

pub use app::run;
pub use environment::{AppConfig, Environment};
pub use store::{Action, AppState, Store};

/// Handy macro for future localization
#[macro_export]
macro_rules! loc {
    ($x:expr $(,)?) => {
        $x
    };
}
