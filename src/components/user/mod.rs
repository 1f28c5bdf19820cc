mod reducer;
pub mod selectors;

pub use reducer::{reduce, UserAction, UserState};

use super::Reducer;
use crate::effect::Effect;
use crate::environment::Environment;

pub struct UserReducer;

impl Reducer for UserReducer {
    type Action = UserAction;

    type State = UserState;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Environment,
    ) -> Effect<Self::Action> {
        reducer::reduce(action, state, environment)
    }

    fn initial_action() -> Option<Self::Action> {
        Some(UserAction::CheckAuth)
    }
}
