mod reducer;
pub mod selectors;

pub use reducer::{reduce, DataAction, DataState};

use super::Reducer;
use crate::effect::Effect;
use crate::environment::Environment;

pub struct DataReducer;

impl Reducer for DataReducer {
    type Action = DataAction;

    type State = DataState;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Environment,
    ) -> Effect<Self::Action> {
        reducer::reduce(action, state, environment)
    }

    fn initial_action() -> Option<Self::Action> {
        Some(DataAction::FetchOffers)
    }
}
