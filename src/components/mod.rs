pub mod data;
pub mod user;

use crate::effect::Effect;
use crate::environment::Environment;

/// A slice of the store: one state, one closed set of actions and a
/// synchronous function reducing the latter into the former.
pub trait Reducer {
    type Action: std::fmt::Debug + Send + 'static;

    type State: Default;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Environment,
    ) -> Effect<Self::Action>;

    fn initial_action() -> Option<Self::Action> {
        None
    }
}
