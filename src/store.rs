use std::collections::VecDeque;

use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::components::data::{DataAction, DataReducer, DataState};
use crate::components::user::{UserAction, UserReducer, UserState};
use crate::components::Reducer;
use crate::effect::{BoxFuture, Effect};
use crate::environment::Environment;

#[derive(Debug, Clone)]
pub enum Action {
    Data(DataAction),
    User(UserAction),
}

impl From<DataAction> for Action {
    fn from(value: DataAction) -> Self {
        Action::Data(value)
    }
}

impl From<UserAction> for Action {
    fn from(value: UserAction) -> Self {
        Action::User(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub data: DataState,
    pub user: UserState,
}

/// Composes both slices. Cross slice consequences (favorites belong to
/// the signed in user) are expressed as follow-up actions here so that
/// neither reducer touches the other's state.
pub fn reduce(action: Action, state: &mut AppState, environment: &Environment) -> Effect<Action> {
    match action {
        Action::Data(action) => {
            DataReducer::reduce(action, &mut state.data, environment).map(Action::Data)
        }
        Action::User(action) => {
            let follow_up = follow_up(&action);
            let effect = UserReducer::reduce(action, &mut state.user, environment).map(Action::User);
            Effect::merge2(effect, follow_up)
        }
    }
}

fn follow_up(action: &UserAction) -> Effect<Action> {
    match action {
        UserAction::AuthChecked(Ok(_)) | UserAction::LoggedIn(Ok(_)) => {
            Effect::action(Action::Data(DataAction::FetchFavoriteOffers))
        }
        UserAction::LoggedOut(_) => Effect::action(Action::Data(DataAction::ClearFavorites)),
        _ => Effect::NONE,
    }
}

/// The one state container. Views read through `state` and the
/// selectors, and change it only by sending actions.
pub struct Store {
    state: AppState,
    environment: Environment,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.state).finish()
    }
}

impl Store {
    pub fn new(environment: Environment) -> Self {
        Self {
            state: AppState::default(),
            environment,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The actions every slice wants to run on startup
    pub fn initial_actions() -> Vec<Action> {
        [
            UserReducer::initial_action().map(Action::User),
            DataReducer::initial_action().map(Action::Data),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Reduce synchronously and hand the effect back to the caller
    pub fn send(&mut self, action: impl Into<Action>) -> Effect<Action> {
        reduce(action.into(), &mut self.state, &self.environment)
    }

    /// Reduce `action` and keep going until every effect it caused has
    /// resolved and was reduced in turn
    pub async fn dispatch(&mut self, action: impl Into<Action>) {
        self.dispatch_all(vec![action.into()]).await
    }

    /// Like `dispatch`, the requests of all actions are in flight at the
    /// same time. Their resolutions are reduced in the order they arrive,
    /// so the last response wins.
    pub async fn dispatch_all(&mut self, actions: Vec<Action>) {
        let mut queue: VecDeque<Action> = actions.into();
        let mut pending: FuturesUnordered<BoxFuture<Action>> = FuturesUnordered::new();
        loop {
            while let Some(action) = queue.pop_front() {
                let mut immediate = Vec::new();
                self.send(action).flatten(&mut immediate, &mut pending);
                queue.extend(immediate);
            }
            match pending.next().await {
                Some(resolved) => queue.push_back(resolved),
                None => break,
            }
        }
    }

    /// Check the session and load the offers
    pub async fn bootstrap(&mut self) {
        self.dispatch_all(Self::initial_actions()).await
    }
}
