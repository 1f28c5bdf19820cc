use super::UserState;
use crate::environment::types::{AuthorizationStatus, UserData};

pub fn authorization_status(state: &UserState) -> AuthorizationStatus {
    state.authorization_status
}

pub fn is_authorized(state: &UserState) -> bool {
    state.authorization_status.is_auth()
}

/// Only meaningful while authorized
pub fn user_data(state: &UserState) -> Option<&UserData> {
    if !is_authorized(state) {
        return None;
    }
    state.user_data.as_ref()
}
