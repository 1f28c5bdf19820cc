use crate::effect::Effect;
use crate::environment::types::{AppRoute, AuthData, AuthorizationStatus, UserData};
use crate::environment::{ApiError, Environment};
use crate::loc;

pub const LOGIN_ERROR: &str = "Login failed. Please check your credentials.";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully";
pub const LOGOUT_ERROR: &str = "Logout failed. Please try again.";

#[derive(Debug, Clone)]
pub enum UserAction {
    CheckAuth,
    AuthChecked(Result<UserData, ApiError>),
    Login(AuthData),
    LoggedIn(Result<UserData, ApiError>),
    Logout,
    LoggedOut(Result<(), ApiError>),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserState {
    pub authorization_status: AuthorizationStatus,
    pub user_data: Option<UserData>,
}

impl UserState {
    fn authorize(&mut self, user: UserData) {
        self.authorization_status = AuthorizationStatus::Auth;
        self.user_data = Some(user);
    }

    fn deauthorize(&mut self) {
        self.authorization_status = AuthorizationStatus::NoAuth;
        self.user_data = None;
    }
}

pub fn reduce(
    action: UserAction,
    state: &mut UserState,
    environment: &Environment,
) -> Effect<UserAction> {
    log::trace!("{action:?}");
    let model = environment.model.clone();
    match action {
        UserAction::CheckAuth => Effect::future(
            async move { model.check_auth().await },
            UserAction::AuthChecked,
        ),
        UserAction::AuthChecked(result) => {
            match result {
                Ok(user) => state.authorize(user),
                // silent, an anonymous visitor is not an error
                Err(e) => {
                    log::debug!("Not authorized: {e}");
                    state.deauthorize();
                }
            }
            Effect::NONE
        }
        UserAction::Login(data) => Effect::future(
            async move { model.login(&data).await },
            UserAction::LoggedIn,
        ),
        UserAction::LoggedIn(result) => {
            match result {
                Ok(user) => {
                    environment.repository.save_token(&user.token);
                    state.authorize(user);
                    environment.router.navigate(AppRoute::Root);
                }
                Err(ApiError::Invalid(message)) => environment.notifications.error(message),
                Err(e) => {
                    log::debug!("Login failed: {e}");
                    if !e.is_unauthorized() {
                        environment.notifications.error(loc!(LOGIN_ERROR));
                    }
                }
            }
            Effect::NONE
        }
        UserAction::Logout => {
            Effect::future(async move { model.logout().await }, UserAction::LoggedOut)
        }
        UserAction::LoggedOut(result) => {
            // the session is gone locally, no matter what the server said
            environment.repository.drop_token();
            state.deauthorize();
            match result {
                Ok(_) => environment.notifications.info(loc!(LOGOUT_SUCCESS)),
                Err(e) if e.is_unauthorized() => log::debug!("Logout of an expired session"),
                Err(e) => {
                    log::error!("Logout failed: {e}");
                    environment.notifications.error(loc!(LOGOUT_ERROR));
                }
            }
            Effect::NONE
        }
    }
}
