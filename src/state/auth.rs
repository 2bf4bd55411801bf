use crate::api::{ApiClient, ApiError, LoginInput, RegisterInput, User};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());
    set_auth_state.update(|state| state.loading = true);

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let set_auth_for_restore = set_auth_state;
    spawn_local(async move {
        match restore_session(&api_client).await {
            Some(user) => set_auth_for_restore.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            }),
            None => set_auth_for_restore.update(|state| {
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            }),
        }
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Re-establishes a session from a persisted credential. A credential that
/// is absent, expired, or rejected by the identity operation is cleared;
/// there is no retry.
pub async fn restore_session(api_client: &ApiClient) -> Option<User> {
    let session = api_client.session();
    if !session.is_valid() {
        session.clear_credential();
        return None;
    }
    match api_client.me().await {
        Ok(user) => Some(user),
        Err(error) => {
            log::warn!("Failed to refresh user: {}", error);
            session.clear_credential();
            None
        }
    }
}

pub async fn login_request(
    input: LoginInput,
    api_client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match api_client.login(input).await {
        Ok(payload) => {
            set_auth_state.update(|state| {
                state.user = Some(payload.user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn register_request(
    input: RegisterInput,
    api_client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match api_client.register(input).await {
        Ok(payload) => {
            set_auth_state.update(|state| {
                state.user = Some(payload.user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Purely client-side: drops the credential and resets auth state.
pub fn logout(api_client: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    api_client.session().clear_credential();
    set_auth_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });
}

pub fn use_login_action() -> Action<LoginInput, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |input: &LoginInput| {
        let payload = input.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_register_action() -> Action<RegisterInput, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |input: &RegisterInput| {
        let payload = input.clone();
        let api = api.clone();
        async move { register_request(payload, &api, set_auth).await }
    })
}
