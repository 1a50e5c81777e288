//! Main Leptos application component and routing.

use crate::pages::{DashboardPage, LoginPage, NotFoundPage, RegisterPage};
use crate::state::ConsoleState;
use crate::storage::platform_storage;
use crate::theme::Theme;
use contable_platform_access::guard::LOGIN_PATH;
use contable_platform_access::{
    GuardDecision, NAV_LINKS, Role, check_access, requested_url, rule_for, visible_links,
};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    NavigateOptions,
    components::{A, Redirect, Route, Router, Routes},
    hooks::{use_location, use_navigate},
    path,
};

/// Application name shown in the header and title.
pub const APP_NAME: &str = "Sistema Contable";

/// Server function returning the backend base URL.
#[server]
pub async fn api_settings() -> Result<String, ServerFnError> {
    use crate::config::ApiSettings;
    use crate::error::SettingsError;
    use axum::Extension;

    let Extension(settings): Extension<ApiSettings> =
        leptos_axum::extract().await.map_err(|e| {
            tracing::error!(error = %e, "API settings extension missing");
            SettingsError::Unavailable {
                details: e.to_string(),
            }
            .into_server_error()
        })?;

    Ok(settings.base_url)
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let state = ConsoleState::new(platform_storage());
    provide_context(state.clone());

    // Browser-only start-up: effects never run during server rendering.
    Effect::new(move || {
        state.restore();
        state.mirror();
        Theme::load(state.storage.as_ref()).apply();
    });

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=|| view! { <Redirect path=LOGIN_PATH/> }/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route
                        path=path!("/dashboard")
                        view=|| view! { <Protected path="/dashboard"><DashboardPage/></Protected> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Renders `children` only when the session may see `path`.
///
/// Nothing is decided until the persisted session has been restored.
#[component]
fn Protected(path: &'static str, children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        if !state.restored.get() {
            return None;
        }
        state.session.track();
        let required = rule_for(path).and_then(|rule| rule.roles);
        let requested = requested_url(&location.pathname.get(), &location.search.get());
        Some(check_access(&state.store.snapshot(), required, &requested))
    });

    Effect::new(move || {
        if let Some(target) = decision.get().and_then(|d| d.redirect_target()) {
            tracing::debug!(path, target = %target, "navigation denied");
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || {
        decision
            .get()
            .filter(GuardDecision::is_allowed)
            .map(|_| children())
    }
}

/// Header with role-filtered navigation and the user menu.
#[component]
fn Header() -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let location = use_location();
    let navigate = use_navigate();

    let (mobile_open, set_mobile_open) = signal(false);
    let (theme, set_theme) = signal(Theme::default());
    let (redirect_to, set_redirect_to) = signal(Option::<String>::None);

    let storage = state.storage.clone();
    Effect::new(move || set_theme.set(Theme::load(storage.as_ref())));

    // Close the mobile menu on every navigation.
    Effect::new(move || {
        location.pathname.track();
        set_mobile_open.set(false);
    });

    Effect::new(move || {
        if let Some(target) = redirect_to.get() {
            navigate(&target, NavigateOptions::default());
        }
    });

    let session = state.session;
    let links = move || {
        let session = session.get();
        visible_links(NAV_LINKS, session.is_authenticated(), session.role())
            .into_iter()
            .copied()
            .collect::<Vec<_>>()
    };

    let toggle_theme = {
        let storage = state.storage.clone();
        move |_: leptos::ev::MouseEvent| {
            let next = theme.get_untracked().toggled();
            next.save(storage.as_ref());
            next.apply();
            set_theme.set(next);
        }
    };

    let logout = {
        let state = state.clone();
        move |_: leptos::ev::MouseEvent| {
            set_mobile_open.set(false);
            state
                .store
                .logout(&|path: &str| set_redirect_to.set(Some(path.to_string())));
            state.session.set(state.store.snapshot());
        }
    };

    view! {
        <Show when=move || session.with(|s| s.is_authenticated())>
            <header class="header">
                <div class="header-left">
                    <A href="/dashboard" attr:class="logo">{APP_NAME}</A>
                    <button
                        class="menu-toggle"
                        aria-label="Menú"
                        on:click=move |_| set_mobile_open.update(|open| *open = !*open)
                    >
                        "☰"
                    </button>
                </div>
                <nav class="nav" class:open=move || mobile_open.get()>
                    <For each=links key=|link| link.path let:link>
                        <A href=link.path exact=link.exact>{link.label}</A>
                    </For>
                </nav>
                <div class="header-right">
                    <button class="theme-toggle" on:click=toggle_theme.clone()>
                        {move || if theme.get() == Theme::Dark { "☀️" } else { "🌙" }}
                    </button>
                    <div class="user-menu">
                        <span
                            class="avatar"
                            style:background-color=move || {
                                session.with(|s| {
                                    s.role()
                                        .map_or(Role::fallback().accent_color(), Role::accent_color)
                                })
                            }
                        >
                            {move || session.with(|s| s.initials())}
                        </span>
                        <span class="user-name">
                            {move || session.with(|s| s.display_name().to_string())}
                        </span>
                        <button class="logout-button" on:click=logout.clone()>
                            "Cerrar sesión"
                        </button>
                    </div>
                </div>
            </header>
        </Show>
    }
}
