//! Login page component.

use crate::state::ConsoleState;
use contable_core::InFlight;
use contable_platform_access::error::LOGIN_FAILED_MESSAGE;
use contable_platform_access::guard::RETURN_PARAM;
use contable_platform_access::{FieldErrors, LoginForm, post_login_target};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

/// Login page: email/password form posting to the backend.
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let query = use_query_map();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (field_errors, set_field_errors) = signal(FieldErrors::default());
    let (error, set_error) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);
    let (redirect_to, set_redirect_to) = signal(Option::<String>::None);
    let gate = InFlight::new();

    Effect::new(move || {
        if let Some(target) = redirect_to.get() {
            navigate(&target, Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => {
                set_field_errors.set(errors);
                set_error.set(Some(FieldErrors::SUMMARY.to_string()));
                return;
            }
        };
        set_field_errors.set(FieldErrors::default());

        let Some(guard) = gate.try_begin() else {
            return;
        };
        set_loading.set(true);

        let state = state.clone();
        let return_to = query.with_untracked(|q| q.get(RETURN_PARAM));
        spawn_local(async move {
            let _guard = guard;
            let outcome = match state.client().await {
                Ok(client) => state
                    .store
                    .login(&client, &request)
                    .await
                    .map_err(|e| e.user_message().to_string()),
                Err(_) => Err(LOGIN_FAILED_MESSAGE.to_string()),
            };

            match outcome {
                Ok(_) => {
                    state.session.set(state.store.snapshot());
                    let target = post_login_target(return_to.as_deref()).to_string();
                    set_redirect_to.set(Some(target));
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Iniciar sesión"</h1>
                <p>"Ingresa tus credenciales para acceder al sistema contable."</p>

                {move || error.get().map(|msg| view! {
                    <div class="error-banner">
                        <span>{msg}</span>
                        <button class="dismiss" on:click=move |_| set_error.set(None)>"×"</button>
                    </div>
                })}

                <form on:submit=on_submit novalidate>
                    <div class="form-row">
                        <label for="email">"Correo"</label>
                        <input
                            id="email"
                            type="email"
                            autocomplete="username"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        {move || {
                            field_errors
                                .with(|e| e.for_field("email"))
                                .map(|msg| view! { <span class="field-error">{msg}</span> })
                        }}
                    </div>

                    <div class="form-row">
                        <label for="password">"Contraseña"</label>
                        <div class="password-input">
                            <input
                                id="password"
                                type=move || if show_password.get() { "text" } else { "password" }
                                autocomplete="current-password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                            <button
                                type="button"
                                class="toggle-password"
                                on:click=move |_| set_show_password.update(|show| *show = !*show)
                            >
                                {move || if show_password.get() { "Ocultar" } else { "Mostrar" }}
                            </button>
                        </div>
                        {move || {
                            field_errors
                                .with(|e| e.for_field("password"))
                                .map(|msg| view! { <span class="field-error">{msg}</span> })
                        }}
                    </div>

                    <button type="submit" class="login-button" disabled=move || loading.get()>
                        {move || if loading.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>

                <p class="form-footer">
                    "¿No tienes cuenta? "
                    <A href="/register">"Regístrate"</A>
                </p>
            </div>
        </div>
    }
}
