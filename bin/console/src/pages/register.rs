//! Registration page component.

use crate::state::ConsoleState;
use contable_core::InFlight;
use contable_platform_access::error::REGISTER_FAILED_MESSAGE;
use contable_platform_access::guard::LOGIN_PATH;
use contable_platform_access::role::KNOWN_ROLES;
use contable_platform_access::{FieldErrors, RegisterForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use std::time::Duration;

/// Message shown once the account exists.
pub const REGISTERED_MESSAGE: &str = "Usuario creado. Ya puedes iniciar sesión.";

/// Delay between the success message and the redirect to login.
const REDIRECT_DELAY: Duration = Duration::from_millis(800);

/// Account creation page.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let navigate = use_navigate();

    let (form, set_form) = signal(RegisterForm::default());
    let (field_errors, set_field_errors) = signal(FieldErrors::default());
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<&'static str>::None);
    let (loading, set_loading) = signal(false);
    let (done, set_done) = signal(false);
    let gate = InFlight::new();

    Effect::new(move || {
        if done.get() {
            navigate(LOGIN_PATH, Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_success.set(None);

        let request = match form.with_untracked(RegisterForm::validate) {
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
        spawn_local(async move {
            let _guard = guard;
            let outcome = match state.client().await {
                Ok(client) => state
                    .store
                    .register(&client, &request)
                    .await
                    .map_err(|e| e.user_message().to_string()),
                Err(_) => Err(REGISTER_FAILED_MESSAGE.to_string()),
            };

            match outcome {
                Ok(_) => {
                    set_success.set(Some(REGISTERED_MESSAGE));
                    set_timeout(move || set_done.set(true), REDIRECT_DELAY);
                }
                Err(message) => {
                    set_error.set(Some(message));
                    set_loading.set(false);
                }
            }
        });
    };

    let field_error = move |name: &'static str| {
        move || {
            field_errors
                .with(|e| e.for_field(name))
                .map(|msg| view! { <span class="field-error">{msg}</span> })
        }
    };

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Crear cuenta"</h1>

                {move || error.get().map(|msg| view! {
                    <div class="error-banner">
                        <span>{msg}</span>
                        <button class="dismiss" on:click=move |_| set_error.set(None)>"×"</button>
                    </div>
                })}
                {move || success.get().map(|msg| view! { <div class="success-banner">{msg}</div> })}

                <form on:submit=on_submit novalidate>
                    <div class="form-row">
                        <label for="nombreUsuario">"Nombre de usuario"</label>
                        <input
                            id="nombreUsuario"
                            type="text"
                            prop:value=move || form.with(|f| f.nombre_usuario.clone())
                            on:input=move |ev| {
                                set_form.update(|f| f.nombre_usuario = event_target_value(&ev))
                            }
                        />
                        {field_error("nombreUsuario")}
                    </div>

                    <div class="form-row">
                        <label for="email">"Correo"</label>
                        <input
                            id="email"
                            type="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| set_form.update(|f| f.email = event_target_value(&ev))
                        />
                        {field_error("email")}
                    </div>

                    <div class="form-row">
                        <label for="password">"Contraseña"</label>
                        <input
                            id="password"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| set_form.update(|f| f.password = event_target_value(&ev))
                        />
                        {field_error("password")}
                    </div>

                    <div class="form-row">
                        <label for="rol">"Rol"</label>
                        <select
                            id="rol"
                            prop:value=move || form.with(|f| f.role.clone())
                            on:change=move |ev| set_form.update(|f| f.role = event_target_value(&ev))
                        >
                            {KNOWN_ROLES
                                .iter()
                                .map(|role| view! { <option value=*role>{*role}</option> })
                                .collect_view()}
                        </select>
                        {field_error("rol")}
                    </div>

                    <button type="submit" class="login-button" disabled=move || loading.get()>
                        {move || if loading.get() { "Registrando..." } else { "Registrarse" }}
                    </button>
                </form>

                <p class="form-footer">
                    "¿Ya tienes cuenta? "
                    <A href=LOGIN_PATH>"Inicia sesión"</A>
                </p>
            </div>
        </div>
    }
}
