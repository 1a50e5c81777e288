//! Not-found page component.

use leptos::prelude::*;
use leptos_router::components::A;

/// Shown for any route the console does not know.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Página no encontrada"</h1>
            <p>"La ruta solicitada no existe en el sistema."</p>
            <A href="/dashboard" attr:class="link-button">"Volver al dashboard"</A>
        </div>
    }
}
