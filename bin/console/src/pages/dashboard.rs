//! Dashboard page component.

use crate::state::ConsoleState;
use chrono::{Datelike, NaiveDate};
use contable_api::{DASHBOARD_FAILED_MESSAGE, DashboardView, format_quetzales};
use contable_platform_access::role::ADMINISTRADOR;
use leptos::prelude::*;
use leptos_router::components::A;

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date, e.g. `viernes, 16 de octubre de 2026`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!("{weekday}, {} de {month} de {}", date.day(), date.year())
}

/// Loads the metrics and builds the view for the stored role.
async fn load_dashboard(state: ConsoleState) -> Result<DashboardView, String> {
    let client = state
        .client()
        .await
        .map_err(|_| DASHBOARD_FAILED_MESSAGE.to_string())?;

    let role = state
        .store
        .role()
        .map_or_else(|| ADMINISTRADOR.to_string(), |r| r.as_str().to_string());

    match client.dashboard_metrics().await {
        Ok(metrics) => Ok(DashboardView::for_role(&role, &metrics)),
        Err(e) => {
            tracing::warn!(error = %e, role = %role, "failed to load dashboard");
            if e.is_unauthorized() {
                state.expire();
            }
            Err(e.user_message(DASHBOARD_FAILED_MESSAGE))
        }
    }
}

/// Landing page for signed-in users.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<ConsoleState>();
    let dashboard = LocalResource::new(move || load_dashboard(state.clone()));
    let (dismissed, set_dismissed) = signal(false);
    let today = long_date(chrono::Local::now().date_naive());

    view! {
        <div class="dashboard-page">
            <div class="dashboard-heading">
                <h1>"Dashboard"</h1>
                <p class="dashboard-date">{today}</p>
            </div>
            <Suspense fallback=move || view! { <p>"Cargando dashboard..."</p> }>
                {move || {
                    dashboard.get().map(|result| match result {
                        Ok(data) => view! { <DashboardContent data/> }.into_any(),
                        Err(msg) => view! {
                            <Show when=move || !dismissed.get()>
                                <div class="error-banner">
                                    <span>{msg.clone()}</span>
                                    <button class="dismiss" on:click=move |_| set_dismissed.set(true)>
                                        "×"
                                    </button>
                                </div>
                            </Show>
                        }
                        .into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn DashboardContent(data: DashboardView) -> impl IntoView {
    let DashboardView {
        role,
        kpis,
        cards,
        alerts,
        recent_entries,
    } = data;

    view! {
        <p class="dashboard-role">"Rol: " {role}</p>

        <div class="alerts">
            {alerts
                .into_iter()
                .map(|alert| {
                    view! {
                        <div class=format!("alert alert-{}", alert.level.as_str())>{alert.text}</div>
                    }
                })
                .collect_view()}
        </div>

        <div class="kpis">
            {kpis
                .into_iter()
                .map(|kpi| {
                    view! {
                        <div class="kpi">
                            <span class="kpi-title">{kpi.title}</span>
                            <span class="kpi-value">{kpi.value}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>

        <div class="cards">
            {cards
                .into_iter()
                .map(|card| {
                    view! {
                        <A href=card.path attr:class="card">
                            <span class="card-icon">{card.icon}</span>
                            <span class="card-label">{card.label}</span>
                            <span class="card-description">{card.description}</span>
                        </A>
                    }
                })
                .collect_view()}
        </div>

        <section class="recent-entries">
            <h2>"Últimos asientos"</h2>
            {if recent_entries.is_empty() {
                view! { <p>"No hay asientos registrados."</p> }.into_any()
            } else {
                view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Fecha"</th>
                                <th>"Descripción"</th>
                                <th>"Débito"</th>
                                <th>"Crédito"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {recent_entries
                                .into_iter()
                                .map(|entry| {
                                    view! {
                                        <tr>
                                            <td>{entry.id}</td>
                                            <td>{entry.fecha.unwrap_or_else(|| "-".to_string())}</td>
                                            <td>{entry.descripcion}</td>
                                            <td>{format_quetzales(entry.debito)}</td>
                                            <td>{format_quetzales(entry.credito)}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_date_in_spanish() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
        assert_eq!(long_date(date), "viernes, 16 de octubre de 2026");

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        assert_eq!(long_date(date), "lunes, 1 de enero de 2024");
    }
}
