//! Dashboard metrics and their per-role presentation.

use crate::bearer::TokenSource;
use crate::client::ApiClient;
use crate::error::ApiError;
use contable_platform_access::role::{ADMINISTRADOR, CAJERO, CONTADOR};
use serde::{Deserialize, Serialize};

const METRICS_PATH: &str = "/dashboard/metrics";

/// Message shown when the dashboard cannot be loaded.
pub const DASHBOARD_FAILED_MESSAGE: &str = "No fue posible cargar el dashboard";

/// Inventory value below which administrators are warned.
pub const LOW_INVENTORY_THRESHOLD: f64 = 5000.0;

/// Raw answer of `GET /dashboard/metrics`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardMetrics {
    pub ventas_mes: Option<f64>,
    pub gastos_mes: Option<f64>,
    pub valor_inventario: Option<f64>,
    pub saldo_banco: Option<f64>,
    pub asientos_dia: Option<u64>,
    pub descuadre_dia: Option<f64>,
    pub ultimos_asientos: Option<Vec<RawEntry>>,
    pub cobros_hoy: Option<f64>,
    pub pagos_hoy: Option<f64>,
    pub top_por_cobrar: Option<Vec<PendingBalance>>,
    pub top_por_pagar: Option<Vec<PendingBalance>>,
}

/// Journal entry as the backend sends it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntry {
    pub transaccion_id: i64,
    pub fecha: Option<String>,
    pub descripcion: Option<String>,
    pub debito: Option<f64>,
    pub credito: Option<f64>,
}

/// Customer or supplier with an open balance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingBalance {
    pub nombre: String,
    pub saldo_pendiente: Option<f64>,
}

/// A headline figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
}

impl Kpi {
    fn currency(title: &str, amount: Option<f64>) -> Self {
        Self {
            title: title.to_string(),
            value: format_quetzales(amount.unwrap_or_default()),
        }
    }
}

/// Shortcut to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

const fn card(
    label: &'static str,
    path: &'static str,
    icon: &'static str,
    description: &'static str,
) -> Card {
    Card {
        label,
        path,
        icon,
        description,
    }
}

/// Every module card, in display order.
pub const MODULE_CARDS: &[Card] = &[
    card("Libro Diario", "/diario", "📖", "Registro cronológico de transacciones"),
    card("Libro Mayor", "/mayor", "📊", "Movimientos por cuenta contable"),
    card("Balances", "/balances", "⚖️", "Balance de saldos y estados financieros"),
    card("Bancos y Caja", "/bancos-caja", "🏦", "Control de efectivo y bancos"),
    card("Inventario", "/inventario", "📦", "Gestión de productos y stock"),
    card("Clientes", "/clientes", "👥", "Administración de clientes"),
    card("Proveedores", "/proveedores", "🏢", "Administración de proveedores"),
    card("Estado de resultados", "/estado-resultados", "📋", "Estado de resultados del periodo"),
];

const ACCOUNTANT_CARDS: &[&str] = &["/diario", "/mayor", "/balances", "/bancos-caja"];
const CASHIER_CARDS: &[&str] = &["/bancos-caja", "/clientes", "/proveedores", "/inventario"];

/// Severity of a dashboard alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
}

impl AlertLevel {
    /// CSS modifier for the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// A notice shown above the cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub text: String,
}

/// A journal entry ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentEntry {
    pub id: i64,
    pub fecha: Option<String>,
    pub descripcion: String,
    pub debito: f64,
    pub credito: f64,
}

impl From<&RawEntry> for RecentEntry {
    fn from(raw: &RawEntry) -> Self {
        Self {
            id: raw.transaccion_id,
            fecha: raw.fecha.clone(),
            descripcion: raw.descripcion.clone().unwrap_or_default(),
            debito: raw.debito.unwrap_or_default(),
            credito: raw.credito.unwrap_or_default(),
        }
    }
}

/// What the dashboard shows for one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub role: String,
    pub kpis: Vec<Kpi>,
    pub cards: Vec<Card>,
    pub alerts: Vec<Alert>,
    pub recent_entries: Vec<RecentEntry>,
}

impl DashboardView {
    /// Builds the presentation of `metrics` for `role`.
    ///
    /// Unknown roles get no cards and no KPIs; recent entries are always
    /// shown.
    #[must_use]
    pub fn for_role(role: &str, metrics: &DashboardMetrics) -> Self {
        let mut kpis = Vec::new();
        let mut alerts = Vec::new();

        let cards: Vec<Card> = match role {
            ADMINISTRADOR => {
                kpis.extend([
                    Kpi::currency("Ventas del mes", metrics.ventas_mes),
                    Kpi::currency("Gastos del mes", metrics.gastos_mes),
                    Kpi::currency("Valor Inventario", metrics.valor_inventario),
                    Kpi::currency("Saldo Banco", metrics.saldo_banco),
                ]);
                if metrics.valor_inventario.unwrap_or_default() < LOW_INVENTORY_THRESHOLD {
                    alerts.push(Alert {
                        level: AlertLevel::Info,
                        text: "El inventario está bajo. Considera realizar pedidos.".to_string(),
                    });
                }
                MODULE_CARDS.to_vec()
            }
            CONTADOR => {
                let descuadre = metrics.descuadre_dia.unwrap_or_default();
                kpis.extend([
                    Kpi {
                        title: "Asientos hoy".to_string(),
                        value: metrics.asientos_dia.unwrap_or_default().to_string(),
                    },
                    Kpi::currency("Descuadre hoy", Some(descuadre)),
                ]);
                if descuadre > 0.0 {
                    alerts.push(Alert {
                        level: AlertLevel::Warning,
                        text: format!(
                            "Hay descuadre de {} en el libro diario de hoy",
                            format_quetzales(descuadre)
                        ),
                    });
                }
                cards_for(ACCOUNTANT_CARDS)
            }
            CAJERO => {
                kpis.extend([
                    Kpi::currency("Cobros hoy", metrics.cobros_hoy),
                    Kpi::currency("Pagos hoy", metrics.pagos_hoy),
                ]);
                cards_for(CASHIER_CARDS)
            }
            _ => Vec::new(),
        };

        let recent_entries = metrics
            .ultimos_asientos
            .iter()
            .flatten()
            .map(RecentEntry::from)
            .collect();

        Self {
            role: role.to_string(),
            kpis,
            cards,
            alerts,
            recent_entries,
        }
    }
}

fn cards_for(paths: &[&str]) -> Vec<Card> {
    MODULE_CARDS
        .iter()
        .filter(|card| paths.contains(&card.path))
        .copied()
        .collect()
}

/// Formats an amount as quetzales: `Q 1,234.56`.
#[must_use]
pub fn format_quetzales(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("Q {sign}{grouped}.{:02}", cents % 100)
}

impl<T: TokenSource> ApiClient<T> {
    /// Fetches the dashboard metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.send_json(self.get(METRICS_PATH)).await
    }
}
