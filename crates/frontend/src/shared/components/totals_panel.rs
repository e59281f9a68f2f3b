use contracts::shared::pricing::{round2, DocumentTotals};
use leptos::prelude::*;

use crate::shared::format::{format_money, format_percent};

/// Subtotal / discount / IVA / total block under a document's lines.
/// With `amount_paid` it also shows what was paid and the balance.
#[component]
pub fn TotalsPanel(
    #[prop(into)] totals: Signal<DocumentTotals>,
    iva_rate: f64,
    #[prop(optional)] amount_paid: Option<Signal<f64>>,
) -> impl IntoView {
    let row = |label: String, value: Signal<String>, modifier: &'static str| {
        view! {
            <div class=format!("totals-panel__row {}", modifier)>
                <span class="totals-panel__label">{label}</span>
                <span class="totals-panel__value">{value}</span>
            </div>
        }
    };

    view! {
        <div class="totals-panel">
            {row("Subtotal".into(), Signal::derive(move || format_money(totals.get().subtotal)), "")}
            {row("Descuento".into(), Signal::derive(move || format!("-{}", format_money(totals.get().discount))), "")}
            {row(format!("IVA ({})", format_percent(iva_rate * 100.0)), Signal::derive(move || format_money(totals.get().iva)), "")}
            {row("Total".into(), Signal::derive(move || format_money(totals.get().total)), "totals-panel__row--total")}
            {move || amount_paid.map(|paid| {
                let paid = paid.get();
                let balance = round2((totals.get().total - paid).max(0.0));
                view! {
                    <div class="totals-panel__row">
                        <span class="totals-panel__label">"Pagado"</span>
                        <span class="totals-panel__value">{format_money(paid)}</span>
                    </div>
                    <div class="totals-panel__row totals-panel__row--balance">
                        <span class="totals-panel__label">"Saldo"</span>
                        <span class="totals-panel__value">{format_money(balance)}</span>
                    </div>
                }
            })}
        </div>
    }
}
