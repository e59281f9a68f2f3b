use contracts::domain::a017_payment::aggregate::PaymentMethod;
use leptos::prelude::*;
use thaw::*;

use super::view_model::SaleDetailsVm;
use crate::shared::components::FormField;
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::icons::icon;

/// Payments registered for the sale and the capture row for a new one.
#[component]
pub fn PaymentsSection(vm: SaleDetailsVm) -> impl IntoView {
    let payments = vm.payments;
    let draft = vm.draft;
    let accepts_payments = vm.accepts_payments();
    let needs_reference = draft.needs_reference();
    let registering = vm.registering;
    let vm_register = vm.clone();

    view! {
        <div class="details-section payments-section">
            <h4 class="details-section__title">"Pagos"</h4>

            <Show when=move || accepts_payments.get()>
                <div class="details-grid--3col payments-section__form">
                    <FormField label="Fecha" required=true>
                        <Input value=draft.payment_date input_type=InputType::Date />
                    </FormField>
                    <FormField label="Monto" required=true>
                        <Input value=draft.amount input_type=InputType::Number placeholder="0.00" />
                    </FormField>
                    <FormField label="Forma de pago">
                        <Select value=draft.payment_method>
                            {PaymentMethod::ALL
                                .iter()
                                .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                                .collect_view()}
                        </Select>
                    </FormField>
                    <FormField label="Referencia">
                        <Input value=draft.reference placeholder="Folio bancario o número de cheque" />
                        <Show when=move || needs_reference.get()>
                            <span class="form__hint">"Obligatoria para transferencia y cheque"</span>
                        </Show>
                    </FormField>
                    <FormField label="Notas" wide=true>
                        <Input value=draft.notes placeholder="Opcional" />
                    </FormField>
                </div>
                <div class="details-actions">
                    {
                        let vm_register = vm_register.clone();
                        view! {
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| vm_register.register_payment()
                                disabled=registering
                            >
                                {icon("payments")}
                                " Registrar pago"
                            </Button>
                        }
                    }
                </div>
            </Show>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=100.0>"Fecha"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Forma de pago"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Referencia"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Monto"</TableHeaderCell>
                        <TableHeaderCell min_width=160.0>"Notas"</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || payments.get().into_iter().map(|payment| {
                        let vm_delete = vm.clone();
                        let for_delete = payment.clone();
                        view! {
                            <TableRow>
                                <TableCell>{format_date(&payment.payment_date)}</TableCell>
                                <TableCell>{payment.payment_method.label()}</TableCell>
                                <TableCell>{or_dash(payment.reference.as_deref())}</TableCell>
                                <TableCell class="text-right">{format_money(payment.amount)}</TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{or_dash(payment.notes.as_deref())}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        attr:title="Eliminar"
                                        disabled=registering
                                        on_click=move |_| vm_delete.delete_payment(&for_delete)
                                    >
                                        {icon("delete")}
                                    </Button>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <Show when=move || payments.with(|p| p.is_empty())>
                <div class="table__empty">"Sin pagos registrados"</div>
            </Show>
        </div>
    }
}
