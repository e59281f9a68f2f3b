use contracts::domain::a010_customer::aggregate::Customer;
use contracts::domain::a016_sale::aggregate::{Sale, SaleStatus};
use contracts::domain::a017_payment::aggregate::Payment;
use contracts::shared::error::ApiError;

use crate::domain::a016_sale::api::SaleService;
use crate::domain::a017_payment::api::PaymentService;

pub async fn fetch_by_id(service: &SaleService, id: i64) -> Result<Sale, ApiError> {
    service.get_by_id(id).await
}

/// Payments of the sale; none registered yet comes back as 404.
pub async fn fetch_payments(
    payments: &PaymentService,
    sale_id: i64,
) -> Result<Vec<Payment>, ApiError> {
    let mut items = payments.get_by_parent("sale", sale_id).await?;
    items.sort_by(|a, b| a.payment_date.cmp(&b.payment_date));
    Ok(items)
}

pub async fn save(service: &SaleService, sale: &Sale) -> Result<Sale, ApiError> {
    service.save(sale).await
}

/// Sale with paid amount, balance and status derived from `payments`.
pub fn with_payments(sale: &Sale, payments: &[Payment]) -> Sale {
    let mut synced = sale.clone();
    synced.apply_payments(payments);
    synced
}

/// Stores the sale again when its payments changed what it owes.
pub async fn sync_balance(
    service: &SaleService,
    sale: &Sale,
    payments: &[Payment],
) -> Result<Sale, ApiError> {
    let synced = with_payments(sale, payments);
    if synced.amount_paid == sale.amount_paid
        && synced.balance == sale.balance
        && synced.status == sale.status
    {
        return Ok(synced);
    }
    log::debug!(
        "sale {:?}: paid {} balance {} ({})",
        synced.id,
        synced.amount_paid,
        synced.balance,
        synced.status.as_str()
    );
    service.update(&synced).await
}

/// Checks a payment against the sale before posting it.
pub fn check_payment(sale: &Sale, payment: &Payment) -> Result<(), String> {
    if !sale.accepts_payments() {
        return Err("La venta no admite más pagos".into());
    }
    payment.validate_against_balance(sale.balance)
}

/// Posts the payment, then re-reads the payments and updates the sale.
pub async fn register_payment(
    service: &SaleService,
    payments: &PaymentService,
    sale: &Sale,
    payment: &Payment,
) -> Result<(Sale, Vec<Payment>), ApiError> {
    check_payment(sale, payment).map_err(ApiError::Validation)?;
    let created = payments.create(payment).await?;
    log::info!("payment {:?} of {} registered for sale {:?}", created.id, created.amount, sale.id);
    refresh(service, payments, sale).await
}

pub async fn delete_payment(
    service: &SaleService,
    payments: &PaymentService,
    sale: &Sale,
    payment_id: i64,
) -> Result<(Sale, Vec<Payment>), ApiError> {
    payments.delete(payment_id).await?;
    log::info!("payment {} of sale {:?} deleted", payment_id, sale.id);
    refresh(service, payments, sale).await
}

async fn refresh(
    service: &SaleService,
    payments: &PaymentService,
    sale: &Sale,
) -> Result<(Sale, Vec<Payment>), ApiError> {
    let sale_id = sale
        .id
        .ok_or_else(|| ApiError::Validation("La venta aún no ha sido guardada".into()))?;
    let items = fetch_payments(payments, sale_id).await?;
    let synced = sync_balance(service, sale, &items).await?;
    Ok((synced, items))
}

pub async fn cancel(service: &SaleService, sale: &Sale) -> Result<Sale, ApiError> {
    let cancelled = Sale {
        status: SaleStatus::Cancelled,
        ..sale.clone()
    };
    service.update(&cancelled).await
}

/// Due date when the customer buys on credit.
pub fn due_date_for(sale: &Sale, customer: Option<&Customer>) -> Option<String> {
    let customer = customer.filter(|c| c.has_credit())?;
    sale.due_date(u32::try_from(customer.credit_days).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::DocumentLine;

    fn sale() -> Sale {
        let order = contracts::domain::a015_order::aggregate::Order {
            id: Some(4),
            customer_id: Some(1),
            date: "2024-04-01".into(),
            items: vec![DocumentLine::for_product(1, "Laptop", 10_000.0)],
            ..Default::default()
        };
        Sale {
            id: Some(9),
            ..Sale::from_order(&order, 0.16)
        }
    }

    #[test]
    fn payments_drive_balance_and_status() {
        let sale = sale();
        assert_eq!(sale.balance, 11_600.0);

        let partial = with_payments(&sale, &[Payment::for_sale(9, "2024-04-02", 6_000.0)]);
        assert_eq!(partial.balance, 5_600.0);
        assert_eq!(partial.status, SaleStatus::PartiallyPaid);

        let paid = with_payments(
            &sale,
            &[
                Payment::for_sale(9, "2024-04-02", 6_000.0),
                Payment::for_sale(9, "2024-04-09", 5_600.0),
            ],
        );
        assert_eq!(paid.balance, 0.0);
        assert_eq!(paid.status, SaleStatus::Paid);
        assert!(!paid.accepts_payments());
    }

    #[test]
    fn overpayment_is_rejected() {
        let sale = sale();
        let payment = Payment::for_sale(9, "2024-04-02", 11_600.01);
        assert!(check_payment(&sale, &payment).is_err());

        let cancelled = Sale {
            status: SaleStatus::Cancelled,
            ..sale.clone()
        };
        let exact = Payment::for_sale(9, "2024-04-02", 11_600.0);
        assert!(check_payment(&sale, &exact).is_ok());
        assert_eq!(
            check_payment(&cancelled, &exact).unwrap_err(),
            "La venta no admite más pagos"
        );
    }

    #[test]
    fn due_date_only_with_credit() {
        let sale = sale();
        let mut customer = Customer {
            credit_limit: 50_000.0,
            credit_days: 30,
            ..Default::default()
        };
        assert_eq!(due_date_for(&sale, Some(&customer)).as_deref(), Some("2024-05-01"));

        customer.credit_limit = 0.0;
        assert_eq!(due_date_for(&sale, Some(&customer)), None);
        assert_eq!(due_date_for(&sale, None), None);
    }
}
