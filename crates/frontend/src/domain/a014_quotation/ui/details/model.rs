use contracts::domain::a014_quotation::aggregate::{Quotation, QuotationStatus};
use contracts::domain::a015_order::aggregate::Order;
use contracts::shared::error::ApiError;

use crate::domain::a014_quotation::api::QuotationService;
use crate::domain::a015_order::api::OrderService;

pub async fn fetch_by_id(service: &QuotationService, id: i64) -> Result<Quotation, ApiError> {
    service.get_by_id(id).await
}

pub async fn save(
    service: &QuotationService,
    quotation: &Quotation,
) -> Result<Quotation, ApiError> {
    service.save(quotation).await
}

/// Order built from the quotation, dated `today`.
pub fn order_for(quotation: &Quotation, iva_rate: f64, today: &str) -> Order {
    let mut order = Order::from_quotation(quotation, iva_rate);
    order.date = today.to_string();
    order
}

/// Live order already created from the quotation.
pub async fn fetch_linked_order(
    orders: &OrderService,
    quotation_id: i64,
) -> Result<Option<Order>, ApiError> {
    let all = orders.get_all().await?;
    Ok(Order::for_quotation(&all, quotation_id).cloned())
}

/// Creates the order, then marks the quotation as accepted.
/// An order left behind by an earlier attempt whose status update failed is
/// reused instead of creating a second one.
/// Returns the stored quotation and the order.
pub async fn convert_to_order(
    service: &QuotationService,
    orders: &OrderService,
    quotation: &Quotation,
    iva_rate: f64,
    today: &str,
) -> Result<(Quotation, Order), ApiError> {
    let existing = match quotation.id {
        Some(id) => fetch_linked_order(orders, id).await?,
        None => None,
    };
    let order = match existing {
        Some(order) => {
            log::warn!(
                "quotation {:?} already has order {:?}, reusing it",
                quotation.id,
                order.id
            );
            order
        }
        None => {
            let order = orders.create(&order_for(quotation, iva_rate, today)).await?;
            log::info!(
                "quotation {:?} converted into order {:?}",
                quotation.id,
                order.id
            );
            order
        }
    };

    let accepted = Quotation {
        status: QuotationStatus::Accepted,
        ..quotation.clone()
    };
    let accepted = service.update(&accepted).await?;
    Ok((accepted, order))
}
