use contracts::domain::a011_customer_delivery_address::aggregate::CustomerDeliveryAddress;
use contracts::domain::a015_order::aggregate::Order;
use contracts::domain::a016_sale::aggregate::Sale;
use contracts::domain::common::ErpEntity;
use contracts::shared::error::ApiError;

use crate::domain::a011_customer_delivery_address::api::CustomerDeliveryAddressService;
use crate::domain::a015_order::api::OrderService;
use crate::domain::a016_sale::api::SaleService;

pub async fn fetch_by_id(service: &OrderService, id: i64) -> Result<Order, ApiError> {
    service.get_by_id(id).await
}

pub async fn save(service: &OrderService, order: &Order) -> Result<Order, ApiError> {
    service.save(order).await
}

/// Active delivery addresses of the customer, default first.
pub async fn fetch_addresses(
    service: &CustomerDeliveryAddressService,
    customer_id: i64,
) -> Result<Vec<CustomerDeliveryAddress>, ApiError> {
    let mut addresses: Vec<_> = service
        .get_by_customer(customer_id)
        .await?
        .into_iter()
        .filter(|a| a.is_active)
        .collect();
    addresses.sort_by_key(|a| !a.is_default);
    Ok(addresses)
}

/// Address to preselect: the current one while it still belongs to the
/// customer, otherwise the default.
pub fn preselected_address(
    current: Option<i64>,
    addresses: &[CustomerDeliveryAddress],
) -> Option<i64> {
    current
        .filter(|id| addresses.iter().any(|a| a.id == Some(*id)))
        .or_else(|| addresses.iter().find(|a| a.is_default).and_then(|a| a.id))
}

/// Sale built from the order, dated `today`.
pub fn sale_for(order: &Order, iva_rate: f64, today: &str) -> Sale {
    let mut sale = Sale::from_order(order, iva_rate);
    sale.date = today.to_string();
    sale
}

/// Sales created from the order, cancelled ones included.
pub async fn fetch_order_sales(sales: &SaleService, order_id: i64) -> Result<Vec<Sale>, ApiError> {
    Ok(sales
        .get_all()
        .await?
        .into_iter()
        .filter(|s| s.order_id == Some(order_id))
        .collect())
}

/// Creates the sale unless the order already has a live one. The order
/// keeps its status.
pub async fn convert_to_sale(
    sales: &SaleService,
    order: &Order,
    iva_rate: f64,
    today: &str,
) -> Result<Sale, ApiError> {
    if let Some(order_id) = order.id {
        let existing = fetch_order_sales(sales, order_id).await?;
        if let Some(sale) = Sale::for_order(&existing, order_id) {
            return Err(ApiError::Validation(format!(
                "El pedido ya tiene la {}",
                sale.display_name().to_lowercase()
            )));
        }
    }
    let sale = sales.create(&sale_for(order, iva_rate, today)).await?;
    log::info!("order {:?} converted into sale {:?}", order.id, sale.id);
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: i64, is_default: bool) -> CustomerDeliveryAddress {
        CustomerDeliveryAddress {
            id: Some(id),
            is_default,
            ..CustomerDeliveryAddress::for_customer(1)
        }
    }

    #[test]
    fn default_address_is_preselected() {
        let addresses = vec![address(1, false), address(2, true)];
        assert_eq!(preselected_address(None, &addresses), Some(2));
        assert_eq!(preselected_address(Some(1), &addresses), Some(1));
        // Address of another customer.
        assert_eq!(preselected_address(Some(9), &addresses), Some(2));
        assert_eq!(preselected_address(None, &[address(3, false)]), None);
    }

    #[test]
    fn sale_starts_with_the_whole_balance() {
        let order = Order {
            id: Some(8),
            customer_id: Some(2),
            date: "2024-02-01".into(),
            items: vec![contracts::domain::common::DocumentLine::for_product(1, "Tubo PVC", 100.0)],
            ..Default::default()
        };
        let sale = sale_for(&order, 0.16, "2024-02-10");
        assert_eq!(sale.order_id, Some(8));
        assert_eq!(sale.date, "2024-02-10");
        assert_eq!(sale.total, 116.0);
        assert_eq!(sale.balance, 116.0);
        assert_eq!(sale.amount_paid, 0.0);
    }
}
