//! Mock payment gateway for development and tests.
//!
//! Hands out sequential order ids, remembers the orders it created, and
//! signs with a fixed secret, so tests can produce valid checkout
//! signatures through [`MockPaymentGateway::sign`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CreateOrderRequest, GatewayOrder, PaymentError, PaymentErrorCode, PaymentGateway,
};

use super::signature::{payment_signature, signature_matches};

/// Secret the mock signs with.
pub const MOCK_KEY_SECRET: &str = "mock_secret";

/// Mock payment gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// let order = gateway.create_order(request).await?;
/// let signature = gateway.sign(&order.id, "pay_1");
/// gateway.verify_signature(&order.id, "pay_1", &signature)?;
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    orders: Vec<CreateOrderRequest>,
    created: Vec<GatewayOrder>,
    next_error: Option<PaymentError>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Valid checkout signature for an order/payment pair.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        payment_signature(MOCK_KEY_SECRET, order_id, payment_id).unwrap_or_default()
    }

    /// Fail the next `create_order` call.
    pub fn fail_next(&self, error: PaymentError) {
        if let Ok(mut state) = self.inner.lock() {
            state.next_error = Some(error);
        }
    }

    /// Requests received so far.
    pub fn orders(&self) -> Vec<CreateOrderRequest> {
        self.inner
            .lock()
            .map(|state| state.orders.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, PaymentError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| PaymentError::provider("mock gateway state poisoned"))?;

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.orders.push(request.clone());
        let order = GatewayOrder {
            id: format!("order_mock_{}", state.orders.len()),
            amount: request.amount,
            currency: request.currency,
            receipt: request.receipt,
            notes: request.notes,
        };
        state.created.push(order.clone());
        Ok(order)
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| PaymentError::provider("mock gateway state poisoned"))?;

        state
            .created
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
            .ok_or_else(|| {
                PaymentError::new(
                    PaymentErrorCode::InvalidRequest,
                    format!("order {} does not exist", order_id),
                )
            })
    }

    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentError> {
        if signature_matches(MOCK_KEY_SECRET, order_id, payment_id, signature) {
            Ok(())
        } else {
            Err(PaymentError::invalid_signature())
        }
    }

    fn key_id(&self) -> &str {
        "rzp_mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn request(amount: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            amount,
            currency: "INR".to_string(),
            receipt: "receipt_1".to_string(),
            notes: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn creates_sequential_orders() {
        let gateway = MockPaymentGateway::new();
        let first = gateway.create_order(request(1200)).await.unwrap();
        let second = gateway.create_order(request(2400)).await.unwrap();

        assert_eq!(first.id, "order_mock_1");
        assert_eq!(second.id, "order_mock_2");
        assert_eq!(second.amount, 2400);
        assert_eq!(gateway.orders().len(), 2);
    }

    #[tokio::test]
    async fn injected_error_fails_once() {
        let gateway = MockPaymentGateway::new();
        gateway.fail_next(PaymentError::network("down"));

        let err = gateway.create_order(request(1200)).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::NetworkError);
        assert!(gateway.create_order(request(1200)).await.is_ok());
    }

    #[tokio::test]
    async fn created_orders_can_be_fetched() {
        let gateway = MockPaymentGateway::new();
        let mut req = request(2400);
        req.notes.insert("periods".to_string(), "23,24".to_string());
        let created = gateway.create_order(req).await.unwrap();

        let fetched = gateway.fetch_order(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.notes["periods"], "23,24");

        let err = gateway.fetch_order("order_unknown").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
    }

    #[test]
    fn own_signatures_verify() {
        let gateway = MockPaymentGateway::new();
        let sig = gateway.sign("order_mock_1", "pay_1");
        assert!(gateway.verify_signature("order_mock_1", "pay_1", &sig).is_ok());
        assert!(gateway.verify_signature("order_mock_1", "pay_2", &sig).is_err());
    }
}
