//! # Order Creation Workflow
//!
//! [`CreateOrderService::execute`] walks one request through
//!
//! ```text
//! ValidatingCustomer -> ValidatingCatalog -> AssemblingOrder
//!     -> PersistingOrder -> DecrementingStock -> Completed
//! ```
//!
//! and any state can end in `Failed`. Every transition is logged at debug
//! level inside the `create_order` span.
//!
//! Failures before `PersistingOrder` have no side effects. The order is
//! stored as pending, which readers never see. `DecrementingStock` commits
//! the stock and then confirms the order. If the stock cannot be committed
//! the pending order is deleted. If confirming fails, the stock is restored
//! and the order deleted. Either way a failed request leaves neither a
//! visible order nor a stock change behind.

use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::lifecycle::SystemConfig;
use crate::model::{Order, OrderCreate, OrderRequest, ProductId};
use crate::order_actor::OrderError;
use crate::services::{assemble, StockLedger};
use actor_framework::ActorClient;
use std::fmt::Display;
use tracing::{debug, error, info, instrument, warn};

/// Where an order creation request currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    ValidatingCustomer,
    ValidatingCatalog,
    AssemblingOrder,
    PersistingOrder,
    DecrementingStock,
    Completed,
    Failed(String),
}

impl WorkflowState {
    /// The state after this one succeeds. Terminal states have none.
    pub fn next(&self) -> Option<WorkflowState> {
        use WorkflowState::*;
        match self {
            ValidatingCustomer => Some(ValidatingCatalog),
            ValidatingCatalog => Some(AssemblingOrder),
            AssemblingOrder => Some(PersistingOrder),
            PersistingOrder => Some(DecrementingStock),
            DecrementingStock => Some(Completed),
            Completed | Failed(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowState::Failed(reason) => write!(f, "Failed({reason})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Tracks the state of one request and logs each transition.
struct Progress {
    state: WorkflowState,
}

impl Progress {
    fn start() -> Self {
        debug!(state = %WorkflowState::ValidatingCustomer, "Workflow started");
        Self {
            state: WorkflowState::ValidatingCustomer,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            debug!(from = %self.state, to = %next, "Transition");
            self.state = next;
        }
    }

    fn fail(&mut self, reason: &OrderError) {
        let failed = WorkflowState::Failed(reason.to_string());
        debug!(from = %self.state, to = %failed, "Transition");
        self.state = failed;
    }
}

/// Creates orders: validates the customer and the requested products, stores
/// the order and commits the stock.
///
/// All collaborators are injected, so tests can hand in clients backed by
/// [`MockClient`](actor_framework::mock::MockClient)s.
#[derive(Clone)]
pub struct CreateOrderService {
    customers: CustomerClient,
    products: ProductClient,
    orders: OrderClient,
    ledger: StockLedger,
}

impl CreateOrderService {
    pub fn new(
        customers: CustomerClient,
        products: ProductClient,
        orders: OrderClient,
        config: &SystemConfig,
    ) -> Self {
        let ledger = StockLedger::new(products.clone(), config.stock_update_attempts);
        Self {
            customers,
            products,
            orders,
            ledger,
        }
    }

    /// Runs the workflow for `request` and returns the confirmed order.
    #[instrument(
        name = "create_order",
        skip(self, request),
        fields(customer_id = %request.customer_id, lines = request.products.len())
    )]
    pub async fn execute(&self, request: OrderRequest) -> Result<Order, OrderError> {
        let mut progress = Progress::start();

        match self.run(&request, &mut progress).await {
            Ok(order) => {
                progress.advance();
                info!(
                    order_id = %order.id,
                    total = order.total().map(tracing::field::display),
                    "Order completed"
                );
                Ok(order)
            }
            Err(e) => {
                warn!(state = %progress.state, error = %e, "Order rejected");
                progress.fail(&e);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: &OrderRequest,
        progress: &mut Progress,
    ) -> Result<Order, OrderError> {
        let customer = self
            .customers
            .get(request.customer_id.clone())
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(request.customer_id.clone()))?;
        progress.advance();

        let ids: Vec<ProductId> = request.products.iter().map(|p| p.id.clone()).collect();
        let stored = self.products.find_all_by_id(ids).await?;
        progress.advance();

        let line_items = assemble(&request.products, &stored)?;
        progress.advance();

        let order = self
            .orders
            .create_order(OrderCreate {
                customer,
                products: line_items,
            })
            .await?;
        progress.advance();

        if let Err(e) = self.ledger.decrement(&request.products).await {
            self.roll_back(&order, &e).await?;
            return Err(e);
        }

        match self.orders.confirm_order(order.id.clone()).await {
            Ok(confirmed) => Ok(confirmed),
            Err(e) => {
                self.restore_stock(request, &order, &e).await?;
                self.roll_back(&order, &e).await?;
                Err(e)
            }
        }
    }

    /// Gives back the stock taken for an order that could not be confirmed.
    async fn restore_stock(
        &self,
        request: &OrderRequest,
        order: &Order,
        cause: &OrderError,
    ) -> Result<(), OrderError> {
        match self.ledger.restore(&request.products).await {
            Ok(_) => {
                info!(order_id = %order.id, cause = %cause, "Stock restored");
                Ok(())
            }
            Err(e) => {
                error!(
                    order_id = %order.id,
                    cause = %cause,
                    error = %e,
                    "Stock restore failed"
                );
                Err(OrderError::RollbackFailed {
                    order_id: order.id.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Removes a pending order whose stock could not be committed.
    async fn roll_back(&self, order: &Order, cause: &OrderError) -> Result<(), OrderError> {
        match self.orders.delete(order.id.clone()).await {
            Ok(()) => {
                info!(order_id = %order.id, cause = %cause, "Order rolled back");
                Ok(())
            }
            Err(e) => {
                error!(
                    order_id = %order.id,
                    cause = %cause,
                    error = %e,
                    "Rollback failed, pending order left behind"
                );
                Err(OrderError::RollbackFailed {
                    order_id: order.id.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_follow_the_happy_path() {
        let mut state = WorkflowState::ValidatingCustomer;
        let mut seen = vec![state.clone()];
        while let Some(next) = state.next() {
            seen.push(next.clone());
            state = next;
        }

        assert_eq!(
            seen,
            vec![
                WorkflowState::ValidatingCustomer,
                WorkflowState::ValidatingCatalog,
                WorkflowState::AssemblingOrder,
                WorkflowState::PersistingOrder,
                WorkflowState::DecrementingStock,
                WorkflowState::Completed,
            ]
        );
    }

    #[test]
    fn test_failed_is_terminal() {
        let failed = WorkflowState::Failed("Order contains no products".into());
        assert!(failed.is_terminal());
        assert!(!WorkflowState::PersistingOrder.is_terminal());
        assert_eq!(failed.to_string(), "Failed(Order contains no products)");
    }
}
