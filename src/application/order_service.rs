use tracing::{debug, info, warn};

use crate::domain::{Order, OrderId};

use super::{DaoManager, ItemDao, OrderDao, ServiceError};

/// Validates orders and persists them as a single unit of work.
pub struct OrderService<D> {
    dao: D,
}

impl<D: DaoManager> OrderService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn into_inner(self) -> D {
        self.dao
    }

    /// Persist an order with all of its items, then commit and release the
    /// connection.
    ///
    /// Orders without items are rejected before the facade is touched. Once
    /// writing has started the connection is closed on every exit path; a
    /// write or commit failure takes precedence over a close failure.
    pub async fn save(&mut self, order: &Order) -> Result<OrderId, ServiceError> {
        if order.is_empty() {
            warn!(user = %order.user().full_name(), "Rejected order without items");
            return Err(ServiceError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }

        let written = self.write(order).await;
        let closed = self.dao.close_connection().await;

        match (written, closed) {
            (Ok(order_id), Ok(())) => {
                info!(order_id, items = order.items().len(), "Order saved");
                Ok(order_id)
            }
            (Ok(_), Err(close_err)) => Err(close_err.into()),
            (Err(err), Ok(())) => Err(err.into()),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "Failed to close connection after failed write");
                Err(err.into())
            }
        }
    }

    async fn write(&mut self, order: &Order) -> anyhow::Result<OrderId> {
        let order_id = self.dao.order_dao().insert(order).await?;
        debug!(order_id, "Inserted order");

        for item in order.items() {
            self.dao.item_dao().insert(item, order_id).await?;
        }

        self.dao.commit().await?;
        Ok(order_id)
    }
}
