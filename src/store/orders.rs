use crate::domain::model::Order;
use crate::utils::error::Result;
use chrono::Utc;
use std::path::Path;

use super::JsonArrayFile;

pub struct OrderStore {
    file: JsonArrayFile,
}

impl OrderStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonArrayFile::new(data_dir.join("orders.json")),
        }
    }

    pub async fn append(&self, order: Order) -> Result<()> {
        self.file
            .update(|items: &mut Vec<Order>| items.push(order))
            .await
    }

    /// Records a paid order idempotently. The webhook and the
    /// client-initiated verification can both report the same payment; a
    /// record with the same non-empty payment reference replaces the
    /// existing entry (keeping its original creation time) instead of
    /// appending a duplicate.
    pub async fn upsert_by_reference(&self, mut order: Order) -> Result<Order> {
        self.file
            .update(|items: &mut Vec<Order>| {
                if !order.payment_ref.is_empty() {
                    if let Some(existing) =
                        items.iter_mut().find(|o| o.payment_ref == order.payment_ref)
                    {
                        order.created_at = existing.created_at;
                        order.updated_at = Some(Utc::now());
                        *existing = order.clone();
                        return order.clone();
                    }
                }
                items.push(order.clone());
                order.clone()
            })
            .await
    }

    pub async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>> {
        let items: Vec<Order> = self.file.snapshot().await?;
        Ok(items.into_iter().find(|o| o.order_id == order_id))
    }

    pub async fn all(&self) -> Result<Vec<Order>> {
        self.file.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{OrderStatus, OrderSubmission};
    use tempfile::TempDir;

    fn order(id: &str, payment_ref: &str) -> Order {
        let mut order = OrderSubmission {
            order_id: id.to_string(),
            payment_ref: payment_ref.to_string(),
            ..Default::default()
        }
        .into_order("send-order");
        order.status = OrderStatus::Paid;
        order
    }

    #[tokio::test]
    async fn append_and_find() {
        let dir = TempDir::new().unwrap();
        let store = OrderStore::new(dir.path());
        store.append(order("ORD-1", "")).await.unwrap();
        store.append(order("ORD-2", "")).await.unwrap();

        let found = store.find_by_id("ORD-2").await.unwrap();
        assert!(found.is_some());
        assert!(store.find_by_id("ORD-9").await.unwrap().is_none());
        assert_eq!(store.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn upsert_replaces_matching_reference() {
        let dir = TempDir::new().unwrap();
        let store = OrderStore::new(dir.path());

        let first = store.upsert_by_reference(order("ORD-1", "ref_abc")).await.unwrap();
        let mut second = order("ORD-1", "ref_abc");
        second.source = "verify-payment".to_string();
        let replaced = store.upsert_by_reference(second).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].source, "verify-payment");
        assert_eq!(replaced.created_at, first.created_at);
        assert!(replaced.updated_at.is_some());
    }

    #[tokio::test]
    async fn upsert_without_reference_appends() {
        let dir = TempDir::new().unwrap();
        let store = OrderStore::new(dir.path());
        store.upsert_by_reference(order("ORD-1", "")).await.unwrap();
        store.upsert_by_reference(order("ORD-2", "")).await.unwrap();
        assert_eq!(store.all().await.unwrap().len(), 2);
    }
}
