use chrono::Days;
use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::latency::LatencyProfile;
use crate::models::{Bill, BillItem, BillStatus, BillUpdate, NewBill, TAX_RATE};
use crate::store::Store;

/// Days until a freshly created bill falls due.
const PAYMENT_TERM_DAYS: u64 = 30;

pub struct BillService {
    store: Store<Bill>,
    latency: LatencyProfile,
    clock: Clock,
}

impl BillService {
    pub fn new(store: Store<Bill>, latency: LatencyProfile, clock: Clock) -> Self {
        Self {
            store,
            latency,
            clock,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Bill>> {
        self.latency.list.wait().await;
        Ok(self.store.all().await)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Bill> {
        self.latency.fetch.wait().await;
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewBill) -> Result<Bill> {
        self.latency.create.wait().await;
        let today = self.clock.today();
        let subtotal = items_subtotal(&new.items);
        let tax = subtotal * TAX_RATE;
        let bill = self
            .store
            .insert(|id| Bill {
                id,
                patient_id: new.patient_id,
                patient_name: new.patient_name,
                items: new.items,
                subtotal,
                tax,
                total: subtotal + tax,
                status: BillStatus::Pending,
                created_at: today,
                due_date: today + Days::new(PAYMENT_TERM_DAYS),
                paid_at: None,
            })
            .await;
        debug!(id = bill.id, total = bill.total, "bill created");
        Ok(bill)
    }

    /// Shallow merge. Replacing `items` recomputes subtotal, tax and total;
    /// nothing else touches the derived fields.
    pub async fn update(&self, id: u32, update: BillUpdate) -> Result<Bill> {
        self.latency.update.wait().await;
        self.store
            .modify(id, |bill| {
                if let Some(patient_id) = update.patient_id {
                    bill.patient_id = patient_id;
                }
                if let Some(patient_name) = update.patient_name {
                    bill.patient_name = patient_name;
                }
                if let Some(items) = update.items {
                    let subtotal = items_subtotal(&items);
                    bill.items = items;
                    bill.subtotal = subtotal;
                    bill.tax = subtotal * TAX_RATE;
                    bill.total = subtotal + bill.tax;
                }
                if let Some(status) = update.status {
                    bill.status = status;
                }
                if let Some(due_date) = update.due_date {
                    bill.due_date = due_date;
                }
                if let Some(paid_at) = update.paid_at {
                    bill.paid_at = Some(paid_at);
                }
            })
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<Bill> {
        self.latency.delete.wait().await;
        let bill = self.store.remove(id).await?;
        debug!(id, "bill deleted");
        Ok(bill)
    }

    pub async fn get_by_patient(&self, patient_id: u32) -> Result<Vec<Bill>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|b| b.patient_id == patient_id).await)
    }

    /// Set the lifecycle stage; moving to paid stamps `paidAt` with today.
    pub async fn update_status(&self, id: u32, status: BillStatus) -> Result<Bill> {
        let paid_at = (status == BillStatus::Paid).then(|| self.clock.today());
        self.update(
            id,
            BillUpdate {
                status: Some(status),
                paid_at,
                ..BillUpdate::default()
            },
        )
        .await
    }

    /// Pending bills whose due date has passed. A bill due today is not yet
    /// overdue.
    pub async fn get_overdue(&self) -> Result<Vec<Bill>> {
        self.latency.query.wait().await;
        let today = self.clock.today();
        Ok(self
            .store
            .matching(|b| b.status == BillStatus::Pending && b.due_date < today)
            .await)
    }
}

fn items_subtotal(items: &[BillItem]) -> f64 {
    items.iter().map(|item| item.total).sum()
}
