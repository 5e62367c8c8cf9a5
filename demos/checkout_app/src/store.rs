// stepline_project/demos/checkout_app/src/store.rs

//! In-memory persistence for the demo, usable as a transactional resource.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use stepline::TransactionProvider;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::order::Order;
use crate::models::payment::{ChargeStatus, MockCharge};
use crate::models::product::Product;
use crate::models::user::User;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Store is unavailable")]
  Unavailable,

  #[error("Unknown product '{0}'")]
  UnknownProduct(String),

  #[error("Insufficient stock for '{sku}': requested {requested}, available {available}")]
  InsufficientStock { sku: String, requested: i64, available: i64 },

  #[error("Unknown charge '{0}'")]
  UnknownCharge(String),
}

#[derive(Debug, Clone, Default)]
struct StoreData {
  users: HashMap<String, User>,
  products: HashMap<String, Product>,
  orders: Vec<Order>,
  charges: HashMap<String, MockCharge>,
}

#[derive(Debug)]
pub struct Store {
  data: Mutex<StoreData>,
  available: AtomicBool,
}

impl Default for Store {
  fn default() -> Self {
    Self {
      data: Mutex::new(StoreData::default()),
      available: AtomicBool::new(true),
    }
  }
}

impl Store {
  pub fn new() -> Self {
    Self::default()
  }

  /// Simulates an outage: writes fail with `StoreError::Unavailable` until re-enabled.
  pub fn set_available(&self, available: bool) {
    self.available.store(available, Ordering::SeqCst);
  }

  fn ensure_available(&self) -> Result<(), StoreError> {
    if self.available.load(Ordering::SeqCst) {
      Ok(())
    } else {
      Err(StoreError::Unavailable)
    }
  }

  // --- Users ---

  pub fn find_user(&self, email: &str) -> Option<User> {
    self.data.lock().users.get(email).cloned()
  }

  pub fn insert_user(&self, user: User) -> Result<(), StoreError> {
    self.ensure_available()?;
    self.data.lock().users.insert(user.email.clone(), user);
    Ok(())
  }

  // --- Products ---

  pub fn upsert_product(&self, product: Product) {
    self.data.lock().products.insert(product.sku.clone(), product);
  }

  pub fn product(&self, sku: &str) -> Option<Product> {
    self.data.lock().products.get(sku).cloned()
  }

  /// Takes `quantity` units out of stock and returns what is left.
  pub fn reserve_stock(&self, sku: &str, quantity: i64) -> Result<i64, StoreError> {
    self.ensure_available()?;
    let mut data = self.data.lock();
    let product = data
      .products
      .get_mut(sku)
      .ok_or_else(|| StoreError::UnknownProduct(sku.to_string()))?;
    if product.stock_quantity < quantity {
      return Err(StoreError::InsufficientStock {
        sku: sku.to_string(),
        requested: quantity,
        available: product.stock_quantity,
      });
    }
    product.stock_quantity -= quantity;
    product.updated_at = Utc::now();
    Ok(product.stock_quantity)
  }

  // --- Orders ---

  pub fn insert_order(&self, order: Order) -> Result<(), StoreError> {
    self.ensure_available()?;
    self.data.lock().orders.push(order);
    Ok(())
  }

  pub fn orders(&self) -> Vec<Order> {
    self.data.lock().orders.clone()
  }

  // --- Charges ---

  pub fn record_charge(&self, charge: MockCharge) {
    self.data.lock().charges.insert(charge.id.clone(), charge);
  }

  pub fn refund_charge(&self, charge_id: &str) -> Result<(), StoreError> {
    let mut data = self.data.lock();
    let charge = data
      .charges
      .get_mut(charge_id)
      .ok_or_else(|| StoreError::UnknownCharge(charge_id.to_string()))?;
    charge.status = ChargeStatus::Refunded;
    Ok(())
  }

  pub fn charges(&self) -> Vec<MockCharge> {
    self.data.lock().charges.values().cloned().collect()
  }
}

impl TransactionProvider for Store {
  /// Snapshots the whole store and restores it if the body returns an error.
  #[instrument(name = "Store::transaction", skip_all)]
  fn transaction(&self, body: &mut dyn FnMut() -> anyhow::Result<()>) -> anyhow::Result<()> {
    let snapshot = self.data.lock().clone();
    debug!("Store snapshot taken.");
    let result = body();
    if let Err(err) = &result {
      warn!(error = %err, "Restoring store snapshot.");
      *self.data.lock() = snapshot;
    }
    result
  }

  fn name(&self) -> &str {
    "in_memory_store"
  }
}
