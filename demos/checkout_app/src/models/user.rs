// stepline_project/demos/checkout_app/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub email: String,
  pub name: Option<String>,
  #[serde(skip_serializing)] // Never expose the password hash
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}
