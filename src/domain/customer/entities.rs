use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use super::value_objects::Email;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to persist a new customer; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
}
