use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Customer, CustomerDetails};

// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 3, max = 30))]
    pub phone: Option<String>,
}

// Request para upsert del perfil 1:1 del cliente.
// Se escribe siempre como unidad completa: si el cliente ya tiene
// perfil, se reemplaza entero.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertCustomerDetailsRequest {
    #[validate(length(max = 200))]
    pub street: Option<String>,

    #[validate(length(max = 20))]
    pub postal_code: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[serde(default)]
    pub marketing_consent: bool,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailsResponse {
    pub customer_id: Uuid,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub marketing_consent: bool,
    pub updated_at: DateTime<Utc>,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            phone: c.phone,
            created_at: c.created_at,
        }
    }
}

impl From<CustomerDetails> for CustomerDetailsResponse {
    fn from(d: CustomerDetails) -> Self {
        Self {
            customer_id: d.customer_id,
            street: d.street,
            postal_code: d.postal_code,
            city: d.city,
            email: d.email,
            marketing_consent: d.marketing_consent,
            updated_at: d.updated_at,
        }
    }
}
