use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::guard_delete;
use crate::dto::customer_dto::{
    ApiResponse, CreateCustomerRequest, CustomerDetailsResponse, CustomerResponse,
    UpsertCustomerDetailsRequest,
};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::rental_repository::RentalRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_not_empty;

pub struct CustomerController {
    repository: CustomerRepository,
    rental_repository: RentalRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            rental_repository: RentalRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, AppError> {
        request.validate()?;

        // length(min = 1) deja pasar strings de solo espacios
        validate_not_empty(&request.first_name)
            .map_err(|_| AppError::BadRequest("El nombre es requerido".to_string()))?;
        validate_not_empty(&request.last_name)
            .map_err(|_| AppError::BadRequest("El apellido es requerido".to_string()))?;

        let customer = self
            .repository
            .create(
                request.first_name.trim().to_string(),
                request.last_name.trim().to_string(),
                request.phone,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            customer.into(),
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerResponse, AppError> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id '{}' not found", id)))?;

        Ok(customer.into())
    }

    pub async fn list(&self) -> Result<Vec<CustomerResponse>, AppError> {
        let customers = self.repository.list().await?;
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    /// Borrar un cliente. Guard referencial: se rechaza si existe
    /// cualquier reserva que lo referencie, sea cual sea su estado
    /// (el histórico debe seguir siendo resoluble).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id '{}' not found", id)))?;

        let references = self.rental_repository.count_by_customer(id).await?;
        guard_delete(&format!("customer '{}'", id), references)?;

        self.repository.delete(id).await
    }

    /// Upsert del perfil 1:1: escribir para un cliente que ya tiene
    /// perfil lo reemplaza entero
    pub async fn upsert_details(
        &self,
        customer_id: Uuid,
        request: UpsertCustomerDetailsRequest,
    ) -> Result<ApiResponse<CustomerDetailsResponse>, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Customer with id '{}' not found", customer_id))
            })?;

        let details = self
            .repository
            .upsert_details(
                customer_id,
                request.street,
                request.postal_code,
                request.city,
                request.email,
                request.marketing_consent,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            details.into(),
            "Datos del cliente guardados".to_string(),
        ))
    }

    pub async fn get_details(&self, customer_id: Uuid) -> Result<CustomerDetailsResponse, AppError> {
        let details = self
            .repository
            .find_details(customer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Customer details for customer '{}' not found",
                    customer_id
                ))
            })?;

        Ok(details.into())
    }
}
