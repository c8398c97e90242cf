use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Customer, CustomerDetails};
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        first_name: String,
        last_name: String,
        phone: Option<String>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(customers)
    }

    /// Comprobar existencia; acepta executor para usarse dentro de la
    /// transacción de reserva
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;

        Ok(result.0)
    }

    /// Borrado crudo; el guard referencial vive en el controller
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM customer_details WHERE customer_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Upsert del perfil 1:1: reemplaza el perfil completo si ya existe
    pub async fn upsert_details(
        &self,
        customer_id: Uuid,
        street: Option<String>,
        postal_code: Option<String>,
        city: Option<String>,
        email: Option<String>,
        marketing_consent: bool,
    ) -> Result<CustomerDetails, AppError> {
        let details = sqlx::query_as::<_, CustomerDetails>(
            r#"
            INSERT INTO customer_details
                (customer_id, street, postal_code, city, email, marketing_consent, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (customer_id) DO UPDATE SET
                street = EXCLUDED.street,
                postal_code = EXCLUDED.postal_code,
                city = EXCLUDED.city,
                email = EXCLUDED.email,
                marketing_consent = EXCLUDED.marketing_consent,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(street)
        .bind(postal_code)
        .bind(city)
        .bind(email)
        .bind(marketing_consent)
        .fetch_one(&self.pool)
        .await?;

        Ok(details)
    }

    pub async fn find_details(&self, customer_id: Uuid) -> Result<Option<CustomerDetails>, AppError> {
        let details = sqlx::query_as::<_, CustomerDetails>(
            "SELECT * FROM customer_details WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }
}
