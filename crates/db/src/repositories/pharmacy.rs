//! Pharmacy repository for tenant operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::pharmacies;

/// Input for creating a pharmacy.
#[derive(Debug, Clone, Default)]
pub struct CreatePharmacyInput {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub cep: Option<String>,
    pub cnpj: Option<String>,
}

/// Pharmacy repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PharmacyRepository {
    db: DatabaseConnection,
}

impl PharmacyRepository {
    /// Creates a new pharmacy repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a pharmacy by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<pharmacies::Model>, DbErr> {
        pharmacies::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a pharmacy by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<pharmacies::Model>, DbErr> {
        pharmacies::Entity::find()
            .filter(pharmacies::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Checks whether a pharmacy name is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        let count = pharmacies::Entity::find()
            .filter(pharmacies::Column::Name.eq(name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new pharmacy.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreatePharmacyInput) -> Result<pharmacies::Model, DbErr> {
        let now = chrono::Utc::now().into();

        let pharmacy = pharmacies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            address: Set(input.address),
            phone: Set(input.phone),
            cep: Set(input.cep),
            cnpj: Set(input.cnpj),
            created_at: Set(now),
            updated_at: Set(now),
        };

        pharmacy.insert(&self.db).await
    }
}
