//! Product repository: catalog CRUD with on-demand manufacturer/supplier
//! creation.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{manufacturers, products, suppliers};

/// Product repository errors.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Underlying database failure.
    #[error(transparent)]
    Db(#[from] DbErr),

    /// Product missing or owned by another pharmacy.
    #[error("product {0} not found")]
    NotFound(Uuid),
}

/// Catalog search filters. All are optional and combined with AND;
/// name and barcode match by substring.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub genero: Option<String>,
    pub tipo: Option<String>,
    pub manufacturer: Option<String>,
    pub codigo_barras: Option<String>,
}

/// Input for creating a product. Manufacturer and supplier are given by
/// name and resolved (or created) inside the insert transaction.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub genero: Option<String>,
    pub tipo: Option<String>,
    pub grupo: Option<String>,
    pub numeracao_original: Option<String>,
    pub quantidade_embalagem: i32,
    pub manufacturer: String,
    pub supplier: String,
    pub preco_compra: Decimal,
    pub preco_venda: Decimal,
    pub codigo_barras: String,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub genero: Option<String>,
    pub tipo: Option<String>,
    pub grupo: Option<String>,
    pub numeracao_original: Option<String>,
    pub quantidade_embalagem: Option<i32>,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
    pub preco_compra: Option<Decimal>,
    pub preco_venda: Option<Decimal>,
    pub codigo_barras: Option<String>,
}

/// Product repository for CRUD operations, always pharmacy-scoped.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a product by ID within a pharmacy.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        pharmacy_id: Uuid,
        id: Uuid,
    ) -> Result<Option<products::Model>, DbErr> {
        products::Entity::find_by_id(id)
            .filter(products::Column::PharmacyId.eq(pharmacy_id))
            .one(&self.db)
            .await
    }

    /// Lists a pharmacy's products, applying the given filters, ordered by
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        pharmacy_id: Uuid,
        filter: &ProductFilter,
    ) -> Result<Vec<products::Model>, DbErr> {
        let mut query =
            products::Entity::find().filter(products::Column::PharmacyId.eq(pharmacy_id));

        if let Some(name) = &filter.name {
            query = query.filter(products::Column::Name.contains(name));
        }
        if let Some(genero) = &filter.genero {
            query = query.filter(products::Column::Genero.eq(genero));
        }
        if let Some(tipo) = &filter.tipo {
            query = query.filter(products::Column::Tipo.eq(tipo));
        }
        if let Some(barcode) = &filter.codigo_barras {
            query = query.filter(products::Column::CodigoBarras.contains(barcode));
        }
        if let Some(manufacturer) = &filter.manufacturer {
            query = query.filter(
                products::Column::ManufacturerId.in_subquery(
                    sea_orm::sea_query::Query::select()
                        .column(manufacturers::Column::Id)
                        .from(manufacturers::Entity)
                        .and_where(
                            sea_orm::sea_query::Expr::col(manufacturers::Column::Name)
                                .like(format!("%{manufacturer}%")),
                        )
                        .to_owned(),
                ),
            );
        }

        query
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a product, resolving manufacturer and supplier by name inside
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails (including a duplicate barcode
    /// within the pharmacy).
    pub async fn create(
        &self,
        pharmacy_id: Uuid,
        input: CreateProductInput,
    ) -> Result<products::Model, DbErr> {
        let txn = self.db.begin().await?;

        let manufacturer_id = find_or_create_manufacturer(&txn, &input.manufacturer).await?;
        let supplier_id = find_or_create_supplier(&txn, &input.supplier).await?;

        let now = chrono::Utc::now().into();

        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            pharmacy_id: Set(pharmacy_id),
            name: Set(input.name),
            genero: Set(input.genero),
            tipo: Set(input.tipo),
            grupo: Set(input.grupo),
            numeracao_original: Set(input.numeracao_original),
            quantidade_embalagem: Set(input.quantidade_embalagem),
            manufacturer_id: Set(manufacturer_id),
            supplier_id: Set(supplier_id),
            preco_compra: Set(input.preco_compra),
            preco_venda: Set(input.preco_venda),
            codigo_barras: Set(input.codigo_barras),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let product = product.insert(&txn).await?;
        txn.commit().await?;

        Ok(product)
    }

    /// Updates a product. Manufacturer/supplier names, when present, go
    /// through the same find-or-create resolution as on create.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NotFound`] when the product is missing or
    /// belongs to another pharmacy.
    pub async fn update(
        &self,
        pharmacy_id: Uuid,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, ProductError> {
        let txn = self.db.begin().await?;

        let product = products::Entity::find_by_id(id)
            .filter(products::Column::PharmacyId.eq(pharmacy_id))
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut product: products::ActiveModel = product.into();

        if let Some(name) = input.name {
            product.name = Set(name);
        }
        if let Some(genero) = input.genero {
            product.genero = Set(Some(genero));
        }
        if let Some(tipo) = input.tipo {
            product.tipo = Set(Some(tipo));
        }
        if let Some(grupo) = input.grupo {
            product.grupo = Set(Some(grupo));
        }
        if let Some(numeracao) = input.numeracao_original {
            product.numeracao_original = Set(Some(numeracao));
        }
        if let Some(qty) = input.quantidade_embalagem {
            product.quantidade_embalagem = Set(qty);
        }
        if let Some(manufacturer) = input.manufacturer {
            product.manufacturer_id = Set(find_or_create_manufacturer(&txn, &manufacturer).await?);
        }
        if let Some(supplier) = input.supplier {
            product.supplier_id = Set(find_or_create_supplier(&txn, &supplier).await?);
        }
        if let Some(preco) = input.preco_compra {
            product.preco_compra = Set(preco);
        }
        if let Some(preco) = input.preco_venda {
            product.preco_venda = Set(preco);
        }
        if let Some(barcode) = input.codigo_barras {
            product.codigo_barras = Set(barcode);
        }

        let product = product.update(&txn).await?;
        txn.commit().await?;

        Ok(product)
    }

    /// Deletes a product. Its lots cascade; its movement events remain in
    /// the history (shown with a placeholder name).
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NotFound`] when the product is missing or
    /// belongs to another pharmacy.
    pub async fn delete(&self, pharmacy_id: Uuid, id: Uuid) -> Result<(), ProductError> {
        let result = products::Entity::delete_many()
            .filter(products::Column::Id.eq(id))
            .filter(products::Column::PharmacyId.eq(pharmacy_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

/// Resolves a manufacturer by name, creating it on first use.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub async fn find_or_create_manufacturer<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Uuid, DbErr> {
    if let Some(existing) = manufacturers::Entity::find()
        .filter(manufacturers::Column::Name.eq(name))
        .one(conn)
        .await?
    {
        return Ok(existing.id);
    }

    let manufacturer = manufacturers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };

    Ok(manufacturer.insert(conn).await?.id)
}

/// Resolves a supplier by name, creating it on first use.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub async fn find_or_create_supplier<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Uuid, DbErr> {
    if let Some(existing) = suppliers::Entity::find()
        .filter(suppliers::Column::Name.eq(name))
        .one(conn)
        .await?
    {
        return Ok(existing.id);
    }

    let supplier = suppliers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };

    Ok(supplier.insert(conn).await?.id)
}
