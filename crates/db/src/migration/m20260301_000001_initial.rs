//! Initial database migration.
//!
//! Creates the enum, the tenant and catalog tables, the expiry ledger, the
//! append-only movement log, supporting indexes, and the updated_at trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;

        db.execute_unprepared(PHARMACIES_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(MANUFACTURERS_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;

        db.execute_unprepared(STOCK_LOTS_SQL).await?;
        db.execute_unprepared(MOVEMENT_EVENTS_SQL).await?;

        db.execute_unprepared(INDEXES_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
-- Movement ledger operation kinds
CREATE TYPE movement_kind AS ENUM (
    'added',
    'removed',
    'edited'
);
";

const PHARMACIES_SQL: &str = r"
CREATE TABLE pharmacies (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    address VARCHAR(255),
    phone VARCHAR(32),
    cep VARCHAR(16),
    cnpj VARCHAR(32),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(80) NOT NULL UNIQUE,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    pharmacy_id UUID REFERENCES pharmacies(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const MANUFACTURERS_SQL: &str = r"
CREATE TABLE manufacturers (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    pharmacy_id UUID NOT NULL REFERENCES pharmacies(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    genero VARCHAR(80),
    tipo VARCHAR(80),
    grupo VARCHAR(80),
    numeracao_original VARCHAR(80),
    quantidade_embalagem INTEGER NOT NULL DEFAULT 1
        CHECK (quantidade_embalagem > 0),
    manufacturer_id UUID NOT NULL REFERENCES manufacturers(id),
    supplier_id UUID NOT NULL REFERENCES suppliers(id),
    preco_compra NUMERIC(12, 2) NOT NULL DEFAULT 0,
    preco_venda NUMERIC(12, 2) NOT NULL DEFAULT 0,
    codigo_barras VARCHAR(64) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    UNIQUE (pharmacy_id, codigo_barras)
);
";

const STOCK_LOTS_SQL: &str = r"
CREATE TABLE stock_lots (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    expiration_date DATE NOT NULL,
    quantity_remaining BIGINT NOT NULL
        CHECK (quantity_remaining >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

// product_id carries no foreign key: the movement log is append-only and
// must survive product deletion (history shows a placeholder instead).
const MOVEMENT_EVENTS_SQL: &str = r"
CREATE TABLE movement_events (
    id UUID PRIMARY KEY,
    pharmacy_id UUID NOT NULL REFERENCES pharmacies(id) ON DELETE CASCADE,
    product_id UUID NOT NULL,
    kind movement_kind NOT NULL,
    quantity BIGINT NOT NULL CHECK (quantity > 0),
    signed_effect BIGINT NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_users_pharmacy ON users(pharmacy_id);
CREATE INDEX idx_products_pharmacy ON products(pharmacy_id);
CREATE INDEX idx_products_name ON products(pharmacy_id, name);
CREATE INDEX idx_stock_lots_fefo ON stock_lots(product_id, expiration_date, id);
CREATE INDEX idx_movement_events_product_ts ON movement_events(product_id, timestamp);
CREATE INDEX idx_movement_events_pharmacy_ts ON movement_events(pharmacy_id, timestamp DESC);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER pharmacies_updated_at
    BEFORE UPDATE ON pharmacies
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER products_updated_at
    BEFORE UPDATE ON products
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS movement_events CASCADE;
DROP TABLE IF EXISTS stock_lots CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS suppliers CASCADE;
DROP TABLE IF EXISTS manufacturers CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TABLE IF EXISTS pharmacies CASCADE;
DROP FUNCTION IF EXISTS set_updated_at CASCADE;
DROP TYPE IF EXISTS movement_kind CASCADE;
";
