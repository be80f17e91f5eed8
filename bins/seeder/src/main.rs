//! Database seeder for Stockfarm development and testing.
//!
//! Seeds a test pharmacy, a login user, a small catalog with lots, and a
//! week of sales movements so the replenishment report has data to chew on.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use stockfarm_db::entities::{
    manufacturers, movement_events, pharmacies, products, sea_orm_active_enums::MovementKind,
    stock_lots, suppliers, users,
};

/// Test pharmacy ID (consistent for all seeds)
const TEST_PHARMACY_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test user ID (consistent for all seeds)
const TEST_USER_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Seeded product IDs
const DIPIRONA_ID: &str = "00000000-0000-0000-0000-000000000010";
const AMOXICILINA_ID: &str = "00000000-0000-0000-0000-000000000011";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = stockfarm_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test pharmacy...");
    seed_pharmacy(&db).await;

    println!("Seeding test user...");
    seed_user(&db).await;

    println!("Seeding catalog...");
    seed_catalog(&db).await;

    println!("Seeding lots and movements...");
    seed_stock(&db).await;

    println!("Seeding complete!");
}

fn test_pharmacy_id() -> Uuid {
    Uuid::parse_str(TEST_PHARMACY_ID).unwrap()
}

fn test_user_id() -> Uuid {
    Uuid::parse_str(TEST_USER_ID).unwrap()
}

async fn seed_pharmacy(db: &DatabaseConnection) {
    if pharmacies::Entity::find_by_id(test_pharmacy_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test pharmacy already exists, skipping...");
        return;
    }

    let pharmacy = pharmacies::ActiveModel {
        id: Set(test_pharmacy_id()),
        name: Set("Farmácia Teste".to_string()),
        address: Set(Some("Rua das Flores, 100".to_string())),
        phone: Set(Some("(11) 99999-0000".to_string())),
        cep: Set(Some("01000-000".to_string())),
        cnpj: Set(Some("00.000.000/0001-00".to_string())),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = pharmacy.insert(db).await {
        eprintln!("Failed to insert test pharmacy: {e}");
    } else {
        println!("  Created pharmacy: Farmácia Teste");
    }
}

async fn seed_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(test_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test user already exists, skipping...");
        return;
    }

    let password_hash =
        stockfarm_core::auth::hash_password("stockfarm-dev").expect("Failed to hash password");

    let user = users::ActiveModel {
        id: Set(test_user_id()),
        username: Set("teste".to_string()),
        email: Set("teste@stockfarm.dev".to_string()),
        password_hash: Set(password_hash),
        pharmacy_id: Set(Some(test_pharmacy_id())),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert test user: {e}");
    } else {
        println!("  Created user: teste / stockfarm-dev");
    }
}

async fn seed_catalog(db: &DatabaseConnection) {
    if products::Entity::find_by_id(Uuid::parse_str(DIPIRONA_ID).unwrap())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Catalog already seeded, skipping...");
        return;
    }

    let manufacturer_id = Uuid::new_v4();
    let manufacturer = manufacturers::ActiveModel {
        id: Set(manufacturer_id),
        name: Set("Medley".to_string()),
        created_at: Set(Utc::now().into()),
    };
    if let Err(e) = manufacturer.insert(db).await {
        eprintln!("Failed to insert manufacturer: {e}");
        return;
    }

    let supplier_id = Uuid::new_v4();
    let supplier = suppliers::ActiveModel {
        id: Set(supplier_id),
        name: Set("Distribuidora Central".to_string()),
        created_at: Set(Utc::now().into()),
    };
    if let Err(e) = supplier.insert(db).await {
        eprintln!("Failed to insert supplier: {e}");
        return;
    }

    let catalog = [
        (DIPIRONA_ID, "Dipirona 500mg", "7891000100103"),
        (AMOXICILINA_ID, "Amoxicilina 250mg", "7891000100110"),
    ];

    for (id, name, barcode) in catalog {
        let product = products::ActiveModel {
            id: Set(Uuid::parse_str(id).unwrap()),
            pharmacy_id: Set(test_pharmacy_id()),
            name: Set(name.to_string()),
            genero: Set(Some("medicamento".to_string())),
            tipo: Set(Some("comprimido".to_string())),
            grupo: Set(None),
            numeracao_original: Set(None),
            quantidade_embalagem: Set(10),
            manufacturer_id: Set(manufacturer_id),
            supplier_id: Set(supplier_id),
            preco_compra: Set(Decimal::new(350, 2)),
            preco_venda: Set(Decimal::new(799, 2)),
            codigo_barras: Set(barcode.to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = product.insert(db).await {
            eprintln!("Failed to insert product {name}: {e}");
        } else {
            println!("  Created product: {name}");
        }
    }
}

async fn seed_stock(db: &DatabaseConnection) {
    let dipirona = Uuid::parse_str(DIPIRONA_ID).unwrap();
    let amoxicilina = Uuid::parse_str(AMOXICILINA_ID).unwrap();

    // Two lots per product, staggered expirations for FEFO exercise.
    let lots = [
        (dipirona, 20_i64, 30_i64),
        (dipirona, 45, 50),
        (amoxicilina, 10, 20),
        (amoxicilina, 90, 40),
    ];

    for (product_id, days_out, quantity) in lots {
        let lot = stock_lots::ActiveModel {
            id: Set(Uuid::now_v7()),
            product_id: Set(product_id),
            expiration_date: Set((Utc::now() + Duration::days(days_out)).date_naive()),
            quantity_remaining: Set(quantity),
            created_at: Set(Utc::now().into()),
        };
        if let Err(e) = lot.insert(db).await {
            eprintln!("Failed to insert lot: {e}");
        }
    }

    // A week of movements: receipts followed by daily sales, so the
    // replenishment report has a demand signal.
    let mut events = vec![
        (dipirona, MovementKind::Added, 80_i64, 80_i64, 7_i64),
        (amoxicilina, MovementKind::Added, 60, 60, 7),
    ];
    for days_ago in [1_i64, 2, 3, 5] {
        events.push((dipirona, MovementKind::Removed, 5, -5, days_ago));
    }
    events.push((amoxicilina, MovementKind::Removed, 10, -10, 2));

    for (product_id, kind, quantity, signed_effect, days_ago) in events {
        let event = movement_events::ActiveModel {
            id: Set(Uuid::now_v7()),
            pharmacy_id: Set(test_pharmacy_id()),
            product_id: Set(product_id),
            kind: Set(kind),
            quantity: Set(quantity),
            signed_effect: Set(signed_effect),
            timestamp: Set((Utc::now() - Duration::days(days_ago)).into()),
        };
        if let Err(e) = event.insert(db).await {
            eprintln!("Failed to insert movement event: {e}");
        }
    }

    println!("  Seeded lots and a week of movements");
}
