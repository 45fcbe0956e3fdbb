//! # Seed Data Generator
//!
//! Populates a development database with a user hierarchy and a small
//! product catalog so the engine can be exercised by hand.
//!
//! ## Usage
//! ```bash
//! # Seed ./caja_dev.db (default)
//! cargo run -p caja-db --bin seed
//!
//! # Specify database path
//! cargo run -p caja-db --bin seed -- --db ./data/caja.db
//!
//! # Delete and recreate the database first
//! cargo run -p caja-db --bin seed -- --fresh
//! ```
//!
//! ## Generated Data
//! - One admin (`ana`), one employee (`beto`, managed by ana)
//! - A catalog across categories (Bebidas, Snacks, Abarrotes, Limpieza)
//!   with derived codes, prices between $0.50 and $25.00, stock 0-60

use chrono::Utc;
use std::env;
use uuid::Uuid;

use caja_core::code::{code_prefix, format_code};
use caja_core::{Actor, Money, Product, Role, SaleLine, User};
use caja_db::{Database, DbConfig, SaleService, StockService};

/// (category, name, price_cents, stock) rows for the dev catalog.
const CATALOG: &[(&str, &str, i64, i64)] = &[
    ("Bebidas", "Cola 355ml", 250, 48),
    ("Bebidas", "Cola 600ml", 350, 36),
    ("Bebidas", "Agua 1L", 100, 60),
    ("Bebidas", "Jugo Naranja 1L", 420, 24),
    ("Bebidas", "Cerveza Clara 355ml", 380, 0),
    ("Snacks", "Chips Picantes", 150, 40),
    ("Snacks", "Cacahuates Salados", 180, 30),
    ("Snacks", "Galletas Chocolate", 220, 25),
    ("Snacks", "Chicles Menta", 90, 55),
    ("Abarrotes", "Arroz 1kg", 320, 20),
    ("Abarrotes", "Frijol Negro 1kg", 450, 18),
    ("Abarrotes", "Aceite 900ml", 650, 12),
    ("Abarrotes", "Azucar 1kg", 280, 15),
    ("Abarrotes", "Cafe Soluble 200g", 2500, 8),
    ("Limpieza", "Jabon Barra", 120, 34),
    ("Limpieza", "Detergente 1kg", 550, 16),
    ("Limpieza", "Cloro 1L", 200, 22),
    ("Limpieza", "Papel Higienico 4pk", 480, 28),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./caja_dev.db");
    let mut fresh = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--fresh" | "-f" => {
                fresh = true;
            }
            "--help" | "-h" => {
                println!("Caja Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caja_dev.db)");
                println!("  -f, --fresh        Delete the database file first");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Caja Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    if fresh {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{db_path}{suffix}"));
        }
        println!("✓ Removed existing database");
    }

    // Connect to database (creates the file, runs migrations)
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Re-run with --fresh to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    // Users: one admin, one employee under them
    let admin = User {
        id: Uuid::new_v4().to_string(),
        username: "ana".to_string(),
        role: Role::Admin,
        manager_id: None,
        created_at: now,
    };
    let employee = User {
        id: Uuid::new_v4().to_string(),
        username: "beto".to_string(),
        role: Role::Employee,
        manager_id: Some(admin.id.clone()),
        created_at: now,
    };

    db.users().insert(db.pool(), &admin).await?;
    db.users().insert(db.pool(), &employee).await?;

    println!("✓ Created users: ana (admin), beto (employee)");

    // Products, with codes derived the same way the service derives them.
    // Sequences restart per prefix; the catalog has no prefix collisions
    // beyond the ones counted here.
    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut last_prefix = String::new();
    let mut sequence = 0u32;
    let mut demo_product: Option<Product> = None;

    for (category, name, price_cents, stock) in CATALOG {
        let prefix = code_prefix(Some(category), name);
        if prefix == last_prefix {
            sequence += 1;
        } else {
            last_prefix = prefix.clone();
            sequence = 1;
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            owner_id: admin.id.clone(),
            name: name.to_string(),
            category: Some(category.to_string()),
            price_cents: *price_cents,
            stock: *stock,
            code: format_code(&prefix, sequence),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.products().insert(db.pool(), &product).await {
            eprintln!("Failed to insert {}: {}", product.code, e);
            continue;
        }

        if demo_product.is_none() {
            demo_product = Some(product);
        }
        generated += 1;
    }

    let elapsed = start.elapsed();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // One demo sale and one adjustment so a fresh database already shows
    // movement history.
    if let Some(product) = demo_product {
        let ana = Actor::from_user(&admin)?;
        let beto = Actor::from_user(&employee)?;

        let sale = SaleService::new(db.clone())
            .create_sale(
                &beto,
                &[SaleLine {
                    product_id: product.id.clone(),
                    quantity: 2,
                }],
                Some("cash"),
            )
            .await?;
        println!(
            "✓ Demo sale: 2 × {} = {}",
            product.name,
            Money::from_cents(sale.sale.total_cents)
        );

        let adjustment = StockService::new(db.clone())
            .adjust_stock(&ana, &product.id, -1, "merma")
            .await?;
        println!(
            "✓ Demo adjustment: stock {} → {}",
            adjustment.old_stock, adjustment.new_stock
        );
    }

    println!();
    println!("✓ Seed complete!");
    println!();
    println!("Try it:");
    println!("  sqlite3 {} 'SELECT code, name, stock FROM products LIMIT 5'", db_path);

    Ok(())
}
