//! Seed the database with demo data.
//!
//! Inserts a small, self-consistent data set for local development: two
//! vendor accounts with approved profiles, a customer, a category tree,
//! products with stock, and a couple of coupons. Safe to re-run; every
//! insert is `ON CONFLICT DO NOTHING` keyed on natural uniques.

use sqlx::PgPool;
use tracing::info;

use vendora_server::db;

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    seed_users(&pool).await?;
    seed_categories(&pool).await?;
    seed_products(&pool).await?;
    seed_coupons(&pool).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO users (email, name, role) VALUES
            ('harbor@vendora.test', 'Harbor Goods', 'vendor'),
            ('atelier@vendora.test', 'Atelier North', 'vendor'),
            ('customer@vendora.test', 'Demo Customer', 'customer')
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        INSERT INTO vendor_profiles (user_id, business_name, description, approved)
        SELECT id, name, 'Demo vendor for local development', TRUE
        FROM users
        WHERE role = 'vendor'
        ON CONFLICT (user_id) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    info!("Seeded users and vendor profiles");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO categories (name, slug, description) VALUES
            ('Home', 'home', 'Homeware and decor'),
            ('Kitchen', 'kitchen', 'Cookware and utensils'),
            ('Outdoors', 'outdoors', 'Camping and garden')
        ON CONFLICT (slug) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    info!("Seeded categories");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO products
            (vendor_id, category_id, name, slug, description, price,
             discount_price, stock, sku, active, featured)
        VALUES
            ((SELECT id FROM users WHERE email = 'harbor@vendora.test'),
             (SELECT id FROM categories WHERE slug = 'kitchen'),
             'Cast Iron Skillet', 'cast-iron-skillet',
             'Pre-seasoned 10-inch skillet', 49.00, 39.00, 25,
             'HG-SKILLET-10', TRUE, TRUE),
            ((SELECT id FROM users WHERE email = 'harbor@vendora.test'),
             (SELECT id FROM categories WHERE slug = 'home'),
             'Linen Throw', 'linen-throw',
             'Stonewashed linen throw blanket', 89.00, NULL, 12,
             'HG-THROW-LN', TRUE, FALSE),
            ((SELECT id FROM users WHERE email = 'atelier@vendora.test'),
             (SELECT id FROM categories WHERE slug = 'outdoors'),
             'Enamel Mug Set', 'enamel-mug-set',
             'Set of four enamel camping mugs', 32.00, NULL, 40,
             'AN-MUG-4', TRUE, FALSE)
        ON CONFLICT (slug) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    info!("Seeded products");
    Ok(())
}

async fn seed_coupons(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO coupons (code, discount, valid_from, valid_to, active) VALUES
            ('WELCOME10', 10.00, now() - interval '1 day', now() + interval '90 days', TRUE),
            ('EXPIRED20', 20.00, now() - interval '60 days', now() - interval '30 days', TRUE)
        ON CONFLICT (code) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    info!("Seeded coupons");
    Ok(())
}
