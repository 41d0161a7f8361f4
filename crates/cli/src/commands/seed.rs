//! Seed the database with a demo tenant.
//!
//! Creates a tenant with two services, two staff members, weekday shifts,
//! and qualification links, so the booking API can be exercised right after
//! `turnera-cli migrate`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use turnera_core::schedule::Weekday;

/// Errors from the seed command.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed a demo tenant.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or an insert fails
/// (including re-running against an already seeded slug).
pub async fn run(slug: &str, name: &str) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("TURNERA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("TURNERA_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;

    info!(slug, "Seeding demo tenant");

    let tenant_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO tenant (slug, name, contact) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(slug)
    .bind(name)
    .bind("hola@example.com / 0414-000-1122")
    .fetch_one(&pool)
    .await?;

    let haircut = insert_service(&pool, tenant_id, "Corte de cabello", 30, "12.00").await?;
    let massage = insert_service(&pool, tenant_id, "Masaje relajante", 45, "25.00").await?;

    let maria = insert_staff(&pool, tenant_id, "María Pérez").await?;
    let carlos = insert_staff(&pool, tenant_id, "Carlos Gómez").await?;

    // María: Mon-Fri 08:00-13:00, both services
    for weekday in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ] {
        insert_shift(&pool, maria, weekday, 480, 780).await?;
    }
    insert_qualification(&pool, maria, haircut).await?;
    insert_qualification(&pool, maria, massage).await?;

    // Carlos: Mon/Wed/Fri 14:00-18:00 plus Saturday mornings, haircuts only
    for weekday in [Weekday::Monday, Weekday::Wednesday, Weekday::Friday] {
        insert_shift(&pool, carlos, weekday, 840, 1080).await?;
    }
    insert_shift(&pool, carlos, Weekday::Saturday, 540, 780).await?;
    insert_qualification(&pool, carlos, haircut).await?;

    info!(slug, tenant_id, "Demo tenant seeded");
    Ok(())
}

async fn insert_service(
    pool: &PgPool,
    tenant_id: i32,
    name: &str,
    duration_minutes: i32,
    price: &str,
) -> Result<i32, SeedError> {
    let price: Decimal = price.parse().unwrap_or_default();
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO service (tenant_id, name, duration_minutes, price) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(tenant_id)
    .bind(name)
    .bind(duration_minutes)
    .bind(price)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn insert_staff(pool: &PgPool, tenant_id: i32, name: &str) -> Result<i32, SeedError> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO staff (tenant_id, name) VALUES ($1, $2) RETURNING id",
    )
    .bind(tenant_id)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn insert_shift(
    pool: &PgPool,
    staff_id: i32,
    weekday: Weekday,
    start_minute: i32,
    end_minute: i32,
) -> Result<(), SeedError> {
    sqlx::query(
        "INSERT INTO shift (staff_id, weekday, start_minute, end_minute) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(staff_id)
    .bind(weekday.canonical_name())
    .bind(start_minute)
    .bind(end_minute)
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert_qualification(
    pool: &PgPool,
    staff_id: i32,
    service_id: i32,
) -> Result<(), SeedError> {
    sqlx::query("INSERT INTO staff_service (staff_id, service_id) VALUES ($1, $2)")
        .bind(staff_id)
        .bind(service_id)
        .execute(pool)
        .await?;
    Ok(())
}
