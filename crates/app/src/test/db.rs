//! Database test utilities and shared infrastructure

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;
use uuid::Uuid;

const USER: &str = "bazaar_test";
const PASSWORD: &str = "bazaar_test_password";

/// Running PostgreSQL container and the address it is reachable on.
struct PostgresServer {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

impl PostgresServer {
    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://{USER}:{PASSWORD}@{}:{}/{database}",
            self.host, self.port
        )
    }
}

/// Shared PostgreSQL server, started once and reused by every test in the binary.
static POSTGRES: Lazy<OnceCell<PostgresServer>> = Lazy::new(OnceCell::new);

async fn start_postgres() -> PostgresServer {
    let container = PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("bazaar_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
        .unwrap_or_else(|_| "localhost".to_string());

    PostgresServer {
        _container: container,
        host,
        port,
    }
}

/// Database names are generated, never user supplied; this only guards the
/// interpolation into `CREATE DATABASE`.
fn is_safe_database_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.starts_with(|c: char| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// A freshly migrated database inside the shared container.
///
/// Every test gets its own database, so services commit normally and tests never see
/// each other's rows. Databases are discarded together with the container.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
}

impl TestDb {
    pub async fn new() -> Self {
        let name = format!("bazaar_test_{}", Uuid::now_v7().simple());

        assert!(is_safe_database_name(&name), "unsafe database name {name}");

        let server = POSTGRES.get_or_init(start_postgres).await;

        let mut admin = PgConnection::connect(&server.url("postgres"))
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&server.url(&name))
            .await
            .expect("Failed to create pool for database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_safe() {
        let name = format!("bazaar_test_{}", Uuid::now_v7().simple());

        assert!(is_safe_database_name(&name));
    }

    #[test]
    fn names_that_would_break_quoting_are_rejected() {
        assert!(!is_safe_database_name(""));
        assert!(!is_safe_database_name("bad\"name"));
        assert!(!is_safe_database_name("1starts_with_digit"));
        assert!(!is_safe_database_name(&"a".repeat(64)));
    }

    #[tokio::test]
    async fn each_database_is_migrated() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name IN ('products', 'orders', 'payments')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query information schema");

        assert_eq!(tables, 3);
    }
}
