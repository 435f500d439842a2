use bazaar_app::{config::AppConfig, database, documents::DocumentStore};
use tracing::info;

pub(crate) async fn run(config: &AppConfig) -> Result<(), String> {
    let pool = database::connect(&config.database.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    info!("relational migrations applied");

    let documents = DocumentStore::connect(
        &config.documents.mongodb_url,
        &config.documents.mongodb_database,
    )
    .await
    .map_err(|error| format!("failed to connect to document store: {error}"))?;

    documents
        .ensure_indexes()
        .await
        .map_err(|error| format!("failed to create document indexes: {error}"))?;

    println!("migrations: applied");
    println!("document_indexes: ensured");

    Ok(())
}
