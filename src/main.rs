use table_booking::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    file_storage::FileStorage, http::create_app, reservation_store::ReservationStore,
    session_storage::SessionStorage,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#################");
    println!("# Table Booking #");
    println!("#################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Listening on {address}");
    let listener = tokio::net::TcpListener::bind(address).await?;

    let app = if let Some(storage_path) = configuration.storage_path() {
        info!(path = %storage_path.display(), "Persisting bookings to file");
        let backend = FileStorage::new(storage_path, configuration.storage_key());
        create_app(ReservationStore::new(backend), configuration)
    } else {
        info!("Keeping bookings in memory for this session only");
        let backend = SessionStorage::new(configuration.storage_key());
        create_app(ReservationStore::new(backend), configuration)
    };

    axum::serve(listener, app).await?;
    Ok(())
}
