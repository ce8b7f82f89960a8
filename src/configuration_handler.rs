use crate::{backend::DEFAULT_STORAGE_KEY, configuration::Configuration};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "table_booking", about = "Table reservations with double booking prevention")]
pub struct ConfigurationHandler {
    /// Port the server listens on
    #[arg(long, env = "BOOKING_PORT", default_value = "3000")]
    port: String,

    /// Password expected in the `x-admin-password` header
    #[arg(long, env = "BOOKING_ADMIN_PASSWORD", default_value = "123")]
    password: String,

    /// JSON file for bookings. Bookings only live as long as the process without it
    #[arg(long, env = "BOOKING_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    /// Key the booking list is stored under
    #[arg(long, env = "BOOKING_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn password(&self) -> String {
        self.password.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone()
    }

    fn storage_key(&self) -> String {
        self.storage_key.clone()
    }
}
