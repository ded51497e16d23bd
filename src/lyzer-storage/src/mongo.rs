//! MongoDB-backed schedule store.

use std::time::Duration;

use async_trait::async_trait;
use lyzer_schedule::Schedule;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info, warn};

use crate::ScheduleStore;
use crate::error::{Result, StorageError};

/// Database holding one collection per season.
pub const SCHEDULE_DATABASE: &str = "Schedules";

/// How long the driver waits for a usable server before failing.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Collection name for a season.
pub fn collection_name(year: i32) -> String {
    year.to_string()
}

/// Connection to a MongoDB deployment.
#[derive(Debug, Clone)]
pub struct MongoService {
    client: Client,
}

impl MongoService {
    /// Build a client for `uri`.
    ///
    /// The driver connects lazily, so this only fails on a malformed
    /// connection string. Use [`MongoService::ping`] to check reachability.
    pub async fn connect(uri: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StorageError::InvalidUri(e.to_string()))?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.app_name = Some("lyzer".to_string());

        let client = Client::with_options(options)?;
        Ok(Self { client })
    }

    /// Ping the `admin` database.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StorageError::Unreachable(e.to_string()))?;
        debug!("MongoDB ping succeeded");
        Ok(())
    }

    fn season(&self, year: i32) -> Collection<Schedule> {
        self.client
            .database(SCHEDULE_DATABASE)
            .collection(&collection_name(year))
    }
}

#[async_trait]
impl ScheduleStore for MongoService {
    async fn insert_schedules(&self, year: i32, schedules: &[Schedule]) -> Result<usize> {
        let collection = self.season(year);

        collection.drop().await?;
        debug!(collection = %collection.name(), "Dropped season collection");

        if schedules.is_empty() {
            info!(year, "No races to store");
            return Ok(0);
        }

        let result = collection.insert_many(schedules).await?;
        let written = result.inserted_ids.len();
        info!(year, written, "Stored season schedule");
        Ok(written)
    }
}

/// Whether a server at `uri` answers a ping.
///
/// Never fails: malformed strings and unreachable servers both yield `false`.
pub async fn test_connection(uri: &str) -> bool {
    let service = match MongoService::connect(uri).await {
        Ok(service) => service,
        Err(e) => {
            warn!(error = %e, "MongoDB connection string rejected");
            return false;
        }
    };

    match service.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "MongoDB connection test failed");
            false
        }
    }
}
