//! Lyzer Storage - MongoDB persistence for race schedules.
//!
//! Each season is stored in its own collection of the `Schedules` database,
//! named after the year. Writing a season replaces the collection contents.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lyzer_schedule::Schedule;
//! use lyzer_storage::{MongoService, ScheduleStore};
//!
//! #[tokio::main]
//! async fn main() -> lyzer_storage::Result<()> {
//!     let service = MongoService::connect("mongodb://localhost:27017").await?;
//!     let races = vec![Schedule::new(1, "Bahrain Grand Prix", "2024-03-02")];
//!     service.insert_schedules(2024, &races).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mongo;

pub use error::{Result, StorageError};
pub use mongo::{MongoService, SCHEDULE_DATABASE, collection_name, test_connection};

use async_trait::async_trait;
use lyzer_schedule::Schedule;

/// Destination for a season's schedule.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Replace the stored schedule for `year` with `schedules`.
    ///
    /// Returns the number of documents written.
    async fn insert_schedules(&self, year: i32, schedules: &[Schedule]) -> Result<usize>;
}
