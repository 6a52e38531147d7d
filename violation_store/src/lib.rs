//! Shared pieces of the violation logging lambdas: the DynamoDB record
//! conversions, the store and notifier seams each handler is written
//! against, and the environment driven setup every `main` performs.

pub mod attribute;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod record;
pub mod store;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
#[cfg(test)]
mod replay;

pub use attribute::{Item, Record};
pub use config::Config;
pub use error::{InputError, StoreError};
pub use notify::{IotNotifier, Notifier};
pub use record::{BiometricId, ViolationRecord};
pub use store::{DynamoStore, OfficerDirectory, ViolationLog};

const TRACING_DEBUG: &str = "TRACING_DEBUG";

/// Installs the fmt subscriber used by every handler binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(match std::env::var(TRACING_DEBUG) {
            Ok(_) => tracing::Level::DEBUG,
            Err(_) => tracing::Level::INFO
        })
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();
}
