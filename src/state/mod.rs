mod listings;
mod session;

pub use listings::{ListingRecord, ListingStore, BATCH_SIZE};
pub use session::Session;
