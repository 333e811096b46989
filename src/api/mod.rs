mod backend;

pub use backend::{Backend, BackendAck, HttpBackend, ListingSubmission, PurchaseReport};
