pub mod attachments;
pub mod candidates;
pub mod probes;
pub mod registration;
pub mod stats;
