//! Command execution functions for publish operations.

mod publish;

pub use publish::{PublishReport, publish_images};
