#[cfg(feature = "opensearch")]
pub mod opensearch;

#[cfg(feature = "kafka")]
pub mod kafka;
