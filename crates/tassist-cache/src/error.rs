use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cached value failed to decode: key={key}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
