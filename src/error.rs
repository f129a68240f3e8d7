use crate::object::ObjectId;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy surfaced to the caller. Nothing here is retried or
/// recovered internally; every variant aborts the current command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bad arguments: {0}")]
    BadArguments(String),

    #[error("bad digest: {0:?}")]
    BadDigest(String),

    #[error("object {0} not found in store")]
    Missing(ObjectId),

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("corrupt tree: {0}")]
    CorruptTree(String),

    #[error("corrupt delta: {0}")]
    CorruptDelta(String),

    #[error("corrupt zlib stream: {0}")]
    CorruptStream(String),

    #[error("corrupt pack: {0}")]
    CorruptPack(String),

    #[error("unresolved delta: {0}")]
    UnresolvedDelta(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}
