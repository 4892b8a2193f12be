pub(crate) mod engine;
pub(crate) mod pool;
pub(crate) mod storage;
