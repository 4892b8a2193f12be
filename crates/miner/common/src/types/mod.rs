pub(crate) mod mining_block;
pub(crate) mod tx_stream;
