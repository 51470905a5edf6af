pub mod model;
pub mod utxo;

pub use model::{Amount, Transaction, TxHash, TxInput, TxOutput};
pub use utxo::{OutPoint, UtxoEntry, UtxoPool};
