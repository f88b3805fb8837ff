pub mod amount;
pub mod cell;
pub mod codec;
pub mod error;
pub mod payload;
