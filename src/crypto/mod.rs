pub mod block;
pub mod hash;
