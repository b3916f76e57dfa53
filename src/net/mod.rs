pub mod mac;
pub mod network;
