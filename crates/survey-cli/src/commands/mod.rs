pub mod audit;
pub mod dispatch;
pub mod export;
pub mod farmer;
pub mod import;
pub mod init;
pub mod kebele;
pub mod shared;
pub mod status;
pub mod woreda;
