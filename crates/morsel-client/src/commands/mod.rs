pub mod common;
pub mod prepare;
pub mod regions;
pub mod sales;
