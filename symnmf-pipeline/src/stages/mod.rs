pub mod clustering;
pub mod factorize;
