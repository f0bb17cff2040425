pub mod health;
pub mod preventivo;
