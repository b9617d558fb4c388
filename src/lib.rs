//! Calculatrice arcade : noyau de calcul, session, console.

pub mod app;
pub mod config;
pub mod noyau;
