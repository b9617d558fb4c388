// src/app.rs
//
// Calculatrice arcade — module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + visage.rs + console.rs)
// - Ré-exporter Session / Console (pour main.rs: use calculatrice_arcade::app::Console;)
//
// Le noyau ne connaît pas l’app : seul etat.rs appelle noyau::evaluer.

pub mod console;
pub mod etat;
pub mod visage;

pub use console::Console;
pub use etat::{Session, StyleInterface};
pub use visage::{Humeur, Reaction, Visage};
