//! Noyau de calcul
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation (glyphes écran compris)
//! - normalise.rs : réécriture écran -> forme évaluable (%, log, DEG, parenthèses)
//! - expr.rs      : arbre fermé (nombres, constantes, binaires, fonctions)
//! - analyse.rs   : descente récursive, jetons -> Expr
//! - valeur.rs    : valeur exacte (Q) ou approchée (f64)
//! - trig.rs      : angles spéciaux en degrés + tan indéfini
//! - format.rs    : affichage écran (entier complet, sinon 10 chiffres)
//! - erreur.rs    : taxonomie d’erreurs
//! - eval.rs      : pipeline complet

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod normalise;
pub mod trig;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{evaluer, evaluer_avec_demarche, Demarche, Resultat};
pub use format::format_valeur;
pub use normalise::{normaliser, ModeAngle};
pub use valeur::Valeur;
