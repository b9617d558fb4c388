// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Trois catégories seulement : l’appelant (session, visage) ne voit jamais une panique,
// il reçoit une de ces valeurs dans le Resultat.

use thiserror::Error;

/// Message de dépassement (f64 non fini). Repris par le visage (“Trop grand !”).
pub const MSG_DEPASSEMENT: &str = "dépassement de capacité";

/// Argument hors domaine (sqrt(-1), log(0), ...).
pub const MSG_DOMAINE: &str = "erreur de domaine mathématique";

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("division par zéro")]
    DivisionParZero,

    /// Entrée mal formée (détail du parseur).
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    /// Toute autre erreur d’évaluation, texte brut.
    #[error("{0}")]
    Evaluation(String),
}

impl ErreurCalcul {
    pub fn syntaxe(detail: impl Into<String>) -> Self {
        Self::Syntaxe(detail.into())
    }

    pub fn evaluation(detail: impl Into<String>) -> Self {
        Self::Evaluation(detail.into())
    }

    pub fn est_depassement(&self) -> bool {
        matches!(self, Self::Evaluation(d) if d.contains(MSG_DEPASSEMENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_par_categorie() {
        assert_eq!(ErreurCalcul::DivisionParZero.to_string(), "division par zéro");
        assert_eq!(
            ErreurCalcul::syntaxe("fin d’expression inattendue").to_string(),
            "erreur de syntaxe : fin d’expression inattendue"
        );
        assert_eq!(ErreurCalcul::evaluation(MSG_DOMAINE).to_string(), MSG_DOMAINE);
    }

    #[test]
    fn depassement_reconnu() {
        assert!(ErreurCalcul::evaluation(MSG_DEPASSEMENT).est_depassement());
        assert!(!ErreurCalcul::evaluation(MSG_DOMAINE).est_depassement());
        assert!(!ErreurCalcul::DivisionParZero.est_depassement());
    }
}
