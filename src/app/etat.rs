//! src/app/etat.rs
//!
//! État de session (sans affichage).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, réponse, mémoire, mode,
//! alimentation, style) et offrir les actions “boutons”.
//!
//! Contrats :
//! - Éteinte, la calculatrice ignore les saisies.
//! - Seul `calculer` passe par le noyau ; le reste est déterministe.
//! - Un résultat affiché est remplacé par un chiffre, prolongé par un opérateur.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::noyau::{evaluer_avec_demarche, format_valeur, Demarche, ModeAngle, Resultat, Valeur};

/// Fonctions effacées d’un bloc par le retour arrière.
const FONCTIONS_SAISIES: [&str; 5] = ["sin(", "cos(", "tan(", "sqrt(", "log("];

/// Présentation : visage arcade, ou écran seul.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleInterface {
    #[default]
    Arcade,
    Minimal,
}

impl StyleInterface {
    pub fn bascule(self) -> Self {
        match self {
            StyleInterface::Arcade => StyleInterface::Minimal,
            StyleInterface::Minimal => StyleInterface::Arcade,
        }
    }
}

impl fmt::Display for StyleInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StyleInterface::Arcade => "arcade",
            StyleInterface::Minimal => "minimal",
        })
    }
}

impl FromStr for StyleInterface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arcade" => Ok(StyleInterface::Arcade),
            "minimal" => Ok(StyleInterface::Minimal),
            autre => Err(format!("style inconnu : {autre}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,         // texte de l’écran résultat
    pub derniere_reponse: String, // ANS
    derniere_valeur: Option<Valeur>,
    pub resultat_affiche: bool,

    // --- mémoire (MC/MR/M+/M-) ---
    memoire: Valeur,

    // --- paramètres ---
    pub mode_angle: ModeAngle,
    pub allumee: bool,
    pub style: StyleInterface,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            derniere_reponse: "0".to_string(),
            derniere_valeur: None,
            resultat_affiche: false,
            memoire: Valeur::entier(0),
            mode_angle: ModeAngle::Deg,
            allumee: true,
            style: StyleInterface::Arcade,
        }
    }
}

impl Session {
    pub fn new(mode_angle: ModeAngle, style: StyleInterface, allumee: bool) -> Self {
        Self {
            mode_angle,
            style,
            allumee,
            ..Self::default()
        }
    }

    pub fn memoire(&self) -> &Valeur {
        &self.memoire
    }

    /* ------------------------ Saisie ------------------------ */

    /// Ajoute du texte. Après un résultat : un chiffre ou '.' repart de zéro,
    /// le reste prolonge le résultat ("= 5" puis "+2" donne "5+2").
    pub fn inserer_texte(&mut self, texte: &str) {
        if !self.allumee {
            return;
        }
        if self.resultat_affiche {
            let nouveau = texte
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '.');
            self.entree = if nouveau {
                String::new()
            } else {
                self.resultat.clone()
            };
            self.resultat_affiche = false;
        }
        self.entree.push_str(texte);
    }

    /// Ajoute une fonction ("sin(", "sqrt(" …). Après un résultat : nouvelle entrée.
    pub fn inserer_fonction(&mut self, fonction: &str) {
        if !self.allumee {
            return;
        }
        self.repartir_si_resultat();
        self.entree.push_str(fonction);
    }

    /// ANS : ajoute la dernière réponse.
    pub fn inserer_reponse(&mut self) {
        if !self.allumee {
            return;
        }
        self.repartir_si_resultat();
        let ans = self.derniere_reponse.clone();
        self.entree.push_str(&ans);
    }

    fn repartir_si_resultat(&mut self) {
        if self.resultat_affiche {
            self.entree.clear();
            self.resultat_affiche = false;
        }
    }

    /// C : effacer seulement l’entrée.
    pub fn effacer(&mut self) {
        if !self.allumee {
            return;
        }
        self.entree.clear();
    }

    /// AC : entrée, résultat et réponse remis à zéro (la mémoire reste).
    pub fn tout_effacer(&mut self) {
        if !self.allumee {
            return;
        }
        self.entree.clear();
        self.resultat = "0".to_string();
        self.derniere_reponse = "0".to_string();
        self.derniere_valeur = None;
        self.resultat_affiche = false;
    }

    /// ← : une fonction entière ("sin(") ou un caractère.
    pub fn retour_arriere(&mut self) {
        if !self.allumee || self.resultat_affiche {
            return;
        }
        if let Some(f) = FONCTIONS_SAISIES.iter().find(|f| self.entree.ends_with(*f)) {
            let n = self.entree.len() - f.len();
            self.entree.truncate(n);
            return;
        }
        self.entree.pop();
    }

    /* ------------------------ Paramètres ------------------------ */

    pub fn definir_mode_angle(&mut self, mode: ModeAngle) {
        if !self.allumee {
            return;
        }
        self.mode_angle = mode;
        tracing::info!(%mode, "mode d’angle");
    }

    /// Marche/arrêt. L’extinction efface l’entrée et le résultat (M+/M− n’ont plus rien à ajouter).
    pub fn basculer_alimentation(&mut self) -> bool {
        self.allumee = !self.allumee;
        if !self.allumee {
            self.entree.clear();
            self.resultat.clear();
            self.resultat_affiche = false;
            self.derniere_valeur = None;
        }
        tracing::info!(allumee = self.allumee, "alimentation");
        self.allumee
    }

    pub fn basculer_style(&mut self) -> StyleInterface {
        self.style = self.style.bascule();
        tracing::info!(style = %self.style, "style d’interface");
        self.style
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = Valeur::entier(0);
        tracing::info!("mémoire effacée");
    }

    /// MR : ajoute la valeur mémoire à l’entrée.
    pub fn memoire_rappel(&mut self) {
        if !self.allumee {
            return;
        }
        self.repartir_si_resultat();
        let texte = format_valeur(&self.memoire);
        self.entree.push_str(&texte);
    }

    /// M+ : mémoire += dernier résultat (sans résultat : rien).
    pub fn memoire_ajouter(&mut self) {
        let Some(v) = &self.derniere_valeur else {
            return;
        };
        match self.memoire.additionner(v) {
            Ok(m) => {
                self.memoire = m;
                tracing::info!(memoire = %format_valeur(&self.memoire), "M+");
            }
            Err(e) => tracing::warn!(erreur = %e, "M+ impossible"),
        }
    }

    /// M- : mémoire -= dernier résultat (sans résultat : rien).
    pub fn memoire_soustraire(&mut self) {
        let Some(v) = &self.derniere_valeur else {
            return;
        };
        match self.memoire.soustraire(v) {
            Ok(m) => {
                self.memoire = m;
                tracing::info!(memoire = %format_valeur(&self.memoire), "M-");
            }
            Err(e) => tracing::warn!(erreur = %e, "M- impossible"),
        }
    }

    /* ------------------------ Calcul ------------------------ */

    /// "=" : évalue l’entrée dans le mode courant ; un succès devient la réponse.
    pub fn calculer(&mut self) -> Resultat {
        self.calculer_avec_demarche().0
    }

    /// Comme `calculer`, avec la trace du pipeline.
    pub fn calculer_avec_demarche(&mut self) -> (Resultat, Demarche) {
        if !self.allumee || self.entree.trim().is_empty() {
            return (Resultat::sans_expression(), Demarche::default());
        }

        let (r, d) = evaluer_avec_demarche(&self.entree, self.mode_angle);
        if r.succes {
            self.resultat = r.affichage.clone();
            self.derniere_reponse = r.affichage.clone();
            self.derniere_valeur = r.valeur.clone();
            self.resultat_affiche = true;
        } else {
            self.resultat = r.affichage.clone();
        }
        (r, d)
    }
}
