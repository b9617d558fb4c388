//! src/app/console.rs
//!
//! Façade ligne à ligne : une ligne de texte est saisie puis calculée,
//! une ligne “:commande” pilote la session (touches de la calculatrice).
//!
//! Style arcade : visage + bulle sous le résultat. Style minimal : résultat seul.

use std::io::{self, BufRead, Write};

use super::etat::{Session, StyleInterface};
use super::visage::{self, Visage};
use crate::noyau::{Demarche, ModeAngle, Resultat};

const AIDE: &str = "\
Tapez une expression puis Entrée (ligne vide : recalcul de l’entrée en cours).
  :deg / :rad     mode d’angle
  :c / :ac        effacer l’entrée / tout effacer
  :del            retour arrière
  :mc :mr :m+ :m- mémoire
  :ans            insérer la dernière réponse
  :style          arcade <-> minimal
  :alim           marche / arrêt
  :demarche       afficher la démarche (normalisé, arbre, preuve)
  :aide           cette aide
  :q              quitter";

pub struct Console {
    pub session: Session,
    visage: Visage,
    pub demarche: bool,
}

impl Console {
    pub fn new(session: Session, demarche: bool) -> Self {
        Self {
            session,
            visage: Visage::default(),
            demarche,
        }
    }

    fn arcade(&self) -> bool {
        self.session.style == StyleInterface::Arcade
    }

    /// Ligne d’accueil affichée au démarrage.
    pub fn accueil(&mut self) -> String {
        let mut s = format!("Calculatrice arcade [{}]", self.session.mode_angle);
        if self.arcade() {
            let r = self.visage.accueil();
            s.push('\n');
            s.push_str(&self.visage.rendre(r));
        }
        s
    }

    pub fn invite(&self) -> String {
        if self.session.allumee {
            format!("[{}] > ", self.session.mode_angle)
        } else {
            "[----] > ".to_string()
        }
    }

    /// Traite une ligne. `None` : fin de session.
    pub fn traiter_ligne(&mut self, ligne: &str) -> Option<String> {
        let ligne = ligne.trim();
        if let Some(cmd) = ligne.strip_prefix(':') {
            return self.commande(cmd.trim());
        }

        if !self.session.allumee {
            return Some("(éteinte : :alim pour allumer)".to_string());
        }
        match ligne.chars().next() {
            None => {}
            // nom, '(' ou glyphe de fonction : touche “fonction”, nouvelle saisie après un résultat
            Some(c) if c.is_alphabetic() || matches!(c, '(' | 'π' | '√') => {
                self.session.inserer_fonction(ligne)
            }
            Some(_) => self.session.inserer_texte(ligne),
        }
        Some(self.calculer())
    }

    fn calculer(&mut self) -> String {
        let (r, d) = self.session.calculer_avec_demarche();
        let mut s = self.ecran(&r);

        if self.arcade() {
            let reaction = if r.succes {
                visage::reagir_resultat(&r.affichage)
            } else {
                visage::reagir_erreur(r.erreur.as_ref())
            };
            s.push('\n');
            s.push_str(&self.visage.rendre(reaction));
        }

        if self.demarche && !d.normalise.is_empty() {
            s.push_str(&rendre_demarche(&d));
        }

        // après un échec, la saisie repart de zéro
        if !r.succes {
            self.session.effacer();
        }
        s
    }

    fn ecran(&self, r: &Resultat) -> String {
        if r.succes {
            format!("= {}", r.affichage)
        } else if r.affichage.is_empty() {
            format!("({})", r.message_erreur)
        } else {
            format!("{} : {}", r.affichage, r.message_erreur)
        }
    }

    fn commande(&mut self, cmd: &str) -> Option<String> {
        let s = &mut self.session;
        let sortie = match cmd {
            "q" | "quit" | "quitter" => return None,
            "aide" | "h" | "?" => AIDE.to_string(),

            "deg" => {
                s.definir_mode_angle(ModeAngle::Deg);
                format!("mode {}", s.mode_angle)
            }
            "rad" => {
                s.definir_mode_angle(ModeAngle::Rad);
                format!("mode {}", s.mode_angle)
            }

            "c" => {
                s.effacer();
                return Some(self.avec_touche("C", String::new()));
            }
            "ac" => {
                s.tout_effacer();
                let ecran = s.resultat.clone();
                return Some(self.avec_touche("AC", ecran));
            }
            "del" => {
                s.retour_arriere();
                let ecran = s.entree.clone();
                return Some(self.avec_touche("←", ecran));
            }

            "mc" => {
                s.memoire_effacer();
                "M = 0".to_string()
            }
            "mr" => {
                s.memoire_rappel();
                s.entree.clone()
            }
            "m+" => {
                s.memoire_ajouter();
                format!("M = {}", crate::noyau::format_valeur(s.memoire()))
            }
            "m-" => {
                s.memoire_soustraire();
                format!("M = {}", crate::noyau::format_valeur(s.memoire()))
            }
            "ans" => {
                s.inserer_reponse();
                s.entree.clone()
            }

            "style" => format!("style {}", s.basculer_style()),
            "alim" => {
                let allumee = s.basculer_alimentation();
                let etat = if allumee { "allumée" } else { "éteinte" };
                let mut sortie = etat.to_string();
                if self.arcade() {
                    sortie.push('\n');
                    sortie.push_str(&self.visage.rendre(visage::reagir_alimentation(allumee)));
                }
                sortie
            }
            "demarche" => {
                self.demarche = !self.demarche;
                format!("démarche {}", if self.demarche { "affichée" } else { "masquée" })
            }

            autre => format!("commande inconnue : :{autre} (:aide)"),
        };
        Some(sortie)
    }

    fn avec_touche(&mut self, touche: &str, ecran: String) -> String {
        if !self.arcade() {
            return ecran;
        }
        match self.visage.reagir_operation(touche) {
            Some(r) => joindre(ecran, self.visage.rendre(r)),
            None => ecran,
        }
    }

    /// Boucle principale (stdin/stdout en pratique, tampons en test).
    pub fn executer<R: BufRead, W: Write>(&mut self, entree: R, mut sortie: W) -> io::Result<()> {
        writeln!(sortie, "{}", self.accueil())?;
        write!(sortie, "{}", self.invite())?;
        sortie.flush()?;

        for ligne in entree.lines() {
            let ligne = ligne?;
            match self.traiter_ligne(&ligne) {
                Some(texte) => {
                    if !texte.is_empty() {
                        writeln!(sortie, "{texte}")?;
                    }
                }
                None => break,
            }
            write!(sortie, "{}", self.invite())?;
            sortie.flush()?;
        }
        writeln!(sortie)?;
        Ok(())
    }
}

fn joindre(a: String, b: String) -> String {
    if a.is_empty() {
        b
    } else {
        format!("{a}\n{b}")
    }
}

fn rendre_demarche(d: &Demarche) -> String {
    let mut s = String::new();
    if !d.normalise.is_empty() {
        s.push_str(&format!("\n  normalisé : {}", d.normalise));
    }
    if !d.arbre.is_empty() {
        s.push_str(&format!("\n  arbre     : {}", d.arbre));
    }
    for ligne in d.preuve.lines() {
        s.push_str(&format!("\n  preuve    : {ligne}"));
    }
    s
}
