//! src/app/visage.rs
//!
//! Visage arcade : humeur + bulle, en réaction aux calculs, erreurs et touches.
//!
//! Tables statiques uniquement. Le choix du glyphe tourne dans la table de l’humeur
//! (déterministe : même suite d’événements => mêmes visages).

use crate::noyau::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Humeur {
    Content,
    TresContent,
    Triste,
    Surpris,
    Perplexe,
    Pensif,
    Excite,
    Erreur,
    Cool,
    Clin,
}

impl Humeur {
    pub fn glyphes(self) -> &'static [&'static str] {
        match self {
            Humeur::Content => &["^‿^", "^_^", "◕‿◕"],
            Humeur::TresContent => &["ʘ‿ʘ", "≧◡≦", "◠‿◠"],
            Humeur::Triste => &["°︵°", "◡﹏◡", "ಥ︵ಥ"],
            Humeur::Surpris => &["O_O", "⊙.⊙", "Σ(°□°)"],
            Humeur::Perplexe => &["⊙﹏⊙", "⊙_⊙", "ఠ_ఠ"],
            Humeur::Pensif => &["•̀ᴗ•́", "¬_¬"],
            Humeur::Excite => &["✧◝(⁰▿⁰)◜✧", "♥‿♥", "◕ ◡ ◕"],
            Humeur::Erreur => &["×_×", "✖_✖", "☉_☉"],
            Humeur::Cool => &["⌐■_■", "ლ(▀̿̿Ĺ̯̿̿▀̿ლ)"],
            Humeur::Clin => &["^_~", ";‿◕", ";)"],
        }
    }
}

/// Humeur + message de bulle (optionnel).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reaction {
    pub humeur: Humeur,
    pub message: Option<&'static str>,
}

const fn r(humeur: Humeur, message: &'static str) -> Reaction {
    Reaction {
        humeur,
        message: Some(message),
    }
}

const fn muet(humeur: Humeur) -> Reaction {
    Reaction {
        humeur,
        message: None,
    }
}

const ACCUEIL: Reaction = r(Humeur::Content, "Prête à calculer !");

const INACTIVES: [Reaction; 5] = [
    r(Humeur::Pensif, "Je m’ennuie..."),
    r(Humeur::Content, "Besoin d’aide ?"),
    r(Humeur::Clin, "Essaie pi !"),
    r(Humeur::Cool, "Les maths, c’est génial !"),
    r(Humeur::Perplexe, "Des questions ?"),
];

/// Réaction à un résultat affiché.
///
/// Valeurs remarquables d’abord, puis seuils (le plus grand en premier).
pub fn reagir_resultat(affichage: &str) -> Reaction {
    let Ok(x) = affichage.parse::<f64>() else {
        return if affichage == crate::noyau::format::MARQUEUR_ERREUR {
            r(Humeur::Erreur, "Oups !")
        } else {
            muet(Humeur::Perplexe)
        };
    };

    if x == 42.0 {
        r(Humeur::Cool, "La réponse !")
    } else if x == 0.0 {
        r(Humeur::Pensif, "Zéro...")
    } else if (3.14..=3.15).contains(&x) {
        r(Humeur::Content, "Mmm, pi !")
    } else if x < 0.0 {
        r(Humeur::Triste, "Négatif...")
    } else if x == 69.0 || x == 420.0 {
        r(Humeur::Clin, "Joli.")
    } else if x == 8008.0 || x == 80085.0 {
        r(Humeur::Clin, "Très mature...")
    } else if x == 666.0 {
        r(Humeur::Cool, "Diabolique !")
    } else if x == 1337.0 {
        r(Humeur::Cool, "Leet !")
    } else if x > 1_000_000.0 {
        r(Humeur::Excite, "Nombre énorme !")
    } else if x > 9000.0 {
        r(Humeur::Surpris, "Plus de 9000 !")
    } else if x.fract() == 0.0 {
        muet(Humeur::Content)
    } else if motif_final(x) {
        r(Humeur::Surpris, "Motif !")
    } else {
        muet(Humeur::Content)
    }
}

/// Trois derniers caractères identiques ("0.3333333333").
fn motif_final(x: f64) -> bool {
    let s = x.to_string();
    let fin: Vec<char> = s.chars().rev().take(3).collect();
    fin.len() == 3 && fin.iter().all(|c| *c == fin[0])
}

/// Réaction à un échec (`None` : rien à calculer).
pub fn reagir_erreur(erreur: Option<&ErreurCalcul>) -> Reaction {
    match erreur {
        Some(ErreurCalcul::DivisionParZero) => r(Humeur::Erreur, "Impossible de diviser par 0 !"),
        Some(ErreurCalcul::Syntaxe(_)) => r(Humeur::Perplexe, "Je ne comprends pas !"),
        Some(e) if e.est_depassement() => r(Humeur::Surpris, "Trop grand !"),
        Some(_) => r(Humeur::Erreur, "Erreur !"),
        None => muet(Humeur::Perplexe),
    }
}

pub fn reagir_alimentation(allumee: bool) -> Reaction {
    if allumee {
        r(Humeur::Excite, "Bonjour !")
    } else {
        r(Humeur::Triste, "Au revoir !")
    }
}

/// Forme canonique d’une touche ("*" -> "×", "pi" -> "π" …).
fn touche_canonique(touche: &str) -> &str {
    match touche {
        "*" => "×",
        "/" => "÷",
        "sqrt" | "sqrt(" => "√",
        "pi" => "π",
        "sin(" => "sin",
        "cos(" => "cos",
        "tan(" => "tan",
        "del" | "⌫" => "←",
        autre => autre,
    }
}

fn reaction_touche(touche: &str) -> Option<Reaction> {
    Some(match touche {
        "+" => r(Humeur::Content, "On additionne !"),
        "-" => r(Humeur::Pensif, "On soustrait..."),
        "×" => r(Humeur::Excite, "On multiplie !"),
        "÷" => r(Humeur::Pensif, "On divise..."),
        "=" => r(Humeur::TresContent, "Et voilà !"),
        "C" => r(Humeur::Triste, "On efface..."),
        "AC" => r(Humeur::Surpris, "Tout est parti !"),
        "^" => r(Humeur::Excite, "Puissance !"),
        "√" => r(Humeur::Cool, "À la racine !"),
        "%" => r(Humeur::Pensif, "Pourcent !"),
        "sin" => r(Humeur::Pensif, "Sinusoïde~"),
        "cos" => r(Humeur::Pensif, "Cosinus !"),
        "tan" => r(Humeur::Pensif, "Tangente !"),
        "π" => r(Humeur::Content, "L’heure de pi !"),
        "←" => r(Humeur::Pensif, "Retour !"),
        _ => return None,
    })
}

fn reaction_serie(touche: &str) -> Option<Reaction> {
    Some(match touche {
        "+" => r(Humeur::Excite, "Frénésie d’additions !"),
        "×" => r(Humeur::Excite, "Folie des multiplications !"),
        "-" => r(Humeur::Perplexe, "Beaucoup de soustractions ?"),
        "÷" => r(Humeur::Surpris, "Série de divisions !"),
        "=" => r(Humeur::Perplexe, "Arrête d’appuyer sur = !"),
        _ => return None,
    })
}

/// État du visage : série de touches identiques + rotation des glyphes.
#[derive(Clone, Debug, Default)]
pub struct Visage {
    derniere_touche: Option<String>,
    serie: u32,
    tour: usize,
    inactif: usize,
}

impl Visage {
    pub fn accueil(&self) -> Reaction {
        ACCUEIL
    }

    /// Réaction à une touche ; à partir de la troisième pression identique, réaction de série.
    pub fn reagir_operation(&mut self, touche: &str) -> Option<Reaction> {
        let touche = touche_canonique(touche);
        if self.derniere_touche.as_deref() == Some(touche) {
            self.serie += 1;
        } else {
            self.serie = 1;
            self.derniere_touche = Some(touche.to_string());
        }

        if self.serie > 2 {
            if let Some(s) = reaction_serie(touche) {
                return Some(s);
            }
        }
        reaction_touche(touche)
    }

    pub fn reaction_inactive(&mut self) -> Reaction {
        let rr = INACTIVES[self.inactif % INACTIVES.len()];
        self.inactif += 1;
        rr
    }

    /// Glyphe suivant pour cette humeur.
    pub fn glyphe(&mut self, humeur: Humeur) -> &'static str {
        let g = humeur.glyphes();
        let choix = g[self.tour % g.len()];
        self.tour += 1;
        choix
    }

    /// Ligne affichable : "^_^  La réponse !"
    pub fn rendre(&mut self, reaction: Reaction) -> String {
        let g = self.glyphe(reaction.humeur);
        match reaction.message {
            Some(m) => format!("{g}  {m}"),
            None => g.to_string(),
        }
    }
}
