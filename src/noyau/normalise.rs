// src/noyau/normalise.rs
//
// Normaliseur : saisie “écran” -> syntaxe évaluateur.
// - glyphes -> opérateurs ASCII (via jetons)
// - % -> /100
// - log -> log10
// - parenthèses non fermées -> fermées en fin d’expression
// - mode DEG : sin(x) -> sin(rad(x)), fermeture placée à la parenthèse du sin
//
// Pur, sans erreur : une structure invalide ne se voit qu’à l’évaluation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::jetons::{format_tokens, tokenize, Tok};

/// Unité des arguments trigonométriques.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    #[serde(alias = "degres")]
    Deg,
    #[serde(alias = "radians")]
    Rad,
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAngle::Deg => write!(f, "DEG"),
            ModeAngle::Rad => write!(f, "RAD"),
        }
    }
}

impl FromStr for ModeAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degres" | "degrés" => Ok(ModeAngle::Deg),
            "rad" | "radians" => Ok(ModeAngle::Rad),
            autre => Err(format!("mode d’angle inconnu : {autre:?} (deg ou rad)")),
        }
    }
}

/// Fonction de conversion insérée en mode DEG.
pub const FONCTION_RADIANS: &str = "rad";

/// Appels trig imbriqués réécrits au plus.
const IMBRICATION_TRIG_MAX: usize = 256;

fn est_trig(name: &str) -> bool {
    matches!(name, "sin" | "cos" | "tan")
}

/// API texte : normalise une saisie pour l’évaluateur.
pub fn normaliser(expression: &str, mode: ModeAngle) -> String {
    format_tokens(&normaliser_jetons(tokenize(expression), mode))
}

/// Même chose sur des jetons déjà lus (évite un aller-retour texte dans eval.rs).
pub fn normaliser_jetons(jetons: Vec<Tok>, mode: ModeAngle) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len() + 4);

    for t in jetons {
        match t {
            Tok::Percent => {
                out.push(Tok::Slash);
                out.push(Tok::Num("100".to_string()));
            }
            Tok::Ident(name) if name == "log" => out.push(Tok::Ident("log10".to_string())),
            autre => out.push(autre),
        }
    }

    fermer_parentheses(&mut out);

    match mode {
        ModeAngle::Deg => envelopper_trig(&out),
        ModeAngle::Rad => out,
    }
}

/// Ajoute en fin les ')' manquantes. Une ')' orpheline est laissée au parseur.
fn fermer_parentheses(jetons: &mut Vec<Tok>) {
    let mut profondeur: usize = 0;
    for t in jetons.iter() {
        match t {
            Tok::LPar => profondeur += 1,
            Tok::RPar => profondeur = profondeur.saturating_sub(1),
            _ => {}
        }
    }
    jetons.extend(std::iter::repeat(Tok::RPar).take(profondeur));
}

/// Indice de la ')' qui ferme la '(' en `ouvrante`.
fn parenthese_fermante(jetons: &[Tok], ouvrante: usize) -> Option<usize> {
    let mut profondeur: usize = 0;
    for (k, t) in jetons.iter().enumerate().skip(ouvrante) {
        match t {
            Tok::LPar => profondeur += 1,
            Tok::RPar => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(k);
                }
            }
            _ => {}
        }
    }
    None
}

/// L’argument entier est déjà un appel rad(...) : ne pas ré-envelopper.
fn deja_en_radians(argument: &[Tok]) -> bool {
    matches!(argument.first(), Some(Tok::Ident(n)) if n == FONCTION_RADIANS)
        && matches!(argument.get(1), Some(Tok::LPar))
        && parenthese_fermante(argument, 1) == Some(argument.len() - 1)
}

/// sin(x) -> sin(rad(x)), récursif sur l’argument (sin(cos(30)) est enveloppé deux fois).
fn envelopper_trig(jetons: &[Tok]) -> Vec<Tok> {
    envelopper(jetons, 0)
}

fn envelopper(jetons: &[Tok], profondeur: usize) -> Vec<Tok> {
    // au-delà, le parseur refusera de toute façon l’imbrication
    if profondeur >= IMBRICATION_TRIG_MAX {
        return jetons.to_vec();
    }

    let mut out = Vec::with_capacity(jetons.len() + 6);
    let mut i = 0;

    while i < jetons.len() {
        let appel_trig = match (&jetons[i], jetons.get(i + 1)) {
            (Tok::Ident(name), Some(Tok::LPar)) if est_trig(name) => {
                parenthese_fermante(jetons, i + 1)
            }
            _ => None,
        };

        let Some(fin) = appel_trig else {
            out.push(jetons[i].clone());
            i += 1;
            continue;
        };

        let argument = &jetons[i + 2..fin];
        out.push(jetons[i].clone());
        out.push(Tok::LPar);
        if deja_en_radians(argument) {
            out.extend(envelopper(argument, profondeur + 1));
        } else {
            out.push(Tok::Ident(FONCTION_RADIANS.to_string()));
            out.push(Tok::LPar);
            out.extend(envelopper(argument, profondeur + 1));
            out.push(Tok::RPar);
        }
        out.push(Tok::RPar);
        i = fin + 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(s: &str) -> String {
        normaliser(s, ModeAngle::Deg)
    }

    fn rad(s: &str) -> String {
        normaliser(s, ModeAngle::Rad)
    }

    #[test]
    fn glyphes_arithmetiques() {
        assert_eq!(rad("6×7÷2"), "6*7/2");
        assert_eq!(rad("2^3"), "2^3");
        assert_eq!(rad("2π"), "2 pi");
        assert_eq!(rad("√(16)"), "sqrt(16)");
        assert_eq!(rad("log(100)"), "log10(100)");
    }

    #[test]
    fn pourcentage() {
        assert_eq!(rad("50%"), "50/100");
        assert_eq!(rad("200×10%"), "200*10/100");
    }

    #[test]
    fn trig_en_degres() {
        assert_eq!(deg("sin(30)"), "sin(rad(30))");
        assert_eq!(deg("sin(30)+5"), "sin(rad(30))+5");
        assert_eq!(deg("cos(60)×tan(45)"), "cos(rad(60))*tan(rad(45))");
        assert_eq!(deg("sin(cos(0))"), "sin(rad(cos(rad(0))))");
    }

    #[test]
    fn trig_en_radians_sans_conversion() {
        assert_eq!(rad("sin(π/2)"), "sin(pi/2)");
    }

    #[test]
    fn fermeture_automatique() {
        assert_eq!(rad("((2+3)×4"), "((2+3)*4)");
        assert_eq!(deg("sin(30"), "sin(rad(30))");
        // ')' orpheline : laissée telle quelle
        assert_eq!(rad("2)"), "2)");
    }

    #[test]
    fn idempotence() {
        for s in ["sin(30)+5", "sin(cos(30", "tan(rad(45)+1)", "50%+sin()", "2)+sin(1"] {
            let une = deg(s);
            assert_eq!(deg(&une), une, "s={s:?}");
            let une = rad(s);
            assert_eq!(rad(&une), une, "s={s:?}");
        }
    }

    #[test]
    fn mode_angle_depuis_texte() {
        assert_eq!("DEG".parse::<ModeAngle>(), Ok(ModeAngle::Deg));
        assert_eq!("radians".parse::<ModeAngle>(), Ok(ModeAngle::Rad));
        assert!("grad".parse::<ModeAngle>().is_err());
    }
}
