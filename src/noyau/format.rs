// src/noyau/format.rs
//
// Affichage du résultat (écran de la calculatrice).
// - entier (exact ou f64 entier) : tous les chiffres, sans partie décimale ("5", "999999998000000001")
// - sinon : 10 chiffres significatifs, style %g ("0.5", "0.3333333333", "6.123233996e-17")

use super::valeur::Valeur;

/// Marqueur fixe affiché à l’écran en cas d’échec.
pub const MARQUEUR_ERREUR: &str = "Error";

/// Chiffres significatifs pour un résultat non entier.
pub const CHIFFRES_SIGNIFICATIFS: usize = 10;

pub fn format_valeur(v: &Valeur) -> String {
    match v {
        Valeur::Exacte(r) if r.is_integer() => r.to_integer().to_string(),
        Valeur::Exacte(_) => format_g(v.en_f64(), CHIFFRES_SIGNIFICATIFS),
        Valeur::Approchee(x) => format_f64(*x),
    }
}

fn format_f64(x: f64) -> String {
    if x == 0.0 {
        // pas de "-0"
        return "0".to_string();
    }
    if x.is_finite() && x.fract() == 0.0 {
        return format!("{x:.0}");
    }
    format_g(x, CHIFFRES_SIGNIFICATIFS)
}

/// Équivalent de printf("%.{sig}g") : notation fixe si -4 <= exposant < sig,
/// scientifique sinon ; zéros de fin retirés.
pub fn format_g(x: f64, sig: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }

    let sig = sig.max(1);
    // l’exposant est celui APRÈS arrondi (9.99999999999 -> 1.000000000e1)
    let sci = format!("{:.*e}", sig - 1, x);
    let (mantisse, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= sig as i32 {
        let m = retirer_zeros(mantisse);
        let signe = if exp < 0 { '-' } else { '+' };
        return format!("{m}e{signe}{:02}", exp.unsigned_abs());
    }

    let decimales = (sig as i32 - 1 - exp).max(0) as usize;
    retirer_zeros(&format!("{x:.decimales$}")).to_string()
}

fn retirer_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
