// src/noyau/trig.rs
//
// Trig spéciale en degrés (angles “exactement reconnus”) pour sin/cos/tan
// ----------------------------------------------------------------------
// - Entrée : angle rationnel exact, en degrés (argument de rad(...))
// - Réduction modulo période (sin/cos: 360 ; tan: 180)
// - Table limitée aux valeurs rationnelles : 0, ±1/2, ±1, et tan indéfini
//
// Hors table : None, l’appelant calcule en f64.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrigOutcome {
    Valeur(BigRational, String),
    Indefini(String),
}

/// Reconnaît les angles spéciaux (en degrés) dont le sinus/cosinus/tangente est rationnel.
///
/// Retour:
/// - Some(Valeur(r, preuve)) si reconnu
/// - Some(Indefini(preuve)) pour tan(90° + k·180°)
/// - None si non reconnu
pub fn trig_degres(degres: &BigRational, f: TrigFn) -> Option<TrigOutcome> {
    let periode = match f {
        TrigFn::Sin | TrigFn::Cos => 360,
        TrigFn::Tan => 180,
    };

    let reduit = reduire_modulo(degres, periode);
    if !reduit.is_integer() {
        return None;
    }
    let a = reduit.to_integer().to_i64()?;

    let rat = |n: i64, d: i64| BigRational::new(BigInt::from(n), BigInt::from(d));
    let preuve = |txt: &str| format!("{}({}°) = {txt}", f.nom(), degres);

    let out = match f {
        TrigFn::Sin => match a {
            0 | 180 => TrigOutcome::Valeur(rat(0, 1), preuve("0")),
            30 | 150 => TrigOutcome::Valeur(rat(1, 2), preuve("1/2")),
            90 => TrigOutcome::Valeur(rat(1, 1), preuve("1")),
            210 | 330 => TrigOutcome::Valeur(rat(-1, 2), preuve("-1/2")),
            270 => TrigOutcome::Valeur(rat(-1, 1), preuve("-1")),
            _ => return None,
        },

        TrigFn::Cos => match a {
            0 => TrigOutcome::Valeur(rat(1, 1), preuve("1")),
            60 | 300 => TrigOutcome::Valeur(rat(1, 2), preuve("1/2")),
            90 | 270 => TrigOutcome::Valeur(rat(0, 1), preuve("0")),
            120 | 240 => TrigOutcome::Valeur(rat(-1, 2), preuve("-1/2")),
            180 => TrigOutcome::Valeur(rat(-1, 1), preuve("-1")),
            _ => return None,
        },

        TrigFn::Tan => match a {
            0 => TrigOutcome::Valeur(rat(0, 1), preuve("0")),
            45 => TrigOutcome::Valeur(rat(1, 1), preuve("1")),
            90 => TrigOutcome::Indefini(preuve("indéfini")),
            135 => TrigOutcome::Valeur(rat(-1, 1), preuve("-1")),
            _ => return None,
        },
    };

    Some(out)
}

/// r mod p, dans [0, p).
fn reduire_modulo(r: &BigRational, periode: i64) -> BigRational {
    let p = BigRational::from_integer(BigInt::from(periode));
    let q = (r / &p).floor();
    r - q * p
}
