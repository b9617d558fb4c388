// src/noyau/valeur.rs
//
// Valeur calculée : exacte (rationnel) tant que possible, sinon f64.
//
// Règles:
// - Exacte ∘ Exacte reste Exacte pour + - * /, et ^ entier, tant que la taille est bornée
// - au-delà de la borne, ou dès qu’un opérande est Approchee, le calcul passe en f64
// - un f64 non fini n’est jamais renvoyé : dépassement => erreur
// - un rationnel non entier s’affiche via f64 : il doit donc y rester fini

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::{ErreurCalcul, MSG_DEPASSEMENT};

/// Garde-fou anti-gel : taille maximale (numérateur + dénominateur, en bits) d’un rationnel
/// exact. Environ 9 800 chiffres : le calcul et l’affichage restent immédiats.
const BITS_EXACTS_MAX: u64 = 32_768;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Exacte(BigRational),
    Approchee(f64),
}

impl Valeur {
    pub fn entier(n: i64) -> Self {
        Valeur::Exacte(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn en_f64(&self) -> f64 {
        match self {
            Valeur::Exacte(r) => rationnel_en_f64(r),
            Valeur::Approchee(x) => *x,
        }
    }

    pub fn est_nulle(&self) -> bool {
        match self {
            Valeur::Exacte(r) => r.is_zero(),
            Valeur::Approchee(x) => *x == 0.0,
        }
    }

    pub fn est_entiere(&self) -> bool {
        match self {
            Valeur::Exacte(r) => r.is_integer(),
            Valeur::Approchee(x) => x.is_finite() && x.fract() == 0.0,
        }
    }

    pub fn additionner(&self, autre: &Valeur) -> Result<Valeur, ErreurCalcul> {
        match (self, autre) {
            (Valeur::Exacte(a), Valeur::Exacte(b)) => exacte(a + b),
            _ => approchee(self.en_f64() + autre.en_f64()),
        }
    }

    pub fn soustraire(&self, autre: &Valeur) -> Result<Valeur, ErreurCalcul> {
        match (self, autre) {
            (Valeur::Exacte(a), Valeur::Exacte(b)) => exacte(a - b),
            _ => approchee(self.en_f64() - autre.en_f64()),
        }
    }

    pub fn multiplier(&self, autre: &Valeur) -> Result<Valeur, ErreurCalcul> {
        match (self, autre) {
            (Valeur::Exacte(a), Valeur::Exacte(b)) => exacte(a * b),
            _ => approchee(self.en_f64() * autre.en_f64()),
        }
    }

    pub fn diviser(&self, autre: &Valeur) -> Result<Valeur, ErreurCalcul> {
        if autre.est_nulle() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        match (self, autre) {
            (Valeur::Exacte(a), Valeur::Exacte(b)) => exacte(a / b),
            _ => approchee(self.en_f64() / autre.en_f64()),
        }
    }

    pub fn puissance(&self, exposant: &Valeur) -> Result<Valeur, ErreurCalcul> {
        // 0^-n : division par zéro (exacte ou non)
        if self.est_nulle() && exposant.en_f64() < 0.0 {
            return Err(ErreurCalcul::DivisionParZero);
        }

        if let (Valeur::Exacte(base), Valeur::Exacte(e)) = (self, exposant) {
            if let Some(n) = exposant_entier_borne(base, e) {
                return exacte(rational_pow_int(base.clone(), n));
            }
        }

        let b = self.en_f64();
        let e = exposant.en_f64();
        if b < 0.0 && e.fract() != 0.0 {
            return Err(ErreurCalcul::evaluation(
                "résultat complexe (base négative, exposant non entier)",
            ));
        }
        approchee(b.powf(e))
    }
}

/// Rationnel -> Valeur. Trop grand : repli f64 (qui déborde le plus souvent).
/// Non entier hors de portée de f64 : dépassement, il ne serait pas affichable.
pub fn exacte(r: BigRational) -> Result<Valeur, ErreurCalcul> {
    if r.numer().bits() + r.denom().bits() > BITS_EXACTS_MAX {
        return approchee(rationnel_en_f64(&r));
    }
    if !r.is_integer() && !rationnel_en_f64(&r).is_finite() {
        return Err(ErreurCalcul::evaluation(MSG_DEPASSEMENT));
    }
    Ok(Valeur::Exacte(r))
}

/// f64 -> Valeur, en refusant inf / NaN.
pub fn approchee(x: f64) -> Result<Valeur, ErreurCalcul> {
    if x.is_finite() {
        Ok(Valeur::Approchee(x))
    } else {
        Err(ErreurCalcul::evaluation(MSG_DEPASSEMENT))
    }
}

/// Exposant exact utilisable : entier, et résultat de taille raisonnable.
fn exposant_entier_borne(base: &BigRational, e: &BigRational) -> Option<i64> {
    if !e.is_integer() {
        return None;
    }
    let n = e.to_integer().to_i64()?;
    let bits_base = base.numer().bits() + base.denom().bits();
    let bits = bits_base.saturating_mul(n.unsigned_abs());
    if bits > BITS_EXACTS_MAX {
        return None;
    }
    Some(n)
}

fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp < 0 {
        return BigRational::one() / rational_pow_int(base, -exp);
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/// Rationnel -> f64 sans passer par inf/inf pour les grands numérateurs/dénominateurs.
pub fn rationnel_en_f64(r: &BigRational) -> f64 {
    let n = r.numer();
    let d = r.denom();
    if let (Some(nf), Some(df)) = (n.to_f64(), d.to_f64()) {
        if nf.is_finite() && df.is_finite() {
            return nf / df;
        }
    }

    // Réduit les deux termes du même décalage : le quotient garde ses ~53 bits utiles.
    let decalage = n.bits().max(d.bits()).saturating_sub(1000);
    let signe = if n.is_negative() { -1.0 } else { 1.0 };
    let na = (n.abs() >> decalage).to_f64().unwrap_or(f64::INFINITY);
    let da = (d >> decalage).to_f64().unwrap_or(f64::INFINITY);
    if da == 0.0 {
        return signe * f64::INFINITY;
    }
    signe * (na / da)
}
