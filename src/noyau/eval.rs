//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> normalise (glyphes, %, DEG) -> analyse (descente récursive) -> Expr
//!        -> valeur (exacte si possible, trig spéciale en degrés) -> format
//!
//! Point de sortie unique : toute erreur devient un `Resultat` en échec, jamais une panique.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::analyse::analyser;
use super::erreur::{ErreurCalcul, MSG_DOMAINE};
use super::expr::{Constante, Expr, Fonction, Op};
use super::format::{format_valeur, MARQUEUR_ERREUR};
use super::jetons::{format_tokens, tokenize};
use super::normalise::{normaliser_jetons, ModeAngle};
use super::trig::{trig_degres, TrigFn, TrigOutcome};
use super::valeur::{approchee, exacte, Valeur};

/// Résultat d’un calcul, tel que l’écran le consomme.
///
/// Invariant : `succes` et `affichage` est un nombre formaté, ou `!succes` et
/// `message_erreur` non vide.
#[derive(Clone, Debug, PartialEq)]
pub struct Resultat {
    pub succes: bool,
    pub affichage: String,
    pub message_erreur: String,
    pub valeur: Option<Valeur>,
    pub erreur: Option<ErreurCalcul>,
}

impl Resultat {
    pub fn reussi(v: Valeur) -> Self {
        Self {
            succes: true,
            affichage: format_valeur(&v),
            message_erreur: String::new(),
            valeur: Some(v),
            erreur: None,
        }
    }

    pub fn echec(e: ErreurCalcul) -> Self {
        Self {
            succes: false,
            affichage: MARQUEUR_ERREUR.to_string(),
            message_erreur: e.to_string(),
            valeur: None,
            erreur: Some(e),
        }
    }

    /// Rien à calculer (entrée vide, calculatrice éteinte) : écran laissé vide.
    pub fn sans_expression() -> Self {
        Self {
            succes: false,
            affichage: String::new(),
            message_erreur: "aucune expression à calculer".to_string(),
            valeur: None,
            erreur: None,
        }
    }
}

/// Trace du pipeline (panneau “démarche”).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub normalise: String,
    pub arbre: String,
    pub preuve: String,
}

/// API publique : évalue une expression “écran” dans le mode d’angle donné.
pub fn evaluer(expression: &str, mode: ModeAngle) -> Resultat {
    evaluer_avec_demarche(expression, mode).0
}

/// Comme `evaluer`, avec la trace (normalisé, arbre, preuves trig exactes).
pub fn evaluer_avec_demarche(expression: &str, mode: ModeAngle) -> (Resultat, Demarche) {
    let mut d = Demarche::default();
    let resultat = match calculer(expression, mode, &mut d) {
        Ok(v) => Resultat::reussi(v),
        Err(e) => {
            tracing::debug!(expression, erreur = %e, "échec du calcul");
            Resultat::echec(e)
        }
    };
    (resultat, d)
}

fn calculer(expression: &str, mode: ModeAngle, d: &mut Demarche) -> Result<Valeur, ErreurCalcul> {
    let s = expression.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let jetons = normaliser_jetons(tokenize(s), mode);
    d.normalise = format_tokens(&jetons);
    tracing::debug!(expression = s, normalise = %d.normalise, %mode, "évaluation");

    let arbre = analyser(&jetons)?;
    d.arbre = arbre.to_string();

    valeur(&arbre, &mut d.preuve)
}

fn push_preuve(preuve: &mut String, ligne: &str) {
    if ligne.is_empty() {
        return;
    }
    if !preuve.is_empty() {
        preuve.push('\n');
    }
    preuve.push_str(ligne);
}

/// Évaluation directe de l’arbre.
///
/// Les chaînes “a + b + c …” penchent à gauche : leur colonne gauche est parcourue
/// en boucle, la récursion ne suit que les opérandes droits (bornés par l’analyse).
fn valeur(e: &Expr, preuve: &mut String) -> Result<Valeur, ErreurCalcul> {
    match e {
        Expr::Nombre(r) => exacte(r.clone()),
        Expr::Constante(Constante::Pi) => Ok(Valeur::Approchee(std::f64::consts::PI)),
        Expr::Constante(Constante::E) => Ok(Valeur::Approchee(std::f64::consts::E)),

        Expr::Binaire(..) => {
            let (feuille, droites) = e.colonne_gauche();
            let mut acc = valeur(feuille, preuve)?;
            for (op, b) in droites.into_iter().rev() {
                let vb = valeur(b, preuve)?;
                acc = operation(op, &acc, &vb)?;
            }
            Ok(acc)
        }

        Expr::Fonction(Fonction::Sin, x) => trig(TrigFn::Sin, x, preuve),
        Expr::Fonction(Fonction::Cos, x) => trig(TrigFn::Cos, x, preuve),
        Expr::Fonction(Fonction::Tan, x) => trig(TrigFn::Tan, x, preuve),

        Expr::Fonction(Fonction::Sqrt, x) => racine(&valeur(x, preuve)?),
        Expr::Fonction(Fonction::Log10, x) => log10(&valeur(x, preuve)?),
        Expr::Fonction(Fonction::Rad, x) => radians(&valeur(x, preuve)?),
    }
}

fn operation(op: Op, a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match op {
        Op::Add => a.additionner(b),
        Op::Sub => a.soustraire(b),
        Op::Mul => a.multiplier(b),
        Op::Div => a.diviser(b),
        Op::Pow => a.puissance(b),
    }
}

fn radians(degres: &Valeur) -> Result<Valeur, ErreurCalcul> {
    if degres.est_nulle() {
        return Ok(Valeur::entier(0));
    }
    approchee(degres.en_f64().to_radians())
}

/// sin/cos/tan. Argument rad(degrés exacts) : table des angles remarquables d’abord.
fn trig(f: TrigFn, x: &Expr, preuve: &mut String) -> Result<Valeur, ErreurCalcul> {
    let angle = match x {
        Expr::Fonction(Fonction::Rad, degres) => {
            let v = valeur(degres, preuve)?;
            if let Valeur::Exacte(d) = &v {
                match trig_degres(d, f) {
                    Some(TrigOutcome::Valeur(r, p)) => {
                        push_preuve(preuve, &p);
                        return Ok(Valeur::Exacte(r));
                    }
                    Some(TrigOutcome::Indefini(p)) => {
                        push_preuve(preuve, &p);
                        return Err(ErreurCalcul::evaluation(p));
                    }
                    None => {}
                }
            }
            radians(&v)?
        }
        autre => valeur(autre, preuve)?,
    };

    let a = angle.en_f64();
    let y = match f {
        TrigFn::Sin => a.sin(),
        TrigFn::Cos => a.cos(),
        TrigFn::Tan => a.tan(),
    };
    approchee(y)
}

fn racine(v: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match v {
        Valeur::Exacte(r) if r.is_negative() => Err(ErreurCalcul::evaluation(MSG_DOMAINE)),
        Valeur::Exacte(r) => match rational_sqrt_exact(r) {
            Some(s) => Ok(Valeur::Exacte(s)),
            None => approchee(v.en_f64().sqrt()),
        },
        Valeur::Approchee(x) if *x < 0.0 => Err(ErreurCalcul::evaluation(MSG_DOMAINE)),
        Valeur::Approchee(x) => approchee(x.sqrt()),
    }
}

fn log10(v: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let positif = match v {
        Valeur::Exacte(r) => r.is_positive(),
        Valeur::Approchee(x) => *x > 0.0,
    };
    if !positif {
        return Err(ErreurCalcul::evaluation(MSG_DOMAINE));
    }
    if let Valeur::Exacte(r) = v {
        if let Some(k) = exposant_de_dix(r) {
            return Ok(Valeur::entier(k));
        }
    }
    approchee(v.en_f64().log10())
}

/// 10^k (k entier relatif) -> Some(k).
fn exposant_de_dix(r: &BigRational) -> Option<i64> {
    fn puissance_dix(n: &BigInt) -> Option<i64> {
        let s = n.to_string();
        let zeros = s.strip_prefix('1')?;
        if zeros.chars().all(|c| c == '0') {
            Some(zeros.len() as i64)
        } else {
            None
        }
    }

    if r.denom().is_one() {
        return puissance_dix(r.numer());
    }
    if r.numer().is_one() {
        return puissance_dix(r.denom()).map(|k| -k);
    }
    None
}

fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    let sn = int_sqrt_exact(r.numer())?;
    let sd = int_sqrt_exact(r.denom())?;
    Some(BigRational::new(sn, sd))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    if x.is_zero() {
        return Some(BigInt::zero());
    }
    let s = x.sqrt();
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}
