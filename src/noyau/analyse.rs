// src/noyau/analyse.rs
//
// Descente récursive : jetons normalisés -> Expr.
//
// Grammaire (précédence croissante) :
//   somme     := produit (('+' | '-') produit)*
//   produit   := unaire (('*' | '/') unaire | <implicite> puissance)*
//   unaire    := ('-' | '+') unaire | puissance
//   puissance := primaire ('^' unaire)?          (associative à droite)
//   primaire  := nombre | pi | e | fonction '(' somme ')' | '(' somme ')'
//
// Multiplication implicite seulement devant un nom ou '(' : 2π, 2(3), 2sin(30).
// "2 3" reste une erreur.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreur::ErreurCalcul;
use super::expr::{Constante, Expr, Fonction, Op};
use super::jetons::{texte_jeton, Tok};

/// Garde-fou pile : au-delà, on refuse plutôt que de risquer un débordement.
const PROFONDEUR_MAX: usize = 256;

/// Garde-fou taille : nombre de noeuds de l’arbre.
const NOEUDS_MAX: usize = 4096;

/// Garde-fou exposant décimal (1e99999 ne doit pas allouer un entier géant).
const EXPOSANT_DECIMAL_MAX: u32 = 4096;

pub fn analyser(jetons: &[Tok]) -> Result<Expr, ErreurCalcul> {
    if jetons.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let mut a = Analyseur {
        jetons,
        pos: 0,
        profondeur: 0,
        noeuds: 0,
    };
    let e = a.somme()?;

    match a.courant() {
        None => Ok(e),
        Some(t) => Err(jeton_inattendu(t)),
    }
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    profondeur: usize,
    noeuds: usize,
}

impl<'a> Analyseur<'a> {
    fn courant(&self) -> Option<&'a Tok> {
        self.jetons.get(self.pos)
    }

    fn avancer(&mut self) -> Option<&'a Tok> {
        let t = self.jetons.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn entrer(&mut self) -> Result<(), ErreurCalcul> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::syntaxe("expression trop imbriquée"));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    fn noeud(&mut self) -> Result<(), ErreurCalcul> {
        self.noeuds += 1;
        if self.noeuds > NOEUDS_MAX {
            return Err(ErreurCalcul::syntaxe("expression trop longue"));
        }
        Ok(())
    }

    fn somme(&mut self) -> Result<Expr, ErreurCalcul> {
        let mut gauche = self.produit()?;
        loop {
            let op = match self.courant() {
                Some(Tok::Plus) => Op::Add,
                Some(Tok::Minus) => Op::Sub,
                _ => return Ok(gauche),
            };
            self.pos += 1;
            self.noeud()?;
            let droite = self.produit()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
    }

    fn produit(&mut self) -> Result<Expr, ErreurCalcul> {
        let mut gauche = self.unaire()?;
        loop {
            if matches!(
                self.courant(),
                Some(Tok::Star | Tok::Slash | Tok::Pi | Tok::Ident(_) | Tok::LPar)
            ) {
                self.noeud()?;
            }
            let droite = match self.courant() {
                Some(Tok::Star) => {
                    self.pos += 1;
                    self.unaire()?
                }
                Some(Tok::Slash) => {
                    self.pos += 1;
                    let d = self.unaire()?;
                    gauche = Expr::binaire(Op::Div, gauche, d);
                    continue;
                }
                // implicite : 2π, 2(3), 2sin(30)
                Some(Tok::Pi) | Some(Tok::Ident(_)) | Some(Tok::LPar) => self.puissance()?,
                _ => return Ok(gauche),
            };
            gauche = Expr::binaire(Op::Mul, gauche, droite);
        }
    }

    fn unaire(&mut self) -> Result<Expr, ErreurCalcul> {
        match self.courant() {
            Some(Tok::Minus) => {
                self.pos += 1;
                self.noeud()?;
                self.entrer()?;
                let x = self.unaire();
                self.sortir();
                Ok(Expr::oppose(x?))
            }
            Some(Tok::Plus) => {
                self.pos += 1;
                self.entrer()?;
                let x = self.unaire();
                self.sortir();
                x
            }
            _ => self.puissance(),
        }
    }

    fn puissance(&mut self) -> Result<Expr, ErreurCalcul> {
        let base = self.primaire()?;
        if !matches!(self.courant(), Some(Tok::Caret)) {
            return Ok(base);
        }
        self.pos += 1;
        self.noeud()?;
        self.entrer()?;
        let exposant = self.unaire();
        self.sortir();
        Ok(Expr::binaire(Op::Pow, base, exposant?))
    }

    fn primaire(&mut self) -> Result<Expr, ErreurCalcul> {
        let Some(t) = self.avancer() else {
            return Err(ErreurCalcul::syntaxe("fin d’expression inattendue"));
        };

        match t {
            Tok::Num(texte) => Ok(Expr::Nombre(lire_nombre(texte)?)),
            Tok::Pi => Ok(Expr::Constante(Constante::Pi)),
            Tok::Ident(name) if name == "e" => Ok(Expr::Constante(Constante::E)),
            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(name)
                    .ok_or_else(|| ErreurCalcul::syntaxe(format!("nom inconnu : {name}")))?;
                if !matches!(self.avancer(), Some(Tok::LPar)) {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "'(' attendue après {name}"
                    )));
                }
                self.noeud()?;
                let x = self.groupe()?;
                Ok(Expr::fonction(f, x))
            }
            Tok::LPar => self.groupe(),
            autre => Err(jeton_inattendu(autre)),
        }
    }

    /// Contenu d’une parenthèse déjà ouverte, jusqu’à sa ')'.
    fn groupe(&mut self) -> Result<Expr, ErreurCalcul> {
        self.entrer()?;
        let x = self.somme();
        self.sortir();
        let x = x?;
        match self.avancer() {
            Some(Tok::RPar) => Ok(x),
            Some(autre) => Err(jeton_inattendu(autre)),
            None => Err(ErreurCalcul::syntaxe("')' manquante")),
        }
    }
}

fn jeton_inattendu(t: &Tok) -> ErreurCalcul {
    match t {
        Tok::Inconnu(c) => ErreurCalcul::syntaxe(format!("caractère inattendu : '{c}'")),
        autre => ErreurCalcul::syntaxe(format!("jeton inattendu : '{}'", texte_jeton(autre))),
    }
}

/// Littéral décimal -> rationnel exact ("2.5" -> 5/2, "1e-05" -> 1/100000).
pub fn lire_nombre(texte: &str) -> Result<BigRational, ErreurCalcul> {
    let invalide = || ErreurCalcul::syntaxe(format!("nombre invalide : {texte}"));

    let (mantisse, exposant) = match texte.find(|c: char| c == 'e' || c == 'E') {
        Some(k) => (&texte[..k], Some(&texte[k + 1..])),
        None => (texte, None),
    };

    let (entier, fraction) = match mantisse.split_once('.') {
        Some((a, b)) => (a, b),
        None => (mantisse, ""),
    };
    if fraction.contains('.') || (entier.is_empty() && fraction.is_empty()) {
        return Err(invalide());
    }

    let chiffres = format!("{entier}{fraction}");
    let numer = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
    let mut r = BigRational::new(numer, puissance_de_dix(fraction.len() as u32));

    if let Some(exp) = exposant {
        let e: i64 = exp.parse().map_err(|_| invalide())?;
        let e_abs = u32::try_from(e.unsigned_abs())
            .ok()
            .filter(|v| *v <= EXPOSANT_DECIMAL_MAX)
            .ok_or_else(|| ErreurCalcul::syntaxe(format!("exposant trop grand : {texte}")))?;
        let p = BigRational::from_integer(puissance_de_dix(e_abs));
        r = if e < 0 { r / p } else { r * p };
    }

    Ok(r)
}

fn puissance_de_dix(n: u32) -> BigInt {
    if n == 0 {
        return BigInt::one();
    }
    BigInt::from(10).pow(n)
}
