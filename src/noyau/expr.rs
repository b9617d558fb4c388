// src/noyau/expr.rs
//
// Arbre d’expression, ensemble fermé de noeuds :
// - Nombre     : rationnel exact (littéral décimal lu sans perte)
// - Constante  : pi, e
// - Binaire    : + - * / ^
// - Fonction   : sqrt, sin, cos, tan, log10, rad (unaire)
//
// Le moins unaire n’a pas de noeud : "-x" est construit comme 0 - x.
//
// Une somme de n termes donne une colonne gauche de profondeur n : affichage et
// libération la parcourent en boucle, jamais par récursion.

use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Zero};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Log10,
    /// Degrés -> radians (insérée par le normaliseur en mode DEG).
    Rad,
}

impl Fonction {
    /// Seuls noms de fonctions connus de l’évaluateur.
    pub fn depuis_nom(name: &str) -> Option<Fonction> {
        match name {
            "sqrt" => Some(Fonction::Sqrt),
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "log10" => Some(Fonction::Log10),
            "rad" => Some(Fonction::Rad),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log10 => "log10",
            Fonction::Rad => "rad",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

#[derive(Debug)]
pub enum Expr {
    Nombre(BigRational),
    Constante(Constante),
    Binaire(Op, Box<Expr>, Box<Expr>),
    Fonction(Fonction, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn fonction(f: Fonction, x: Expr) -> Expr {
        Expr::Fonction(f, Box::new(x))
    }

    /// -x construit comme 0 - x (pas de noeud unaire).
    pub fn oppose(x: Expr) -> Expr {
        Expr::binaire(Op::Sub, Expr::Nombre(BigRational::zero()), x)
    }

    /// Descend les opérandes gauches des noeuds binaires.
    /// Rend la feuille atteinte et les (op, droite) rencontrés, du haut vers le bas.
    pub fn colonne_gauche(&self) -> (&Expr, Vec<(Op, &Expr)>) {
        let mut droites = Vec::new();
        let mut e = self;
        while let Expr::Binaire(op, a, b) = e {
            droites.push((*op, b.as_ref()));
            e = a.as_ref();
        }
        (e, droites)
    }
}

/* ------------------------ Libération sans récursion ------------------------ */

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        detacher_enfants(self, &mut pile);
        // chaque noeud dépilé n’a plus que des feuilles quand il est libéré
        while let Some(mut e) = pile.pop() {
            detacher_enfants(&mut e, &mut pile);
        }
    }
}

fn detacher_enfants(e: &mut Expr, pile: &mut Vec<Expr>) {
    let mut detacher = |x: &mut Box<Expr>| {
        if matches!(**x, Expr::Binaire(..) | Expr::Fonction(..)) {
            pile.push(std::mem::replace(&mut **x, Expr::Constante(Constante::Pi)));
        }
    };
    match e {
        Expr::Binaire(_, a, b) => {
            detacher(a);
            detacher(b);
        }
        Expr::Fonction(_, x) => detacher(x),
        Expr::Nombre(_) | Expr::Constante(_) => {}
    }
}

/* ------------------------ Affichage (démarche) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(r) => {
                if r.denom().is_one() {
                    write!(f, "{}", r.numer())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
            Expr::Constante(Constante::Pi) => write!(f, "π"),
            Expr::Constante(Constante::E) => write!(f, "e"),
            Expr::Binaire(..) => {
                let (feuille, droites) = self.colonne_gauche();
                for _ in 0..droites.len() {
                    f.write_str("(")?;
                }
                write!(f, "{feuille}")?;
                for (op, b) in droites.iter().rev() {
                    write!(f, "{}{b})", op.symbole())?;
                }
                Ok(())
            }
            Expr::Fonction(fun, x) => write!(f, "{}({x})", fun.nom()),
        }
    }
}
