// src/noyau/jetons.rs
//
// Tokenisation “glyphes d’écran” -> jetons.
// Ne échoue jamais : un caractère inconnu devient Tok::Inconnu, et c’est le parseur
// qui le signale. Le normaliseur peut donc travailler sur n’importe quelle saisie.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Texte du nombre tel que saisi ("2.5", ".5", "1e-05"). Converti en rationnel par le parseur.
    Num(String),
    Pi,

    // Fonctions + constante e (tout ce qui n’est pas pi / opérateur / nombre)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,   // ^ ou **
    Percent, // %

    LPar,
    RPar,

    Inconnu(char),
}

impl Tok {
    /// Jeton “mot” : deux mots consécutifs doivent rester séparés à l’affichage.
    fn est_mot(&self) -> bool {
        matches!(self, Tok::Num(_) | Tok::Pi | Tok::Ident(_))
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 2.5, .5) + exposant collé (1e-05, 2E3)
/// - opérateurs + - * / ^ et glyphes × · ÷ − ** %
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // ** (puissance) avant * simple
        if c == '*' && chars.get(i + 1) == Some(&'*') {
            out.push(Tok::Caret);
            i += 2;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' | '·' | '⋅' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '%' => Some(Tok::Percent),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();
            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre : [0-9.]+ puis exposant optionnel (e suivi d’un chiffre, signe permis).
        // "1.2.3" reste un seul jeton : le parseur le refusera.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            if let Some(fin) = fin_exposant(&chars, i) {
                i = fin;
            }
            out.push(Tok::Num(chars[start..i].iter().collect()));
            continue;
        }

        out.push(Tok::Inconnu(c));
        i += 1;
    }

    out
}

/// Si chars[i..] commence par un exposant ("e5", "E-3", "e+10"), renvoie l’indice de fin.
/// Sans chiffre après le 'e' (ou le signe), ce n’est pas un exposant : "2e" = 2 puis e.
fn fin_exposant(chars: &[char], i: usize) -> Option<usize> {
    if !matches!(chars.get(i), Some('e') | Some('E')) {
        return None;
    }
    let mut j = i + 1;
    if matches!(chars.get(j), Some('+') | Some('-')) {
        j += 1;
    }
    if !chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    Some(j)
}

/// Texte d’un jeton (syntaxe évaluateur, ASCII).
pub fn texte_jeton(t: &Tok) -> String {
    match t {
        Tok::Num(s) => s.clone(),
        Tok::Pi => "pi".to_string(),
        Tok::Ident(name) => name.clone(),

        Tok::Plus => "+".to_string(),
        Tok::Minus => "-".to_string(),
        Tok::Star => "*".to_string(),
        Tok::Slash => "/".to_string(),
        Tok::Caret => "^".to_string(),
        Tok::Percent => "%".to_string(),

        Tok::LPar => "(".to_string(),
        Tok::RPar => ")".to_string(),

        Tok::Inconnu(c) => c.to_string(),
    }
}

/// Liste de jetons -> texte compact.
///
/// Invariant : `tokenize(&format_tokens(&t)) == t` pour toute sortie de `tokenize`.
/// D’où l’espace entre deux mots ("2 e", "5/100 2") et entre deux '*' (sinon "**").
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Tok> = None;

    for t in tokens {
        if let Some(p) = prev {
            let colle_mots = p.est_mot() && t.est_mot();
            let colle_etoiles = matches!(p, Tok::Star) && matches!(t, Tok::Star);
            if colle_mots || colle_etoiles {
                out.push(' ');
            }
        }
        out.push_str(&texte_jeton(t));
        prev = Some(t);
    }
    out
}
