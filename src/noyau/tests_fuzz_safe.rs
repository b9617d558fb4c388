//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : jamais d’erreur de syntaxe, seulement des erreurs de calcul
//! - invariant clé : échec <=> affichage "Error" + message non vide

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::{evaluer, normaliser, ModeAngle, Resultat};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_invariant_resultat(expr: &str, r: &Resultat) {
    if r.succes {
        assert!(r.message_erreur.is_empty(), "expr={expr:?} {r:?}");
        // nombre fini, ou entier exact écrit en toutes lettres (peut dépasser f64)
        let fini = r.affichage.parse::<f64>().is_ok_and(|x| x.is_finite());
        assert!(
            fini || est_entier_affiche(&r.affichage),
            "affichage non numérique: expr={expr:?} {r:?}"
        );
        assert!(r.valeur.is_some());
    } else {
        assert_eq!(r.affichage, "Error", "expr={expr:?}");
        assert!(!r.message_erreur.is_empty(), "expr={expr:?}");
        assert!(r.erreur.is_some(), "expr={expr:?}");
    }
}

fn est_entier_affiche(s: &str) -> bool {
    let chiffres = s.strip_prefix('-').unwrap_or(s);
    !chiffres.is_empty() && chiffres.bytes().all(|c| c.is_ascii_digit())
}

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Liste blanche : erreurs *normales* pour des expressions bien formées.
    matches!(e, ErreurCalcul::DivisionParZero | ErreurCalcul::Evaluation(_))
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    rng.choisir(&["0", "1", "2", "3", "7", "10", "0.5", "2.5", "0.1", "30", "45", "90", "180"])
        .to_string()
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => rng.choisir(&["π", "pi", "e"]).to_string(),
        4 => format!("{}%", gen_nombre(rng)),
        _ => format!("-{}", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(8) {
        0 => gen_atom(rng),
        1 | 2 => {
            let op = rng.choisir(&["+", "-", "*", "/", "×", "÷", "−", "**"]);
            let b = gen_expr(rng, depth - 1);
            format!("({a}){op}({b})")
        }
        3 => format!("({a})^{}", rng.choisir(&["2", "3", "0.5", "-1"])),
        4 => {
            let f = rng.choisir(&["sin(", "cos(", "tan(", "sqrt(", "log(", "√("]);
            // parenthèse finale parfois omise : fermée par le normaliseur
            if rng.coin() {
                format!("{f}{a})")
            } else {
                format!("{f}{a}")
            }
        }
        5 => format!("2({a})"),
        6 => format!("-({a})"),
        _ => a,
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_resultat() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for k in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if k % 2 == 0 { ModeAngle::Deg } else { ModeAngle::Rad };

        let r = evaluer(&expr, mode);
        check_invariant_resultat(&expr, &r);
        assert_eq!(r, evaluer(&expr, mode), "non déterministe: expr={expr:?}");

        match &r.erreur {
            None => seen_ok += 1,
            Some(e) => {
                assert!(
                    is_erreur_attendue(e),
                    "erreur non attendue: expr={expr:?} mode={mode} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_normalisation_idempotente() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        for mode in [ModeAngle::Deg, ModeAngle::Rad] {
            let une = normaliser(&expr, mode);
            let deux = normaliser(&une, mode);
            assert_eq!(une, deux, "expr={expr:?} mode={mode}");
        }
    }
}

#[test]
fn fuzz_safe_octets_quelconques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);
    let alphabet: Vec<char> = "0123456789.+-*/^%()×÷−πe√ sincotaqrlgpxE,&_".chars().collect();

    for _ in 0..300 {
        budget(t0, max);

        let n = rng.pick(24) as usize;
        let expr: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        let r = evaluer(&expr, ModeAngle::Deg);
        check_invariant_resultat(&expr, &r);
    }
}

#[test]
fn fuzz_safe_angles_trig_dans_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xA11CE_u64);

    for _ in 0..120 {
        budget(t0, max);

        // multiples de 15°, négatifs compris
        let a = (rng.pick(97) as i64 - 48) * 15;
        for f in ["sin", "cos", "tan"] {
            let expr = format!("{f}({a})");
            let r = evaluer(&expr, ModeAngle::Deg);
            check_invariant_resultat(&expr, &r);

            let tan_indefini = f == "tan" && a.rem_euclid(180) == 90;
            assert_eq!(r.succes, !tan_indefini, "expr={expr:?} {r:?}");
            if r.succes {
                let x: f64 = r.affichage.parse().unwrap();
                let attendu = match f {
                    "sin" => (a as f64).to_radians().sin(),
                    "cos" => (a as f64).to_radians().cos(),
                    _ => (a as f64).to_radians().tan(),
                };
                // valeurs exactes affichées "0", f64 proches de 1e-16 : tolérance absolue
                assert!((x - attendu).abs() < 1e-9, "expr={expr:?} x={x} attendu={attendu}");
            }
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    let r = evaluer(&expr, ModeAngle::Deg);
    assert_eq!(r.affichage, "400", "{}", r.message_erreur);
}
