//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - En DEG, les angles remarquables (multiples de 30°/45° à valeur rationnelle) sont exacts,
//!   périodicité comprise : sin(390) = 0.5 exactement.
//! - En RAD, tout passe en f64 : sin(π) n’est pas 0 mais 1.224646799e-16.
//! - Les décimaux saisis sont exacts : 0.1 + 0.2 - 0.3 = 0.

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::{evaluer, ModeAngle};

fn ok(expr: &str, mode: ModeAngle) -> String {
    let r = evaluer(expr, mode);
    assert!(r.succes, "expr={expr:?} mode={mode} err={}", r.message_erreur);
    r.affichage
}

fn assert_deg(expr: &str, attendu: &str) {
    assert_eq!(ok(expr, ModeAngle::Deg), attendu, "expr={expr:?}");
}

fn assert_rad(expr: &str, attendu: &str) {
    assert_eq!(ok(expr, ModeAngle::Rad), attendu, "expr={expr:?}");
}

fn assert_indefini(expr: &str) {
    let r = evaluer(expr, ModeAngle::Deg);
    assert!(!r.succes, "expr={expr:?} aurait dû échouer");
    assert_eq!(r.affichage, "Error");
    assert!(
        matches!(&r.erreur, Some(ErreurCalcul::Evaluation(m)) if m.contains("indéfini")),
        "expr={expr:?} erreur={:?}",
        r.erreur
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants trig (angles spéciaux, DEG) ------------------------ */

#[test]
fn sci_indefinis_tan() {
    assert_indefini("tan(90)");
    assert_indefini("tan(270)");
    assert_indefini("tan(-90)");
    assert_indefini("tan(450)");
}

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x)
    assert_deg("sin(-30)", "-0.5");
    assert_deg("sin(30)", "0.5");

    // cos(-x) = cos(x)
    assert_deg("cos(-60)", "0.5");
    assert_deg("cos(60)", "0.5");

    // tan(-x) = -tan(x)
    assert_deg("tan(-45)", "-1");
    assert_deg("tan(45)", "1");
}

#[test]
fn sci_periodicite_angles() {
    // sin(x + 360) = sin(x)
    assert_deg("sin(390)", "0.5");
    assert_deg("sin(30+360)", "0.5");

    // cos(x + 720) = cos(x)
    assert_deg("cos(780)", "0.5");

    // tan(x + 180) = tan(x)
    assert_deg("tan(225)", "1");
}

#[test]
fn sci_propagation_indefini() {
    // indéfini contamine toute l’expression
    assert_indefini("1 + tan(90)");
    assert_indefini("tan(90) + 1");
    assert_indefini("2 * tan(90)");
    assert_indefini("tan(90) / 3");
}

#[test]
fn sci_radians_en_f64() {
    assert_rad("sin(pi)", "1.224646799e-16");
    assert_rad("cos(pi)", "-1");
    assert_rad("sin(pi/2)", "1");
    assert_rad("tan(0)", "0");
}

#[test]
fn sci_deg_et_rad_coherents() {
    // sin(x°) = sin(x·π/180 rad) à 10 chiffres près
    for a in [10, 20, 37, 45, 89, 100, 200, 359] {
        let d: f64 = ok(&format!("sin({a})"), ModeAngle::Deg).parse().unwrap();
        let r: f64 = ok(&format!("sin({a}*π/180)"), ModeAngle::Rad).parse().unwrap();
        assert!((d - r).abs() < 1e-9, "a={a} deg={d} rad={r}");
    }
}

/* ------------------------ Cohérence algébrique (zéro) ------------------------ */

#[test]
fn sci_zero_algebrique() {
    // (1/2 + 1/3) - 5/6 = 0
    assert_deg("(1/2 + 1/3) - 5/6", "0");

    // (2/3 * 3/4) - 1/2 = 0
    assert_deg("(2/3 * 3/4) - 1/2", "0");

    // décimaux exacts
    assert_deg("0.1 + 0.2 - 0.3", "0");

    // racines exactes (carrés parfaits)
    assert_deg("sqrt(16)*sqrt(16) - 16", "0");
    assert_deg("sqrt(9/4) - 3/2", "0");

    // 1/3 * 3 reste exact
    assert_deg("1/3*3", "1");
}

#[test]
fn sci_grands_entiers_exacts() {
    assert_deg("2^100", "1267650600228229401496703205376");
    assert_deg("999999999×999999999", "999999998000000001");
    assert_deg("10^20 + 1", "100000000000000000001");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_sqrt_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt(4) -> 2 ; (2)^2 -> 4 ; etc. On alterne pour garder un carré parfait.
    let mut expr = "4".to_string();
    for k in 0..60 {
        expr = if k % 2 == 0 {
            format!("sqrt({expr})")
        } else {
            format!("({expr})^2")
        };
        budget(t0, max);
    }

    assert_deg(&expr, "4");
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    // 80*(1/2)=40
    assert_deg(&expr, "40");
}

#[test]
fn sci_stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // gros numérateur contrôlé (100 chiffres) : 10^100 / 7
    let big = "9".repeat(100);
    let expr = format!("{big}/7 + 1/7");
    budget(t0, max);

    assert_deg(&expr, "1.428571429e+99");
}

#[test]
fn sci_stress_produit_de_puissances_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // chaque facteur est court, le produit exact serait gigantesque
    for n in [20, 60] {
        let expr = vec!["9^4000"; n].join("×");
        let r = evaluer(&expr, ModeAngle::Deg);
        assert!(r.erreur.as_ref().is_some_and(|e| e.est_depassement()), "n={n} {r:?}");
        budget(t0, max);
    }

    // grand non entier : ne s’affiche jamais "inf"
    for expr in ["10^400/3", "10^400÷7+1/3"] {
        let r = evaluer(expr, ModeAngle::Deg);
        assert_eq!(r.affichage, "Error", "expr={expr:?}");
        assert!(r.erreur.as_ref().is_some_and(|e| e.est_depassement()), "{r:?}");
    }
    budget(t0, max);
}

#[test]
fn sci_longue_somme_sur_pile_de_thread() {
    // pile par défaut d’un thread (2 Mio) : la colonne gauche ne doit pas la consommer
    let gestion = std::thread::spawn(|| {
        let somme = vec!["1"; 4000].join("+");
        let produit = vec!["1"; 2000].join("×");
        (evaluer(&somme, ModeAngle::Deg), evaluer(&produit, ModeAngle::Rad))
    });
    let (somme, produit) = gestion.join().expect("thread d’évaluation");
    assert_eq!(somme.affichage, "4000", "{}", somme.message_erreur);
    assert_eq!(produit.affichage, "1", "{}", produit.message_erreur);
}

#[test]
fn sci_limites_refusees_proprement() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let profond = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    let r = evaluer(&profond, ModeAngle::Deg);
    assert!(!r.succes);
    assert!(matches!(r.erreur, Some(ErreurCalcul::Syntaxe(_))));
    budget(t0, max);

    let moins = format!("{}1", "-".repeat(1000));
    assert!(!evaluer(&moins, ModeAngle::Rad).succes);
    budget(t0, max);

    let sinus = format!("{}30", "sin(".repeat(1000));
    assert!(!evaluer(&sinus, ModeAngle::Deg).succes);
    budget(t0, max);

    let r = evaluer("10^100000", ModeAngle::Deg);
    assert!(r.erreur.as_ref().is_some_and(|e| e.est_depassement()), "{r:?}");
    budget(t0, max);
}
