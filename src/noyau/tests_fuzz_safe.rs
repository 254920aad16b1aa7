//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le noyau sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions générées avec leur valeur attendue (parenthèses explicites)
//! - invariant clé : validate() accepte => result() réussit

use std::time::{Duration, Instant};

use super::{ExprError, Expression, PROFONDEUR_MAX};

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
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn meme_valeur(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn evaluer(expr: &str) -> f64 {
    Expression::new(expr)
        .result()
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/// Espaces insérés au hasard (y compris au milieu des nombres et des noms).
fn saupoudrer_espaces(rng: &mut Rng, expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() * 2);
    for c in expr.chars() {
        if rng.pick(4) == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> (String, f64) {
    let n = rng.pick(10);
    match rng.pick(3) {
        0 => (format!("{n}.5"), n as f64 + 0.5),
        1 => (format!("(-{n})"), -(n as f64)),
        _ => (format!("{n}"), n as f64),
    }
}

/// Expression valide + valeur attendue (chaque opération binaire est parenthésée).
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, f64) {
    if depth == 0 {
        return gen_nombre(rng);
    }

    let (a, va) = gen_expr(rng, depth - 1);
    match rng.pick(9) {
        0 => (a, va),
        1 => {
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}+{b})"), va + vb)
        }
        2 => {
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}-{b})"), va - vb)
        }
        3 => {
            let (b, vb) = gen_expr(rng, depth - 1);
            let op = if rng.coin() { 'x' } else { '*' };
            (format!("({a}{op}{b})"), va * vb)
        }
        4 => {
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}/{b})"), va / vb)
        }
        5 => (format!("sin({a})"), va.sin()),
        6 => (format!("cos({a})"), va.cos()),
        7 => (format!("sqrt({a})"), va.sqrt()),
        _ => (format!("e^({a})"), va.exp()),
    }
}

/// Texte quelconque sur l’alphabet de la grammaire (souvent invalide).
fn gen_bruit(rng: &mut Rng) -> String {
    const UNITES: [&str; 16] = [
        "1", "2.5", "0", "+", "-", "x", "*", "/", "%", "^", "(", ")", "sin", "ln", "e^", " ",
    ];
    let n = 1 + rng.pick(12) as usize;
    (0..n).map(|_| UNITES[rng.pick(UNITES.len() as u32) as usize]).collect()
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
fn fuzz_safe_valeurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 4);
        let v = evaluer(&expr);
        assert!(
            meme_valeur(v, attendu),
            "expr={expr:?} : {v} au lieu de {attendu}"
        );
    }
}

#[test]
fn fuzz_safe_espaces_et_memoire() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let (expr, _) = gen_expr(&mut rng, 3);
        let espace = saupoudrer_espaces(&mut rng, &expr);

        let mut e = Expression::new(espace.as_str());
        let a = e.result().unwrap_or_else(|err| panic!("expr={espace:?} err={err}"));
        let b = e.result().unwrap_or_else(|err| panic!("expr={espace:?} err={err}"));

        assert!(meme_valeur(a, b), "mémorisation : expr={espace:?}");
        assert!(meme_valeur(a, evaluer(&expr)), "espaces : {expr:?} vs {espace:?}");

        // '*' et 'x' : même opérateur
        let etoiles = expr.replace('x', "*");
        assert!(meme_valeur(a, evaluer(&etoiles)), "'*' vs 'x' : {expr:?}");
    }
}

#[test]
fn fuzz_safe_bruit_validation_coherente() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let texte = gen_bruit(&mut rng);
        let mut e = Expression::new(texte.as_str());

        match e.validate() {
            Ok(()) => {
                assert!(e.is_validated());
                assert!(
                    e.result().is_ok(),
                    "validée mais non calculable : {texte:?} ({:?})",
                    e.result()
                );
                seen_ok += 1;
            }
            Err(err) => {
                assert!(!e.is_validated(), "{texte:?}");
                assert_eq!(e.result(), Err(err), "{texte:?}");
                assert!(!e.is_validated(), "{texte:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucune entrée valide générée");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(evaluer(&expr), 400.0);
}

#[test]
fn fuzz_safe_longue_chaine_plate() {
    let expr = vec!["1"; 500].join("+");
    assert_eq!(evaluer(&expr), 500.0);

    let expr = vec!["2"; 20].join("x");
    assert_eq!(evaluer(&expr), 2f64.powi(20));
}

#[test]
fn fuzz_safe_imbrication_bornee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let sinus = |n: usize| format!("{}1{}", "sin(".repeat(n), ")".repeat(n));

    // juste sous la limite : évalué normalement
    let mut e = Expression::new(sinus(PROFONDEUR_MAX));
    let attendu = (0..PROFONDEUR_MAX).fold(1.0f64, |x, _| x.sin());
    assert!(meme_valeur(e.result().unwrap(), attendu));
    budget(t0, max);

    // au-delà : erreur, pas de débordement de pile
    for n in [PROFONDEUR_MAX + 1, 3000, 5000] {
        let mut e = Expression::new(sinus(n));
        assert!(
            matches!(e.result(), Err(ExprError::TooDeep { .. })),
            "profondeur {n}"
        );
        assert!(!e.is_validated());
        budget(t0, max);
    }
}
