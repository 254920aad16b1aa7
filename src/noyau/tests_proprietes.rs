//! Tests de propriétés (campagne) : résultats, priorités, validation, mémorisation.
//!
//! Tolérance : 1e-7 en absolu, sinon en relatif (grands nombres).

use super::{ExprError, Expression};

const TOLERANCE: f64 = 1e-7;

fn proche(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    diff <= TOLERANCE || diff <= a.abs().max(b.abs()) * TOLERANCE
}

fn resultat(expr: &str) -> f64 {
    Expression::new(expr)
        .result()
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = resultat(expr);
    assert!(proche(v, attendu), "expr={expr:?} : {v} au lieu de {attendu}");
}

const EXPRESSIONS_DE_BASE: [(&str, f64); 10] = [
    ("123.456", 123.456),
    ("1 + 1", 2.0),
    ("2 x 3 + 4", 10.0),
    ("2 + 3 x 4", 14.0),
    ("(2 + 3) x 4", 20.0),
    ("((2 + 3)^2 - 2)", 23.0),
    ("ln(1)", 0.0),
    ("sin(3.141592654 / 2.0)", 1.0),
    ("-1xcos(0.0)", -1.0),
    ("-cos(0.0)", -1.0),
];

const EXPRESSIONS_COMPLEXES: [(&str, f64); 3] = [
    ("((((1+1))))", 2.0),
    ("2^(2)*cos(0.0)", 4.0),
    ("cos(cos(3.14159/2))", 1.0),
];

const EXPRESSIONS_INVALIDES: [&str; 9] = [
    "(1+2",
    "1+2)",
    "cos(0.0",
    "5-*4",
    "(((1+1)+2)",
    "(5-2/)",
    "-",
    "/1",
    "1+(^2-1)",
];

/* ------------------------ Résultats ------------------------ */

#[test]
fn prop_expressions_de_base() {
    for (expr, attendu) in EXPRESSIONS_DE_BASE {
        assert_proche(expr, attendu);
    }
}

#[test]
fn prop_expressions_complexes() {
    for (expr, attendu) in EXPRESSIONS_COMPLEXES {
        assert_proche(expr, attendu);
    }
}

#[test]
fn prop_operations_et_fonctions_melangees() {
    assert_proche("1.2 3", 1.23);
    assert_proche("2.0*3", 6.0);
    assert_proche("2.0^  3.0", 8.0);
    assert_proche("5x3+2", 17.0);
    assert_proche("5+3x2", 11.0);
    assert_proche("(3+5)x(4-2)", 16.0);
    assert_proche("sin(3.14159/2)", 1.0);
    assert_proche("ln(2)xsin(3.14159/2)^3.0", 2f64.ln());
    assert_proche("-1.0*ln((4.5+3)^4)-12", -(7.5f64.powi(4).ln()) - 12.0);
    assert_proche("(((4+2)))", 6.0);
    assert_proche("(log((4+5)^2+4^2)-3^2)", 97f64.log10() - 9.0);
}

#[test]
fn prop_toutes_les_fonctions() {
    assert_proche("sqrt(2)", 2f64.sqrt());
    assert_proche("log(1000)", 3.0);
    assert_proche("exp(1)", std::f64::consts::E);
    assert_proche("e^(2)", 2f64.exp());
    assert_proche("tan(0.5)", 0.5f64.tan());
    assert_proche("sinh(1)", 1f64.sinh());
    assert_proche("cosh(1)", 1f64.cosh());
    assert_proche("tanh(1)", 1f64.tanh());
    assert_proche("2sqrt(9)", 6.0);
    assert_proche("sqrt(9)x2", 6.0);
    assert_proche("cos(0.0)*2", 2.0);
    assert_proche("2*cos(0.0)", 2.0);
}

/* ------------------------ Priorités / associativité ------------------------ */

#[test]
fn prop_gauche_a_droite_dans_une_classe() {
    // ((12.3-4.1)+1)-12.1, pas 12.3-(4.1+(1-12.1))
    assert_proche("12.3-4.1+1-12.1", -2.9);
    assert_proche("100/10/5", 2.0);
    assert_proche("2^3^2", 64.0);
    assert_proche("7%4x2", 6.0);
}

#[test]
fn prop_modulo_signe_du_dividende() {
    assert_proche("7%3", 1.0);
    assert_proche("-7%3", -1.0);
    assert_proche("7.5%2", 1.5);
}

#[test]
fn prop_moins_unaire_et_plus_de_tete() {
    assert_proche("+5", 5.0);
    assert_proche("+(2+3)", 5.0);
    assert_proche("(+(4))", 4.0);
    assert_proche("-(2+3)", -5.0);
    assert_proche("-2^2", -4.0);
    assert_proche("3x(-2)", -6.0);
    assert_proche("sqrt(-1+5)", 2.0);
}

#[test]
fn prop_multiplication_implicite() {
    assert_proche("(1+1)(2+1)", 6.0);
    assert_proche("2(3)", 6.0);
    assert_proche("(4)3", 12.0);
}

/* ------------------------ Équivalences ------------------------ */

#[test]
fn prop_etoile_et_x_equivalents() {
    for (a, b) in [("2*3+4", "2x3+4"), ("(1+2)*4", "(1+2)x4"), ("2*3*4", "2x3x4")] {
        assert_eq!(resultat(a).to_bits(), resultat(b).to_bits(), "{a:?} vs {b:?}");
    }
}

#[test]
fn prop_espaces_sans_effet() {
    for (compact, espace) in [
        ("2x3+4", " 2 x 3 + 4 "),
        ("sin(3.14/2)", "sin ( 3.14 / 2 )"),
        ("((2+3)^2-2)", "( ( 2 + 3 ) ^ 2 - 2 )"),
        ("12.3-4.1", "1 2 . 3 -\t4 . 1"),
    ] {
        assert_eq!(
            resultat(compact).to_bits(),
            resultat(espace).to_bits(),
            "{compact:?} vs {espace:?}"
        );
    }
}

#[test]
fn prop_parentheses_redondantes_transparentes() {
    assert_proche("(((1+1)))", 2.0);
    assert_eq!(resultat("(((1+1)))").to_bits(), resultat("1+1").to_bits());
}

/* ------------------------ Mémorisation ------------------------ */

#[test]
fn prop_result_idempotent() {
    for (expr, _) in EXPRESSIONS_DE_BASE.iter().chain(EXPRESSIONS_COMPLEXES.iter()) {
        let mut e = Expression::new(*expr);
        let a = e.result().unwrap();
        let rendu = e.expression().unwrap();
        let b = e.result().unwrap();
        assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?}");
        assert_eq!(e.expression().unwrap(), rendu, "expr={expr:?}");
    }
}

/* ------------------------ Validation ------------------------ */

#[test]
fn prop_entrees_invalides() {
    for expr in EXPRESSIONS_INVALIDES {
        let mut e = Expression::new(expr);
        assert!(e.validate().is_err(), "{expr:?} devrait être refusée");
        assert!(!e.is_validated(), "{expr:?} ne doit pas être validée");
        assert!(e.result().is_err(), "{expr:?} ne doit pas avoir de valeur");
        assert!(!e.is_validated(), "{expr:?} ne doit pas être validée");
    }
}

#[test]
fn prop_genres_d_erreurs() {
    let erreur = |s: &str| Expression::new(s).validate().unwrap_err();

    assert!(matches!(erreur("(1+2"), ExprError::UnbalancedParentheses { .. }));
    assert!(matches!(erreur("cos(0.0"), ExprError::UnbalancedParentheses { .. }));
    assert!(matches!(erreur("5-*4"), ExprError::DanglingOperator(_)));
    assert!(matches!(erreur("(5-2/)"), ExprError::DanglingOperator(_)));
    assert!(matches!(erreur("/1"), ExprError::LeadingOperator(_)));
    assert!(matches!(erreur("1+(^2-1)"), ExprError::LeadingOperator(_)));
    assert!(matches!(erreur("2+abc"), ExprError::InvalidSyntax(_)));
    assert!(matches!(erreur("12."), ExprError::InvalidSyntax(_)));
    assert!(matches!(erreur("sin+1"), ExprError::FunctionMissingArgument(_)));
    assert!(matches!(erreur("ln()"), ExprError::FunctionMissingArgument(_)));
}

/* ------------------------ Atomique ------------------------ */

#[test]
fn prop_litteral_atomique() {
    let mut e = Expression::new("123.456");
    assert!(e.is_atomic().unwrap());
    assert!(e.tokens().is_none());
    assert!(e.outer_step().is_none());
    assert_eq!(e.result().unwrap(), 123.456);
}

#[test]
fn prop_is_atomic_paresseux() {
    let mut e = Expression::new("sqrt(4)+(1+(2+3))");
    assert!(!e.is_atomic().unwrap());
    let niveau = e.tokens().unwrap();
    assert!(niveau.tokens.iter().all(|j| !j.is_calculated()));
    assert!(niveau.tokens.iter().all(|j| !j.is_validated()));
}

/* ------------------------ IEEE ------------------------ */

#[test]
fn prop_cas_ieee() {
    assert_eq!(resultat("1/0"), f64::INFINITY);
    assert_eq!(resultat("-1/0"), f64::NEG_INFINITY);
    assert!(resultat("ln(-1)").is_nan());
    assert!(resultat("0/0").is_nan());
}
