// src/noyau/grammaire.rs
//
// Validation + normalisation du texte brut.
// Ordre (important) :
// 1) compte des parenthèses
// 2) suppression des espaces
// 3) suppression des parenthèses extérieures redondantes (répétée : "(((x)))")
// 4) suppression du '+' de tête (puis retour en 3 si une parenthèse réapparaît)
// 5) grammaire : alternance {opérateurs, fonctions, '(', ')', nombre}, ancrée
// 6) structure : opérateurs en tête / orphelins, fonctions sans argument,
//    profondeur d’imbrication bornée
//
// Le texte obtenu (“canonique”) est celui que découpe jetons.rs.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::erreur::{ExprError, Result};
use super::operateur::{Operator, BINAIRES, FONCTIONS};

/// Niveaux de parenthèses au plus (l’évaluation descend d’un appel par niveau).
pub const PROFONDEUR_MAX: usize = 256;

/// Littéral numérique : chiffres[.chiffres]
const NOMBRE: &str = r"[0-9]+(?:\.[0-9]+)?";

static MOTIF_EXPRESSION: OnceLock<Regex> = OnceLock::new();
static MOTIF_NOMBRE: OnceLock<Regex> = OnceLock::new();
static MOTIF_JETON_NOMBRE: OnceLock<Regex> = OnceLock::new();

fn motif_expression() -> &'static Regex {
    MOTIF_EXPRESSION.get_or_init(|| {
        let mut alternatives: Vec<String> =
            FONCTIONS.iter().map(|(nom, _)| regex::escape(nom)).collect();
        alternatives.extend(
            BINAIRES
                .iter()
                .map(|(c, _)| regex::escape(c.encode_utf8(&mut [0; 4]))),
        );
        alternatives.push(r"\(".to_string());
        alternatives.push(r"\)".to_string());
        alternatives.push(NOMBRE.to_string());

        let motif = format!("^(?:{})+$", alternatives.join("|"));
        Regex::new(&motif).expect("motif de grammaire constant")
    })
}

/// Le texte entier est-il un nombre ?
pub fn motif_nombre() -> &'static Regex {
    MOTIF_NOMBRE.get_or_init(|| Regex::new(&format!("^{NOMBRE}$")).expect("motif nombre constant"))
}

/// Nombre en tête de texte (le plus long possible).
pub fn motif_jeton_nombre() -> &'static Regex {
    MOTIF_JETON_NOMBRE
        .get_or_init(|| Regex::new(&format!("^{NOMBRE}")).expect("motif jeton constant"))
}

/// Nom de fonction le plus long qui préfixe `texte` ("sinh" avant "sin").
pub fn nom_de_fonction(texte: &str) -> Option<(&'static str, Operator)> {
    FONCTIONS
        .iter()
        .filter(|(nom, _)| texte.starts_with(nom))
        .max_by_key(|(nom, _)| nom.len())
        .copied()
}

/// Index (en octets) de la ')' fermant la '(' qui ouvre `texte`.
pub fn closing_bracket_index(texte: &str) -> Result<usize> {
    let mut profondeur: usize = 0;

    for (i, c) in texte.char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur = profondeur.saturating_sub(1);
                if profondeur == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }

    Err(ExprError::UnmatchedBracket(texte.to_string()))
}

/// Valide un texte brut et retourne sa forme canonique.
pub fn valider(brut: &str) -> Result<String> {
    // 1) parenthèses équilibrées (en nombre)
    let ouvrantes = brut.matches('(').count();
    let fermantes = brut.matches(')').count();
    if ouvrantes != fermantes {
        return Err(ExprError::UnbalancedParentheses {
            ouvrantes,
            fermantes,
        });
    }

    // 2) espaces
    let mut texte: String = brut.chars().filter(|c| !c.is_whitespace()).collect();

    // 3) + 4)
    loop {
        retirer_parentheses_exterieures(&mut texte)?;

        match texte.strip_prefix('+') {
            Some(reste) if reste.starts_with('(') => texte = reste.to_string(),
            Some(reste) => {
                texte = reste.to_string();
                break;
            }
            None => break,
        }
    }

    // 5) grammaire
    if !motif_expression().is_match(&texte) {
        return Err(ExprError::InvalidSyntax(texte));
    }

    // 6) structure
    verifier_structure(&texte)?;

    debug!("expression validée : {brut:?} -> {texte:?}");
    Ok(texte)
}

fn retirer_parentheses_exterieures(texte: &mut String) -> Result<()> {
    while texte.starts_with('(') && closing_bracket_index(texte)? + 1 == texte.len() {
        texte.pop();
        texte.remove(0);
    }
    Ok(())
}

/// Dernière unité lue pendant la vérification de structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unite {
    Debut,
    Operande,
    Operateur,
    Ouvrante,
    OuvranteFonction,
    Fonction,
}

/// Passe structurelle (le texte a déjà passé la grammaire : ASCII seulement).
fn verifier_structure(texte: &str) -> Result<()> {
    let mut prec = Unite::Debut;
    let mut profondeur: usize = 0;
    let mut i: usize = 0;

    while i < texte.len() {
        let reste = &texte[i..];
        let c = texte.as_bytes()[i] as char;

        if prec == Unite::Fonction && c != '(' {
            return Err(ExprError::FunctionMissingArgument(texte[..i].to_string()));
        }

        if Operator::is_binary_char(c) {
            match prec {
                Unite::Debut if c == '-' => {}
                Unite::Ouvrante | Unite::OuvranteFonction if c == '-' || c == '+' => {}
                Unite::Debut | Unite::Ouvrante | Unite::OuvranteFonction => {
                    return Err(ExprError::LeadingOperator(reste.to_string()));
                }
                Unite::Operateur => {
                    return Err(ExprError::DanglingOperator(texte[..=i].to_string()));
                }
                Unite::Operande | Unite::Fonction => {}
            }
            prec = Unite::Operateur;
            i += 1;
        } else if c == '(' {
            prec = if prec == Unite::Fonction {
                Unite::OuvranteFonction
            } else {
                Unite::Ouvrante
            };
            profondeur += 1;
            if profondeur > PROFONDEUR_MAX {
                return Err(ExprError::TooDeep {
                    profondeur,
                    max: PROFONDEUR_MAX,
                });
            }
            i += 1;
        } else if c == ')' {
            if profondeur == 0 {
                return Err(ExprError::UnmatchedBracket(texte[..=i].to_string()));
            }
            match prec {
                Unite::Operateur => {
                    return Err(ExprError::DanglingOperator(texte[..=i].to_string()));
                }
                Unite::Ouvrante => return Err(ExprError::InvalidSyntax(texte.to_string())),
                Unite::OuvranteFonction => {
                    return Err(ExprError::FunctionMissingArgument(texte[..=i].to_string()));
                }
                _ => {}
            }
            profondeur -= 1;
            prec = Unite::Operande;
            i += 1;
        } else if let Some(m) = motif_jeton_nombre().find(reste) {
            prec = Unite::Operande;
            i += m.end();
        } else if let Some((nom, _)) = nom_de_fonction(reste) {
            prec = Unite::Fonction;
            i += nom.len();
        } else {
            return Err(ExprError::InvalidSyntax(texte.to_string()));
        }
    }

    match prec {
        Unite::Operateur => Err(ExprError::DanglingOperator(texte.to_string())),
        Unite::Fonction => Err(ExprError::FunctionMissingArgument(texte.to_string())),
        _ => Ok(()),
    }
}
