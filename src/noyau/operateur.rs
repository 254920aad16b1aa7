// src/noyau/operateur.rs
//
// Opérateurs (ensemble fermé) + vocabulaire écrit.
// - binaires : + - * x / % ^
// - unaires  : fonctions appliquées à un niveau entier (sin, ln, e^, ...)
// - Identity : aucune opération (niveau réduit à un seul nombre)

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Identity,

    Plus,
    Minus,
    Times,
    Divide,
    Mod,
    Pow,

    Exp, // e^x
    Sqrt,
    Ln,  // log naturel
    Log, // log base 10
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
}

/// Classe de priorité BEDMAS d’un opérateur binaire.
/// L’ordre de déclaration va de la plus faible (calculée en dernier) à la plus forte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priorite {
    Addition,       // + -
    Multiplication, // * x / %
    Puissance,      // ^
}

impl Priorite {
    /// Du plus faible au plus fort : ordre de recherche de la dernière étape.
    pub const DE_LA_PLUS_FAIBLE: [Priorite; 3] = [
        Priorite::Addition,
        Priorite::Multiplication,
        Priorite::Puissance,
    ];
}

/// Noms de fonctions reconnus (écriture -> opérateur).
/// "e^" et "exp" désignent la même fonction.
pub const FONCTIONS: [(&str, Operator); 11] = [
    ("e^", Operator::Exp),
    ("exp", Operator::Exp),
    ("sqrt", Operator::Sqrt),
    ("ln", Operator::Ln),
    ("log", Operator::Log),
    ("sinh", Operator::Sinh),
    ("cosh", Operator::Cosh),
    ("tanh", Operator::Tanh),
    ("sin", Operator::Sin),
    ("cos", Operator::Cos),
    ("tan", Operator::Tan),
];

/// Caractères d’opérateurs binaires acceptés.
pub const BINAIRES: [(char, Operator); 7] = [
    ('+', Operator::Plus),
    ('-', Operator::Minus),
    ('*', Operator::Times),
    ('x', Operator::Times),
    ('/', Operator::Divide),
    ('%', Operator::Mod),
    ('^', Operator::Pow),
];

impl Operator {
    pub fn from_binary_char(c: char) -> Option<Operator> {
        BINAIRES.iter().find(|(s, _)| *s == c).map(|(_, op)| *op)
    }

    pub fn is_binary_char(c: char) -> bool {
        Self::from_binary_char(c).is_some()
    }

    pub fn priorite(self) -> Option<Priorite> {
        use Operator::*;
        match self {
            Plus | Minus => Some(Priorite::Addition),
            Times | Divide | Mod => Some(Priorite::Multiplication),
            Pow => Some(Priorite::Puissance),
            _ => None,
        }
    }

    /// Écriture canonique (`*` s’écrit toujours `x`).
    pub fn symbol(self) -> &'static str {
        use Operator::*;
        match self {
            Identity => "",
            Plus => "+",
            Minus => "-",
            Times => "x",
            Divide => "/",
            Mod => "%",
            Pow => "^",
            Exp => "exp",
            Sqrt => "sqrt",
            Ln => "ln",
            Log => "log",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Identity => write!(f, "identité"),
            op => write!(f, "{}", op.symbol()),
        }
    }
}
