//! Calculatrice BEDMAS : évaluation paresseuse d’expressions infixes en f64.
//!
//! ```
//! use calculatrice_bedmas::Expression;
//!
//! let mut e = Expression::new("(2 + 3) x 4");
//! assert_eq!(e.result().unwrap(), 20.0);
//! ```

pub mod noyau;

pub use noyau::{eval_expression, Expression, ExprError, Operator};
