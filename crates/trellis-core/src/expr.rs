//! Row-level expression AST for map/projection columns.

use serde::{Deserialize, Serialize};

use crate::schema::DataType;
use crate::types::Scalar;

/// Scalar expression evaluated per row by the frame executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Reference a column of the input by name.
    Col(String),
    Lit(Scalar),
    Eq(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// Type conversion, e.g. boolean match flags to 0/1 integers.
    Cast(DataType, Box<Expr>),
}

impl Expr {
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Col(name.into())
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::Eq(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::Mul(Box::new(lhs), Box::new(rhs))
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Expr::Div(Box::new(lhs), Box::new(rhs))
    }

    pub fn cast(data_type: DataType, inner: Expr) -> Self {
        Expr::Cast(data_type, Box::new(inner))
    }
}

/// Group-free aggregation expressions; each produces one output value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggExpr {
    Sum(Expr),
    Count(Expr),
}
