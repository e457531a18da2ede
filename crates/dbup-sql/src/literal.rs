//! Literal values extracted from VALUES tuples.
//!
//! Only the expression shapes the idempotent insert helpers can bind as
//! parameters are accepted; everything else is an
//! [`SqlError::UnsupportedExpression`].

use crate::error::{SqlError, SqlResult};
use sqlparser::ast::{DataType, Expr, TypedString, UnaryOperator, Value};

/// A literal from an INSERT's VALUES list.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    /// `DATE '...'` literal, carried as its text form.
    Date(String),
    /// `TIME '...'` literal, carried as its text form.
    Time(String),
    /// `TIMESTAMP '...'` / `DATETIME '...'` literal, carried as its text form.
    Timestamp(String),
    Null,
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Map a VALUES-list expression to a literal.
    pub fn from_expr(expr: &Expr) -> SqlResult<Literal> {
        match expr {
            Expr::Value(value) => from_value(&value.value),
            Expr::TypedString(TypedString { data_type, value, .. }) => {
                let text = quoted_string(&value.value)?;
                match data_type {
                    DataType::Date => Ok(Literal::Date(text)),
                    DataType::Time(..) => Ok(Literal::Time(text)),
                    DataType::Timestamp(..) | DataType::Datetime(..) => {
                        Ok(Literal::Timestamp(text))
                    }
                    _ => Err(unsupported(expr)),
                }
            }
            Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: inner,
            } => match Literal::from_expr(inner)? {
                Literal::Integer(i) => Ok(Literal::Integer(-i)),
                Literal::Float(f) => Ok(Literal::Float(-f)),
                _ => Err(unsupported(expr)),
            },
            Expr::Nested(inner) => Literal::from_expr(inner),
            _ => Err(unsupported(expr)),
        }
    }
}

fn from_value(value: &Value) -> SqlResult<Literal> {
    match value {
        Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => {
            Ok(Literal::String(s.clone()))
        }
        Value::Number(n, _) => {
            if let Ok(i) = n.parse::<i64>() {
                Ok(Literal::Integer(i))
            } else if let Ok(f) = n.parse::<f64>() {
                Ok(Literal::Float(f))
            } else {
                Err(SqlError::UnsupportedExpression {
                    expression: n.clone(),
                })
            }
        }
        Value::Null => Ok(Literal::Null),
        other => Err(SqlError::UnsupportedExpression {
            expression: other.to_string(),
        }),
    }
}

fn quoted_string(value: &Value) -> SqlResult<String> {
    match value {
        Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => Ok(s.clone()),
        other => Err(SqlError::UnsupportedExpression {
            expression: other.to_string(),
        }),
    }
}

fn unsupported(expr: &Expr) -> SqlError {
    SqlError::UnsupportedExpression {
        expression: expr.to_string(),
    }
}
