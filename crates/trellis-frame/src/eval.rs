//! Plan interpreter: scan/map/concat/aggregate over in-memory tables.

use trellis_core::expr::{AggExpr, Expr};
use trellis_core::relplan::TablePlan;
use trellis_core::schema::DataType;
use trellis_core::types::{Column, Scalar, Table};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("planning error: {0}")]
    Plan(String),

    #[error("evaluation error: {0}")]
    Eval(String),

    #[error("schema error: {0}")]
    Schema(String),
}

/// Execute `plan` against the given source-tagged input tables and return
/// the materialized result.
pub fn execute(plan: &TablePlan, inputs: &[Table]) -> Result<Table, FrameError> {
    match plan {
        TablePlan::Scan { source } => inputs
            .iter()
            .find(|t| t.name == *source)
            .cloned()
            .ok_or_else(|| FrameError::Plan(format!("no input table tagged '{source}'"))),

        TablePlan::Map { input, columns } => {
            let table = execute(input, inputs)?;
            let rows = table.num_rows();
            let mut out = Vec::with_capacity(columns.len());
            for (name, expr) in columns {
                let mut values = Vec::with_capacity(rows);
                for row in 0..rows {
                    values.push(eval_expr(expr, &table, row)?);
                }
                out.push(Column::new(name.clone(), values));
            }
            Ok(Table::new("", out))
        }

        TablePlan::ConcatCols { inputs: plans } => {
            let mut iter = plans.iter();
            let first = iter
                .next()
                .ok_or_else(|| FrameError::Plan("concat of zero inputs".into()))?;
            let mut acc = execute(first, inputs)?;
            for p in iter {
                let next = execute(p, inputs)?;
                acc = Table::concat_columns(&acc, &next)
                    .map_err(|e| FrameError::Schema(e.to_string()))?;
            }
            Ok(acc)
        }

        TablePlan::Aggregate { input, columns } => {
            let table = execute(input, inputs)?;
            let rows = table.num_rows();
            let mut out = Vec::with_capacity(columns.len());
            for (name, agg) in columns {
                let value = match agg {
                    AggExpr::Count(_) => Scalar::I64(rows as i64),
                    AggExpr::Sum(expr) => {
                        let mut values = Vec::with_capacity(rows);
                        for row in 0..rows {
                            values.push(eval_expr(expr, &table, row)?);
                        }
                        sum_scalars(&values)?
                    }
                };
                out.push(Column::new(name.clone(), vec![value]));
            }
            Ok(Table::new("", out))
        }
    }
}

/// Evaluate one expression at one row of `table`.
fn eval_expr(expr: &Expr, table: &Table, row: usize) -> Result<Scalar, FrameError> {
    match expr {
        Expr::Col(name) => {
            let col = table
                .column(name)
                .ok_or_else(|| FrameError::Eval(format!("column '{name}' not found")))?;
            Ok(col.values[row].clone())
        }
        Expr::Lit(s) => Ok(s.clone()),
        Expr::Eq(l, r) => {
            let lv = eval_expr(l, table, row)?;
            let rv = eval_expr(r, table, row)?;
            Ok(Scalar::Bool(scalar_eq(&lv, &rv)))
        }
        Expr::Sub(l, r) => numeric_binop(table, row, l, r, |a, b| a - b, |a, b| a - b),
        Expr::Mul(l, r) => numeric_binop(table, row, l, r, |a, b| a * b, |a, b| a * b),
        Expr::Div(l, r) => {
            let lv = as_number(&eval_expr(l, table, row)?)?;
            let rv = as_number(&eval_expr(r, table, row)?)?;
            // Division is always floating-point; IEEE specials pass through.
            Ok(Scalar::F64(lv / rv))
        }
        Expr::Cast(dt, inner) => cast_scalar(eval_expr(inner, table, row)?, *dt),
    }
}

/// Equality with numeric promotion: 1i64 == 1.0f64 holds.
fn scalar_eq(a: &Scalar, b: &Scalar) -> bool {
    use Scalar::*;
    match (a, b) {
        (I64(x), F64(y)) | (F64(y), I64(x)) => (*x as f64) == *y,
        _ => a == b,
    }
}

fn numeric_binop(
    table: &Table,
    row: usize,
    l: &Expr,
    r: &Expr,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Scalar, FrameError> {
    let lv = eval_expr(l, table, row)?;
    let rv = eval_expr(r, table, row)?;
    match (&lv, &rv) {
        (Scalar::Null, _) | (_, Scalar::Null) => Ok(Scalar::Null),
        (Scalar::I64(a), Scalar::I64(b)) => Ok(Scalar::I64(int_op(*a, *b))),
        _ => Ok(Scalar::F64(float_op(as_number(&lv)?, as_number(&rv)?))),
    }
}

fn as_number(s: &Scalar) -> Result<f64, FrameError> {
    match s {
        Scalar::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Scalar::I64(i) => Ok(*i as f64),
        Scalar::F64(f) => Ok(*f),
        other => Err(FrameError::Eval(format!(
            "expected a numeric value, got {other:?}"
        ))),
    }
}

fn cast_scalar(value: Scalar, dt: DataType) -> Result<Scalar, FrameError> {
    use Scalar::*;
    match (dt, value) {
        (DataType::Int64, Bool(b)) => Ok(I64(b as i64)),
        (DataType::Int64, I64(i)) => Ok(I64(i)),
        (DataType::Int64, F64(f)) => Ok(I64(f as i64)),
        (DataType::Float64, v) => Ok(F64(as_number(&v)?)),
        (DataType::Boolean, Bool(b)) => Ok(Bool(b)),
        (DataType::Utf8, Str(s)) => Ok(Str(s)),
        (dt, v) => Err(FrameError::Eval(format!("cannot cast {v:?} to {dt:?}"))),
    }
}

/// Sum a column of values; stays integral when every input is integral.
fn sum_scalars(values: &[Scalar]) -> Result<Scalar, FrameError> {
    let all_int = values
        .iter()
        .all(|v| matches!(v, Scalar::I64(_) | Scalar::Bool(_)));
    if all_int {
        let mut acc: i64 = 0;
        for v in values {
            acc += match v {
                Scalar::I64(i) => *i,
                Scalar::Bool(b) => *b as i64,
                _ => unreachable!(),
            };
        }
        Ok(Scalar::I64(acc))
    } else {
        let mut acc = 0.0f64;
        for v in values {
            acc += as_number(v)?;
        }
        Ok(Scalar::F64(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::expr::Expr as E;

    fn labels(tag: &str, col: &str, values: &[i64]) -> Table {
        Table::new(
            tag,
            vec![Column::new(
                col,
                values.iter().map(|v| Scalar::I64(*v)).collect(),
            )],
        )
    }

    #[test]
    fn scan_selects_by_tag() {
        let t = labels("y_true", "y", &[1, 2]);
        let out = execute(&TablePlan::scan("y_true"), &[t.clone()]).unwrap();
        assert_eq!(out, t);
        assert!(matches!(
            execute(&TablePlan::scan("missing"), &[t]),
            Err(FrameError::Plan(_))
        ));
    }

    #[test]
    fn match_and_count_aggregate() {
        let y_true = labels("y_true", "y_true", &[1, 0, 1, 1, 0]);
        let y_pred = labels("y_pred", "y_pred", &[1, 0, 0, 1, 0]);
        let plan = TablePlan::concat(vec![TablePlan::scan("y_true"), TablePlan::scan("y_pred")])
            .map(vec![(
                "match".to_string(),
                E::cast(DataType::Int64, E::eq(E::col("y_true"), E::col("y_pred"))),
            )])
            .aggregate(vec![
                ("match".to_string(), AggExpr::Sum(E::col("match"))),
                ("total".to_string(), AggExpr::Count(E::col("match"))),
            ]);
        let out = execute(&plan, &[y_true, y_pred]).unwrap();
        assert_eq!(out.to_f64_row().unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn arithmetic_promotion() {
        let t = Table::new(
            "t",
            vec![
                Column::new("a", vec![Scalar::I64(3), Scalar::I64(5)]),
                Column::new("b", vec![Scalar::F64(2.5), Scalar::F64(5.0)]),
            ],
        );
        let plan = TablePlan::scan("t").map(vec![
            (
                "d".to_string(),
                E::mul(
                    E::sub(E::col("a"), E::col("b")),
                    E::sub(E::col("a"), E::col("b")),
                ),
            ),
            ("q".to_string(), E::div(E::col("a"), E::col("b"))),
        ]);
        let out = execute(&plan, &[t]).unwrap();
        assert_eq!(out.column("d").unwrap().values[0], Scalar::F64(0.25));
        assert_eq!(out.column("q").unwrap().values[1], Scalar::F64(1.0));
    }

    #[test]
    fn concat_mismatched_rows_is_schema_error() {
        let a = labels("a", "x", &[1, 2]);
        let b = labels("b", "y", &[1]);
        let plan = TablePlan::concat(vec![TablePlan::scan("a"), TablePlan::scan("b")]);
        assert!(matches!(
            execute(&plan, &[a, b]),
            Err(FrameError::Schema(_))
        ));
    }

    #[test]
    fn aggregate_over_empty_input_counts_zero() {
        let t = labels("t", "x", &[]);
        let plan = TablePlan::scan("t").aggregate(vec![
            ("sum".to_string(), AggExpr::Sum(E::col("x"))),
            ("n".to_string(), AggExpr::Count(E::col("x"))),
        ]);
        let out = execute(&plan, &[t]).unwrap();
        assert_eq!(out.to_f64_row().unwrap(), vec![0.0, 0.0]);
    }
}
