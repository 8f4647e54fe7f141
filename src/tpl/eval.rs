use crate::error::{Result, TemplateError};
use crate::tpl::ast::{ArithOp, CmpOp, EqOp, EvalExpr, TestExpr};
use crate::tpl::grammar::{self, is_digits};
use crate::vars::VarSource;

/// Evaluates a test-expression such as `lang=en?`, `n>=limit?` or `name?`.
///
/// An unknown variable makes an equality test or an existence test false;
/// numeric comparisons require both sides to resolve to integers.
pub fn test(expr: &str, vars: &dyn VarSource) -> Result<bool> {
    test_expr(&grammar::classify_test(expr)?, vars)
}

/// Evaluates an eval-expression such as `name`, `n+1` or `a=1?yes:no`.
///
/// A plain substitution of an unknown variable yields an empty string.
pub fn eval(expr: &str, vars: &dyn VarSource) -> Result<String> {
    eval_expr(&grammar::classify_eval(expr)?, vars)
}

pub(crate) fn test_expr(expr: &TestExpr, vars: &dyn VarSource) -> Result<bool> {
    match expr {
        TestExpr::Compare { name, op, value } => Ok(match vars.var(name) {
            None => false,
            Some(stored) => match op {
                EqOp::Eq => stored == value.as_str(),
                EqOp::Ne => stored != value.as_str(),
            },
        }),
        TestExpr::Numeric { left, op, right } => {
            let l = int_or_ref(left, vars)?;
            let r = int_or_ref(right, vars)?;
            Ok(match op {
                CmpOp::Gt => l > r,
                CmpOp::Lt => l < r,
                CmpOp::Ge => l >= r,
                CmpOp::Le => l <= r,
            })
        }
        TestExpr::Exists { name } => Ok(vars.contains_var(name)),
    }
}

pub(crate) fn eval_expr(expr: &EvalExpr, vars: &dyn VarSource) -> Result<String> {
    match expr {
        EvalExpr::TernaryEq {
            name,
            value,
            then,
            otherwise,
        } => Ok(if vars.var(name) == Some(value.as_str()) {
            then.clone()
        } else {
            otherwise.clone()
        }),
        EvalExpr::Ternary {
            name,
            then,
            otherwise,
        } => Ok(if vars.contains_var(name) {
            then.clone()
        } else {
            otherwise.clone()
        }),
        EvalExpr::Arith { left, op, right } => {
            let l = int_or_ref(left, vars)?;
            let r = int_or_ref(right, vars)?;
            let divide_by_zero =
                || TemplateError::DivisionByZero(format!("{}{}{}", left, op, right));
            let n = match op {
                ArithOp::Add => l.wrapping_add(r),
                ArithOp::Sub => l.wrapping_sub(r),
                ArithOp::Mul => l.wrapping_mul(r),
                ArithOp::Div => l.checked_div(r).ok_or_else(divide_by_zero)?,
                ArithOp::Rem => l.checked_rem(r).ok_or_else(divide_by_zero)?,
            };
            Ok(n.to_string())
        }
        EvalExpr::Var(name) => Ok(vars.var(name).unwrap_or_default().to_string()),
    }
}

/// Resolves an operand that is either a digit literal or the name of a
/// variable holding one.
///
/// Operands are non-negative and must fit an `i32`.
fn int_or_ref(token: &str, vars: &dyn VarSource) -> Result<i32> {
    let digits = if is_digits(token) {
        Some(token)
    } else {
        vars.var(token).filter(|v| is_digits(v))
    };
    digits
        .and_then(|d| d.parse::<i32>().ok())
        .ok_or_else(|| TemplateError::NotAnInteger(token.to_string()))
}
