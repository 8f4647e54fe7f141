//! Shape matchers for the two expression families.
//!
//! Each family is a fixed table of matchers tried in order; the first one that
//! recognises the whole expression decides its meaning. Nothing is evaluated
//! here, classification only looks at the text.
//!
//! A name is one or more ASCII word characters (`[A-Za-z0-9_]`). Free text
//! (comparison values, ternary branches) may be anything except a line break.

use crate::error::{Result, TemplateError};
use crate::tpl::ast::{ArithOp, CmpOp, EqOp, EvalExpr, TestExpr};
use log::trace;

type TestForm = fn(&str) -> Option<TestExpr>;
type EvalForm = fn(&str) -> Option<EvalExpr>;

static TEST_FORMS: [(&str, TestForm); 3] = [
    ("compare", match_compare),
    ("numeric", match_numeric),
    ("exists", match_exists),
];

static EVAL_FORMS: [(&str, EvalForm); 4] = [
    ("ternary-eq", match_ternary_eq),
    ("ternary", match_ternary),
    ("arith", match_arith),
    ("var", match_var),
];

pub fn classify_test(expr: &str) -> Result<TestExpr> {
    if !has_line_break(expr) {
        for (form, matcher) in TEST_FORMS.iter() {
            if let Some(test) = matcher(expr) {
                trace!("test expression {:?} classified as {}", expr, form);
                return Ok(test);
            }
        }
    }
    Err(TemplateError::InvalidTestExpression(expr.to_string()))
}

pub fn classify_eval(expr: &str) -> Result<EvalExpr> {
    if !has_line_break(expr) {
        for (form, matcher) in EVAL_FORMS.iter() {
            if let Some(eval) = matcher(expr) {
                trace!("eval expression {:?} classified as {}", expr, form);
                return Ok(eval);
            }
        }
    }
    Err(TemplateError::InvalidEvalExpression(expr.to_string()))
}

pub(crate) fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn has_line_break(s: &str) -> bool {
    s.contains(is_line_break)
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of the leading run of word characters. Always a char boundary.
fn name_len(s: &str) -> usize {
    s.bytes().take_while(|b| is_word(*b)).count()
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_word)
}

pub(crate) fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `s` into a leading name and the rest, if the name is non-empty.
fn split_name(s: &str) -> Option<(&str, &str)> {
    let n = name_len(s);
    (n > 0).then(|| s.split_at(n))
}

fn match_compare(expr: &str) -> Option<TestExpr> {
    let (name, rest) = split_name(expr.strip_suffix('?')?)?;
    let (op, value) = if let Some(v) = rest.strip_prefix("!=") {
        (EqOp::Ne, v)
    } else if let Some(v) = rest.strip_prefix("==").filter(|v| !v.is_empty()) {
        (EqOp::Eq, v)
    } else {
        (EqOp::Eq, rest.strip_prefix('=')?)
    };
    if value.is_empty() {
        return None;
    }
    Some(TestExpr::Compare {
        name: name.to_string(),
        op,
        value: value.to_string(),
    })
}

fn match_numeric(expr: &str) -> Option<TestExpr> {
    let (left, rest) = split_name(expr.strip_suffix('?')?)?;
    // Two-character operators first so `>=` is not read as `>` followed by `=`.
    let ops = [
        (">=", CmpOp::Ge),
        ("<=", CmpOp::Le),
        (">", CmpOp::Gt),
        ("<", CmpOp::Lt),
    ];
    for (sym, op) in ops {
        if let Some(right) = rest.strip_prefix(sym)
            && is_name(right)
        {
            return Some(TestExpr::Numeric {
                left: left.to_string(),
                op,
                right: right.to_string(),
            });
        }
    }
    None
}

fn match_exists(expr: &str) -> Option<TestExpr> {
    let name = expr.strip_suffix('?')?;
    is_name(name).then(|| TestExpr::Exists {
        name: name.to_string(),
    })
}

fn match_ternary_eq(expr: &str) -> Option<EvalExpr> {
    let (name, rest) = split_name(expr)?;
    let rest = rest.strip_prefix('=')?;
    // The compared value is the shortest non-empty run ending at a `?`.
    let (q, _) = rest.char_indices().skip(1).find(|(_, c)| *c == '?')?;
    let (then, otherwise) = rest[q + 1..].split_once(':')?;
    Some(EvalExpr::TernaryEq {
        name: name.to_string(),
        value: rest[..q].to_string(),
        then: then.to_string(),
        otherwise: otherwise.to_string(),
    })
}

fn match_ternary(expr: &str) -> Option<EvalExpr> {
    let (name, rest) = split_name(expr)?;
    let (then, otherwise) = rest.strip_prefix('?')?.split_once(':')?;
    Some(EvalExpr::Ternary {
        name: name.to_string(),
        then: then.to_string(),
        otherwise: otherwise.to_string(),
    })
}

fn match_arith(expr: &str) -> Option<EvalExpr> {
    let (left, rest) = split_name(expr)?;
    let mut chars = rest.chars();
    let op = match chars.next()? {
        '+' => ArithOp::Add,
        '-' => ArithOp::Sub,
        '*' => ArithOp::Mul,
        '/' => ArithOp::Div,
        '%' => ArithOp::Rem,
        _ => return None,
    };
    let right = chars.as_str();
    is_digits(right).then(|| EvalExpr::Arith {
        left: left.to_string(),
        op,
        right: right.to_string(),
    })
}

fn match_var(expr: &str) -> Option<EvalExpr> {
    is_name(expr).then(|| EvalExpr::Var(expr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(name: &str, op: EqOp, value: &str) -> TestExpr {
        TestExpr::Compare {
            name: name.to_string(),
            op,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_compare_forms() {
        assert_eq!(classify_test("a=b?").unwrap(), compare("a", EqOp::Eq, "b"));
        assert_eq!(classify_test("a==b?").unwrap(), compare("a", EqOp::Eq, "b"));
        assert_eq!(classify_test("a!=b?").unwrap(), compare("a", EqOp::Ne, "b"));
        // Values may hold anything but a line break, including `?` and spaces.
        assert_eq!(
            classify_test("lang=en us??").unwrap(),
            compare("lang", EqOp::Eq, "en us?")
        );
        // `==` with nothing after it reads as `=` compared against "=".
        assert_eq!(classify_test("a==?").unwrap(), compare("a", EqOp::Eq, "="));
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(
            classify_test("n>=10?").unwrap(),
            TestExpr::Numeric {
                left: "n".to_string(),
                op: CmpOp::Ge,
                right: "10".to_string(),
            }
        );
        assert_eq!(
            classify_test("3<limit?").unwrap(),
            TestExpr::Numeric {
                left: "3".to_string(),
                op: CmpOp::Lt,
                right: "limit".to_string(),
            }
        );
    }

    #[test]
    fn test_equality_wins_over_existence() {
        assert!(matches!(
            classify_test("a=b?").unwrap(),
            TestExpr::Compare { .. }
        ));
        assert_eq!(
            classify_test("a?").unwrap(),
            TestExpr::Exists {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_tests() {
        for expr in ["", "?", "a", "a b?", "a!=?", "a>?", "a>b c?", "a?\n", "-a?"] {
            assert_eq!(
                classify_test(expr),
                Err(TemplateError::InvalidTestExpression(expr.to_string())),
                "{:?}",
                expr
            );
        }
    }

    #[test]
    fn test_eval_priority() {
        assert_eq!(
            classify_eval("a=1?yes:no").unwrap(),
            EvalExpr::TernaryEq {
                name: "a".to_string(),
                value: "1".to_string(),
                then: "yes".to_string(),
                otherwise: "no".to_string(),
            }
        );
        assert_eq!(
            classify_eval("a?yes:no").unwrap(),
            EvalExpr::Ternary {
                name: "a".to_string(),
                then: "yes".to_string(),
                otherwise: "no".to_string(),
            }
        );
        assert_eq!(
            classify_eval("count%7").unwrap(),
            EvalExpr::Arith {
                left: "count".to_string(),
                op: ArithOp::Rem,
                right: "7".to_string(),
            }
        );
        assert_eq!(
            classify_eval("name").unwrap(),
            EvalExpr::Var("name".to_string())
        );
    }

    #[test]
    fn test_ternary_splits_lazily() {
        // Value stops at the first `?`, then-branch at the first `:`.
        assert_eq!(
            classify_eval("a=x?y?b:c:d").unwrap(),
            EvalExpr::TernaryEq {
                name: "a".to_string(),
                value: "x".to_string(),
                then: "y?b".to_string(),
                otherwise: "c:d".to_string(),
            }
        );
        // Empty branches are allowed.
        assert_eq!(
            classify_eval("a?:").unwrap(),
            EvalExpr::Ternary {
                name: "a".to_string(),
                then: String::new(),
                otherwise: String::new(),
            }
        );
    }

    #[test]
    fn test_invalid_evals() {
        for expr in ["", "a b", "a?", "a+-1", "a+x", "a.b", "a=?b:c\n"] {
            assert_eq!(
                classify_eval(expr),
                Err(TemplateError::InvalidEvalExpression(expr.to_string())),
                "{:?}",
                expr
            );
        }
    }
}
