use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqOp {
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Lt,
    Ge,
    Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        };
        f.write_str(sym)
    }
}

/// A classified test-expression (the body of `{{#...}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestExpr {
    /// `name=value?`, `name==value?`, `name!=value?`
    Compare { name: String, op: EqOp, value: String },
    /// `left>right?` and friends, compared as integers.
    Numeric {
        left: String,
        op: CmpOp,
        right: String,
    },
    /// `name?`
    Exists { name: String },
}

/// A classified eval-expression (the body of a substitution directive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalExpr {
    /// `name=value?then:otherwise`
    TernaryEq {
        name: String,
        value: String,
        then: String,
        otherwise: String,
    },
    /// `name?then:otherwise`
    Ternary {
        name: String,
        then: String,
        otherwise: String,
    },
    /// `left<op>digits`
    Arith {
        left: String,
        op: ArithOp,
        right: String,
    },
    /// `name`
    Var(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Text(String),
    Block(TestExpr),
    /// Byte offset of the closing directive in the source.
    EndBlock { offset: usize },
    Subst(EvalExpr),
}
