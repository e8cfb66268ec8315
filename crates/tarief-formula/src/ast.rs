//! Formula Abstract Syntax Tree types

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),
    /// Column identifier or default constant name (lowercase)
    Symbol(String),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

impl FormulaExpr {
    /// Names referenced by this expression, in order of first appearance
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::Symbol(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_symbols(out);
                right.collect_symbols(out);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_symbols(out),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

#[cfg(test)]
mod tests {
    use crate::parse_formula;

    #[test]
    fn test_symbols_deduplicated_in_order() {
        let ast = parse_formula("prijs * aantal + prijs / km").unwrap();
        assert_eq!(ast.symbols(), vec!["prijs", "aantal", "km"]);

        let ast = parse_formula("2 * (3 + 4)").unwrap();
        assert!(ast.symbols().is_empty());
    }
}
