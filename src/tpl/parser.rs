use crate::error::Result;
use crate::tpl::ast::AstNode;
use crate::tpl::grammar::{self, is_line_break};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A directive located in the template: `{{` at `start`, body in
/// `body_start..body_end`, `}}` right after the body.
struct Directive {
    start: usize,
    body_start: usize,
    body_end: usize,
}

/// Single-pass parser turning a template into a flat list of nodes.
///
/// Blocks are not nested in the output: `{{#...}}` and `{{/}}` become
/// `Block` / `EndBlock` markers and their pairing is checked at render time.
struct Parser<'a> {
    /// The original template string being parsed.
    template: &'a str,
    /// Current byte position in the template.
    pos: usize,
    nodes: Vec<AstNode>,
}

impl<'a> Parser<'a> {
    fn new(template: &'a str) -> Self {
        Self {
            template,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<AstNode>> {
        let template = self.template;
        while self.pos < template.len() {
            match find_directive(template, self.pos) {
                Some(directive) => {
                    self.append_text(&template[self.pos..directive.start]);
                    self.handle_directive(&directive)?;
                    self.pos = directive.body_end + CLOSE.len();
                }
                None => {
                    self.append_text(&template[self.pos..]);
                    self.pos = template.len();
                }
            }
        }
        Ok(self.nodes)
    }

    fn handle_directive(&mut self, directive: &Directive) -> Result<()> {
        let body = &self.template[directive.body_start..directive.body_end];
        if let Some(test) = body.strip_prefix('#') {
            let test = grammar::classify_test(test)?;
            self.nodes.push(AstNode::Block(test));
        } else if body.starts_with('/') {
            self.nodes.push(AstNode::EndBlock {
                offset: directive.start,
            });
        } else if !body.is_empty() {
            let eval = grammar::classify_eval(body)?;
            self.nodes.push(AstNode::Subst(eval));
        }
        Ok(())
    }

    /// Append text, merging with the previous text node when possible.
    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(AstNode::Text(last_text)) = self.nodes.last_mut() {
            last_text.push_str(text);
        } else {
            self.nodes.push(AstNode::Text(text.to_string()));
        }
    }
}

/// Parses a template into nodes, classifying every directive.
pub fn parse_template(template: &str) -> Result<Vec<AstNode>> {
    Parser::new(template).parse()
}

/// Finds the leftmost `{{` at or after `from` that is closed by `}}` on the
/// same line. The body ends at the first such `}}`.
fn find_directive(s: &str, from: usize) -> Option<Directive> {
    let mut search = from;
    while let Some(rel) = s[search..].find(OPEN) {
        let start = search + rel;
        let body_start = start + OPEN.len();
        let line = &s[body_start..];
        let line = line
            .find(is_line_break)
            .map_or(line, |end| &line[..end]);
        if let Some(close) = line.find(CLOSE) {
            return Some(Directive {
                start,
                body_start,
                body_end: body_start + close,
            });
        }
        // An unclosed `{{` is literal; a later one (even `{{{`) may still open.
        search = start + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::tpl::ast::{EvalExpr, TestExpr};

    fn text(s: &str) -> AstNode {
        AstNode::Text(s.to_string())
    }

    fn var(s: &str) -> AstNode {
        AstNode::Subst(EvalExpr::Var(s.to_string()))
    }

    #[test]
    fn test_parse_simple_text() {
        let nodes = parse_template("hello world").unwrap();
        assert_eq!(nodes, vec![text("hello world")]);
    }

    #[test]
    fn test_parse_var() {
        let nodes = parse_template("hello {{name}}!").unwrap();
        assert_eq!(nodes, vec![text("hello "), var("name"), text("!")]);
    }

    #[test]
    fn test_parse_block() {
        let nodes = parse_template("{{#a?}}in{{/a}}").unwrap();
        assert_eq!(
            nodes,
            vec![
                AstNode::Block(TestExpr::Exists {
                    name: "a".to_string()
                }),
                text("in"),
                AstNode::EndBlock { offset: 9 },
            ]
        );
    }

    #[test]
    fn test_empty_directive_is_dropped() {
        let nodes = parse_template("a{{}}b").unwrap();
        assert_eq!(nodes, vec![text("ab")]);
    }

    #[test]
    fn test_unclosed_markers_are_literal() {
        let nodes = parse_template("a {{ b").unwrap();
        assert_eq!(nodes, vec![text("a {{ b")]);

        // A directive cannot span lines.
        let nodes = parse_template("{{x\n}}").unwrap();
        assert_eq!(nodes, vec![text("{{x\n}}")]);
    }

    #[test]
    fn test_lazy_close() {
        let nodes = parse_template("{{a}}}").unwrap();
        assert_eq!(nodes, vec![var("a"), text("}")]);

        // The leftmost `{{` wins, so the body keeps the extra brace.
        assert_eq!(
            parse_template("{{{a}}"),
            Err(TemplateError::InvalidEvalExpression("{a".to_string()))
        );

        // An opener without a close on its line does not hide a later one.
        let nodes = parse_template("{{ x\n{{a}}").unwrap();
        assert_eq!(nodes, vec![text("{{ x\n"), var("a")]);
    }

    #[test]
    fn test_invalid_directives() {
        assert_eq!(
            parse_template("{{#a}}"),
            Err(TemplateError::InvalidTestExpression("a".to_string()))
        );
        assert_eq!(
            parse_template("x {{a b}}"),
            Err(TemplateError::InvalidEvalExpression("a b".to_string()))
        );
    }
}
