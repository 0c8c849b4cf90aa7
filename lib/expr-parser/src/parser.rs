use log::debug;

use crate::error::{ParseError, ParseSnafu, Result};
use crate::expr::{BinOp, Expr};
use crate::lexer::{tokenize, LexOptions};
use crate::token::{Token, TokenKind};

/// Deepest formula accepted, counting both tree height and parenthesis nesting.
pub const MAX_DEPTH: usize = 512;

// A parsed subtree and its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Node { expr, height: 1 }
    }
}

/// Recursive-descent parser over a token stream.
///
/// Precedence from loosest to tightest: `<->`, `->`, `|`, `&`, `~`.
/// `<->` and `->` associate to the right, `|` and `&` to the left.
/// Formulas nested deeper than [`MAX_DEPTH`] are rejected.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    // Current recursion depth of the descent.
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().map_or(false, Token::is_eof) {
            let position = tokens.last().map_or(0, |t| t.position + 1);
            tokens.push(Token::new(TokenKind::Eof, position));
        }
        Parser { tokens, pos: 0, depth: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error<T>(&self, expected: &str) -> Result<T, ParseError> {
        let token = self.peek();
        ParseSnafu {
            position: token.position,
            expected,
            found: token.kind.to_string(),
        }
        .fail()
    }

    fn too_deep<T>(&self) -> Result<T, ParseError> {
        self.error(&format!("a formula nested at most {} levels deep", MAX_DEPTH))
    }

    // Enters one level of recursion.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return self.too_deep();
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn join(&self, op: BinOp, lhs: Node, rhs: Node) -> Result<Node, ParseError> {
        let height = lhs.height.max(rhs.height) + 1;
        if height > MAX_DEPTH {
            return self.too_deep();
        }
        Ok(Node {
            expr: Expr::binop(op, lhs.expr, rhs.expr),
            height,
        })
    }

    /// Parses the whole stream as one formula.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let node = self.parse_biconditional()?;
        if !self.peek().is_eof() {
            return self.error("an operator or end of input");
        }
        debug!("parsed = {}", node.expr);
        Ok(node.expr)
    }

    fn parse_biconditional(&mut self) -> Result<Node, ParseError> {
        let lhs = self.parse_implication()?;
        if self.eat(&TokenKind::Iff) {
            self.descend()?;
            let rhs = self.parse_biconditional()?;
            self.ascend();
            return self.join(BinOp::Iff, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_implication(&mut self) -> Result<Node, ParseError> {
        let lhs = self.parse_disjunction()?;
        if self.eat(&TokenKind::Implies) {
            self.descend()?;
            let rhs = self.parse_implication()?;
            self.ascend();
            return self.join(BinOp::Imply, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_disjunction(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.parse_conjunction()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.parse_conjunction()?;
            lhs = self.join(BinOp::Or, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_conjunction(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.parse_negation()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.parse_negation()?;
            lhs = self.join(BinOp::And, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_negation(&mut self) -> Result<Node, ParseError> {
        if self.eat(&TokenKind::Not) {
            self.descend()?;
            let arg = self.parse_negation()?;
            self.ascend();
            if arg.height >= MAX_DEPTH {
                return self.too_deep();
            }
            return Ok(Node {
                expr: Expr::negation(arg.expr),
                height: arg.height + 1,
            });
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Variable(name) => {
                self.advance();
                Ok(Node::leaf(Expr::Var(name.to_string())))
            }
            TokenKind::Const(b) => {
                self.advance();
                Ok(Node::leaf(Expr::Const(b)))
            }
            TokenKind::LParen => {
                self.advance();
                self.descend()?;
                let node = self.parse_biconditional()?;
                self.ascend();
                if !self.eat(&TokenKind::RParen) {
                    return self.error("')'");
                }
                Ok(node)
            }
            _ => self.error("a variable, a constant, '~' or '('"),
        }
    }
}

pub fn parse_expr(input: &str) -> Result<Expr> {
    parse_expr_with(input, LexOptions::default())
}

pub fn parse_expr_with(input: &str, options: LexOptions) -> Result<Expr> {
    debug!("parse_expr({:?}, {:?})", input, options);
    let tokens = tokenize(input, options)?;
    let expr = Parser::new(tokens).parse()?;
    Ok(expr)
}
