//! Text syntax for access policies.
//!
//! ```text
//! expr   := term ("or" term)*
//! term   := factor ("and" factor)*
//! factor := "(" expr ")" | NAME | "\"" QUOTED "\""
//! ```
//!
//! Keywords are case-insensitive, `and` binds tighter than `or`, and both fold
//! left-associatively. Names may contain ASCII letters, digits and `_:.@/-`;
//! anything else must be quoted.

use core::fmt;

use tracing::instrument;

use crate::{AccessTree, Attribute, Error, FieldElement, PolicyLimits};

#[derive(Clone, Debug, PartialEq, Eq)]
enum TokenKind {
    Open,
    Close,
    And,
    Or,
    Name(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("`(`"),
            Self::Close => f.write_str("`)`"),
            Self::And => f.write_str("`and`"),
            Self::Or => f.write_str("`or`"),
            Self::Name(name) => write!(f, "attribute `{name}`"),
        }
    }
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn syntax(position: usize, reason: impl Into<String>) -> Error {
    Error::PolicySyntax {
        position,
        reason: reason.into(),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '@' | '/' | '-')
}

fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Open,
                    offset,
                });
            }
            ')' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Close,
                    offset,
                });
            }
            '"' => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(syntax(offset, "unterminated quoted attribute"));
                }
                if name.is_empty() {
                    return Err(syntax(offset, "empty quoted attribute"));
                }
                tokens.push(Token {
                    kind: TokenKind::Name(name),
                    offset,
                });
            }
            c if is_name_char(c) => {
                let mut word = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                let kind = if word.eq_ignore_ascii_case("and") {
                    TokenKind::And
                } else if word.eq_ignore_ascii_case("or") {
                    TokenKind::Or
                } else {
                    TokenKind::Name(word)
                };
                tokens.push(Token { kind, offset });
            }
            other => return Err(syntax(offset, format!("unexpected character `{other}`"))),
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    leaves: usize,
    end: usize,
    limits: &'a PolicyLimits,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expr<F: FieldElement>(&mut self) -> Result<AccessTree<F>, Error> {
        let mut acc = self.term()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.term()?;
            acc = AccessTree::Or(Box::new(acc), Box::new(rhs));
        }
        Ok(acc)
    }

    fn term<F: FieldElement>(&mut self) -> Result<AccessTree<F>, Error> {
        let mut acc = self.factor()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.factor()?;
            acc = AccessTree::And(Box::new(acc), Box::new(rhs));
        }
        Ok(acc)
    }

    fn factor<F: FieldElement>(&mut self) -> Result<AccessTree<F>, Error> {
        let token = self
            .advance()
            .ok_or_else(|| syntax(self.end, "expected attribute or `(`, found end of policy"))?;
        match token.kind {
            TokenKind::Name(name) => {
                self.leaves += 1;
                if self.leaves > self.limits.max_leaves {
                    return Err(Error::PolicyTooLarge(format!(
                        "more than {} attributes",
                        self.limits.max_leaves
                    )));
                }
                Ok(AccessTree::Leaf(Attribute::from_name(&name)))
            }
            TokenKind::Open => {
                self.depth += 1;
                if self.depth > self.limits.max_depth {
                    return Err(Error::PolicyTooLarge(format!(
                        "nesting deeper than {}",
                        self.limits.max_depth
                    )));
                }
                let inner = self.expr()?;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::Close,
                        ..
                    }) => {}
                    Some(other) => {
                        return Err(syntax(
                            other.offset,
                            format!("expected `)`, found {}", other.kind),
                        ));
                    }
                    None => return Err(syntax(token.offset, "unclosed `(`")),
                }
                self.depth -= 1;
                Ok(inner)
            }
            other => Err(syntax(
                token.offset,
                format!("expected attribute or `(`, found {other}"),
            )),
        }
    }
}

/// Parses `text` into an access tree using [`PolicyLimits::default`].
///
/// ```rust
/// use lsss::{AccessTree, Fr, parse_policy};
///
/// let tree = parse_policy::<Fr>("admin or (staff and \"on call\")")?;
/// let expected = AccessTree::or([
///     AccessTree::leaf("admin"),
///     AccessTree::and([AccessTree::leaf("staff"), AccessTree::leaf("on call")])?,
/// ])?;
/// assert_eq!(tree, expected);
/// # Ok::<(), lsss::Error>(())
/// ```
pub fn parse_policy<F: FieldElement>(text: &str) -> Result<AccessTree<F>, Error> {
    parse_policy_with_limits(text, &PolicyLimits::default())
}

/// Parses `text` into an access tree, rejecting policies beyond `limits`.
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn parse_policy_with_limits<F: FieldElement>(
    text: &str,
    limits: &PolicyLimits,
) -> Result<AccessTree<F>, Error> {
    limits.validate()?;
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
        leaves: 0,
        end: text.len(),
        limits,
    };
    let tree = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(syntax(
            token.offset,
            format!("unexpected {} after complete policy", token.kind),
        ));
    }
    Ok(tree)
}
