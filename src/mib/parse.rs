//! Minimal SMIv1/SMIv2 module parser.
//!
//! Only OID assignments are extracted:
//!
//! ```text
//! name OBJECT IDENTIFIER ::= { parent 1 }
//! name OBJECT-TYPE ... ::= { parent 2 }
//! name NOTIFICATION-TYPE ... ::= { parent 0 3 }
//! name MODULE-IDENTITY ... ::= { iso(1) org(3) 6 }
//! ```
//!
//! Imports, type assignments, textual conventions and macro bodies are skipped.

use crate::error::{Error, Result};

/// Macros whose instances are OID assignments.
const OID_MACROS: &[&str] = &[
    "MODULE-IDENTITY",
    "OBJECT-IDENTITY",
    "OBJECT-TYPE",
    "NOTIFICATION-TYPE",
    "OBJECT-GROUP",
    "NOTIFICATION-GROUP",
    "MODULE-COMPLIANCE",
    "AGENT-CAPABILITIES",
];

/// A parsed module, before OIDs are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    pub name: String,
    /// Modules named in `FROM` clauses of the IMPORTS section.
    pub imports: Vec<String>,
    pub assignments: Vec<Assignment>,
}

/// `name ::= { parent arcs... }`. A `None` parent means `arcs` is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub parent: Option<String>,
    pub arcs: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Number(u32),
    Assign,
    Open,
    Close,
    LParen,
    RParen,
    Punct,
}

/// Parse SMI module text.
pub fn parse(text: &str) -> Result<ModuleDef> {
    let tokens = tokenize(text);
    let mib_error = |module: &str, reason: &str| {
        Error::Mib {
            module: module.into(),
            reason: reason.into(),
        }
        .boxed()
    };

    let name = tokens
        .windows(2)
        .find_map(|pair| match pair {
            [Token::Word(name), Token::Word("DEFINITIONS")] => Some(name.to_string()),
            _ => None,
        })
        .ok_or_else(|| mib_error("?", "missing DEFINITIONS ::= BEGIN header"))?;

    let mut imports = Vec::new();
    let mut assignments = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::Word("IMPORTS") => {
                while i < tokens.len() && !matches!(tokens[i], Token::Punct) {
                    if let (Token::Word("FROM"), Some(Token::Word(module))) =
                        (&tokens[i], tokens.get(i + 1))
                    {
                        imports.push(module.to_string());
                    }
                    i += 1;
                }
            }
            Token::Word(word) if is_value_name(word) => {
                if let Some(body_start) = assignment_body(&tokens, i) {
                    let (assignment, next) =
                        parse_value(&tokens, body_start, word).ok_or_else(|| {
                            mib_error(&name, &format!("malformed OID value for {word}"))
                        })?;
                    assignments.push(assignment);
                    i = next;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    tracing::trace!(target: "snmp_adapter::mib", { mib.module = %name, mib.assignments = assignments.len() }, "parsed MIB module");
    Ok(ModuleDef {
        name,
        imports,
        assignments,
    })
}

fn is_value_name(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_lowercase())
}

/// If `tokens[at]` starts an OID assignment, the index just past its `::=`.
fn assignment_body(tokens: &[Token<'_>], at: usize) -> Option<usize> {
    match tokens.get(at + 1)? {
        Token::Word("OBJECT") => match (tokens.get(at + 2)?, tokens.get(at + 3)?) {
            (Token::Word("IDENTIFIER"), Token::Assign) => Some(at + 4),
            _ => None,
        },
        Token::Word(mac) if OID_MACROS.contains(mac) => {
            let offset = tokens[at + 2..].iter().position(|t| *t == Token::Assign)?;
            Some(at + 2 + offset + 1)
        }
        _ => None,
    }
}

/// Parse `{ parent n name(n) ... }` starting at `start`.
fn parse_value<'a>(
    tokens: &[Token<'a>],
    start: usize,
    name: &str,
) -> Option<(Assignment, usize)> {
    if tokens.get(start)? != &Token::Open {
        return None;
    }
    let mut i = start + 1;
    let mut parent = None;
    let mut arcs = Vec::new();

    loop {
        match tokens.get(i)? {
            Token::Close => break,
            Token::Number(n) => {
                arcs.push(*n);
                i += 1;
            }
            Token::Word(word) => {
                // name(n) carries its own number
                if let (Some(Token::LParen), Some(Token::Number(n)), Some(Token::RParen)) =
                    (tokens.get(i + 1), tokens.get(i + 2), tokens.get(i + 3))
                {
                    arcs.push(*n);
                    i += 4;
                } else if arcs.is_empty() && parent.is_none() {
                    parent = Some(word.to_string());
                    i += 1;
                } else {
                    return None;
                }
            }
            _ => return None,
        }
    }

    if parent.is_none() && arcs.is_empty() {
        return None;
    }
    Some((
        Assignment {
            name: name.to_string(),
            parent,
            arcs,
        },
        i + 1,
    ))
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b if b.is_ascii_whitespace() => i += 1,
            // Comments run to the next "--" or end of line.
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i += 2;
                while i < bytes.len() && bytes[i] != b'\n' {
                    if bytes[i] == b'-' && bytes.get(i + 1) == Some(&b'-') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += 1;
                }
                i += 1;
            }
            b':' if text[i..].starts_with("::=") => {
                tokens.push(Token::Assign);
                i += 3;
            }
            b'{' => {
                tokens.push(Token::Open);
                i += 1;
            }
            b'}' => {
                tokens.push(Token::Close);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b';' => {
                tokens.push(Token::Punct);
                i += 1;
            }
            b if b.is_ascii_alphanumeric() => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b'_')
                {
                    // a trailing "--" starts a comment
                    if bytes[i] == b'-' && bytes.get(i + 1) == Some(&b'-') {
                        break;
                    }
                    i += 1;
                }
                let word = &text[start..i];
                match word.parse::<u32>() {
                    Ok(n) => tokens.push(Token::Number(n)),
                    Err(_) => tokens.push(Token::Word(word)),
                }
            }
            // Separators, ranges and anything else that never matters here.
            _ => i += 1,
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
ACME-MIB DEFINITIONS ::= BEGIN

IMPORTS
    MODULE-IDENTITY, OBJECT-TYPE, Integer32, enterprises
        FROM SNMPv2-SMI
    DisplayString
        FROM SNMPv2-TC;

acmeMIB MODULE-IDENTITY
    LAST-UPDATED "202401010000Z"
    ORGANIZATION "ACME -- not a comment"
    DESCRIPTION  "Widgets { 1 2 }."
    ::= { enterprises 99999 }

acmeObjects OBJECT IDENTIFIER ::= { acmeMIB 1 }   -- objects

AcmeEntry ::= SEQUENCE {
    acmeIndex   Integer32,
    acmeOid     OBJECT IDENTIFIER
}

acmeLevel OBJECT-TYPE
    SYNTAX      INTEGER { low(1), high(2) }
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "Level."
    DEFVAL      { low }
    ::= { acmeObjects 1 }

acmeRoot OBJECT IDENTIFIER ::= { iso(1) org(3) dod(6) 1 }

END
"#;

    #[test]
    fn extracts_oid_assignments() {
        let module = parse(SAMPLE).unwrap();
        assert_eq!(module.name, "ACME-MIB");
        assert_eq!(module.imports, ["SNMPv2-SMI", "SNMPv2-TC"]);

        let names: Vec<&str> = module.assignments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["acmeMIB", "acmeObjects", "acmeLevel", "acmeRoot"]);

        assert_eq!(
            module.assignments[0],
            Assignment {
                name: "acmeMIB".into(),
                parent: Some("enterprises".into()),
                arcs: vec![99999],
            }
        );
        assert_eq!(module.assignments[2].parent.as_deref(), Some("acmeObjects"));
        assert_eq!(module.assignments[3].parent, None);
        assert_eq!(module.assignments[3].arcs, vec![1, 3, 6, 1]);
    }

    #[test]
    fn missing_header_is_an_error() {
        let err = parse("foo OBJECT IDENTIFIER ::= { bar 1 }").unwrap_err();
        assert!(matches!(*err, Error::Mib { .. }));
    }

    #[test]
    fn comments_are_skipped() {
        let module = parse(
            "X-MIB DEFINITIONS ::= BEGIN\n-- a OBJECT IDENTIFIER ::= { b 1 }\nc OBJECT IDENTIFIER ::= { d 2 } -- e\nEND",
        )
        .unwrap();
        assert_eq!(module.assignments.len(), 1);
        assert_eq!(module.assignments[0].name, "c");
    }
}
