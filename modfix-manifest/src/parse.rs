use crate::error::ParseError;
use crate::syntax::{Exclude, ModFile, Replace, Require, Span};
use modfix_module::ModuleVersion;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Ident,
    Str,
    LParen,
    RParen,
    Arrow,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    /// Unquoted value.
    text: String,
    start: usize,
    end: usize,
}

/// Tokens of one line, up to any trailing `//` comment.
#[derive(Debug, Default)]
struct LexedLine {
    tokens: Vec<Token>,
}

const BLOCK_VERBS: &[&str] = &["require", "exclude", "replace", "retract"];

/// Parse manifest `content`. `name` is only used in error messages.
pub fn parse(name: &str, content: &str) -> Result<ModFile, ParseError> {
    let mut parser = Parser {
        name,
        content,
        file: ModFile::default(),
    };
    parser.run()?;
    trace!(
        manifest = name,
        require = parser.file.require.len(),
        exclude = parser.file.exclude.len(),
        replace = parser.file.replace.len(),
        "parsed manifest"
    );
    Ok(parser.file)
}

struct Parser<'a> {
    name: &'a str,
    content: &'a str,
    file: ModFile,
}

impl Parser<'_> {
    fn run(&mut self) -> Result<(), ParseError> {
        let mut block: Option<(String, usize)> = None;
        let mut offset = 0;

        for raw in self.content.split_inclusive('\n') {
            let line_start = offset;
            offset += raw.len();
            let line = self.lex(raw, line_start)?;
            if line.tokens.is_empty() {
                continue;
            }

            if let Some(verb) = block.as_ref().map(|(verb, _)| verb.clone()) {
                if line.tokens.len() == 1 && line.tokens[0].kind == TokenKind::RParen {
                    block = None;
                    continue;
                }
                self.statement(&verb, &line.tokens, &line, line.tokens[0].start)?;
                continue;
            }

            let first = &line.tokens[0];
            if first.kind != TokenKind::Ident {
                return Err(self.error(first.start, "unexpected token at start of line"));
            }
            let verb = first.text.clone();
            let rest = &line.tokens[1..];

            if rest.first().map(|t| &t.kind) == Some(&TokenKind::LParen) {
                if !BLOCK_VERBS.contains(&verb.as_str()) {
                    return Err(self.error(first.start, format!("{verb} does not take a block")));
                }
                match rest.len() {
                    1 => block = Some((verb, first.start)),
                    2 if rest[1].kind == TokenKind::RParen => {}
                    _ => return Err(self.error(rest[1].start, "syntax error after (")),
                }
                continue;
            }

            self.statement(&verb, rest, &line, first.start)?;
        }

        if let Some((verb, start)) = block {
            return Err(self.error(start, format!("unterminated {verb} block")));
        }
        Ok(())
    }

    fn statement(
        &mut self,
        verb: &str,
        args: &[Token],
        line: &LexedLine,
        start: usize,
    ) -> Result<(), ParseError> {
        let end = line.tokens.last().map(|t| t.end).unwrap_or(start);
        let syntax = Span { start, end };
        let at = args.first().map(|t| t.start).unwrap_or(start);

        // module, go, toolchain and retract are checked but not kept.
        match verb {
            "module" | "go" | "toolchain" => self.single(verb, args, at)?,
            "require" => {
                let module = self.module_version(verb, args, at)?;
                self.file.require.push(Require { module, syntax });
            }
            "exclude" => {
                let module = self.module_version(verb, args, at)?;
                self.file.exclude.push(Exclude { module, syntax });
            }
            "replace" => {
                let (old, new) = self.replacement(args, at)?;
                self.file.replace.push(Replace { old, new, syntax });
            }
            "retract" => self.retraction(args, at)?,
            _ => return Err(self.error(start, format!("unknown directive: {verb}"))),
        }
        Ok(())
    }

    fn single(&self, verb: &str, args: &[Token], at: usize) -> Result<(), ParseError> {
        match args {
            [arg] if is_value(arg) => Ok(()),
            _ => Err(self.error(at, format!("usage: {verb} <value>"))),
        }
    }

    fn module_version(
        &self,
        verb: &str,
        args: &[Token],
        at: usize,
    ) -> Result<ModuleVersion, ParseError> {
        match args {
            [path, version] if is_value(path) && is_value(version) => {
                Ok(ModuleVersion::new(&path.text, &version.text))
            }
            _ => Err(self.error(at, format!("usage: {verb} module/path v1.2.3"))),
        }
    }

    fn replacement(
        &self,
        args: &[Token],
        at: usize,
    ) -> Result<(ModuleVersion, ModuleVersion), ParseError> {
        const USAGE: &str = "usage: replace module/path [v1.2.3] => other/module v1.4.5 | ../local/directory";

        let Some(arrow) = args.iter().position(|t| t.kind == TokenKind::Arrow) else {
            return Err(self.error(at, USAGE));
        };
        let (lhs, rhs) = (&args[..arrow], &args[arrow + 1..]);
        if !lhs.iter().chain(rhs).all(is_value) {
            return Err(self.error(at, USAGE));
        }

        let old = match lhs {
            [path] => ModuleVersion::new(&path.text, ""),
            [path, version] => ModuleVersion::new(&path.text, &version.text),
            _ => return Err(self.error(at, USAGE)),
        };
        let new = match rhs {
            [path] => ModuleVersion::new(&path.text, ""),
            [path, version] => ModuleVersion::new(&path.text, &version.text),
            _ => return Err(self.error(at, USAGE)),
        };
        Ok((old, new))
    }

    /// `retract v1.0.1` or `retract [v1.1.0, v1.2.0]`.
    fn retraction(&self, args: &[Token], at: usize) -> Result<(), ParseError> {
        let parts = args
            .iter()
            .filter(|t| is_value(t))
            .map(|t| t.text.trim_matches(|c| c == '[' || c == ']' || c == ','))
            .filter(|s| !s.is_empty())
            .count();
        match parts {
            1 | 2 => Ok(()),
            _ => Err(self.error(at, "usage: retract version | retract [low, high]")),
        }
    }

    fn lex(&self, raw: &str, line_start: usize) -> Result<LexedLine, ParseError> {
        let bytes = raw.as_bytes();
        let mut out = LexedLine::default();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            match c {
                b' ' | b'\t' | b'\r' | b'\n' => i += 1,
                b'/' if bytes.get(i + 1) == Some(&b'/') => break,
                b'(' | b')' => {
                    let kind = if c == b'(' {
                        TokenKind::LParen
                    } else {
                        TokenKind::RParen
                    };
                    out.tokens.push(Token {
                        kind,
                        text: (c as char).to_string(),
                        start: line_start + i,
                        end: line_start + i + 1,
                    });
                    i += 1;
                }
                b'=' if bytes.get(i + 1) == Some(&b'>') => {
                    out.tokens.push(Token {
                        kind: TokenKind::Arrow,
                        text: "=>".to_string(),
                        start: line_start + i,
                        end: line_start + i + 2,
                    });
                    i += 2;
                }
                b'"' => {
                    let (text, len) = self.quoted(&raw[i..], line_start + i)?;
                    out.tokens.push(Token {
                        kind: TokenKind::Str,
                        text,
                        start: line_start + i,
                        end: line_start + i + len,
                    });
                    i += len;
                }
                b'`' => {
                    let Some(close) = raw[i + 1..].find('`') else {
                        return Err(self.error(line_start + i, "unterminated raw string"));
                    };
                    out.tokens.push(Token {
                        kind: TokenKind::Str,
                        text: raw[i + 1..i + 1 + close].to_string(),
                        start: line_start + i,
                        end: line_start + i + close + 2,
                    });
                    i += close + 2;
                }
                _ => {
                    let start = i;
                    while i < bytes.len() && is_ident_byte(bytes[i]) {
                        // `//` ends an identifier and starts a comment.
                        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'/') {
                            break;
                        }
                        i += 1;
                    }
                    out.tokens.push(Token {
                        kind: TokenKind::Ident,
                        text: raw[start..i].to_string(),
                        start: line_start + start,
                        end: line_start + i,
                    });
                }
            }
        }
        Ok(out)
    }

    /// Decode an interpreted string at the start of `s`; returns the value and its byte length.
    fn quoted(&self, s: &str, at: usize) -> Result<(String, usize), ParseError> {
        let mut value = String::new();
        let mut chars = s.char_indices().skip(1);
        while let Some((idx, c)) = chars.next() {
            match c {
                '"' => return Ok((value, idx + 1)),
                '\\' => match chars.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, other)) => {
                        return Err(self.error(at, format!("unknown escape sequence \\{other}")));
                    }
                    None => break,
                },
                '\n' => break,
                _ => value.push(c),
            }
        }
        Err(self.error(at, "unterminated quoted string"))
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        let before = &self.content[..offset.min(self.content.len())];
        let line = before.matches('\n').count() + 1;
        let column = offset - before.rfind('\n').map(|i| i + 1).unwrap_or(0) + 1;
        ParseError {
            name: self.name.to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}

fn is_ident_byte(c: u8) -> bool {
    !matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')' | b'"' | b'`')
}

fn is_value(t: &Token) -> bool {
    matches!(t.kind, TokenKind::Ident | TokenKind::Str)
}
