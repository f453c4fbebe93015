pub const DEFAULT_PLACEHOLDER_PATTERN: &str = "[^/.,;?]+";

/// A capture introduced by rewriting a placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// `None` for the anonymous `::` token.
    pub name: Option<String>,
    /// 1-based capture group index within the rewritten source.
    pub capture: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub source: String,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    CaptureOpen(usize),
    Colon(usize),
}

/// Walks a regex source reporting capturing-group openers and the colons
/// that are not regex syntax (escaped, inside a class, or a `(?flags:`
/// opener).
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    in_class: bool,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            in_class: false,
        }
    }

    fn resume_at(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn next_token(&mut self) -> Option<Token> {
        let bytes = self.bytes;
        while self.pos < bytes.len() {
            let at = self.pos;
            let b = bytes[at];

            if b == b'\\' {
                self.pos += 2;
                continue;
            }

            if self.in_class {
                if b == b']' {
                    self.in_class = false;
                }
                self.pos += 1;
                continue;
            }

            match b {
                b'[' => {
                    self.in_class = true;
                    self.pos += 1;
                    if bytes.get(self.pos) == Some(&b'^') {
                        self.pos += 1;
                    }
                    // a leading ']' is a literal member of the class
                    if bytes.get(self.pos) == Some(&b']') {
                        self.pos += 1;
                    }
                }
                b'(' => {
                    self.pos += 1;
                    if bytes.get(self.pos) != Some(&b'?') {
                        return Some(Token::CaptureOpen(at));
                    }
                    self.pos += 1;
                    let named = match bytes.get(self.pos) {
                        Some(b'P') => bytes.get(self.pos + 1) == Some(&b'<'),
                        Some(b'<') => !matches!(bytes.get(self.pos + 1), Some(b'=') | Some(b'!')),
                        _ => false,
                    };
                    if named {
                        return Some(Token::CaptureOpen(at));
                    }
                    while self.pos < bytes.len()
                        && (bytes[self.pos].is_ascii_alphabetic() || bytes[self.pos] == b'-')
                    {
                        self.pos += 1;
                    }
                    if bytes.get(self.pos) == Some(&b':') {
                        self.pos += 1;
                    }
                }
                b':' => {
                    self.pos += 1;
                    return Some(Token::Colon(at));
                }
                _ => self.pos += 1,
            }
        }
        None
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of the identifier starting at `start`, zero if there is none.
pub(crate) fn ident_len(bytes: &[u8], start: usize) -> usize {
    match bytes.get(start) {
        Some(&b) if is_ident_start(b) => {
            1 + bytes[start + 1..]
                .iter()
                .take_while(|&&b| is_ident_continue(b))
                .count()
        }
        _ => 0,
    }
}

/// Rewrites `:name` and `::` tokens into `(<placeholder_pattern>)` groups.
#[tracing::instrument(level = "trace", skip(placeholder_pattern))]
pub fn deduce_placeholders(source: &str, placeholder_pattern: &str) -> Rewritten {
    if memchr::memchr(b':', source.as_bytes()).is_none() {
        return Rewritten {
            source: source.to_string(),
            placeholders: Vec::new(),
        };
    }

    let bytes = source.as_bytes();
    let mut scanner = Scanner::new(source);
    let mut out = String::with_capacity(source.len() + 16);
    let mut placeholders = Vec::new();
    let mut captures = 0usize;
    let mut copied = 0usize;

    while let Some(token) = scanner.next_token() {
        let at = match token {
            Token::CaptureOpen(_) => {
                captures += 1;
                continue;
            }
            Token::Colon(at) => at,
        };

        let len = ident_len(bytes, at + 1);
        let (name, end) = if len > 0 {
            (Some(source[at + 1..at + 1 + len].to_string()), at + 1 + len)
        } else if bytes.get(at + 1) == Some(&b':') {
            (None, at + 2)
        } else {
            continue;
        };

        out.push_str(&source[copied..at]);
        out.push('(');
        out.push_str(placeholder_pattern);
        out.push(')');
        captures += 1;
        placeholders.push(Placeholder {
            name,
            capture: captures,
        });
        copied = end;
        scanner.resume_at(end);
    }

    out.push_str(&source[copied..]);

    Rewritten {
        source: out,
        placeholders,
    }
}

/// Number of capturing groups opened before byte `offset` of `source`.
pub fn count_parens_up_to(source: &str, offset: usize) -> usize {
    let mut scanner = Scanner::new(source);
    let mut count = 0;
    while let Some(token) = scanner.next_token() {
        if let Token::CaptureOpen(at) = token {
            if at >= offset {
                break;
            }
            count += 1;
        }
    }
    count
}

pub fn count_captures(source: &str) -> usize {
    count_parens_up_to(source, source.len())
}
