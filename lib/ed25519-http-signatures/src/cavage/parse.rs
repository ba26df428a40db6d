use super::{SignatureHeader, DEFAULT_HEADERS};
use crate::crypto::Algorithm;
use logos::{Lexer, Logos, Span};
use miette::{Diagnostic, SourceSpan};
use std::iter::Peekable;
use thiserror::Error;

#[derive(Debug, Logos)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"\w+")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    Value,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    pub fn parse(input: &str) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(|(ty, span)| match ty {
                Ok(ty) => Ok(Token { ty, span }),
                Err(()) => Err(span),
            })
    }
}

/// Reason a signature header failed to parse
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseErrorKind {
    /// Parameter appeared more than once
    #[error("duplicate parameter")]
    DuplicateParameter,

    /// `headers` parameter is present but lists nothing
    #[error("empty header list")]
    EmptyHeaders,

    /// Authorization header doesn't use the `Signature` scheme
    #[error("unsupported authorization scheme")]
    InvalidScheme,

    /// `signature` parameter is missing
    #[error("missing signature parameter")]
    MissingSignature,

    /// Input ended in the middle of a parameter
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// Token appeared where it isn't allowed
    #[error("unexpected token")]
    UnexpectedToken,
}

/// Signature header parse error
#[derive(Clone, Debug, Diagnostic, Error)]
#[error("Malformed signature header: {kind}")]
#[diagnostic(code(ed25519_http_signatures::malformed_signature))]
pub struct ParseError {
    kind: ParseErrorKind,

    #[label("{kind}")]
    span: SourceSpan,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: span.into(),
        }
    }

    /// Reason the header was rejected
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Location of the offending input
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

macro_rules! ensure {
    ($self:expr, $token:expr, $pattern:pat) => {{
        match $token {
            Some(Ok(token)) if matches!(token.ty, $pattern) => token,
            Some(Ok(Token { span, .. }) | Err(span)) => {
                $self.is_broken = true;
                return Some(Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    span,
                )));
            }
            None => {
                $self.is_broken = true;
                let end = $self.input.len();
                return Some(Err(ParseError::new(ParseErrorKind::UnexpectedEnd, end..end)));
            }
        }
    }};
}

struct ParseIter<'a, I> {
    /// Stream of tokens wrapped into a result
    inner: I,

    /// Reference to the original input that was fed to the lexer
    input: &'a str,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<'a, I> Iterator for ParseIter<'a, Peekable<I>>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<(&'a str, &'a str, Span), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let first = self.inner.next()?;
        let key = ensure!(self, Some(first), TokenTy::Key);
        ensure!(self, self.inner.next(), TokenTy::Equals);
        let value = ensure!(self, self.inner.next(), TokenTy::Value);

        if let Some(next) = self.inner.next() {
            ensure!(self, Some(next), TokenTy::Comma);

            // A comma has to be followed by another parameter
            if self.inner.peek().is_none() {
                self.is_broken = true;
                let end = self.input.len();
                return Some(Err(ParseError::new(ParseErrorKind::UnexpectedEnd, end..end)));
            }
        }

        let span = key.span.start..value.span.end;
        let key = &self.input[key.span];
        // Strip the surrounding quotes. The lexer guarantees there are exactly two
        let value = &self.input[value.span.start + 1..value.span.end - 1];

        Some(Ok((key, value, span)))
    }
}

/// Parse a signature header value into its parameters
///
/// Unknown parameters are ignored. `algorithm` and `headers` fall back to their defaults when absent
#[inline]
pub fn parse(input: &str) -> Result<SignatureHeader<'_, &str>, ParseError> {
    let kv_iter = ParseIter {
        inner: Token::parse(input).peekable(),
        input,
        is_broken: false,
    };

    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    for kv in kv_iter {
        let (key, value, span) = kv?;

        let slot = match key {
            "keyId" => &mut key_id,
            "algorithm" => &mut algorithm,
            "headers" => &mut headers,
            "signature" => &mut signature,
            _ => continue,
        };

        if slot.replace((value, span.clone())).is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateParameter, span));
        }
    }

    let Some((signature, _)) = signature else {
        return Err(ParseError::new(
            ParseErrorKind::MissingSignature,
            0..input.len(),
        ));
    };

    let headers = match headers {
        Some((value, span)) => {
            let headers = value.split_whitespace().collect::<Vec<_>>();
            if headers.is_empty() {
                return Err(ParseError::new(ParseErrorKind::EmptyHeaders, span));
            }

            headers
        }
        None => DEFAULT_HEADERS.to_vec(),
    };

    Ok(SignatureHeader {
        key_id: key_id.map(|(key_id, _)| key_id),
        algorithm: algorithm.map_or(Algorithm::default().as_str(), |(algorithm, _)| algorithm),
        headers,
        signature,
    })
}
