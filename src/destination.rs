//! Destination parsing.
//!
//! Turns loosely structured `[user@]host[:port]` strings into [`Destination`]
//! values. IPv6 literals must be wrapped in brackets so their colons are not
//! mistaken for a port delimiter.
//!
//! # Example
//!
//! ```
//! use sshgrid::destination::parse_destination;
//!
//! let dest = parse_destination("alice@[2001:db8::1]:2222").unwrap();
//! assert_eq!(dest.user.as_deref(), Some("alice"));
//! assert_eq!(dest.hostname, "2001:db8::1");
//! assert_eq!(dest.port, Some(2222));
//! ```

use crate::error::{GridError, Result};
use std::fmt;

/// Connection parameters extracted from one destination string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Host name or address. Never empty.
    pub hostname: String,
    /// Login user, if the destination named one.
    pub user: Option<String>,
    /// TCP port, if the destination named one.
    pub port: Option<u16>,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref user) = self.user {
            write!(f, "{}@", user)?;
        }
        if self.hostname.contains(':') {
            write!(f, "[{}]", self.hostname)?;
        } else {
            write!(f, "{}", self.hostname)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// Parse a single destination string.
///
/// The user is split off at the first `@` before anything else, so
/// `user@[::1]:2222` works and a `:` inside brackets is never a port
/// delimiter. An empty user or an empty port (`host:`) counts as absent.
///
/// # Errors
///
/// - [`GridError::MissingHostname`] if no hostname remains
/// - [`GridError::InvalidPort`] if the port is not a non-zero `u16`
/// - [`GridError::InvalidDestination`] for an unclosed `[` or trailing
///   garbage after `]`
pub fn parse_destination(spec: &str) -> Result<Destination> {
    let trimmed = spec.trim();

    let (user, rest) = match trimmed.split_once('@') {
        Some((user, rest)) => (non_empty(user), rest),
        None => (None, trimmed),
    };

    let (hostname, port) = if let Some(bracketed) = rest.strip_prefix('[') {
        let (host, after) = bracketed.split_once(']').ok_or_else(|| {
            GridError::InvalidDestination {
                spec: spec.to_string(),
                reason: "missing closing ']'".into(),
            }
        })?;
        let port = if after.is_empty() {
            None
        } else if let Some(port) = after.strip_prefix(':') {
            Some(port)
        } else {
            return Err(GridError::InvalidDestination {
                spec: spec.to_string(),
                reason: format!("unexpected '{}' after ']'", after),
            });
        };
        (host, port)
    } else if let Some((host, port)) = rest.split_once(':') {
        (host, Some(port))
    } else {
        (rest, None)
    };

    if hostname.is_empty() {
        return Err(GridError::MissingHostname(spec.to_string()));
    }

    let port = match port.and_then(non_empty) {
        Some(text) => Some(parse_port(spec, &text)?),
        None => None,
    };

    Ok(Destination {
        hostname: hostname.to_string(),
        user,
        port,
    })
}

/// Parse every destination before anything is launched.
///
/// Fails on the first invalid entry so that a bad destination never leaves a
/// half-built window behind.
pub fn parse_all<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Destination>> {
    specs.iter().map(|s| parse_destination(s.as_ref())).collect()
}

fn parse_port(spec: &str, text: &str) -> Result<u16> {
    match text.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(GridError::InvalidPort {
            spec: spec.to_string(),
            port: text.to_string(),
        }),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
