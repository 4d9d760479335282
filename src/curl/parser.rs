//! The token-driven state machine that turns sanitized words into a [`Request`].
//!
//! Each token is fed to [`step`], a pure reducer returning the next [`State`]
//! and, possibly, a [`Patch`] for the request being built. [`build`] folds
//! the reducer over the whole token list.

use base64::{Engine as _, engine::general_purpose};
use log::{debug, trace};

use crate::request::{KEY_AUTHORIZATION, KEY_COOKIE, KEY_USER_AGENT, Request};

/// The flag families that take a value from the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    UserAgent,
    Header,
    Data,
    User,
    Method,
    Cookie,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    None,
    Expect(Kind),
}

/// A recognized cURL flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Insecure,
    Head,
    Expect(Kind),
}

impl Flag {
    pub fn lookup(token: &str) -> Option<Self> {
        let flag = match token {
            "-A" | "--user-agent" => Flag::Expect(Kind::UserAgent),
            "-H" | "--header" => Flag::Expect(Kind::Header),
            "-d" | "--data" | "--data-ascii" | "--data-raw" => Flag::Expect(Kind::Data),
            "-u" | "--user" => Flag::Expect(Kind::User),
            "-I" | "--head" => Flag::Head,
            "-X" | "--request" => Flag::Expect(Kind::Method),
            "-b" | "--cookie" => Flag::Expect(Kind::Cookie),
            "-k" | "--insecure" => Flag::Insecure,
            "-m" | "--max-time" => Flag::Expect(Kind::Timeout),
            _ => return None,
        };
        Some(flag)
    }
}

/// One change to the request under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    Url(String),
    SkipTls,
    Head,
    Method(String),
    Header(String, String),
    Data(String),
    Timeout(String),
}

pub fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

/// Advances the state machine by one token.
///
/// URLs win over everything and leave the state alone. A value flag replaces
/// whatever expectation was pending. An empty value uses up the pending flag
/// without touching the request. Tokens nobody is waiting for are dropped.
pub fn step(state: State, token: &str) -> (State, Option<Patch>) {
    if is_url(token) {
        return (state, Some(Patch::Url(token.into())));
    }

    if let Some(flag) = Flag::lookup(token) {
        return match flag {
            Flag::Insecure => (state, Some(Patch::SkipTls)),
            Flag::Head => (state, Some(Patch::Head)),
            Flag::Expect(kind) => (State::Expect(kind), None),
        };
    }

    match state {
        State::Expect(_) if token.is_empty() => (State::None, None),
        State::Expect(kind) => (State::None, Some(value(kind, token))),
        State::None => (State::None, None),
    }
}

fn value(kind: Kind, token: &str) -> Patch {
    match kind {
        Kind::Header => {
            let (key, value) = token.split_once(':').unwrap_or((token, ""));
            Patch::Header(key.trim().to_lowercase(), value.trim_start().into())
        }
        Kind::UserAgent => Patch::Header(KEY_USER_AGENT.into(), token.into()),
        Kind::Data => Patch::Data(token.into()),
        Kind::User => Patch::Header(
            KEY_AUTHORIZATION.into(),
            format!("Basic {}", general_purpose::STANDARD.encode(token)),
        ),
        Kind::Method => Patch::Method(token.into()),
        Kind::Cookie => Patch::Header(KEY_COOKIE.into(), token.into()),
        Kind::Timeout => Patch::Timeout(token.into()),
    }
}

/// Runs every token through [`step`] and applies the resulting patches.
pub fn build<I, S>(tokens: I) -> Request
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut req = Request::default();
    let mut state = State::None;

    for token in tokens {
        let token = token.as_ref();
        let (next, patch) = step(state, token);
        trace!("token {token:?}: {state:?} -> {next:?}, patch {patch:?}");

        match (state, next, &patch) {
            (State::Expect(pending), State::Expect(_), None) if Flag::lookup(token).is_some() => {
                debug!("flag {token:?} abandons pending {pending:?} value");
            }
            (State::Expect(pending), State::None, None) => debug!("empty {pending:?} value"),
            (State::None, State::None, None) => debug!("ignoring token {token:?}"),
            _ => {}
        }

        if let Some(patch) = patch {
            req.apply(patch);
        }
        state = next;
    }

    if let State::Expect(pending) = state {
        debug!("command ended while expecting a {pending:?} value");
    }
    req
}
