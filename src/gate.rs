use crate::error::SigError;

/// Lowercase a raw token and strip one trailing `.png` extension. Applied
/// to both login input and model file names, so a login matches the stem
/// of its model file.
pub fn normalize_token(raw: &str) -> String {
    let lower = raw.to_lowercase();
    match lower.strip_suffix(".png") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    AwaitingInput,
    Resolved(String),
    Exhausted,
}

/// Bounded-retry identity resolution. Not an authentication scheme: it
/// only matches a name token against the identities that have a model.
#[derive(Debug)]
pub struct IdentityGate {
    known: Vec<String>,
    max_attempts: u32,
    attempts: u32,
    state: GateState,
}

impl IdentityGate {
    pub fn new(known: impl IntoIterator<Item = String>, max_attempts: u32) -> Self {
        Self {
            known: known.into_iter().map(|k| normalize_token(&k)).collect(),
            max_attempts,
            attempts: 0,
            state: GateState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Feed one input line: the token before the first space (or the whole
    /// line) is normalized and compared for exact equality against every
    /// known identity. Terminal states ignore further input.
    pub fn submit(&mut self, line: &str) -> &GateState {
        if self.state != GateState::AwaitingInput {
            return &self.state;
        }

        let token = line.split(' ').next().unwrap_or(line);
        let token = normalize_token(token);

        if self.known.iter().any(|known| *known == token) {
            self.state = GateState::Resolved(token);
        } else {
            self.attempts += 1;
            if self.attempts >= self.max_attempts {
                self.state = GateState::Exhausted;
            }
        }
        &self.state
    }
}

/// Drive a gate over a stream of input lines. Yields the resolved identity,
/// or `SessionExhausted` once the attempt budget is spent or the line
/// source ends early.
pub fn resolve_identity(
    lines: impl IntoIterator<Item = String>,
    known: impl IntoIterator<Item = String>,
    max_attempts: u32,
) -> Result<String, SigError> {
    let mut gate = IdentityGate::new(known, max_attempts);
    for line in lines {
        match gate.submit(&line) {
            GateState::Resolved(identity) => return Ok(identity.clone()),
            GateState::Exhausted => break,
            GateState::AwaitingInput => {}
        }
    }
    Err(SigError::SessionExhausted {
        attempts: gate.attempts(),
    })
}
