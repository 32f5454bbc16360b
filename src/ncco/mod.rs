//! Call control objects: the JSON documents the voice platform fetches to
//! learn what to do with a call leg.

use serde::Serialize;

mod connect;

pub use connect::Connect;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Connect(Connect),
}

impl From<Connect> for Action {
    fn from(connect: Connect) -> Self {
        Action::Connect(connect)
    }
}

/// An ordered list of actions, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Ncco {
    actions: Vec<Action>,
}

impl Ncco {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: impl Into<Action>) -> &mut Self {
        self.actions.push(action.into());
        self
    }
}
