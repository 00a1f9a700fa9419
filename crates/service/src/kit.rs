/// Per-request context: who is acting and the id used to correlate logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    pub user: String,
    pub rid: String,
}

impl Kit {
    pub fn new(user: impl Into<String>, rid: impl Into<String>) -> Self {
        Self { user: user.into(), rid: rid.into() }
    }
}
