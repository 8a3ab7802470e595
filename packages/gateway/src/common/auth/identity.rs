/// Validated projection of a session token
///
/// Lives for one request only and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: u32,
    pub is_admin: bool,
    pub is_super_admin: bool,
}
