/// Nested-call construct: `%name;` invokes another record by name.
pub struct NestedCall;

impl NestedCall {
    pub const MARKER: u8 = b'%';

    /// Bytes after which a marker may start a call (besides the body start).
    pub fn may_follow(b: u8) -> bool {
        b.is_ascii_whitespace() || b == b';'
    }
}
