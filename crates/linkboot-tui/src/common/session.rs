/// Identifies one boot session started from the menu.
///
/// Events carry the id of the session that produced them so the reducer can
/// drop anything left over from a session that was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

#[derive(Debug, Default)]
pub struct SessionSeq {
    next: u64,
}

impl SessionSeq {
    pub fn next_id(&mut self) -> SessionId {
        let id = SessionId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut seq = SessionSeq::default();
        assert_eq!(seq.next_id(), SessionId(0));
        assert_eq!(seq.next_id(), SessionId(1));
    }
}
