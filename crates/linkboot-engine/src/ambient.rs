/// One-shot visual flourish the engine may fire on a reveal tick.
///
/// Fire-and-forget: implementations must not block and cannot influence the
/// session.
pub trait AmbientEffect: Send + Sync {
    fn trigger(&self);
}

impl<F> AmbientEffect for F
where
    F: Fn() + Send + Sync,
{
    fn trigger(&self) {
        self();
    }
}
