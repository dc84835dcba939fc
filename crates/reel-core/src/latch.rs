/// Generator nodes may only be stopped once; later stops are no-ops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StopLatch {
    stopped: bool,
}

impl StopLatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stop(&mut self) -> bool {
        !std::mem::replace(&mut self.stopped, true)
    }
}
