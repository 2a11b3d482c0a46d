//! Ownership record for the viewer's wheel listener and scheduled
//! animation frame.
//!
//! At most one of each may be live. Installing a new viewer must tear the
//! previous pair down first, otherwise duplicate listeners and loops
//! accumulate and stack their transforms on the shared context. This is a
//! correctness invariant, not an optimization, so the handles live in one
//! place with take-only teardown.
//!
//! Generic over the handle types: the component stores the wheel `Closure`
//! and the raf id here, the tests store counters.

#[derive(Debug)]
pub struct Attachment<L, F> {
    listener: Option<L>,
    frame: Option<F>,
}

impl<L, F> Default for Attachment<L, F> {
    fn default() -> Self {
        Self {
            listener: None,
            frame: None,
        }
    }
}

impl<L, F> Attachment<L, F> {
    /// Detach the live listener and cancel the live frame, if any.
    /// Returns how many of each were torn down (0 or 1). Safe to call
    /// repeatedly; the handles are taken out, so a second call is a no-op.
    pub fn teardown(
        &mut self,
        detach: impl FnOnce(&L),
        cancel: impl FnOnce(&F),
    ) -> (usize, usize) {
        let listeners = match self.listener.take() {
            Some(l) => {
                detach(&l);
                1
            }
            None => 0,
        };
        let frames = match self.frame.take() {
            Some(f) => {
                cancel(&f);
                1
            }
            None => 0,
        };
        (listeners, frames)
    }

    /// Record the newly attached wheel listener. The previous one must
    /// already have been torn down.
    pub fn set_listener(&mut self, listener: L) {
        debug_assert!(self.listener.is_none(), "listener installed twice");
        self.listener = Some(listener);
    }

    /// Record the most recently scheduled frame. The loop replaces this
    /// every tick; the previous handle has already fired by then.
    pub fn set_frame(&mut self, frame: F) {
        self.frame = Some(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardown_on_empty_record_is_a_noop() {
        let mut att: Attachment<u32, u32> = Attachment::default();
        let (l, f) = att.teardown(|_| {}, |_| {});
        assert_eq!((l, f), (0, 0));
    }

    #[test]
    fn reinstall_tears_down_exactly_one_of_each() {
        let mut att: Attachment<u32, i32> = Attachment::default();
        att.set_listener(7);
        att.set_frame(1);

        // Second viewer coming up: previous pair goes first.
        let mut detached = Vec::new();
        let mut cancelled = Vec::new();
        let (l, f) = att.teardown(|l| detached.push(*l), |f| cancelled.push(*f));
        assert_eq!((l, f), (1, 1));
        assert_eq!(detached, vec![7]);
        assert_eq!(cancelled, vec![1]);

        att.set_listener(8);
        att.set_frame(2);
        let (l, f) = att.teardown(|_| {}, |_| {});
        assert_eq!((l, f), (1, 1));
    }

    #[test]
    fn double_teardown_releases_nothing_twice() {
        let mut att: Attachment<u32, u32> = Attachment::default();
        att.set_listener(1);
        att.set_frame(2);
        assert_eq!(att.teardown(|_| {}, |_| {}), (1, 1));
        assert_eq!(att.teardown(|_| {}, |_| {}), (0, 0));
    }

    #[test]
    fn frame_handle_is_replaced_each_tick() {
        let mut att: Attachment<u32, u32> = Attachment::default();
        att.set_frame(1);
        att.set_frame(2);
        att.set_frame(3);
        let mut cancelled = Vec::new();
        att.teardown(|_| {}, |f| cancelled.push(*f));
        // Only the latest schedule is live to cancel.
        assert_eq!(cancelled, vec![3]);
    }
}
