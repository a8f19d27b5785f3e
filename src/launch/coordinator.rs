//! Decision core of the launch coordinator.
//!
//! OS lifecycle callbacks are reduced to a small signal set dispatched
//! against one owned state object. Each dispatch returns the effects the
//! shell must perform, so delivery ordering is testable without a window.

/// Inbound lifecycle signals, one per OS callback the shell wires up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchSignal {
    /// Files handed to the running instance (startup argv or an OS
    /// open-file event), already filtered to plain paths.
    FilesOpened { paths: Vec<String> },
    /// A second process launched with "open with" and relayed its paths
    /// before terminating.
    SecondInstance { paths: Vec<String> },
    /// The primary window finished loading its page.
    WindowReady,
}

/// Side effects the shell performs after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchEffect {
    /// Push the paths to the UI over the `open-files` channel, in order.
    DeliverFiles(Vec<String>),
    /// Restore the primary window if minimized, then focus it.
    FocusWindow,
}

/// Owned coordinator state: the pending file queue and window readiness.
///
/// Paths arriving before readiness are queued; the queue is drained as a
/// single batch exactly once, when `WindowReady` arrives. A path is either
/// delivered immediately or queued, never dropped, never delivered twice.
#[derive(Debug, Default)]
pub struct LaunchCoordinator {
    pending: Vec<String>,
    window_ready: bool,
}

impl LaunchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one signal, returning the effects to perform.
    pub fn handle(&mut self, signal: LaunchSignal) -> Vec<LaunchEffect> {
        match signal {
            LaunchSignal::FilesOpened { paths } => self.deliver_or_queue(paths),
            LaunchSignal::SecondInstance { paths } => {
                let mut effects = self.deliver_or_queue(paths);
                effects.push(LaunchEffect::FocusWindow);
                effects
            }
            LaunchSignal::WindowReady => {
                self.window_ready = true;
                if self.pending.is_empty() {
                    return Vec::new();
                }
                let batch = std::mem::take(&mut self.pending);
                vec![LaunchEffect::DeliverFiles(batch)]
            }
        }
    }

    fn deliver_or_queue(&mut self, paths: Vec<String>) -> Vec<LaunchEffect> {
        if paths.is_empty() {
            // Signal carried no paths after filtering; not an error.
            return Vec::new();
        }
        if self.window_ready {
            vec![LaunchEffect::DeliverFiles(paths)]
        } else {
            self.pending.extend(paths);
            Vec::new()
        }
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn is_window_ready(&self) -> bool {
        self.window_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_signals_before_ready_deliver_once_as_one_batch() {
        let mut coordinator = LaunchCoordinator::new();

        let effects = coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/a.mp3"]),
        });
        assert!(effects.is_empty());

        let effects = coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/b.mp3"]),
        });
        assert!(effects.is_empty());
        assert_eq!(coordinator.pending(), paths(&["/a.mp3", "/b.mp3"]));

        let effects = coordinator.handle(LaunchSignal::WindowReady);
        assert_eq!(
            effects,
            vec![LaunchEffect::DeliverFiles(paths(&["/a.mp3", "/b.mp3"]))]
        );
        assert!(coordinator.pending().is_empty());

        // A later signal is delivered alone and immediately.
        let effects = coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/c.mp3"]),
        });
        assert_eq!(effects, vec![LaunchEffect::DeliverFiles(paths(&["/c.mp3"]))]);
        assert!(coordinator.pending().is_empty());
    }

    #[test]
    fn test_batch_is_never_redelivered() {
        let mut coordinator = LaunchCoordinator::new();
        coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/a.mp3"]),
        });
        let first = coordinator.handle(LaunchSignal::WindowReady);
        assert_eq!(first.len(), 1);

        // Readiness again with an empty queue is a no-op.
        let second = coordinator.handle(LaunchSignal::WindowReady);
        assert!(second.is_empty());
    }

    #[test]
    fn test_post_ready_signal_bypasses_queue() {
        let mut coordinator = LaunchCoordinator::new();
        coordinator.handle(LaunchSignal::WindowReady);

        let effects = coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/track.flac"]),
        });
        assert_eq!(
            effects,
            vec![LaunchEffect::DeliverFiles(paths(&["/track.flac"]))]
        );
        assert!(coordinator.pending().is_empty());
    }

    #[test]
    fn test_order_is_concatenation_across_signals() {
        let mut coordinator = LaunchCoordinator::new();
        coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/1.mp3", "/2.mp3"]),
        });
        coordinator.handle(LaunchSignal::SecondInstance {
            paths: paths(&["/3.mp3"]),
        });
        coordinator.handle(LaunchSignal::FilesOpened {
            paths: paths(&["/4.mp3"]),
        });

        let effects = coordinator.handle(LaunchSignal::WindowReady);
        assert_eq!(
            effects,
            vec![LaunchEffect::DeliverFiles(paths(&[
                "/1.mp3", "/2.mp3", "/3.mp3", "/4.mp3"
            ]))]
        );
    }

    #[test]
    fn test_empty_signal_is_a_noop() {
        let mut coordinator = LaunchCoordinator::new();
        let effects = coordinator.handle(LaunchSignal::FilesOpened { paths: vec![] });
        assert!(effects.is_empty());
        assert!(coordinator.pending().is_empty());
    }

    #[test]
    fn test_second_instance_always_focuses() {
        let mut coordinator = LaunchCoordinator::new();

        // Before readiness: paths queue, focus still requested.
        let effects = coordinator.handle(LaunchSignal::SecondInstance {
            paths: paths(&["/x.mp3"]),
        });
        assert_eq!(effects, vec![LaunchEffect::FocusWindow]);
        assert_eq!(coordinator.pending(), paths(&["/x.mp3"]));

        // After readiness: delivery plus focus, and an empty relaunch
        // still focuses.
        coordinator.handle(LaunchSignal::WindowReady);
        let effects = coordinator.handle(LaunchSignal::SecondInstance { paths: vec![] });
        assert_eq!(effects, vec![LaunchEffect::FocusWindow]);
    }
}
