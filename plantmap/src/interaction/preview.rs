//! Transient image previews held during a selection session.
//!
//! A preview keeps a copy of an image the user picked before it is uploaded.
//! Every preview must be revoked when the session ends (cancel, commit,
//! unmount); any still live when the registry is dropped are revoked then.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

/// Handle to a registered preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewHandle(u64);

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Callback run for every revoked preview.
pub type RevokeHook = Arc<dyn Fn(PreviewHandle) + Send + Sync>;

#[derive(Debug)]
struct Preview {
    name: String,
    data: Vec<u8>,
}

/// Registry of live previews.
#[derive(Default)]
pub struct TransientPreviews {
    next_id: u64,
    live: BTreeMap<PreviewHandle, Preview>,
    on_revoke: Option<RevokeHook>,
}

impl std::fmt::Debug for TransientPreviews {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientPreviews")
            .field("next_id", &self.next_id)
            .field("live", &self.live.len())
            .finish()
    }
}

impl TransientPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that reports each revocation to `hook`.
    pub fn with_hook(hook: RevokeHook) -> Self {
        Self {
            next_id: 0,
            live: BTreeMap::new(),
            on_revoke: Some(hook),
        }
    }

    /// Register a preview for an image.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) -> PreviewHandle {
        self.next_id += 1;
        let handle = PreviewHandle(self.next_id);
        let name = name.into();
        trace!(preview = handle.0, name = %name, bytes = data.len(), "Preview created");
        self.live.insert(handle, Preview { name, data });
        handle
    }

    /// Image name for a live preview.
    pub fn name(&self, handle: PreviewHandle) -> Option<&str> {
        self.live.get(&handle).map(|p| p.name.as_str())
    }

    /// Image bytes for a live preview.
    pub fn data(&self, handle: PreviewHandle) -> Option<&[u8]> {
        self.live.get(&handle).map(|p| p.data.as_slice())
    }

    /// Revoke one preview. Returns false if it was not live.
    pub fn revoke(&mut self, handle: PreviewHandle) -> bool {
        match self.live.remove(&handle) {
            Some(preview) => {
                trace!(preview = handle.0, name = %preview.name, "Preview revoked");
                if let Some(hook) = &self.on_revoke {
                    hook(handle);
                }
                true
            }
            None => false,
        }
    }

    /// Revoke every live preview, returning how many were revoked.
    pub fn revoke_all(&mut self) -> usize {
        let handles: Vec<PreviewHandle> = self.live.keys().copied().collect();
        let count = handles.into_iter().filter(|h| self.revoke(*h)).count();
        if count > 0 {
            debug!(count, "Revoked transient previews");
        }
        count
    }

    /// Number of live previews.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl Drop for TransientPreviews {
    fn drop(&mut self) {
        self.revoke_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (TransientPreviews, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook_count = Arc::clone(&count);
        let previews = TransientPreviews::with_hook(Arc::new(move |_| {
            hook_count.fetch_add(1, Ordering::SeqCst);
        }));
        (previews, count)
    }

    #[test]
    fn test_insert_and_revoke() {
        let (mut previews, count) = counting();
        let a = previews.insert("a.jpg", vec![1, 2, 3]);
        let b = previews.insert("b.jpg", vec![4]);
        assert_ne!(a, b);
        assert_eq!(previews.live(), 2);
        assert_eq!(previews.name(a), Some("a.jpg"));
        assert_eq!(previews.data(b), Some(&[4u8][..]));

        assert!(previews.revoke(a));
        assert!(!previews.revoke(a));
        assert_eq!(previews.live(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_revoke_all() {
        let (mut previews, count) = counting();
        previews.insert("a.jpg", Vec::new());
        previews.insert("b.jpg", Vec::new());
        assert_eq!(previews.revoke_all(), 2);
        assert!(previews.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_revokes_live_previews() {
        let (mut previews, count) = counting();
        previews.insert("a.jpg", Vec::new());
        previews.insert("b.jpg", Vec::new());
        drop(previews);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
