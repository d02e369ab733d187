use std::sync::{Arc, RwLock};

use crate::layout::LayoutPass;

/// Publication point between layout and rendering.
///
/// A new pass replaces the previous one as a whole. Readers hold an `Arc` to
/// the pass they started with, which stays unchanged until they drop it.
#[derive(Debug)]
pub struct LayoutStore {
    current: RwLock<Arc<LayoutPass>>,
}

impl LayoutStore {
    pub fn new(pass: LayoutPass) -> Self {
        Self {
            current: RwLock::new(Arc::new(pass)),
        }
    }

    pub fn current(&self) -> Arc<LayoutPass> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swaps in `pass` and returns the one it replaced.
    pub fn publish(&self, pass: LayoutPass) -> Arc<LayoutPass> {
        let next = Arc::new(pass);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(LayoutPass::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::RepoSnapshot;
    use crate::layout::compute_layout;
    use crate::model::CommitModel;

    fn pass_with(commits: usize) -> LayoutPass {
        let mut snapshot = RepoSnapshot::new();
        for i in 0..commits {
            let sha = format!("c{i}");
            if i == 0 {
                snapshot.add_commit(&sha, "master", &[]);
            } else {
                let parent = format!("c{}", i - 1);
                snapshot.add_commit(&sha, "master", &[parent.as_str()]);
            }
        }
        let model = CommitModel::from_snapshot(snapshot).unwrap();
        compute_layout(&model, &LayoutConfig::default())
    }

    #[test]
    fn readers_keep_their_pass_across_publish() {
        let store = LayoutStore::new(pass_with(2));
        let held = store.current();
        let replaced = store.publish(pass_with(3));

        assert_eq!(held.commits.len(), 2);
        assert!(Arc::ptr_eq(&held, &replaced));
        assert_eq!(store.current().commits.len(), 3);
    }

    #[test]
    fn default_store_is_empty() {
        let store = LayoutStore::default();
        assert!(store.current().commits.is_empty());
    }
}
