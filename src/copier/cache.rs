//! Process-wide cache of copy plans

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use super::error::{CopyError, CopyResult};
use super::plan::Copier;
use crate::property::{PropertyResult, Record, RecordDescriptor};

/// Cache key: (source type, target type)
pub type CopierKey = (TypeId, TypeId);

static GLOBAL: Lazy<CopierCache> = Lazy::new(CopierCache::new);

/// Read-through cache of [`Copier`]s keyed by type pair
///
/// Entries are built on first use and never evicted. Two threads racing on
/// the same new pair may both build a plan, but only the first one inserted
/// is kept and every caller receives that one.
#[derive(Debug, Default)]
pub struct CopierCache {
    copiers: RwLock<HashMap<CopierKey, Arc<Copier>>>,
}

impl CopierCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by the crate-level copy functions
    pub fn global() -> &'static CopierCache {
        &GLOBAL
    }

    // The map is only ever extended by a single insert, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CopierKey, Arc<Copier>>> {
        self.copiers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CopierKey, Arc<Copier>>> {
        self.copiers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a cached plan without building one
    pub fn get(&self, source: TypeId, target: TypeId) -> Option<Arc<Copier>> {
        self.read().get(&(source, target)).cloned()
    }

    /// Return the plan for this pair, building and caching it on first use
    pub fn get_or_build(&self, source: &RecordDescriptor, target: &RecordDescriptor) -> Arc<Copier> {
        let key = (source.type_id, target.type_id);
        if let Some(copier) = self.read().get(&key) {
            trace!(source = source.name, target = target.name, "Copier cache hit");
            return Arc::clone(copier);
        }

        // Built outside the lock; a concurrent builder may win the insert.
        let built = Arc::new(Copier::build(source, target));
        let mut copiers = self.write();
        let copier = copiers.entry(key).or_insert_with(|| {
            debug!(source = source.name, target = target.name, "Cached copier");
            built
        });
        Arc::clone(copier)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy `source` into a new `D`; `None` yields `None`
    pub fn copy<S: Record, D: Record>(&self, source: Option<&S>) -> PropertyResult<Option<D>> {
        let Some(source) = source else {
            return Ok(None);
        };

        let copier = self.get_or_build(source.descriptor(), D::record_descriptor());
        let mut target = D::instantiate()?;
        copier.apply(source, &mut target)?;
        Ok(Some(target))
    }

    /// Copy every element of `sources` into a new `D`
    ///
    /// An empty slice yields `None`. The plan is resolved once from the first
    /// element and reused for the rest.
    pub fn copy_many<S: Record, D: Record>(&self, sources: &[S]) -> PropertyResult<Option<Vec<D>>> {
        let Some(first) = sources.first() else {
            return Ok(None);
        };

        let copier = self.get_or_build(first.descriptor(), D::record_descriptor());
        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            let mut target = D::instantiate()?;
            copier.apply(source, &mut target)?;
            results.push(target);
        }
        Ok(Some(results))
    }

    /// [`copy_many`](Self::copy_many) over type-erased sources
    ///
    /// Every element must have the runtime type of the first one; a mixed
    /// batch is rejected before anything is copied.
    pub fn copy_many_dyn<D: Record>(&self, sources: &[&dyn Record]) -> CopyResult<Option<Vec<D>>> {
        let Some(first) = sources.first() else {
            return Ok(None);
        };

        let expected = first.descriptor();
        if let Some((index, other)) = sources
            .iter()
            .enumerate()
            .find(|(_, s)| s.descriptor().type_id != expected.type_id)
        {
            return Err(CopyError::HeterogeneousSource {
                index,
                expected: expected.name,
                found: other.descriptor().name,
            });
        }

        let copier = self.get_or_build(expected, D::record_descriptor());
        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            let mut target = D::instantiate()?;
            copier.apply(*source, &mut target)?;
            results.push(target);
        }
        Ok(Some(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Foo {
            name: Option<String>,
            age: Option<i32>,
        }
    }

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Bar {
            name: Option<String>,
            age: Option<i32>,
            addr: Option<String>,
        }
    }

    fn foo(name: &str, age: i32) -> Foo {
        Foo {
            name: Some(name.to_string()),
            age: Some(age),
        }
    }

    #[test]
    fn test_get_or_build_caches_once() {
        let cache = CopierCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(TypeId::of::<Foo>(), TypeId::of::<Bar>()).is_none());

        let a = cache.get_or_build(Foo::record_descriptor(), Bar::record_descriptor());
        let b = cache.get_or_build(Foo::record_descriptor(), Bar::record_descriptor());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        cache.get_or_build(Bar::record_descriptor(), Foo::record_descriptor());
        assert_eq!(cache.len(), 2);
        assert!(cache.get(TypeId::of::<Foo>(), TypeId::of::<Bar>()).is_some());
    }

    #[test]
    fn test_copy_none() {
        let cache = CopierCache::new();
        let out: Option<Bar> = cache.copy(None::<&Foo>).unwrap();
        assert!(out.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_copy_many_reuses_plan() {
        let cache = CopierCache::new();
        let sources = vec![foo("Page", 18), foo("George", 8)];
        let out: Vec<Bar> = cache.copy_many(&sources).unwrap().unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[1].name.as_deref(), Some("George"));
        assert_eq!(out[1].addr, None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_copy_many_empty_is_none() {
        let cache = CopierCache::new();
        assert!(cache.copy_many::<Foo, Bar>(&[]).unwrap().is_none());
        assert!(cache.copy_many_dyn::<Bar>(&[]).unwrap().is_none());
    }

    #[test]
    fn test_copy_many_dyn_rejects_mixed_batch() {
        let cache = CopierCache::new();
        let a = foo("Tom", 1);
        let b = Bar::default();
        let sources: [&dyn Record; 3] = [&a, &a, &b];

        let err = cache.copy_many_dyn::<Foo>(&sources).unwrap_err();
        assert_eq!(
            err,
            CopyError::HeterogeneousSource {
                index: 2,
                expected: "Foo",
                found: "Bar",
            }
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_first_use() {
        const THREADS: usize = 16;
        let cache = CopierCache::new();
        let barrier = Barrier::new(THREADS);

        let copiers: Vec<Arc<Copier>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let cache = &cache;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        let source = foo("Tom", i as i32);
                        let out: Bar = cache.copy(Some(&source)).unwrap().unwrap();
                        assert_eq!(out.age, Some(i as i32));
                        cache.get_or_build(Foo::record_descriptor(), Bar::record_descriptor())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(copiers.iter().all(|c| Arc::ptr_eq(c, &copiers[0])));
    }
}
