//! The build context: registries plus the process-wide component cache.

use std::any::type_name;
use std::sync::{Arc, Mutex};

use arcstr::ArcStr;
use cache::mem::TypeCache;
use serde::Serialize;

use crate::component::{Component, ComponentBuilder};
use crate::cross_section::CrossSectionRegistry;
use crate::error::{Error, Result};
use crate::layer::LayerRegistry;

/// A parametrized component generator.
///
/// A block is a plain serializable value: its serialized form, together
/// with its type, is the cache key, so two blocks with equal parameters
/// always build the same component.
pub trait Block: Serialize + Clone + Send + Sync + 'static {
    /// A human-readable name for the generated component.
    fn name(&self) -> ArcStr;

    /// Generates the component's geometry and ports.
    fn build(&self, ctx: &Context, cell: &mut ComponentBuilder) -> Result<()>;
}

/// Cache key for a built component: block type plus content hash of its
/// parameters.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CellKey(String);

/// The entry point for building components.
///
/// Holds the layer and cross-section registries and the build cache.
/// Cloning a context is cheap and shares the cache.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cell_cache: Arc<Mutex<TypeCache>>,
    layers: LayerRegistry,
    cross_sections: CrossSectionRegistry,
}

impl Context {
    /// Creates a context with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the given registries.
    pub fn with_registries(layers: LayerRegistry, cross_sections: CrossSectionRegistry) -> Self {
        Self {
            cell_cache: Arc::new(Mutex::new(TypeCache::new())),
            layers,
            cross_sections,
        }
    }

    /// The layer registry.
    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    /// The cross-section registry.
    pub fn cross_sections(&self) -> &CrossSectionRegistry {
        &self.cross_sections
    }

    /// Builds the component described by `block`, or returns the cached
    /// instance if an equal block was built before.
    ///
    /// At most one build runs per key: concurrent callers with the same
    /// block wait for the in-flight build and observe the identical
    /// [`Arc`]. A failed build is cached too, so a failing block does not
    /// rebuild on every call.
    pub fn build<B: Block>(&self, block: &B) -> Result<Arc<Component>> {
        let hash = cache::content_hash(block).map_err(|e| Error::Cache(Arc::new(e)))?;
        let key = CellKey(format!("{}:{}", type_name::<B>(), hash));

        let handle = {
            let ctx = self.clone();
            let block = block.clone();
            // Hold the cache lock only to look up or install the cell;
            // generation happens on its own thread, so recursive builds
            // from inside a generator cannot deadlock.
            let mut cache = self.cell_cache.lock().unwrap();
            cache.generate(key, move |_| ctx.build_uncached(&block))
        };

        match handle.try_get() {
            Ok(result) => result.clone(),
            Err(e) => Err(Error::Cache(e)),
        }
    }

    fn build_uncached<B: Block>(&self, block: &B) -> Result<Arc<Component>> {
        let name = block.name();
        tracing::debug!(cell = %name, "building component");
        let mut cell = ComponentBuilder::new(name);
        block.build(self, &mut cell)?;
        Ok(Arc::new(cell.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use geometry::point::Point;
    use geometry::polygon::Polygon;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Square {
        size: f64,
    }

    impl Block for Square {
        fn name(&self) -> ArcStr {
            arcstr::format!("square_{}", self.size)
        }

        fn build(&self, _ctx: &Context, cell: &mut ComponentBuilder) -> Result<()> {
            BUILD_COUNT.fetch_add(1, Ordering::SeqCst);
            cell.add_polygon(
                Layer::new(1, 0),
                Polygon::from_verts(vec![
                    Point::zero(),
                    Point::new(self.size, 0.),
                    Point::new(self.size, self.size),
                    Point::new(0., self.size),
                ]),
            );
            Ok(())
        }
    }

    #[test]
    fn equal_blocks_share_one_build() {
        let ctx = Context::new();
        let a = ctx.build(&Square { size: 2. }).unwrap();
        let before = BUILD_COUNT.load(Ordering::SeqCst);
        let b = ctx.build(&Square { size: 2. }).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(BUILD_COUNT.load(Ordering::SeqCst), before);

        let c = ctx.build(&Square { size: 3. }).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
