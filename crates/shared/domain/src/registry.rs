//! Startup registry entries for feature slices.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// State a feature prepares at startup and shares with its handlers.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Short identifier reported by the health endpoint, e.g. `registration`.
    fn name(&self) -> &'static str;
}

/// One registered slice, keyed by its concrete type.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: state.name(), state: Box::new(state) }
    }

    /// The slice state as `T`, if that is its concrete type.
    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        let state: &dyn Any = &*self.state;
        state.downcast_ref::<T>()
    }
}
