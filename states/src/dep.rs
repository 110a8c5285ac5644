use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
};

use crate::{State, StateError};

/// Read-only view over the context handed to [`crate::Compute::compute`].
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(states: &'a BTreeMap<TypeId, Box<dyn State>>) -> Self {
        Self { states }
    }

    pub fn get_state_ref<T: State>(&self) -> Result<&'a T, StateError> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<T>())
            .ok_or_else(|| StateError::state_not_found(type_name::<T>(), "Dep::get_state_ref"))
    }
}
