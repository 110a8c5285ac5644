use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::Arc;

use flume::Receiver;
use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;

use crate::updater::Update;
use crate::{
    Command, CommandSnapshot, Compute, Dep, Graph, State, StateError, StateSyncStatus, TaskHandle,
    TaskId, Updater,
};

/// Owner of every state, compute and command of the application.
///
/// Frame loop:
/// 1. `sync_computes()` applies values published through [`Updater`]s
/// 2. the UI reads `state::<T>()` / `cached::<T>()` and mutates through `state_mut` / `update`
/// 3. `run_computed()` re-runs computes whose dependencies changed
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    status: BTreeMap<TypeId, StateSyncStatus>,
    graph: Graph<TypeId>,
    // topological order of computes
    order: Vec<TypeId>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,
    updater: Updater,
    updates: Receiver<Update>,
    root_token: CancellationToken,
    generation: u64,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (updater, updates) = Updater::channel();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            status: BTreeMap::new(),
            graph: Graph::new(),
            order: Vec::new(),
            commands: BTreeMap::new(),
            updater,
            updates,
            root_token: CancellationToken::new(),
            generation: 0,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.graph.add_node(id);
        self.states.insert(id, Box::new(state));
        self.mark_dependents_dirty(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (state_ids, compute_ids) = compute.deps();

        self.graph.add_node(id);
        for dep in state_ids.iter().chain(compute_ids) {
            self.graph.route_to(*dep, id);
        }
        self.computes.insert(id, Box::new(compute));
        self.status.insert(id, StateSyncStatus::BeforeInit);

        match self.graph.topology_sort() {
            Ok(order) => {
                self.order = order
                    .into_iter()
                    .filter(|id| self.computes.contains_key(id))
                    .collect();
            }
            Err(err) => error!(
                "StateCtx: cannot order {} in compute graph: {err}",
                type_name::<T>()
            ),
        }
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<T>())
            .ok_or_else(|| StateError::state_not_found(type_name::<T>(), "StateCtx::try_state"))
    }

    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutable access; dependents are marked dirty.
    ///
    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_dependents_dirty(id);
        self.states
            .get_mut(&id)
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| {
                panic!(
                    "{}",
                    StateError::state_not_found(type_name::<T>(), "StateCtx::state_mut")
                )
            })
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        let id = TypeId::of::<T>();
        match self
            .states
            .get_mut(&id)
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => {
                f(state);
                self.mark_dependents_dirty(id);
            }
            None => warn!("StateCtx::update: {} is not registered", type_name::<T>()),
        }
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<T>())
    }

    pub fn status_of<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.status.get(&TypeId::of::<T>()).copied()
    }

    /// Handle for publishing values from outside a compute or command (e.g. widget callbacks).
    pub fn updater(&self) -> Updater {
        self.updater.clone()
    }

    /// Apply every value published since the last call.
    pub fn sync_computes(&mut self) {
        let pending: Vec<Update> = self.updates.try_iter().collect();
        for (id, value) in pending {
            if let Some(compute) = self.computes.get_mut(&id) {
                compute.assign_box(value);
            } else if let Some(state) = self.states.get_mut(&id) {
                state.assign_box(value);
            } else {
                warn!("StateCtx::sync_computes: dropping update for unregistered type");
                continue;
            }
            self.mark_dependents_dirty(id);
        }
    }

    /// Run every compute that was never run or whose dependencies changed, in dependency order.
    pub fn run_computed(&mut self) {
        let ready: Vec<TypeId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.status.get(id).is_some_and(|s| s.needs_run()))
            .collect();

        for id in ready {
            if let Some(compute) = self.computes.get(&id) {
                compute.compute(Dep::new(&self.states), self.updater.clone());
            }
            self.status.insert(id, StateSyncStatus::Clean);
        }
    }

    /// Spawn the command `T` on the current Tokio runtime.
    ///
    /// Returns `None` when the command is not registered or no runtime is available.
    pub fn dispatch<T: Command>(&mut self) -> Option<TaskHandle> {
        let id = TypeId::of::<T>();
        let Some(command) = self.commands.get(&id).cloned() else {
            error!("StateCtx::dispatch: {} is not registered", type_name::<T>());
            return None;
        };
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("StateCtx::dispatch: no runtime for {}: {err}", type_name::<T>());
                return None;
            }
        };

        self.generation += 1;
        let token = self.root_token.child_token();
        debug!(
            "StateCtx::dispatch: {} (generation {})",
            type_name::<T>(),
            self.generation
        );
        runtime.spawn(command.run(self.snapshot(), self.updater.clone(), token.clone()));

        Some(TaskHandle::new(TaskId::new(id, self.generation), token))
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                snap.insert_cloned(*id, value);
            }
        }
        for (id, compute) in &self.computes {
            if let Some(value) = compute.snapshot() {
                snap.insert_cloned(*id, value);
            }
        }
        snap
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        for dependent in self.graph.dependents(id) {
            if let Some(status) = self.status.get_mut(&dependent) {
                *status = StateSyncStatus::Dirty;
            }
        }
    }
}

impl Drop for StateCtx {
    fn drop(&mut self) {
        self.root_token.cancel();
    }
}
