//! Dispatch/subscribe plumbing around a pure reducer.

use std::collections::VecDeque;
use strictly_othello_rules::{reduce, Action, AppState};
use tracing::{debug, instrument};

/// A pure state transition with a notion of "did anything change".
pub trait Reducer {
    /// Snapshot type.
    type State;
    /// Input type.
    type Action: Copy + std::fmt::Display;

    /// Computes the next snapshot.
    fn reduce(state: &Self::State, action: Self::Action) -> Self::State;

    /// Checks whether subscribers should hear about a transition.
    fn changed(before: &Self::State, after: &Self::State) -> bool;
}

/// The Othello state machine as a [`Reducer`].
///
/// Every action is written to the audit log, so changes are judged on the
/// game itself and the log is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct OthelloReducer;

impl Reducer for OthelloReducer {
    type State = AppState;
    type Action = Action;

    fn reduce(state: &AppState, action: Action) -> AppState {
        reduce(state, action)
    }

    fn changed(before: &AppState, after: &AppState) -> bool {
        !before.same_game(after)
    }
}

/// Handle given to subscribers for dispatching follow-up actions.
///
/// Actions are queued and processed after every subscriber has seen the
/// current snapshot.
#[derive(Debug)]
pub struct Dispatcher<A> {
    queued: Vec<A>,
}

impl<A> Dispatcher<A> {
    fn new() -> Self {
        Self { queued: Vec::new() }
    }

    /// Queues an action.
    pub fn dispatch(&mut self, action: A) {
        self.queued.push(action);
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Checks if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

/// Callback run after each state change.
pub type Subscriber<R> =
    Box<dyn FnMut(&<R as Reducer>::State, &mut Dispatcher<<R as Reducer>::Action>)>;

/// Holds the current snapshot and notifies subscribers of changes.
pub struct Store<R: Reducer> {
    state: R::State,
    subscribers: Vec<Subscriber<R>>,
    queue: VecDeque<R::Action>,
}

impl<R: Reducer> Store<R> {
    /// Creates a store around an initial snapshot.
    pub fn new(state: R::State) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Registers a subscriber. Subscribers run in registration order.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&R::State, &mut Dispatcher<R::Action>) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
        debug!(subscribers = self.subscribers.len(), "Subscriber registered");
    }

    /// Runs an action through the reducer.
    ///
    /// If the snapshot changed, every subscriber is called with the new
    /// snapshot. Actions subscribers dispatch are processed afterward, in
    /// order, each with its own notification round. Returns the number of
    /// actions processed.
    #[instrument(skip_all, fields(action = %action))]
    pub fn dispatch(&mut self, action: R::Action) -> usize {
        self.queue.push_back(action);
        let mut processed = 0;

        while let Some(action) = self.queue.pop_front() {
            processed += 1;
            let next = R::reduce(&self.state, action);
            let changed = R::changed(&self.state, &next);
            self.state = next;

            if !changed {
                debug!(action = %action, "State unchanged, subscribers not notified");
                continue;
            }

            let mut dispatcher = Dispatcher::new();
            for subscriber in &mut self.subscribers {
                subscriber(&self.state, &mut dispatcher);
            }
            if !dispatcher.is_empty() {
                debug!(queued = dispatcher.len(), "Subscribers dispatched follow-up actions");
            }
            self.queue.extend(dispatcher.queued);
        }

        processed
    }

    /// Current snapshot.
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<R> Default for Store<R>
where
    R: Reducer,
    R::State: Default,
{
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_unchanged_state_is_not_broadcast() {
        let mut store = Store::<OthelloReducer>::default();
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(move |_, _| *seen.borrow_mut() += 1);

        store.dispatch(Action::Undo);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(store.state().events().len(), 1);

        store.dispatch(Action::Initialize);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_subscribers_run_in_order() {
        let mut store = Store::<OthelloReducer>::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = Rc::clone(&order);
            store.subscribe(move |_, _| order.borrow_mut().push(id));
        }

        store.dispatch(Action::Initialize);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_follow_up_runs_after_notification() {
        let mut store = Store::<OthelloReducer>::default();
        let phases = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&phases);
        store.subscribe(move |state: &AppState, dispatch| {
            seen.borrow_mut().push(state.board_state().phase());
            if state.board_state().in_progress().is_some_and(|g| g.show_moves()) {
                dispatch.dispatch(Action::HideMoves);
            }
        });
        let seen = Rc::clone(&phases);
        store.subscribe(move |state: &AppState, _| {
            seen.borrow_mut().push(state.board_state().phase());
        });

        assert_eq!(store.dispatch(Action::Initialize), 2);
        assert_eq!(*phases.borrow(), vec!["STARTED", "STARTED", "STARTED", "STARTED"]);
        let game = store.state().board_state().in_progress().unwrap();
        assert!(!game.show_moves());
    }
}
