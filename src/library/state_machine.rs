use std::marker::PhantomData;
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;

/// Elm-style loop: events are folded into the state by `transition_fn`,
/// every returned effect runs on its own thread and reports back by sending
/// events. The loop ends once `is_done_fn` accepts the current state.
#[derive(Debug, Clone)]
pub struct StateMachine<TState, TEvent, TEffect, T, R, E, D>
where
    T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync,
    R: Fn(&TState) + Send + Sync,
    E: Fn(TEffect, Sender<TEvent>) + Send + Sync,
    D: Fn(&TState) -> bool + Send + Sync,
{
    pub init: (TState, Vec<TEffect>),
    pub transition_fn: Arc<T>,
    pub render_fn: Arc<R>,
    pub run_effect_fn: Arc<E>,
    pub is_done_fn: Arc<D>,
    _event: PhantomData<TEvent>,
}

impl<TState, TEvent, TEffect, T, R, E, D> StateMachine<TState, TEvent, TEffect, T, R, E, D>
where
    TState: Clone + Send + 'static,
    TEvent: Send + 'static,
    TEffect: Clone + Send + 'static,
    T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync + 'static,
    R: Fn(&TState) + Send + Sync + 'static,
    E: Fn(TEffect, Sender<TEvent>) + Send + Sync + 'static,
    D: Fn(&TState) -> bool + Send + Sync + 'static,
{
    pub fn new(
        init: (TState, Vec<TEffect>),
        transition_fn: T,
        render_fn: R,
        run_effect_fn: E,
        is_done_fn: D,
    ) -> Self {
        Self {
            init,
            transition_fn: Arc::new(transition_fn),
            render_fn: Arc::new(render_fn),
            run_effect_fn: Arc::new(run_effect_fn),
            is_done_fn: Arc::new(is_done_fn),
            _event: PhantomData,
        }
    }

    /// Runs until the state is done and returns the final state.
    pub fn run(&self) -> Result<TState, Box<dyn std::error::Error + Send + Sync>> {
        let (event_sender, event_receiver) = channel();
        let (mut state, effects) = self.init.clone();

        (self.render_fn)(&state);
        self.spawn_effects(effects, &event_sender);

        while !(self.is_done_fn)(&state) {
            let event = event_receiver.recv()?;
            let (new_state, new_effects) = (self.transition_fn)(state, event);
            state = new_state;
            (self.render_fn)(&state);
            self.spawn_effects(new_effects, &event_sender);
        }

        Ok(state)
    }

    fn spawn_effects(&self, effects: Vec<TEffect>, event_sender: &Sender<TEvent>) {
        for effect in effects {
            let effect_sender = event_sender.clone();
            let run_effect_fn = Arc::clone(&self.run_effect_fn);
            std::thread::spawn(move || {
                run_effect_fn(effect, effect_sender);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone)]
    enum CountEffect {
        Increment,
    }

    #[test]
    fn test_runs_effects_until_done() {
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let rendered_clone = rendered.clone();

        let machine = StateMachine::new(
            (0u32, vec![CountEffect::Increment]),
            |count: u32, step: u32| {
                let next = count + step;
                (next, vec![CountEffect::Increment])
            },
            move |count: &u32| rendered_clone.lock().unwrap().push(*count),
            |effect: CountEffect, sender: Sender<u32>| match effect {
                CountEffect::Increment => {
                    let _ = sender.send(1);
                }
            },
            |count: &u32| *count >= 3,
        );

        let final_state = machine.run().unwrap();

        assert_eq!(final_state, 3);
        assert_eq!(*rendered.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_done_initial_state_returns_immediately() {
        let machine = StateMachine::new(
            (10u32, Vec::<CountEffect>::new()),
            |count: u32, _event: ()| (count, vec![]),
            |_count: &u32| {},
            |_effect: CountEffect, _sender: Sender<()>| {},
            |_count: &u32| true,
        );

        assert_eq!(machine.run().unwrap(), 10);
    }
}
