use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// Event bindings registered by a page, released together.
///
/// Each entry is a detach action; the listener closure lives inside it so it
/// stays alive exactly as long as the binding. Dropping `Bindings` releases
/// whatever is still tracked.
#[derive(Default)]
pub struct Bindings {
    detach: Vec<Box<dyn FnOnce()>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, detach: impl FnOnce() + 'static) {
        self.detach.push(Box::new(detach));
    }

    /// `addEventListener` on `target`, undone by [`Bindings::release_all`].
    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to bind {} listener: {:?}", event, err);
            return;
        }
        let target = target.clone();
        self.track(move || {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        });
    }

    pub fn len(&self) -> usize {
        self.detach.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detach.is_empty()
    }

    /// Detaches everything, most recent binding first.
    pub fn release_all(&mut self) {
        while let Some(detach) = self.detach.pop() {
            detach();
        }
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        self.release_all();
    }
}
