use std::fmt;
use std::rc::Rc;

/// Answers whether drag-to-dismiss is currently allowed. Queried on every
/// drag update.
pub type DismissPolicy = Rc<dyn Fn() -> bool>;

pub fn always_dismissible() -> DismissPolicy {
    Rc::new(|| true)
}

/// Hooks invoked at fixed points of the presentation lifecycle.
#[derive(Clone, Default)]
pub struct DeckCallbacks {
    pub present_animation: Option<Rc<dyn Fn()>>,
    pub present_completion: Option<Rc<dyn Fn(bool)>>,
    pub dismiss_animation: Option<Rc<dyn Fn()>>,
    pub dismiss_completion: Option<Rc<dyn Fn(bool)>>,
}

impl DeckCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_present_animation(mut self, callback: impl Fn() + 'static) -> Self {
        self.present_animation = Some(Rc::new(callback));
        self
    }

    pub fn on_present_completion(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.present_completion = Some(Rc::new(callback));
        self
    }

    pub fn on_dismiss_animation(mut self, callback: impl Fn() + 'static) -> Self {
        self.dismiss_animation = Some(Rc::new(callback));
        self
    }

    pub fn on_dismiss_completion(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.dismiss_completion = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for DeckCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckCallbacks")
            .field("present_animation", &self.present_animation.is_some())
            .field("present_completion", &self.present_completion.is_some())
            .field("dismiss_animation", &self.dismiss_animation.is_some())
            .field("dismiss_completion", &self.dismiss_completion.is_some())
            .finish()
    }
}
