// panoramas.rs - live panoramas of one host, their frame loops and deferred callbacks

use crate::config::WidgetConfig;
use crate::error::PanoramaError;
use crate::handlers::{self, InputEvent};
use crate::host::{Container, ContainerId, Host, Target};
use crate::widget::{PanoramaId, PanoramaWidget};
use std::collections::{HashMap, VecDeque};

/// Completion callback of a construction, delivered on the next `run_deferred`.
pub type CreateCallback<H> =
    Box<dyn FnOnce(&mut Panoramas<H>, Result<PanoramaId, PanoramaError>)>;

type Deferred<H> = Box<dyn FnOnce(&mut Panoramas<H>)>;

/// Positional arguments following the params in a construction call.
pub enum Argument<H: Host> {
    Callback(CreateCallback<H>),
    Value(serde_json::Value),
}

pub struct Panoramas<H: Host> {
    host: H,
    widgets: HashMap<PanoramaId, PanoramaWidget<H::Renderer>>,
    deferred: VecDeque<Deferred<H>>,
}

impl<H: Host + 'static> Panoramas<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            widgets: HashMap::new(),
            deferred: VecDeque::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Create a panorama in `container`.
    ///
    /// With a callback, the outcome (error included) reaches it on the next `run_deferred` and
    /// failures return `Ok(None)`. Without one, failures are returned directly.
    pub fn create(
        &mut self,
        container: impl Into<Container>,
        params: &serde_json::Value,
        callback: Option<CreateCallback<H>>,
    ) -> Result<Option<PanoramaId>, PanoramaError> {
        let extras = callback.map(Argument::Callback).into_iter().collect();
        self.construct(container, params, extras)
    }

    /// Like `create`, taking the raw positional tail: at most one argument, a callback.
    pub fn construct(
        &mut self,
        container: impl Into<Container>,
        params: &serde_json::Value,
        extras: Vec<Argument<H>>,
    ) -> Result<Option<PanoramaId>, PanoramaError> {
        let mut callback = None;
        let mut bad_argument = false;
        for (i, arg) in extras.into_iter().enumerate() {
            match arg {
                Argument::Callback(cb) if i == 0 => callback = Some(cb),
                _ => {
                    bad_argument = true;
                    break;
                }
            }
        }

        let container = container.into();
        let result = if bad_argument {
            Err(PanoramaError::IncorrectArgument)
        } else {
            self.build(&container, params)
        };

        match (result, callback) {
            (Ok(id), Some(cb)) => {
                let ready = id.clone();
                self.defer(move |panoramas| cb(panoramas, Ok(ready)));
                Ok(Some(id))
            }
            (Ok(id), None) => Ok(Some(id)),
            (Err(e), Some(cb)) => {
                log::warn!("panorama construction failed: {e}");
                self.defer(move |panoramas| cb(panoramas, Err(e)));
                Ok(None)
            }
            (Err(e), None) => Err(e),
        }
    }

    fn build(
        &mut self,
        container: &Container,
        params: &serde_json::Value,
    ) -> Result<PanoramaId, PanoramaError> {
        let config = WidgetConfig::from_params(params)?;
        let paths = config.texture_paths()?;

        let container = self
            .host
            .resolve(container)
            .ok_or(PanoramaError::NoContainer)?;

        let (width, height) = self.host.dimensions(container);
        if width < 1 || height < 1 {
            return Err(PanoramaError::ContainerZeroSize);
        }
        if self.host.occupant(container).is_some() {
            return Err(PanoramaError::SinglePanoramaPerContainer);
        }

        let widget = PanoramaWidget::build(&mut self.host, container, config, paths)?;
        let id = widget.id().clone();
        self.widgets.insert(id.clone(), widget);
        Ok(id)
    }

    fn defer(&mut self, f: impl FnOnce(&mut Panoramas<H>) + 'static) {
        self.deferred.push_back(Box::new(f));
    }

    /// Run callbacks queued before this call. Ones they queue wait for the next call.
    pub fn run_deferred(&mut self) -> usize {
        let pending: Vec<_> = self.deferred.drain(..).collect();
        let n = pending.len();
        for f in pending {
            f(self);
        }
        n
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    pub fn get(&self, id: &PanoramaId) -> Option<&PanoramaWidget<H::Renderer>> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &PanoramaId) -> Option<&mut PanoramaWidget<H::Renderer>> {
        self.widgets.get_mut(id)
    }

    pub fn is_alive(&self, id: &PanoramaId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Panorama marked on `container`.
    pub fn on_container(
        &mut self,
        container: ContainerId,
    ) -> Result<&mut PanoramaWidget<H::Renderer>, PanoramaError> {
        let id = self
            .host
            .occupant(container)
            .ok_or(PanoramaError::HandlerCannotFoundThePanorama)?;
        self.widgets
            .get_mut(&id)
            .ok_or(PanoramaError::HandlerCannotFoundThePanorama)
    }

    /// Start a frame loop for `id`. Returns false when the panorama is gone.
    pub fn animate(&mut self, id: &PanoramaId) -> bool {
        match self.widgets.get_mut(id) {
            Some(widget) => {
                widget.animate();
                true
            }
            None => false,
        }
    }

    /// One display refresh: every running loop draws once.
    pub fn frame(&mut self) {
        for widget in self.widgets.values_mut() {
            for _ in 0..widget.loops() {
                widget.draw();
            }
        }
    }

    pub fn destroy(&mut self, id: &PanoramaId) -> bool {
        match self.widgets.remove(id) {
            Some(widget) => {
                widget.destroy(&mut self.host);
                true
            }
            None => false,
        }
    }

    pub fn destroy_all(&mut self) {
        let ids: Vec<_> = self.widgets.keys().cloned().collect();
        for id in ids {
            self.destroy(&id);
        }
    }

    /// Run every handler bound on `target` for this event, in bind order.
    pub fn dispatch(&mut self, target: Target, event: &InputEvent) -> Result<(), PanoramaError> {
        let handler = handlers::handler_for::<H>(event.kind());
        for binding in self.host.bindings().matching(target, event.kind()) {
            handler(self, &binding, event)?;
        }
        Ok(())
    }
}
